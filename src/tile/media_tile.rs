use crate::{
    animation::fade::{FADE_DURATION_MS, FadeAnimator, FadeControl, FadeState},
    config::TileSettings,
    foundation::{
        core::{FrameTime, IntRect, Point, Provenance},
        error::{TileError, TileResult},
    },
    geometry::shape::{ClipGeometry, CornerRadius, GeometryCache, ShapeMode, content_rect},
    host::resources::ColorRef,
    render::{
        bitmap::{Bitmap, ColorFilter, TilePaint},
        debug::{DebugOverlayRenderer, DebugPalette},
        shape::{FadePhase, ShapeRenderer},
        surface::Surface,
    },
    tile::drawable::Drawable,
};

/// Border ring around the content. The ring itself is painted by the host's background layer;
/// the tile only insets its content by `size`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Border {
    /// Inset in pixels on every edge.
    pub size: u32,
    /// Ring colour, as a resource reference or literal ARGB.
    pub color: ColorRef,
}

/// Everything a bind needs besides the bitmap and placeholder.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileOptions {
    /// Where the bitmap came from.
    pub provenance: Provenance,
    /// Fade overrides.
    pub fade: FadeControl,
    /// Clip shape.
    pub shape: ShapeMode,
    /// Corner radius source for rounded rects.
    pub corner_radius: CornerRadius,
    /// Border inset and colour.
    pub border: Border,
    /// Draw the provenance indicator.
    pub debugging: bool,
    /// Display density used to scale the indicator.
    pub density: f32,
    /// Cross-fade length.
    pub fade_duration_ms: u64,
    /// Indicator colours.
    pub palette: DebugPalette,
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            provenance: Provenance::Network,
            fade: FadeControl::default(),
            shape: ShapeMode::Circle,
            corner_radius: CornerRadius::Auto,
            border: Border::default(),
            debugging: false,
            density: 1.0,
            fade_duration_ms: FADE_DURATION_MS,
            palette: DebugPalette::default(),
        }
    }
}

impl TileOptions {
    /// Options seeded from process-wide settings.
    pub fn from_settings(settings: &TileSettings) -> Self {
        Self {
            debugging: settings.debug_indicators,
            density: settings.density,
            fade_duration_ms: settings.fade_duration_ms,
            palette: settings.palette,
            ..Self::default()
        }
    }
}

/// A bound bitmap rendered as a circle or rounded rect, cross-fading in over a placeholder.
///
/// Replacing the bitmap means binding a new tile. All calls happen on the render thread.
pub struct MediaTile {
    paint: TilePaint,
    placeholder: Option<Box<dyn Drawable>>,
    options: TileOptions,
    animator: FadeAnimator,
    geometry: GeometryCache,
    renderer: ShapeRenderer,
    overlay: DebugOverlayRenderer,
    bounds: IntRect,
    content: IntRect,
    alpha: u8,
}

impl MediaTile {
    /// Bind a decoded bitmap. `image == None` is a programmer error.
    ///
    /// The fade starts at `now` when `force || (provenance != Memory && !suppress)`; otherwise
    /// the tile is fully opaque from its first draw and the placeholder is dropped right away.
    pub fn bind(
        image: Option<Bitmap>,
        placeholder: Option<Box<dyn Drawable>>,
        options: TileOptions,
        now: FrameTime,
    ) -> TileResult<Self> {
        let image = image.ok_or_else(|| {
            TileError::invalid_argument("attempted to bind a media tile with no decoded bitmap")
        })?;

        let fade = options.fade.effective(options.provenance);
        let animator = FadeAnimator::for_bind(fade, now, options.fade_duration_ms);
        let bounds = IntRect::from_size(
            i32::try_from(image.width()).unwrap_or(i32::MAX),
            i32::try_from(image.height()).unwrap_or(i32::MAX),
        );
        let placeholder = if fade {
            placeholder.map(|mut p| {
                p.set_bounds(bounds);
                p
            })
        } else {
            None
        };
        let content = content_rect(bounds, options.border.size);

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            provenance = ?options.provenance,
            fade,
            shape = ?options.shape,
            border = options.border.size,
            "media tile bound"
        );

        Ok(Self {
            paint: TilePaint::new(image),
            placeholder,
            options,
            animator,
            geometry: GeometryCache::default(),
            renderer: ShapeRenderer::default(),
            overlay: DebugOverlayRenderer,
            bounds,
            content,
            alpha: 0xFF,
        })
    }

    /// Layout settled on new bounds.
    pub fn on_bounds_changed(&mut self, bounds: IntRect) {
        self.bounds = bounds;
        self.content = content_rect(bounds, self.options.border.size);
        self.geometry.invalidate();
        if let Some(placeholder) = self.placeholder.as_mut() {
            placeholder.set_bounds(bounds);
        }
        tracing::debug!(
            width = bounds.width(),
            height = bounds.height(),
            "media tile bounds changed"
        );
    }

    /// Draw one frame at `now`. Returns `true` while the fade needs further frames.
    pub fn draw(&mut self, surface: &mut dyn Surface, now: FrameTime) -> bool {
        let geometry =
            self.geometry
                .get_or_compute(self.content, self.options.shape, self.options.corner_radius);

        let sample = self.animator.sample(now);
        if sample.completed {
            self.release_placeholder();
        }
        let phase = if self.animator.is_animating() {
            FadePhase::Animating { sample }
        } else {
            FadePhase::Settled
        };

        let origin = Point::new(f64::from(self.bounds.left), f64::from(self.bounds.top));
        let placeholder = self
            .placeholder
            .as_deref_mut()
            .map(|p| p as &mut dyn Drawable);
        let more = self.renderer.draw(
            surface,
            &mut self.paint,
            &geometry,
            origin,
            phase,
            placeholder,
            now,
        );

        if self.options.debugging {
            self.overlay.draw(
                surface,
                self.options.provenance,
                &self.options.palette,
                self.options.density,
            );
        }

        tracing::trace!(
            progress = sample.progress,
            alpha = self.alpha,
            radius = geometry.radius,
            "media tile drawn"
        );
        more
    }

    /// Host transparency; forwarded to the placeholder while it is owned.
    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
        self.paint.alpha = alpha;
        if let Some(placeholder) = self.placeholder.as_mut() {
            placeholder.set_alpha(alpha);
        }
    }

    /// Colour filter for the bitmap; forwarded to the placeholder while it is owned.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.paint.set_color_filter(filter);
        if let Some(placeholder) = self.placeholder.as_mut() {
            placeholder.set_color_filter(filter);
        }
    }

    /// Bitmap width.
    pub fn intrinsic_width(&self) -> u32 {
        self.paint.shader().source().width()
    }

    /// Bitmap height.
    pub fn intrinsic_height(&self) -> u32 {
        self.paint.shader().source().height()
    }

    /// Current geometry, recomputed if the bounds changed since the last draw.
    pub fn geometry(&mut self) -> ClipGeometry {
        self.geometry
            .get_or_compute(self.content, self.options.shape, self.options.corner_radius)
    }

    /// Radius in effect for the current bounds.
    pub fn radius(&mut self) -> f64 {
        self.geometry().radius
    }

    /// Current bounds.
    pub fn bounds(&self) -> IntRect {
        self.bounds
    }

    /// Bounds minus the border inset.
    pub fn content_rect(&self) -> IntRect {
        self.content
    }

    /// Host alpha.
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Fade state.
    pub fn fade_state(&self) -> FadeState {
        self.animator.state()
    }

    /// Whether the last draw asked for another frame.
    pub fn needs_another_frame(&self) -> bool {
        self.animator.needs_another_frame()
    }

    /// `true` while the placeholder is still owned by this tile.
    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    /// Bind-time options.
    pub fn options(&self) -> &TileOptions {
        &self.options
    }

    /// Bound bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        self.paint.shader().source()
    }

    fn release_placeholder(&mut self) {
        if self.placeholder.take().is_some() {
            tracing::debug!("fade complete, placeholder released");
        }
    }
}

impl Drawable for MediaTile {
    fn intrinsic_size(&self) -> Option<(u32, u32)> {
        Some((self.intrinsic_width(), self.intrinsic_height()))
    }

    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.on_bounds_changed(bounds);
    }

    fn draw(&mut self, surface: &mut dyn Surface, now: FrameTime) -> bool {
        MediaTile::draw(self, surface, now)
    }

    fn set_alpha(&mut self, alpha: u8) {
        MediaTile::set_alpha(self, alpha);
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        MediaTile::set_color_filter(self, filter);
    }
}

impl std::fmt::Debug for MediaTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaTile")
            .field("bitmap", &self.bitmap().id())
            .field("bounds", &self.bounds)
            .field("content", &self.content)
            .field("fade", &self.animator.state())
            .field("has_placeholder", &self.placeholder.is_some())
            .field("alpha", &self.alpha)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/media_tile.rs"]
mod tests;
