use crate::{
    foundation::{
        core::{FrameTime, IntRect},
        error::{TileError, TileResult},
    },
    host::{
        background::{BorderBackground, InteractionState},
        resources::{NoResources, ResourceResolver, resolve_color_or_literal},
    },
    render::{bitmap::Bitmap, surface::Surface},
    tile::{
        drawable::Drawable,
        media_tile::{MediaTile, TileOptions},
    },
};

/// What the fetch pipeline hands over once a bitmap is decoded.
pub struct BindRequest {
    /// The decoded bitmap; `None` is rejected.
    pub image: Option<Bitmap>,
    /// Provenance, fade, shape and border configuration.
    pub options: TileOptions,
}

impl BindRequest {
    /// Request binding `image` with `options`.
    pub fn new(image: Bitmap, options: TileOptions) -> Self {
        Self {
            image: Some(image),
            options,
        }
    }
}

/// Placeholder shown while the bitmap is loading.
#[derive(Default)]
pub enum PlaceholderSource {
    /// Drawable resource resolved through the view's resolver.
    Resource(u32),
    /// Ready-made drawable.
    Drawable(Box<dyn Drawable>),
    /// Clear the view.
    #[default]
    None,
}

impl PlaceholderSource {
    /// Pipeline convention: a non-zero resource id wins over the drawable.
    pub fn from_parts(resource_id: u32, drawable: Option<Box<dyn Drawable>>) -> Self {
        match (resource_id, drawable) {
            (0, Some(d)) => Self::Drawable(d),
            (0, None) => Self::None,
            (id, _) => Self::Resource(id),
        }
    }
}

impl std::fmt::Debug for PlaceholderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resource(id) => f.debug_tuple("Resource").field(id).finish(),
            Self::Drawable(_) => f.write_str("Drawable(..)"),
            Self::None => f.write_str("None"),
        }
    }
}

enum Attached {
    Tile(Box<MediaTile>),
    Drawable(Box<dyn Drawable>),
}

impl Attached {
    fn as_drawable_mut(&mut self) -> &mut dyn Drawable {
        match self {
            Self::Tile(t) => t.as_mut() as &mut dyn Drawable,
            Self::Drawable(d) => d.as_mut(),
        }
    }

    fn into_drawable(self) -> Box<dyn Drawable> {
        match self {
            Self::Tile(t) => t as Box<dyn Drawable>,
            Self::Drawable(d) => d,
        }
    }
}

/// Minimal host view: one attached drawable over an optional border background.
pub struct HostView {
    attached: Option<Attached>,
    background: Option<BorderBackground>,
    bounds: IntRect,
    state: InteractionState,
    resolver: Box<dyn ResourceResolver>,
}

impl Default for HostView {
    fn default() -> Self {
        Self::new(Box::new(NoResources))
    }
}

impl HostView {
    /// Empty view resolving resources through `resolver`.
    pub fn new(resolver: Box<dyn ResourceResolver>) -> Self {
        Self {
            attached: None,
            background: None,
            bounds: IntRect::default(),
            state: InteractionState::IDLE,
            resolver,
        }
    }

    /// Current bounds.
    pub fn bounds(&self) -> IntRect {
        self.bounds
    }

    /// Layout pass: forwards the bounds to the background and the attached drawable.
    pub fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
        if let Some(bg) = self.background.as_mut() {
            bg.set_bounds(bounds);
        }
        if let Some(a) = self.attached.as_mut() {
            a.as_drawable_mut().set_bounds(bounds);
        }
    }

    /// Interaction state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Update the interaction state. Returns `true` when the view needs a repaint.
    pub fn set_state(&mut self, state: InteractionState) -> bool {
        self.state = state;
        self.background
            .as_mut()
            .is_some_and(|bg| bg.set_state(state))
    }

    /// The attached tile, if a bitmap is bound.
    pub fn tile(&self) -> Option<&MediaTile> {
        match self.attached.as_ref()? {
            Attached::Tile(t) => Some(t.as_ref()),
            Attached::Drawable(_) => None,
        }
    }

    /// Mutable access to the attached tile.
    pub fn tile_mut(&mut self) -> Option<&mut MediaTile> {
        match self.attached.as_mut()? {
            Attached::Tile(t) => Some(t.as_mut()),
            Attached::Drawable(_) => None,
        }
    }

    /// `true` when something (tile or placeholder) is attached.
    pub fn has_content(&self) -> bool {
        self.attached.is_some()
    }

    /// Border background, once a bitmap has been bound.
    pub fn background(&self) -> Option<&BorderBackground> {
        self.background.as_ref()
    }

    /// Draw the background, then the attached drawable. Returns `true` when another frame is
    /// wanted.
    pub fn draw(&mut self, surface: &mut dyn Surface, now: FrameTime) -> bool {
        let mut more = false;
        if let Some(bg) = self.background.as_mut() {
            more |= bg.draw(surface, now);
        }
        if let Some(a) = self.attached.as_mut() {
            more |= a.as_drawable_mut().draw(surface, now);
        }
        more
    }

    fn attach(&mut self, attached: Attached) {
        self.attached = Some(attached);
        if !self.bounds.is_empty() {
            self.set_bounds(self.bounds);
        }
    }
}

/// Bind a decoded bitmap to `view`, replacing whatever it showed. The previous drawable becomes
/// the new tile's placeholder, with its frame animation stopped.
///
/// Fails with [`TileError::InvalidArgument`] when the request carries no bitmap; the view is
/// left untouched in that case.
#[tracing::instrument(skip(view, request), fields(provenance = ?request.options.provenance))]
pub fn set_bitmap(view: &mut HostView, request: BindRequest, now: FrameTime) -> TileResult<()> {
    let BindRequest { image, options } = request;
    let Some(image) = image else {
        return Err(TileError::invalid_argument(
            "set_bitmap called without a decoded bitmap",
        ));
    };

    let mut placeholder = view.attached.take().map(Attached::into_drawable);
    if let Some(anim) = placeholder.as_mut().and_then(|p| p.as_animatable()) {
        anim.stop();
    }

    let color = resolve_color_or_literal(view.resolver.as_ref(), options.border.color);
    let mut background = BorderBackground::new(
        options.corner_radius,
        color,
        (image.width(), image.height()),
    );
    background.set_state(view.state);
    view.background = Some(background);

    let tile = MediaTile::bind(Some(image), placeholder, options, now)?;
    view.attach(Attached::Tile(Box::new(tile)));
    Ok(())
}

/// Show a placeholder on `view` before its bitmap arrives, starting it if it is frame-animated.
///
/// An unresolvable resource id leaves the view empty and logs a warning.
#[tracing::instrument(skip(view))]
pub fn set_placeholder(view: &mut HostView, source: PlaceholderSource) {
    let drawable = match source {
        PlaceholderSource::Resource(id) => match view.resolver.resolve_drawable(id) {
            Ok(d) => Some(d),
            Err(err) => {
                tracing::warn!(id, %err, "placeholder resource not found");
                None
            }
        },
        PlaceholderSource::Drawable(d) => Some(d),
        PlaceholderSource::None => None,
    };

    view.attached = None;
    if let Some(mut drawable) = drawable {
        if let Some(anim) = drawable.as_animatable() {
            anim.start();
        }
        view.attach(Attached::Drawable(drawable));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/view.rs"]
mod tests;
