use kurbo::Affine;

use crate::{
    animation::fade::FadeSample,
    foundation::core::{BezPath, FrameTime, Point},
    geometry::shape::{ClipGeometry, ClipShape},
    render::{
        bitmap::TilePaint,
        surface::{Brush, Surface},
    },
    tile::drawable::Drawable,
};

/// Fade input for one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FadePhase {
    /// Cross-fade in progress; `sample.progress` is in `[0, 1)`.
    Animating {
        /// Animator sample taken for this draw.
        sample: FadeSample,
    },
    /// No fade: done, skipped or never started.
    Settled,
}

/// Draws the clipped bitmap, with the placeholder underneath while fading.
#[derive(Clone, Debug, Default)]
pub struct ShapeRenderer {
    path: Option<(ClipShape, BezPath)>,
}

impl ShapeRenderer {
    /// Draw one frame. Returns `true` when the fade still needs another frame.
    ///
    /// `origin` anchors the bitmap's top-left pixel; the shader is sampled 1:1 from there.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        surface: &mut dyn Surface,
        paint: &mut TilePaint,
        geometry: &ClipGeometry,
        origin: Point,
        phase: FadePhase,
        placeholder: Option<&mut dyn Drawable>,
        now: FrameTime,
    ) -> bool {
        match phase {
            FadePhase::Animating { sample } => {
                if let Some(placeholder) = placeholder {
                    placeholder.draw(surface, now);
                }
                let base = paint.alpha;
                paint.alpha = sample.partial_alpha(base);
                self.fill_shape(surface, paint, geometry, origin);
                paint.alpha = base;
                sample.progress < 1.0
            }
            FadePhase::Settled => {
                self.fill_shape(surface, paint, geometry, origin);
                false
            }
        }
    }

    fn fill_shape(
        &mut self,
        surface: &mut dyn Surface,
        paint: &TilePaint,
        geometry: &ClipGeometry,
        origin: Point,
    ) {
        if geometry.clip.is_degenerate() || paint.alpha == 0 {
            return;
        }
        let path = self.path_for(&geometry.clip);
        let brush = Brush::Bitmap {
            bitmap: paint.shader().sampled(),
            transform: Affine::translate(origin.to_vec2()),
        };
        surface.fill_path(path, brush, paint.alpha);
    }

    fn path_for(&mut self, clip: &ClipShape) -> &BezPath {
        if !matches!(&self.path, Some((cached, _)) if cached == clip) {
            self.path = None;
        }
        &self.path.get_or_insert_with(|| (*clip, clip.to_path())).1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
