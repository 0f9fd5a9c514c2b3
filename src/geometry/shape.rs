use kurbo::{Circle, RoundedRect, Shape as _};

use crate::foundation::core::{BezPath, IntRect, Point, Rect};

const PATH_TOLERANCE: f64 = 0.1;

/// Clip applied to the bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeMode {
    /// Circle inscribed in the content rect.
    #[default]
    Circle,
    /// Rectangle spanning the content rect with uniformly rounded corners.
    RoundedRect,
}

/// Corner radius source for [`ShapeMode::RoundedRect`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRadius {
    /// Half the shorter content side, recomputed whenever the bounds change.
    #[default]
    Auto,
    /// Constant radius in pixels. Never clamped; oversized values give a fully rounded shape.
    Fixed(f64),
}

impl CornerRadius {
    /// Map the fetch pipeline's integer convention: negative means auto, `>= 0` is an override.
    pub fn from_raw(raw: i32) -> Self {
        if raw >= 0 {
            Self::Fixed(f64::from(raw))
        } else {
            Self::Auto
        }
    }

    /// The override value, if any.
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Fixed(r) => Some(r),
        }
    }
}

/// Resolved clip outline in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipShape {
    /// Circle centred on the content rect.
    Circle {
        /// Centre of the content rect.
        center: Point,
        /// Circle radius.
        radius: f64,
    },
    /// Rounded rectangle covering the full content rect.
    RoundedRect {
        /// The content rect.
        rect: Rect,
        /// Uniform corner radius.
        radius: f64,
    },
}

impl ClipShape {
    /// `true` when filling this shape cannot touch a pixel.
    pub fn is_degenerate(&self) -> bool {
        match *self {
            Self::Circle { radius, .. } => radius <= 0.0,
            Self::RoundedRect { rect, .. } => rect.width() <= 0.0 || rect.height() <= 0.0,
        }
    }

    /// Flattened outline suitable for a fill.
    pub fn to_path(&self) -> BezPath {
        match *self {
            Self::Circle { center, radius } => {
                Circle::new(center, radius.max(0.0)).to_path(PATH_TOLERANCE)
            }
            Self::RoundedRect { rect, radius } => {
                RoundedRect::from_rect(rect, radius.max(0.0)).to_path(PATH_TOLERANCE)
            }
        }
    }
}

/// Output of a geometry computation for one set of bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipGeometry {
    /// Bounds minus the border inset.
    pub content: IntRect,
    /// Radius in effect (circle radius or corner radius).
    pub radius: f64,
    /// Outline to fill with the bitmap shader.
    pub clip: ClipShape,
}

/// Content rect left after insetting `bounds` by `border_size` on every edge.
pub fn content_rect(bounds: IntRect, border_size: u32) -> IntRect {
    if border_size == 0 {
        return bounds;
    }
    bounds.inset(i32::try_from(border_size).unwrap_or(i32::MAX / 2))
}

/// Radius for the given content size and shape mode.
pub fn compute_radius(
    content_width: u32,
    content_height: u32,
    mode: ShapeMode,
    corner: CornerRadius,
) -> f64 {
    let auto = f64::from(content_width.min(content_height)) / 2.0;
    match (mode, corner) {
        (ShapeMode::RoundedRect, CornerRadius::Fixed(r)) => r,
        _ => auto,
    }
}

/// Pure geometry step: clip outline and radius for a content rect.
pub fn compute_clip(content: IntRect, mode: ShapeMode, corner: CornerRadius) -> ClipGeometry {
    let w = content.width() as u32;
    let h = content.height() as u32;
    let radius = compute_radius(w, h, mode, corner);
    let rect = content.to_rect();
    let clip = match mode {
        ShapeMode::Circle => ClipShape::Circle {
            center: rect.center(),
            radius,
        },
        ShapeMode::RoundedRect => ClipShape::RoundedRect { rect, radius },
    };
    ClipGeometry {
        content,
        radius,
        clip,
    }
}

/// Memoizes [`compute_clip`] between bounds changes.
#[derive(Clone, Debug, Default)]
pub struct GeometryCache {
    cached: Option<ClipGeometry>,
}

impl GeometryCache {
    /// Forget the cached geometry; the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// `true` when the next [`Self::get_or_compute`] will recompute.
    pub fn is_stale(&self) -> bool {
        self.cached.is_none()
    }

    /// Cached geometry, computing it first when stale.
    pub fn get_or_compute(
        &mut self,
        content: IntRect,
        mode: ShapeMode,
        corner: CornerRadius,
    ) -> ClipGeometry {
        *self
            .cached
            .get_or_insert_with(|| compute_clip(content, mode, corner))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
