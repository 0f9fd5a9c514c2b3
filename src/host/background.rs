use kurbo::{Circle, RoundedRect, Shape as _};

use crate::{
    foundation::core::{BezPath, FrameTime, IntRect, Rgba8},
    geometry::shape::CornerRadius,
    render::{
        bitmap::ColorFilter,
        surface::{Brush, Surface},
    },
    tile::drawable::Drawable,
};

const PATH_TOLERANCE: f64 = 0.1;

/// Interaction flags the host reports for the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InteractionState {
    /// Pointer is down on the view.
    pub pressed: bool,
    /// View has input focus.
    pub focused: bool,
}

impl InteractionState {
    /// Neither pressed nor focused.
    pub const IDLE: InteractionState = InteractionState {
        pressed: false,
        focused: false,
    };
    /// Pressed only.
    pub const PRESSED: InteractionState = InteractionState {
        pressed: true,
        focused: false,
    };
    /// Focused only.
    pub const FOCUSED: InteractionState = InteractionState {
        pressed: false,
        focused: true,
    };
}

/// Condition an entry of the state list matches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateMatcher {
    /// Matches while pressed.
    Pressed,
    /// Matches while focused.
    Focused,
    /// Matches every state.
    Any,
}

impl StateMatcher {
    fn matches(self, state: InteractionState) -> bool {
        match self {
            Self::Pressed => state.pressed,
            Self::Focused => state.focused,
            Self::Any => true,
        }
    }
}

/// Outline of the background fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackgroundShape {
    /// Circle of `diameter` centred in the bounds.
    Oval {
        /// Circle diameter in pixels.
        diameter: f64,
    },
    /// Rectangle over the bounds with uniform corner radii.
    RoundRect {
        /// Corner radius in pixels.
        radius: f64,
    },
}

/// State-list background drawn behind a tile; shows the border colour while pressed or focused.
#[derive(Clone, Debug)]
pub struct BorderBackground {
    entries: Vec<(StateMatcher, bool)>,
    shape: BackgroundShape,
    color: Rgba8,
    bounds: IntRect,
    state: InteractionState,
    alpha: u8,
    filter: Option<ColorFilter>,
}

impl BorderBackground {
    /// Background for a tile whose bitmap is `bitmap_size`. Fixed corner radii give a rounded
    /// rect, anything else an oval sized to the bitmap's shorter side until bounds arrive.
    pub fn new(corner: CornerRadius, color: Rgba8, bitmap_size: (u32, u32)) -> Self {
        let shape = match corner {
            CornerRadius::Fixed(radius) => BackgroundShape::RoundRect { radius },
            CornerRadius::Auto => BackgroundShape::Oval {
                diameter: f64::from(bitmap_size.0.min(bitmap_size.1)),
            },
        };
        Self {
            entries: vec![
                (StateMatcher::Pressed, true),
                (StateMatcher::Focused, true),
                (StateMatcher::Any, false),
            ],
            shape,
            color,
            bounds: IntRect::default(),
            state: InteractionState::IDLE,
            alpha: 0xFF,
            filter: None,
        }
    }

    /// Current outline.
    pub fn shape(&self) -> BackgroundShape {
        self.shape
    }

    /// Fill colour before filter and alpha.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Current interaction state.
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Update the interaction state; returns `true` when the visible fill changed.
    pub fn set_state(&mut self, state: InteractionState) -> bool {
        let before = self.is_filled();
        self.state = state;
        before != self.is_filled()
    }

    /// First matching entry decides whether the shape is filled.
    pub fn is_filled(&self) -> bool {
        self.entries
            .iter()
            .find(|(m, _)| m.matches(self.state))
            .is_some_and(|(_, filled)| *filled)
    }

    fn path(&self) -> BezPath {
        let rect = self.bounds.to_rect();
        match self.shape {
            BackgroundShape::Oval { diameter } => {
                Circle::new(rect.center(), (diameter / 2.0).max(0.0)).to_path(PATH_TOLERANCE)
            }
            BackgroundShape::RoundRect { radius } => {
                RoundedRect::from_rect(rect, radius.max(0.0)).to_path(PATH_TOLERANCE)
            }
        }
    }
}

impl Drawable for BorderBackground {
    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
        if let BackgroundShape::Oval { diameter } = &mut self.shape
            && !bounds.is_empty()
        {
            *diameter = f64::from(bounds.width().min(bounds.height()));
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface, _now: FrameTime) -> bool {
        if !self.is_filled() || self.bounds.is_empty() {
            return false;
        }
        let color = self
            .filter
            .map(|f| f.apply_straight(self.color))
            .unwrap_or(self.color);
        surface.fill_path(&self.path(), Brush::Solid(color), self.alpha);
        false
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.filter = filter;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/background.rs"]
mod tests;
