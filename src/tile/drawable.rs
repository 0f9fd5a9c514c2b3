use kurbo::Affine;

use crate::{
    foundation::core::{FrameTime, IntRect, Rgba8},
    render::{
        bitmap::{Bitmap, ColorFilter, TilePaint},
        surface::{Brush, Surface},
    },
};

/// Something that can run a frame animation.
pub trait Animatable {
    /// Begin (or restart) the animation on the next draw.
    fn start(&mut self);
    /// Freeze on the current frame.
    fn stop(&mut self);
    /// `true` between `start` and `stop`/completion.
    fn is_running(&self) -> bool;
}

/// Capability set the host needs from anything it draws: tiles and placeholders alike.
pub trait Drawable {
    /// Natural size in pixels, if the drawable has one.
    fn intrinsic_size(&self) -> Option<(u32, u32)> {
        None
    }

    /// Current bounds.
    fn bounds(&self) -> IntRect;

    /// Layout moved or resized the drawable.
    fn set_bounds(&mut self, bounds: IntRect);

    /// Draw into `surface`. Returns `true` when another frame is wanted.
    fn draw(&mut self, surface: &mut dyn Surface, now: FrameTime) -> bool;

    /// Global alpha, 0-255.
    fn set_alpha(&mut self, alpha: u8);

    /// Colour filter applied to everything drawn; `None` clears it.
    fn set_color_filter(&mut self, filter: Option<ColorFilter>);

    /// Frame-animation controls, for drawables that have them.
    fn as_animatable(&mut self) -> Option<&mut dyn Animatable> {
        None
    }
}

/// Solid colour filling its bounds.
#[derive(Clone, Debug)]
pub struct ColorDrawable {
    color: Rgba8,
    bounds: IntRect,
    alpha: u8,
    filter: Option<ColorFilter>,
}

impl ColorDrawable {
    /// Drawable painting `color`.
    pub fn new(color: Rgba8) -> Self {
        Self {
            color,
            bounds: IntRect::default(),
            alpha: 0xFF,
            filter: None,
        }
    }

    /// Colour after the filter, before alpha.
    pub fn effective_color(&self) -> Rgba8 {
        self.filter
            .map(|f| f.apply_straight(self.color))
            .unwrap_or(self.color)
    }
}

impl Drawable for ColorDrawable {
    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }

    fn draw(&mut self, surface: &mut dyn Surface, _now: FrameTime) -> bool {
        if !self.bounds.is_empty() {
            surface.fill_rect(
                self.bounds.to_rect(),
                Brush::Solid(self.effective_color()),
                self.alpha,
            );
        }
        false
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.filter = filter;
    }
}

/// Unshaped bitmap stretched over its bounds.
#[derive(Clone, Debug)]
pub struct BitmapDrawable {
    paint: TilePaint,
    bounds: IntRect,
}

impl BitmapDrawable {
    /// Drawable showing `bitmap`.
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            paint: TilePaint::new(bitmap),
            bounds: IntRect::default(),
        }
    }

    fn bitmap_to_bounds(&self) -> Affine {
        let src = self.paint.shader().sampled();
        let sx = f64::from(self.bounds.width()) / f64::from(src.width().max(1));
        let sy = f64::from(self.bounds.height()) / f64::from(src.height().max(1));
        Affine::translate((f64::from(self.bounds.left), f64::from(self.bounds.top)))
            * Affine::scale_non_uniform(sx, sy)
    }
}

impl Drawable for BitmapDrawable {
    fn intrinsic_size(&self) -> Option<(u32, u32)> {
        let b = self.paint.shader().source();
        Some((b.width(), b.height()))
    }

    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }

    fn draw(&mut self, surface: &mut dyn Surface, _now: FrameTime) -> bool {
        if self.bounds.is_empty() {
            return false;
        }
        let brush = Brush::Bitmap {
            bitmap: self.paint.shader().sampled(),
            transform: self.bitmap_to_bounds(),
        };
        surface.fill_rect(self.bounds.to_rect(), brush, self.paint.alpha);
        false
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.paint.alpha = alpha;
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.paint.set_color_filter(filter);
    }
}

/// One frame of a [`FrameAnimationDrawable`].
pub struct AnimationFrame {
    /// What to show.
    pub drawable: Box<dyn Drawable>,
    /// How long to show it.
    pub duration_ms: u64,
}

/// Flip-book of drawables, e.g. a spinner used as a loading placeholder.
pub struct FrameAnimationDrawable {
    frames: Vec<AnimationFrame>,
    one_shot: bool,
    running: bool,
    started_at: Option<FrameTime>,
    current: usize,
    bounds: IntRect,
}

impl FrameAnimationDrawable {
    /// Animation over `frames`; loops unless `one_shot`.
    pub fn new(frames: Vec<AnimationFrame>, one_shot: bool) -> Self {
        Self {
            frames,
            one_shot,
            running: false,
            started_at: None,
            current: 0,
            bounds: IntRect::default(),
        }
    }

    /// Index of the frame shown by the most recent draw.
    pub fn current_frame(&self) -> usize {
        self.current
    }

    fn total_ms(&self) -> u64 {
        self.frames
            .iter()
            .fold(0u64, |acc, f| acc.saturating_add(f.duration_ms))
    }

    fn frame_at(&self, elapsed: u64) -> (usize, bool) {
        let total = self.total_ms();
        let last = self.frames.len().saturating_sub(1);
        if total == 0 {
            return (last, self.one_shot);
        }
        if self.one_shot && elapsed >= total {
            return (last, true);
        }
        let mut t = elapsed % total;
        for (i, f) in self.frames.iter().enumerate() {
            if t < f.duration_ms {
                return (i, false);
            }
            t -= f.duration_ms;
        }
        (last, false)
    }
}

impl Animatable for FrameAnimationDrawable {
    fn start(&mut self) {
        self.running = true;
        self.started_at = None;
        self.current = 0;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

impl Drawable for FrameAnimationDrawable {
    fn intrinsic_size(&self) -> Option<(u32, u32)> {
        self.frames.first().and_then(|f| f.drawable.intrinsic_size())
    }

    fn bounds(&self) -> IntRect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
        for f in &mut self.frames {
            f.drawable.set_bounds(bounds);
        }
    }

    fn draw(&mut self, surface: &mut dyn Surface, now: FrameTime) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        if self.running {
            let started = *self.started_at.get_or_insert(now);
            let (index, finished) = self.frame_at(now.millis_since(started));
            self.current = index;
            if finished {
                self.running = false;
            }
        }
        let current = self.current.min(self.frames.len() - 1);
        if let Some(frame) = self.frames.get_mut(current) {
            frame.drawable.draw(surface, now);
        }
        self.running
    }

    fn set_alpha(&mut self, alpha: u8) {
        for f in &mut self.frames {
            f.drawable.set_alpha(alpha);
        }
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        for f in &mut self.frames {
            f.drawable.set_color_filter(filter);
        }
    }

    fn as_animatable(&mut self) -> Option<&mut dyn Animatable> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tile/drawable.rs"]
mod tests;
