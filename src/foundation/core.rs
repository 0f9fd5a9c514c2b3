pub use kurbo::{BezPath, Point, Rect};

/// Millisecond timestamp on the host's monotonic clock.
///
/// Only differences between two values are meaningful; the epoch is whatever the host picked
/// (process start, boot time, a test's fake clock).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameTime(pub u64);

impl FrameTime {
    /// Milliseconds elapsed since `earlier`, saturating at zero when the clock went backwards.
    pub fn millis_since(self, earlier: FrameTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This timestamp advanced by `ms` milliseconds.
    pub fn plus_millis(self, ms: u64) -> FrameTime {
        FrameTime(self.0.saturating_add(ms))
    }
}

/// Where the fetch pipeline obtained the bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// In-process memory cache.
    Memory,
    /// Local storage.
    Disk,
    /// Remote fetch.
    Network,
}

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    /// Build a colour from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from red, green and blue.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Decode a packed `0xAARRGGBB` value.
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack as `0xAARRGGBB`.
    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn to_premul(self) -> [u8; 4] {
        let premul = |c: u8| crate::foundation::math::mul_div255_u8(u16::from(c), u16::from(self.a));
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

/// Integer pixel rectangle in host view coordinates (`right`/`bottom` exclusive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IntRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl IntRect {
    /// Build a rectangle from its four edges.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at the origin.
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width, never negative.
    pub fn width(self) -> i32 {
        self.right.saturating_sub(self.left).max(0)
    }

    /// Height, never negative.
    pub fn height(self) -> i32 {
        self.bottom.saturating_sub(self.top).max(0)
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Shrink every edge by `by` pixels.
    ///
    /// When the insets cross, the far edge collapses onto the near one and the result is empty.
    pub fn inset(self, by: i32) -> IntRect {
        let left = self.left.saturating_add(by);
        let top = self.top.saturating_add(by);
        IntRect {
            left,
            top,
            right: self.right.saturating_sub(by).max(left),
            bottom: self.bottom.saturating_sub(by).max(top),
        }
    }

    /// The same rectangle in floating-point coordinates.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.left.saturating_add(self.width())),
            f64::from(self.top.saturating_add(self.height())),
        )
    }
}

/// [`FrameTime`] source backed by [`std::time::Instant`], with its epoch at construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    epoch: std::time::Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Clock reading zero now.
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }

    /// Milliseconds since construction.
    pub fn now(&self) -> FrameTime {
        let ms = self.epoch.elapsed().as_millis();
        FrameTime(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
