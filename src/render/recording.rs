use kurbo::{Affine, Shape as _};

use crate::{
    foundation::core::{BezPath, Rect, Rgba8},
    render::{
        bitmap::BitmapId,
        surface::{Brush, Surface},
    },
};

/// Brush of a recorded fill, without borrowing the bitmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedBrush {
    /// Flat colour.
    Solid(Rgba8),
    /// Bitmap fill.
    Bitmap {
        /// Which bitmap was sampled.
        id: BitmapId,
        /// Bitmap-to-surface transform.
        transform: Affine,
    },
}

/// One recorded fill.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    /// Paint source.
    pub brush: RecordedBrush,
    /// Alpha the fill was issued with.
    pub alpha: u8,
    /// Bounding box of the filled path.
    pub bounds: Rect,
    /// The filled path.
    pub path: BezPath,
}

/// Surface that records fills instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Empty recording of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Every fill issued so far, in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Fills that sampled a bitmap.
    pub fn bitmap_calls(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c.brush, RecordedBrush::Bitmap { .. }))
    }

    /// Forget recorded calls, e.g. between frames.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_path(&mut self, path: &BezPath, brush: Brush<'_>, alpha: u8) {
        let brush = match brush {
            Brush::Solid(c) => RecordedBrush::Solid(c),
            Brush::Bitmap { bitmap, transform } => RecordedBrush::Bitmap {
                id: bitmap.id(),
                transform,
            },
        };
        self.calls.push(DrawCall {
            brush,
            alpha,
            bounds: path.bounding_box(),
            path: path.clone(),
        });
    }
}
