use std::{collections::HashMap, sync::Arc};

use kurbo::{Affine, Shape as _};

use crate::{
    foundation::{
        core::{BezPath, Rect, Rgba8},
        error::{TileError, TileResult},
        math::unpremul_u8,
    },
    render::bitmap::{Bitmap, BitmapId},
};

/// What a fill is painted with.
#[derive(Clone, Copy, Debug)]
pub enum Brush<'a> {
    /// Flat colour.
    Solid(Rgba8),
    /// Bitmap sampled with clamp-to-edge addressing; `transform` maps bitmap pixels to surface
    /// coordinates.
    Bitmap {
        /// Bitmap to sample.
        bitmap: &'a Bitmap,
        /// Bitmap-to-surface transform.
        transform: Affine,
    },
}

/// Drawing target handed to tiles by the host.
///
/// Implementations must tolerate zero-area paths and `alpha == 0`; both draw nothing.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill `path` with `brush`, scaled by `alpha` (0-255).
    fn fill_path(&mut self, path: &BezPath, brush: Brush<'_>, alpha: u8);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, brush: Brush<'_>, alpha: u8) {
        self.fill_path(&rect.to_path(0.1), brush, alpha);
    }
}

/// Premultiplied RGBA8 readback of a [`CpuSurface`].
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixel bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied (always `true` for the CPU surface).
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let d = self.data.get(i..i + 4)?;
        Some([d[0], d[1], d[2], d[3]])
    }

    /// Pixel bytes with alpha un-premultiplied, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            for c in &mut px[..3] {
                *c = unpremul_u8(*c, a);
            }
        }
        out
    }
}

/// Software surface rasterized by `vello_cpu`.
///
/// Draw calls are infallible; the first failure (an oversized bitmap, say) is kept and reported
/// by [`CpuSurface::finish`].
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    images: HashMap<BitmapId, vello_cpu::Image>,
    error: Option<TileError>,
}

impl CpuSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> TileResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| TileError::surface("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| TileError::surface("surface height exceeds u16"))?;
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            images: HashMap::new(),
            error: None,
        })
    }

    /// Paint the whole surface with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        let full = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.fill_rect(full, Brush::Solid(color), 0xFF);
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> TileResult<FrameRGBA> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn image_paint_for(&mut self, bitmap: &Bitmap) -> TileResult<vello_cpu::Image> {
        if let Some(paint) = self.images.get(&bitmap.id()) {
            return Ok(paint.clone());
        }
        let pixmap = bitmap_to_pixmap(bitmap)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                x_extend: vello_cpu::peniko::Extend::Pad,
                y_extend: vello_cpu::peniko::Extend::Pad,
                ..vello_cpu::peniko::ImageSampler::default()
            },
        };
        self.images.insert(bitmap.id(), paint.clone());
        Ok(paint)
    }

    fn record_error(&mut self, err: TileError) {
        tracing::warn!(error = %err, "cpu surface draw skipped");
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl Surface for CpuSurface {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn fill_path(&mut self, path: &BezPath, brush: Brush<'_>, alpha: u8) {
        let area = path.bounding_box();
        if alpha == 0 || area.width() <= 0.0 || area.height() <= 0.0 {
            return;
        }

        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match brush {
            Brush::Solid(c) => {
                self.ctx
                    .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.ctx
                    .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
            }
            Brush::Bitmap { bitmap, transform } => {
                if bitmap.width() == 0 || bitmap.height() == 0 {
                    return;
                }
                let paint = match self.image_paint_for(bitmap) {
                    Ok(p) => p,
                    Err(err) => {
                        self.record_error(err);
                        return;
                    }
                };
                self.ctx.set_paint_transform(affine_to_cpu(transform));
                self.ctx.set_paint(paint);
            }
        }

        let cpu_path = bezpath_to_cpu(path);
        if alpha < 0xFF {
            self.ctx.push_opacity_layer(f32::from(alpha) / 255.0);
        }
        self.ctx.fill_path(&cpu_path);
        if alpha < 0xFF {
            self.ctx.pop_layer();
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn bitmap_to_pixmap(bitmap: &Bitmap) -> TileResult<vello_cpu::Pixmap> {
    let w: u16 = bitmap
        .width()
        .try_into()
        .map_err(|_| TileError::surface("bitmap width exceeds u16"))?;
    let h: u16 = bitmap
        .height()
        .try_into()
        .map_err(|_| TileError::surface("bitmap height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(bitmap.width() as usize * bitmap.height() as usize);
    for px in bitmap.data().chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
