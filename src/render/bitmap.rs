use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::foundation::{
    core::Rgba8,
    error::{TileError, TileResult},
    math::{mul_div255_u8, unpremul_u8},
};

static NEXT_BITMAP_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a bitmap's pixel buffer. Clones share it; filtered copies get a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitmapId(pub u64);

impl BitmapId {
    fn next() -> Self {
        Self(NEXT_BITMAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Decoded raster, premultiplied RGBA8, row-major, no padding.
#[derive(Clone, Debug)]
pub struct Bitmap {
    id: BitmapId,
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> TileResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| TileError::invalid_argument("bitmap dimensions overflow"))?;
        if data.len() != expected {
            return Err(TileError::invalid_argument(format!(
                "bitmap byte length {} does not match {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            id: BitmapId::next(),
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// Premultiply and wrap straight-alpha RGBA8 pixels.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> TileResult<Self> {
        for px in data.chunks_exact_mut(4) {
            let premul = Rgba8::new(px[0], px[1], px[2], px[3]).to_premul();
            px.copy_from_slice(&premul);
        }
        Self::from_premul_rgba8(width, height, data)
    }

    /// Single-colour bitmap.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> TileResult<Self> {
        let px = color.to_premul();
        let data = px.repeat(width as usize * height as usize);
        Self::from_premul_rgba8(width, height, data)
    }

    /// Buffer identity.
    pub fn id(&self) -> BitmapId {
        self.id
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let d = &self.rgba8_premul[i..i + 4];
        Some([d[0], d[1], d[2], d[3]])
    }

    /// Copy with `filter` applied to every pixel.
    pub fn filtered(&self, filter: &ColorFilter) -> Bitmap {
        let data = self
            .rgba8_premul
            .chunks_exact(4)
            .flat_map(|px| filter.apply_premul([px[0], px[1], px[2], px[3]]))
            .collect();
        Bitmap {
            id: BitmapId::next(),
            width: self.width,
            height: self.height,
            rgba8_premul: Arc::new(data),
        }
    }
}

impl From<&image::RgbaImage> for Bitmap {
    fn from(img: &image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.as_raw().clone();
        for px in data.chunks_exact_mut(4) {
            let premul = Rgba8::new(px[0], px[1], px[2], px[3]).to_premul();
            px.copy_from_slice(&premul);
        }
        Bitmap {
            id: BitmapId::next(),
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }
}

/// 4x5 row-major colour matrix over straight RGBA; the fifth column is an offset in 0-255 units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// Matrix that leaves colours unchanged.
    pub const IDENTITY: ColorMatrix = ColorMatrix([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0, //
    ]);

    /// Saturation adjustment; `0` is greyscale, `1` is identity.
    pub fn saturation(s: f32) -> Self {
        let inv = 1.0 - s;
        let r = 0.213 * inv;
        let g = 0.715 * inv;
        let b = 0.072 * inv;
        ColorMatrix([
            r + s, g, b, 0.0, 0.0, //
            r, g + s, b, 0.0, 0.0, //
            r, g, b + s, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0, //
        ])
    }

    fn apply(&self, c: [f32; 4]) -> [f32; 4] {
        let m = &self.0;
        let mut out = [0.0f32; 4];
        for (row, o) in out.iter_mut().enumerate() {
            let k = row * 5;
            *o = m[k] * c[0] + m[k + 1] * c[1] + m[k + 2] * c[2] + m[k + 3] * c[3] + m[k + 4];
        }
        out
    }
}

/// Per-pixel colour transform applied to everything a drawable paints.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilter {
    /// Channel-wise multiply by a colour (alpha included).
    Modulate(Rgba8),
    /// Colour matrix over straight RGBA.
    Matrix(ColorMatrix),
}

impl ColorFilter {
    /// Filter a premultiplied pixel.
    pub fn apply_premul(&self, px: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Modulate(c) => {
                let m = c.to_premul();
                [
                    mul_div255_u8(u16::from(px[0]), u16::from(m[0])),
                    mul_div255_u8(u16::from(px[1]), u16::from(m[1])),
                    mul_div255_u8(u16::from(px[2]), u16::from(m[2])),
                    mul_div255_u8(u16::from(px[3]), u16::from(m[3])),
                ]
            }
            Self::Matrix(matrix) => {
                let a = px[3];
                let straight = [
                    f32::from(unpremul_u8(px[0], a)),
                    f32::from(unpremul_u8(px[1], a)),
                    f32::from(unpremul_u8(px[2], a)),
                    f32::from(a),
                ];
                let [r, g, b, a] = matrix.apply(straight).map(|v| v.round().clamp(0.0, 255.0) as u8);
                Rgba8::new(r, g, b, a).to_premul()
            }
        }
    }

    /// Filter a straight colour.
    pub fn apply_straight(&self, c: Rgba8) -> Rgba8 {
        let [r, g, b, a] = self.apply_premul(c.to_premul());
        Rgba8::new(
            unpremul_u8(r, a),
            unpremul_u8(g, a),
            unpremul_u8(b, a),
            a,
        )
    }
}

/// Samples a bitmap with clamp-to-edge addressing on both axes.
///
/// Holds the source and, when a colour filter is active, a filtered copy that is what actually
/// gets sampled.
#[derive(Clone, Debug)]
pub struct BitmapShader {
    source: Bitmap,
    filtered: Option<Bitmap>,
}

impl BitmapShader {
    /// Shader over `source`.
    pub fn new(source: Bitmap) -> Self {
        Self {
            source,
            filtered: None,
        }
    }

    /// The unfiltered bitmap.
    pub fn source(&self) -> &Bitmap {
        &self.source
    }

    /// The bitmap that is sampled at draw time.
    pub fn sampled(&self) -> &Bitmap {
        self.filtered.as_ref().unwrap_or(&self.source)
    }

    fn set_filter(&mut self, filter: Option<&ColorFilter>) {
        self.filtered = filter.map(|f| self.source.filtered(f));
    }
}

/// Paint state for the tile's bitmap: shader, alpha and colour filter.
#[derive(Clone, Debug)]
pub struct TilePaint {
    shader: BitmapShader,
    /// Global alpha applied to the shape fill.
    pub alpha: u8,
    color_filter: Option<ColorFilter>,
}

impl TilePaint {
    /// Opaque paint sampling `bitmap`.
    pub fn new(bitmap: Bitmap) -> Self {
        Self {
            shader: BitmapShader::new(bitmap),
            alpha: 0xFF,
            color_filter: None,
        }
    }

    /// The shader.
    pub fn shader(&self) -> &BitmapShader {
        &self.shader
    }

    /// Current colour filter.
    pub fn color_filter(&self) -> Option<&ColorFilter> {
        self.color_filter.as_ref()
    }

    /// Replace the colour filter and rebuild the sampled bitmap.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        if self.color_filter == filter {
            return;
        }
        self.shader.set_filter(filter.as_ref());
        self.color_filter = filter;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/bitmap.rs"]
mod tests;
