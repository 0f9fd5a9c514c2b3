use crate::{
    foundation::core::{BezPath, Provenance, Rgba8},
    render::surface::{Brush, Surface},
};

const OUTER_LEG_DP: f32 = 16.0;
const INNER_LEG_DP: f32 = 15.0;

/// Indicator colour per provenance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DebugPalette {
    /// Colour for memory-cache hits.
    pub memory: Rgba8,
    /// Colour for local-storage hits.
    pub disk: Rgba8,
    /// Colour for network fetches.
    pub network: Rgba8,
}

impl Default for DebugPalette {
    fn default() -> Self {
        Self {
            memory: Rgba8::opaque(0x00, 0xFF, 0x00),
            disk: Rgba8::opaque(0x00, 0x00, 0xFF),
            network: Rgba8::opaque(0xFF, 0x00, 0x00),
        }
    }
}

impl DebugPalette {
    /// Colour for `provenance`.
    pub fn color_for(&self, provenance: Provenance) -> Rgba8 {
        match provenance {
            Provenance::Memory => self.memory,
            Provenance::Disk => self.disk,
            Provenance::Network => self.network,
        }
    }
}

/// Corner triangle showing where the bitmap came from.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugOverlayRenderer;

impl DebugOverlayRenderer {
    /// Draw the white outer triangle, then the provenance-coloured inner one, at the surface's
    /// top-left corner.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        provenance: Provenance,
        palette: &DebugPalette,
        density: f32,
    ) {
        let outer = triangle_path(leg_px(OUTER_LEG_DP, density));
        surface.fill_path(&outer, Brush::Solid(Rgba8::WHITE), 0xFF);

        let inner = triangle_path(leg_px(INNER_LEG_DP, density));
        surface.fill_path(&inner, Brush::Solid(palette.color_for(provenance)), 0xFF);
    }
}

/// Leg length in whole pixels: `dp * density`, truncated.
pub fn leg_px(dp: f32, density: f32) -> f64 {
    let px = dp * density;
    if !px.is_finite() || px <= 0.0 {
        return 0.0;
    }
    f64::from(px.trunc())
}

/// Right triangle with vertices `(0,0)`, `(leg,0)`, `(0,leg)`.
pub fn triangle_path(leg: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((leg, 0.0));
    path.line_to((0.0, leg));
    path.close_path();
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/debug.rs"]
mod tests;
