use kurbo::PathEl;

use super::*;
use crate::render::recording::{RecordedBrush, RecordingSurface};

#[test]
fn default_palette_keys_one_colour_per_provenance() {
    let p = DebugPalette::default();
    let colours = [
        p.color_for(Provenance::Memory),
        p.color_for(Provenance::Disk),
        p.color_for(Provenance::Network),
    ];
    assert_ne!(colours[0], colours[1]);
    assert_ne!(colours[1], colours[2]);
    assert_ne!(colours[0], colours[2]);
}

#[test]
fn legs_scale_with_density_and_truncate() {
    assert_eq!(leg_px(16.0, 1.0), 16.0);
    assert_eq!(leg_px(16.0, 1.5), 24.0);
    assert_eq!(leg_px(15.0, 1.33), 19.0);
    assert_eq!(leg_px(15.0, 0.0), 0.0);
    assert_eq!(leg_px(15.0, f32::NAN), 0.0);
}

#[test]
fn triangle_vertices_are_anchored_top_left() {
    let path = triangle_path(10.0);
    let els: Vec<_> = path.elements().to_vec();
    assert_eq!(els[0], PathEl::MoveTo((0.0, 0.0).into()));
    assert_eq!(els[1], PathEl::LineTo((10.0, 0.0).into()));
    assert_eq!(els[2], PathEl::LineTo((0.0, 10.0).into()));
    assert_eq!(els[3], PathEl::ClosePath);
}

#[test]
fn overlay_draws_white_then_provenance_colour() {
    let mut s = RecordingSurface::new(64, 64);
    let palette = DebugPalette::default();
    DebugOverlayRenderer.draw(&mut s, Provenance::Disk, &palette, 2.0);

    let calls = s.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].brush, RecordedBrush::Solid(Rgba8::WHITE));
    assert_eq!(calls[0].bounds, kurbo::Rect::new(0.0, 0.0, 32.0, 32.0));
    assert_eq!(calls[1].brush, RecordedBrush::Solid(palette.disk));
    assert_eq!(calls[1].bounds, kurbo::Rect::new(0.0, 0.0, 30.0, 30.0));
}
