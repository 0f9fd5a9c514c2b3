use super::*;
use crate::{
    foundation::core::{FrameTime, IntRect},
    render::recording::{RecordedBrush, RecordingSurface},
};

#[test]
fn table_resolves_registered_colour() {
    let mut table = ResourceTable::new();
    table.insert_color(0x7f06_0001, Rgba8::opaque(1, 2, 3));
    assert_eq!(
        resolve_color_or_literal(&table, ColorRef(0x7f06_0001)),
        Rgba8::opaque(1, 2, 3)
    );
}

#[test]
fn unknown_colour_falls_back_to_literal_argb() {
    let c = resolve_color_or_literal(&NoResources, ColorRef(0xFF10_2030));
    assert_eq!(c, Rgba8::opaque(0x10, 0x20, 0x30));
    assert_eq!(ColorRef::literal(c), ColorRef(0xFF10_2030));
}

#[test]
fn missing_resources_are_resolution_errors() {
    let table = ResourceTable::new();
    assert!(matches!(
        table.resolve_color(7),
        Err(TileError::ResourceResolution(_))
    ));
    assert!(matches!(
        table.resolve_drawable(7),
        Err(TileError::ResourceResolution(_))
    ));
}

#[test]
fn drawable_recipes_build_fresh_instances() {
    let mut table = ResourceTable::new();
    table.insert_drawable(
        1,
        DrawableResource::Frames {
            frames: vec![
                (DrawableResource::Color(Rgba8::WHITE), 50),
                (DrawableResource::Color(Rgba8::opaque(0, 0, 0)), 50),
            ],
            one_shot: false,
        },
    );

    let mut a = table.resolve_drawable(1).unwrap();
    let b = table.resolve_drawable(1).unwrap();
    assert!(a.as_animatable().is_some());

    a.set_bounds(IntRect::from_size(4, 4));
    assert_eq!(b.bounds(), IntRect::default());

    let mut s = RecordingSurface::new(4, 4);
    a.draw(&mut s, FrameTime(0));
    assert_eq!(s.calls()[0].brush, RecordedBrush::Solid(Rgba8::WHITE));
}
