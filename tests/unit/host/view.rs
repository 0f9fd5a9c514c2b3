use std::{cell::Cell, rc::Rc};

use super::*;
use crate::{
    foundation::core::{Provenance, Rgba8},
    host::resources::{ColorRef, DrawableResource, ResourceTable},
    render::{bitmap::ColorFilter, recording::RecordingSurface},
    tile::drawable::{Animatable, ColorDrawable},
};

/// Animatable stand-in sharing its running flag with the test.
struct Spinner {
    running: Rc<Cell<bool>>,
    bounds: IntRect,
}

impl Animatable for Spinner {
    fn start(&mut self) {
        self.running.set(true);
    }
    fn stop(&mut self) {
        self.running.set(false);
    }
    fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drawable for Spinner {
    fn bounds(&self) -> IntRect {
        self.bounds
    }
    fn set_bounds(&mut self, bounds: IntRect) {
        self.bounds = bounds;
    }
    fn draw(&mut self, _surface: &mut dyn Surface, _now: FrameTime) -> bool {
        self.running.get()
    }
    fn set_alpha(&mut self, _alpha: u8) {}
    fn set_color_filter(&mut self, _filter: Option<ColorFilter>) {}
    fn as_animatable(&mut self) -> Option<&mut dyn Animatable> {
        Some(self)
    }
}

fn network_request(w: u32, h: u32) -> BindRequest {
    BindRequest::new(
        Bitmap::solid(w, h, Rgba8::WHITE).unwrap(),
        TileOptions {
            provenance: Provenance::Network,
            ..TileOptions::default()
        },
    )
}

#[test]
fn non_zero_resource_id_wins() {
    let d: Box<dyn Drawable> = Box::new(ColorDrawable::new(Rgba8::WHITE));
    assert!(matches!(
        PlaceholderSource::from_parts(5, Some(d)),
        PlaceholderSource::Resource(5)
    ));
    let d: Box<dyn Drawable> = Box::new(ColorDrawable::new(Rgba8::WHITE));
    assert!(matches!(
        PlaceholderSource::from_parts(0, Some(d)),
        PlaceholderSource::Drawable(_)
    ));
    assert!(matches!(
        PlaceholderSource::from_parts(0, None),
        PlaceholderSource::None
    ));
}

#[test]
fn placeholder_animation_runs_until_bitmap_arrives() {
    let running = Rc::new(Cell::new(false));
    let mut view = HostView::default();
    set_placeholder(
        &mut view,
        PlaceholderSource::Drawable(Box::new(Spinner {
            running: running.clone(),
            bounds: IntRect::default(),
        })),
    );
    assert!(running.get());
    assert!(view.has_content());
    assert!(view.tile().is_none());

    set_bitmap(&mut view, network_request(10, 10), FrameTime(0)).unwrap();
    assert!(!running.get());
    assert!(view.tile().is_some_and(MediaTile::has_placeholder));
}

#[test]
fn missing_image_leaves_view_untouched() {
    let mut view = HostView::default();
    set_placeholder(
        &mut view,
        PlaceholderSource::Drawable(Box::new(ColorDrawable::new(Rgba8::WHITE))),
    );
    let err = set_bitmap(
        &mut view,
        BindRequest {
            image: None,
            options: TileOptions::default(),
        },
        FrameTime(0),
    )
    .unwrap_err();
    assert!(matches!(err, TileError::InvalidArgument(_)));
    assert!(view.has_content());
    assert!(view.tile().is_none());
    assert!(view.background().is_none());
}

#[test]
fn unresolvable_placeholder_resource_clears_view() {
    let mut view = HostView::default();
    set_placeholder(
        &mut view,
        PlaceholderSource::Drawable(Box::new(ColorDrawable::new(Rgba8::WHITE))),
    );
    set_placeholder(&mut view, PlaceholderSource::Resource(42));
    assert!(!view.has_content());
}

#[test]
fn resource_placeholder_takes_view_bounds() {
    let mut table = ResourceTable::new();
    table.insert_drawable(9, DrawableResource::Color(Rgba8::opaque(9, 9, 9)));
    let mut view = HostView::new(Box::new(table));
    view.set_bounds(IntRect::from_size(30, 30));
    set_placeholder(&mut view, PlaceholderSource::Resource(9));

    let mut s = RecordingSurface::new(30, 30);
    view.draw(&mut s, FrameTime(0));
    assert_eq!(s.calls()[0].bounds, kurbo::Rect::new(0.0, 0.0, 30.0, 30.0));
}

#[test]
fn border_colour_resolves_through_view_resources() {
    let mut table = ResourceTable::new();
    table.insert_color(3, Rgba8::opaque(1, 2, 3));
    let mut view = HostView::new(Box::new(table));

    let mut req = network_request(10, 10);
    req.options.border.color = ColorRef(3);
    set_bitmap(&mut view, req, FrameTime(0)).unwrap();
    assert_eq!(
        view.background().map(BorderBackground::color),
        Some(Rgba8::opaque(1, 2, 3))
    );

    let mut req = network_request(10, 10);
    req.options.border.color = ColorRef(0xFF00_00FF);
    set_bitmap(&mut view, req, FrameTime(0)).unwrap();
    assert_eq!(
        view.background().map(BorderBackground::color),
        Some(Rgba8::opaque(0, 0, 255))
    );
}

#[test]
fn rebinding_makes_previous_tile_the_placeholder() {
    let mut view = HostView::default();
    view.set_bounds(IntRect::from_size(40, 40));
    set_bitmap(&mut view, network_request(40, 40), FrameTime(0)).unwrap();
    set_bitmap(&mut view, network_request(40, 40), FrameTime(500)).unwrap();

    let mut s = RecordingSurface::new(40, 40);
    assert!(view.draw(&mut s, FrameTime(600)));
    // Old tile (settled, one fill) under the new tile's half-faded fill.
    assert_eq!(s.bitmap_calls().count(), 2);
    assert_eq!(view.tile().map(MediaTile::bounds), Some(IntRect::from_size(40, 40)));
}

#[test]
fn state_changes_request_repaint_only_when_fill_flips() {
    let mut view = HostView::default();
    view.set_bounds(IntRect::from_size(20, 20));
    assert!(!view.set_state(InteractionState::PRESSED));
    set_bitmap(&mut view, network_request(20, 20), FrameTime(0)).unwrap();
    assert!(view.background().is_some_and(BorderBackground::is_filled));
    assert!(view.set_state(InteractionState::IDLE));
    assert!(!view.set_state(InteractionState::IDLE));
}
