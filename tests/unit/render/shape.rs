use super::*;
use crate::{
    foundation::core::{IntRect, Rgba8},
    geometry::shape::{CornerRadius, ShapeMode, compute_clip},
    render::{
        bitmap::Bitmap,
        recording::{RecordedBrush, RecordingSurface},
    },
    tile::drawable::ColorDrawable,
};

fn paint() -> TilePaint {
    TilePaint::new(Bitmap::solid(40, 40, Rgba8::opaque(10, 20, 30)).unwrap())
}

fn circle(size: i32) -> ClipGeometry {
    compute_clip(
        IntRect::from_size(size, size),
        ShapeMode::Circle,
        CornerRadius::Auto,
    )
}

fn animating(progress: f64) -> FadePhase {
    FadePhase::Animating {
        sample: FadeSample {
            progress,
            completed: false,
        },
    }
}

#[test]
fn settled_draws_bitmap_once_at_full_alpha() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    let mut s = RecordingSurface::new(40, 40);

    let more = r.draw(
        &mut s,
        &mut p,
        &circle(40),
        Point::ORIGIN,
        FadePhase::Settled,
        None,
        FrameTime(0),
    );
    assert!(!more);
    assert_eq!(s.calls().len(), 1);
    let call = &s.calls()[0];
    assert_eq!(call.alpha, 255);
    assert_eq!(
        call.brush,
        RecordedBrush::Bitmap {
            id: p.shader().sampled().id(),
            transform: Affine::IDENTITY,
        }
    );
    let b = call.bounds;
    assert!((b.x0 - 0.0).abs() < 0.5 && (b.x1 - 40.0).abs() < 0.5);
}

#[test]
fn animating_draws_placeholder_under_partial_bitmap() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    p.alpha = 200;
    let mut placeholder = ColorDrawable::new(Rgba8::opaque(255, 0, 0));
    placeholder.set_bounds(IntRect::from_size(40, 40));
    let mut s = RecordingSurface::new(40, 40);

    let more = r.draw(
        &mut s,
        &mut p,
        &circle(40),
        Point::ORIGIN,
        animating(0.5),
        Some(&mut placeholder),
        FrameTime(100),
    );
    assert!(more);
    assert_eq!(s.calls().len(), 2);
    assert_eq!(
        s.calls()[0].brush,
        RecordedBrush::Solid(Rgba8::opaque(255, 0, 0))
    );
    assert_eq!(s.calls()[1].alpha, 100);
    assert_eq!(p.alpha, 200, "base alpha is restored after the fade draw");
}

#[test]
fn animating_without_placeholder_still_fades_bitmap() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    let mut s = RecordingSurface::new(40, 40);
    r.draw(
        &mut s,
        &mut p,
        &circle(40),
        Point::ORIGIN,
        animating(0.25),
        None,
        FrameTime(50),
    );
    assert_eq!(s.calls().len(), 1);
    assert_eq!(s.calls()[0].alpha, 64);
}

#[test]
fn zero_progress_skips_the_bitmap_fill() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    let mut placeholder = ColorDrawable::new(Rgba8::WHITE);
    placeholder.set_bounds(IntRect::from_size(40, 40));
    let mut s = RecordingSurface::new(40, 40);
    r.draw(
        &mut s,
        &mut p,
        &circle(40),
        Point::ORIGIN,
        animating(0.0),
        Some(&mut placeholder),
        FrameTime(0),
    );
    assert_eq!(s.calls().len(), 1);
    assert_eq!(s.bitmap_calls().count(), 0);
}

#[test]
fn degenerate_clip_draws_nothing() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    let mut s = RecordingSurface::new(40, 40);
    r.draw(
        &mut s,
        &mut p,
        &circle(0),
        Point::ORIGIN,
        FadePhase::Settled,
        None,
        FrameTime(0),
    );
    assert!(s.calls().is_empty());
}

#[test]
fn bitmap_is_anchored_at_origin() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    let mut s = RecordingSurface::new(80, 80);
    let geometry = compute_clip(
        IntRect::new(10, 20, 50, 60),
        ShapeMode::RoundedRect,
        CornerRadius::Fixed(4.0),
    );
    r.draw(
        &mut s,
        &mut p,
        &geometry,
        Point::new(10.0, 20.0),
        FadePhase::Settled,
        None,
        FrameTime(0),
    );
    let RecordedBrush::Bitmap { transform, .. } = s.calls()[0].brush else {
        panic!("expected bitmap brush");
    };
    assert_eq!(transform, Affine::translate((10.0, 20.0)));
}

#[test]
fn path_is_rebuilt_only_when_the_clip_changes() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    let mut s = RecordingSurface::new(40, 40);
    let small = circle(20);
    let large = circle(40);

    for geometry in [&small, &small, &large] {
        r.draw(
            &mut s,
            &mut p,
            geometry,
            Point::ORIGIN,
            FadePhase::Settled,
            None,
            FrameTime(0),
        );
    }
    let calls = s.calls();
    assert_eq!(calls[0].path, calls[1].path);
    assert_ne!(calls[1].path, calls[2].path);
    assert_eq!(r.path.as_ref().map(|(c, _)| *c), Some(large.clip));
}

#[test]
fn fade_alpha_comes_from_the_animator_sample() {
    let mut r = ShapeRenderer::default();
    let mut p = paint();
    p.alpha = 180;
    let mut s = RecordingSurface::new(40, 40);
    let sample = FadeSample {
        progress: 0.3,
        completed: false,
    };
    let more = r.draw(
        &mut s,
        &mut p,
        &circle(40),
        Point::ORIGIN,
        FadePhase::Animating { sample },
        None,
        FrameTime(60),
    );
    assert!(more);
    assert_eq!(s.calls()[0].alpha, sample.partial_alpha(180));
    assert_eq!(s.calls()[0].alpha, 54);
}
