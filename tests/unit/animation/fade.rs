use super::*;

#[test]
fn effective_fade_truth_table() {
    let none = FadeControl::default();
    let suppress = FadeControl {
        suppress: true,
        force: false,
    };
    let force = FadeControl {
        suppress: false,
        force: true,
    };
    let both = FadeControl {
        suppress: true,
        force: true,
    };

    assert!(!none.effective(Provenance::Memory));
    assert!(none.effective(Provenance::Disk));
    assert!(none.effective(Provenance::Network));
    assert!(force.effective(Provenance::Memory));
    assert!(both.effective(Provenance::Memory));
    for p in [Provenance::Memory, Provenance::Disk, Provenance::Network] {
        assert!(!suppress.effective(p));
    }
}

#[test]
fn bind_without_fade_is_done_immediately() {
    let mut a = FadeAnimator::for_bind(false, FrameTime(0), FADE_DURATION_MS);
    assert_eq!(a.state(), FadeState::Done);
    assert!(!a.needs_another_frame());
    let s = a.sample(FrameTime(0));
    assert_eq!(s.progress, 1.0);
    assert!(!s.completed);
    assert!(!a.needs_another_frame());
}

#[test]
fn progress_is_linear_and_clamped() {
    let mut a = FadeAnimator::for_bind(true, FrameTime(1_000), 200);
    assert_eq!(a.sample(FrameTime(1_000)).progress, 0.0);
    assert_eq!(a.sample(FrameTime(1_050)).progress, 0.25);
    assert_eq!(a.sample(FrameTime(1_100)).progress, 0.5);
    let done = a.sample(FrameTime(9_999));
    assert_eq!(done.progress, 1.0);
    assert!(done.completed);
}

#[test]
fn needs_another_frame_until_duration_elapses_then_never_again() {
    let mut a = FadeAnimator::for_bind(true, FrameTime(0), 200);
    for t in (0..200).step_by(7) {
        let s = a.sample(FrameTime(t));
        assert!(s.progress < 1.0);
        assert!(a.needs_another_frame(), "t={t}");
    }
    let s = a.sample(FrameTime(200));
    assert!(s.completed);
    assert!(!a.needs_another_frame());
    for t in [200, 201, 50, 10_000] {
        let s = a.sample(FrameTime(t));
        assert!(!s.completed);
        assert_eq!(s.progress, 1.0);
        assert!(!a.needs_another_frame());
    }
    assert_eq!(a.state(), FadeState::Done);
}

#[test]
fn completion_is_reported_exactly_once() {
    let mut a = FadeAnimator::for_bind(true, FrameTime(0), 200);
    let completions = [0u64, 120, 199, 200, 250, 400]
        .into_iter()
        .filter(|&t| a.sample(FrameTime(t)).completed)
        .count();
    assert_eq!(completions, 1);
}

#[test]
fn progress_is_monotonic_even_if_clock_steps_back() {
    let mut a = FadeAnimator::for_bind(true, FrameTime(100), 200);
    let p1 = a.sample(FrameTime(200)).progress;
    let p2 = a.sample(FrameTime(150)).progress;
    let p3 = a.sample(FrameTime(40)).progress;
    assert!(p2 >= p1);
    assert!(p3 >= p2);
}

#[test]
fn start_only_leaves_idle_once() {
    let mut a = FadeAnimator::new(200);
    assert_eq!(a.state(), FadeState::Idle);
    assert!(a.start(FrameTime(5)));
    assert!(!a.start(FrameTime(50)));
    assert_eq!(a.state(), FadeState::Animating { start: FrameTime(5) });
    a.skip();
    assert!(a.is_animating());
}

#[test]
fn zero_duration_completes_on_first_sample() {
    let mut a = FadeAnimator::for_bind(true, FrameTime(0), 0);
    assert!(a.sample(FrameTime(0)).completed);
    assert!(!a.needs_another_frame());
}

#[test]
fn partial_alpha_rounds_base_times_progress() {
    let half = FadeSample {
        progress: 0.5,
        completed: false,
    };
    assert_eq!(half.partial_alpha(255), 128);
    assert_eq!(half.partial_alpha(100), 50);
    let none = FadeSample {
        progress: 0.0,
        completed: false,
    };
    assert_eq!(none.partial_alpha(255), 0);
}
