use crate::foundation::{
    core::{FrameTime, Provenance},
    math::scale_alpha,
};

/// Default cross-fade length.
pub const FADE_DURATION_MS: u64 = 200;

/// Caller overrides for the provenance-driven fade decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeControl {
    /// Never fade, whatever the provenance.
    pub suppress: bool,
    /// Always fade, even for memory hits. Wins over `suppress`.
    pub force: bool,
}

impl FadeControl {
    /// `force OR (provenance != Memory AND !suppress)`.
    pub fn effective(self, provenance: Provenance) -> bool {
        self.force || (provenance != Provenance::Memory && !self.suppress)
    }
}

/// Lifecycle of a cross-fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeState {
    /// Not started.
    Idle,
    /// Fading in since `start`.
    Animating {
        /// Timestamp the fade began.
        start: FrameTime,
    },
    /// Terminal. Content is fully opaque and the placeholder is gone.
    Done,
}

/// One call to [`FadeAnimator::sample`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeSample {
    /// Normalized progress in `[0, 1]`.
    pub progress: f64,
    /// `true` only on the sample that performed the `Animating -> Done` transition.
    pub completed: bool,
}

impl FadeSample {
    /// Alpha for the image draw: `round(base_alpha * progress)`.
    pub fn partial_alpha(self, base_alpha: u8) -> u8 {
        scale_alpha(base_alpha, self.progress)
    }
}

/// Linear cross-fade driven by wall-clock samples taken at draw time.
///
/// The animator never schedules anything; the host asks [`Self::needs_another_frame`] after
/// each draw and repaints while it is `true`.
#[derive(Clone, Debug)]
pub struct FadeAnimator {
    state: FadeState,
    duration_ms: u64,
    last_progress: f64,
}

impl FadeAnimator {
    /// Idle animator with the given duration.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            state: FadeState::Idle,
            duration_ms,
            last_progress: 0.0,
        }
    }

    /// Animator initialized for a fresh bind: animating from `now` when `fade` is true,
    /// otherwise already done.
    pub fn for_bind(fade: bool, now: FrameTime, duration_ms: u64) -> Self {
        let mut animator = Self::new(duration_ms);
        if fade {
            animator.start(now);
        } else {
            animator.skip();
        }
        animator
    }

    /// `Idle -> Animating`. Returns `false` (and changes nothing) from any other state.
    pub fn start(&mut self, now: FrameTime) -> bool {
        if self.state != FadeState::Idle {
            return false;
        }
        self.state = FadeState::Animating { start: now };
        self.last_progress = 0.0;
        true
    }

    /// `Idle -> Done` without animating.
    pub fn skip(&mut self) {
        if self.state == FadeState::Idle {
            self.state = FadeState::Done;
            self.last_progress = 1.0;
        }
    }

    /// Current state.
    pub fn state(&self) -> FadeState {
        self.state
    }

    /// Configured duration in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// `true` while the fade is in progress.
    pub fn is_animating(&self) -> bool {
        matches!(self.state, FadeState::Animating { .. })
    }

    /// Progress at `now`. Reaching 1 moves the animator to `Done` exactly once.
    pub fn sample(&mut self, now: FrameTime) -> FadeSample {
        match self.state {
            FadeState::Animating { start } => {
                let progress = self.progress_at(start, now);
                // Progress never moves backwards, even if the host clock does.
                let progress = progress.max(self.last_progress);
                self.last_progress = progress;
                if progress >= 1.0 {
                    self.state = FadeState::Done;
                    FadeSample {
                        progress: 1.0,
                        completed: true,
                    }
                } else {
                    FadeSample {
                        progress,
                        completed: false,
                    }
                }
            }
            FadeState::Idle | FadeState::Done => FadeSample {
                progress: 1.0,
                completed: false,
            },
        }
    }

    /// `true` iff still animating and the last sample had not reached 1.
    pub fn needs_another_frame(&self) -> bool {
        self.is_animating() && self.last_progress < 1.0
    }

    fn progress_at(&self, start: FrameTime, now: FrameTime) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now.millis_since(start) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }
}

impl Default for FadeAnimator {
    fn default() -> Self {
        Self::new(FADE_DURATION_MS)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fade.rs"]
mod tests;
