//! Overlay timing
//!
//! Tracks how long the game has been in its current phase and turns that into
//! slide offsets. Offsets are fractions of the overlay height: `-1.0` is fully
//! above the screen, `0.0` in place, `1.0` fully below.

use crate::sim::GamePhase;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct OverlayAnimator {
    banner_enter: f32,
    banner_exit: f32,
    loss_delay: f32,
    loss_transition: f32,
    reduced_motion: bool,

    phase: GamePhase,
    /// Seconds spent in `phase`
    phase_time: f32,
    /// Seconds since the level banner started leaving
    banner_leaving: Option<f32>,
}

impl OverlayAnimator {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            banner_enter: tuning.level_banner_enter,
            banner_exit: tuning.level_banner_exit,
            loss_delay: tuning.loss_overlay_delay,
            loss_transition: tuning.loss_overlay_transition,
            reduced_motion: false,
            phase: GamePhase::Idle,
            phase_time: 0.0,
            banner_leaving: None,
        }
    }

    /// Show and hide overlays instantly
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Advance by `dt` seconds with the game now in `phase`
    pub fn update(&mut self, phase: GamePhase, dt: f32) {
        if phase != self.phase {
            if self.phase == GamePhase::AddingCircle {
                self.banner_leaving = Some(0.0);
            }
            if phase == GamePhase::AddingCircle {
                self.banner_leaving = None;
            }
            self.phase = phase;
            self.phase_time = 0.0;
        }

        // The frame that saw a change counts toward the new phase
        self.phase_time += dt;
        if let Some(t) = &mut self.banner_leaving {
            *t += dt;
            if *t >= self.banner_exit {
                self.banner_leaving = None;
            }
        }
    }

    /// Replay the level banner from the top after a session reset
    pub fn on_reset(&mut self) {
        self.phase_time = 0.0;
        self.banner_leaving = None;
    }

    /// Vertical offset of the level banner, `None` when hidden
    pub fn level_banner(&self) -> Option<f32> {
        if self.phase == GamePhase::AddingCircle {
            if self.reduced_motion {
                return Some(0.0);
            }
            return Some(progress(self.phase_time, self.banner_enter) - 1.0);
        }
        if self.reduced_motion {
            return None;
        }
        self.banner_leaving.map(|t| progress(t, self.banner_exit))
    }

    /// Vertical offset of the loss overlay, `None` before it appears
    pub fn loss_overlay(&self) -> Option<f32> {
        if self.phase != GamePhase::Lost {
            return None;
        }
        let t = self.phase_time - self.loss_delay;
        if t < 0.0 {
            return None;
        }
        if self.reduced_motion {
            return Some(0.0);
        }
        Some(progress(t, self.loss_transition) - 1.0)
    }

    /// The win overlay has no entrance animation
    pub fn win_overlay(&self) -> bool {
        self.phase == GamePhase::Won
    }
}

/// Linear 0..1 progress of `t` through `duration`
fn progress(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (t / duration).clamp(0.0, 1.0)
    }
}
