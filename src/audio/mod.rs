//! Sound feedback for tap outcomes
//!
//! The game only emits [`SoundEffect`]s through a [`SoundPlayer`]; playback is
//! fire-and-forget and never reports failure back.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Active circle tapped - bright ding
    Correct,
    /// Old circle tapped - buzzer
    Incorrect,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Correct => "ding",
            SoundEffect::Incorrect => "buzzer",
        }
    }
}

/// Playback capability injected into the game
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect);
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Box<P> {
    fn play(&mut self, effect: SoundEffect) {
        (**self).play(effect)
    }
}

/// Player for headless runs: logs instead of making noise
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("(silent) {}", effect.as_str());
    }
}

/// Player that remembers what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    pub played: Vec<SoundEffect>,
}

impl SoundPlayer for RecordingPlayer {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}
