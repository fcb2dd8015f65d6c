//! Circles - tap the newest circle before the board fills up
//!
//! Core modules:
//! - `sim`: Game rules (circle placement, hit testing, state machine)
//! - `renderer`: Scene description, overlay timing and the WebGPU pipeline
//! - `platform`: Display metrics and safe-area insets
//! - `persistence`: Key-value stores backing the high score
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{SoundEffect, SoundPlayer};
pub use highscores::HighScore;
pub use persistence::{KeyValueStore, MemoryStore, Observable};
pub use settings::Settings;
pub use sim::{Bounds, Circle, Game, GameEvent, GamePhase, GameState, Insets, TapOutcome};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Smallest circle radius (density-independent units)
    pub const MIN_RADIUS_DP: u32 = 16;
    /// Largest circle radius (density-independent units)
    pub const MAX_RADIUS_DP: u32 = 32;
    /// Random candidates tried before the board counts as full
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Pause before the next circle appears (seconds)
    pub const ADD_CIRCLE_DELAY: f32 = 1.0;

    /// Level banner slide-in duration (seconds)
    pub const LEVEL_BANNER_ENTER: f32 = 0.5;
    /// Level banner slide-out duration (seconds)
    pub const LEVEL_BANNER_EXIT: f32 = 1.0;
    /// Time between losing and the loss overlay starting to appear (seconds)
    pub const LOSS_OVERLAY_DELAY: f32 = 1.0;
    /// Loss overlay slide-in duration (seconds)
    pub const LOSS_OVERLAY_TRANSITION: f32 = 0.5;

    /// Key of the persisted high score
    pub const HIGH_SCORE_KEY: &str = "circles_high_score";
}
