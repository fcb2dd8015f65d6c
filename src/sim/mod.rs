//! Game rules
//!
//! Pure logic with no rendering or platform dependencies:
//! - Seeded RNG only
//! - Time advances only through [`Game::advance`]
//! - Collaborators (store, sound) are injected

pub mod autoplay;
pub mod circle;
pub mod game;
pub mod placement;
pub mod schedule;
pub mod state;

pub use autoplay::choose_tap;
pub use circle::{Circle, TapOutcome, classify_tap, find_tapped_circle};
pub use game::Game;
pub use placement::{Bounds, Insets, place_new_circle, random_candidate};
pub use schedule::{DelayQueue, PlacementTicket};
pub use state::{GameEvent, GamePhase, GameState};
