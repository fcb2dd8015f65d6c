//! Demo player
//!
//! Always taps the center of the active circle, so a demo session only ends
//! when the board is full.

use glam::Vec2;

use super::state::{GamePhase, GameState};

/// Where the bot taps next, if the game is waiting for input
pub fn choose_tap(state: &GameState) -> Option<Vec2> {
    if state.phase != GamePhase::Idle {
        return None;
    }
    state.active_circle().map(|c| c.center())
}
