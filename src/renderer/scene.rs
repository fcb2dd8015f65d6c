//! Render instructions
//!
//! Turns game state into what to draw: circles with a fill, plus the overlays
//! currently visible. Backends (WebGPU, DOM) consume this and nothing else.

use super::overlay::OverlayAnimator;
use crate::sim::{Circle, GamePhase, GameState};

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const CIRCLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// The missed target after a loss
    pub const HIGHLIGHT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Normal,
    Highlight,
}

impl Fill {
    pub fn color(&self) -> [f32; 4] {
        match self {
            Fill::Normal => colors::CIRCLE,
            Fill::Highlight => colors::HIGHLIGHT,
        }
    }

    /// Slot in the shader palette
    pub fn palette_index(&self) -> u32 {
        match self {
            Fill::Normal => 0,
            Fill::Highlight => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDraw {
    pub circle: Circle,
    pub fill: Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// "Level N", sliding at `offset`
    LevelBanner { level: u32, offset: f32 },
    /// "YOU WIN" with reset button
    Won { high_score: u32 },
    /// "YOU LOSE" with reset button, sliding at `offset`
    Lost { high_score: u32, offset: f32 },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    /// Spawn order, so newer circles paint over older ones
    pub circles: Vec<CircleDraw>,
    /// Back to front
    pub overlays: Vec<Overlay>,
}

impl Scene {
    pub fn level_banner(&self) -> Option<(u32, f32)> {
        self.overlays.iter().find_map(|o| match o {
            Overlay::LevelBanner { level, offset } => Some((*level, *offset)),
            _ => None,
        })
    }

    /// Won or Lost panel, if showing
    pub fn end_panel(&self) -> Option<&Overlay> {
        self.overlays
            .iter()
            .find(|o| matches!(o, Overlay::Won { .. } | Overlay::Lost { .. }))
    }
}

pub fn build_scene(state: &GameState, animator: &OverlayAnimator, high_score: u32) -> Scene {
    let last = state.circles.len().saturating_sub(1);
    let circles = state
        .circles
        .iter()
        .enumerate()
        .map(|(i, &circle)| CircleDraw {
            circle,
            fill: if state.phase == GamePhase::Lost && i == last {
                Fill::Highlight
            } else {
                Fill::Normal
            },
        })
        .collect();

    let mut overlays = Vec::new();
    if let Some(offset) = animator.level_banner() {
        overlays.push(Overlay::LevelBanner {
            level: state.level,
            offset,
        });
    }
    if animator.win_overlay() {
        overlays.push(Overlay::Won { high_score });
    }
    if let Some(offset) = animator.loss_overlay() {
        overlays.push(Overlay::Lost { high_score, offset });
    }

    Scene { circles, overlays }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn two_circles(phase: GamePhase) -> GameState {
        GameState {
            phase,
            level: 2,
            circles: vec![Circle::new(0.0, 0.0, 20.0), Circle::new(100.0, 100.0, 20.0)],
            epoch: 0,
        }
    }

    #[test]
    fn test_all_white_while_playing() {
        let state = two_circles(GamePhase::Idle);
        let scene = build_scene(&state, &OverlayAnimator::new(&Tuning::default()), 0);
        assert_eq!(scene.circles.len(), 2);
        assert!(scene.circles.iter().all(|c| c.fill == Fill::Normal));
        assert!(scene.overlays.is_empty());
    }

    #[test]
    fn test_active_circle_highlighted_on_loss() {
        let state = two_circles(GamePhase::Lost);
        let mut animator = OverlayAnimator::new(&Tuning::default());
        animator.update(GamePhase::Lost, 0.0);

        let scene = build_scene(&state, &animator, 5);
        assert_eq!(scene.circles[0].fill, Fill::Normal);
        assert_eq!(scene.circles[1].fill, Fill::Highlight);
        assert_eq!(scene.circles[1].fill.color(), colors::HIGHLIGHT);
        // Overlay still waiting
        assert_eq!(scene.end_panel(), None);

        animator.update(GamePhase::Lost, 2.0);
        let scene = build_scene(&state, &animator, 5);
        assert_eq!(
            scene.end_panel(),
            Some(&Overlay::Lost {
                high_score: 5,
                offset: 0.0
            })
        );
    }

    #[test]
    fn test_level_banner_shows_current_level() {
        let state = two_circles(GamePhase::AddingCircle);
        let mut animator = OverlayAnimator::new(&Tuning::default());
        animator.update(GamePhase::AddingCircle, 0.0);

        let scene = build_scene(&state, &animator, 0);
        assert_eq!(scene.level_banner(), Some((2, -1.0)));
    }

    #[test]
    fn test_won_panel() {
        let state = two_circles(GamePhase::Won);
        let mut animator = OverlayAnimator::new(&Tuning::default());
        animator.update(GamePhase::Won, 0.0);

        let scene = build_scene(&state, &animator, 9);
        assert_eq!(scene.end_panel(), Some(&Overlay::Won { high_score: 9 }));
        assert!(scene.circles.iter().all(|c| c.fill == Fill::Normal));
    }
}
