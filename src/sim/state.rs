//! Game state and change notifications

use super::circle::Circle;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Waiting for the player to tap
    #[default]
    Idle,
    /// Delay running before the next circle is placed
    AddingCircle,
    /// Board is full
    Won,
    /// Player tapped an old circle
    Lost,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::AddingCircle => "adding-circle",
            GamePhase::Won => "won",
            GamePhase::Lost => "lost",
        }
    }

    /// Won and Lost only leave through a reset
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Everything a renderer needs to draw one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    /// Starts at 1, +1 per correct tap
    pub level: u32,
    /// Spawn order; the last one is the active target
    pub circles: Vec<Circle>,
    /// Bumped on every reset so stale delayed work can be recognized
    pub epoch: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Idle,
            level: 1,
            circles: Vec::new(),
            epoch: 0,
        }
    }
}

impl GameState {
    /// The circle the player must tap next
    pub fn active_circle(&self) -> Option<&Circle> {
        self.circles.last()
    }
}

/// Notifications for the presentation layer, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelChanged(u32),
    CircleAdded(Circle),
    /// Play the "correct" feedback
    CorrectTap,
    /// Play the "incorrect" feedback
    IncorrectTap,
    HighScoreChanged(u32),
    /// Placement gave up; the session is won
    BoardFull,
    Reset,
}
