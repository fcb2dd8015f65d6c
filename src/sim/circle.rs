//! Circle targets and hit testing

use glam::Vec2;

/// A placed target, in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

/// How a tap on the board was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Hit the active (most recent) circle
    Correct,
    /// Hit an older circle
    Incorrect,
    /// Hit nothing
    Miss,
    /// The session was not accepting taps
    Ignored,
}

impl Circle {
    pub const fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Distance from `point` to this circle's center
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.center().distance(point)
    }

    /// True if `point` lies inside or on the edge
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.distance_to(point) <= self.r
    }

    /// True if no existing circle is too close to this candidate.
    ///
    /// The exclusion distance is twice the *existing* circle's radius; the
    /// candidate's own radius is not part of the test.
    pub fn is_clear_of(&self, existing: &[Circle]) -> bool {
        let center = self.center();
        existing.iter().all(|c| c.distance_to(center) >= c.r * 2.0)
    }
}

/// First circle, in spawn order, that contains `point`
pub fn find_tapped_circle(point: Vec2, circles: &[Circle]) -> Option<&Circle> {
    circles.iter().find(|c| c.contains(point))
}

/// Classify a tap against the board without touching any game state.
///
/// Never returns [`TapOutcome::Ignored`]; that is decided by the caller's phase.
pub fn classify_tap(point: Vec2, circles: &[Circle]) -> TapOutcome {
    match find_tapped_circle(point, circles) {
        None => TapOutcome::Miss,
        Some(c) if Some(c) == circles.last() => TapOutcome::Correct,
        Some(_) => TapOutcome::Incorrect,
    }
}
