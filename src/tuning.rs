//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]. A tuning file may override any subset
//! of the fields.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Largest radius a tuning file may ask for (dp)
pub const RADIUS_LIMIT_DP: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Smallest radius (dp)
    pub min_radius_dp: u32,
    /// Largest radius (dp), inclusive
    pub max_radius_dp: u32,
    /// Candidates tried per placement
    pub max_placement_attempts: u32,
    /// Delay before each new circle (seconds)
    pub add_circle_delay: f32,
    /// Level banner slide-in (seconds)
    pub level_banner_enter: f32,
    /// Level banner slide-out (seconds)
    pub level_banner_exit: f32,
    /// Wait before the loss overlay starts appearing (seconds)
    pub loss_overlay_delay: f32,
    /// Loss overlay slide-in (seconds)
    pub loss_overlay_transition: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            min_radius_dp: MIN_RADIUS_DP,
            max_radius_dp: MAX_RADIUS_DP,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            add_circle_delay: ADD_CIRCLE_DELAY,
            level_banner_enter: LEVEL_BANNER_ENTER,
            level_banner_exit: LEVEL_BANNER_EXIT,
            loss_overlay_delay: LOSS_OVERLAY_DELAY,
            loss_overlay_transition: LOSS_OVERLAY_TRANSITION,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("parse tuning json")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read tuning file {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.min_radius_dp > 0, "min_radius_dp must be positive");
        ensure!(
            self.min_radius_dp <= self.max_radius_dp,
            "min_radius_dp {} exceeds max_radius_dp {}",
            self.min_radius_dp,
            self.max_radius_dp
        );
        ensure!(
            self.max_radius_dp <= RADIUS_LIMIT_DP,
            "max_radius_dp {} exceeds the limit of {}",
            self.max_radius_dp,
            RADIUS_LIMIT_DP
        );
        ensure!(self.max_placement_attempts > 0, "max_placement_attempts must be positive");
        for (name, secs) in [
            ("add_circle_delay", self.add_circle_delay),
            ("level_banner_enter", self.level_banner_enter),
            ("level_banner_exit", self.level_banner_exit),
            ("loss_overlay_delay", self.loss_overlay_delay),
            ("loss_overlay_transition", self.loss_overlay_transition),
        ] {
            ensure!(secs.is_finite() && secs >= 0.0, "{name} must be a non-negative number");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.min_radius_dp, 16);
        assert_eq!(t.max_radius_dp, 32);
        assert_eq!(t.max_placement_attempts, 1000);
        assert_eq!(t.add_circle_delay, 1.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "max_placement_attempts": 50, "add_circle_delay": 0.25 }"#)
            .unwrap();
        assert_eq!(t.max_placement_attempts, 50);
        assert_eq!(t.add_circle_delay, 0.25);
        assert_eq!(t.min_radius_dp, MIN_RADIUS_DP);
    }

    #[test]
    fn test_rejects_inverted_radius_range() {
        let err = Tuning::from_json(r#"{ "min_radius_dp": 40, "max_radius_dp": 20 }"#).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_rejects_huge_radius() {
        let err = Tuning::from_json(r#"{ "max_radius_dp": 4000000000 }"#).unwrap_err();
        assert!(err.to_string().contains("limit"));
        assert!(Tuning::from_json(r#"{ "max_radius_dp": 10000 }"#).is_ok());
    }

    #[test]
    fn test_rejects_negative_delay() {
        assert!(Tuning::from_json(r#"{ "loss_overlay_delay": -1.0 }"#).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
