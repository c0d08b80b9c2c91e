//! Heuristic coefficients of the intensity and probability models.
//!
//! None of these are calibrated; the defaults reproduce the reference model exactly.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file::ReadJsonFile;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid {field}: {value}")]
pub struct InvalidConfig {
    pub field: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Scoring intensity of a team before any statistics are considered.
    pub goal_base: f64,
    pub shots_on_target_weight: f64,
    pub dangerous_attacks_weight: f64,
    /// Subtracted from a team's intensity for every goal it has already scored.
    pub goal_penalty: f64,
    pub goal_floor: f64,
    pub corner_base: f64,
    pub corner_weight: f64,
    pub card_base: f64,
    pub card_weight: f64,
    pub regulation_minutes: f64,
    /// Progress past which the late-game adjustments apply.
    pub late_game_threshold: f64,
    pub late_game_decay: f64,
    pub leader_boost: f64,
    pub draw_fade: f64,
    pub trailer_fade: f64,
    pub level_fade: f64,
    pub handicap_steepness: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            goal_base: 0.4,
            shots_on_target_weight: 0.04,
            dangerous_attacks_weight: 0.01,
            goal_penalty: 0.5,
            goal_floor: 0.1,
            corner_base: 4.0,
            corner_weight: 0.02,
            card_base: 2.0,
            card_weight: 0.03,
            regulation_minutes: 90.0,
            late_game_threshold: 0.7,
            late_game_decay: 2.0,
            leader_boost: 1.0,
            draw_fade: 0.5,
            trailer_fade: 0.8,
            level_fade: 0.5,
            handicap_steepness: 2.0,
        }
    }
}

impl ModelConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read_json_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        for (field, value) in self.fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfig { field, value });
            }
        }
        if self.goal_floor <= 0.0 {
            return Err(InvalidConfig {
                field: "goal_floor",
                value: self.goal_floor,
            });
        }
        if self.regulation_minutes <= 0.0 {
            return Err(InvalidConfig {
                field: "regulation_minutes",
                value: self.regulation_minutes,
            });
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 17] {
        [
            ("goal_base", self.goal_base),
            ("shots_on_target_weight", self.shots_on_target_weight),
            ("dangerous_attacks_weight", self.dangerous_attacks_weight),
            ("goal_penalty", self.goal_penalty),
            ("goal_floor", self.goal_floor),
            ("corner_base", self.corner_base),
            ("corner_weight", self.corner_weight),
            ("card_base", self.card_base),
            ("card_weight", self.card_weight),
            ("regulation_minutes", self.regulation_minutes),
            ("late_game_threshold", self.late_game_threshold),
            ("late_game_decay", self.late_game_decay),
            ("leader_boost", self.leader_boost),
            ("draw_fade", self.draw_fade),
            ("trailer_fade", self.trailer_fade),
            ("level_fade", self.level_fade),
            ("handicap_steepness", self.handicap_steepness),
        ]
    }
}
