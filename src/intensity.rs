//! Poisson intensities derived from the score, the clock and the match statistics.

use serde::Serialize;
use tracing::debug;

use crate::config::ModelConfig;
use crate::domain::{Score, Side};
use crate::stats::{MatchStatistics, Stat};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intensities {
    pub home_goals: f64,
    pub away_goals: f64,
    pub total_goals: f64,
    pub corners: f64,
    pub cards: f64,
    /// Elapsed fraction of regulation time; exceeds 1 in stoppage time.
    pub progress: f64,
}
impl Intensities {
    pub fn goals(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home_goals,
            Side::Away => self.away_goals,
        }
    }

    /// How far play has progressed beyond the late-game threshold, if at all.
    pub fn late_game(&self, config: &ModelConfig) -> Option<f64> {
        if self.progress > config.late_game_threshold {
            Some(self.progress - config.late_game_threshold)
        } else {
            None
        }
    }
}

/// Scoring intensity of one side: attacking pressure less a penalty for goals already scored,
/// floored to keep the rate strictly positive.
fn goal_intensity(side: Side, score: &Score, stats: &MatchStatistics, config: &ModelConfig) -> f64 {
    let (on_target, attacks) = match side {
        Side::Home => (
            stats.get(Stat::ShotsOnTarget).home,
            stats.get(Stat::DangerousAttacks).home,
        ),
        Side::Away => (
            stats.get(Stat::ShotsOnTarget).away,
            stats.get(Stat::DangerousAttacks).away,
        ),
    };
    let simple = config.goal_base
        + on_target * config.shots_on_target_weight
        + attacks * config.dangerous_attacks_weight;
    let adjusted = simple - score.of(side) as f64 * config.goal_penalty;
    f64::max(config.goal_floor, adjusted)
}

pub fn derive(
    score: &Score,
    minute: f64,
    stats: &MatchStatistics,
    config: &ModelConfig,
) -> Intensities {
    let home_goals = goal_intensity(Side::Home, score, stats, config);
    let away_goals = goal_intensity(Side::Away, score, stats, config);
    let corners = stats.get(Stat::DangerousAttacks).sum() * config.corner_weight + config.corner_base;
    let cards = stats.get(Stat::Fouls).sum() * config.card_weight + config.card_base;
    let intensities = Intensities {
        home_goals,
        away_goals,
        total_goals: home_goals + away_goals,
        corners,
        cards,
        progress: minute / config.regulation_minutes,
    };
    debug!("intensities: {intensities:?}");
    intensities
}
