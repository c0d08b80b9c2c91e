//! Market probabilities from Poisson intensities.
//!
//! The match outcome uses a logistic comparison of the two scoring intensities, nudged
//! towards the current result late in the game. Totals (goals, corners and cards) are
//! cumulative Poisson. Both-teams-to-score multiplies each side's chance of scoring at
//! least once. Asian handicaps are logistic in the current goal difference, and the two
//! teams' lines are computed independently of each other.

use rustc_hash::FxHashMap;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::config::ModelConfig;
use crate::domain::{Bound, DoubleChance, Handicap, Market, Score, Side, Sign, Tally, Teams};
use crate::factorial::Lookup;
use crate::input::RawInput;
use crate::intensity::{self, Intensities};
use crate::poisson;
use crate::probs::{clamp_percent, finalise, round_tenth, SliceExt};
use crate::stats::MatchStatistics;

/// Asian handicaps are offered in quarter-goal steps from 0.25 to 2.5.
pub const HANDICAPS: [Handicap; 10] = [
    Handicap(1),
    Handicap(2),
    Handicap(3),
    Handicap(4),
    Handicap(5),
    Handicap(6),
    Handicap(7),
    Handicap(8),
    Handicap(9),
    Handicap(10),
];

/// Number of markets priced by every calculation.
pub const MARKETS: usize = 3 + 3 + 2 * (6 + 12 + 9) + 2 + 4 * HANDICAPS.len();

/// Percentages keyed by market, in the order they were priced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityMap {
    teams: Teams,
    markets: Vec<Market>,
    probs: Vec<f64>,
    market_to_index: FxHashMap<Market, usize>,
}
impl ProbabilityMap {
    pub fn with_capacity(teams: Teams, capacity: usize) -> Self {
        Self {
            teams,
            markets: Vec::with_capacity(capacity),
            probs: Vec::with_capacity(capacity),
            market_to_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Finalises `prob` and records it against `market`.
    pub fn insert(&mut self, market: Market, prob: f64) {
        let index = self.markets.len();
        if let Some(existing_index) = self.market_to_index.insert(market, index) {
            panic!("duplicate market {market:?} at index {index}, previously at {existing_index}");
        }
        let prob = finalise(prob, market.is_capped());
        trace!("{market:?}: {prob}");
        self.markets.push(market);
        self.probs.push(prob);
    }

    pub fn get(&self, market: &Market) -> Option<f64> {
        self.market_to_index
            .get(market)
            .map(|&index| self.probs[index])
    }

    /// Looks up a probability by its rendered label. When two markets render identically
    /// (e.g. both teams share a name), the first one priced wins.
    pub fn get_by_label(&self, label: &str) -> Option<f64> {
        self.iter()
            .find(|(market, _)| market.label(&self.teams).to_string() == label)
            .map(|(_, prob)| prob)
    }

    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Market, f64)> {
        self.markets.iter().zip(self.probs.iter().copied())
    }

    pub fn labelled(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.iter()
            .map(|(market, prob)| (market.label(&self.teams).to_string(), prob))
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.iter()
            .map(|(market, probability)| Entry {
                market: *market,
                label: market.label(&self.teams).to_string(),
                probability,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub market: Market,
    pub label: String,
    pub probability: f64,
}

/// Prices every market from an immutable model configuration. Each call is independent of
/// any other, so one engine may be shared freely between threads.
#[derive(Debug, Clone)]
pub struct ProbabilityEngine {
    config: ModelConfig,
    factorial: Lookup,
}
impl Default for ProbabilityEngine {
    fn default() -> Self {
        Self::new(ModelConfig::default())
    }
}
impl ProbabilityEngine {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            factorial: Lookup::default(),
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn calculate(&self, input: &RawInput) -> ProbabilityMap {
        let stats = MatchStatistics::parse(&input.stats_text);
        debug!("stats: {stats:?}");
        self.evaluate(&input.teams, &input.score, input.minute, &stats)
    }

    pub fn evaluate(
        &self,
        teams: &Teams,
        score: &Score,
        minute: f64,
        stats: &MatchStatistics,
    ) -> ProbabilityMap {
        let intensities = intensity::derive(score, minute, stats, &self.config);
        self.price(teams.clone(), score, &intensities)
    }

    pub fn price(&self, teams: Teams, score: &Score, intensities: &Intensities) -> ProbabilityMap {
        let mut map = ProbabilityMap::with_capacity(teams, MARKETS);
        self.price_outcomes(score, intensities, &mut map);
        for tally in Tally::iter() {
            self.price_totals(tally, intensities, &mut map);
        }
        self.price_both_teams_to_score(intensities, &mut map);
        self.price_asian_handicaps(score, intensities, &mut map);
        debug_assert_eq!(MARKETS, map.len());
        map
    }

    /// Home, draw and away percentages, summing to 100.
    pub fn outcome_probs(&self, score: &Score, intensities: &Intensities) -> [f64; 3] {
        let (home_rate, away_rate) = (intensities.home_goals, intensities.away_goals);
        let home = 1.0 / (1.0 + f64::exp(away_rate - home_rate));
        let draw = 1.0 - (home + 1.0 / (1.0 + f64::exp(home_rate - away_rate)));
        let away = 1.0 - home - draw;
        let mut probs = [home.max(0.0), draw.max(0.0), away.max(0.0)];
        probs.normalise(100.0);

        if let Some(late) = intensities.late_game(&self.config) {
            let config = &self.config;
            probs.scale(1.0 - late * config.late_game_decay);
            let [home, draw, away] = &mut probs;
            match score.leader() {
                Some(Side::Home) => {
                    *home *= 1.0 + late * config.leader_boost;
                    *draw *= 1.0 - late * config.draw_fade;
                    *away *= 1.0 - late * config.trailer_fade;
                }
                Some(Side::Away) => {
                    *away *= 1.0 + late * config.leader_boost;
                    *draw *= 1.0 - late * config.draw_fade;
                    *home *= 1.0 - late * config.trailer_fade;
                }
                None => {
                    *draw *= 1.0 + late * config.leader_boost;
                    *home *= 1.0 - late * config.level_fade;
                    *away *= 1.0 - late * config.level_fade;
                }
            }
            probs.normalise(100.0);
        }
        probs
    }

    fn price_outcomes(&self, score: &Score, intensities: &Intensities, map: &mut ProbabilityMap) {
        let [home, draw, away] = self.outcome_probs(score, intensities).map(clamp_percent);
        map.insert(Market::Win(Side::Home), home);
        map.insert(Market::Draw, draw);
        map.insert(Market::Win(Side::Away), away);
        map.insert(Market::DoubleChance(DoubleChance::HomeOrDraw), home + draw);
        map.insert(Market::DoubleChance(DoubleChance::AwayOrDraw), away + draw);
        map.insert(Market::DoubleChance(DoubleChance::HomeOrAway), home + away);
    }

    fn price_totals(&self, tally: Tally, intensities: &Intensities, map: &mut ProbabilityMap) {
        let lambda = match tally {
            Tally::Goals => intensities.total_goals,
            Tally::Corners => intensities.corners,
            Tally::Cards => intensities.cards,
        };
        for line in tally.lines() {
            let prob = poisson::over(line.0, lambda, &self.factorial);
            map.insert(Market::Total(tally, Bound::Over, line), clamp_percent(prob));
        }
        for line in tally.lines() {
            let prob = poisson::under(line.0, lambda, &self.factorial);
            map.insert(Market::Total(tally, Bound::Under, line), clamp_percent(prob));
        }
    }

    fn price_both_teams_to_score(&self, intensities: &Intensities, map: &mut ProbabilityMap) {
        let scores = |side| 1.0 - poisson::univariate(0, intensities.goals(side), &self.factorial);
        let yes = clamp_percent(scores(Side::Home) * scores(Side::Away) * 100.0);
        // the complement is taken after rounding so that the published pair sums to 100
        let yes = round_tenth(yes);
        map.insert(Market::BothTeamsToScore(true), yes);
        map.insert(Market::BothTeamsToScore(false), 100.0 - yes);
    }

    fn price_asian_handicaps(&self, score: &Score, intensities: &Intensities, map: &mut ProbabilityMap) {
        let difference = score.difference() as f64;
        let late = intensities.late_game(&self.config);
        for handicap in HANDICAPS {
            for side in Side::iter() {
                // the home side is boosted unless behind, the away side only when ahead
                let (margin, boosted, covering, failing) = match side {
                    Side::Home => (difference, difference >= 0.0, Sign::Plus, Sign::Minus),
                    Side::Away => (-difference, difference < 0.0, Sign::Minus, Sign::Plus),
                };
                let mut covers = 100.0
                    / (1.0 + f64::exp(-self.config.handicap_steepness * (margin - handicap.value())));
                if let (true, Some(late)) = (boosted, late) {
                    covers *= 1.0 + late;
                }
                let covers = clamp_percent(covers);
                map.insert(Market::AsianHandicap(side, covering, handicap), covers);
                map.insert(Market::AsianHandicap(side, failing, handicap), 100.0 - covers);
            }
        }
    }
}

/// Prices every market for `input` using the default model.
pub fn calculate(input: &RawInput) -> ProbabilityMap {
    ProbabilityEngine::default().calculate(input)
}
