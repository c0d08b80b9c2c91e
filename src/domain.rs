use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

pub const DEFAULT_HOME_NAME: &str = "Time A";
pub const DEFAULT_AWAY_NAME: &str = "Time B";

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self::default()
    }

    /// Goals scored by `side`.
    pub fn of(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    /// Home goals less away goals.
    pub fn difference(&self) -> i16 {
        self.home as i16 - self.away as i16
    }

    pub fn leader(&self) -> Option<Side> {
        match self.difference() {
            diff if diff > 0 => Some(Side::Home),
            diff if diff < 0 => Some(Side::Away),
            _ => None,
        }
    }
}

/// Team names as they appear in rendered labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
    pub home: String,
    pub away: String,
}
impl Teams {
    /// Blank names fall back to `Time A` and `Time B`.
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        fn or_default(name: String, default: &str) -> String {
            if name.trim().is_empty() {
                default.into()
            } else {
                name
            }
        }

        Self {
            home: or_default(home.into(), DEFAULT_HOME_NAME),
            away: or_default(away.into(), DEFAULT_AWAY_NAME),
        }
    }

    pub fn name(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

impl Default for Teams {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// A half-goal line; `Line(2)` is 2.5, splitting at most two from three or more.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Line(pub u8);
impl Line {
    pub fn value(&self) -> f64 {
        self.0 as f64 + 0.5
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// A handicap expressed in quarter goals; `Handicap(6)` is 1.5.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Handicap(pub u8);
impl Handicap {
    pub fn value(&self) -> f64 {
        self.0 as f64 / 4.0
    }
}

impl Display for Handicap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Plus,
    Minus,
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Plus => write!(f, "+"),
            Sign::Minus => write!(f, "-"),
        }
    }
}

/// What is being counted in an over/under market.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize)]
pub enum Tally {
    Goals,
    Corners,
    Cards,
}
impl Tally {
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        let range = match self {
            Tally::Goals => 0..=5,
            Tally::Corners => 3..=14,
            Tally::Cards => 2..=10,
        };
        range.map(Line)
    }

    fn caption(&self) -> &'static str {
        match self {
            Tally::Goals => "Gols",
            Tally::Corners => "Escanteios",
            Tally::Cards => "Cartões Amarelos",
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bound {
    Over,
    Under,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, Serialize, Deserialize)]
pub enum DoubleChance {
    HomeOrDraw,
    AwayOrDraw,
    HomeOrAway,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Market {
    Win(Side),
    Draw,
    DoubleChance(DoubleChance),
    Total(Tally, Bound, Line),
    BothTeamsToScore(bool),
    AsianHandicap(Side, Sign, Handicap),
}
impl Market {
    /// Combined-outcome markets are sums of two outcomes and may exceed 100%.
    pub fn is_capped(&self) -> bool {
        !matches!(self, Market::DoubleChance(_))
    }

    pub fn label<'a>(&'a self, teams: &'a Teams) -> MarketLabel<'a> {
        MarketLabel {
            market: self,
            teams,
        }
    }
}

/// Renders a [`Market`] as its display label, interpolating team names.
pub struct MarketLabel<'a> {
    market: &'a Market,
    teams: &'a Teams,
}

impl Display for MarketLabel<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let teams = self.teams;
        match self.market {
            Market::Win(side) => write!(f, "Vitória {}", teams.name(*side)),
            Market::Draw => write!(f, "Empate"),
            Market::DoubleChance(DoubleChance::HomeOrDraw) => write!(f, "{} ou Empate", teams.home),
            Market::DoubleChance(DoubleChance::AwayOrDraw) => write!(f, "{} ou Empate", teams.away),
            Market::DoubleChance(DoubleChance::HomeOrAway) => {
                write!(f, "{} ou {}", teams.home, teams.away)
            }
            Market::Total(tally, Bound::Over, line) => {
                write!(f, "{} Acima de {line}", tally.caption())
            }
            Market::Total(tally, Bound::Under, line) => {
                write!(f, "{} Abaixo de {line}", tally.caption())
            }
            Market::BothTeamsToScore(true) => write!(f, "Ambos Marcam - Sim"),
            Market::BothTeamsToScore(false) => write!(f, "Ambos Marcam - Não"),
            Market::AsianHandicap(side, sign, handicap) => {
                write!(f, "Handicap Asiático {} {sign}{handicap}", teams.name(*side))
            }
        }
    }
}
