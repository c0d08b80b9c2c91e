//! Extraction of labelled statistics from free-form, pasted text.
//!
//! Live-score sites lay out their statistics as `home LABEL away`, often split across lines
//! and with percent signs on some of the values:
//!
//! ```text
//! 55%
//! Posse de bola
//! 45%
//! 4 Chutes no alvo 2
//! ```
//!
//! Only the first occurrence of a label counts. A label that cannot be found reads as zero,
//! just like a number that fails to parse; [`MatchStatistics::lookup`] retains the
//! distinction for callers that care.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{EnumCount, EnumIter};
use tracing::{debug, warn};

/// ASCII digits only, unlike `\d`.
const NUMBER: &str = r"([0-9]+(?:[.,][0-9]+)?)";

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, EnumIter, EnumCount, Serialize, Deserialize)]
pub enum Stat {
    Possession,
    Shots,
    ShotsOnTarget,
    ShotsOffTarget,
    DangerousAttacks,
    Corners,
    Penalties,
    YellowCards,
    RedCards,
    AerialsWon,
    Interceptions,
    Tackles,
    Passes,
    PassAccuracy,
    Fouls,
}
impl Stat {
    /// The label as it appears in the pasted text.
    pub fn label(&self) -> &'static str {
        match self {
            Stat::Possession => "Posse de bola",
            Stat::Shots => "Chutes",
            Stat::ShotsOnTarget => "Chutes no alvo",
            Stat::ShotsOffTarget => "Chutes para fora",
            Stat::DangerousAttacks => "Ataques perigosos",
            Stat::Corners => "Escanteios",
            Stat::Penalties => "Penalidades",
            Stat::YellowCards => "Cartões amarelos",
            Stat::RedCards => "Cartões vermelhos",
            Stat::AerialsWon => "Bolas aéreas vencidas",
            Stat::Interceptions => "Intercepções",
            Stat::Tackles => "Desarmes",
            Stat::Passes => "Passes",
            Stat::PassAccuracy => "Precisão dos passes",
            Stat::Fouls => "Faltas",
        }
    }
}

/// A statistic's values for the home (first) and away (second) team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatPair {
    pub home: f64,
    pub away: f64,
}
impl StatPair {
    pub fn new(home: f64, away: f64) -> Self {
        Self {
            home: sanitise(home),
            away: sanitise(away),
        }
    }

    pub fn sum(&self) -> f64 {
        self.home + self.away
    }
}

impl From<StatPair> for (f64, f64) {
    fn from(pair: StatPair) -> Self {
        (pair.home, pair.away)
    }
}

fn pair_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?im){NUMBER}\s*%?\s*(?:[\r\n]+\s*|\s+)?{}\s*{NUMBER}\s*%?",
        regex::escape(label)
    ))
}

fn single_pattern(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?im){}\s*{NUMBER}", regex::escape(label)))
}

static PAIR_PATTERNS: LazyLock<Vec<Option<Regex>>> = LazyLock::new(|| {
    Stat::iter()
        .map(|stat| match pair_pattern(stat.label()) {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!("pattern for {stat:?} failed to compile: {err}");
                None
            }
        })
        .collect()
});

/// Parses a matched number, accepting a decimal comma. Anything unparseable is zero.
fn parse_number(text: &str) -> f64 {
    sanitise(text.replacen(',', ".", 1).parse().unwrap_or(0.0))
}

fn sanitise(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn capture_pair(regex: &Regex, text: &str) -> Option<StatPair> {
    let captures = regex.captures(text)?;
    let home = parse_number(captures.get(1)?.as_str());
    let away = parse_number(captures.get(2)?.as_str());
    Some(StatPair { home, away })
}

/// Locates the first `number LABEL number` occurrence in `text`.
pub fn find_pair(label: &str, text: &str) -> Option<StatPair> {
    let regex = pair_pattern(label).ok()?;
    capture_pair(&regex, text)
}

/// Locates the first `LABEL number` occurrence in `text`.
pub fn find_single(label: &str, text: &str) -> Option<f64> {
    let regex = single_pattern(label).ok()?;
    let captures = regex.captures(text)?;
    Some(parse_number(captures.get(1)?.as_str()))
}

/// The values flanking `label`, or `(0, 0)` if the label is absent.
pub fn extract_pair(label: &str, text: &str) -> (f64, f64) {
    find_pair(label, text).unwrap_or_default().into()
}

/// The value following `label`, or `0` if the label is absent.
pub fn extract_single(label: &str, text: &str) -> f64 {
    find_single(label, text).unwrap_or_default()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatchStatistics {
    pairs: [Option<StatPair>; Stat::COUNT],
}
impl MatchStatistics {
    pub fn parse(text: &str) -> Self {
        let mut stats = Self::default();
        for (stat, regex) in Stat::iter().zip(PAIR_PATTERNS.iter()) {
            if let Some(regex) = regex {
                stats.pairs[stat as usize] = capture_pair(regex, text);
            }
        }
        debug!(
            "parsed {} of {} statistics",
            stats.pairs.iter().filter(|pair| pair.is_some()).count(),
            Stat::COUNT
        );
        stats
    }

    /// The pair for `stat`, reading as `(0, 0)` when it was not found.
    #[inline]
    pub fn get(&self, stat: Stat) -> StatPair {
        self.pairs[stat as usize].unwrap_or_default()
    }

    /// The pair for `stat` if it was present in the source text.
    pub fn lookup(&self, stat: Stat) -> Option<&StatPair> {
        self.pairs[stat as usize].as_ref()
    }

    /// Negative and non-finite values in `pair` are stored as zero.
    pub fn set(&mut self, stat: Stat, pair: StatPair) {
        self.pairs[stat as usize] = Some(StatPair::new(pair.home, pair.away));
    }

    pub fn with(mut self, stat: Stat, pair: StatPair) -> Self {
        self.set(stat, pair);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, StatPair)> + '_ {
        Stat::iter().map(|stat| (stat, self.get(stat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
55%
Posse de bola
45%
12 Chutes 7
5 Chutes no alvo 2
7 Chutes para fora 5
48 Ataques perigosos 31
6 Escanteios 3
0 Penalidades 1
2 Cartões amarelos 3
0 Cartões vermelhos 0
14 Bolas aéreas vencidas 11
9 Intercepções 12
15 Desarmes 18
412 Passes 356
86,5% Precisão dos passes 81,2%
10 Faltas 13
";

    #[test]
    fn extract_pair_possession() {
        assert_eq!((55.0, 45.0), extract_pair("Posse de bola", "55% Posse de bola 45%"));
    }

    #[test]
    fn extract_pair_missing_label() {
        assert_eq!((0.0, 0.0), extract_pair("Escanteios", "55% Posse de bola 45%"));
        assert_eq!(None, find_pair("Escanteios", "55% Posse de bola 45%"));
    }

    #[test]
    fn extract_pair_across_lines() {
        assert_eq!((55.0, 45.0), extract_pair("Posse de bola", "55%\nPosse de bola\n45%"));
        assert_eq!((55.0, 45.0), extract_pair("Posse de bola", "55%\r\n  Posse de bola  45%"));
    }

    #[test]
    fn extract_pair_case_insensitive() {
        assert_eq!((3.0, 1.0), extract_pair("Escanteios", "3 ESCANTEIOS 1"));
        assert_eq!((2.0, 4.0), extract_pair("Cartões amarelos", "2 CARTÕES AMARELOS 4"));
    }

    #[test]
    fn extract_pair_decimal_comma() {
        assert_eq!((86.5, 81.2), extract_pair("Precisão dos passes", "86,5% Precisão dos passes 81,2%"));
        assert_eq!((1.25, 0.75), extract_pair("xG", "1.25 xG 0.75"));
    }

    #[test]
    fn extract_pair_first_occurrence_only() {
        assert_eq!((4.0, 2.0), extract_pair("Faltas", "4 Faltas 2\n9 Faltas 8"));
    }

    #[test]
    fn extract_pair_does_not_confuse_prefixed_labels() {
        let text = "5 Chutes no alvo 2\n12 Chutes 7";
        assert_eq!((12.0, 7.0), extract_pair("Chutes", text));
        assert_eq!((5.0, 2.0), extract_pair("Chutes no alvo", text));
    }

    #[test]
    fn extract_pair_escapes_label() {
        assert_eq!((0.0, 0.0), extract_pair("Chutes.", "5 ChutesX 2"));
        assert_eq!((5.0, 2.0), extract_pair("Chutes (total)", "5 Chutes (total) 2"));
    }

    #[test]
    fn extract_single_value() {
        assert_eq!(67.0, extract_single("Minuto", "Minuto 67"));
        assert_eq!(1.5, extract_single("xG", "xg: no\nxG 1,5"));
        assert_eq!(0.0, extract_single("Minuto", "nothing here"));
        assert_eq!(None, find_single("Minuto", "nothing here"));
    }

    #[test]
    fn stat_pair_sanitises() {
        assert_eq!(StatPair { home: 0.0, away: 0.0 }, StatPair::new(f64::NAN, f64::INFINITY));
        assert_eq!(StatPair { home: 0.0, away: 2.0 }, StatPair::new(-1.0, 2.0));
    }

    #[test]
    fn parse_full_sample() {
        let stats = MatchStatistics::parse(SAMPLE);
        assert_eq!(StatPair::new(55.0, 45.0), stats.get(Stat::Possession));
        assert_eq!(StatPair::new(12.0, 7.0), stats.get(Stat::Shots));
        assert_eq!(StatPair::new(5.0, 2.0), stats.get(Stat::ShotsOnTarget));
        assert_eq!(StatPair::new(7.0, 5.0), stats.get(Stat::ShotsOffTarget));
        assert_eq!(StatPair::new(48.0, 31.0), stats.get(Stat::DangerousAttacks));
        assert_eq!(StatPair::new(6.0, 3.0), stats.get(Stat::Corners));
        assert_eq!(StatPair::new(0.0, 1.0), stats.get(Stat::Penalties));
        assert_eq!(StatPair::new(2.0, 3.0), stats.get(Stat::YellowCards));
        assert_eq!(StatPair::new(0.0, 0.0), stats.get(Stat::RedCards));
        assert_eq!(StatPair::new(14.0, 11.0), stats.get(Stat::AerialsWon));
        assert_eq!(StatPair::new(9.0, 12.0), stats.get(Stat::Interceptions));
        assert_eq!(StatPair::new(15.0, 18.0), stats.get(Stat::Tackles));
        assert_eq!(StatPair::new(412.0, 356.0), stats.get(Stat::Passes));
        assert_eq!(StatPair::new(86.5, 81.2), stats.get(Stat::PassAccuracy));
        assert_eq!(StatPair::new(10.0, 13.0), stats.get(Stat::Fouls));
        assert!(Stat::iter().all(|stat| stats.lookup(stat).is_some()));
    }

    #[test]
    fn parse_empty_text() {
        let stats = MatchStatistics::parse("");
        assert_eq!(Stat::COUNT, stats.iter().count());
        for (stat, pair) in stats.iter() {
            assert_eq!(StatPair::default(), pair, "{stat:?}");
            assert_eq!(None, stats.lookup(stat));
        }
    }

    #[test]
    fn absent_and_zero_are_distinguishable() {
        let stats = MatchStatistics::parse("0 Cartões vermelhos 0");
        assert_eq!(stats.get(Stat::RedCards), stats.get(Stat::Penalties));
        assert_eq!(Some(&StatPair::default()), stats.lookup(Stat::RedCards));
        assert_eq!(None, stats.lookup(Stat::Penalties));
    }

    #[test]
    fn set_overrides() {
        let stats = MatchStatistics::default().with(Stat::Fouls, StatPair::new(3.0, 4.0));
        assert_eq!(7.0, stats.get(Stat::Fouls).sum());
    }

    #[test]
    fn set_sanitises() {
        let stats = MatchStatistics::default()
            .with(Stat::Fouls, StatPair { home: -3.0, away: f64::NAN })
            .with(Stat::Corners, StatPair { home: f64::INFINITY, away: 2.0 });
        assert_eq!(StatPair::new(0.0, 0.0), stats.get(Stat::Fouls));
        assert_eq!(StatPair::new(0.0, 2.0), stats.get(Stat::Corners));
        assert!(stats.iter().all(|(_, pair)| pair.home >= 0.0 && pair.away.is_finite()));
    }

    #[test]
    fn non_ascii_digits_are_not_numbers() {
        assert_eq!(None, find_pair("Faltas", "\u{663} Faltas 4"));
        assert_eq!((0.0, 0.0), extract_pair("Faltas", "\u{663} Faltas 4"));
        assert_eq!(None, find_single("Minuto", "Minuto \u{663}"));

        let stats = MatchStatistics::parse("\u{663} Faltas 4\n6 Escanteios 3");
        assert_eq!(None, stats.lookup(Stat::Fouls));
        assert_eq!(StatPair::new(6.0, 3.0), stats.get(Stat::Corners));
    }
}
