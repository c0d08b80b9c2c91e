//! The raw form fields of one calculation request.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{Score, Teams};

static LEADING_NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").ok()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    pub teams: Teams,
    pub minute: f64,
    pub score: Score,
    pub stats_text: String,
}
impl RawInput {
    /// A non-finite or negative `minute` reads as zero.
    pub fn new(teams: Teams, minute: f64, score: Score, stats_text: impl Into<String>) -> Self {
        Self {
            teams,
            minute: non_negative(minute),
            score,
            stats_text: stats_text.into(),
        }
    }

    /// Builds the input from unvalidated form strings. Numeric fields are read from their
    /// leading number (`"45min"` is 45); anything else reads as zero. Goals are truncated to
    /// whole numbers.
    pub fn from_fields(
        home_name: &str,
        away_name: &str,
        minute: &str,
        home_goals: &str,
        away_goals: &str,
        stats_text: impl Into<String>,
    ) -> Self {
        Self::new(
            Teams::new(home_name, away_name),
            parse_field(minute),
            Score::new(parse_goals(home_goals), parse_goals(away_goals)),
            stats_text,
        )
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// The leading number of `field`, or zero.
pub fn parse_field(field: &str) -> f64 {
    LEADING_NUMBER
        .as_ref()
        .and_then(|regex| regex.find(field))
        .and_then(|found| found.as_str().trim().parse::<f64>().ok())
        .map(non_negative)
        .unwrap_or(0.0)
}

fn parse_goals(field: &str) -> u8 {
    // float-to-int casts saturate
    parse_field(field).trunc() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numeric_fields() {
        assert_eq!(45.0, parse_field("45"));
        assert_eq!(45.5, parse_field(" 45.5 "));
        assert_eq!(45.0, parse_field("45min"));
        assert_eq!(0.5, parse_field(".5"));
        assert_eq!(120.0, parse_field("1.2e2"));
        assert_eq!(3.0, parse_field("+3"));
        assert_eq!(0.0, parse_field("-10"));
        assert_eq!(0.0, parse_field(""));
        assert_eq!(0.0, parse_field("abc"));
        assert_eq!(0.0, parse_field("1e999"));
    }

    #[test]
    fn goals_are_whole() {
        assert_eq!(2, parse_goals("2.9"));
        assert_eq!(0, parse_goals("x"));
        assert_eq!(255, parse_goals("1000"));
    }

    #[test]
    fn from_fields() {
        let input = RawInput::from_fields("", "Chelsea", "67'", "1", "", "6 Escanteios 3");
        assert_eq!(Teams::new("Time A", "Chelsea"), input.teams);
        assert_eq!(67.0, input.minute);
        assert_eq!(Score::new(1, 0), input.score);
        assert_eq!("6 Escanteios 3", input.stats_text);
    }

    #[test]
    fn new_sanitises_minute() {
        let input = RawInput::new(Teams::default(), f64::NAN, Score::nil_all(), "");
        assert_eq!(0.0, input.minute);
        let input = RawInput::new(Teams::default(), -5.0, Score::nil_all(), "");
        assert_eq!(0.0, input.minute);
    }
}
