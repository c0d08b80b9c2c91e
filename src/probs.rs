//! Utilities for working with probabilities expressed as percentages.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Scales the elements so that they add up to `target`, returning the original sum.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        self.scale(target / sum);
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }
}

/// Confines a percentage to `[0, 100]`, mapping NaN to zero.
#[inline]
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Rounds to one decimal place.
#[inline]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The published form of a percentage: NaN becomes zero, `capped` values are confined to
/// `[0, 100]`, and the result is rounded to one decimal place.
pub fn finalise(value: f64, capped: bool) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    let value = if capped { clamp_percent(value) } else { value };
    round_tenth(value)
}
