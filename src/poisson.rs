use crate::factorial::Factorial;

/// Probability of exactly `k` events given the rate `lambda`.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get(k) as f64
}

/// Probability of at most `max` events, i.e. the cumulative pmf over `0..=max`.
pub fn cumulative(max: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    (0..=max).map(|k| univariate(k, lambda, factorial)).sum()
}

/// Percentage chance of the count staying at or below `max`.
#[inline]
pub fn under(max: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    cumulative(max, lambda, factorial) * 100.0
}

/// Percentage chance of the count exceeding `max`.
#[inline]
pub fn over(max: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    (1.0 - cumulative(max, lambda, factorial)) * 100.0
}
