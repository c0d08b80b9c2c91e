//! In-play football market probabilities from pasted match statistics.
//! Extracts labelled statistics from free-form text, derives Poisson intensities for goals,
//! corners and cards, and prices match outcome, totals, both-teams-to-score and Asian handicap
//! markets as percentages.

pub mod config;
pub mod domain;
pub mod engine;
pub mod factorial;
pub mod file;
pub mod input;
pub mod intensity;
pub mod poisson;
pub mod print;
pub mod probs;
pub mod stats;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
