use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use inplay::config::ModelConfig;
use inplay::domain::{Score, Teams};
use inplay::engine::ProbabilityEngine;
use inplay::input::RawInput;
use inplay::{file, print};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// name of the home team
    #[clap(long, default_value = "")]
    home: String,

    /// name of the away team
    #[clap(long, default_value = "")]
    away: String,

    /// elapsed match minute
    #[clap(short = 'm', long, default_value_t = 0.0)]
    minute: f64,

    /// goals scored by the home team
    #[clap(long = "home-goals", default_value_t = 0)]
    home_goals: u8,

    /// goals scored by the away team
    #[clap(long = "away-goals", default_value_t = 0)]
    away_goals: u8,

    /// file to source the match statistics from (stdin if omitted)
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// JSON file with model coefficient overrides
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// print the markets as JSON
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if !self.minute.is_finite() || self.minute < 0.0 {
            bail!("the minute must be a non-negative number");
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.config {
        None => ModelConfig::default(),
        Some(path) => ModelConfig::load(path)?,
    };
    debug!("config: {config:?}");

    let stats_text = file::read_text(args.file.as_deref())?;
    let input = RawInput::new(
        Teams::new(args.home.as_str(), args.away.as_str()),
        args.minute,
        Score::new(args.home_goals, args.away_goals),
        stats_text,
    );
    info!(
        "{} {}-{} {} at {}'",
        input.teams.home, input.score.home, input.score.away, input.teams.away, input.minute
    );

    let probs = ProbabilityEngine::new(config).calculate(&input);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&probs.entries())?);
    } else {
        let table = print::tabulate(&print::categorise(&probs));
        println!("{}", Console::default().render(&table));
    }
    Ok(())
}
