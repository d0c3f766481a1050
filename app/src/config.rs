//! Command-line options and the resolved application configuration.

use std::time::Duration;

use clap::Parser;
use gridsearch_paths::Algorithm;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "gridsearch")]
#[command(about = "Watch uninformed and heuristic search strategies explore a grid")]
pub struct Cli {
    /// Board width in cells
    #[arg(long, value_name = "CELLS", default_value = "40")]
    pub width: i32,

    /// Board height in cells
    #[arg(long, value_name = "CELLS", default_value = "25")]
    pub height: i32,

    /// Allow diagonal moves
    #[arg(short, long)]
    pub diagonals: bool,

    /// Pause after each visited node, in milliseconds
    #[arg(short, long, value_name = "MS", default_value = "20")]
    pub interval_ms: u64,

    /// Strategy to start with: a slug (dfs, bfs, idfs, greedy, astar) or full name
    #[arg(short, long, default_value = "dfs")]
    pub algorithm: Algorithm,

    /// Scatter random obstacles with this probability per cell (0.0-1.0)
    #[arg(short, long, value_name = "DENSITY", value_parser = parse_density)]
    pub walls: Option<f64>,

    /// Seed for --walls, for reproducible layouts
    #[arg(long, requires = "walls")]
    pub seed: Option<u64>,

    /// Run once without a terminal UI and print the result
    #[arg(long)]
    pub headless: bool,

    /// List the available strategies and exit
    #[arg(long)]
    pub list: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("{d} is not between 0.0 and 1.0"))
    }
}

/// What the binary should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Headless,
    List,
}

/// Resolved settings shared by every mode.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub width: i32,
    pub height: i32,
    pub diagonals: bool,
    pub interval: Duration,
    pub algorithm: Algorithm,
    pub walls: Option<f64>,
    pub seed: Option<u64>,
    pub mode: Mode,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 25,
            diagonals: false,
            interval: Duration::from_millis(20),
            algorithm: Algorithm::default(),
            walls: None,
            seed: None,
            mode: Mode::Interactive,
            log_level: LevelFilter::Info,
        }
    }
}

impl From<Cli> for AppConfig {
    fn from(cli: Cli) -> Self {
        let mode = if cli.list {
            Mode::List
        } else if cli.headless {
            Mode::Headless
        } else {
            Mode::Interactive
        };
        Self {
            width: cli.width,
            height: cli.height,
            diagonals: cli.diagonals,
            interval: Duration::from_millis(cli.interval_ms),
            algorithm: cli.algorithm,
            walls: cli.walls,
            seed: cli.seed,
            mode,
            log_level: cli.log_level,
        }
    }
}
