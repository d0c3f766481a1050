//! gridsearch: watch search strategies explore a grid in the terminal.

mod app;
mod config;
mod logger;
mod model;
mod worker;

use std::error::Error;
use std::sync::mpsc::{Receiver, Sender};

use clap::Parser;
use gridsearch_core::Context;
use gridsearch_crossterm::CrosstermDriver;
use gridsearch_paths::{Board, registry};
use log::LevelFilter;
use rand::SeedableRng;
use rand::rngs::StdRng;

use app::App;
use config::{AppConfig, Cli, Mode};
use logger::{Logger, Sink};
use model::{Editor, Msg};

/// Build the starting board: empty, or with scattered walls.
fn build_board(cfg: &AppConfig) -> Result<Board, Box<dyn Error>> {
    let mut board = Board::new(cfg.width, cfg.height)?.with_diagonals(cfg.diagonals);
    if let Some(density) = cfg.walls {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let n = board.scatter_obstacles(density, &mut rng);
        log::debug!("scattered {n} obstacles at density {density}");
    }
    Ok(board)
}

fn list() {
    for (name, algo) in registry() {
        println!("{:<8} {name}", algo.slug());
    }
}

fn headless(cfg: &AppConfig) -> Result<(), Box<dyn Error>> {
    Logger::new(cfg.log_level, Sink::Stderr).install()?;
    let mut board = build_board(cfg)?;
    let outcome = cfg.algorithm.run_with(&mut board, &Context::new())?;
    println!("{board}");
    println!();
    println!("algorithm: {}", cfg.algorithm);
    println!("outcome:   {outcome:?}");
    match board.path() {
        Some(path) => println!("path:      {} steps", path.len() - 1),
        None => println!("path:      none"),
    }
    println!("visited:   {}", board.visited_count());
    Ok(())
}

/// Route log records into a fresh app channel so that messages logged
/// before the loop starts still reach the message log.
fn channel_logger(level: LevelFilter) -> Result<(Sender<Msg>, Receiver<Msg>), Box<dyn Error>> {
    let (tx, rx) = app::channel();
    Logger::new(level, Sink::Channel(tx.clone())).install()?;
    Ok((tx, rx))
}

fn interactive(cfg: &AppConfig) -> Result<(), Box<dyn Error>> {
    let channel = channel_logger(cfg.log_level)?;
    let board = build_board(cfg)?;
    let editor = Editor::new(board, cfg.algorithm, cfg.interval);
    let (width, height) = editor.size();
    let (cols, rows) = CrosstermDriver::size()?;
    if width > cols || height > rows {
        return Err(format!(
            "the terminal is {cols}x{rows} but the board needs {width}x{height}; try a smaller --width/--height"
        )
        .into());
    }

    App::new(editor, CrosstermDriver::new(), (width, height), channel).run()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cfg = AppConfig::from(Cli::parse());
    match cfg.mode {
        Mode::List => {
            list();
            Ok(())
        }
        Mode::Headless => headless(&cfg),
        Mode::Interactive => interactive(&cfg),
    }
}
