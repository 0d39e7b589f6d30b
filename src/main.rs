//! Gomoku MCTS command line
//!
//! - `selfplay`: the engine plays both sides and prints every position
//! - `move`: prints the engine's reply for a position given as text rows
//!   (`o` = black, `x` = white, `.` = empty)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use gomoku::{check_win, MctsEngine, SearchConfig, State, Stone, DEFAULT_SIZE};

#[derive(Parser, Debug)]
#[command(name = "gomoku-mcts", version, about = "Threat-guided MCTS Gomoku engine")]
struct Cli {
    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// TOML file with search settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Iteration budget per move
    #[arg(long, global = true)]
    iterations: Option<u32>,

    /// Time budget per move in milliseconds
    #[arg(long = "time-ms", global = true)]
    time_ms: Option<u64>,

    /// UCB1 exploration constant
    #[arg(long, global = true)]
    explore: Option<f64>,

    /// Seed for reproducible searches
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

impl SearchArgs {
    /// Defaults, then the config file and environment, then flags
    fn to_config(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => SearchConfig::default().with_env_overrides(),
        };
        if let Some(iterations) = self.iterations {
            config.max_iterations = iterations;
        }
        if let Some(ms) = self.time_ms {
            config.max_duration_ms = ms;
        }
        if let Some(explore) = self.explore {
            config.exploration = explore;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Let the engine play against itself
    Selfplay {
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        height: usize,
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        width: usize,
    },
    /// Print the engine's move for a position
    Move {
        /// Side to move
        #[arg(long, value_enum)]
        turn: Turn,
        /// Board rows, top to bottom
        #[arg(required = true)]
        rows: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Turn {
    Black,
    White,
}

impl From<Turn> for Stone {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Black => Stone::Black,
            Turn::White => Stone::White,
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn selfplay(mut engine: MctsEngine, height: usize, width: usize) -> Result<()> {
    let mut state = State::initial(height, width)?;
    println!("{state}");

    loop {
        let result = check_win(state.board());
        if result.is_decided() {
            println!("{result}");
            return Ok(());
        }

        let outcome = engine.run(&state)?;
        println!(
            "{} plays {} ({} iterations, {} ms)",
            state.to_move(),
            outcome.best_move,
            outcome.iterations,
            outcome.time_ms()
        );
        state = outcome.state;
        println!("{state}");
    }
}

fn suggest(mut engine: MctsEngine, rows: &[String], turn: Turn) -> Result<()> {
    let state = State::from_rows(rows, turn.into()).context("parsing board rows")?;
    let outcome = engine.run(&state)?;
    info!(
        iterations = outcome.iterations,
        elapsed_ms = outcome.time_ms(),
        "move found"
    );
    println!("{} {}", outcome.best_move.row, outcome.best_move.col);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.search.log_level)?;

    let config = cli.search.to_config()?;
    info!(?config, "search configured");
    let engine = MctsEngine::new(config)?;

    match cli.command {
        Command::Selfplay { height, width } => selfplay(engine, height, width),
        Command::Move { turn, rows } => suggest(engine, &rows, turn),
    }
}
