//! Gomoku decision engine: threat-space search guiding Monte Carlo tree search
//!
//! Freestyle Gomoku on any board up to 255x255:
//! - Alternating stone placement, Black first
//! - Five or more in a row wins in any of four orientations
//! - A full board without a winner is a draw
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board, game state and scoped hypothetical placements
//! - [`rules`]: Win detection, full scan and incremental
//! - [`eval`]: Line pattern catalogue and matcher
//! - [`search`]: Threat-space search, move policies and the MCTS tree
//! - [`engine`]: MCTS driver integrating all components
//! - [`config`], [`timer`], [`error`]: search settings, budget, failures
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{MctsEngine, SearchConfig, State};
//!
//! // Small budget for the doc test
//! let config = SearchConfig::default().with_iterations(30).with_seed(3);
//! let mut engine = MctsEngine::new(config).unwrap();
//!
//! let state = State::from_rows(
//!     &[
//!         ".........",
//!         ".oooo....",
//!         ".xxx.....",
//!         ".........",
//!         ".........",
//!         ".........",
//!         ".........",
//!         ".........",
//!         ".........",
//!     ],
//!     gomoku::Stone::Black,
//! )
//! .unwrap();
//!
//! let outcome = engine.run(&state).unwrap();
//! println!("Engine plays {}", outcome.best_move);
//! assert!(outcome.best_move == gomoku::Pos::new(1, 0) || outcome.best_move == gomoku::Pos::new(1, 5));
//! ```
//!
//! # Move Priority
//!
//! Tree expansion and playouts draw candidates from the policy, which tries:
//! 1. Own immediate five
//! 2. Blocking the opponent's five
//! 3. Own forced win, if no slower than the opponent's
//! 4. The critical squares of the opponent's forced wins
//! 5. Raw threats, then center, twos and random cells

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod timer;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, State, Stone, DEFAULT_SIZE};
pub use config::SearchConfig;
pub use engine::{run, MctsEngine, SearchOutcome};
pub use error::{EngineError, Result};
pub use rules::{check_win, GameResult, WinTracker};
pub use timer::Timer;
