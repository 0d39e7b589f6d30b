//! Main MCTS engine driving the threat-aware policy
//!
//! Each iteration runs the four MCTS phases on one thread:
//!
//! 1. **Select**: descend by UCB1 to a node that still has candidates, or to
//!    a terminal node
//! 2. **Expand**: add the node's next policy candidate as a child
//! 3. **Simulate**: play a rapid-policy playout from the new child
//! 4. **Backpropagate**: credit the playout result up to the root
//!
//! The loop stops when the time or iteration budget is spent, checked between
//! iterations, and the most visited root child is played.
//!
//! # Example
//!
//! ```
//! use gomoku::{MctsEngine, SearchConfig, State};
//!
//! let config = SearchConfig::default().with_iterations(20).with_seed(1);
//! let mut engine = MctsEngine::new(config).unwrap();
//!
//! let root = State::initial(15, 15).unwrap();
//! let outcome = engine.run(&root).unwrap();
//! println!("Best move: {}", outcome.best_move);
//! println!("Iterations: {}", outcome.iterations);
//! assert_eq!(root.diff(&outcome.state), Some(outcome.best_move));
//! ```

use std::time::Duration;

use tracing::{debug, info};

use crate::board::{Pos, State};
use crate::config::SearchConfig;
use crate::error::{EngineError, Result};
use crate::rules::check_win;
use crate::search::{ChildStats, NodeId, Playout, Policy, Tree};
use crate::timer::Timer;

/// Result of one search with statistics.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Root state with the chosen move applied
    pub state: State,
    /// The chosen move
    pub best_move: Pos,
    /// Completed iterations
    pub iterations: u32,
    /// Wall-clock time spent
    pub elapsed: Duration,
    /// Visits credited to the root
    pub root_visits: u32,
    /// Nodes allocated in the tree
    pub tree_size: usize,
    /// Gain squares examined by threat searches during this run
    pub tss_nodes: u64,
    /// Per-move statistics of the root's children
    pub children: Vec<ChildStats>,
}

impl SearchOutcome {
    /// Time taken in milliseconds
    #[inline]
    pub fn time_ms(&self) -> u64 {
        self.elapsed.as_millis() as u64
    }
}

/// MCTS engine owning its policy and random source across moves.
///
/// Trees are built fresh for every call to [`MctsEngine::run`].
#[derive(Debug)]
pub struct MctsEngine {
    config: SearchConfig,
    policy: Policy,
    playout: Playout,
}

impl MctsEngine {
    /// Engine for a validated `config`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Config`] if `config` fails [`SearchConfig::validate`].
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SearchConfig) -> Self {
        let policy = Policy::new(&config);
        let playout = Playout::new(config.playout_max_moves);
        Self {
            config,
            policy,
            playout,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for the side to move in `root`, if the game is still open
    pub fn get_move(&mut self, root: &State) -> Option<Pos> {
        self.run(root).ok().map(|outcome| outcome.best_move)
    }

    /// Search `root` within the configured budget.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameOver`] if `root` is already won or full, and
    /// [`EngineError::NoCandidates`] if no root child was ever expanded.
    pub fn run(&mut self, root: &State) -> Result<SearchOutcome> {
        let result = check_win(root.board());
        if result.is_decided() {
            return Err(EngineError::GameOver(result));
        }

        let nodes_before = self.policy.tss_nodes();
        let mut tree = Tree::new(root.clone());
        let mut timer = Timer::new(self.config.time_budget(), self.config.max_iterations);
        timer.start();

        while !timer.budget_exceeded() {
            let leaf = tree.select(self.config.exploration);
            let node = tree.expand(leaf, &mut self.policy);
            let payoffs = self.playout.payoffs(&mut self.policy, &tree.get(node).state);
            tree.backpropagate(node, payoffs);
            timer.tick();

            if tree.root().is_terminal() {
                break;
            }
        }

        let best = tree
            .best_child(NodeId::ROOT)
            .ok_or(EngineError::NoCandidates)?;
        let chosen = tree.get(best);
        let best_move = chosen.mv.ok_or(EngineError::NoCandidates)?;

        let outcome = SearchOutcome {
            state: chosen.state.clone(),
            best_move,
            iterations: timer.iterations(),
            elapsed: timer.elapsed(),
            root_visits: tree.root().visits,
            tree_size: tree.len(),
            tss_nodes: self.policy.tss_nodes() - nodes_before,
            children: tree.root_stats(),
        };

        if self.config.verbose {
            info!(
                side = %root.to_move(),
                mv = %outcome.best_move,
                iterations = outcome.iterations,
                elapsed_ms = outcome.time_ms(),
                root_visits = outcome.root_visits,
                tree_size = outcome.tree_size,
                "search finished"
            );
        } else {
            debug!(
                side = %root.to_move(),
                mv = %outcome.best_move,
                iterations = outcome.iterations,
                elapsed_ms = outcome.time_ms(),
                root_visits = outcome.root_visits,
                tree_size = outcome.tree_size,
                "search finished"
            );
        }
        for child in &outcome.children {
            debug!(mv = %child.mv, visits = child.visits, mean = child.mean_payoff, "root child");
        }

        Ok(outcome)
    }
}

impl Default for MctsEngine {
    fn default() -> Self {
        Self::with_valid_config(SearchConfig::default())
    }
}

/// Search `root` once and return the chosen successor state.
///
/// The move played is `root.diff(&chosen)`. Other settings keep their
/// defaults, and the random source is seeded from OS entropy.
///
/// # Errors
///
/// [`EngineError::Config`] for a negative or non-finite exploration constant
/// or a zero iteration budget, plus the errors of [`MctsEngine::run`].
pub fn run(
    root: &State,
    time_budget: Duration,
    iteration_budget: u32,
    exploration: f64,
) -> Result<State> {
    let config = SearchConfig::default()
        .with_time_budget(time_budget)
        .with_iterations(iteration_budget)
        .with_exploration(exploration);
    Ok(MctsEngine::new(config)?.run(root)?.state)
}
