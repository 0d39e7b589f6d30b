//! MCTS tree node
//!
//! Nodes live in the [`Tree`](super::tree::Tree) arena and refer to each
//! other by [`NodeId`]. The parent link is only followed upward during
//! backpropagation.

use crate::board::{Pos, State};

/// Substitute for a zero visit count in the UCB1 denominators
pub const UNVISITED_EPSILON: f64 = 1e-6;

/// Index into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Expansion progress of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Candidates not generated yet
    Untried,
    /// Candidates generated, some not yet materialised as children
    Expanding,
    /// Every candidate has a child
    Expanded,
    /// Decided position, or the policy offered no candidates
    Terminal,
}

/// One searched position.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: State,
    /// Move that led here from the parent (`None` at the root)
    pub mv: Option<Pos>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Candidates still to expand, highest priority last
    pub untried: Vec<Pos>,
    /// Sum of payoffs credited to the player who moved into this node
    pub payoff: f64,
    pub visits: u32,
    pub status: NodeStatus,
}

impl Node {
    pub fn root(state: State) -> Self {
        Self {
            state,
            mv: None,
            parent: None,
            children: Vec::new(),
            untried: Vec::new(),
            payoff: 0.0,
            visits: 0,
            status: NodeStatus::Untried,
        }
    }

    pub fn child(parent: NodeId, mv: Pos, state: State, terminal: bool) -> Self {
        Self {
            state,
            mv: Some(mv),
            parent: Some(parent),
            children: Vec::new(),
            untried: Vec::new(),
            payoff: 0.0,
            visits: 0,
            status: if terminal {
                NodeStatus::Terminal
            } else {
                NodeStatus::Untried
            },
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status == NodeStatus::Terminal
    }

    /// Average payoff, 0 for an unvisited node
    #[inline]
    pub fn mean_payoff(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.payoff / self.visits as f64
        }
    }

    /// UCB1 score of this node as seen from its parent.
    ///
    /// `payoff/n + k * sqrt(ln(N + 1) / n)` where `N` is the root's visit
    /// count and `n` this node's, with [`UNVISITED_EPSILON`] added to `n`.
    #[inline]
    pub fn ucb(&self, root_visits: u32, exploration: f64) -> f64 {
        let n = self.visits as f64 + UNVISITED_EPSILON;
        let explore = ((root_visits as f64 + 1.0).ln() / n).sqrt();
        self.payoff / n + exploration * explore
    }
}
