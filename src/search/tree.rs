//! MCTS tree with arena allocation
//!
//! Nodes are stored in one `Vec` and referenced by [`NodeId`]. The root is
//! always `NodeId::ROOT`. A tree lives for one search and is dropped with it.

use tracing::trace;

use super::node::{Node, NodeId, NodeStatus};
use super::policy::{ExpansionStrategy, Policy};
use crate::board::{Pos, State};
use crate::rules::{check_win, has_five_at_pos};

/// Visit statistics of one root child
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub mv: Pos,
    pub visits: u32,
    pub mean_payoff: f64,
}

/// Search tree owning every node of one run.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Tree holding only `root`, marked terminal if the position is decided
    pub fn new(root: State) -> Self {
        let decided = check_win(root.board()).is_decided();
        let mut node = Node::root(root);
        if decided {
            node.status = NodeStatus::Terminal;
        }
        Self { nodes: vec![node] }
    }

    #[inline]
    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Add a node to the arena and link it under its parent
    pub fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = node.parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.get_mut(parent).children.push(id);
        }
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Descend by UCB1 through fully expanded nodes.
    ///
    /// Stops at the first node that is terminal or still has candidates to
    /// expand. A terminal best child is returned as is.
    pub fn select(&self, exploration: f64) -> NodeId {
        let root_visits = self.root().visits;
        let mut id = NodeId::ROOT;
        loop {
            let node = self.get(id);
            if node.status != NodeStatus::Expanded {
                return id;
            }
            match self.best_ucb_child(id, root_visits, exploration) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Materialise the next untried candidate of `id` as a child.
    ///
    /// Candidates are generated on the first call. A node for which the
    /// policy has none becomes terminal and is returned itself, as is any
    /// node that is already terminal or fully expanded.
    pub fn expand(&mut self, id: NodeId, policy: &mut Policy) -> NodeId {
        match self.get(id).status {
            NodeStatus::Terminal | NodeStatus::Expanded => return id,
            NodeStatus::Expanding => {}
            NodeStatus::Untried => {
                let state = &self.get(id).state;
                let strategy = ExpansionStrategy::for_state(state);
                let candidates = policy.expand(state, strategy);
                trace!(
                    node = id.0,
                    ?strategy,
                    source = ?candidates.source,
                    count = candidates.len(),
                    "generated candidates"
                );
                let node = self.get_mut(id);
                if candidates.is_empty() {
                    node.status = NodeStatus::Terminal;
                    return id;
                }
                node.untried = candidates.moves;
                node.untried.reverse();
                node.status = NodeStatus::Expanding;
            }
        }

        let node = self.get_mut(id);
        let Some(mv) = node.untried.pop() else {
            node.status = NodeStatus::Expanded;
            return id;
        };
        if node.untried.is_empty() {
            node.status = NodeStatus::Expanded;
        }

        let mover = node.state.to_move();
        let state = node.state.play(mv);
        let terminal = has_five_at_pos(state.board(), mv, mover) || state.board().is_full();
        self.allocate(Node::child(id, mv, state, terminal))
    }

    /// Credit `payoffs` from `from` up to the root. Each node receives the
    /// payoff of the player whose move produced it.
    pub fn backpropagate(&mut self, from: NodeId, payoffs: [f64; 2]) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.payoff += payoffs[node.state.last_mover().index()];
            node.visits += 1;
            current = node.parent;
        }
    }

    /// Child of `id` with the most visits, first one on ties
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u32)> = None;
        for &child in &self.get(id).children {
            let visits = self.get(child).visits;
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((child, visits));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Statistics for every child of the root, in expansion order
    pub fn root_stats(&self) -> Vec<ChildStats> {
        self.root()
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.get(id);
                Some(ChildStats {
                    mv: node.mv?,
                    visits: node.visits,
                    mean_payoff: node.mean_payoff(),
                })
            })
            .collect()
    }

    fn best_ucb_child(&self, id: NodeId, root_visits: u32, exploration: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.get(id).children {
            let score = self.get(child).ucb(root_visits, exploration);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }
}
