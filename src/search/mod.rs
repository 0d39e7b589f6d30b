//! Search module for the Gomoku decision engine
//!
//! Contains:
//! - Threat-space search for forced winning sequences
//! - Threat-driven move policies
//! - MCTS tree, nodes and playouts

pub mod node;
pub mod playout;
pub mod policy;
pub mod threat;
pub mod tree;

pub use node::{Node, NodeId, NodeStatus};
pub use playout::Playout;
pub use policy::{Candidates, ExpansionStrategy, MoveSource, Policy};
pub use threat::{sort_threats, Threat, ThreatScan, ThreatSearcher};
pub use tree::{ChildStats, Tree};
