//! Game rules for freestyle Gomoku
//!
//! - Win conditions (5 or more in a row, draw on a full board)
//! - Incremental win tracking for playouts

pub mod connectivity;
pub mod win;

// Re-exports for convenient access
pub use connectivity::WinTracker;
pub use win::{check_win, has_five_at_pos, GameResult, WIN_LENGTH};
