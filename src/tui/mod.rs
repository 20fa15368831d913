//! Terminal User Interface (TUI) module
//!
//! Board view of an order's milestones and their tasks.

pub mod runner;
pub mod state;
pub mod widgets;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use runner::{BoardRunner, BoardUpdate, KeyOutcome};
pub use state::BoardState;
