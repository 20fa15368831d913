//! CLI command implementations

pub mod board;
pub mod config;
pub mod milestones;
pub mod tasks;
