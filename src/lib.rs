//! Veila - client for an order's milestones and tasks
//!
//! This library provides the core functionality for the veila CLI, including:
//! - Schema definitions for milestones, tasks, paging and config
//! - Domain logic for status transitions and due-date ordering
//! - An HTTP client for the marketplace API behind the `MilestoneApi` trait
//! - Workflow surfaces (due-date editing, task creation and editing, status changes)
//! - A terminal board of an order's milestones

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod schemas;
pub mod tui;
pub mod workflow;

// Re-export commonly used types
pub use api::{HttpMilestoneApi, MilestoneApi};
pub use errors::{Result, VeilaError};
pub use schemas::{Config, Milestone, ProgressStatus, Task};
