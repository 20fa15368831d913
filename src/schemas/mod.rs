//! Schema types for veila
//!
//! Field names follow the camelCase JSON the marketplace API speaks.

mod config;
pub mod dates;
mod milestone;
mod page;
mod status;
mod task;

pub use config::Config;
pub use milestone::{previous_milestone, Milestone};
pub use page::{Page, PageRequest, Pagination, Sort, SortDirection};
pub use status::ProgressStatus;
pub use task::{sort_by_index, NewTask, Task, TaskPatch};

use serde::{Deserialize, Deserializer};

/// Read an optional text field, treating `null` like a missing value
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
