//! Domain logic for status transitions and due date ordering

mod states;
mod transitions;
mod validation;


pub use states::{
    available_actions, get_allowed_next_statuses, is_terminal_status, StatusAction,
};
pub use transitions::{apply_status_action, Tracked, TransitionResult};
pub use validation::{
    can_edit_task, is_chronological, is_in_past, validate_milestone_due_date,
    validate_new_task_due_date, validate_status_transition, validate_task_due_date_edit,
    validate_task_title, ValidationResult, FIELD_DUE_DATE, FIELD_FORM, FIELD_STATUS, FIELD_TITLE,
};
