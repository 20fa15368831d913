//! Unit tests for board state, rendering and key handling

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::api::fake::FakeApi;
    use crate::errors::VeilaError;
    use crate::schemas::{Milestone, ProgressStatus, Task};
    use crate::tui::runner::{BoardRunner, BoardUpdate, KeyOutcome};
    use crate::tui::state::BoardState;
    use crate::tui::widgets::{pad_to_width, render_board, status_icon, EMPTY_MESSAGE};
    use crate::workflow::{MilestoneEntry, NoticeKind, SKELETON_ROWS};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        day(2024, 6, 1)
    }

    fn entry(id: &str, index: u32, title: &str, due: NaiveDate) -> MilestoneEntry {
        MilestoneEntry {
            milestone: Milestone::new(id, "o-1", index, title, due),
            tasks: vec![],
        }
    }

    fn sample_entries() -> Vec<MilestoneEntry> {
        let mut fitting = entry("m-2", 2, "Fitting", day(2024, 6, 20));
        fitting.milestone = fitting
            .milestone
            .with_description("Two fittings at the atelier")
            .with_status(ProgressStatus::InProgress);
        fitting.tasks = vec![
            Task::new("t-1", "m-2", 1, "First fitting", day(2024, 6, 7))
                .with_status(ProgressStatus::Completed),
            Task::new("t-2", "m-2", 2, "Second fitting", day(2024, 6, 14)),
        ];
        let mut deposit = entry("m-1", 1, "Deposit", day(2024, 5, 20));
        deposit.milestone = deposit.milestone.with_status(ProgressStatus::Completed);
        vec![deposit, fitting, entry("m-3", 3, "Delivery", day(2024, 7, 1))]
    }

    fn render(state: &BoardState) -> Buffer {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_board(f, state)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    // ===== STATE =====

    #[test]
    fn test_board_state_starts_loading() {
        let state = BoardState::new("o-1", today());
        assert!(state.is_loading());
        assert_eq!(state.len(), 0);
        assert!(state.notice.is_none());
        assert!(state.selected_entry().is_none());
    }

    #[test]
    fn test_board_state_with_entries() {
        let state = BoardState::new("o-1", today()).with_entries(sample_entries());
        assert!(!state.is_loading());
        assert_eq!(state.len(), 3);
        assert_eq!(state.completed_count(), (1, 3));
        assert_eq!(state.selected_entry().unwrap().milestone.id, "m-1");
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = BoardState::new("o-1", today()).with_entries(sample_entries());
        state.select_previous();
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.select_next();
        }
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut state = BoardState::new("o-1", today()).with_entries(sample_entries());
        state.select_next();
        state.select_next();
        let state = state.with_entries(vec![entry("m-1", 1, "Deposit", day(2024, 6, 2))]);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_with_error_sets_notice() {
        let state = BoardState::new("o-1", today()).with_error(&VeilaError::Remote {
            status: 404,
            message: "Order not found".to_string(),
        });
        let notice = state.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Order not found");
        assert!(!state.is_loading());
    }

    #[test]
    fn test_network_error_shows_generic_notice() {
        let state = BoardState::new("o-1", today())
            .with_error(&VeilaError::Network("connection refused".to_string()));
        assert_eq!(
            state.notice.unwrap().message,
            "Something went wrong. Please try again."
        );
    }

    // ===== RENDERING =====

    #[test]
    fn test_render_loading_shows_skeleton_rows() {
        let text = buffer_text(&render(&BoardState::new("o-1", today())));
        assert!(text.contains("loading..."));
        let skeleton_lines = text.lines().filter(|l| l.contains("░░░░")).count();
        assert_eq!(skeleton_lines, SKELETON_ROWS);
    }

    #[test]
    fn test_render_empty_state() {
        let state = BoardState::new("o-1", today()).with_entries(vec![]);
        let text = buffer_text(&render(&state));
        assert!(text.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_render_milestones_with_nested_tasks() {
        let state = BoardState::new("o-1", today()).with_entries(sample_entries());
        let text = buffer_text(&render(&state));

        assert!(text.contains("1. Deposit"));
        assert!(text.contains("2. Fitting"));
        assert!(text.contains("Two fittings at the atelier"));
        assert!(text.contains("✓ First fitting"));
        assert!(text.contains("○ Second fitting"));
        assert!(text.contains("due 2024-06-20"));
        assert!(text.contains("in progress (1/2 tasks)"));
        assert!(text.contains("1/3 milestones complete"));
        assert!(text.contains("[r] refresh"));

        let deposit = text.find("Deposit").unwrap();
        let fitting = text.find("Fitting").unwrap();
        let delivery = text.find("Delivery").unwrap();
        assert!(deposit < fitting && fitting < delivery);
    }

    #[test]
    fn test_render_error_line() {
        let state = BoardState::new("o-1", today()).with_error(&VeilaError::Remote {
            status: 403,
            message: "Forbidden".to_string(),
        });
        let text = buffer_text(&render(&state));
        assert!(text.contains("Forbidden"));
        assert!(text.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(status_icon(ProgressStatus::Pending), "○");
        assert_eq!(status_icon(ProgressStatus::InProgress), "→");
        assert_eq!(status_icon(ProgressStatus::Completed), "✓");
        assert_eq!(status_icon(ProgressStatus::Cancelled), "✗");
    }

    #[test]
    fn test_pad_to_width_truncates_on_char_boundary() {
        assert_eq!(pad_to_width("abc", 5), "abc  ");
        assert_eq!(pad_to_width("→→→→→→", 4), "→→→…");
    }

    // ===== RUNNER =====

    fn runner_with(api: Arc<FakeApi>) -> BoardRunner {
        BoardRunner::new(api, "o-1", today(), 100)
    }

    #[tokio::test]
    async fn test_refresh_loads_board() {
        let api = Arc::new(FakeApi::new());
        api.add_milestone(Milestone::new("m-1", "o-1", 1, "Deposit", day(2024, 6, 2)));
        api.add_task(Task::new("t-1", "m-1", 1, "Measure", day(2024, 6, 2)));

        let mut runner = runner_with(api);
        runner.refresh();
        assert!(runner.state().is_loading());

        assert!(runner.wait_for_update().await);
        assert_eq!(runner.state().len(), 1);
        assert_eq!(runner.state().view.entries()[0].tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_goes_to_notice() {
        let api = Arc::new(FakeApi::new());
        api.reject("list_milestones", 404, "Order not found");

        let mut runner = runner_with(api);
        runner.refresh();
        runner.wait_for_update().await;

        assert_eq!(runner.state().notice.as_ref().unwrap().message, "Order not found");
    }

    #[tokio::test]
    async fn test_key_handling() {
        let api = Arc::new(FakeApi::new());
        let mut runner = runner_with(api);
        runner.apply(BoardUpdate::Loaded(Ok(sample_entries())));

        assert_eq!(runner.handle_key(key(KeyCode::Char('j'))), KeyOutcome::Continue);
        assert_eq!(runner.state().selected, 1);
        assert_eq!(runner.handle_key(key(KeyCode::Up)), KeyOutcome::Continue);
        assert_eq!(runner.state().selected, 0);
        assert_eq!(runner.handle_key(key(KeyCode::Char('r'))), KeyOutcome::Refresh);
        assert_eq!(runner.handle_key(key(KeyCode::Char('q'))), KeyOutcome::Quit);
        assert_eq!(
            runner.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyOutcome::Quit
        );
    }

    #[tokio::test]
    async fn test_refresh_ignored_while_loading() {
        let api = Arc::new(FakeApi::new());
        let mut runner = runner_with(api);
        assert!(runner.state().is_loading());
        assert_eq!(runner.handle_key(key(KeyCode::Char('r'))), KeyOutcome::Continue);
    }
}
