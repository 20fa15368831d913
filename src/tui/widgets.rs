//! TUI widget rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::schemas::ProgressStatus;
use crate::tui::state::BoardState;
use crate::workflow::{MilestoneEntry, MilestoneListView, NoticeKind, SKELETON_ROWS};

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;

pub const EMPTY_MESSAGE: &str = "No milestones yet";

/// Render the whole board: header, milestone pane and footer
pub fn render_board(f: &mut Frame, state: &BoardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(f.area());

    render_header(f, chunks[0], state);
    render_milestones_pane(f, chunks[1], state);
    render_footer(f, chunks[2], state);
}

/// Render the header section (3 lines)
pub fn render_header(f: &mut Frame, area: Rect, state: &BoardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let border_width = area.width as usize;
    let title = Line::from(vec![
        Span::styled("┌─ Veila ", Style::default().fg(Color::Cyan)),
        Span::styled(
            "─".repeat(border_width.saturating_sub(10)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("┐", Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(
        Paragraph::new(Text::from(title)).alignment(Alignment::Left),
        chunks[0],
    );

    let summary = if state.is_loading() {
        format!("Order {} | loading...", state.order_id)
    } else {
        let (done, total) = state.completed_count();
        format!(
            "Order {} | {}/{} milestones complete | Today: {}",
            state.order_id, done, total, state.today
        )
    };
    f.render_widget(Paragraph::new(Text::from(boxed_line(&summary, border_width))), chunks[1]);

    f.render_widget(Paragraph::new(Text::from(separator(border_width))), chunks[2]);
}

/// Render the milestone list with nested tasks
pub fn render_milestones_pane(f: &mut Frame, area: Rect, state: &BoardState) {
    let block = Block::default()
        .borders(Borders::LEFT | Borders::RIGHT)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = match &state.view {
        MilestoneListView::Loading => skeleton_items(area.width as usize),
        MilestoneListView::Empty => vec![ListItem::new(Line::from(Span::styled(
            EMPTY_MESSAGE,
            Style::default().fg(Color::DarkGray),
        )))],
        MilestoneListView::Loaded(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| milestone_item(entry, state, i == state.selected))
            .collect(),
    };

    f.render_widget(List::new(items).block(block), area);
}

/// Render the footer section (3 lines): notice and keyboard shortcuts
pub fn render_footer(f: &mut Frame, area: Rect, state: &BoardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let border_width = area.width as usize;
    f.render_widget(Paragraph::new(Text::from(separator(border_width))), chunks[0]);

    let (notice_text, notice_style) = match &state.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            };
            (notice.message.clone(), Style::default().fg(color))
        }
        None => (String::new(), Style::default()),
    };
    let notice_line = Line::from(vec![
        Span::styled("│ ", Style::default().fg(Color::Cyan)),
        Span::styled(
            pad_to_width(&notice_text, border_width.saturating_sub(4)),
            notice_style,
        ),
        Span::styled(" │", Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(Text::from(notice_line)), chunks[1]);

    let keys = "[r] refresh  [j/k] select  [q] quit";
    f.render_widget(Paragraph::new(Text::from(boxed_line(keys, border_width))), chunks[2]);
}

// ===== HELPER FUNCTIONS =====

fn milestone_item<'a>(entry: &MilestoneEntry, state: &BoardState, selected: bool) -> ListItem<'a> {
    let milestone = &entry.milestone;
    let color = status_color(milestone.status);
    let (done, total) = entry.progress();

    let marker = if selected { "▶ " } else { "  " };
    let mut title_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if selected {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }

    let mut lines = vec![Line::from(vec![
        Span::raw(marker),
        Span::styled(
            format!("{} {}. {}", status_icon(milestone.status), milestone.index, milestone.title),
            title_style,
        ),
        Span::raw("  "),
        due_span(milestone.due_day(), milestone.status, state),
        Span::styled(
            format!("  {} ({}/{} tasks)", milestone.status, done, total),
            Style::default().fg(color),
        ),
    ])];

    if !milestone.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("     {}", milestone.description),
            Style::default().fg(Color::Gray),
        )));
    }

    for task in &entry.tasks {
        lines.push(Line::from(vec![
            Span::raw("       "),
            Span::styled(
                format!("{} {}", status_icon(task.status), task.title),
                Style::default().fg(status_color(task.status)),
            ),
            Span::raw("  "),
            due_span(task.due_day(), task.status, state),
        ]));
    }

    ListItem::new(Text::from(lines))
}

/// Due date, in red once it has passed on an item that is still open
fn due_span<'a>(due: chrono::NaiveDate, status: ProgressStatus, state: &BoardState) -> Span<'a> {
    let overdue = due < state.today && !crate::domain::is_terminal_status(status);
    let style = if overdue {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("due {}", due.format("%Y-%m-%d")), style)
}

fn skeleton_items<'a>(width: usize) -> Vec<ListItem<'a>> {
    let bar = width.saturating_sub(6).min(40);
    (0..SKELETON_ROWS)
        .map(|_| {
            ListItem::new(Line::from(Span::styled(
                format!("  {}", "░".repeat(bar)),
                Style::default().fg(Color::DarkGray),
            )))
        })
        .collect()
}

/// Get status icon
pub fn status_icon(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::Pending => "○",
        ProgressStatus::InProgress => "→",
        ProgressStatus::Completed => "✓",
        ProgressStatus::Cancelled => "✗",
    }
}

/// Get status color
pub fn status_color(status: ProgressStatus) -> Color {
    match status {
        ProgressStatus::Pending => Color::White,
        ProgressStatus::InProgress => Color::Yellow,
        ProgressStatus::Completed => Color::Green,
        ProgressStatus::Cancelled => Color::DarkGray,
    }
}

fn boxed_line<'a>(text: &str, border_width: usize) -> Line<'a> {
    Line::from(vec![
        Span::styled("│ ", Style::default().fg(Color::Cyan)),
        Span::raw(pad_to_width(text, border_width.saturating_sub(4))),
        Span::styled(" │", Style::default().fg(Color::Cyan)),
    ])
}

fn separator<'a>(border_width: usize) -> Line<'a> {
    Line::from(vec![
        Span::styled("├", Style::default().fg(Color::Cyan)),
        Span::styled(
            "─".repeat(border_width.saturating_sub(2)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled("┤", Style::default().fg(Color::Cyan)),
    ])
}

/// Pad string to width (truncate with ellipsis if too long)
pub fn pad_to_width(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    } else {
        format!("{:<width$}", text, width = width)
    }
}
