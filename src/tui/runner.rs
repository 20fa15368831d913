//! TUI runner - manages TUI lifecycle, fetching and rendering

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::api::MilestoneApi;
use crate::errors::{Result, VeilaError};
use crate::tui::state::BoardState;
use crate::tui::widgets;
use crate::workflow::{load_milestone_board, MilestoneEntry};

/// Results delivered from background fetches
#[derive(Debug)]
pub enum BoardUpdate {
    Loaded(Result<Vec<MilestoneEntry>>),
}

/// What a key press asks the runner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Refresh,
    Quit,
}

/// Main TUI runner for the milestone board
pub struct BoardRunner {
    api: Arc<dyn MilestoneApi>,
    state: BoardState,
    page_size: u32,
    update_tx: mpsc::UnboundedSender<BoardUpdate>,
    update_rx: mpsc::UnboundedReceiver<BoardUpdate>,
}

impl BoardRunner {
    /// Create a new board runner; nothing is fetched until [`BoardRunner::refresh`] or `run`
    pub fn new(
        api: Arc<dyn MilestoneApi>,
        order_id: impl Into<String>,
        today: NaiveDate,
        page_size: u32,
    ) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: BoardState::new(order_id, today),
            page_size,
            update_tx,
            update_rx,
        }
    }

    /// Get current state (for rendering)
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// Start a background fetch of the board; the result arrives as a [`BoardUpdate`]
    pub fn refresh(&mut self) {
        self.state = self.state.clone().with_loading();

        let api = Arc::clone(&self.api);
        let order_id = self.state.order_id.clone();
        let page_size = self.page_size;
        let tx = self.update_tx.clone();
        tokio::spawn(async move {
            let result = load_milestone_board(api.as_ref(), &order_id, page_size).await;
            // Receiver is gone once the board has quit
            let _ = tx.send(BoardUpdate::Loaded(result));
        });
    }

    /// Apply one update to the state
    pub fn apply(&mut self, update: BoardUpdate) {
        match update {
            BoardUpdate::Loaded(Ok(entries)) => {
                self.state = self.state.clone().with_entries(entries);
            }
            BoardUpdate::Loaded(Err(e)) => {
                self.state = self.state.clone().with_error(&e);
            }
        }
    }

    /// Wait for the next update and apply it
    pub async fn wait_for_update(&mut self) -> bool {
        match self.update_rx.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    fn drain_updates(&mut self) {
        while let Ok(update) = self.update_rx.try_recv() {
            self.apply(update);
        }
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyOutcome::Quit,
            KeyCode::Char('r') if !self.state.is_loading() => KeyOutcome::Refresh,
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select_next();
                KeyOutcome::Continue
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select_previous();
                KeyOutcome::Continue
            }
            _ => KeyOutcome::Continue,
        }
    }

    /// Run the TUI until the user quits
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().map_err(|e| VeilaError::wrap(e, "Failed to set up the terminal"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, DisableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_tui_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_tui_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<()> {
        self.refresh();

        loop {
            self.drain_updates();

            terminal.draw(|f| widgets::render_board(f, &self.state))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match self.handle_key(key) {
                        KeyOutcome::Quit => return Ok(()),
                        KeyOutcome::Refresh => self.refresh(),
                        KeyOutcome::Continue => {}
                    }
                }
            }

            // Let the fetch task make progress between polls
            tokio::task::yield_now().await;
        }
    }
}
