//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and the two views (verb table and flash cards) built on Ratatui.

// Allow intentional type casts for terminal coordinates and row offsets
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod component;
pub mod flash_cards;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;
pub mod verb_table;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub use component::{Component, ViewContext, ViewEvent};
pub use flash_cards::FlashCards;
pub use help_overlay::HelpOverlayState;
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use verb_table::VerbTable;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::pagination::{CatalogSource, HttpSource, PageSource};
use crate::services::{StatusLedger, ThemePreference};
use crate::store::{FileStore, KeyValueStore};

/// Which view fills the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Searchable verb table
    Table,
    /// Flash-card carousel
    Cards,
}

/// Application state for the TUI.
pub struct AppState<S: KeyValueStore> {
    /// Full catalog (table view and progress totals)
    pub catalog: Arc<Catalog>,
    /// Learning status, persisted on every change
    pub ledger: StatusLedger<S>,
    /// Persisted light/dark choice
    pub theme_pref: ThemePreference,
    /// Colors for `theme_pref`
    pub theme: Theme,
    /// Active view
    pub view: View,
    /// Verb table view
    pub table: VerbTable,
    /// Flash-card view, created the first time it is shown
    pub cards: Option<FlashCards>,
    /// Help overlay, when open
    pub help: Option<HelpOverlayState>,
    /// Waiting for y/n before resetting every status
    pub confirm_reset: bool,
    /// One-line feedback for the last action
    pub status_message: Option<String>,
    /// Set when the user quits
    pub should_quit: bool,
    card_source: Arc<dyn PageSource>,
    page_size: usize,
}

impl<S: KeyValueStore> AppState<S> {
    /// Creates the application state.
    ///
    /// The theme is resolved from the ledger's store and `config.ui.theme_mode`.
    pub fn new(
        catalog: Arc<Catalog>,
        ledger: StatusLedger<S>,
        config: &Config,
        card_source: Arc<dyn PageSource>,
        view: View,
    ) -> Self {
        let theme_pref = ThemePreference::load(ledger.store(), config.ui.theme_mode);
        let table = VerbTable::new(
            Arc::clone(&catalog),
            config.ui.initial_reveal,
            config.ui.reveal_step,
        );
        let mut state = Self {
            catalog,
            ledger,
            theme_pref,
            theme: Theme::from_preference(theme_pref),
            view: View::Table,
            table,
            cards: None,
            help: None,
            confirm_reset: false,
            status_message: None,
            should_quit: false,
            card_source,
            page_size: config.server.page_size,
        };
        if view == View::Cards {
            state.switch_view();
        }
        state
    }

    /// Key hints for the active view.
    #[must_use]
    pub fn key_hints(&self) -> &'static str {
        if self.help.is_some() {
            return "↑/↓: scroll · ?/Esc: close help";
        }
        if self.confirm_reset {
            return "y: reset every status · any other key: cancel";
        }
        match (self.view, &self.cards) {
            (View::Cards, Some(cards)) => cards.key_hints(),
            _ => self.table.key_hints(),
        }
    }

    /// Handles one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        if let Some(help) = &mut self.help {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => help.scroll_up(),
                KeyCode::Down | KeyCode::Char('j') => help.scroll_down(),
                KeyCode::Esc | KeyCode::Char('?' | 'q') => self.help = None,
                _ => {}
            }
            return false;
        }

        if self.confirm_reset {
            self.confirm_reset = false;
            if matches!(key.code, KeyCode::Char('y' | 'Y')) {
                self.ledger.reset();
                self.status_message = Some("All statuses reset.".to_string());
            } else {
                self.status_message = Some("Reset cancelled.".to_string());
            }
            return false;
        }

        let context = ViewContext {
            ledger: &self.ledger,
            theme: &self.theme,
        };
        let event = match (self.view, &mut self.cards) {
            (View::Cards, Some(cards)) => cards.handle_input(key, &context),
            _ => self.table.handle_input(key, &context),
        };

        if let Some(event) = event {
            self.apply(event);
        }
        self.should_quit
    }

    /// Applies an event emitted by a view.
    pub fn apply(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::CycleStatus(verb) => {
                let status = self.ledger.cycle_status(&verb);
                self.status_message = Some(format!("{verb} → {}", status.display_name()));
            }
            ViewEvent::RequestReset => {
                self.confirm_reset = true;
                self.status_message =
                    Some("Reset the status of every verb? Press y to confirm.".to_string());
            }
            ViewEvent::SwitchView => self.switch_view(),
            ViewEvent::ToggleTheme => {
                self.theme_pref = self.theme_pref.toggled();
                self.theme_pref.save(self.ledger.store_mut());
                self.theme = Theme::from_preference(self.theme_pref);
            }
            ViewEvent::ToggleHelp => {
                self.help = match self.help {
                    Some(_) => None,
                    None => Some(HelpOverlayState::new()),
                };
            }
            ViewEvent::Quit => self.should_quit = true,
        }
    }

    /// Work done once per loop iteration after input: applies finished
    /// page fetches.
    pub fn tick(&mut self) {
        if let Some(cards) = &mut self.cards {
            let context = ViewContext {
                ledger: &self.ledger,
                theme: &self.theme,
            };
            cards.tick(&context);
        }
    }

    /// Work done after each frame is drawn.
    pub fn after_draw(&mut self) {
        self.table.settle();
    }

    fn switch_view(&mut self) {
        self.status_message = None;
        self.view = match self.view {
            View::Table => {
                if self.cards.is_none() {
                    self.cards = Some(FlashCards::new(
                        Arc::clone(&self.card_source),
                        self.page_size,
                    ));
                }
                View::Cards
            }
            View::Cards => View::Table,
        };
    }
}

/// Loads everything the TUI needs and runs it until the user quits.
///
/// `server` selects where flash cards come from: a running `/api/verbs`
/// endpoint, or the local catalog when `None`.
pub fn launch(config: &Config, view: View, server: Option<&str>) -> Result<()> {
    let catalog = Arc::new(
        Catalog::load_or_bundled(config.paths.data_file.as_deref())
            .context("Failed to load verbs")?,
    );
    let ledger = StatusLedger::load(FileStore::open_default()?);

    let card_source: Arc<dyn PageSource> = match server {
        Some(url) => Arc::new(HttpSource::new(url)?),
        None => Arc::new(CatalogSource::new(Arc::clone(&catalog))),
    };

    let mut state = AppState::new(catalog, ledger, config, card_source, view);

    let mut terminal = setup_terminal()?;
    let result = run_tui(&mut state, &mut terminal);
    restore_terminal(terminal)?;
    result
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui<S: KeyValueStore>(
    state: &mut AppState<S>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;
        state.after_draw();

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if state.handle_key(key) {
                        break;
                    }
                }
                // Resize and everything else: re-render on next loop
                _ => {}
            }
        }

        // Pick up finished page fetches
        state.tick();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render<S: KeyValueStore>(f: &mut Frame, state: &AppState<S>) {
    let theme = &state.theme;

    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Status bar
        ])
        .split(f.area());

    let view_name = match state.view {
        View::Table => "Verb table",
        View::Cards => "Flash cards",
    };
    let title = Line::from(vec![
        Span::styled(
            format!(" {APP_NAME} "),
            Style::default()
                .fg(theme.background)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {view_name}"), Style::default().fg(theme.text)),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    let context = ViewContext {
        ledger: &state.ledger,
        theme,
    };
    match (state.view, &state.cards) {
        (View::Cards, Some(cards)) => cards.render(f, chunks[1], &context),
        _ => state.table.render(f, chunks[1], &context),
    }

    StatusBar::render(f, chunks[2], state, theme);

    if let Some(help) = &state.help {
        let area = f.area();
        help.render(f, area, theme);
    }
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeMode;
    use crate::constants::THEME_STORAGE_KEY;
    use crate::models::{Status, VerbRecord, VerbType};
    use crate::store::MemoryStore;
    use ratatui::backend::TestBackend;

    fn state(store: MemoryStore) -> AppState<MemoryStore> {
        let catalog = Arc::new(
            Catalog::from_records(vec![
                VerbRecord::new("go", "went", "gone", "will go", VerbType::Irregular),
                VerbRecord::new("walk", "walked", "walked", "will walk", VerbType::Regular),
            ])
            .unwrap(),
        );
        let mut config = Config::default();
        config.ui.theme_mode = ThemeMode::Light;
        let source = Arc::new(CatalogSource::new(Arc::clone(&catalog)));
        AppState::new(catalog, StatusLedger::load(store), &config, source, View::Table)
    }

    fn press(state: &mut AppState<MemoryStore>, code: KeyCode) -> bool {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_space_cycles_and_persists() {
        let mut app = state(MemoryStore::new());
        assert!(!press(&mut app, KeyCode::Char(' ')));
        assert_eq!(app.ledger.status_of("go"), Status::Learning);
        assert_eq!(app.status_message.as_deref(), Some("go → Learning"));

        let reloaded = StatusLedger::load(app.ledger.store().clone());
        assert_eq!(reloaded.status_of("go"), Status::Learning);
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let mut app = state(MemoryStore::new());
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('R'));
        assert!(app.confirm_reset);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.ledger.status_of("go"), Status::Learning);

        press(&mut app, KeyCode::Char('R'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.ledger.status_of("go"), Status::Unknown);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut app = state(MemoryStore::new());
        assert_eq!(app.theme_pref, ThemePreference::Light);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme_pref, ThemePreference::Dark);
        assert_eq!(app.theme, Theme::dark());
        assert_eq!(
            app.ledger.store().get(THEME_STORAGE_KEY).as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_stored_theme_wins_over_config() {
        let app = state(MemoryStore::with_entry(THEME_STORAGE_KEY, "dark"));
        assert_eq!(app.theme_pref, ThemePreference::Dark);
    }

    #[test]
    fn test_switch_view_creates_cards_once() {
        let mut app = state(MemoryStore::new());
        assert!(app.cards.is_none());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Cards);
        assert!(app.cards.is_some());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Table);
        assert!(app.cards.is_some());
    }

    #[test]
    fn test_help_swallows_keys() {
        let mut app = state(MemoryStore::new());
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help.is_some());
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.help.is_none());
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_render_both_views() {
        let mut app = state(MemoryStore::new());
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        press(&mut app, KeyCode::Tab);
        if let Some(cards) = &mut app.cards {
            assert!(cards.wait(Duration::from_secs(5)));
        }
        press(&mut app, KeyCode::Char('?'));
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
