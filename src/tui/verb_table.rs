//! Searchable, filterable verb table with incremental reveal.
//!
//! The whole catalog is in memory; only a prefix of the filtered rows is
//! rendered. Moving the cursor near the end of that prefix grows it.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::component::{Component, ViewContext, ViewEvent};
use crate::catalog::Catalog;
use crate::models::{Status, VerbRecord, VerbType, MISSING_MEANING_PLACEHOLDER};
use crate::pagination::RevealWindow;
use crate::services::{filter_verbs, FilterState};
use crate::store::KeyValueStore;

/// Rows from the end of the window at which the window grows.
const PROXIMITY_ROWS: usize = 5;

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 10;

/// Whether keystrokes edit the search text or drive the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys navigate and toggle filters
    Browse,
    /// Keys edit the search query
    Search,
}

/// Verb table view state.
pub struct VerbTable {
    catalog: Arc<Catalog>,
    filter: FilterState,
    window: RevealWindow,
    cursor: usize,
    mode: InputMode,
}

impl VerbTable {
    /// Creates a table over `catalog` showing `initial` rows, growing by `step`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, initial: usize, step: usize) -> Self {
        let filter = FilterState::new();
        let mut window = RevealWindow::new(initial, step);
        window.sync(&filter);
        Self {
            catalog,
            filter,
            window,
            cursor: 0,
            mode: InputMode::Browse,
        }
    }

    /// Current filter.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Selected row within the visible rows.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current input mode.
    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Reveal window state.
    #[must_use]
    pub const fn window(&self) -> &RevealWindow {
        &self.window
    }

    /// Verbs accepted by the current filter, in catalog order.
    pub fn filtered<S: KeyValueStore>(&self, context: &ViewContext<'_, S>) -> Vec<&VerbRecord> {
        filter_verbs(self.catalog.records(), &self.filter, |verb| {
            context.status_of(verb)
        })
    }

    /// Marks the last window growth as rendered.
    ///
    /// Called by the event loop after each draw.
    pub fn settle(&mut self) {
        self.window.settle();
    }

    fn selected<'a, S: KeyValueStore>(
        &'a self,
        context: &ViewContext<'_, S>,
    ) -> Option<&'a VerbRecord> {
        let filtered = self.filtered(context);
        let visible = self.window.visible_len(filtered.len());
        filtered.into_iter().take(visible).nth(self.cursor)
    }

    fn apply_filter_change(&mut self) {
        if self.window.sync(&self.filter) {
            self.cursor = 0;
        }
    }

    /// Pulls the cursor back onto the last visible row.
    ///
    /// A status change can drop rows out of a status-filtered list, which
    /// leaves the cursor past the end.
    fn clamp_cursor(&mut self, filtered_len: usize) {
        let visible = self.window.visible_len(filtered_len);
        self.cursor = self.cursor.min(visible.saturating_sub(1));
    }

    fn move_cursor(&mut self, delta: isize, filtered_len: usize) {
        let visible = self.window.visible_len(filtered_len);
        if visible == 0 {
            self.cursor = 0;
            return;
        }
        let last = visible - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);

        if self.cursor + PROXIMITY_ROWS >= visible {
            self.window.on_proximity(filtered_len);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.mode = InputMode::Browse,
            KeyCode::Backspace => {
                self.filter.query.pop();
                self.apply_filter_change();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.query.clear();
                self.apply_filter_change();
            }
            KeyCode::Char(c) => {
                self.filter.query.push(c);
                self.apply_filter_change();
            }
            _ => {}
        }
    }
}

impl Component for VerbTable {
    fn handle_input<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        context: &ViewContext<'_, S>,
    ) -> Option<ViewEvent> {
        if self.mode == InputMode::Search {
            self.handle_search_key(key);
            return None;
        }

        let filtered_len = self.filtered(context).len();
        self.clamp_cursor(filtered_len);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(ViewEvent::Quit),
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, filtered_len),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, filtered_len),
            KeyCode::PageUp => self.move_cursor(-(PAGE_ROWS as isize), filtered_len),
            KeyCode::PageDown => self.move_cursor(PAGE_ROWS as isize, filtered_len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.move_cursor(isize::MAX, filtered_len),
            KeyCode::Char(' ') | KeyCode::Enter => {
                return self
                    .selected(context)
                    .map(|record| ViewEvent::CycleStatus(record.verb.clone()));
            }
            KeyCode::Char('1') => {
                self.filter.toggle_type(VerbType::Irregular);
                self.apply_filter_change();
            }
            KeyCode::Char('2') => {
                self.filter.toggle_type(VerbType::Regular);
                self.apply_filter_change();
            }
            KeyCode::Char(c @ '3'..='5') => {
                let index = (c as usize) - ('3' as usize);
                self.filter.toggle_status(Status::all()[index]);
                self.apply_filter_change();
            }
            KeyCode::Char('x') => {
                self.filter.clear();
                self.apply_filter_change();
            }
            KeyCode::Char('R') => return Some(ViewEvent::RequestReset),
            KeyCode::Char('c') | KeyCode::Tab => return Some(ViewEvent::SwitchView),
            KeyCode::Char('t') => return Some(ViewEvent::ToggleTheme),
            KeyCode::Char('?') => return Some(ViewEvent::ToggleHelp),
            _ => {}
        }
        None
    }

    fn render<S: KeyValueStore>(&self, f: &mut Frame, area: Rect, context: &ViewContext<'_, S>) {
        let theme = context.theme;
        let filtered = self.filtered(context);
        let visible = self.window.visible_len(filtered.len());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Length(1), // Filter toggles
                Constraint::Min(5),    // Table
                Constraint::Length(1), // Footer
            ])
            .split(area);

        // Search box
        let search_style = if self.mode == InputMode::Search {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.primary)
        };
        let query = if self.filter.query.is_empty() && self.mode == InputMode::Browse {
            Span::styled(
                "Press / to search any verb form",
                Style::default().fg(theme.text_muted),
            )
        } else {
            Span::styled(self.filter.query.as_str(), Style::default().fg(theme.text))
        };
        let search = Paragraph::new(Line::from(vec![query])).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(search_style),
        );
        f.render_widget(search, chunks[0]);

        // Filter toggles
        let mut toggles = Vec::new();
        for (key, verb_type) in ['1', '2'].into_iter().zip(VerbType::all()) {
            toggles.push(toggle_span(
                key,
                verb_type.display_name(),
                self.filter.type_filters.contains(verb_type),
                theme,
            ));
        }
        toggles.push(Span::raw("  "));
        for (key, status) in ['3', '4', '5'].into_iter().zip(Status::all()) {
            toggles.push(toggle_span(
                key,
                status.display_name(),
                self.filter.status_filters.contains(status),
                theme,
            ));
        }
        f.render_widget(Paragraph::new(Line::from(toggles)), chunks[1]);

        // Table
        if filtered.is_empty() {
            let empty = Paragraph::new("No verbs match the current filters.")
                .style(Style::default().fg(theme.text_muted))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(empty, chunks[2]);
        } else {
            let header = Row::new([
                "Verb",
                "Past simple",
                "Past participle",
                "Future",
                "Type",
                "Status",
                "Meaning",
            ])
            .style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            );

            let rows = filtered.iter().take(visible).map(|record| {
                let status = context.status_of(&record.verb);
                Row::new([
                    Cell::from(record.verb.as_str())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(record.past_simple.as_str()),
                    Cell::from(record.past_participle.as_str()),
                    Cell::from(record.future.as_str()),
                    Cell::from(record.verb_type.display_name())
                        .style(Style::default().fg(theme.type_color(record.verb_type))),
                    Cell::from(status.display_name())
                        .style(Style::default().fg(theme.status_color(status))),
                    Cell::from(record.meaning_or(MISSING_MEANING_PLACEHOLDER)),
                ])
                .style(Style::default().fg(theme.text))
            });

            let widths = [
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(16),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Fill(1),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" Verbs ")
                        .border_style(Style::default().fg(theme.primary)),
                )
                .row_highlight_style(
                    Style::default()
                        .bg(theme.highlight_bg)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            let mut state = TableState::default().with_selected(Some(self.cursor));
            f.render_stateful_widget(table, chunks[2], &mut state);
        }

        // Footer
        let mut footer = vec![Span::styled(
            format!(
                "Showing {visible} of {} matches ({} verbs)",
                filtered.len(),
                self.catalog.len()
            ),
            Style::default().fg(theme.text_secondary),
        )];
        if self.window.has_more(filtered.len()) {
            footer.push(Span::styled(
                "  · keep scrolling for more",
                Style::default().fg(theme.text_muted),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(footer)), chunks[3]);
    }

    fn key_hints(&self) -> &'static str {
        match self.mode {
            InputMode::Search => "Type to search · Enter/Esc: done · Ctrl+U: clear",
            InputMode::Browse => {
                "/: search · Space: cycle status · 1-5: filters · x: clear · c: cards · t: theme · ?: help · q: quit"
            }
        }
    }
}

fn toggle_span<'a>(
    key: char,
    label: &'a str,
    active: bool,
    theme: &super::Theme,
) -> Span<'a> {
    let marker = if active { "■" } else { "□" };
    let style = if active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    Span::styled(format!("[{key}] {marker} {label}  "), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StatusLedger;
    use crate::store::MemoryStore;
    use crate::tui::Theme;

    fn catalog(n: usize) -> Arc<Catalog> {
        let records = (0..n)
            .map(|i| {
                let verb_type = if i % 2 == 0 {
                    VerbType::Regular
                } else {
                    VerbType::Irregular
                };
                VerbRecord::new(format!("verb{i:03}"), "a", "b", "c", verb_type)
            })
            .collect();
        Arc::new(Catalog::from_records(records).unwrap())
    }

    fn press(table: &mut VerbTable, ledger: &StatusLedger<MemoryStore>, code: KeyCode) -> Option<ViewEvent> {
        let theme = Theme::dark();
        let context = ViewContext {
            ledger,
            theme: &theme,
        };
        table.handle_input(KeyEvent::new(code, KeyModifiers::NONE), &context)
    }

    #[test]
    fn test_cursor_near_end_grows_window() {
        let ledger = StatusLedger::load(MemoryStore::new());
        let mut table = VerbTable::new(catalog(130), 60, 60);
        assert_eq!(table.window().visible_len(130), 60);

        let _ = press(&mut table, &ledger, KeyCode::End);
        assert_eq!(table.cursor(), 59);
        assert_eq!(table.window().visible_len(130), 120);

        // No second growth until the frame settles
        let _ = press(&mut table, &ledger, KeyCode::Down);
        assert_eq!(table.window().visible_len(130), 120);

        table.settle();
        let _ = press(&mut table, &ledger, KeyCode::End);
        assert_eq!(table.cursor(), 119);
        assert_eq!(table.window().visible_len(130), 130);
    }

    #[test]
    fn test_filter_change_resets_window_and_cursor() {
        let ledger = StatusLedger::load(MemoryStore::new());
        let mut table = VerbTable::new(catalog(130), 60, 60);
        let _ = press(&mut table, &ledger, KeyCode::End);
        table.settle();
        assert_eq!(table.window().revealed(), 120);

        let _ = press(&mut table, &ledger, KeyCode::Char('1'));
        assert!(table.filter().type_filters.contains(&VerbType::Irregular));
        assert_eq!(table.window().revealed(), 60);
        assert_eq!(table.cursor(), 0);
    }

    #[test]
    fn test_search_mode_edits_query() {
        let ledger = StatusLedger::load(MemoryStore::new());
        let mut table = VerbTable::new(catalog(20), 60, 60);

        let _ = press(&mut table, &ledger, KeyCode::Char('/'));
        assert_eq!(table.mode(), InputMode::Search);
        for c in "verb01".chars() {
            let _ = press(&mut table, &ledger, KeyCode::Char(c));
        }
        // 'q' is text while searching, not quit
        assert_eq!(press(&mut table, &ledger, KeyCode::Char('q')), None);
        let _ = press(&mut table, &ledger, KeyCode::Backspace);
        assert_eq!(table.filter().query, "verb01");

        let _ = press(&mut table, &ledger, KeyCode::Enter);
        assert_eq!(table.mode(), InputMode::Browse);
        let theme = Theme::dark();
        let context = ViewContext {
            ledger: &ledger,
            theme: &theme,
        };
        assert_eq!(table.filtered(&context).len(), 10);
    }

    #[test]
    fn test_space_cycles_selected_verb() {
        let ledger = StatusLedger::load(MemoryStore::new());
        let mut table = VerbTable::new(catalog(5), 60, 60);
        let _ = press(&mut table, &ledger, KeyCode::Down);
        assert_eq!(
            press(&mut table, &ledger, KeyCode::Char(' ')),
            Some(ViewEvent::CycleStatus("verb001".to_string()))
        );
    }

    #[test]
    fn test_status_filter_uses_ledger() {
        let mut ledger = StatusLedger::load(MemoryStore::new());
        ledger.set_status("verb002", Status::Learned);
        let mut table = VerbTable::new(catalog(5), 60, 60);

        // '5' toggles the Learned filter
        let _ = press(&mut table, &ledger, KeyCode::Char('5'));
        let theme = Theme::dark();
        let context = ViewContext {
            ledger: &ledger,
            theme: &theme,
        };
        let names: Vec<_> = table.filtered(&context).iter().map(|r| r.verb.clone()).collect();
        assert_eq!(names, vec!["verb002"]);
    }

    #[test]
    fn test_cursor_follows_rows_leaving_status_filter() {
        let mut ledger = StatusLedger::load(MemoryStore::new());
        let mut table = VerbTable::new(catalog(5), 60, 60);

        // '3' toggles the Unknown filter; End selects verb004
        let _ = press(&mut table, &ledger, KeyCode::Char('3'));
        let _ = press(&mut table, &ledger, KeyCode::End);
        assert_eq!(table.cursor(), 4);
        let event = press(&mut table, &ledger, KeyCode::Char(' '));
        assert_eq!(event, Some(ViewEvent::CycleStatus("verb004".to_string())));
        ledger.cycle_status("verb004");

        // verb004 left the filter; the highlighted row is now verb003
        assert_eq!(
            press(&mut table, &ledger, KeyCode::Char(' ')),
            Some(ViewEvent::CycleStatus("verb003".to_string()))
        );
        assert_eq!(table.cursor(), 3);
    }

    #[test]
    fn test_empty_result_keeps_cursor_at_zero() {
        let ledger = StatusLedger::load(MemoryStore::new());
        let mut table = VerbTable::new(catalog(5), 60, 60);
        let _ = press(&mut table, &ledger, KeyCode::Char('/'));
        let _ = press(&mut table, &ledger, KeyCode::Char('z'));
        let _ = press(&mut table, &ledger, KeyCode::Esc);
        let _ = press(&mut table, &ledger, KeyCode::Down);
        assert_eq!(table.cursor(), 0);
        assert_eq!(press(&mut table, &ledger, KeyCode::Char(' ')), None);
    }
}
