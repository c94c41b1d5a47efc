//! Help overlay listing the keyboard shortcuts of both views.
//!
//! Opened with '?'; scrolls with the arrow keys.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use super::Theme;

/// Shortcut sections: title, then (keys, description) pairs.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Everywhere",
        &[
            ("c / Tab", "Switch between table and flash cards"),
            ("1 / 2", "Toggle irregular / regular filter"),
            ("3 / 4 / 5", "Toggle unknown / learning / learned filter"),
            ("t", "Toggle light / dark theme"),
            ("?", "Show or hide this help"),
            ("q / Esc", "Quit"),
        ],
    ),
    (
        "Verb table",
        &[
            ("/", "Search every verb form (Enter or Esc to finish)"),
            ("↑ ↓ / j k", "Move the selection"),
            ("PgUp PgDn", "Move ten rows"),
            ("g / G", "First / last shown row"),
            ("Space / Enter", "Cycle status: unknown → learning → learned"),
            ("x", "Clear search and filters"),
            ("R", "Reset every status (asks first)"),
        ],
    ),
    (
        "Flash cards",
        &[
            ("← → / h l", "Previous / next card"),
            ("Space / Enter", "Flip the card"),
            ("s", "Cycle the status of the current card"),
            ("r", "Retry after a failed load"),
        ],
    ),
];

/// State for the help overlay.
#[derive(Debug, Clone, Default)]
pub struct HelpOverlayState {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
}

impl HelpOverlayState {
    /// Creates a new help overlay state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < Self::total_lines() {
            self.scroll_offset += 1;
        }
    }

    /// Number of lines in the help text.
    #[must_use]
    pub fn total_lines() -> usize {
        // Title + blank per section, one line per shortcut
        SECTIONS
            .iter()
            .map(|(_, entries)| entries.len() + 2)
            .sum()
    }

    fn content(theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(Self::total_lines());
        for (title, entries) in SECTIONS {
            lines.push(Line::from(Span::styled(
                *title,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            for (keys, description) in *entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {keys:<16}"), Style::default().fg(theme.accent)),
                    Span::styled(*description, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines
    }

    /// Render the help overlay as a centered modal.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let modal_area = super::centered_rect(60, 80, area);
        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let visible_height = chunks[0].height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(Self::content(theme))
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, chunks[0]);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(theme.primary));
        let mut scrollbar_state =
            ScrollbarState::new(Self::total_lines().saturating_sub(visible_height))
                .position(self.scroll_offset);
        frame.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }
}
