//! Status bar widget for progress totals, messages and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::models::Status;
use crate::store::KeyValueStore;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with progress counts and contextual help
    pub fn render<S: KeyValueStore>(f: &mut Frame, area: Rect, state: &AppState<S>, theme: &Theme) {
        let counts = state
            .ledger
            .counts(state.catalog.records().iter().map(|r| r.verb.as_str()));

        let mut progress = vec![Span::styled("Progress: ", Style::default().fg(theme.primary))];
        for status in Status::all() {
            progress.push(Span::styled(
                format!("{} {}  ", status.display_name(), counts.get(*status)),
                Style::default().fg(theme.status_color(*status)),
            ));
        }
        progress.push(Span::styled(
            format!("Theme: {}", state.theme_pref),
            Style::default().fg(theme.text_muted),
        ));

        let message_line = state.status_message.as_ref().map_or_else(
            || Line::from(""),
            |message| {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            },
        );

        let hints = Line::from(Span::styled(
            state.key_hints(),
            Style::default().fg(theme.text_muted),
        ));

        let paragraph = Paragraph::new(vec![Line::from(progress), message_line, hints]).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.primary)),
        );
        f.render_widget(paragraph, area);
    }
}
