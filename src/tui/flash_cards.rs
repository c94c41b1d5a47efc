//! Flash-card carousel over the paged catalog.
//!
//! Cards are fetched a page at a time from a [`PageSource`] on a background
//! thread. The next page is requested when the current card is within a
//! few cards of the end of the filtered deck.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::component::{Component, ViewContext, ViewEvent};
use super::centered_rect;
use crate::models::{Status, VerbRecord, VerbType};
use crate::pagination::{BackgroundPager, LoadMode, PageSource, PagedLoader};
use crate::services::{filter_verbs, FilterState};
use crate::store::KeyValueStore;

/// Shown on the back of a card whose verb has no meaning.
const NO_MEANING: &str = "No meaning";

/// Flash-card view state.
pub struct FlashCards {
    pager: BackgroundPager,
    filter: FilterState,
    index: usize,
    flipped: bool,
}

impl FlashCards {
    /// Creates the view and starts loading the first page.
    pub fn new(source: Arc<dyn PageSource>, page_size: usize) -> Self {
        let mut pager = BackgroundPager::new(source, page_size);
        pager.request(LoadMode::Reset);
        Self {
            pager,
            filter: FilterState::new(),
            index: 0,
            flipped: false,
        }
    }

    /// Loader state (items, totals, errors).
    #[must_use]
    pub const fn loader(&self) -> &PagedLoader {
        self.pager.loader()
    }

    /// Index of the current card within the filtered deck.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether the current card shows its back.
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Cards accepted by the type and status filters.
    pub fn deck<S: KeyValueStore>(&self, context: &ViewContext<'_, S>) -> Vec<&VerbRecord> {
        filter_verbs(self.pager.loader().items(), &self.filter, |verb| {
            context.status_of(verb)
        })
    }

    /// Applies finished fetches and requests the next page when needed.
    ///
    /// Returns true when the loader changed.
    pub fn tick<S: KeyValueStore>(&mut self, context: &ViewContext<'_, S>) -> bool {
        let changed = self.pager.poll();
        let deck_len = self.deck(context).len();
        self.index = self.index.min(deck_len.saturating_sub(1));
        self.maybe_prefetch(deck_len);
        changed
    }

    /// Blocks until the in-flight fetch finishes or `timeout` passes.
    pub fn wait(&mut self, timeout: std::time::Duration) -> bool {
        self.pager.wait(timeout)
    }

    fn maybe_prefetch(&mut self, deck_len: usize) {
        if self.pager.loader().should_prefetch(self.index, deck_len) {
            self.pager.request(LoadMode::Append);
        }
    }

    fn go_to(&mut self, index: usize, deck_len: usize) {
        if deck_len == 0 {
            return;
        }
        self.index = index.min(deck_len - 1);
        self.flipped = false;
        self.maybe_prefetch(deck_len);
    }

    fn next(&mut self, deck_len: usize) {
        if deck_len == 0 {
            return;
        }
        if self.index + 1 < deck_len {
            self.go_to(self.index + 1, deck_len);
        } else if !self.pager.loader().has_more() {
            // Everything is loaded: wrap around
            self.go_to(0, deck_len);
        }
    }

    fn previous(&mut self, deck_len: usize) {
        if deck_len == 0 {
            return;
        }
        if self.index > 0 {
            self.go_to(self.index - 1, deck_len);
        } else if !self.pager.loader().has_more() {
            self.go_to(deck_len - 1, deck_len);
        }
    }

    fn change_filter(&mut self, change: impl FnOnce(&mut FilterState)) {
        change(&mut self.filter);
        self.index = 0;
        self.flipped = false;
    }

    fn render_front(record: &VerbRecord, theme: &super::Theme) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                format!(" {} ", record.verb_type.display_name()),
                Style::default()
                    .fg(theme.type_color(record.verb_type))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                record.verb.clone(),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "Space: show the meaning and tenses",
                Style::default().fg(theme.text_muted),
            )),
        ]
    }

    fn render_back(record: &VerbRecord, status: Status, theme: &super::Theme) -> Vec<Line<'static>> {
        let label = Style::default().fg(theme.text_secondary);
        let value = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
        let detail = |name: &str, text: String| {
            Line::from(vec![
                Span::styled(format!("{name:<16}"), label),
                Span::styled(text, value),
            ])
        };

        vec![
            Line::from(Span::styled("Meaning", label)),
            Line::from(Span::styled(
                record.meaning_or(NO_MEANING).to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            detail("Past simple", record.past_simple.clone()),
            detail("Past participle", record.past_participle.clone()),
            detail("Future", record.future.clone()),
            detail("Type", record.verb_type.display_name().to_string()),
            Line::from(vec![
                Span::styled(format!("{:<16}", "Status"), label),
                Span::styled(
                    status.display_name(),
                    Style::default().fg(theme.status_color(status)),
                ),
            ]),
        ]
    }
}

impl Component for FlashCards {
    fn handle_input<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        context: &ViewContext<'_, S>,
    ) -> Option<ViewEvent> {
        let deck_len = self.deck(context).len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(ViewEvent::Quit),
            KeyCode::Right | KeyCode::Char('l') => self.next(deck_len),
            KeyCode::Left | KeyCode::Char('h') => self.previous(deck_len),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if deck_len > 0 {
                    self.flipped = !self.flipped;
                }
            }
            KeyCode::Char('s') => {
                return self
                    .deck(context)
                    .get(self.index)
                    .map(|record| ViewEvent::CycleStatus(record.verb.clone()));
            }
            KeyCode::Char('r') => {
                if self.pager.loader().error().is_some() {
                    self.pager.retry();
                }
            }
            KeyCode::Char('1') => self.change_filter(|f| f.toggle_type(VerbType::Irregular)),
            KeyCode::Char('2') => self.change_filter(|f| f.toggle_type(VerbType::Regular)),
            KeyCode::Char(c @ '3'..='5') => {
                let status = Status::all()[(c as usize) - ('3' as usize)];
                self.change_filter(|f| f.toggle_status(status));
            }
            KeyCode::Char('c') | KeyCode::Tab => return Some(ViewEvent::SwitchView),
            KeyCode::Char('t') => return Some(ViewEvent::ToggleTheme),
            KeyCode::Char('?') => return Some(ViewEvent::ToggleHelp),
            _ => {}
        }
        None
    }

    fn render<S: KeyValueStore>(&self, f: &mut Frame, area: Rect, context: &ViewContext<'_, S>) {
        let theme = context.theme;
        let loader = self.pager.loader();
        let deck = self.deck(context);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Position and filters
                Constraint::Min(10),   // Card
                Constraint::Length(1), // Loading / end / error line
            ])
            .split(area);

        // Position line
        let mut header = vec![Span::styled(
            if deck.is_empty() {
                "No card".to_string()
            } else {
                format!("Card {} / {}", self.index + 1, deck.len())
            },
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        )];
        header.push(Span::styled(
            format!("   loaded {} of {}", loader.items().len(), loader.total()),
            Style::default().fg(theme.text_muted),
        ));
        if !self.filter.is_unrestricted() {
            let active: Vec<&str> = self
                .filter
                .type_filters
                .iter()
                .map(VerbType::display_name)
                .chain(self.filter.status_filters.iter().map(Status::display_name))
                .collect();
            header.push(Span::styled(
                format!("   filters: {}", active.join(", ")),
                Style::default().fg(theme.accent),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        // Card
        let card_area = centered_rect(60, 80, chunks[1]);
        let body = match deck.get(self.index) {
            Some(record) if self.flipped => {
                Self::render_back(record, context.status_of(&record.verb), theme)
            }
            Some(record) => Self::render_front(record, theme),
            None if loader.error().is_some() && loader.items().is_empty() => {
                vec![Line::from(Span::styled(
                    "No verbs loaded.",
                    Style::default().fg(theme.text_muted),
                ))]
            }
            None if loader.is_loading() || loader.has_more() => vec![Line::from(Span::styled(
                "Loading verbs…",
                Style::default().fg(theme.text_muted),
            ))],
            None => vec![Line::from(Span::styled(
                "No verbs for the selected filters.",
                Style::default().fg(theme.text_muted),
            ))],
        };
        let title = if self.flipped { " Back " } else { " Front " };
        let card = Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.surface)),
            );
        f.render_widget(card, card_area);

        // Footer line
        let footer = if let Some(message) = loader.error() {
            Span::styled(message.to_string(), Style::default().fg(theme.error))
        } else if loader.is_loading() && loader.has_more() {
            Span::styled("Loading more verbs…", Style::default().fg(theme.warning))
        } else if !loader.has_more() && !deck.is_empty() {
            Span::styled("You've reached the end.", Style::default().fg(theme.text_muted))
        } else {
            Span::raw("")
        };
        f.render_widget(
            Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
            chunks[2],
        );
    }

    fn key_hints(&self) -> &'static str {
        "←/→: previous/next · Space: flip · s: cycle status · 1-5: filters · r: retry · c: table · ?: help · q: quit"
    }
}
