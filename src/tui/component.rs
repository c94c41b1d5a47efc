//! Component trait pattern for TUI components.
//!
//! This module defines the traits and types used to implement self-contained,
//! testable TUI views that handle their own input and rendering.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use crate::models::Status;
use crate::services::StatusLedger;
use crate::store::KeyValueStore;
use crate::tui::Theme;

/// Read-only data every view needs to render.
pub struct ViewContext<'a, S: KeyValueStore> {
    /// Learning status lookup
    pub ledger: &'a StatusLedger<S>,
    /// Active colors
    pub theme: &'a Theme,
}

impl<S: KeyValueStore> ViewContext<'_, S> {
    /// Status of `verb`.
    #[must_use]
    pub fn status_of(&self, verb: &str) -> Status {
        self.ledger.status_of(verb)
    }
}

/// A view that handles keys and renders itself with shared context.
///
/// Views never mutate the ledger directly; they emit a [`ViewEvent`] and
/// the parent applies it.
pub trait Component {
    /// Handle keyboard input.
    ///
    /// Returns `Some(Event)` if the view wants the parent to act.
    /// Returns `None` if input was handled internally.
    fn handle_input<S: KeyValueStore>(
        &mut self,
        key: KeyEvent,
        context: &ViewContext<'_, S>,
    ) -> Option<ViewEvent>;

    /// Render the view within the provided area.
    fn render<S: KeyValueStore>(&self, f: &mut Frame, area: Rect, context: &ViewContext<'_, S>);

    /// Key hints shown in the status bar.
    fn key_hints(&self) -> &'static str;
}

/// Events emitted by views and processed by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Advance the verb to its next status
    CycleStatus(String),
    /// Ask for confirmation, then forget every status
    RequestReset,
    /// Switch between table and cards
    SwitchView,
    /// Flip light/dark and persist the choice
    ToggleTheme,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Leave the application
    Quit,
}
