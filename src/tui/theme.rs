//! Theme system for consistent UI colors across dark and light modes.
//!
//! The active theme follows the persisted [`ThemePreference`]; see
//! [`ThemePreference::load`] for how the preference is resolved.

use ratatui::style::Color;

use crate::models::{Status, VerbType};
use crate::services::ThemePreference;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support
/// for both dark and light terminal backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color (learned verbs, confirmations)
    pub success: Color,
    /// Error state color for errors and destructive actions
    pub error: Color,
    /// Warning state color (verbs being learned, pending loads)
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels and less important content
    pub text_secondary: Color,
    /// Muted text color for help text, disabled items, and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,
    /// Surface color for panels and elevated elements
    pub surface: Color,

    // Verb type badges
    /// Badge color for irregular verbs
    pub irregular: Color,
    /// Badge color for regular verbs
    pub regular: Color,
}

impl Theme {
    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
            surface: Color::Rgb(30, 30, 30),

            irregular: Color::Magenta,
            regular: Color::LightBlue,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    ///
    /// # Color Choices
    /// - Uses darker colors for text and UI elements
    /// - Black text on white background for maximum readability
    /// - Adjusted accent colors for visibility on light backgrounds
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),  // Dark green
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
            surface: Color::Rgb(245, 245, 245),

            irregular: Color::Rgb(150, 0, 150),
            regular: Color::Rgb(0, 90, 170),
        }
    }

    /// Theme for a stored preference.
    #[must_use]
    pub const fn from_preference(preference: ThemePreference) -> Self {
        match preference {
            ThemePreference::Dark => Self::dark(),
            ThemePreference::Light => Self::light(),
        }
    }

    /// Color used for a learning status.
    #[must_use]
    pub const fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Unknown => self.text_muted,
            Status::Learning => self.warning,
            Status::Learned => self.success,
        }
    }

    /// Badge color for a verb type.
    #[must_use]
    pub const fn type_color(&self, verb_type: VerbType) -> Color {
        match verb_type {
            VerbType::Irregular => self.irregular,
            VerbType::Regular => self.regular,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
