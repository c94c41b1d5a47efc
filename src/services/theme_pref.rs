//! Persisted light/dark preference.

use std::fmt;

use crate::config::ThemeMode;
use crate::constants::THEME_STORAGE_KEY;
use crate::store::KeyValueStore;

/// Explicit theme choice stored in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    /// Dark text on a light background
    #[default]
    Light,
    /// Light text on a dark background
    Dark,
}

impl ThemePreference {
    /// Stored string value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The opposite preference.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Parses a stored value; only `light` and `dark` are accepted.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Detects the OS appearance. Unspecified or undetectable falls back to light.
    #[must_use]
    pub fn detect_os() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Self::Dark,
            Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) | Err(_) => Self::Light,
        }
    }

    /// Preference implied by the configured mode when nothing is stored.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect_os(),
            ThemeMode::Dark => Self::Dark,
            ThemeMode::Light => Self::Light,
        }
    }

    /// Resolves the active preference.
    ///
    /// A valid stored value wins. With nothing stored, `mode` decides.
    /// A stored value that is neither `light` nor `dark` falls back to light.
    pub fn load<S: KeyValueStore>(store: &S, mode: ThemeMode) -> Self {
        match store.get(THEME_STORAGE_KEY) {
            Some(raw) => Self::parse(&raw).unwrap_or_else(|| {
                tracing::debug!("Ignoring malformed theme preference '{}'", raw);
                Self::Light
            }),
            None => Self::from_mode(mode),
        }
    }

    /// Writes this preference, logging instead of failing.
    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        if let Err(e) = store.set(THEME_STORAGE_KEY, self.as_str()) {
            tracing::warn!("Failed to persist theme preference: {:#}", e);
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_stored_value_wins() {
        let store = MemoryStore::with_entry(THEME_STORAGE_KEY, "dark");
        assert_eq!(
            ThemePreference::load(&store, ThemeMode::Light),
            ThemePreference::Dark
        );
    }

    #[test]
    fn test_malformed_value_falls_back_to_light() {
        let store = MemoryStore::with_entry(THEME_STORAGE_KEY, "\"purple\"");
        assert_eq!(
            ThemePreference::load(&store, ThemeMode::Dark),
            ThemePreference::Light
        );
    }

    #[test]
    fn test_missing_value_uses_mode() {
        let store = MemoryStore::new();
        assert_eq!(
            ThemePreference::load(&store, ThemeMode::Dark),
            ThemePreference::Dark
        );
        assert_eq!(
            ThemePreference::load(&store, ThemeMode::Light),
            ThemePreference::Light
        );
    }

    #[test]
    fn test_auto_mode_resolves_from_os() {
        // Headless environments report no preference; either answer is valid
        let detected = ThemePreference::detect_os();
        assert!(matches!(detected, ThemePreference::Light | ThemePreference::Dark));
        assert_eq!(
            ThemePreference::load(&MemoryStore::new(), ThemeMode::Auto),
            detected
        );
    }

    #[test]
    fn test_toggle_and_save() {
        let mut store = MemoryStore::new();
        let pref = ThemePreference::Light.toggled();
        pref.save(&mut store);
        assert_eq!(store.get(THEME_STORAGE_KEY).as_deref(), Some("dark"));
        assert_eq!(pref.toggled(), ThemePreference::Light);
    }
}
