//! Theme resolution (stored preference + system hint)

use super::prefs::{PreferenceStore, THEME_PREFERENCE_KEY};
use super::types::{Theme, ThemePreference};

/// Resolves the effective theme from the stored preference and the system
/// dark-mode hint, and owns the toggle behavior.
///
/// Persistence failures are swallowed: the theme still flips for this
/// session, it just will not be remembered.
pub struct ThemeResolver {
    store: PreferenceStore,
    preference: ThemePreference,
    system_hint: Option<Theme>,
}

impl ThemeResolver {
    pub fn new(store: PreferenceStore, system_hint: Option<Theme>) -> Self {
        let preference = match store.try_get(THEME_PREFERENCE_KEY) {
            Ok(Some(value)) => Theme::parse(&value)
                .map(ThemePreference::from_theme)
                .unwrap_or_default(),
            Ok(None) => ThemePreference::Unset,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored theme preference");
                ThemePreference::Unset
            }
        };
        Self { store, preference, system_hint }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Explicit preference wins; otherwise the system hint; otherwise light.
    pub fn effective(&self) -> Theme {
        self.preference
            .explicit()
            .or(self.system_hint)
            .unwrap_or(Theme::Light)
    }

    /// Flips the effective theme and stores it as the new explicit choice.
    pub fn toggle(&mut self) -> Theme {
        let next = self.effective().flipped();
        self.preference = ThemePreference::from_theme(next);
        if let Err(e) = self.store.try_set(THEME_PREFERENCE_KEY, next.as_str()) {
            tracing::warn!(error = %e, "theme preference not persisted");
        }
        next
    }

    /// The system hint changed: the explicit choice is cleared and the view
    /// re-renders from the hint alone.
    pub fn system_hint_changed(&mut self, hint: Option<Theme>) {
        self.system_hint = hint;
        self.preference = ThemePreference::Unset;
        if let Err(e) = self.store.try_remove(THEME_PREFERENCE_KEY) {
            tracing::warn!(error = %e, "stored theme preference not cleared");
        }
    }
}

/// Reads the terminal background hint from the `COLORFGBG` convention
/// (e.g. "15;0" for white-on-black). Absent or unparsable means no hint.
pub fn detect_system_hint() -> Option<Theme> {
    let value = std::env::var("COLORFGBG").ok()?;
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    if bg == 7 || bg == 15 {
        Some(Theme::Light)
    } else {
        Some(Theme::Dark)
    }
}
