//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (theme, images, songs, UI state)
//! - `prefs`: Persisted key-value preference store
//! - `theme`: Effective-theme resolution and toggling
//! - `toasts`: Transient notification stack
//! - `preview`: Media preview overlay state machine
//! - `daily`: Deterministic song-of-the-day selection
//! - `app_model`: Main application model with state management methods

mod app_model;
pub mod daily;
mod prefs;
mod preview;
mod theme;
mod toasts;
mod types;

// Re-export all public types for convenient access
pub use types::{
    ActiveSection, MediaImage, PreviewRequest, Song, Theme, ThemePreference, UiState,
};

pub use prefs::{PreferenceStore, THEME_PREFERENCE_KEY};

pub use theme::{detect_system_hint, ThemeResolver};

pub use toasts::{ToastStack, ToastTuning, ToastView};

pub use preview::{
    LoadOutcome, LoadState, LoadTicket, MediaPreview, PreviewView, LOAD_TIMEOUT_SECS,
};

pub use daily::select_daily_song;

pub use app_model::AppModel;
