//! Core type definitions for the application

use serde::{Deserialize, Serialize};

/// The resolved theme actually applied to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// The user's stored theme choice. `Unset` defers to the system hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Unset,
}

impl ThemePreference {
    pub fn explicit(self) -> Option<Theme> {
        match self {
            ThemePreference::Light => Some(Theme::Light),
            ThemePreference::Dark => Some(Theme::Dark),
            ThemePreference::Unset => None,
        }
    }

    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
        }
    }
}

/// Which section of the page is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Gallery,
    DailySong,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Gallery => ActiveSection::DailySong,
            ActiveSection::DailySong => ActiveSection::Gallery,
        }
    }

    pub fn prev(self) -> Self {
        // Two sections, so cycling backward is the same step.
        self.next()
    }
}

/// One image shown by the media preview. Immutable once supplied;
/// caption and download target fall back to `alt` and `src`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub download_href: Option<String>,
    #[serde(default)]
    pub download_name: Option<String>,
}

impl MediaImage {
    pub fn caption(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.alt)
    }

    pub fn download_href(&self) -> &str {
        self.download_href.as_deref().unwrap_or(&self.src)
    }
}

/// Validated request for opening the media preview.
#[derive(Clone, Debug)]
pub struct PreviewRequest {
    images: Vec<MediaImage>,
}

impl PreviewRequest {
    /// Builds a request, rejecting empty sets and images without a source.
    pub fn new(images: Vec<MediaImage>) -> Option<Self> {
        if images.is_empty() || images.iter().any(|img| img.src.trim().is_empty()) {
            return None;
        }
        Some(Self { images })
    }

    pub fn single(image: MediaImage) -> Option<Self> {
        Self::new(vec![image])
    }

    pub fn into_images(self) -> Vec<MediaImage> {
        self.images
    }
}

/// One entry of the song catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub artist: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub unofficial: bool,
}

impl Song {
    /// Title as displayed, with the unofficial-upload marker.
    pub fn display_title(&self) -> String {
        if self.unofficial {
            format!("{} (unofficial)", self.title)
        } else {
            self.title.clone()
        }
    }
}

/// UI state for the main page (outside of overlays)
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub gallery_selected: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Gallery,
            gallery_selected: 0,
        }
    }
}
