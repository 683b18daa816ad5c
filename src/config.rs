//! Site configuration
//!
//! Everything presentation-level (asset paths, toast timings, egg thresholds
//! and messages, the gallery, the song catalog) is injected from
//! `config.json` next to the binary. A missing or unparsable file falls back
//! to the built-in defaults with a logged warning.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{MediaImage, Song, Theme, ToastTuning};

pub const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeAssets {
    pub logo: String,
    pub light_icon: String,
    pub dark_icon: String,
}

impl Default for ThemeAssets {
    fn default() -> Self {
        Self {
            logo: "assets/icon/logo.png".to_string(),
            light_icon: "assets/icon/lightTheme.png".to_string(),
            dark_icon: "assets/icon/darkTheme.png".to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastSettings {
    pub base_offset: u16,
    pub step_offset: u16,
    pub duration_ms: u64,
    pub remove_delay_ms: u64,
}

impl Default for ToastSettings {
    fn default() -> Self {
        let tuning = ToastTuning::default();
        Self {
            base_offset: tuning.base_offset,
            step_offset: tuning.step_offset,
            duration_ms: tuning.default_duration.as_millis() as u64,
            remove_delay_ms: tuning.remove_delay.as_millis() as u64,
        }
    }
}

impl ToastSettings {
    pub fn tuning(&self) -> ToastTuning {
        ToastTuning {
            base_offset: self.base_offset,
            step_offset: self.step_offset,
            default_duration: Duration::from_millis(self.duration_ms),
            remove_delay: Duration::from_millis(self.remove_delay_ms),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EggSettings {
    /// Presses within the idle window required to fire a repeat egg.
    pub repeat_threshold: u32,
    /// Idle milliseconds after which a repeat counter resets.
    pub reset_delay_ms: u64,
    pub konami_message: String,
    pub toggle_spam_message: String,
    pub date_egg_image: MediaImage,
}

impl Default for EggSettings {
    fn default() -> Self {
        Self {
            repeat_threshold: 6,
            reset_delay_ms: 1500,
            konami_message: "你在期待些什麼呢owo".to_string(),
            toggle_spam_message: "哇！別再按啦 QwQ".to_string(),
            date_egg_image: MediaImage {
                src: "assets/egg/nyapider.gif".to_string(),
                alt: "Hajimi".to_string(),
                caption: Some("別再按了><".to_string()),
                download_href: None,
                download_name: Some("下載下來做什麼？？？.gif".to_string()),
            },
        }
    }
}

impl EggSettings {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site_title: String,
    /// The "last updated" date shown in the header.
    pub update_date: String,
    pub theme: ThemeAssets,
    pub toast: ToastSettings,
    pub eggs: EggSettings,
    pub gallery: Vec<MediaImage>,
    /// The full-resolution artwork behind the "original picture" shortcut.
    pub original_picture: MediaImage,
    pub songs: Vec<Song>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_title: "Limo's Den".to_string(),
            update_date: "2025-12-21".to_string(),
            theme: ThemeAssets::default(),
            toast: ToastSettings::default(),
            eggs: EggSettings::default(),
            gallery: default_gallery(),
            original_picture: default_original_picture(),
            songs: default_songs(),
        }
    }
}

impl AppConfig {
    pub fn theme_icon(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.theme.light_icon,
            Theme::Dark => &self.theme.dark_icon,
        }
    }
}

/// Loads the configuration, tolerating a missing or broken file.
pub fn load(path: &Path) -> AppConfig {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return AppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "config file unparsable, using defaults");
                AppConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "config file unreadable, using defaults");
            AppConfig::default()
        }
    }
}

fn default_original_picture() -> MediaImage {
    MediaImage {
        src: "assets/original/fursona1.png".to_string(),
        alt: "Limo's fursona picture".to_string(),
        caption: Some("此圖片嚴禁用於 AI 相關應用、二次修改、未經許可轉載。".to_string()),
        download_href: None,
        download_name: Some("limo-fursona1-original.png".to_string()),
    }
}

fn default_gallery() -> Vec<MediaImage> {
    vec![
        default_original_picture(),
        MediaImage {
            src: "assets/original/fursona1-chibi.png".to_string(),
            alt: "Chibi Limo".to_string(),
            caption: None,
            download_href: None,
            download_name: None,
        },
    ]
}

fn song(artist: &str, title: &str, url: &str, from: Option<&str>, unofficial: bool) -> Song {
    Song {
        artist: artist.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        from: from.map(str::to_string),
        source: None,
        unofficial,
    }
}

fn default_songs() -> Vec<Song> {
    vec![
        song("C418", "Alpha", "https://youtu.be/q6o7qpPHd7g", Some("Minecraft"), false),
        song("KIVΛ", "The Whole Rest", "https://youtu.be/TWqMQeVqqnA", Some("Cytus II"), false),
        song("eicateve", "R.I.P.", "https://youtu.be/QJakdR6FWdg", None, false),
        song("Poppin'Party", "Returns", "https://youtu.be/zWKV5yudE18", Some("BanG Dream!"), false),
        song("Toby Fox", "MEGALOVANIA", "https://youtu.be/KK3KXAECte4", Some("UNDERTALE"), false),
        song("Sta", "Incyde", "https://youtu.be/-1OiVXRGE-U", Some("Cytus II"), false),
        song("Team Grimoire", "Grievous Lady", "https://youtu.be/QXeaLw2s-Wo", Some("Arcaea"), false),
        song("Dimrain47", "At the Speed of Light", "https://youtu.be/1Zrq8FiKS6A", None, false),
        song("USAO & Camellia", "Möbius", "https://youtu.be/2fsZdfixj60", Some("WACCA Reverse"), false),
        song("A-One", "Idoratrize World", "https://youtu.be/n8vn1iFDhAs", None, false),
        song("黒皇帝", "Galaxy Collapse", "https://youtu.be/VJFNcHgQ4HM", None, false),
        song("NeLiME", "CODE NAME : ZERO", "https://youtu.be/26nQsUdhBNQ", Some("Cytus"), false),
        song("ryo (supercell)", "ODDS&ENDS", "https://youtu.be/HUzLUGKwQJc", None, true),
        song("Tobu", "Higher", "https://youtu.be/blA7epJJaR4", None, false),
        song("DECO*27", "ヴァンパイア", "https://youtu.be/e1xCOsgWG0M", None, false),
        song("Ice", "iL", "https://youtu.be/ilLGb4b7Twc", Some("Cytus II"), false),
    ]
}
