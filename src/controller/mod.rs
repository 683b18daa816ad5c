//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and manages the easter egg
//! triggers. It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `eggs`: Sequence matcher and repeat-press counter
//! - `loader`: Asynchronous image loading for the preview

mod eggs;
mod input;
mod loader;

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::model::{AppModel, PreviewRequest};

pub use eggs::{RepeatCounter, SequenceMatcher};

/// ↑↑↓↓←→←→BABA
const KONAMI_CODE: [KeyCode; 12] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) config: Arc<AppConfig>,
    konami: Arc<Mutex<SequenceMatcher<KeyCode>>>,
    toggle_egg: Arc<Mutex<RepeatCounter>>,
    date_egg: Arc<Mutex<RepeatCounter>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, config: Arc<AppConfig>) -> Self {
        let threshold = config.eggs.repeat_threshold;
        let reset_delay = config.eggs.reset_delay();
        Self {
            model,
            config,
            konami: Arc::new(Mutex::new(SequenceMatcher::new(KONAMI_CODE.to_vec()))),
            toggle_egg: Arc::new(Mutex::new(RepeatCounter::new(threshold, reset_delay))),
            date_egg: Arc::new(Mutex::new(RepeatCounter::new(threshold, reset_delay))),
        }
    }

    /// Idle-resets the repeat counters. Called once per event-loop iteration.
    pub async fn tick(&self, now: Instant) {
        self.toggle_egg.lock().await.tick(now);
        self.date_egg.lock().await.tick(now);
    }

    pub(crate) async fn toggle_theme(&self) {
        let model = self.model.lock().await;
        model.toggle_theme().await;

        let fired = self.toggle_egg.lock().await.press(Instant::now());
        if fired {
            model
                .show_toast(&self.config.eggs.toggle_spam_message, None)
                .await;
        }
    }

    /// The "last updated" date was pressed; spamming it opens the egg image.
    pub(crate) async fn press_update_date(&self) {
        let fired = self.date_egg.lock().await.press(Instant::now());
        if fired {
            if let Some(request) = PreviewRequest::single(self.config.eggs.date_egg_image.clone())
            {
                self.open_preview(request).await;
            }
        }
    }

    pub(crate) async fn open_gallery(&self) {
        if let Some(request) = PreviewRequest::new(self.config.gallery.clone()) {
            self.open_preview(request).await;
        }
    }

    pub(crate) async fn open_original_picture(&self) {
        if let Some(request) = PreviewRequest::single(self.config.original_picture.clone()) {
            self.open_preview(request).await;
        }
    }

    async fn open_preview(&self, request: PreviewRequest) {
        let ticket = {
            let model = self.model.lock().await;
            model.open_preview(request).await
        };
        self.start_image_load(ticket).await;
    }

    /// Activating the daily song panel surfaces the link as a toast.
    pub(crate) async fn activate_daily_song(&self) {
        let model = self.model.lock().await;
        match model.get_daily_song().await {
            Some(song) => {
                model
                    .show_toast(&format!("♪ {} → {}", song.display_title(), song.url), None)
                    .await;
            }
            None => {
                model.show_toast("（這裡還沒有歌曲呢QwQ）", None).await;
            }
        }
    }

    pub(crate) async fn observe_konami(&self, code: KeyCode) {
        let normalized = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        let fired = self.konami.lock().await.observe(&normalized);
        if fired {
            let model = self.model.lock().await;
            model.show_toast(&self.config.eggs.konami_message, None).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{PreferenceStore, ThemeResolver};

    use super::*;

    fn controller() -> AppController {
        let config = Arc::new(AppConfig::default());
        let theme = ThemeResolver::new(PreferenceStore::unavailable(), None);
        let model = Arc::new(Mutex::new(AppModel::new(config.clone(), theme)));
        AppController::new(model, config)
    }

    #[tokio::test]
    async fn konami_code_raises_the_toast() {
        let controller = controller();
        for code in KONAMI_CODE {
            controller.observe_konami(code).await;
        }
        let model = controller.model.lock().await;
        let toasts = model.get_toasts().await;
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, controller.config.eggs.konami_message);
    }

    #[tokio::test]
    async fn uppercase_letters_also_match_the_code() {
        let controller = controller();
        for code in KONAMI_CODE {
            let code = match code {
                KeyCode::Char(c) => KeyCode::Char(c.to_ascii_uppercase()),
                other => other,
            };
            controller.observe_konami(code).await;
        }
        let model = controller.model.lock().await;
        assert_eq!(model.get_toasts().await.len(), 1);
    }

    #[tokio::test]
    async fn an_empty_gallery_never_opens_the_preview() {
        let config = Arc::new(AppConfig { gallery: vec![], ..AppConfig::default() });
        let theme = ThemeResolver::new(PreferenceStore::unavailable(), None);
        let model = Arc::new(Mutex::new(AppModel::new(config.clone(), theme)));
        let controller = AppController::new(model, config);

        controller.open_gallery().await;
        let model = controller.model.lock().await;
        assert!(!model.is_preview_open().await);
    }

    #[tokio::test]
    async fn spamming_the_update_date_opens_the_egg_image() {
        let controller = controller();
        for _ in 0..controller.config.eggs.repeat_threshold {
            controller.press_update_date().await;
        }
        let model = controller.model.lock().await;
        let view = model.get_preview().await.expect("egg preview open");
        assert_eq!(view.current().src, controller.config.eggs.date_egg_image.src);
        assert!(!view.has_navigation());
    }

    #[tokio::test]
    async fn a_few_presses_do_not_fire_the_egg() {
        let controller = controller();
        for _ in 0..controller.config.eggs.repeat_threshold - 1 {
            controller.press_update_date().await;
        }
        let model = controller.model.lock().await;
        assert!(model.get_preview().await.is_none());
    }
}
