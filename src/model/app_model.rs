//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::AbortHandle;

use crate::config::AppConfig;

use super::preview::{LoadOutcome, LoadTicket, MediaPreview, PreviewView};
use super::theme::ThemeResolver;
use super::toasts::{ToastStack, ToastView};
use super::types::{ActiveSection, PreviewRequest, Song, Theme, UiState};

/// Main application model containing all state
pub struct AppModel {
    config: Arc<AppConfig>,
    theme: Arc<Mutex<ThemeResolver>>,
    toasts: Arc<Mutex<ToastStack>>,
    preview: Arc<Mutex<MediaPreview>>,
    ui_state: Arc<Mutex<UiState>>,
    daily_song: Arc<Mutex<Option<Song>>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(config: Arc<AppConfig>, theme: ThemeResolver) -> Self {
        let toasts = ToastStack::new(config.toast.tuning());
        Self {
            config,
            theme: Arc::new(Mutex::new(theme)),
            toasts: Arc::new(Mutex::new(toasts)),
            preview: Arc::new(Mutex::new(MediaPreview::new())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            daily_song: Arc::new(Mutex::new(None)),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }

    /// Advances all time-driven state. Called once per event-loop iteration.
    pub async fn tick(&self, now: Instant) {
        self.toasts.lock().await.tick(now);
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub async fn effective_theme(&self) -> Theme {
        self.theme.lock().await.effective()
    }

    pub async fn toggle_theme(&self) -> Theme {
        let theme = self.theme.lock().await.toggle();
        tracing::debug!(theme = theme.as_str(), "theme toggled");
        theme
    }

    pub async fn system_hint_changed(&self, hint: Option<Theme>) {
        self.theme.lock().await.system_hint_changed(hint);
    }

    // ========================================================================
    // Toasts
    // ========================================================================

    pub async fn show_toast(&self, message: &str, duration: Option<Duration>) {
        self.toasts.lock().await.show(message, duration, Instant::now());
    }

    pub async fn get_toasts(&self) -> Vec<ToastView> {
        self.toasts.lock().await.views()
    }

    // ========================================================================
    // Page sections
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    pub async fn cycle_section_forward(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.active_section = ui.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.active_section = ui.active_section.prev();
    }

    pub async fn gallery_move_up(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.gallery_selected = ui.gallery_selected.saturating_sub(1);
    }

    pub async fn gallery_move_down(&self) {
        let mut ui = self.ui_state.lock().await;
        let last = self.config.gallery.len().saturating_sub(1);
        ui.gallery_selected = (ui.gallery_selected + 1).min(last);
    }

    // ========================================================================
    // Daily song
    // ========================================================================

    pub async fn set_daily_song(&self, song: Option<Song>) {
        *self.daily_song.lock().await = song;
    }

    pub async fn get_daily_song(&self) -> Option<Song> {
        self.daily_song.lock().await.clone()
    }

    // ========================================================================
    // Media preview
    // ========================================================================

    pub async fn is_preview_open(&self) -> bool {
        self.preview.lock().await.is_open()
    }

    pub async fn get_preview(&self) -> Option<PreviewView> {
        self.preview.lock().await.view()
    }

    /// Opens the preview, remembering the active section for focus
    /// restoration on close.
    pub async fn open_preview(&self, request: PreviewRequest) -> LoadTicket {
        let prior_focus = self.ui_state.lock().await.active_section;
        self.preview.lock().await.open(request, prior_focus)
    }

    pub async fn preview_show_image(&self, index: usize) -> Option<LoadTicket> {
        self.preview.lock().await.show_image(index)
    }

    pub async fn preview_navigate(&self, delta: isize) -> Option<LoadTicket> {
        self.preview.lock().await.navigate(delta)
    }

    /// Closes the preview and hands focus back to the section that had it.
    pub async fn close_preview(&self) {
        if let Some(section) = self.preview.lock().await.close() {
            self.ui_state.lock().await.active_section = section;
        }
    }

    pub async fn attach_loader(&self, generation: u64, handle: AbortHandle) {
        self.preview.lock().await.attach_loader(generation, handle);
    }

    pub async fn finish_image_load(&self, generation: u64, outcome: LoadOutcome) {
        self.preview.lock().await.finish_load(generation, outcome);
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prefs::PreferenceStore;

    fn model() -> AppModel {
        let config = Arc::new(AppConfig::default());
        let theme = ThemeResolver::new(PreferenceStore::unavailable(), None);
        AppModel::new(config, theme)
    }

    #[tokio::test]
    async fn closing_the_preview_restores_the_active_section() {
        let model = model();
        model.set_active_section(ActiveSection::DailySong).await;

        let request = PreviewRequest::new(model.config().gallery.clone()).unwrap();
        model.open_preview(request).await;
        model.set_active_section(ActiveSection::Gallery).await;

        model.close_preview().await;
        assert!(!model.is_preview_open().await);
        assert_eq!(
            model.get_ui_state().await.active_section,
            ActiveSection::DailySong
        );
    }

    #[tokio::test]
    async fn gallery_selection_is_bounded() {
        let model = model();
        let last = model.config().gallery.len() - 1;
        for _ in 0..10 {
            model.gallery_move_down().await;
        }
        assert_eq!(model.get_ui_state().await.gallery_selected, last);
        for _ in 0..10 {
            model.gallery_move_up().await;
        }
        assert_eq!(model.get_ui_state().await.gallery_selected, 0);
    }

    #[tokio::test]
    async fn toast_lifecycle_is_driven_by_tick() {
        let model = model();
        model.show_toast("hello", Some(Duration::from_millis(0))).await;
        assert_eq!(model.get_toasts().await.len(), 1);

        model.tick(Instant::now() + Duration::from_secs(1)).await;
        assert!(model.get_toasts().await.is_empty());
    }
}
