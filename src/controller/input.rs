//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::model::ActiveSection;
use crate::view::preview_panel_rect;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // The code matcher listens globally, like its document-level original.
        self.observe_konami(key.code).await;

        // Keyboard handling scoped to an open preview session
        if self.model.lock().await.is_preview_open().await {
            match key.code {
                KeyCode::Esc => {
                    self.model.lock().await.close_preview().await;
                }
                KeyCode::Left => {
                    let ticket = {
                        let model = self.model.lock().await;
                        model.preview_navigate(-1).await
                    };
                    if let Some(ticket) = ticket {
                        self.start_image_load(ticket).await;
                    }
                }
                KeyCode::Right => {
                    let ticket = {
                        let model = self.model.lock().await;
                        model.preview_navigate(1).await
                    };
                    if let Some(ticket) = ticket {
                        self.start_image_load(ticket).await;
                    }
                }
                // Digit keys jump straight to a thumbnail.
                KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                    let index = (c as usize) - ('1' as usize);
                    let ticket = {
                        let model = self.model.lock().await;
                        model.preview_show_image(index).await
                    };
                    if let Some(ticket) = ticket {
                        self.start_image_load(ticket).await;
                    }
                }
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.announce_download().await;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.model.lock().await.set_should_quit(true).await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Main page keybindings
        let model = self.model.lock().await;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            KeyCode::Up => {
                if model.get_ui_state().await.active_section == ActiveSection::Gallery {
                    model.gallery_move_up().await;
                }
            }
            KeyCode::Down => {
                if model.get_ui_state().await.active_section == ActiveSection::Gallery {
                    model.gallery_move_down().await;
                }
            }
            KeyCode::Enter => {
                let section = model.get_ui_state().await.active_section;
                drop(model);
                match section {
                    ActiveSection::Gallery => self.open_gallery().await,
                    ActiveSection::DailySong => self.activate_daily_song().await,
                }
            }
            // Theme toggle (also feeds the toggle-spam egg)
            KeyCode::Char('t') | KeyCode::Char('T') => {
                drop(model);
                self.toggle_theme().await;
            }
            // The "last updated" date in the header
            KeyCode::Char('u') | KeyCode::Char('U') => {
                drop(model);
                self.press_update_date().await;
            }
            // Original-resolution picture shortcut
            KeyCode::Char('o') | KeyCode::Char('O') => {
                drop(model);
                self.open_original_picture().await;
            }
            _ => {}
        }
        Ok(())
    }

    /// A press on the backdrop (anywhere outside the preview panel) closes
    /// the preview, like a click beside the lightbox.
    pub async fn handle_mouse_event(&self, mouse: MouseEvent) -> Result<()> {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Ok(());
        }
        let model = self.model.lock().await;
        if !model.is_preview_open().await {
            return Ok(());
        }
        let (width, height) = crossterm::terminal::size()?;
        let panel = preview_panel_rect(Rect::new(0, 0, width, height));
        if !panel.contains(Position::new(mouse.column, mouse.row)) {
            model.close_preview().await;
        }
        Ok(())
    }

    async fn announce_download(&self) {
        let model = self.model.lock().await;
        if let Some(view) = model.get_preview().await {
            let image = view.current();
            let message = match &image.download_name {
                Some(name) => format!("下載：{name}"),
                None => format!("下載：{}", image.download_href()),
            };
            model.show_toast(&message, None).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use crate::config::AppConfig;
    use crate::model::{AppModel, PreferenceStore, Theme, ThemeResolver};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn controller() -> AppController {
        let config = Arc::new(AppConfig::default());
        let theme = ThemeResolver::new(PreferenceStore::unavailable(), None);
        let model = Arc::new(Mutex::new(AppModel::new(config.clone(), theme)));
        AppController::new(model, config)
    }

    #[tokio::test]
    async fn q_requests_quit() {
        let controller = controller();
        controller.handle_key_event(key(KeyCode::Char('q'))).await.unwrap();
        assert!(controller.model.lock().await.should_quit().await);
    }

    #[tokio::test]
    async fn t_toggles_the_theme() {
        let controller = controller();
        controller.handle_key_event(key(KeyCode::Char('t'))).await.unwrap();
        let model = controller.model.lock().await;
        assert_eq!(model.effective_theme().await, Theme::Dark);
    }

    #[tokio::test]
    async fn enter_on_the_gallery_opens_the_preview() {
        let controller = controller();
        controller.handle_key_event(key(KeyCode::Enter)).await.unwrap();
        let model = controller.model.lock().await;
        assert!(model.is_preview_open().await);
    }

    #[tokio::test]
    async fn escape_closes_the_preview_and_restores_focus() {
        let controller = controller();
        controller.open_gallery().await;
        controller.handle_key_event(key(KeyCode::Esc)).await.unwrap();
        let model = controller.model.lock().await;
        assert!(!model.is_preview_open().await);
        assert_eq!(
            model.get_ui_state().await.active_section,
            ActiveSection::Gallery
        );
    }

    #[tokio::test]
    async fn arrows_navigate_while_the_preview_is_open() {
        let controller = controller();
        controller.open_gallery().await;
        controller.handle_key_event(key(KeyCode::Right)).await.unwrap();
        {
            let model = controller.model.lock().await;
            assert_eq!(model.get_preview().await.unwrap().current_index, 1);
        }
        controller.handle_key_event(key(KeyCode::Left)).await.unwrap();
        let model = controller.model.lock().await;
        assert_eq!(model.get_preview().await.unwrap().current_index, 0);
    }

    #[tokio::test]
    async fn digit_keys_jump_to_a_thumbnail() {
        let controller = controller();
        controller.open_gallery().await;
        controller.handle_key_event(key(KeyCode::Char('2'))).await.unwrap();
        let model = controller.model.lock().await;
        assert_eq!(model.get_preview().await.unwrap().current_index, 1);
    }

    #[tokio::test]
    async fn out_of_range_digit_is_a_no_op() {
        let controller = controller();
        controller.open_gallery().await;
        controller.handle_key_event(key(KeyCode::Char('9'))).await.unwrap();
        let model = controller.model.lock().await;
        assert_eq!(model.get_preview().await.unwrap().current_index, 0);
    }

    #[tokio::test]
    async fn page_keys_are_inert_while_the_preview_is_open() {
        let controller = controller();
        controller.open_gallery().await;
        controller.handle_key_event(key(KeyCode::Char('q'))).await.unwrap();
        let model = controller.model.lock().await;
        assert!(!model.should_quit().await);
        assert!(model.is_preview_open().await);
    }
}
