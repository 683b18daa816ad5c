//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (theme palette, geometry)
//! - `layout`: Main page structure (header, gallery, daily song, footer)
//! - `overlays`: Toast stack and media preview overlays

mod layout;
mod overlays;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::config::AppConfig;
use crate::model::{PreviewView, Song, Theme, ToastView, UiState};

pub use utils::preview_panel_rect;

/// Everything one frame needs, snapshotted out of the model.
pub struct RenderState<'a> {
    pub theme: Theme,
    pub ui: &'a UiState,
    pub toasts: &'a [ToastView],
    pub preview: Option<&'a PreviewView>,
    pub daily: Option<&'a Song>,
    pub config: &'a AppConfig,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &RenderState) {
        let palette = utils::palette(state.theme);

        // Paint the themed background first.
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            frame.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header: title, theme, update date
                Constraint::Min(0),    // Gallery + daily song
                Constraint::Length(1), // Footer hints
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], state, &palette);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Gallery
                Constraint::Percentage(60), // Daily song
            ])
            .split(chunks[1]);

        layout::render_gallery(frame, body[0], state, &palette);
        layout::render_daily_song(frame, body[1], state, &palette);
        layout::render_footer(frame, chunks[2], &palette);

        // Media preview overlay (if open)
        if let Some(preview) = state.preview {
            overlays::render_preview(frame, preview, &palette);
        }

        // Toasts stack above everything else.
        overlays::render_toasts(frame, state.toasts, &palette);
    }
}
