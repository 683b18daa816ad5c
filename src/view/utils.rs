//! Shared view helpers (theme palette, geometry)

use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::model::Theme;

/// Colors derived from the effective theme (the document-attribute analog).
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub dim: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            accent: Color::Blue,
            dim: Color::DarkGray,
        },
        Theme::Dark => Palette {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            dim: Color::DarkGray,
        },
    }
}

/// A rect of the given size centered in `area`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Where the preview panel sits; the rest of the frame is the backdrop.
pub fn preview_panel_rect(area: Rect) -> Rect {
    let width = (area.width * 4 / 5).max(30).min(area.width);
    let height = (area.height * 4 / 5).max(12).min(area.height);
    centered_rect(width, height, area)
}
