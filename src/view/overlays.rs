//! Overlay rendering (toast stack, media preview)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{LoadState, PreviewView, ToastView};

use super::utils::{centered_rect, preview_panel_rect, Palette};

pub fn render_toasts(frame: &mut Frame, toasts: &[ToastView], palette: &Palette) {
    let area = frame.area();

    for toast in toasts {
        // row_offset counts rows up from the bottom edge.
        if toast.row_offset + 1 > area.height {
            continue;
        }
        let y = area.height - 1 - toast.row_offset;
        let width = (Line::from(toast.message.as_str()).width() as u16 + 4).min(area.width);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y,
            width,
            height: 1,
        };

        let style = if toast.leaving {
            Style::default().fg(palette.dim)
        } else {
            Style::default().fg(palette.bg).bg(palette.fg)
        };

        frame.render_widget(Clear, rect);
        let widget = Paragraph::new(toast.message.clone())
            .alignment(Alignment::Center)
            .style(style);
        frame.render_widget(widget, rect);
    }
}

pub fn render_preview(frame: &mut Frame, preview: &PreviewView, palette: &Palette) {
    let area = frame.area();
    let panel = preview_panel_rect(area);

    frame.render_widget(Clear, panel);

    let image = preview.current();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {} ", image.alt))
        .style(Style::default().bg(palette.bg));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let nav_rows = if preview.has_navigation() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),          // Image surface
            Constraint::Length(1),       // Caption
            Constraint::Length(1),       // Actions
            Constraint::Length(nav_rows), // Prev/next + thumbnails
        ])
        .split(inner);

    render_image_surface(frame, chunks[0], preview, palette);

    let caption = Paragraph::new(image.caption().to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.fg));
    frame.render_widget(caption, chunks[1]);

    let download = match &image.download_name {
        Some(name) => format!("D 下載（{name}）   Esc 關閉"),
        None => "D 下載   Esc 關閉".to_string(),
    };
    let actions = Paragraph::new(download)
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.dim));
    frame.render_widget(actions, chunks[2]);

    if preview.has_navigation() {
        render_navigation(frame, chunks[3], preview, palette);
    }
}

fn render_image_surface(frame: &mut Frame, area: Rect, preview: &PreviewView, palette: &Palette) {
    let image = preview.current();
    let line = match preview.load_state {
        LoadState::Loading => Line::from(Span::styled(
            "載入中…",
            Style::default().fg(palette.dim).add_modifier(Modifier::ITALIC),
        )),
        LoadState::Ready { byte_len } => Line::from(vec![
            Span::styled("🖼  ", Style::default()),
            Span::styled(
                image.src.clone(),
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({:.1} KB)", byte_len as f64 / 1024.0),
                Style::default().fg(palette.dim),
            ),
        ]),
        LoadState::Failed => Line::from(Span::styled(
            "（圖片載入失敗）",
            Style::default().fg(palette.dim),
        )),
    };

    let rect = centered_rect(area.width, 1, area);
    let surface = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(surface, rect);
}

fn render_navigation(frame: &mut Frame, area: Rect, preview: &PreviewView, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let arrow = |enabled: bool| {
        if enabled {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.dim)
        }
    };
    let nav = Line::from(vec![
        Span::styled("◀ ←", arrow(preview.prev_enabled())),
        Span::styled(
            format!("   {} / {}   ", preview.current_index + 1, preview.images.len()),
            Style::default().fg(palette.fg),
        ),
        Span::styled("→ ▶", arrow(preview.next_enabled())),
    ]);
    frame.render_widget(Paragraph::new(nav).alignment(Alignment::Center), rows[0]);

    // One numbered thumbnail per image; digits jump directly.
    let mut spans = Vec::new();
    for (i, _) in preview.images.iter().enumerate() {
        let style = if i == preview.current_index {
            Style::default().fg(palette.bg).bg(palette.accent)
        } else {
            Style::default().fg(palette.dim)
        };
        spans.push(Span::styled(format!("[{}]", i + 1), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        rows[1],
    );
}
