//! Layout rendering (header, gallery, daily song panel, footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::model::ActiveSection;

use super::utils::Palette;
use super::RenderState;

pub fn render_header(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Site title + logo
            Constraint::Length(26), // Theme indicator
            Constraint::Length(24), // Update date
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            state.config.site_title.clone(),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(state.config.theme.logo.clone(), Style::default().fg(palette.dim)),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(title, chunks[0]);

    let icon = state.config.theme_icon(state.theme);
    let theme_box = Paragraph::new(format!("{} {}", state.theme.as_str(), icon))
        .style(Style::default().fg(palette.fg))
        .block(Block::default().borders(Borders::ALL).title(" 主題 (T) "));
    frame.render_widget(theme_box, chunks[1]);

    let date_box = Paragraph::new(state.config.update_date.clone())
        .style(Style::default().fg(palette.dim))
        .block(Block::default().borders(Borders::ALL).title(" 更新 (U) "));
    frame.render_widget(date_box, chunks[2]);
}

pub fn render_gallery(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let active = state.ui.active_section == ActiveSection::Gallery;

    let items: Vec<ListItem> = state
        .config
        .gallery
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let style = if i == state.ui.gallery_selected && active {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else if i == state.ui.gallery_selected {
                Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };
            ListItem::new(format!("🖼  {}", image.alt)).style(style)
        })
        .collect();

    let border_style = if active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.dim)
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 畫廊 ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(state.ui.gallery_selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_daily_song(frame: &mut Frame, area: Rect, state: &RenderState, palette: &Palette) {
    let active = state.ui.active_section == ActiveSection::DailySong;
    let border_style = if active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.dim)
    };

    let lines = match state.daily {
        Some(song) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    song.display_title(),
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )),
                Line::raw(""),
                Line::from(format!("作曲：{}", song.artist)),
            ];
            if let Some(from) = &song.from {
                lines.push(Line::from(format!("來自：{from}")));
            }
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                song.url.clone(),
                Style::default().fg(palette.dim),
            )));
            lines
        }
        None => vec![Line::from("（這裡還沒有歌曲呢QwQ）")],
    };

    let panel = Paragraph::new(lines)
        .style(Style::default().fg(palette.fg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" 每日歌曲 ")
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(panel, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hints = Paragraph::new(
        "Tab 切換區塊   Enter 開啟   T 主題   O 原圖   U 更新日期   Q 離開",
    )
    .style(Style::default().fg(palette.dim));
    frame.render_widget(hints, area);
}
