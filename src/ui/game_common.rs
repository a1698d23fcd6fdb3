//! Screen layout shared by the scene: address strip, board, hints and stats.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows taken by the bordered address strip.
pub const ADDRESS_BAR_HEIGHT: u16 = 3;
/// Rows taken by the status line and the key hints under it.
pub const STATUS_BAR_HEIGHT: u16 = 2;

/// Areas of the game screen, all inside the outer border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    /// Bordered strip across the top of the left column
    pub address_bar: Rect,
    /// Magnified board, between the address strip and the status bar
    pub field: Rect,
    pub status_bar: Rect,
    /// Right column, with its own border
    pub info_panel: Rect,
}

/// Split `area` into the game screen and draw the outer border.
///
/// ```text
/// ┌─ title ──────────────────────────┬─ Info ─────┐
/// │┌─ Address ──────────────────────┐│            │
/// ││ localhost/#|⠀⠀⠀⠀|              ││            │
/// │└────────────────────────────────┘│            │
/// │  [field]                         │            │
/// │  [status + hints]                │            │
/// └──────────────────────────────────┴────────────┘
/// ```
pub fn create_scene_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> SceneLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    split_scene(inner, info_panel_width)
}

/// The pure part of [`create_scene_layout`].
pub fn split_scene(inner: Rect, info_panel_width: u16) -> SceneLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ADDRESS_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(columns[0]);

    SceneLayout {
        address_bar: rows[0],
        field: rows[1],
        status_bar: rows[2],
        info_panel: columns[1],
    }
}

/// A titled block with a dark gray border; returns the area inside it.
pub fn render_titled_block(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Centered status message with a line of `(key, action)` hints below it.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status: (&str, Color),
    hints: &[(&str, &str)],
) {
    let mut lines = vec![Line::styled(status.0, Style::default().fg(status.1))];

    let hint_spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, &(key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    if !hint_spans.is_empty() {
        lines.push(Line::from(hint_spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
