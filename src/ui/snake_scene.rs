//! Game scene: the address bar, a magnified copy of the board, and stats.
//!
//! The magnified board uses half-block pixel rendering. Each grid cell maps to
//! a colored pixel; pairs of vertical pixels are packed into one terminal row
//! using the `▀` (upper half block) character with fg=top, bg=bottom colors.

use super::game_common::{create_scene_layout, render_status_bar, render_titled_block};
use crate::core::game_loop::GameLoop;
use crate::high_score::HighScore;
use crate::snake::types::{Cell, Grid, Position};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::VecDeque;
use std::time::Duration;

const HALF_TOP: char = '\u{2580}'; // ▀: fg fills the top half, bg the bottom half

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const FOOD_COLOR: Color = Color::Rgb(255, 80, 40);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);

/// Everything the scene shows, borrowed from the running game.
pub struct SceneView<'a> {
    pub grid: &'a Grid,
    pub snake: &'a VecDeque<Position>,
    /// The string most recently handed to the display sink
    pub address: &'a str,
    pub score: u32,
    pub best: &'a HighScore,
    pub tick_interval: Duration,
    pub paused: bool,
    pub runs_finished: u64,
    /// Frames the title sink refused and the fallback took instead
    pub title_fallbacks: u64,
    /// Port of the browser client, when serving
    pub web_port: Option<u16>,
}

impl<'a> SceneView<'a> {
    pub fn from_loop<R>(
        game: &'a GameLoop<R>,
        address: &'a str,
        title_fallbacks: u64,
        web_port: Option<u16>,
    ) -> Self {
        let engine = game.engine();
        Self {
            grid: engine.grid(),
            snake: engine.snake(),
            address,
            score: engine.score(),
            best: game.scores().best(),
            tick_interval: engine.tick_interval(),
            paused: game.is_paused(),
            runs_finished: game.runs_finished(),
            title_fallbacks,
            web_port,
        }
    }
}

/// Render the game scene.
pub fn render_snake_scene(frame: &mut Frame, area: Rect, view: &SceneView) {
    let layout = create_scene_layout(frame, area, " urlsnake ", Color::LightGreen, 26);

    render_address_bar(frame, layout.address_bar, view.address);
    render_play_field(frame, layout.field, view);
    render_status_bar_content(frame, layout.status_bar, view);
    render_info_panel(frame, layout.info_panel, view);
}

/// The frame as a browser would show it in its location bar.
fn render_address_bar(frame: &mut Frame, area: Rect, address: &str) {
    let inner = render_titled_block(frame, area, " Address ");

    let line = Line::from(vec![
        Span::styled("localhost/", Style::default().fg(Color::DarkGray)),
        Span::styled(address, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Calculate interpolated RGB color for a snake body segment.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Pixel colors in grid coordinates, `None` for empty cells.
fn pixel_colors(view: &SceneView) -> Vec<Vec<Option<Color>>> {
    let grid_w = view.grid.width() as usize;
    let grid_h = view.grid.height() as usize;
    let mut pixels = vec![vec![None; grid_w]; grid_h];

    for pos in view.grid.positions() {
        if view.grid.get(pos) == Cell::Food {
            pixels[pos.y as usize][pos.x as usize] = Some(FOOD_COLOR);
        }
    }

    let snake_len = view.snake.len();
    for (i, seg) in view.snake.iter().enumerate() {
        pixels[seg.y as usize][seg.x as usize] = Some(if i == 0 {
            HEAD_COLOR
        } else {
            body_color(i, snake_len)
        });
    }
    pixels
}

/// Render the board magnified with half-block pixels inside a border.
fn render_play_field(frame: &mut Frame, area: Rect, view: &SceneView) {
    let grid_w = view.grid.width() as u16;
    let content_rows = (view.grid.height() as u16).div_ceil(2);
    let render_w = (grid_w + 2).min(area.width);
    let render_h = (content_rows + 2).min(area.height);
    if render_w < 3 || render_h < 3 {
        return;
    }

    let x_off = area.x + area.width.saturating_sub(render_w) / 2;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 80, 80)));
    let field = Rect::new(x_off, area.y, render_w, render_h);
    let inner = block.inner(field);
    frame.render_widget(block, field);

    let pixels = pixel_colors(view);
    let empty_row: Vec<Option<Color>> = vec![None; grid_w as usize];
    let mut lines = Vec::new();
    for term_row in 0..content_rows as usize {
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        // Batch consecutive cells with the same style
        let mut spans: Vec<Span> = Vec::new();
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();
        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);
            if fg != cur_fg || bg != cur_bg {
                if !cur_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut cur_text),
                        Style::default().fg(cur_fg).bg(cur_bg),
                    ));
                }
                cur_fg = fg;
                cur_bg = bg;
            }
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the status bar below the play field.
fn render_status_bar_content(frame: &mut Frame, area: Rect, view: &SceneView) {
    if view.paused {
        render_status_bar(
            frame,
            area,
            ("Paused", Color::Yellow),
            &[("[Space]", "Resume"), ("[Q]", "Quit")],
        );
        return;
    }

    render_status_bar(
        frame,
        area,
        ("Slither!", Color::Green),
        &[("[Arrows/WASD]", "Move"), ("[Space]", "Pause"), ("[Q]", "Quit")],
    );
}

fn stat_line<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, view: &SceneView) {
    let inner = render_titled_block(frame, area, " Info ");

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        stat_line("Best: ", view.best.best_score.to_string()),
        stat_line("Length: ", view.snake.len().to_string()),
        stat_line(
            "Speed: ",
            format!("{:.1}ms", view.tick_interval.as_secs_f64() * 1000.0),
        ),
        stat_line("Runs: ", view.runs_finished.to_string()),
    ];

    if view.title_fallbacks > 0 {
        lines.push(stat_line(
            "Title skips: ",
            view.title_fallbacks.to_string(),
        ));
    }
    if let Some(port) = view.web_port {
        lines.push(stat_line("Web: ", format!("localhost:{}", port)));
    }

    if !view.best.best_bitmap.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Best run:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            view.best.best_bitmap.as_str(),
            Style::default().fg(Color::LightGreen),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_color_gradient() {
        assert_eq!(body_color(0, 5), Color::Rgb(50, 220, 50));
        assert_eq!(body_color(4, 5), Color::Rgb(20, 80, 20));
        // A single segment must not divide by zero.
        assert_eq!(body_color(1, 1), Color::Rgb(20, 80, 20));
    }

    #[test]
    fn test_pixel_colors_marks_head_body_and_food() {
        let mut grid = Grid::new(4, 4);
        let snake: VecDeque<Position> = [Position::new(1, 0), Position::new(0, 0)].into();
        for seg in &snake {
            grid.set(*seg, Cell::Snake);
        }
        grid.set(Position::new(3, 3), Cell::Food);
        let best = HighScore::default();
        let view = SceneView {
            grid: &grid,
            snake: &snake,
            address: "",
            score: 0,
            best: &best,
            tick_interval: Duration::from_millis(125),
            paused: false,
            runs_finished: 0,
            title_fallbacks: 0,
            web_port: None,
        };

        let pixels = pixel_colors(&view);
        assert_eq!(pixels[0][1], Some(HEAD_COLOR));
        assert!(pixels[0][0].is_some());
        assert_eq!(pixels[3][3], Some(FOOD_COLOR));
        assert_eq!(pixels[2][2], None);
    }
}
