use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Clear, Paragraph, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::clock::Clock;
use crate::delay::DelaySource;
use crate::scene::{rating_color, Scene, Tone, AMBER, BLUE, GREEN, RED};
use crate::stats::{format_ms, StatsSnapshot};

const HORIZONTAL_MARGIN: u16 = 2;
const BUTTON_WIDTH: u16 = 18;

/// Screen regions, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub canvas: Rect,
    pub start_button: Rect,
    pub reset_button: Rect,
    pub message: Rect,
    pub stats: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(6),    // canvas
            Constraint::Length(3), // buttons
            Constraint::Length(1), // error message
            Constraint::Length(3), // stats
            Constraint::Length(1), // help
        ])
        .split(area);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Length(2),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .split(rows[2]);

    ScreenLayout {
        title: rows[0],
        canvas: rows[1],
        start_button: buttons[1],
        reset_button: buttons[3],
        message: rows[3],
        stats: rows[4],
        help: rows[5],
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Prompt => BLUE,
        Tone::Waiting => AMBER,
        Tone::React => GREEN,
        Tone::Error => RED,
    }
}

impl<C: Clock, D: DelaySource> Widget for &App<C, D> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = screen_layout(area);
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        Paragraph::new(Span::styled(
            "flinch: test your reactions",
            bold_style.fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(layout.title, buf);

        render_canvas(&self.scene, layout.canvas, buf);
        render_status(&self.scene, layout.canvas, buf);

        let start_style = if self.scene.start_enabled() {
            bold_style.fg(GREEN)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        render_button(self.scene.start_label(), start_style, layout.start_button, buf);
        render_button("Reset Stats", bold_style.fg(BLUE), layout.reset_button, buf);

        if let Some(error) = self.scene.error() {
            Paragraph::new(Span::styled(error, bold_style.fg(RED)))
                .alignment(Alignment::Center)
                .render(layout.message, buf);
        }

        render_stats(self.scene.stats(), layout.stats, buf);

        if self.show_help {
            Paragraph::new(Span::styled(
                "(s)tart / (space) or click scene to react / (r)eset / (?) help / (q)uit",
                Style::default().add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(layout.help, buf);
        }
    }
}

fn render_canvas(scene: &Scene, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        block.render(area, buf);
        return;
    }

    // braille dots are square when a cell is twice as tall as it is wide
    let aspect = f64::from(inner.width) / (2.0 * f64::from(inner.height));
    let segments = scene.segments();

    Canvas::default()
        .block(block)
        .background_color(Color::Rgb(0x1E, 0x29, 0x3B))
        .marker(Marker::Braille)
        .x_bounds([-aspect, aspect])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for s in &segments {
                ctx.draw(&CanvasLine::new(s.from.0, s.from.1, s.to.0, s.to.1, s.color));
            }
        })
        .render(area, buf);
}

/// Headline and subtext boxed over the centre of the canvas
fn render_status(scene: &Scene, canvas: Rect, buf: &mut Buffer) {
    let status = scene.status();
    let text_width = status.headline.width().max(status.subtext.width()) as u16;
    let width = (text_width + 4).min(canvas.width);
    let height = 4.min(canvas.height);
    let overlay = Rect::new(
        canvas.x + (canvas.width - width) / 2,
        canvas.y + (canvas.height - height) / 2,
        width,
        height,
    );

    let headline_style = Style::default()
        .add_modifier(Modifier::BOLD)
        .fg(tone_color(status.tone));
    let subtext_style = match status.accent {
        Some(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
        None => Style::default().fg(Color::Gray),
    };

    Clear.render(overlay, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(status.headline.as_str(), headline_style)),
        Line::from(Span::styled(status.subtext.as_str(), subtext_style)),
    ])
    .block(Block::default().borders(Borders::ALL).border_style(headline_style))
    .alignment(Alignment::Center)
    .render(overlay, buf);
}

fn render_button(label: &str, style: Style, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(label, style))
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_stats(stats: &StatsSnapshot, area: Rect, buf: &mut Buffer) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let value_style = Style::default().add_modifier(Modifier::BOLD);
    let rating = match stats.rating {
        Some(r) => Span::styled(format!("{} {}", r.symbol(), r), value_style.fg(rating_color(r))),
        None => Span::styled("-", value_style.fg(BLUE)),
    };
    let spread = stats
        .std_dev_ms
        .filter(|_| stats.attempts > 1)
        .map_or_else(|| "-".to_string(), |sd| format!("±{sd:.0} ms"));

    let entries = [
        ("Attempts", Span::styled(stats.attempts.to_string(), value_style)),
        ("Average", Span::styled(format_ms(stats.average_ms), value_style)),
        ("Best", Span::styled(format_ms(stats.best_ms), value_style)),
        ("Spread", Span::styled(spread, value_style)),
        ("Rating", rating),
    ];

    for ((title, value), cell) in entries.into_iter().zip(cells.iter()) {
        Paragraph::new(Line::from(value))
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center)
            .render(*cell, buf);
    }
}
