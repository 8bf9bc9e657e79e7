use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use super::overlay::render_notice;
use super::painter::{Palette, TerminalPainter};
use crate::game::{GameEngine, Phase};

// Smallest terminal that still shows both paddles, the ball and the overlays
pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 15;

/// Static presentation settings for the whole session
pub struct Theme {
    pub palette: Palette,
    /// Shown on the bottom row while a match is running
    pub controls_hint: String,
}

pub fn render(frame: &mut Frame, engine: &GameEngine, theme: &Theme) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let needed = format!("Need at least {}x{}", MIN_WIDTH, MIN_HEIGHT);
        render_notice(frame, &["Terminal too small", &needed], Color::White);
        return;
    }

    // Playfield takes every row but the last, which holds the controls hint
    let field_area = Rect {
        height: area.height - 1,
        ..area
    };

    let mut painter = TerminalPainter::new(field_area, engine.field(), &theme.palette);
    engine.render(&mut painter);
    painter.present(frame);

    if matches!(engine.phase(), Phase::Playing { .. }) {
        draw_controls(frame, area, &theme.controls_hint);
    }
}

fn draw_controls(frame: &mut Frame, area: Rect, hint: &str) {
    let controls = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    let controls_area = Rect {
        x: area.x,
        y: area.y + area.height - 1,
        width: area.width,
        height: 1,
    };

    frame.render_widget(controls, controls_area);
}
