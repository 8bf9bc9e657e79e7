// Overlay panels and full-screen notices drawn on top of the playfield

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Opaque bordered box. Whatever was drawn underneath is cleared first.
pub fn render_panel(frame: &mut Frame, area: Rect, background: Color, border: Color) {
    let area = area.intersection(frame.area());
    if area.width == 0 || area.height == 0 {
        return;
    }

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(background));

    frame.render_widget(block, area);
}

/// Centered message box sized to its lines, used when the terminal cannot
/// fit the playfield
pub fn render_notice(frame: &mut Frame, lines: &[&str], color: Color) {
    let area = frame.area();

    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);

    // Add padding for borders and spacing
    let width = (max_line_length as u16 + 4).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);

    let notice_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, notice_area);

    let text_lines: Vec<Line> = lines
        .iter()
        .map(|line| Line::from(Span::styled(*line, Style::default().fg(color))))
        .collect();

    let paragraph = Paragraph::new(text_lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );

    frame.render_widget(paragraph, notice_area);
}
