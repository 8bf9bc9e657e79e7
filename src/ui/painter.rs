// Terminal implementation of the engine's Painter.
// Shapes go onto a Braille canvas; text and panels are collected and drawn as
// widgets on top of it when the frame is presented.

use ratatui::{
    layout::Rect as CellRect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::braille::BrailleCanvas;
use super::overlay::render_panel;
use crate::config::DisplayConfig;
use crate::game::{Align, Field, Ink, Label, Painter, Rect};

/// Colour for every ink role
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub paddle: Color,
    pub ball: Color,
    pub center_line: Color,
    pub text: Color,
    pub panel: Color,
}

impl Palette {
    pub fn from_config(display: &DisplayConfig) -> Self {
        let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
        Self {
            paddle: rgb(display.paddle_color),
            ball: rgb(display.ball_color),
            center_line: rgb(display.center_line_color),
            text: rgb(display.text_color),
            panel: rgb(display.panel_color),
        }
    }

    pub fn color(&self, ink: Ink) -> Color {
        match ink {
            Ink::Paddle => self.paddle,
            Ink::Ball => self.ball,
            Ink::CenterLine => self.center_line,
            Ink::Score | Ink::Text => self.text,
            Ink::Panel => self.panel,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

/// Label resolved to a terminal position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub col: u16,
    pub row: u16,
    pub style: Style,
}

pub struct TerminalPainter<'a> {
    palette: &'a Palette,
    area: CellRect,
    canvas: BrailleCanvas,
    field: Field,
    panels: Vec<(CellRect, Color)>,
    texts: Vec<PlacedText>,
}

impl<'a> TerminalPainter<'a> {
    /// Painter mapping `field` onto the cells of `area`
    pub fn new(area: CellRect, field: Field, palette: &'a Palette) -> Self {
        let canvas = BrailleCanvas::new(area.width as usize, area.height as usize);
        Self {
            palette,
            area,
            canvas,
            field,
            panels: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Virtual x -> Braille pixel column
    fn px(&self, x: f32) -> f32 {
        x * self.canvas.pixel_width() as f32 / self.field.width
    }

    /// Virtual y -> Braille pixel row
    fn py(&self, y: f32) -> f32 {
        y * self.canvas.pixel_height() as f32 / self.field.height
    }

    /// Virtual rect -> pixel rect, never smaller than one pixel
    fn pixel_rect(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let x = self.px(rect.x).max(0.0);
        let y = self.py(rect.y).max(0.0);
        let width = self.px(rect.width).round().max(1.0);
        let height = self.py(rect.height).round().max(1.0);
        (x as usize, y as usize, width as usize, height as usize)
    }

    fn cell_col(&self, x: f32) -> u16 {
        let col = (self.px(x) / 2.0).max(0.0) as u16;
        col.min(self.area.width.saturating_sub(1))
    }

    fn cell_row(&self, y: f32) -> u16 {
        let row = (self.py(y) / 4.0).max(0.0) as u16;
        row.min(self.area.height.saturating_sub(1))
    }

    #[cfg(test)]
    pub fn texts(&self) -> &[PlacedText] {
        &self.texts
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &BrailleCanvas {
        &self.canvas
    }

    /// Draw everything collected so far: canvas, then panels, then text
    pub fn present(self, frame: &mut Frame) {
        let area = self.area;

        for y in 0..self.canvas.height() {
            let mut spans: Vec<Span> = Vec::new();
            let mut run = String::new();
            let mut run_color = self.canvas.color_at(0, y);

            for x in 0..self.canvas.width() {
                let color = self.canvas.color_at(x, y);
                if color != run_color && !run.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut run),
                        Style::default().fg(run_color),
                    ));
                }
                run_color = color;
                run.push(self.canvas.to_char(x, y));
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, Style::default().fg(run_color)));
            }

            let row_area = CellRect {
                x: area.x,
                y: area.y + y as u16,
                width: area.width,
                height: 1,
            };
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }

        for (panel, color) in &self.panels {
            render_panel(frame, *panel, *color, self.palette.text);
        }

        for text in &self.texts {
            let len = text.text.chars().count() as u16;
            let width = len.min(area.width.saturating_sub(text.col));
            let text_area = CellRect {
                x: area.x + text.col,
                y: area.y + text.row,
                width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(text.text.as_str()).style(text.style),
                text_area,
            );
        }
    }
}

impl Painter for TerminalPainter<'_> {
    fn fill_rect(&mut self, rect: Rect, ink: Ink) {
        let (x, y, w, h) = self.pixel_rect(rect);
        let color = self.palette.color(ink);
        self.canvas.fill_rect(x, y, w, h, color);
    }

    fn fill_ellipse(&mut self, rect: Rect, ink: Ink) {
        let (x, y, w, h) = self.pixel_rect(rect);
        let color = self.palette.color(ink);
        self.canvas.fill_ellipse(x, y, w, h, color);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), ink: Ink) {
        let max_x = self.canvas.pixel_width().saturating_sub(1) as f32;
        let max_y = self.canvas.pixel_height().saturating_sub(1) as f32;
        let scale = |(x, y): (f32, f32)| {
            (self.px(x).clamp(0.0, max_x), self.py(y).clamp(0.0, max_y))
        };
        let (from, to) = (scale(from), scale(to));
        let color = self.palette.color(ink);
        self.canvas.draw_line(from, to, color);
    }

    fn text(&mut self, label: &Label) {
        let len = label.text.chars().count() as u16;
        let anchor = self.cell_col(label.x);
        let col = match label.align {
            Align::Left => anchor,
            Align::Center => anchor.saturating_sub(len / 2),
        };

        let mut style = Style::default().fg(self.palette.color(label.ink));
        if label.bold {
            style = style.add_modifier(Modifier::BOLD);
        }

        self.texts.push(PlacedText {
            text: label.text.clone(),
            col,
            row: self.cell_row(label.y),
            style,
        });
    }

    fn panel(&mut self, rect: Rect, ink: Ink) {
        let col = self.cell_col(rect.x);
        let row = self.cell_row(rect.y);
        let right = self.cell_col(rect.right());
        let bottom = self.cell_row(rect.bottom());
        let cells = CellRect {
            x: self.area.x + col,
            y: self.area.y + row,
            width: right.saturating_sub(col).max(1),
            height: bottom.saturating_sub(row).max(1),
        };
        self.panels.push((cells, self.palette.color(ink)));
    }
}
