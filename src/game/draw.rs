// Drawing commands issued by the engine. Coordinates are virtual field units;
// the backend decides how they map onto its surface.

use super::rect::Rect;

/// Rendering role of a shape. Backends map each role to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ink {
    Paddle,
    Ball,
    CenterLine,
    Score,
    Text,
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge of the text
    Left,
    /// `x` is the horizontal center of the text
    Center,
}

/// A line of text anchored at a point in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: Align,
    pub bold: bool,
    pub ink: Ink,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            align: Align::Left,
            bold: false,
            ink: Ink::Text,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn ink(mut self, ink: Ink) -> Self {
        self.ink = ink;
        self
    }
}

/// Rendering collaborator
pub trait Painter {
    fn fill_rect(&mut self, rect: Rect, ink: Ink);

    /// Ellipse inscribed in `rect`
    fn fill_ellipse(&mut self, rect: Rect, ink: Ink);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), ink: Ink);

    fn text(&mut self, label: &Label);

    /// Opaque backdrop for overlay text; hides whatever is underneath
    fn panel(&mut self, rect: Rect, ink: Ink);
}

/// Painter that records every command, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub rects: Vec<(Rect, Ink)>,
    pub ellipses: Vec<(Rect, Ink)>,
    pub lines: Vec<((f32, f32), (f32, f32), Ink)>,
    pub labels: Vec<Label>,
    pub panels: Vec<(Rect, Ink)>,
}

#[cfg(test)]
impl RecordingPainter {
    pub fn texts(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.labels.iter().any(|l| l.text == text)
    }
}

#[cfg(test)]
impl Painter for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, ink: Ink) {
        self.rects.push((rect, ink));
    }

    fn fill_ellipse(&mut self, rect: Rect, ink: Ink) {
        self.ellipses.push((rect, ink));
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), ink: Ink) {
        self.lines.push((from, to, ink));
    }

    fn text(&mut self, label: &Label) {
        self.labels.push(label.clone());
    }

    fn panel(&mut self, rect: Rect, ink: Ink) {
        self.panels.push((rect, ink));
    }
}
