pub mod braille;
pub mod overlay;
pub mod painter;
pub mod render;

pub use painter::Palette;
pub use render::{render, Theme};
