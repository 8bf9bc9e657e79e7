pub mod ball;
pub mod draw;
pub mod engine;
pub mod input;
pub mod paddle;
pub mod rect;
pub mod state;

pub use draw::{Align, Ink, Label, Painter};
pub use engine::{Flow, GameEngine, TickEvents};
pub use input::{Command, PaddleInput};
pub use rect::{Field, Rect};
pub use state::Phase;
