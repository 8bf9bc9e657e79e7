use super::ball::Ball;
use super::rect::Rect;

pub const PADDLE_WIDTH: f32 = 10.0;
pub const PADDLE_HEIGHT: f32 = 100.0;

// Distance moved per tick while a movement key is held
pub const PLAYER_STEP: f32 = 10.0;

// The AI tracks slower than the player can move, otherwise it never misses
pub const AI_STEP: f32 = 7.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    /// Paddle vertically centered in a field of the given height
    pub fn centered(x: f32, bound_height: f32) -> Self {
        Self::new(x, bound_height / 2.0 - PADDLE_HEIGHT / 2.0)
    }

    pub fn recenter(&mut self, bound_height: f32) {
        self.y = bound_height / 2.0 - self.height / 2.0;
    }

    /// Move by `delta` and keep the paddle fully inside `[0, bound_height]`
    pub fn move_by(&mut self, delta: f32, bound_height: f32) {
        let max_y = (bound_height - self.height).max(0.0);
        self.y = (self.y + delta).clamp(0.0, max_y);
    }

    /// Step the paddle center toward the ball center, at most `AI_STEP` per tick.
    pub fn auto_track(&mut self, ball: &Ball, bound_height: f32) {
        let target = ball.rect().center_y();
        let diff = target - self.rect().center_y();
        self.move_by(diff.clamp(-AI_STEP, AI_STEP), bound_height);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
