use rand::Rng;

use super::paddle::Paddle;
use super::rect::{Field, Rect};
use super::state::Side;

pub const BALL_SIZE: f32 = 7.0;
pub const BALL_SPEED_X: f32 = 5.0;
pub const BALL_SPEED_Y: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    origin_x: f32,
    origin_y: f32,
    // Position before the last `advance`, start of the sub-step sweep
    prev_x: f32,
    prev_y: f32,
    field: Field,
}

impl Ball {
    /// Ball at its spawn point with the given velocity
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, field: Field) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            width: BALL_SIZE,
            height: BALL_SIZE,
            origin_x: x,
            origin_y: y,
            prev_x: x,
            prev_y: y,
            field,
        }
    }

    /// Ball spawned at the field center, served in a random diagonal direction
    pub fn serve<R: Rng + ?Sized>(field: Field, rng: &mut R) -> Self {
        let vx = random_sign(rng) * BALL_SPEED_X;
        let vy = random_sign(rng) * BALL_SPEED_Y;
        Self::new(field.width / 2.0, field.height / 2.0, vx, vy, field)
    }

    #[cfg(test)]
    pub fn with_velocity(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self::new(x, y, vx, vy, Field::default())
    }

    /// Place the ball mid-flight without sweeping from its old position
    #[cfg(test)]
    pub fn teleport(&mut self, x: f32, y: f32, vx: f32, vy: f32) {
        self.x = x;
        self.y = y;
        self.prev_x = x;
        self.prev_y = y;
        self.vx = vx;
        self.vy = vy;
    }

    #[cfg(test)]
    pub fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    /// Apply one tick of velocity. Returns true when the ball bounced off the
    /// top or bottom wall this tick.
    pub fn advance(&mut self) -> bool {
        self.prev_x = self.x;
        self.prev_y = self.y;
        self.x += self.vx;
        self.y += self.vy;

        let max_y = (self.field.height - self.height).max(0.0);
        if self.y <= 0.0 || self.y >= max_y {
            self.y = self.y.clamp(0.0, max_y);
            self.vy = -self.vy;
            return true;
        }
        false
    }

    /// Sweep this tick's displacement in unit sub-steps so a fast ball cannot
    /// skip over a paddle. On the first contact the ball stays at the contact
    /// sub-step and vx points away from the paddle. The player paddle wins
    /// ties.
    ///
    /// Only a ball heading toward a paddle can hit it, so a ball still
    /// overlapping the paddle it just left is not sent back.
    pub fn check_collision(&mut self, player: &Paddle, ai: &Paddle) -> Option<Side> {
        let steps = self.vx.abs().max(self.vy.abs()).max(1.0).ceil() as u32;
        let step_x = (self.x - self.prev_x) / steps as f32;
        let step_y = (self.y - self.prev_y) / steps as f32;
        let player_rect = player.rect();
        let ai_rect = ai.rect();

        for step in 1..=steps {
            let swept = Rect::new(
                self.prev_x + step_x * step as f32,
                self.prev_y + step_y * step as f32,
                self.width,
                self.height,
            );

            let hit = if self.vx < 0.0 && swept.intersects(&player_rect) {
                Some(Side::Player)
            } else if self.vx > 0.0 && swept.intersects(&ai_rect) {
                Some(Side::Ai)
            } else {
                None
            };

            if let Some(side) = hit {
                self.x = swept.x;
                self.y = swept.y;
                self.vx = match side {
                    Side::Player => self.vx.abs(),
                    Side::Ai => -self.vx.abs(),
                };
                return hit;
            }
        }

        None
    }

    /// Back to the spawn point. vx always flips, whoever scored; vy gets a
    /// fresh random sign.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.x = self.origin_x;
        self.y = self.origin_y;
        self.prev_x = self.origin_x;
        self.prev_y = self.origin_y;
        self.vx = -self.vx;
        self.vy = random_sign(rng) * BALL_SPEED_Y;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn paddles() -> (Paddle, Paddle) {
        (Paddle::centered(10.0, 600.0), Paddle::centered(780.0, 600.0))
    }

    #[test]
    fn test_serve_spawns_at_center_with_fixed_speeds() {
        let mut rng = StdRng::seed_from_u64(7);
        let ball = Ball::serve(Field::default(), &mut rng);
        assert_eq!((ball.x, ball.y), (400.0, 300.0));
        assert_eq!(ball.vx.abs(), BALL_SPEED_X);
        assert_eq!(ball.vy.abs(), BALL_SPEED_Y);
    }

    #[test]
    fn test_advance_applies_velocity() {
        let mut ball = Ball::with_velocity(400.0, 300.0, 5.0, -3.0);
        assert!(!ball.advance());
        assert_eq!((ball.x, ball.y), (405.0, 297.0));
    }

    #[test]
    fn test_top_wall_bounce_inverts_once() {
        let mut ball = Ball::with_velocity(400.0, 2.0, 5.0, -3.0);
        assert!(ball.advance());
        assert_eq!(ball.y, 0.0);
        assert_eq!(ball.vy, 3.0);

        // Next tick moves away from the wall without a second bounce
        assert!(!ball.advance());
        assert_eq!(ball.vy, 3.0);
        assert_eq!(ball.y, 3.0);
    }

    #[test]
    fn test_bottom_wall_bounce_clamps_inside_field() {
        let mut ball = Ball::with_velocity(400.0, 591.0, -5.0, 3.0);
        assert!(ball.advance());
        assert_eq!(ball.y, 600.0 - BALL_SIZE);
        assert_eq!(ball.vy, -3.0);
    }

    #[test]
    fn test_vertical_position_stays_in_field() {
        let mut ball = Ball::with_velocity(400.0, 300.0, 5.0, 3.0);
        let mut bounces = 0;
        for _ in 0..2000 {
            if ball.advance() {
                bounces += 1;
            }
            assert!(ball.y >= 0.0);
            assert!(ball.y + ball.height <= 600.0);
        }
        assert!(bounces > 0);
    }

    #[test]
    fn test_collision_with_player_paddle_inverts_vx() {
        let (player, ai) = paddles();
        // Player paddle spans x 10..20, y 250..350
        let mut ball = Ball::with_velocity(24.0, 300.0, -5.0, 3.0);
        ball.advance();
        assert_eq!(ball.check_collision(&player, &ai), Some(Side::Player));
        assert_eq!(ball.vx, 5.0);
        // Stopped at the first overlapping sub-step, x = 19
        assert_eq!(ball.x, 19.0);
    }

    #[test]
    fn test_collision_with_ai_paddle_inverts_vx() {
        let (player, ai) = paddles();
        // AI paddle spans x 780..790
        let mut ball = Ball::with_velocity(770.0, 300.0, 5.0, -3.0);
        ball.advance();
        assert_eq!(ball.check_collision(&player, &ai), Some(Side::Ai));
        assert_eq!(ball.vx, -5.0);
    }

    #[test]
    fn test_no_collision_leaves_velocity_untouched() {
        let (player, ai) = paddles();
        let mut ball = Ball::with_velocity(400.0, 300.0, 5.0, 3.0);
        ball.advance();
        assert_eq!(ball.check_collision(&player, &ai), None);
        assert_eq!((ball.vx, ball.vy), (5.0, 3.0));
        assert_eq!((ball.x, ball.y), (405.0, 303.0));
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_through_paddle() {
        let (player, ai) = paddles();
        let thin = Paddle {
            width: 1.0,
            ..player.clone()
        };
        // One tick jumps from x=30 to x=0, straight across the 1-unit paddle
        let mut ball = Ball::with_velocity(30.0, 300.0, -30.0, 0.0);
        ball.advance();
        assert!(!thin.rect().intersects(&ball.rect()));
        assert_eq!(ball.check_collision(&thin, &ai), Some(Side::Player));
        assert_eq!(ball.vx, 30.0);
    }

    #[test]
    fn test_player_wins_simultaneous_hit() {
        // Both paddles stacked on the same spot
        let player = Paddle::new(100.0, 250.0);
        let ai = Paddle::new(100.0, 250.0);
        let mut ball = Ball::with_velocity(112.0, 300.0, -5.0, 0.0);
        ball.advance();
        assert_eq!(ball.check_collision(&player, &ai), Some(Side::Player));
        assert_eq!(ball.vx, 5.0);
    }

    #[test]
    fn test_collision_inverts_at_most_once_per_call() {
        let (player, ai) = paddles();
        let mut ball = Ball::with_velocity(24.0, 300.0, -5.0, 0.0);
        ball.advance();
        let hits = ball.check_collision(&player, &ai).into_iter().count();
        assert_eq!(hits, 1);
        assert_eq!(ball.vx, 5.0);
    }

    #[test]
    fn test_ball_leaving_paddle_is_not_hit_again() {
        let (player, ai) = paddles();
        // Clips the top corner of the player paddle
        let mut ball = Ball::with_velocity(14.0, 244.0, -5.0, 3.0);
        ball.advance();
        assert_eq!(ball.check_collision(&player, &ai), Some(Side::Player));
        assert_eq!(ball.vx, 5.0);
        assert!(ball.rect().intersects(&player.rect()));

        // Still overlapping on the next tick, but moving away
        ball.advance();
        assert_eq!(ball.check_collision(&player, &ai), None);
        assert_eq!(ball.vx, 5.0);
    }

    #[test]
    fn test_reset_restores_origin_and_flips_vx() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ball = Ball::with_velocity(400.0, 300.0, 5.0, 3.0);
        for _ in 0..37 {
            ball.advance();
        }
        ball.reset(&mut rng);
        assert_eq!((ball.x, ball.y), ball.origin());
        assert_eq!((ball.x, ball.y), (400.0, 300.0));
        assert_eq!(ball.vx, -5.0);
        assert_eq!(ball.vy.abs(), BALL_SPEED_Y);

        ball.reset(&mut rng);
        assert_eq!(ball.vx, 5.0);
    }

    #[test]
    fn test_reset_is_deterministic_for_a_seed() {
        let mut a = Ball::with_velocity(400.0, 300.0, 5.0, 3.0);
        let mut b = a.clone();
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            a.reset(&mut rng_a);
            b.reset(&mut rng_b);
            assert_eq!(a.vy, b.vy);
        }
    }
}
