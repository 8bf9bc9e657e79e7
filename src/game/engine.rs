use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::ball::Ball;
use super::draw::{Ink, Label, Painter};
use super::input::{Command, PaddleInput};
use super::paddle::{Paddle, PADDLE_WIDTH, PLAYER_STEP};
use super::rect::{Field, Rect};
use super::state::{BestOf, MatchState, Phase, PointOutcome, Side};

// Player paddle sits this far from the left edge, the AI paddle twice as far
// from the right edge
const PADDLE_INSET: f32 = 10.0;

/// What happened during one tick, for audio and logging
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TickEvents {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
    pub outcome: Option<PointOutcome>,
}

impl TickEvents {
    #[cfg(test)]
    pub fn any(&self) -> bool {
        self.wall_bounce || self.paddle_hit.is_some() || self.scored.is_some()
    }
}

/// Whether the application should keep running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct GameEngine {
    field: Field,
    pub player: Paddle,
    pub ai: Paddle,
    pub ball: Ball,
    pub state: MatchState,
    rng: StdRng,
}

impl GameEngine {
    pub fn new(field: Field) -> Self {
        Self::with_rng(field, StdRng::from_entropy())
    }

    /// Engine with an explicit random source for serve directions
    pub fn with_rng(field: Field, mut rng: StdRng) -> Self {
        let ball = Ball::serve(field, &mut rng);
        Self {
            field,
            player: Paddle::centered(PADDLE_INSET, field.height),
            ai: Paddle::centered(field.width - 2.0 * PADDLE_INSET, field.height),
            ball,
            state: MatchState::new(),
            rng,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Apply a discrete command. Commands that make no sense in the current
    /// phase are ignored.
    pub fn handle_command(&mut self, command: Command) -> Flow {
        match (command, self.state.phase) {
            (Command::Interrupt, _) => Flow::Exit,
            (Command::Quit, Phase::SelectingBestOf | Phase::GameOver { .. }) => Flow::Exit,
            (Command::SelectBestOf(rounds), Phase::SelectingBestOf) => {
                if let Some(best_of) = BestOf::from_rounds(rounds) {
                    self.state.select_best_of(best_of);
                    info!(rounds, "match started");
                }
                Flow::Continue
            }
            (Command::Replay, Phase::GameOver { .. }) => {
                self.replay();
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    /// Fresh match: scores and wins cleared, back to the best-of prompt
    pub fn replay(&mut self) {
        self.state = MatchState::new();
        self.ball.reset(&mut self.rng);
        self.player.recenter(self.field.height);
        self.ai.recenter(self.field.height);
        info!("replay requested, waiting for best-of selection");
    }

    /// One fixed simulation step. Does nothing outside `Playing`.
    pub fn tick(&mut self, input: PaddleInput) -> TickEvents {
        let mut events = TickEvents::default();
        if !self.state.is_playing() {
            return events;
        }

        let delta = input.delta(PLAYER_STEP);
        if delta != 0.0 {
            self.player.move_by(delta, self.field.height);
        }

        events.wall_bounce = self.ball.advance();
        events.paddle_hit = self.ball.check_collision(&self.player, &self.ai);

        let scorer = if self.ball.x <= 0.0 {
            Some(Side::Ai)
        } else if self.ball.x >= self.field.width {
            Some(Side::Player)
        } else {
            None
        };

        if let Some(side) = scorer {
            events.scored = Some(side);
            self.ball.reset(&mut self.rng);
            let outcome = self.state.record_point(side);
            events.outcome = Some(outcome);
            self.log_point(side, outcome);
        }

        self.ai.auto_track(&self.ball, self.field.height);

        events
    }

    fn log_point(&self, side: Side, outcome: PointOutcome) {
        let score = self.state.score;
        let wins = self.state.match_wins;
        match outcome {
            PointOutcome::Point => {
                debug!(scorer = %side, player = score.player, ai = score.ai, "point scored")
            }
            PointOutcome::GameWon(winner) => {
                debug!(%winner, player_wins = wins.player, ai_wins = wins.ai, "game won")
            }
            PointOutcome::MatchWon(winner) => info!(
                %winner,
                best_of = self.state.best_of_rounds(),
                player_wins = wins.player,
                ai_wins = wins.ai,
                "match won"
            ),
        }
    }

    /// Draw the scene, then the overlay for the current phase
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P) {
        let Field { width, height } = self.field;

        painter.fill_rect(self.player.rect(), Ink::Paddle);
        painter.fill_rect(self.ai.rect(), Ink::Paddle);
        painter.fill_ellipse(self.ball.rect(), Ink::Ball);
        painter.line((width / 2.0, 0.0), (width / 2.0, height), Ink::CenterLine);

        let score = self.state.score;
        painter.text(&Label::new(score.player.to_string(), width / 4.0, 20.0).ink(Ink::Score));
        painter.text(&Label::new(score.ai.to_string(), width * 3.0 / 4.0, 20.0).ink(Ink::Score));

        match self.state.phase {
            Phase::SelectingBestOf => self.render_best_of_prompt(painter),
            Phase::Playing { .. } => {
                let wins = self.state.match_wins;
                let tally = format!("Match - Player: {} AI: {}", wins.player, wins.ai);
                painter.text(&Label::new(tally, width / 2.0, 60.0).centered());
            }
            Phase::GameOver { .. } => self.render_game_over(painter),
        }
    }

    fn render_best_of_prompt<P: Painter + ?Sized>(&self, painter: &mut P) {
        let Field { width, height } = self.field;
        let mid_y = height / 2.0;

        painter.panel(overlay_rect(self.field, mid_y - 100.0, 160.0), Ink::Panel);
        painter.text(
            &Label::new("Choose Best Of Rounds: 3, 5 or 7", width / 2.0, mid_y - 60.0)
                .centered()
                .bold(),
        );
        painter.text(
            &Label::new("Press 3, 5 or 7 to select, Q to Quit", width / 2.0, mid_y).centered(),
        );
    }

    fn render_game_over<P: Painter + ?Sized>(&self, painter: &mut P) {
        let Some(winner) = self.state.winner() else {
            return;
        };
        let Field { width, height } = self.field;
        let mid_y = height / 2.0;
        let wins = self.state.match_wins;

        painter.panel(overlay_rect(self.field, mid_y - 130.0, 240.0), Ink::Panel);
        painter.text(
            &Label::new(format!("{} Wins The Match!", winner), width / 2.0, mid_y - 90.0)
                .centered()
                .bold(),
        );
        painter.text(
            &Label::new(
                format!(
                    "Final Match Score: Player {} - {} AI",
                    wins.player, wins.ai
                ),
                width / 2.0,
                mid_y + 10.0,
            )
            .centered(),
        );
        painter.text(
            &Label::new("Press R to Replay or Q to Quit", width / 2.0, mid_y + 50.0).centered(),
        );
    }
}

/// Horizontally centered overlay spanning most of the field width
fn overlay_rect(field: Field, y: f32, height: f32) -> Rect {
    let margin = PADDLE_INSET * 2.0 + PADDLE_WIDTH * 4.0;
    Rect::new(margin, y, field.width - 2.0 * margin, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::draw::RecordingPainter;
    use crate::game::state::{Tally, MAX_SCORE};

    fn engine() -> GameEngine {
        GameEngine::with_rng(Field::default(), StdRng::seed_from_u64(1234))
    }

    fn playing(best_of: u8) -> GameEngine {
        let mut engine = engine();
        assert_eq!(
            engine.handle_command(Command::SelectBestOf(best_of)),
            Flow::Continue
        );
        assert!(engine.state.is_playing());
        engine
    }

    /// Park the ball one tick away from `side`'s goal line, clear of both paddles
    fn force_point(engine: &mut GameEngine, scorer: Side) -> TickEvents {
        engine.player.y = 500.0;
        engine.ai.y = 500.0;
        match scorer {
            Side::Player => engine.ball.teleport(797.0, 20.0, 5.0, 3.0),
            Side::Ai => engine.ball.teleport(3.0, 20.0, -5.0, 3.0),
        }
        let events = engine.tick(PaddleInput::default());
        assert_eq!(events.scored, Some(scorer));
        events
    }

    fn win_game(engine: &mut GameEngine, scorer: Side) -> TickEvents {
        let mut events = TickEvents::default();
        for _ in 0..MAX_SCORE {
            events = force_point(engine, scorer);
        }
        events
    }

    #[test]
    fn test_initial_layout() {
        let engine = engine();
        assert_eq!(engine.phase(), Phase::SelectingBestOf);
        assert_eq!((engine.player.x, engine.player.y), (10.0, 250.0));
        assert_eq!((engine.ai.x, engine.ai.y), (780.0, 250.0));
        assert_eq!((engine.ball.x, engine.ball.y), (400.0, 300.0));
    }

    #[test]
    fn test_no_simulation_while_selecting() {
        let mut engine = engine();
        let before = engine.ball.clone();
        let events = engine.tick(PaddleInput {
            up: true,
            down: false,
        });
        assert!(!events.any());
        assert_eq!(engine.ball, before);
        assert_eq!(engine.player.y, 250.0);
    }

    #[test]
    fn test_selection_accepts_only_valid_rounds() {
        let mut engine = engine();
        engine.handle_command(Command::SelectBestOf(4));
        assert_eq!(engine.phase(), Phase::SelectingBestOf);
        engine.handle_command(Command::Replay);
        assert_eq!(engine.phase(), Phase::SelectingBestOf);

        engine.handle_command(Command::SelectBestOf(7));
        assert_eq!(
            engine.phase(),
            Phase::Playing {
                best_of: BestOf::Seven
            }
        );
        assert_eq!(engine.state.best_of_rounds(), Some(7));
    }

    #[test]
    fn test_quit_only_exits_outside_play() {
        let mut engine = engine();
        assert_eq!(engine.handle_command(Command::Quit), Flow::Exit);

        let mut engine = playing(3);
        assert_eq!(engine.handle_command(Command::Quit), Flow::Continue);
        assert_eq!(engine.handle_command(Command::Interrupt), Flow::Exit);
    }

    #[test]
    fn test_held_keys_move_player_paddle() {
        let mut engine = playing(3);
        engine.tick(PaddleInput {
            up: true,
            down: false,
        });
        assert_eq!(engine.player.y, 240.0);
        engine.tick(PaddleInput {
            up: false,
            down: true,
        });
        engine.tick(PaddleInput {
            up: false,
            down: true,
        });
        assert_eq!(engine.player.y, 260.0);
    }

    #[test]
    fn test_ball_past_left_edge_scores_for_ai() {
        let mut engine = playing(3);
        let events = force_point(&mut engine, Side::Ai);
        assert_eq!(events.outcome, Some(PointOutcome::Point));
        assert_eq!(engine.state.score, Tally { player: 0, ai: 1 });
        assert_eq!((engine.ball.x, engine.ball.y), (400.0, 300.0));
    }

    #[test]
    fn test_ball_past_right_edge_scores_for_player() {
        let mut engine = playing(3);
        force_point(&mut engine, Side::Player);
        assert_eq!(engine.state.score, Tally { player: 1, ai: 0 });
    }

    #[test]
    fn test_game_win_resets_scores() {
        let mut engine = playing(5);
        force_point(&mut engine, Side::Ai);
        let events = win_game(&mut engine, Side::Player);
        assert_eq!(events.outcome, Some(PointOutcome::GameWon(Side::Player)));
        assert_eq!(engine.state.match_wins, Tally { player: 1, ai: 0 });
        assert_eq!(engine.state.score, Tally::default());
    }

    #[test]
    fn test_best_of_three_match_ends_with_winner() {
        let mut engine = playing(3);
        win_game(&mut engine, Side::Ai);
        win_game(&mut engine, Side::Player);
        let events = win_game(&mut engine, Side::Ai);
        assert_eq!(events.outcome, Some(PointOutcome::MatchWon(Side::Ai)));
        assert_eq!(engine.state.winner(), Some(Side::Ai));
        assert_eq!(engine.state.winner().map(|s| s.name()), Some("AI"));
    }

    #[test]
    fn test_best_of_five_player_sweep() {
        let mut engine = playing(5);
        for _ in 0..3 {
            win_game(&mut engine, Side::Player);
        }
        assert_eq!(
            engine.phase(),
            Phase::GameOver {
                best_of: BestOf::Five,
                winner: Side::Player
            }
        );
        assert_eq!(engine.state.winner().map(|s| s.name()), Some("Player"));
        assert_eq!(engine.state.match_wins.player, 3);
        assert_eq!(engine.state.match_wins.ai, 0);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut engine = playing(3);
        win_game(&mut engine, Side::Player);
        win_game(&mut engine, Side::Player);
        let before = engine.ball.clone();
        let events = engine.tick(PaddleInput::default());
        assert!(!events.any());
        assert_eq!(engine.ball, before);
    }

    #[test]
    fn test_replay_returns_to_selection_with_fresh_state() {
        let mut engine = playing(3);
        win_game(&mut engine, Side::Player);
        win_game(&mut engine, Side::Player);
        engine.player.y = 0.0;

        assert_eq!(engine.handle_command(Command::Replay), Flow::Continue);
        assert_eq!(engine.state, MatchState::new());
        assert_eq!(engine.state.best_of_rounds(), None);
        assert_eq!(engine.player.y, 250.0);
        assert_eq!((engine.ball.x, engine.ball.y), (400.0, 300.0));
    }

    #[test]
    fn test_paddle_hit_reported() {
        let mut engine = playing(3);
        engine.player.y = 250.0;
        engine.ball.teleport(24.0, 300.0, -5.0, 0.0);
        let events = engine.tick(PaddleInput::default());
        assert_eq!(events.paddle_hit, Some(Side::Player));
        assert_eq!(engine.ball.vx, 5.0);
        assert_eq!(events.scored, None);
    }

    #[test]
    fn test_ball_clipping_paddle_corner_bounces_once() {
        let mut engine = playing(3);
        engine.ball.teleport(15.0, 240.0, -5.0, 3.0);

        let mut hits = 0;
        for _ in 0..20 {
            let events = engine.tick(PaddleInput::default());
            assert_eq!(events.scored, None);
            if events.paddle_hit.is_some() {
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(engine.ball.vx, 5.0);
        assert!(engine.ball.x > 50.0);
    }

    #[test]
    fn test_render_selection_overlay() {
        let engine = engine();
        let mut painter = RecordingPainter::default();
        engine.render(&mut painter);

        assert_eq!(painter.rects.len(), 2);
        assert_eq!(painter.ellipses.len(), 1);
        assert_eq!(painter.lines.len(), 1);
        assert_eq!(painter.panels.len(), 1);
        assert!(painter.has_text("Choose Best Of Rounds: 3, 5 or 7"));
        assert!(painter.has_text("Press 3, 5 or 7 to select, Q to Quit"));
        assert!(!painter.texts().iter().any(|t| t.starts_with("Match -")));
    }

    #[test]
    fn test_render_playing_shows_tally_without_overlay() {
        let mut engine = playing(5);
        win_game(&mut engine, Side::Ai);
        force_point(&mut engine, Side::Player);

        let mut painter = RecordingPainter::default();
        engine.render(&mut painter);
        assert!(painter.panels.is_empty());
        assert!(painter.has_text("1"));
        assert!(painter.has_text("0"));
        assert!(painter.has_text("Match - Player: 0 AI: 1"));
    }

    #[test]
    fn test_render_game_over_summary() {
        let mut engine = playing(3);
        win_game(&mut engine, Side::Player);
        win_game(&mut engine, Side::Ai);
        win_game(&mut engine, Side::Player);

        let mut painter = RecordingPainter::default();
        engine.render(&mut painter);
        assert_eq!(painter.rects.len(), 2);
        assert_eq!(painter.panels.len(), 1);
        assert!(painter.has_text("Player Wins The Match!"));
        assert!(painter.has_text("Final Match Score: Player 2 - 1 AI"));
        assert!(painter.has_text("Press R to Replay or Q to Quit"));
    }
}
