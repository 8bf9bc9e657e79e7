use std::time::{Duration, Instant};

use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::audio::{self, AudioSink};
use crate::config::Config;
use crate::game::{Command, Field, Flow, GameEngine};
use crate::keyboard::{KeyMap, Keyboard};
use crate::ui::{self, Palette, Theme};

/// Time budget of one tick at the given rate
pub fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_secs_f64(1.0 / target_fps.max(1) as f64)
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Call at the end of each loop iteration; sleeps for whatever is left of
/// the frame budget.
pub fn limit_frame_rate(frame_start: Instant, budget: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < budget {
        std::thread::sleep(budget - elapsed);
    }
}

/// Run the game until the player quits
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    releases_reported: bool,
) -> anyhow::Result<()> {
    let mut engine = GameEngine::new(Field::default());
    let mut keyboard = Keyboard::new(
        KeyMap::from_bindings(&config.keybindings),
        &config.controls,
        releases_reported,
    );
    let mut audio = audio::open_sink(&config.audio);

    let bindings = &config.keybindings;
    let theme = Theme {
        palette: Palette::from_config(&config.display),
        controls_hint: format!(
            "{}/{}: Move  Esc: Quit",
            bindings.paddle_up, bindings.paddle_down
        ),
    };
    let budget = frame_duration(config.display.target_fps);

    info!(
        fps = config.display.target_fps,
        releases_reported, "game loop started"
    );

    loop {
        let frame_start = Instant::now();

        let commands = keyboard.poll()?;
        if step(&mut engine, &mut keyboard, &commands, audio.as_mut()) == Flow::Exit {
            info!("quit requested");
            return Ok(());
        }

        terminal.draw(|f| ui::render(f, &engine, &theme))?;

        limit_frame_rate(frame_start, budget);
    }
}

/// Everything one tick does besides terminal I/O: commands first, then the
/// simulation step, then the sound cues it produced
pub fn step(
    engine: &mut GameEngine,
    keyboard: &mut Keyboard,
    commands: &[Command],
    audio: &mut dyn AudioSink,
) -> Flow {
    for &command in commands {
        if engine.handle_command(command) == Flow::Exit {
            return Flow::Exit;
        }
    }

    let events = engine.tick(keyboard.paddle_input());
    keyboard.end_tick();

    for cue in audio::cues(&events) {
        audio.play(cue);
    }

    Flow::Continue
}
