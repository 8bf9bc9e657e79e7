// Sound cues. The game only ever fires and forgets.

use std::io::{self, Write};
use tracing::warn;

use crate::config::{AudioBackend, AudioConfig};
use crate::game::TickEvents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    WallBounce,
    PaddleHit,
    Score,
}

/// Cues for one tick, in the order they happened
pub fn cues(events: &TickEvents) -> Vec<Cue> {
    let mut cues = Vec::new();
    if events.wall_bounce {
        cues.push(Cue::WallBounce);
    }
    if events.paddle_hit.is_some() {
        cues.push(Cue::PaddleHit);
    }
    if events.scored.is_some() {
        cues.push(Cue::Score);
    }
    cues
}

/// Audio collaborator
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: Cue) {}
}

/// Rings the terminal bell for points only. A BEL per bounce would ring
/// about once a second during a rally, and terminals cannot tell cues apart.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if cue != Cue::Score {
            return;
        }
        // A failed bell is not worth interrupting the game for
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}

#[cfg(feature = "sound")]
mod tones {
    use super::{AudioSink, Cue};
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use std::time::Duration;

    /// Short sine tones through the default output device
    pub struct ToneSink {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl ToneSink {
        pub fn new() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    fn tone(cue: Cue) -> (f32, u64) {
        match cue {
            Cue::WallBounce => (440.0, 40),
            Cue::PaddleHit => (660.0, 50),
            Cue::Score => (220.0, 250),
        }
    }

    impl AudioSink for ToneSink {
        fn play(&mut self, cue: Cue) {
            let (freq, millis) = tone(cue);
            if let Ok(sink) = Sink::try_new(&self.handle) {
                let source = SineWave::new(freq)
                    .take_duration(Duration::from_millis(millis))
                    .amplify(0.2);
                sink.append(source);
                sink.detach();
            }
        }
    }
}

/// Build the configured sink. Anything that cannot be opened degrades to
/// the terminal bell.
pub fn open_sink(config: &AudioConfig) -> Box<dyn AudioSink> {
    if !config.enabled {
        return Box::new(Muted);
    }

    match config.backend {
        AudioBackend::Off => Box::new(Muted),
        AudioBackend::Bell => Box::new(TerminalBell::new(io::stdout())),
        AudioBackend::Tones => open_tones(),
    }
}

#[cfg(feature = "sound")]
fn open_tones() -> Box<dyn AudioSink> {
    match tones::ToneSink::new() {
        Ok(sink) => Box::new(sink),
        Err(e) => {
            warn!(error = %e, "no audio device, falling back to terminal bell");
            Box::new(TerminalBell::new(io::stdout()))
        }
    }
}

#[cfg(not(feature = "sound"))]
fn open_tones() -> Box<dyn AudioSink> {
    warn!("built without the `sound` feature, falling back to terminal bell");
    Box::new(TerminalBell::new(io::stdout()))
}

/// Sink that remembers what it was asked to play, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<Cue>,
}

#[cfg(test)]
impl AudioSink for RecordingSink {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}
