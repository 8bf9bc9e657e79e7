/// Discrete, edge-triggered commands. Which ones apply depends on the phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// The quit key: honoured on the best-of prompt and the game-over screen
    Quit,
    /// Ctrl-C / Esc: leaves from any phase
    Interrupt,
    Replay,
    /// A digit key; only 3, 5 and 7 start a match
    SelectBestOf(u8),
}

/// Movement keys held during the current tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

impl PaddleInput {
    /// Signed vertical displacement for this tick; both keys cancel out
    pub fn delta(&self, step: f32) -> f32 {
        match (self.up, self.down) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta() {
        let up = PaddleInput {
            up: true,
            down: false,
        };
        let down = PaddleInput {
            up: false,
            down: true,
        };
        let both = PaddleInput {
            up: true,
            down: true,
        };
        assert_eq!(up.delta(10.0), -10.0);
        assert_eq!(down.delta(10.0), 10.0);
        assert_eq!(both.delta(10.0), 0.0);
        assert_eq!(PaddleInput::default().delta(10.0), 0.0);
    }
}
