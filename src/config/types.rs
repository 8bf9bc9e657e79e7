// Ping Pong configuration types
// Physics is fixed; only controls, presentation and audio are configurable

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Player paddle
    pub paddle_up: String,
    pub paddle_down: String,

    // Best-of prompt and game-over screen
    pub quit: String,
    pub replay: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            paddle_up: "W".to_string(),
            paddle_down: "S".to_string(),
            quit: "Q".to_string(),
            replay: "R".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    // Ticks a movement key counts as held after its last press/repeat event,
    // for terminals that never report key releases
    pub key_hold_ticks: u32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self { key_hold_ticks: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Simulation and redraw rate
    pub target_fps: u64,

    // RGB values 0-255
    pub paddle_color: [u8; 3],
    pub ball_color: [u8; 3],
    pub center_line_color: [u8; 3],
    pub text_color: [u8; 3],
    pub panel_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            paddle_color: [255, 255, 255],
            ball_color: [255, 255, 255],
            center_line_color: [255, 255, 255],
            text_color: [255, 255, 255],
            panel_color: [20, 20, 20],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// Terminal bell (BEL) when a point is scored
    Bell,
    /// Synthesized tones, needs the `sound` feature
    Tones,
    Off,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub backend: AudioBackend,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: AudioBackend::Bell,
        }
    }
}
