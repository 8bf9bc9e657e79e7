// Keyboard input: crossterm events -> engine commands and held paddle keys

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;
use tracing::warn;

use crate::config::{ControlsConfig, KeyBindings};
use crate::game::{Command, PaddleInput};

/// Parse a key name from the config file ("W", "Up", "Esc", ...)
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match name.to_ascii_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" => Some(KeyCode::Enter),
        "esc" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        _ => None,
    }
}

/// Resolved key bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    pub paddle_up: KeyCode,
    pub paddle_down: KeyCode,
    pub quit: KeyCode,
    pub replay: KeyCode,
}

impl KeyMap {
    /// Resolve configured names, falling back to the default binding for any
    /// name that does not parse
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let defaults = KeyBindings::default();
        let resolve = |action: &str, name: &str, fallback: &str| {
            parse_key(name).unwrap_or_else(|| {
                warn!(action, name, fallback, "unknown key name in config");
                parse_key(fallback).unwrap_or(KeyCode::Null)
            })
        };

        Self {
            paddle_up: resolve("paddle_up", &bindings.paddle_up, &defaults.paddle_up),
            paddle_down: resolve("paddle_down", &bindings.paddle_down, &defaults.paddle_down),
            quit: resolve("quit", &bindings.quit, &defaults.quit),
            replay: resolve("replay", &bindings.replay, &defaults.replay),
        }
    }

    fn matches(bound: KeyCode, pressed: KeyCode) -> bool {
        match (bound, pressed) {
            (KeyCode::Char(a), KeyCode::Char(b)) => a == b.to_ascii_lowercase(),
            (a, b) => a == b,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_bindings(&KeyBindings::default())
    }
}

/// Tracks the two movement keys across ticks.
///
/// Terminals that report key releases hold a key until its release.
/// Otherwise a key counts as held for `hold_ticks` ticks after its last
/// press or auto-repeat event.
pub struct Keyboard {
    keymap: KeyMap,
    hold_ticks: u32,
    releases_reported: bool,
    up_ticks: u32,
    down_ticks: u32,
}

impl Keyboard {
    pub fn new(keymap: KeyMap, controls: &ControlsConfig, releases_reported: bool) -> Self {
        Self {
            keymap,
            hold_ticks: controls.key_hold_ticks.max(1),
            releases_reported,
            up_ticks: 0,
            down_ticks: 0,
        }
    }

    /// Drain every pending terminal event without blocking
    pub fn poll(&mut self) -> Result<Vec<Command>, io::Error> {
        let mut commands = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = self.handle_key(key) {
                    commands.push(command);
                }
            }
        }
        Ok(commands)
    }

    /// Update held state from one key event and map presses to commands
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let hold = if self.releases_reported {
            u32::MAX
        } else {
            self.hold_ticks
        };

        let held = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => hold,
            KeyEventKind::Release => 0,
        };
        if KeyMap::matches(self.keymap.paddle_up, key.code) {
            self.up_ticks = held;
        }
        if KeyMap::matches(self.keymap.paddle_down, key.code) {
            self.down_ticks = held;
        }

        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Interrupt);
        }

        match key.code {
            KeyCode::Esc => Some(Command::Interrupt),
            code if KeyMap::matches(self.keymap.quit, code) => Some(Command::Quit),
            code if KeyMap::matches(self.keymap.replay, code) => Some(Command::Replay),
            KeyCode::Char(c) => c
                .to_digit(10)
                .map(|d| Command::SelectBestOf(d as u8)),
            _ => None,
        }
    }

    pub fn paddle_input(&self) -> PaddleInput {
        PaddleInput {
            up: self.up_ticks > 0,
            down: self.down_ticks > 0,
        }
    }

    /// Call once per tick after the input has been consumed
    pub fn end_tick(&mut self) {
        if !self.releases_reported {
            self.up_ticks = self.up_ticks.saturating_sub(1);
            self.down_ticks = self.down_ticks.saturating_sub(1);
        }
    }
}
