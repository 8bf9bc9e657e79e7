// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pingpong");
    path.push("config.toml");
    path
}

/// Load configuration from the default location, creating it on first run.
/// A broken file never stops the game: defaults are used instead.
pub fn load_config() -> Config {
    let path = get_config_path();
    match load_config_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "using default configuration");
            Config::default()
        }
    }
}

/// Load configuration from `path`, writing a default file if none exists
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        return parse_config(&contents);
    }

    if let Err(e) = create_default_config(path) {
        warn!(path = %path.display(), error = %e, "could not write default config");
    }
    Ok(Config::default())
}

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(contents)?)
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let toml_string = toml::to_string_pretty(&Config::default())?;

    // Add helpful header comments
    let commented_toml = format!(
        "# Ping Pong Configuration File\n\
         # Edit this file to customize controls, colours and sound\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\",\n\
         #                     \"Space\", \"Tab\" or single characters like \"W\", \"S\"\n\
         # Ctrl-C and Esc always quit\n\
         #\n\
         # Colors: RGB values from 0-255\n\
         #\n\
         # Audio backends: \"bell\" (rings on points only), \"tones\" (sound feature\n\
         #                 builds, a tone for bounces, hits and points), \"off\"\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    info!(path = %path.display(), "created default config file");
    Ok(())
}
