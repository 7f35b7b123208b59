//! Play configuration loaded from TOML and overridden by flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictactoe_minimax::{Control, Starter};
use tracing::{debug, info, instrument};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "tictactoe.toml";

/// Settings for a `play` session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Controller for X.
    #[serde(default = "default_x")]
    x: Control,

    /// Controller for O.
    #[serde(default = "default_o")]
    o: Control,

    /// Opening side for each round.
    #[serde(default)]
    first: Starter,

    /// Rounds to play before exiting; unlimited when absent.
    #[serde(default)]
    rounds: Option<u32>,
}

fn default_x() -> Control {
    Control::Human
}

fn default_o() -> Control {
    Control::Computer
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            x: default_x(),
            o: default_o(),
            first: Starter::default(),
            rounds: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(path, format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(path, format!("Failed to parse config: {}", e)))?;

        info!(x = %config.x, o = %config.o, first = %config.first, "Config loaded");
        Ok(config)
    }

    /// Loads an explicit file, else the default file if it exists, else defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        x: Option<Control>,
        o: Option<Control>,
        first: Option<Starter>,
        rounds: Option<u32>,
    ) -> Self {
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(o) = o {
            self.o = o;
        }
        if let Some(first) = first {
            self.first = first;
        }
        if rounds.is_some() {
            self.rounds = rounds;
        }
        self
    }

    /// True when no side needs keyboard input.
    pub fn is_unattended(&self) -> bool {
        self.x == Control::Computer && self.o == Control::Computer
    }
}

/// A play configuration file that could not be used.
#[derive(Debug, Clone, Display, Error)]
#[display("Cannot use play config {}: {} ({}:{})", path.display(), message, file, line)]
pub struct ConfigError {
    path: PathBuf,
    message: String,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Records a failure for the config at `path`, tagged with the caller's location.
    #[track_caller]
    fn new(path: &Path, message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            path: path.to_path_buf(),
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_file_reads_all_fields() {
        let file = write_config("x = \"computer\"\no = \"human\"\nfirst = \"o\"\nrounds = 3\n");
        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.x(), Control::Computer);
        assert_eq!(*config.o(), Control::Human);
        assert_eq!(*config.first(), Starter::O);
        assert_eq!(*config.rounds(), Some(3));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let file = write_config("first = \"x\"\n");
        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.x(), Control::Human);
        assert_eq!(*config.o(), Control::Computer);
        assert_eq!(*config.rounds(), None);
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let file = write_config("x = \"robot\"\n");
        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = GameConfig::load(Some(&missing)).unwrap_err();
        assert_eq!(err.path, missing);
        assert!(err.message.starts_with("Failed to read config file"));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = GameConfig::default().with_overrides(
            Some(Control::Computer),
            None,
            Some(Starter::X),
            Some(5),
        );
        assert_eq!(*config.x(), Control::Computer);
        assert_eq!(*config.o(), Control::Computer);
        assert_eq!(*config.first(), Starter::X);
        assert_eq!(*config.rounds(), Some(5));
        assert!(config.is_unattended());
    }
}
