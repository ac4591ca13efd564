use crate::consts;
use crate::highscore::HighScore;
use crate::options::Options;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Default gameplay options; the command line and the main menu override
    /// these
    pub(crate) options: Options,

    /// Colors & modifiers for the things drawn on the level
    pub(crate) theme: Theme,

    /// Settings about data files
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("slither").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist
    /// and `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which the high score should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// high-score file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    pub(crate) fn high_score_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_score_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| HighScore::default_path().map(Cow::from))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score at all
    pub(crate) save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

/// User-configurable styles, parsed from strings like `"bold green"`.
/// Anything not set falls back to the built-in styles in [`consts`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Theme {
    snake: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    score_bar: Option<parse_style::Style>,
}

impl Theme {
    pub(crate) fn snake(&self) -> ratatui::style::Style {
        self.snake
            .clone()
            .map_or(consts::SNAKE_STYLE, ratatui::style::Style::from)
    }

    pub(crate) fn food(&self) -> ratatui::style::Style {
        self.food
            .clone()
            .map_or(consts::FOOD_STYLE, ratatui::style::Style::from)
    }

    pub(crate) fn score_bar(&self) -> ratatui::style::Style {
        self.score_bar
            .clone()
            .map_or(consts::SCORE_BAR_STYLE, ratatui::style::Style::from)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
