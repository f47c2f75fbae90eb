// Fixed game rules and user preferences
// Rules are compile-time constants; preferences are read from an optional TOML file

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::tm_error::{GameError, Result};

/// Largest square kept mine-free around the first reveal
pub const SAFE_ZONE_CELLS: usize = 9;

/// Board dimensions and mine count for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl Rules {
    /// The only rule set the game ships with
    pub const CLASSIC: Rules = Rules {
        width: 30,
        height: 10,
        mines: 15,
    };

    /// Reject rule sets that could not be fulfilled at the first reveal
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidRules(format!(
                "board {}x{} is empty",
                self.width, self.height
            )));
        }
        let cells = self.width * self.height;
        if self.mines >= cells.saturating_sub(SAFE_ZONE_CELLS) {
            return Err(GameError::InvalidRules(format!(
                "{} mines do not fit a {}x{} board with a safe start",
                self.mines, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// User preferences, persisted as TOML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub language: String,   // Language code ("en" or "zh")
    pub ascii_glyphs: bool, // Use ASCII fallback glyphs
    pub log_level: String,  // tracing filter directive
    pub log_to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        // Auto-detect system language
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let language = if system_lang.to_lowercase().starts_with("zh") {
            "zh".to_string()
        } else {
            "en".to_string()
        };

        Config {
            language,
            ascii_glyphs: false,
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tmines", "tmines")
}

/// Config file path, e.g. ~/.config/tmines/tmines.toml on Linux.
/// Falls back to the current directory if no home directory is known.
pub fn config_path() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        return Some(proj.config_dir().join("tmines.toml"));
    }
    env::current_dir().ok().map(|dir| dir.join("tmines.toml"))
}

/// Directory for the log file
pub fn data_dir() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        return Some(proj.data_local_dir().to_path_buf());
    }
    env::current_dir().ok()
}

/// Parse preferences; unknown keys are ignored, missing keys take defaults
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str::<Config>(text)
}

/// Load preferences from disk, or defaults if the file is missing or broken.
/// Problems are returned alongside since logging is not up yet at this point.
pub fn load_config() -> (Config, Option<String>) {
    let Some(path) = config_path() else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match fs::read_to_string(&path) {
        Ok(s) => match parse_config(&s) {
            Ok(cfg) => (cfg, None),
            Err(e) => (
                Config::default(),
                Some(format!("ignoring unreadable config {}: {}", path.display(), e)),
            ),
        },
        Err(e) => (
            Config::default(),
            Some(format!("cannot read config {}: {}", path.display(), e)),
        ),
    }
}
