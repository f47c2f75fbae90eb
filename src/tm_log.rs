// File logging setup; the terminal itself belongs to the game

use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::tm_config::{Config, data_dir};

/// Install a tracing subscriber writing to tmines.log in the data directory.
/// Logging is silently disabled if the file cannot be opened.
pub fn init(cfg: &Config) {
    if !cfg.log_to_file {
        return;
    }
    let Some(dir) = data_dir() else { return };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("tmines.log"))
    else {
        return;
    };
    let filter = EnvFilter::try_new(&cfg.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
