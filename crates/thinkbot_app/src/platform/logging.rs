//! Platform logging initialization for the ThinkBot terminal client.
//!
//! The UI owns the terminal, so records go to a file only.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, ConfigBuilder, WriteLogger};

/// Initialize the file logger at `path`, truncating any previous log.
///
/// Nothing is created when `level` is `Off`. If the file cannot be created a
/// warning is printed (the UI is not up yet) and logging stays disabled.
pub fn initialize(path: &Path, level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }

    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, build_config(), file);
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
