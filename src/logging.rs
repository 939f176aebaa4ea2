//! File logging.
//!
//! The TUI owns the terminal, so log records go to a file in the temp
//! directory named `seqforge_<8 hex digits>.log`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;
use rand::Rng;

/// Fresh log file path in the temp directory.
pub fn log_file_path() -> PathBuf {
    let suffix: u32 = rand::rng().random();
    std::env::temp_dir().join(format!("seqforge_{:08x}.log", suffix))
}

/// Logger builder writing plain `[LEVEL] target: message` lines to `path`.
pub fn builder(path: &Path, verbose: bool) -> std::io::Result<Builder> {
    let file = File::create(path)?;
    let mut builder = Builder::new();
    builder
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(buf, "[{:<5}] {}: {}", record.level(), record.target(), record.args())
        });
    Ok(builder)
}

/// Installs the file logger; returns the chosen path.
pub fn init(verbose: bool) -> anyhow::Result<PathBuf> {
    let path = log_file_path();
    builder(&path, verbose)?
        .try_init()
        .map_err(|e| anyhow::anyhow!("Cannot install logger: {}", e))?;
    Ok(path)
}
