//! File logging for the terminal binary.
//!
//! The terminal is in raw mode on the alternate screen while the game runs, so
//! log output only ever goes to a file.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} {m}{n}";

/// Build the log4rs configuration writing to `path` at `level`.
pub fn file_config(path: &Path, level: LevelFilter) -> Result<Config> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| anyhow!("invalid log configuration: {e}"))
}

/// Install the global logger. Can only succeed once per process.
pub fn init_file_logging(path: &Path, level: LevelFilter) -> Result<log4rs::Handle> {
    let config = file_config(path, level)?;
    log4rs::init_config(config).context("failed to install logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_file_config() {
        let path = std::env::temp_dir().join(format!("grid-tetris-{}.log", std::process::id()));
        let config = file_config(&path, LevelFilter::Debug).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
        std::fs::remove_file(&path).ok();
    }
}
