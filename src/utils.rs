use crate::error::{ScoutError, ScoutResult};
use crate::settings::ScoutConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, SimpleLogger, WriteLogger};
use std::fs::{read_to_string, write, File};
use std::str::FromStr;

pub fn read_json<T: DeserializeOwned>(filename: &str) -> ScoutResult<T> {
    Ok(serde_json::from_str(read_to_string(filename)?.as_str())?)
}

pub fn write_json<T: Serialize>(filename: &str, payload: &T) -> ScoutResult<()> {
    write(filename, serde_json::to_string_pretty(payload)?)?;
    Ok(())
}

/// Logs to stdout, and to `log_file` as well when configured.
pub fn init_logging(config: &ScoutConfig) -> ScoutResult<()> {
    let level = LevelFilter::from_str(&config.log_level)
        .map_err(|_| ScoutError::Config(format!("unknown log_level: {}", config.log_level)))?;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(SimpleLogger::new(level, Config::default()));
    if let Some(log_file) = &config.log_file {
        loggers.push(WriteLogger::new(level, Config::default(), File::create(log_file)?));
    }
    CombinedLogger::init(loggers)
        .map_err(|e| ScoutError::Config(format!("logger already set: {}", e)))
}
