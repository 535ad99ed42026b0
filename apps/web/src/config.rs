use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::loader::LoaderConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile directory holding the persisted history and theme records.
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub loader_message_interval_ms: u64,
    pub loader_frame_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            loader_message_interval_ms: parse_env("LOADER_MESSAGE_INTERVAL_MS", 2000)?,
            loader_frame_interval_ms: parse_env("LOADER_FRAME_INTERVAL_MS", 33)?,
        })
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            message_interval: Duration::from_millis(self.loader_message_interval_ms.max(1)),
            frame_interval: Duration::from_millis(self.loader_frame_interval_ms.max(1)),
            ..LoaderConfig::default()
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: u64 = parse_env("CAREERLENS_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_loader_intervals_never_zero() {
        let config = Config {
            data_dir: PathBuf::from("./data"),
            port: 8080,
            rust_log: "info".into(),
            loader_message_interval_ms: 0,
            loader_frame_interval_ms: 0,
        };
        let loader = config.loader_config();
        assert_eq!(loader.message_interval, Duration::from_millis(1));
        assert_eq!(loader.frame_interval, Duration::from_millis(1));
    }
}
