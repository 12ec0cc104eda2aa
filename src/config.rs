// src/config.rs

//! Process configuration, assembled directly from command-line arguments.
//! There is no config file: the command surface is small enough that a
//! `config`/`toml` layer would add indirection without buying anything.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 15000;
const DEFAULT_EXPIRY_SWEEP_SECS: u64 = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub port: u16,
    pub expiry_sweep_interval: Duration,
    /// Tracing filter directive, read from `RUST_LOG`; defaults to `info`.
    pub log_level: String,
}

impl Config {
    /// Parses `exodb <snapshot-path>`. Exactly one positional argument is
    /// accepted; anything else is a startup error.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let args: Vec<String> = args.into_iter().collect();
        let snapshot_path = match args.as_slice() {
            [path] => PathBuf::from(path),
            [] => return Err("missing snapshot path argument".to_string()),
            _ => return Err("expected exactly one argument: <snapshot-path>".to_string()),
        };

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let port = std::env::var("EXODB_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Config {
            snapshot_path,
            port,
            expiry_sweep_interval: Duration::from_secs(DEFAULT_EXPIRY_SWEEP_SECS),
            log_level,
        })
    }
}
