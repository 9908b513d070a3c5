//! Configuration - TOML ファイル + 環境変数
//!
//! 読み込み順（後勝ち）:
//! 1. 組み込みのデフォルト値
//! 2. `--config` で指定された TOML ファイル（指定時は必須）
//! 3. `BILLTIER__` で始まる環境変数（例: `BILLTIER__RETENTION_DAYS=30`）

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DEFAULT_ARCHIVE_PREFIX;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "BILLTIER";

/// Records older than this many days are archived.
pub const DEFAULT_RETENTION_DAYS: u32 = 90;

/// Upper bound on `retention_days` (about ten thousand years), keeping the
/// cutoff inside chrono's representable range.
pub const MAX_RETENTION_DAYS: u32 = 3_650_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TieringConfig {
    pub retention_days: u32,
    pub archive_prefix: String,
    pub hot_dir: PathBuf,
    pub cold_dir: PathBuf,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for TieringConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            hot_dir: PathBuf::from("data/hot"),
            cold_dir: PathBuf::from("data/cold"),
            log_level: "info".to_string(),
        }
    }
}

impl TieringConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}
