//! Node configuration: a `toml`-deserialized `Config` with sane defaults,
//! overridable from a minimal `clap` CLI. Grounded in the teacher's
//! `toml`/`clap` dependencies (both present in its `Cargo.toml`, used
//! separately in `wallet/cli.rs`'s derive-style CLI) — no single teacher
//! module combines them into one config layer, so this is assembled fresh
//! from that style.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MiningConfig {
    pub automine: bool,
    pub initial_difficulty: u64,
    pub mining_delay_ms: u64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            automine: false,
            initial_difficulty: 8,
            mining_delay_ms: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./weave-data"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mining: MiningConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Command-line overrides for a small set of the most commonly tweaked
/// config fields, matching the `clap::Parser` derive style used in the
/// teacher's wallet CLI.
#[derive(Parser, Debug)]
#[command(name = "weave-node", about = "Blockweave consensus node")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long, default_value = "weave.toml")]
    pub config: PathBuf,

    /// Start mining immediately.
    #[arg(long)]
    pub automine: bool,

    /// Override the storage directory.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    pub fn resolve_config(&self) -> Config {
        let mut config = Config::load(&self.config).unwrap_or_default();
        if self.automine {
            config.mining.automine = true;
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = Config::default();
        assert!(!config.mining.automine);
        assert_eq!(config.mining.initial_difficulty, 8);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn parses_toml_overrides() {
        let toml_str = r#"
            log_level = "debug"
            [mining]
            automine = true
            initial_difficulty = 12
            mining_delay_ms = 500
            [storage]
            data_dir = "/tmp/weave"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.mining.automine);
        assert_eq!(config.mining.initial_difficulty, 12);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/weave"));
    }
}
