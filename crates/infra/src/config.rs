//! Configuration loading and representation.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional TOML
//! file, then `STOCKLEDGER_*` environment variables. The CLI applies its own
//! flag overrides on top.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use stockledger_inventory::{LowStockPolicy, DEFAULT_LOW_STOCK_THRESHOLD};

use crate::notifier::{LogNotifier, Notifier, OutboxNotifier};

pub const DEFAULT_CONFIG_PATH: &str = "config/stockledger.toml";
pub const ENV_PREFIX: &str = "STOCKLEDGER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Which notifier alerts are handed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    Log,
    Outbox,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ledger_path: PathBuf,
    pub balances_path: PathBuf,
    pub outbox_path: PathBuf,
    pub low_stock_threshold: i64,
    pub alert_recipient: String,
    pub notifier: NotifierKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("data/ledger.csv"),
            balances_path: PathBuf::from("data/balances.csv"),
            outbox_path: PathBuf::from("data/outbox.jsonl"),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            alert_recipient: String::new(),
            notifier: NotifierKind::Log,
        }
    }
}

impl Settings {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_PATH`]) and the environment.
    ///
    /// A missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`Settings::load`], reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&str>,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn policy(&self) -> LowStockPolicy {
        LowStockPolicy::new(self.low_stock_threshold)
    }

    pub fn build_notifier(&self) -> Box<dyn Notifier> {
        match self.notifier {
            NotifierKind::Log => Box::new(LogNotifier::new(self.alert_recipient.clone())),
            NotifierKind::Outbox => Box::new(OutboxNotifier::new(
                self.outbox_path.clone(),
                self.alert_recipient.clone(),
            )),
        }
    }
}
