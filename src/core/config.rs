//! Invoicing configuration.
//!
//! Loaded from TOML; every field has a default, so an empty file (or no
//! file at all) yields [`InvoicingConfig::default`].
//!
//! ```toml
//! default_currency = "EUR"
//! currency_rule = "iso4217"
//! max_line_items = 500
//!
//! [id_prefixes]
//! invoice = "RE-"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::currencies::{CurrencyCode, CurrencyRule};
use super::numbering::IdPrefixes;

/// Line item limit per invoice unless configured otherwise.
pub const DEFAULT_MAX_LINE_ITEMS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicingConfig {
    /// Currency of a new invoice until its first line item fixes one.
    pub default_currency: CurrencyCode,
    /// Check applied to currencies entering through the application layer.
    pub currency_rule: CurrencyRule,
    /// Upper bound on line items per invoice.
    pub max_line_items: usize,
    pub id_prefixes: IdPrefixes,
}

impl Default for InvoicingConfig {
    fn default() -> Self {
        Self {
            default_currency: CurrencyCode::default(),
            currency_rule: CurrencyRule::default(),
            max_line_items: DEFAULT_MAX_LINE_ITEMS,
            id_prefixes: IdPrefixes::default(),
        }
    }
}

/// Configuration load error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl InvoicingConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: InvoicingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Cross-field checks serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.currency_rule.accepts(&self.default_currency) {
            return Err(ConfigError::Invalid(format!(
                "default currency {} is not allowed by the {:?} currency rule",
                self.default_currency, self.currency_rule
            )));
        }
        if self.max_line_items == 0 {
            return Err(ConfigError::Invalid(
                "max_line_items must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
