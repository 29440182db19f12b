//! Machine configuration.
//!
//! A [`MachineConfig`] can be written by hand, deserialized from JSON, and
//! layered with environment overrides. Sources, lowest priority first:
//!
//! 1. Values given in code or JSON
//! 2. Environment variables
//!    `VENDSTATE_PRICE`, `VENDSTATE_STOCK`, `VENDSTATE_PRODUCT`,
//!    `VENDSTATE_HISTORY_LIMIT`
//!
//! ```json
//! {
//!   "price": 10000,
//!   "initial_stock": 4,
//!   "product": "Pepsi",
//!   "history_limit": 32
//! }
//! ```

use crate::controller::ProductId;
use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;
use tracing::{debug, warn};

pub const ENV_PRICE: &str = "VENDSTATE_PRICE";
pub const ENV_STOCK: &str = "VENDSTATE_STOCK";
pub const ENV_PRODUCT: &str = "VENDSTATE_PRODUCT";
pub const ENV_HISTORY_LIMIT: &str = "VENDSTATE_HISTORY_LIMIT";

/// Problems found in a [`MachineConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Price must be positive")]
    ZeroPrice,

    #[error("Product id must not be empty")]
    EmptyProductId,

    #[error("Malformed configuration: {message}")]
    Malformed { message: String },
}

/// Static parameters of one machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Price of one unit, in the smallest currency unit.
    pub price: u64,

    #[serde(default)]
    pub initial_stock: u32,

    /// When set, `select_product` only accepts this id.
    #[serde(default)]
    pub product: Option<ProductId>,

    /// Number of state transitions kept in history. Zero disables it.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl MachineConfig {
    pub fn new(price: u64, initial_stock: u32) -> Self {
        Self {
            price,
            initial_stock,
            product: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Parse a config from JSON. The result is not validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed {
            message: e.to_string(),
        })
    }

    /// Validate the config, accumulating ALL problems.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let price = if self.price == 0 {
            Validation::fail(ConfigError::ZeroPrice)
        } else {
            Validation::success(())
        };

        let product = match &self.product {
            Some(id) if id.as_str().trim().is_empty() => {
                Validation::fail(ConfigError::EmptyProductId)
            }
            _ => Validation::success(()),
        };

        Validation::all_vec(vec![price, product]).map(|_| ())
    }

    /// [`validate`](Self::validate) collected into a plain `Result`.
    pub fn check(&self) -> Result<(), Vec<ConfigError>> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }

    /// Apply `VENDSTATE_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `VENDSTATE_*` names.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(price) = parse_override(&lookup, ENV_PRICE) {
            self.price = price;
        }
        if let Some(stock) = parse_override(&lookup, ENV_STOCK) {
            self.initial_stock = stock;
        }
        if let Some(product) = lookup(ENV_PRODUCT) {
            debug!(key = ENV_PRODUCT, value = %product, "config override");
            self.product = Some(ProductId::new(product));
        }
        if let Some(limit) = parse_override(&lookup, ENV_HISTORY_LIMIT) {
            self.history_limit = limit;
        }
        self
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => {
            debug!(key, value = %raw, "config override");
            Some(value)
        }
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring unparseable config override");
            None
        }
    }
}

pub(crate) fn join_errors<E: Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
