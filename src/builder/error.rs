//! Build errors for machine construction.

use crate::config::{join_errors, ConfigError};
use thiserror::Error;

/// Errors that can occur when building a controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Price not specified. Call .price(amount) or .config(config) before .build()")]
    MissingPrice,

    #[error("Invalid machine configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ConfigError>),
}
