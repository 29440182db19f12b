//! Builder for constructing transaction controllers.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::controller::{Ledger, Listener, ProductId, TransactionController, VendEvent};
use crate::core::{StateHistory, DEFAULT_HISTORY_LIMIT};
use tracing::info;

/// Builder for constructing a [`TransactionController`] with a fluent API.
///
/// # Example
///
/// ```
/// use vendstate::builder::MachineBuilder;
/// use vendstate::controller::MachineState;
///
/// let machine = MachineBuilder::new()
///     .price(10000)
///     .stock(4)
///     .product("Pepsi")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.state(), MachineState::NoFunds);
/// assert_eq!(machine.stock(), 4);
/// ```
#[derive(Debug, Default)]
pub struct MachineBuilder {
    price: Option<u64>,
    stock: u32,
    product: Option<ProductId>,
    history_limit: Option<usize>,
    listeners: Vec<Listener>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take price, stock, product and history limit from `config`.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.price = Some(config.price);
        self.stock = config.initial_stock;
        self.product = config.product;
        self.history_limit = Some(config.history_limit);
        self
    }

    /// Set the unit price (required).
    pub fn price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the initial stock. Defaults to zero, which starts the machine
    /// sold out.
    pub fn stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Only accept this id in `select_product`.
    pub fn product(mut self, product: impl Into<ProductId>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Register a listener.
    pub fn listener(mut self, listener: Listener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Register a closure as a listener.
    pub fn on_event<F>(self, callback: F) -> Self
    where
        F: Fn(&VendEvent) + Send + Sync + 'static,
    {
        self.listener(Listener::new(callback))
    }

    /// Build the controller.
    /// Returns an error if the price is missing or the configuration is
    /// invalid.
    pub fn build(self) -> Result<TransactionController, BuildError> {
        let price = self.price.ok_or(BuildError::MissingPrice)?;

        let config = MachineConfig {
            price,
            initial_stock: self.stock,
            product: self.product,
            history_limit: self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        };
        config.check().map_err(BuildError::InvalidConfig)?;

        let ledger = Ledger::opening(config.initial_stock);
        info!(
            price = config.price,
            stock = ledger.stock,
            state = %ledger.state,
            "vending machine ready"
        );

        let history = StateHistory::with_limit(config.history_limit);
        Ok(TransactionController::from_parts(
            config,
            ledger,
            history,
            self.listeners,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::controller::MachineState;

    #[test]
    fn builder_requires_price() {
        let result = MachineBuilder::new().stock(3).build();
        assert!(matches!(result, Err(BuildError::MissingPrice)));
    }

    #[test]
    fn builder_rejects_zero_price() {
        let result = MachineBuilder::new().price(0).stock(3).build();
        assert_eq!(
            result.err(),
            Some(BuildError::InvalidConfig(vec![ConfigError::ZeroPrice]))
        );
    }

    #[test]
    fn builder_reports_every_config_problem() {
        let err = MachineBuilder::new()
            .price(0)
            .product("")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            BuildError::InvalidConfig(vec![ConfigError::ZeroPrice, ConfigError::EmptyProductId])
        );
        assert_eq!(
            err.to_string(),
            "Invalid machine configuration: Price must be positive; Product id must not be empty"
        );
    }

    #[test]
    fn builder_without_stock_starts_sold_out() {
        let machine = MachineBuilder::new().price(100).build().unwrap();
        assert_eq!(machine.state(), MachineState::SoldOut);
    }

    #[test]
    fn builder_applies_config() {
        let mut config = MachineConfig::new(2500, 6);
        config.product = Some(ProductId::new("Water"));
        config.history_limit = 3;

        let machine = MachineBuilder::new().config(config.clone()).build().unwrap();

        assert_eq!(machine.config(), &config);
        assert_eq!(machine.history().limit(), 3);
        assert_eq!(machine.stock(), 6);
    }

    #[test]
    fn fluent_setters_override_config() {
        let machine = MachineBuilder::new()
            .config(MachineConfig::new(2500, 6))
            .price(3000)
            .build()
            .unwrap();

        assert_eq!(machine.price(), 3000);
        assert_eq!(machine.stock(), 6);
    }
}
