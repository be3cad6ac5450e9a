//! Storage module for the shiplog order-tracking system.
//!
//! This module provides the Order Store: an append-only table of shipment
//! records with a read query by exact date. Two backend implementations are
//! provided, an in-memory store for tests and development and a SQLite store
//! for durable deployments.

use async_trait::async_trait;
use chrono::NaiveDate;
use shiplog_types::{ConfigSchema, NewOrder, Order};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
	pub mod sqlite;
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Error that occurs when an insert payload violates the order invariants.
	#[error("Invalid order: {0}")]
	InvalidOrder(String),
	/// Error that occurs in the storage backend.
	#[error("Backend error: {0}")]
	Backend(String),
	/// Error that occurs when converting stored data to domain types.
	#[error("Serialization error: {0}")]
	Serialization(String),
	/// Error that occurs during configuration validation.
	#[error("Configuration error: {0}")]
	Configuration(String),
}

/// Trait defining the interface for Order Store backends.
///
/// The store is the sole authority over persisted orders: it enforces the
/// non-empty required fields, applies the order-date default, and assigns
/// ids. Orders are never updated or deleted through this interface.
#[async_trait]
pub trait OrderStore: Send + Sync {
	/// Persists a new order and returns the full stored record.
	///
	/// Rejects empty `order_number` or `products_shipped` with
	/// [`StoreError::InvalidOrder`]. A missing `order_date` resolves to the
	/// current date here, once, so the default is authoritative and the
	/// caller layer never injects it.
	async fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError>;

	/// Returns all orders whose `order_date` equals the given date,
	/// ascending by `order_number`.
	///
	/// A date with no matching orders yields an empty Vec, not an error.
	async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Order>, StoreError>;

	/// Returns the configuration schema for validation.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;
}

/// Type alias for store factory functions.
///
/// This is the function signature that all store implementations must provide
/// to create instances of their backend.
pub type StoreFactory = fn(&toml::Value) -> Result<Box<dyn OrderStore>, StoreError>;

/// Get all registered store implementations.
///
/// Returns a vector of (name, factory) tuples for all available backends.
/// The service uses this to wire its name-to-factory map.
pub fn get_all_implementations() -> Vec<(&'static str, StoreFactory)> {
	use implementations::{memory, sqlite};

	vec![
		("memory", memory::create_store as StoreFactory),
		("sqlite", sqlite::create_store as StoreFactory),
	]
}

/// Checks the order invariants shared by all backends.
///
/// Empty required fields are rejected rather than stored; an order with an
/// empty `order_number` or `products_shipped` is not a valid domain object.
pub(crate) fn validate_new_order(new_order: &NewOrder) -> Result<(), StoreError> {
	if new_order.order_number.is_empty() {
		return Err(StoreError::InvalidOrder(
			"order_number must not be empty".to_string(),
		));
	}
	if new_order.products_shipped.is_empty() {
		return Err(StoreError::InvalidOrder(
			"products_shipped must not be empty".to_string(),
		));
	}
	Ok(())
}
