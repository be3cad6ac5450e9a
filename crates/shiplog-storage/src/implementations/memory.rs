//! In-memory Order Store backend.
//!
//! This module provides a memory-based implementation of the OrderStore
//! trait, useful for testing and development scenarios where persistence
//! is not required.

use crate::{validate_new_order, OrderStore, StoreError};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use shiplog_types::{ConfigSchema, NewOrder, Order, Schema, ValidationError};
use tokio::sync::RwLock;

/// In-memory Order Store implementation.
///
/// Orders live in a Vec behind a read-write lock, providing fast access
/// but no persistence across restarts.
pub struct MemoryStore {
	inner: RwLock<MemoryInner>,
}

struct MemoryInner {
	next_id: i64,
	orders: Vec<Order>,
}

impl MemoryStore {
	/// Creates a new empty MemoryStore instance.
	pub fn new() -> Self {
		Self {
			inner: RwLock::new(MemoryInner {
				next_id: 1,
				orders: Vec::new(),
			}),
		}
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl OrderStore for MemoryStore {
	async fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError> {
		validate_new_order(&new_order)?;

		let order_date = new_order
			.order_date
			.unwrap_or_else(|| Local::now().date_naive());

		let mut inner = self.inner.write().await;
		let order = Order {
			id: inner.next_id,
			order_number: new_order.order_number,
			customer_name: new_order.customer_name,
			products_shipped: new_order.products_shipped,
			notes: new_order.notes,
			order_date,
		};
		inner.next_id += 1;
		inner.orders.push(order.clone());

		Ok(order)
	}

	async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Order>, StoreError> {
		let inner = self.inner.read().await;
		let mut orders: Vec<Order> = inner
			.orders
			.iter()
			.filter(|order| order.order_date == date)
			.cloned()
			.collect();
		orders.sort_by(|a, b| a.order_number.cmp(&b.order_number));

		Ok(orders)
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MemoryStoreSchema)
	}
}

/// Configuration schema for MemoryStore.
pub struct MemoryStoreSchema;

impl ConfigSchema for MemoryStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		// Memory storage has no required configuration
		let schema = Schema::new(vec![], vec![]);
		schema.validate(config)
	}
}

/// Factory function to create a memory store backend from configuration.
///
/// Configuration parameters:
/// - None required for memory storage
pub fn create_store(_config: &toml::Value) -> Result<Box<dyn OrderStore>, StoreError> {
	Ok(Box::new(MemoryStore::new()))
}
