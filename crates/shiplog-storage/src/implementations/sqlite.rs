//! SQLite Order Store backend.
//!
//! Durable implementation of the OrderStore trait backed by a single SQLite
//! database file. The schema is created on open, so pointing the store at an
//! empty file is enough to bootstrap a deployment. `order_date` is stored as
//! ISO-8601 text and the required-field invariants are mirrored as CHECK
//! constraints, so the table enforces them even for rows written out-of-band.

use crate::{validate_new_order, OrderStore, StoreError};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, ErrorCode};
use shiplog_types::{ConfigSchema, Field, FieldType, NewOrder, Order, Schema, ValidationError};
use std::sync::Mutex;
use std::time::Duration;

/// Storage format for `order_date` columns.
const DATE_FORMAT: &str = "%Y-%m-%d";
/// Default busy timeout when the config does not override it.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// SQLite-backed Order Store.
///
/// rusqlite connections are not Sync, so the single connection lives behind
/// a mutex. Queries are short and never hold the lock across an await point.
pub struct SqliteStore {
	connection: Mutex<Connection>,
}

impl SqliteStore {
	/// Opens (or creates) the database at `path` and ensures the schema.
	///
	/// `path` may be `:memory:` for an ephemeral database.
	pub fn open(path: &str, busy_timeout: Duration) -> Result<Self, StoreError> {
		let connection = Connection::open(path).map_err(map_store_error)?;
		connection
			.busy_timeout(busy_timeout)
			.map_err(map_store_error)?;
		init_schema(&connection)?;

		tracing::debug!(path, "Opened sqlite order store");

		Ok(Self {
			connection: Mutex::new(connection),
		})
	}

	fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
		self.connection
			.lock()
			.map_err(|_| StoreError::Backend("connection lock poisoned".to_string()))
	}
}

/// Creates the orders table and its date index if they do not exist.
fn init_schema(connection: &Connection) -> Result<(), StoreError> {
	connection
		.execute_batch(
			"CREATE TABLE IF NOT EXISTS orders (
				id INTEGER PRIMARY KEY AUTOINCREMENT,
				order_number TEXT NOT NULL CHECK (length(order_number) > 0),
				customer_name TEXT,
				products_shipped TEXT NOT NULL CHECK (length(products_shipped) > 0),
				notes TEXT,
				order_date TEXT NOT NULL
			);
			CREATE INDEX IF NOT EXISTS idx_orders_order_date ON orders (order_date);",
		)
		.map_err(map_store_error)
}

/// Maps a rusqlite error to a store error.
///
/// Constraint violations indicate a rejected order payload; everything else
/// is a backend fault.
fn map_store_error(err: rusqlite::Error) -> StoreError {
	match &err {
		rusqlite::Error::SqliteFailure(failure, _)
			if failure.code == ErrorCode::ConstraintViolation =>
		{
			StoreError::InvalidOrder(err.to_string())
		}
		_ => StoreError::Backend(err.to_string()),
	}
}

#[async_trait]
impl OrderStore for SqliteStore {
	async fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError> {
		validate_new_order(&new_order)?;

		let order_date = new_order
			.order_date
			.unwrap_or_else(|| Local::now().date_naive());

		let connection = self.lock()?;
		connection
			.execute(
				"INSERT INTO orders (order_number, customer_name, products_shipped, notes, order_date)
				 VALUES (?1, ?2, ?3, ?4, ?5)",
				params![
					new_order.order_number,
					new_order.customer_name,
					new_order.products_shipped,
					new_order.notes,
					order_date.format(DATE_FORMAT).to_string(),
				],
			)
			.map_err(map_store_error)?;
		let id = connection.last_insert_rowid();

		Ok(Order {
			id,
			order_number: new_order.order_number,
			customer_name: new_order.customer_name,
			products_shipped: new_order.products_shipped,
			notes: new_order.notes,
			order_date,
		})
	}

	async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Order>, StoreError> {
		let connection = self.lock()?;
		let mut statement = connection
			.prepare(
				"SELECT id, order_number, customer_name, products_shipped, notes, order_date
				 FROM orders
				 WHERE order_date = ?1
				 ORDER BY order_number ASC",
			)
			.map_err(map_store_error)?;

		let rows = statement
			.query_map(params![date.format(DATE_FORMAT).to_string()], |row| {
				Ok((
					row.get::<_, i64>(0)?,
					row.get::<_, String>(1)?,
					row.get::<_, Option<String>>(2)?,
					row.get::<_, String>(3)?,
					row.get::<_, Option<String>>(4)?,
					row.get::<_, String>(5)?,
				))
			})
			.map_err(map_store_error)?;

		let mut orders = Vec::new();
		for row in rows {
			let (id, order_number, customer_name, products_shipped, notes, date_text) =
				row.map_err(map_store_error)?;
			let order_date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT)
				.map_err(|e| StoreError::Serialization(e.to_string()))?;
			orders.push(Order {
				id,
				order_number,
				customer_name,
				products_shipped,
				notes,
				order_date,
			});
		}

		Ok(orders)
	}

	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(SqliteStoreSchema)
	}
}

/// Configuration schema for SqliteStore.
pub struct SqliteStoreSchema;

impl ConfigSchema for SqliteStoreSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("path", FieldType::String)],
			vec![Field::new(
				"busy_timeout_ms",
				FieldType::Integer {
					min: Some(0),
					max: None,
				},
			)],
		);
		schema.validate(config)
	}
}

/// Factory function to create a sqlite store backend from configuration.
///
/// Configuration parameters:
/// - `path` (required): database file path, or `:memory:`
/// - `busy_timeout_ms` (optional): lock wait budget, defaults to 5000
pub fn create_store(config: &toml::Value) -> Result<Box<dyn OrderStore>, StoreError> {
	SqliteStoreSchema
		.validate(config)
		.map_err(|e| StoreError::Configuration(e.to_string()))?;

	let path = config
		.get("path")
		.and_then(|v| v.as_str())
		.ok_or_else(|| StoreError::Configuration("path is required".to_string()))?;
	let busy_timeout_ms = config
		.get("busy_timeout_ms")
		.and_then(|v| v.as_integer())
		.map(|ms| ms as u64)
		.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);

	let store = SqliteStore::open(path, Duration::from_millis(busy_timeout_ms))?;
	Ok(Box::new(store))
}
