//! Order domain types.
//!
//! An [`Order`] is one persisted shipment record, keyed by a store-generated
//! id. Orders are insert-only: once persisted they are never updated or
//! deleted, so the types here carry no status or mutation surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A persisted shipment record.
///
/// Every stored order has a non-empty `order_number` and `products_shipped`;
/// the store enforces this at insert time. `order_number` is caller-supplied
/// and not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	/// Store-generated unique identifier.
	pub id: i64,
	/// Caller-supplied order number, used as the listing sort key.
	pub order_number: String,
	/// Optional customer name.
	pub customer_name: Option<String>,
	/// Free-text description of what was shipped.
	pub products_shipped: String,
	/// Optional free-text notes.
	pub notes: Option<String>,
	/// Ship date for this record.
	pub order_date: NaiveDate,
}

/// Insert payload for a new order.
///
/// `order_date` is optional here; the store resolves a missing date to the
/// current date at insert time, so the default is applied exactly once and
/// in one place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrder {
	pub order_number: String,
	#[serde(default)]
	pub customer_name: Option<String>,
	pub products_shipped: String,
	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub order_date: Option<NaiveDate>,
}
