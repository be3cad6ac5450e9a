//! Client module for the shiplog order-tracking system.
//!
//! This crate models the order page: an explicit state object updated only
//! through named transitions, a transport trait for the two order endpoints,
//! and a controller that orchestrates fetches and submissions on top of both.
//! Rendering is out of scope; a UI layer observes [`state::PageState`] and
//! calls the controller.

use async_trait::async_trait;
use chrono::NaiveDate;
use shiplog_types::{CreateOrderRequest, Order};
use thiserror::Error;

pub mod controller;
pub mod state;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

pub use controller::PageController;
pub use state::{OrderForm, PageState};

/// Errors that can occur when talking to the order endpoints.
#[derive(Debug, Error)]
pub enum ClientError {
	/// Error that occurs at the transport level (connect, timeout).
	#[error("Network error: {0}")]
	Network(String),
	/// Error reported by the service in a response body.
	#[error("API error: {0}")]
	Api(String),
	/// Error that occurs when a response body cannot be decoded.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

/// Trait defining the transport to the two order endpoints.
///
/// The controller depends on this trait rather than on a concrete HTTP
/// client, so tests can drive the page with an in-process fake.
#[async_trait]
pub trait OrdersApi: Send + Sync {
	/// Submits a new order and returns the created record.
	async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, ClientError>;

	/// Fetches all orders for the given date.
	async fn list_orders(&self, date: NaiveDate) -> Result<Vec<Order>, ClientError>;
}
