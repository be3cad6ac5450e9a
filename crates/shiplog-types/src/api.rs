//! API types for the shiplog HTTP API.
//!
//! This module defines the request and response types for the two order
//! endpoints, plus the error type returned when a request fails. The error
//! contract is deliberately opaque: storage faults are mapped to a fixed
//! generic message and internal detail never leaves the service.

use crate::{NewOrder, Order};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Request body for creating an order.
///
/// The required string fields default to empty when absent so that a
/// missing field reaches the store and is rejected there, rather than
/// failing JSON extraction with a different error shape. Presence checks
/// are a store responsibility, not a wire-format one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
	#[serde(default)]
	pub order_number: String,
	#[serde(default)]
	pub customer_name: Option<String>,
	#[serde(default)]
	pub products_shipped: String,
	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub order_date: Option<NaiveDate>,
}

impl From<CreateOrderRequest> for NewOrder {
	fn from(request: CreateOrderRequest) -> Self {
		NewOrder {
			order_number: request.order_number,
			customer_name: request.customer_name,
			products_shipped: request.products_shipped,
			notes: request.notes,
			order_date: request.order_date,
		}
	}
}

/// Request body for listing orders by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrdersRequest {
	pub order_date: NaiveDate,
}

/// Response body for a successful list request.
///
/// Orders are sorted ascending by `order_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrdersResponse {
	pub orders: Vec<Order>,
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Generic, user-facing error message.
	pub error: String,
}

/// Structured API error with a fixed user-facing message per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
	/// Order creation failed (500).
	CreationFailed,
	/// Order listing failed (500).
	FetchFailed,
}

impl ApiError {
	/// Get the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			ApiError::CreationFailed | ApiError::FetchFailed => 500,
		}
	}

	/// The exact message sent to the client.
	pub fn message(&self) -> &'static str {
		match self {
			ApiError::CreationFailed => "Failed to create order",
			ApiError::FetchFailed => "Failed to fetch orders",
		}
	}

	/// Convert to ErrorResponse for JSON serialization.
	pub fn to_error_response(&self) -> ErrorResponse {
		ErrorResponse {
			error: self.message().to_string(),
		}
	}
}

impl fmt::Display for ApiError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.message())
	}
}

impl std::error::Error for ApiError {}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		use axum::{http::StatusCode, response::Json};

		let status = StatusCode::from_u16(self.status_code())
			.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

		(status, Json(self.to_error_response())).into_response()
	}
}
