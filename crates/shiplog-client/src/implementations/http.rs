//! HTTP transport for the order endpoints.
//!
//! Implements [`OrdersApi`] over reqwest against a running shiplog service.
//! Both endpoints are plain POST with JSON bodies; a body carrying
//! `{"error": ...}` is surfaced as [`ClientError::Api`] whatever the HTTP
//! status, matching the service's error contract.

use crate::{ClientError, OrdersApi};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use shiplog_types::{CreateOrderRequest, ListOrdersRequest, ListOrdersResponse, Order};
use std::time::Duration;

/// Request timeout for both endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed implementation of [`OrdersApi`].
pub struct HttpOrdersApi {
	client: reqwest::Client,
	base_url: String,
}

impl HttpOrdersApi {
	/// Creates a client for the service at `base_url` (e.g.
	/// `http://127.0.0.1:8080`).
	pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
		let client = reqwest::Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(|e| ClientError::Network(e.to_string()))?;

		Ok(Self {
			client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
		})
	}

	async fn post<B: serde::Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, ClientError> {
		let url = format!("{}{}", self.base_url, path);
		let response = self
			.client
			.post(&url)
			.json(body)
			.send()
			.await
			.map_err(|e| ClientError::Network(e.to_string()))?;

		parse_body(response).await
	}
}

/// Decodes a response body, mapping the service's error contract.
async fn parse_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
	let status = response.status();
	let body: serde_json::Value = response
		.json()
		.await
		.map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

	if let Some(message) = body.get("error").and_then(|v| v.as_str()) {
		return Err(ClientError::Api(message.to_string()));
	}
	if !status.is_success() {
		return Err(ClientError::Api(format!("Unexpected status {}", status)));
	}

	serde_json::from_value(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
	async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, ClientError> {
		self.post("/api/create-order", &request).await
	}

	async fn list_orders(&self, date: NaiveDate) -> Result<Vec<Order>, ClientError> {
		let request = ListOrdersRequest { order_date: date };
		let response: ListOrdersResponse = self.post("/api/get-orders", &request).await?;
		Ok(response.orders)
	}
}
