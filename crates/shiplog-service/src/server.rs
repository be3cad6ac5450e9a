//! HTTP server for the shiplog API.
//!
//! This module provides the router and server loop for the two order
//! endpoints. Handlers are stateless: each one performs exactly one Order
//! Store operation and maps any failure to the operation's generic error,
//! logging the internal detail instead of returning it.

use axum::{
	extract::State,
	response::Json,
	routing::post,
	Router,
};
use shiplog_config::ServerConfig;
use shiplog_storage::OrderStore;
use shiplog_types::{ApiError, CreateOrderRequest, ListOrdersRequest, ListOrdersResponse, Order};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state for the API server.
#[derive(Clone)]
pub struct AppState {
	/// The Order Store backing both endpoints.
	pub store: Arc<dyn OrderStore>,
}

/// Builds the API router over the given store.
pub fn router(store: Arc<dyn OrderStore>) -> Router {
	Router::new()
		.nest(
			"/api",
			Router::new()
				.route("/create-order", post(handle_create_order))
				.route("/get-orders", post(handle_get_orders)),
		)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive()),
		)
		.with_state(AppState { store })
}

/// Starts the HTTP server for the API.
///
/// This function creates and configures the HTTP server with routing,
/// middleware, and error handling for both endpoints.
pub async fn start_server(
	server_config: ServerConfig,
	store: Arc<dyn OrderStore>,
) -> Result<(), Box<dyn std::error::Error>> {
	let app = router(store);

	let bind_address = format!("{}:{}", server_config.host, server_config.port);
	let listener = TcpListener::bind(&bind_address).await?;

	tracing::info!("Shiplog API server starting on {}", bind_address);

	axum::serve(listener, app).await?;

	Ok(())
}

/// Handles POST /api/create-order requests.
///
/// Forwards the payload to the Order Store and returns the created record.
/// Any store failure, including rejected required fields, maps to the
/// generic creation error.
async fn handle_create_order(
	State(state): State<AppState>,
	Json(request): Json<CreateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
	match crate::apis::orders::process_create_request(request, state.store.as_ref()).await {
		Ok(order) => Ok(Json(order)),
		Err(e) => {
			tracing::warn!("Order creation failed: {}", e);
			Err(ApiError::CreationFailed)
		}
	}
}

/// Handles POST /api/get-orders requests.
///
/// Returns all orders for the requested date, ascending by order number.
async fn handle_get_orders(
	State(state): State<AppState>,
	Json(request): Json<ListOrdersRequest>,
) -> Result<Json<ListOrdersResponse>, ApiError> {
	match crate::apis::orders::process_list_request(request, state.store.as_ref()).await {
		Ok(response) => Ok(Json(response)),
		Err(e) => {
			tracing::warn!("Order listing failed: {}", e);
			Err(ApiError::FetchFailed)
		}
	}
}
