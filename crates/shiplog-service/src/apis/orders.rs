//! Order endpoint implementations.
//!
//! Each function performs exactly one Order Store operation. Error mapping
//! to the generic API messages happens at the handler boundary in the
//! server module; these functions surface the store error as-is so it can
//! be logged there.

use shiplog_storage::{OrderStore, StoreError};
use shiplog_types::{CreateOrderRequest, ListOrdersRequest, ListOrdersResponse, Order};
use tracing::info;

/// Processes an order creation request.
pub async fn process_create_request(
	request: CreateOrderRequest,
	store: &dyn OrderStore,
) -> Result<Order, StoreError> {
	let order = store.insert(request.into()).await?;
	info!(
		order_id = order.id,
		order_number = %order.order_number,
		"Created order"
	);

	Ok(order)
}

/// Processes an order listing request.
pub async fn process_list_request(
	request: ListOrdersRequest,
	store: &dyn OrderStore,
) -> Result<ListOrdersResponse, StoreError> {
	let orders = store.list_by_date(request.order_date).await?;

	Ok(ListOrdersResponse { orders })
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;
	use shiplog_storage::implementations::memory::MemoryStore;

	fn create_request(number: &str, date: NaiveDate) -> CreateOrderRequest {
		CreateOrderRequest {
			order_number: number.to_string(),
			customer_name: None,
			products_shipped: "2x Widget".to_string(),
			notes: None,
			order_date: Some(date),
		}
	}

	#[tokio::test]
	async fn create_then_list_returns_the_order() {
		let store = MemoryStore::new();
		let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

		let created = create_request("5001", date);
		let order = process_create_request(created, &store).await.unwrap();
		assert!(order.id > 0);

		let response = process_list_request(ListOrdersRequest { order_date: date }, &store)
			.await
			.unwrap();
		assert_eq!(response.orders, vec![order]);
	}

	#[tokio::test]
	async fn create_with_empty_products_shipped_is_a_store_error() {
		let store = MemoryStore::new();
		let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

		let request = CreateOrderRequest {
			order_number: "5001".to_string(),
			customer_name: None,
			products_shipped: String::new(),
			notes: None,
			order_date: Some(date),
		};

		let result = process_create_request(request, &store).await;
		assert!(matches!(result, Err(StoreError::InvalidOrder(_))));
	}

	#[tokio::test]
	async fn list_preserves_store_ordering() {
		let store = MemoryStore::new();
		let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

		process_create_request(create_request("102", date), &store)
			.await
			.unwrap();
		process_create_request(create_request("101", date), &store)
			.await
			.unwrap();

		let response = process_list_request(ListOrdersRequest { order_date: date }, &store)
			.await
			.unwrap();
		let numbers: Vec<&str> = response
			.orders
			.iter()
			.map(|o| o.order_number.as_str())
			.collect();
		assert_eq!(numbers, vec!["101", "102"]);
	}
}
