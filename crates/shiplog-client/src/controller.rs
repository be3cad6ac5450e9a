//! Request orchestration for the order page.
//!
//! [`PageController`] drives a [`PageState`] through its transitions in
//! response to user events: it issues fetches on date changes, sends the
//! form on submit, re-fetches after a successful create, and schedules the
//! one-shot timer that clears the success banner. It never mutates the
//! state directly; every change goes through a named transition.

use crate::state::PageState;
use crate::OrdersApi;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// How long the success banner stays up after a successful submit.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(3);

/// Drives the order page state against an [`OrdersApi`] transport.
#[derive(Clone)]
pub struct PageController {
	state: Arc<RwLock<PageState>>,
	api: Arc<dyn OrdersApi>,
}

impl PageController {
	/// Creates a controller with today's date selected.
	pub fn new(api: Arc<dyn OrdersApi>) -> Self {
		Self::with_date(api, Local::now().date_naive())
	}

	/// Creates a controller with a specific initial date selected.
	pub fn with_date(api: Arc<dyn OrdersApi>, today: NaiveDate) -> Self {
		Self {
			state: Arc::new(RwLock::new(PageState::new(today))),
			api,
		}
	}

	/// Returns a copy of the current page state.
	pub async fn snapshot(&self) -> PageState {
		self.state.read().await.clone()
	}

	/// Replaces the draft form, as the UI layer does while the user types.
	pub async fn set_form(&self, form: crate::OrderForm) {
		self.state.write().await.form = form;
	}

	/// Fetches orders for the currently selected date.
	///
	/// Called once on first render to populate the initial list.
	pub async fn refresh(&self) {
		let date = self.state.read().await.selected_date;
		self.fetch(date).await;
	}

	/// The user selected a new date: apply the transition, then fetch.
	pub async fn select_date(&self, date: NaiveDate) {
		self.state.write().await.date_changed(date);
		self.fetch(date).await;
	}

	/// The user submitted the form.
	///
	/// On success the form is cleared, the success banner is raised with a
	/// 3 second expiry, and the selected date is re-fetched so the new
	/// order appears. On failure the form is left untouched for retry.
	pub async fn submit(&self) {
		let (request, date) = {
			let mut state = self.state.write().await;
			state.submit_started();
			(state.form.to_request(state.selected_date), state.selected_date)
		};

		match self.api.create_order(request).await {
			Ok(order) => {
				tracing::info!(order_id = order.id, "Created order");
				let epoch = self.state.write().await.submit_succeeded();
				self.schedule_banner_expiry(epoch);
				self.fetch(date).await;
			}
			Err(e) => {
				tracing::warn!("Order creation failed: {}", e);
				self.state.write().await.submit_failed();
			}
		}
	}

	/// Issues a fetch for `date` and applies the completion.
	///
	/// The completion carries the date the fetch was issued for, so the
	/// state can discard it if the selection moved on in the meantime.
	async fn fetch(&self, date: NaiveDate) {
		let result = self.api.list_orders(date).await;
		self.state.write().await.fetch_resolved(date, result);
	}

	/// One-shot delayed transition clearing the success banner.
	fn schedule_banner_expiry(&self, epoch: u64) {
		let state = Arc::clone(&self.state);
		tokio::spawn(async move {
			tokio::time::sleep(SUCCESS_BANNER_DURATION).await;
			state.write().await.success_expired(epoch);
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::state::{COULD_NOT_CREATE_ORDER, COULD_NOT_LOAD_ORDERS};
	use crate::{ClientError, OrderForm};
	use async_trait::async_trait;
	use shiplog_types::{CreateOrderRequest, Order};
	use std::collections::HashMap;
	use std::sync::Mutex;
	use tokio::sync::Notify;

	/// Gate blocking one date's list call until released, so tests can
	/// overlap fetches deterministically.
	struct Gate {
		started: Notify,
		release: Notify,
	}

	#[derive(Default)]
	struct MockApi {
		orders: Mutex<HashMap<NaiveDate, Vec<Order>>>,
		gates: Mutex<HashMap<NaiveDate, Arc<Gate>>>,
		fail_create: Mutex<bool>,
		fail_list: Mutex<bool>,
	}

	impl MockApi {
		fn set_orders(&self, date: NaiveDate, orders: Vec<Order>) {
			self.orders.lock().unwrap().insert(date, orders);
		}

		fn block_list(&self, date: NaiveDate) -> Arc<Gate> {
			let gate = Arc::new(Gate {
				started: Notify::new(),
				release: Notify::new(),
			});
			self.gates.lock().unwrap().insert(date, Arc::clone(&gate));
			gate
		}

		fn fail_create(&self) {
			*self.fail_create.lock().unwrap() = true;
		}

		fn fail_list(&self) {
			*self.fail_list.lock().unwrap() = true;
		}
	}

	#[async_trait]
	impl OrdersApi for MockApi {
		async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, ClientError> {
			if *self.fail_create.lock().unwrap() {
				return Err(ClientError::Api("Failed to create order".to_string()));
			}

			let date = request.order_date.expect("controller always dates requests");
			let order = Order {
				id: 1,
				order_number: request.order_number,
				customer_name: request.customer_name,
				products_shipped: request.products_shipped,
				notes: request.notes,
				order_date: date,
			};
			self.orders
				.lock()
				.unwrap()
				.entry(date)
				.or_default()
				.push(order.clone());

			Ok(order)
		}

		async fn list_orders(&self, date: NaiveDate) -> Result<Vec<Order>, ClientError> {
			let gate = self.gates.lock().unwrap().get(&date).cloned();
			if let Some(gate) = gate {
				gate.started.notify_one();
				gate.release.notified().await;
			}

			if *self.fail_list.lock().unwrap() {
				return Err(ClientError::Network("connection refused".to_string()));
			}

			Ok(self.orders.lock().unwrap().get(&date).cloned().unwrap_or_default())
		}
	}

	fn date(day: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
	}

	fn order(number: &str, day: u32) -> Order {
		Order {
			id: 1,
			order_number: number.to_string(),
			customer_name: None,
			products_shipped: "2x Widget".to_string(),
			notes: None,
			order_date: date(day),
		}
	}

	fn filled_form() -> OrderForm {
		OrderForm {
			order_number: "5001".to_string(),
			customer_name: String::new(),
			products_shipped: "2x Widget".to_string(),
			notes: String::new(),
		}
	}

	#[tokio::test]
	async fn refresh_populates_initial_list() {
		let api = Arc::new(MockApi::default());
		api.set_orders(date(10), vec![order("101", 10)]);
		let controller = PageController::with_date(api, date(10));

		controller.refresh().await;

		let state = controller.snapshot().await;
		assert_eq!(state.orders.len(), 1);
		assert!(state.error.is_none());
	}

	#[tokio::test]
	async fn select_date_fetches_that_date() {
		let api = Arc::new(MockApi::default());
		api.set_orders(date(11), vec![order("201", 11)]);
		let controller = PageController::with_date(api, date(10));

		controller.select_date(date(11)).await;

		let state = controller.snapshot().await;
		assert_eq!(state.selected_date, date(11));
		assert_eq!(state.orders[0].order_number, "201");
	}

	#[tokio::test]
	async fn fetch_failure_sets_error_banner() {
		let api = Arc::new(MockApi::default());
		api.fail_list();
		let controller = PageController::with_date(api, date(10));

		controller.refresh().await;

		let state = controller.snapshot().await;
		assert_eq!(state.error.as_deref(), Some(COULD_NOT_LOAD_ORDERS));
	}

	#[tokio::test]
	async fn stale_fetch_does_not_overwrite_newer_selection() {
		let api = Arc::new(MockApi::default());
		api.set_orders(date(10), vec![order("101", 10)]);
		api.set_orders(date(11), vec![order("201", 11)]);
		let gate = api.block_list(date(10));
		let controller = PageController::with_date(api, date(10));

		// Fetch for date A parks inside the transport.
		let stale = tokio::spawn({
			let controller = controller.clone();
			async move { controller.select_date(date(10)).await }
		});
		gate.started.notified().await;

		// The user moves on to date B before A resolves.
		controller.select_date(date(11)).await;

		// A resolves last; its result must be discarded.
		gate.release.notify_one();
		stale.await.unwrap();

		let state = controller.snapshot().await;
		assert_eq!(state.selected_date, date(11));
		assert_eq!(state.orders.len(), 1);
		assert_eq!(state.orders[0].order_number, "201");
	}

	#[tokio::test(start_paused = true)]
	async fn submit_success_clears_form_refetches_and_expires_banner() {
		let api = Arc::new(MockApi::default());
		let controller = PageController::with_date(api, date(10));
		controller.set_form(filled_form()).await;

		controller.submit().await;

		let state = controller.snapshot().await;
		assert!(state.success);
		assert_eq!(state.form, OrderForm::default());
		assert_eq!(state.orders.len(), 1, "submit must re-fetch the selected date");
		assert_eq!(state.orders[0].order_number, "5001");

		// The banner clears itself after the expiry delay.
		tokio::time::sleep(SUCCESS_BANNER_DURATION + Duration::from_millis(10)).await;
		let state = controller.snapshot().await;
		assert!(!state.success);
	}

	#[tokio::test]
	async fn submit_failure_keeps_form_for_retry() {
		let api = Arc::new(MockApi::default());
		api.fail_create();
		let controller = PageController::with_date(api, date(10));
		controller.set_form(filled_form()).await;

		controller.submit().await;

		let state = controller.snapshot().await;
		assert!(!state.success);
		assert_eq!(state.error.as_deref(), Some(COULD_NOT_CREATE_ORDER));
		assert_eq!(state.form, filled_form());
	}
}
