//! Page state and its named transitions.
//!
//! [`PageState`] is the single source of truth for the order page. It is
//! mutated only through the transition methods below, which encode the
//! page's event handling: date selection, fetch completion, form submission
//! outcomes, and expiry of the success banner.
//!
//! Two races are handled here rather than in the transport layer:
//! - Fetch completions carry the date they were issued for, and
//!   [`PageState::fetch_resolved`] discards any completion whose date is no
//!   longer selected, so rapid date changes cannot display stale results.
//! - The success banner carries an epoch. [`PageState::success_expired`]
//!   only clears the banner for the epoch it was scheduled with, so a timer
//!   from an earlier submission cannot clear a later banner.

use crate::ClientError;
use chrono::NaiveDate;
use shiplog_types::{CreateOrderRequest, Order};

/// User-facing message when a fetch fails.
pub const COULD_NOT_LOAD_ORDERS: &str = "Could not load orders";
/// User-facing message when a submission fails.
pub const COULD_NOT_CREATE_ORDER: &str = "Could not create order";

/// Draft order fields as the user types them.
///
/// All fields are plain strings; empty optional fields become absent when
/// the form is turned into a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
	pub order_number: String,
	pub customer_name: String,
	pub products_shipped: String,
	pub notes: String,
}

impl OrderForm {
	/// Builds the create request for this form, dated with the given date.
	pub fn to_request(&self, order_date: NaiveDate) -> CreateOrderRequest {
		CreateOrderRequest {
			order_number: self.order_number.clone(),
			customer_name: none_if_empty(&self.customer_name),
			products_shipped: self.products_shipped.clone(),
			notes: none_if_empty(&self.notes),
			order_date: Some(order_date),
		}
	}
}

fn none_if_empty(value: &str) -> Option<String> {
	if value.is_empty() {
		None
	} else {
		Some(value.to_string())
	}
}

/// UI-local state for the order page.
#[derive(Debug, Clone)]
pub struct PageState {
	/// Date whose orders are displayed; fetches are keyed by this.
	pub selected_date: NaiveDate,
	/// Last successfully fetched order list.
	pub orders: Vec<Order>,
	/// Draft order fields.
	pub form: OrderForm,
	/// Transient user-facing error banner.
	pub error: Option<String>,
	/// Transient success banner, cleared by a delayed one-shot transition.
	pub success: bool,
	success_epoch: u64,
}

impl PageState {
	/// Initial state: the given date selected, empty form, empty list.
	pub fn new(today: NaiveDate) -> Self {
		Self {
			selected_date: today,
			orders: Vec::new(),
			form: OrderForm::default(),
			error: None,
			success: false,
			success_epoch: 0,
		}
	}

	/// The user selected a new date.
	pub fn date_changed(&mut self, date: NaiveDate) {
		self.selected_date = date;
		self.error = None;
	}

	/// A fetch issued for `date` completed.
	///
	/// Completions for a date that is no longer selected are discarded, so
	/// the displayed list always reflects the last-issued date. A failed
	/// fetch leaves the current list in place and raises the error banner.
	pub fn fetch_resolved(&mut self, date: NaiveDate, result: Result<Vec<Order>, ClientError>) {
		if date != self.selected_date {
			tracing::debug!(%date, selected = %self.selected_date, "Discarding stale fetch result");
			return;
		}

		match result {
			Ok(orders) => self.orders = orders,
			Err(e) => {
				tracing::warn!("Fetch failed: {}", e);
				self.error = Some(COULD_NOT_LOAD_ORDERS.to_string());
			}
		}
	}

	/// The user submitted the form; clear the banners before the request.
	pub fn submit_started(&mut self) {
		self.error = None;
		self.success = false;
	}

	/// The create request succeeded.
	///
	/// Clears the form and raises the success banner. Returns the banner
	/// epoch to hand to the delayed [`PageState::success_expired`] call.
	pub fn submit_succeeded(&mut self) -> u64 {
		self.form = OrderForm::default();
		self.success = true;
		self.success_epoch += 1;
		self.success_epoch
	}

	/// The create request failed; the form is kept so the user can retry.
	pub fn submit_failed(&mut self) {
		self.error = Some(COULD_NOT_CREATE_ORDER.to_string());
	}

	/// The banner timer scheduled at `epoch` fired.
	///
	/// A later submission bumps the epoch, which supersedes any timer still
	/// pending from an earlier one.
	pub fn success_expired(&mut self, epoch: u64) {
		if epoch == self.success_epoch {
			self.success = false;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

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

	#[test]
	fn fetch_for_selected_date_replaces_orders() {
		let mut state = PageState::new(date(10));

		state.fetch_resolved(date(10), Ok(vec![order("101", 10)]));

		assert_eq!(state.orders.len(), 1);
		assert!(state.error.is_none());
	}

	#[test]
	fn stale_fetch_is_discarded() {
		let mut state = PageState::new(date(10));
		state.date_changed(date(11));
		state.fetch_resolved(date(11), Ok(vec![order("201", 11)]));

		// A fetch issued for the previously selected date resolves late.
		state.fetch_resolved(date(10), Ok(vec![order("101", 10)]));

		assert_eq!(state.orders.len(), 1);
		assert_eq!(state.orders[0].order_number, "201");
	}

	#[test]
	fn failed_fetch_keeps_orders_and_sets_error() {
		let mut state = PageState::new(date(10));
		state.fetch_resolved(date(10), Ok(vec![order("101", 10)]));

		state.fetch_resolved(
			date(10),
			Err(ClientError::Network("connection refused".to_string())),
		);

		assert_eq!(state.orders.len(), 1);
		assert_eq!(state.error.as_deref(), Some(COULD_NOT_LOAD_ORDERS));
	}

	#[test]
	fn date_change_clears_error() {
		let mut state = PageState::new(date(10));
		state.submit_failed();
		assert!(state.error.is_some());

		state.date_changed(date(11));
		assert!(state.error.is_none());
	}

	#[test]
	fn submit_success_clears_form_and_raises_banner() {
		let mut state = PageState::new(date(10));
		state.form.order_number = "5001".to_string();
		state.form.products_shipped = "2x Widget".to_string();

		let epoch = state.submit_succeeded();

		assert_eq!(state.form, OrderForm::default());
		assert!(state.success);
		assert_eq!(epoch, 1);
	}

	#[test]
	fn submit_failure_keeps_form() {
		let mut state = PageState::new(date(10));
		state.form.order_number = "5001".to_string();

		state.submit_failed();

		assert_eq!(state.form.order_number, "5001");
		assert_eq!(state.error.as_deref(), Some(COULD_NOT_CREATE_ORDER));
	}

	#[test]
	fn stale_banner_timer_is_superseded_by_later_submit() {
		let mut state = PageState::new(date(10));

		let first = state.submit_succeeded();
		let second = state.submit_succeeded();

		state.success_expired(first);
		assert!(state.success, "stale timer must not clear a later banner");

		state.success_expired(second);
		assert!(!state.success);
	}

	#[test]
	fn form_request_maps_empty_optionals_to_none() {
		let form = OrderForm {
			order_number: "5001".to_string(),
			customer_name: String::new(),
			products_shipped: "2x Widget".to_string(),
			notes: "fragile".to_string(),
		};

		let request = form.to_request(date(10));

		assert_eq!(request.order_number, "5001");
		assert!(request.customer_name.is_none());
		assert_eq!(request.notes.as_deref(), Some("fragile"));
		assert_eq!(request.order_date, Some(date(10)));
	}
}
