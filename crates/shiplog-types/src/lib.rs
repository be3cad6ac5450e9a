//! Common types module for the shiplog order-tracking system.
//!
//! This module defines the core data types and structures shared by the
//! storage, service, and client crates. It provides a centralized location
//! for shared types to ensure consistency across all components.

/// API types for HTTP endpoints and request/response structures.
pub mod api;
/// Order domain types.
pub mod order;
/// Configuration validation types for ensuring type-safe configurations.
pub mod validation;

pub use api::*;
pub use order::*;
pub use validation::*;
