//! API implementations for the shiplog service.

pub mod orders;
