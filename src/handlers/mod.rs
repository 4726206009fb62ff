//! HTTP handlers. Thin adapters between axum extractors and the service
//! layer; all domain rules live in `services`.

pub mod activities;
pub mod auth;
pub mod claims;
pub mod estimator;
pub mod health;
pub mod inventory;
pub mod quotes;
pub mod stats;
pub mod trucks;
