//! User service adapter
//!
//! REST client for the external user service, guarded by a circuit breaker.

pub mod circuit_breaker;
pub mod client;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
pub use client::RestUserClient;
