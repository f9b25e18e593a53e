//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing loans and their reference data
//! - `ports`: Trait definitions for repositories, the user service and the queue

pub mod entities;
pub mod ports;
