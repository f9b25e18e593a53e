//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod publisher;
pub mod repositories;
pub mod users;

pub use publisher::{LoanPublisher, LoanStatusEvent};
pub use repositories::{LoanRepository, LoanStatusRepository, LoanTypeRepository};
pub use users::{UserClient, UserProfile};
