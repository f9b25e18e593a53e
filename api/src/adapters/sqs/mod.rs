//! AWS SQS adapter
//!
//! Publishes loan events to SQS queues.

pub mod publisher;

pub use publisher::SqsLoanPublisher;
