//! Implementations of the domain ports.

pub mod in_memory;
pub mod pay_api;
pub mod tracing_alerts;
