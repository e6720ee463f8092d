//! Adapters between the store and the outside world.

pub mod csv;
