//! Domain types and the pure state machines behind the pay-fees store.
//!
//! Nothing in here performs I/O; remote collaborators are described by the
//! traits in [`ports`].

pub mod alert;
pub mod fee;
pub mod fee_types;
pub mod ledger;
pub mod payment;
pub mod ports;
