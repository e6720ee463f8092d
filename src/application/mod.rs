//! Application layer orchestrating the pay-fees store.
//!
//! [`pay_fees::PayFeesStore`] owns the fee ledger and payment options of a
//! session and drives the remote collaborators behind the domain ports.

pub mod pay_fees;
mod payment_method;
