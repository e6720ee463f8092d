use super::alert::Alert;
use super::fee::{FeeInfo, FilingData};
use super::payment::PaymentAccountSnapshot;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Resolves fee-schedule entries. `Ok(None)` means the schedule has no such fee.
#[async_trait]
pub trait FeeScheduleResolver: Send + Sync {
    async fn fetch_fee(&self, filing_data: &FilingData) -> Result<Option<FeeInfo>>;
}

#[async_trait]
pub trait PaymentAccountResolver: Send + Sync {
    async fn fetch_payment_account(&self, account_id: u64) -> Result<PaymentAccountSnapshot>;
}

/// Process-wide alert surface. Delivery is fire-and-forget.
pub trait AlertSink: Send + Sync {
    fn add_alert(&self, alert: Alert);
}

pub type FeeScheduleResolverRef = Arc<dyn FeeScheduleResolver>;
pub type PaymentAccountResolverRef = Arc<dyn PaymentAccountResolver>;
pub type AlertSinkRef = Arc<dyn AlertSink>;
