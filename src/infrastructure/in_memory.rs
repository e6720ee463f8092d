use crate::domain::alert::{Alert, AlertCategory};
use crate::domain::fee::{FeeInfo, FilingData};
use crate::domain::payment::PaymentAccountSnapshot;
use crate::domain::ports::{AlertSink, FeeScheduleResolver, PaymentAccountResolver};
use crate::error::{PayFeesError, Result};
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type FeeKey = (String, String);

/// A fee schedule held in memory, keyed by `(entity_type, filing_type_code)`.
///
/// Counts every lookup so callers can check how often the schedule was hit.
/// Clones share the same schedule.
#[derive(Default, Clone)]
pub struct InMemoryFeeSchedule {
    fees: Arc<DashMap<FeeKey, FeeInfo>>,
    failing: Arc<DashSet<FeeKey>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryFeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from `(entity_type, fee)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, FeeInfo)>) -> Self {
        let schedule = Self::new();
        for (entity_type, fee) in entries {
            schedule.insert(entity_type, fee);
        }
        schedule
    }

    pub fn insert(&self, entity_type: impl Into<String>, fee: FeeInfo) {
        self.fees
            .insert((entity_type.into(), fee.filing_type_code.clone()), fee);
    }

    /// Makes lookups for this fee fail as if the remote service were down.
    pub fn fail_on(&self, entity_type: impl Into<String>, filing_type_code: impl Into<String>) {
        self.failing
            .insert((entity_type.into(), filing_type_code.into()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeeScheduleResolver for InMemoryFeeSchedule {
    async fn fetch_fee(&self, filing_data: &FilingData) -> Result<Option<FeeInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (
            filing_data.entity_type.clone(),
            filing_data.filing_type_code.clone(),
        );
        if self.failing.contains(&key) {
            return Err(PayFeesError::Io(std::io::Error::other(
                "fee schedule unavailable",
            )));
        }
        Ok(self.fees.get(&key).map(|fee| fee.value().clone()))
    }
}

/// Payment account snapshots held in memory, keyed by account id.
#[derive(Default, Clone)]
pub struct InMemoryPaymentAccounts {
    accounts: Arc<DashMap<u64, PaymentAccountSnapshot>>,
}

impl InMemoryPaymentAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account_id: u64, snapshot: PaymentAccountSnapshot) {
        self.accounts.insert(account_id, snapshot);
    }
}

#[async_trait]
impl PaymentAccountResolver for InMemoryPaymentAccounts {
    async fn fetch_payment_account(&self, account_id: u64) -> Result<PaymentAccountSnapshot> {
        self.accounts
            .get(&account_id)
            .map(|snapshot| snapshot.value().clone())
            .ok_or(PayFeesError::PaymentAccountNotFound(account_id))
    }
}

/// Keeps every alert it receives, in order.
#[derive(Default, Clone)]
pub struct RecordingAlertSink {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, category: AlertCategory) -> usize {
        self.alerts()
            .iter()
            .filter(|alert| alert.category == category)
            .count()
    }
}

impl AlertSink for RecordingAlertSink {
    fn add_alert(&self, alert: Alert) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);
    }
}
