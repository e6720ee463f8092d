use async_trait::async_trait;
use pay_fees::application::pay_fees::PayFeesStore;
use pay_fees::domain::alert::AlertCategory;
use pay_fees::domain::fee::{FeeInfo, FeeItem, FilingData};
use pay_fees::domain::payment::{PaymentAccountSnapshot, PaymentMethod, PaymentStatus};
use pay_fees::domain::ports::{FeeScheduleResolver, PaymentAccountResolver};
use pay_fees::error::Result;
use pay_fees::infrastructure::in_memory::{InMemoryPaymentAccounts, RecordingAlertSink};
use rust_decimal_macros::dec;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tracing_subscriber::fmt::MakeWriter;

mod common;

fn bcann_item() -> FeeItem {
    FeeItem {
        filing_type: "ANNUAL_REPORT".to_string(),
        filing_type_code: Some("BCANN".to_string()),
        total: Some(dec!(20)),
        filing_fees: Some(dec!(20)),
    }
}

#[tokio::test]
async fn test_add_twice_then_remove_twice() {
    let fx = common::fixture();

    fx.store.add_fee(&bcann_item()).await;
    fx.store.add_fee(&bcann_item()).await;
    let fees = fx.store.fees().await;
    assert_eq!(fees.len(), 1);
    assert_eq!(fees[0].quantity, 2);

    fx.store.remove_fee(&bcann_item()).await;
    assert_eq!(fx.store.fees().await[0].quantity, 1);

    fx.store.remove_fee(&bcann_item()).await;
    assert!(fx.store.fees().await.is_empty());
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_add_fee_without_total_is_ignored() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let fx = common::fixture();
    let item = FeeItem {
        total: None,
        ..bcann_item()
    };

    fx.store.add_fee(&item).await;

    assert!(fx.store.fees().await.is_empty());
    assert!(fx.alerts.alerts().is_empty());
    let output = logs.contents();
    assert!(output.contains("WARN"));
    assert!(
        output.contains("ANNUAL_REPORT is missing total, filingFees or filingTypeCode")
    );
}

#[tokio::test]
async fn test_add_then_remove_restores_ledger() {
    let fx = common::fixture();
    fx.store.add_pay_fees("BENANN").await;
    let before = fx.store.fees().await;

    fx.store.add_fee(&bcann_item()).await;
    fx.store.remove_fee(&bcann_item()).await;

    assert_eq!(fx.store.fees().await, before);
}

#[tokio::test]
async fn test_get_fee_info_is_memoized() {
    let fx = common::fixture();
    let filing = FilingData::new("BC", "BCANN");

    for _ in 0..5 {
        let fee = fx.store.get_fee_info(&filing, true).await.unwrap();
        assert_eq!(fee.total, dec!(43.39));
    }
    assert_eq!(fx.schedule.calls(), 1);
}

#[tokio::test]
async fn test_missing_fee_is_retried_once_per_call() {
    let fx = common::fixture();
    let filing = FilingData::new("CC", "CCANN");

    assert!(fx.store.get_fee_info(&filing, true).await.is_none());
    assert_eq!(fx.schedule.calls(), 1);
}

#[tokio::test]
async fn test_pending_pad_selection_reverts_with_one_alert() {
    let fx = common::fixture();
    fx.accounts.insert(
        common::ACCOUNT_ID,
        common::pad_account(PaymentStatus::PendingPadActivation),
    );
    fx.store.init_payment_method().await;

    fx.store
        .set_user_selected_payment_method(PaymentMethod::Pad)
        .await;

    assert_eq!(
        fx.store.user_selected_payment_method().await,
        PaymentMethod::DirectPay
    );
    assert_eq!(fx.alerts.count(AlertCategory::PaymentMethod), 1);
}

#[tokio::test]
async fn test_init_payment_method_failure() {
    let fx = common::fixture();

    fx.store.init_payment_method().await;

    assert!(!fx.store.allow_alternate_payment_method().await);
    assert_eq!(fx.alerts.count(AlertCategory::PaymentMethod), 1);
}

/// Fee schedule that holds every lookup until released.
struct GatedFeeSchedule {
    fee: FeeInfo,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl FeeScheduleResolver for GatedFeeSchedule {
    async fn fetch_fee(&self, _filing_data: &FilingData) -> Result<Option<FeeInfo>> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(Some(self.fee.clone()))
    }
}

#[tokio::test]
async fn test_reset_discards_in_flight_lookup() {
    let schedule = Arc::new(GatedFeeSchedule {
        fee: common::annual_report("BCANN", dec!(43.39)),
        entered: Notify::new(),
        release: Notify::new(),
    });
    let store = PayFeesStore::new(
        schedule.clone(),
        Arc::new(InMemoryPaymentAccounts::new()),
        Arc::new(RecordingAlertSink::new()),
    );

    let loading = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .load_fee_types_and_charges(
                    Some("F-1".to_string()),
                    vec![FilingData::new("BC", "BCANN")],
                )
                .await
        }
    });

    schedule.entered.notified().await;
    store.reset().await;
    schedule.release.notify_one();
    loading.await.unwrap();

    assert!(store.fee_info().await.is_empty());
    assert!(store.folio_number().await.is_none());
}

/// Fee schedule that always fails and holds its first lookup until released.
struct GatedFailingFeeSchedule {
    calls: AtomicUsize,
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl FeeScheduleResolver for GatedFailingFeeSchedule {
    async fn fetch_fee(&self, _filing_data: &FilingData) -> Result<Option<FeeInfo>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Err(io::Error::other("fee schedule unavailable").into())
    }
}

#[tokio::test]
async fn test_reset_abandons_batch_after_failed_lookup() {
    let schedule = Arc::new(GatedFailingFeeSchedule {
        calls: AtomicUsize::new(0),
        entered: Notify::new(),
        release: Notify::new(),
    });
    let store = PayFeesStore::new(
        schedule.clone(),
        Arc::new(InMemoryPaymentAccounts::new()),
        Arc::new(RecordingAlertSink::new()),
    );

    let loading = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .load_fee_types_and_charges(
                    Some("F-1".to_string()),
                    vec![
                        FilingData::new("BC", "BCANN"),
                        FilingData::new("BEN", "BENANN"),
                        FilingData::new("CC", "CCANN"),
                        FilingData::new("ULC", "ULCANN"),
                    ],
                )
                .await
        }
    });

    schedule.entered.notified().await;
    store.reset().await;
    schedule.release.notify_one();
    loading.await.unwrap();

    assert_eq!(schedule.calls.load(Ordering::SeqCst), 1);
    assert!(store.fee_info().await.is_empty());
    assert!(store.folio_number().await.is_none());
}

/// Payment account resolver that holds every lookup until released.
struct GatedPaymentAccounts {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl PaymentAccountResolver for GatedPaymentAccounts {
    async fn fetch_payment_account(&self, _account_id: u64) -> Result<PaymentAccountSnapshot> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(common::pad_account(PaymentStatus::Active))
    }
}

#[tokio::test]
async fn test_reset_payment_options_discards_in_flight_init() {
    let accounts = Arc::new(GatedPaymentAccounts {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let alerts = RecordingAlertSink::new();
    let store = PayFeesStore::new(
        Arc::new(common::fixture().schedule),
        accounts.clone(),
        Arc::new(alerts.clone()),
    )
    .with_account_id(common::ACCOUNT_ID);

    let init = tokio::spawn({
        let store = store.clone();
        async move { store.init_payment_method().await }
    });

    accounts.entered.notified().await;
    store.reset_payment_options().await;
    accounts.release.notify_one();
    init.await.unwrap();

    assert!(store.user_payment_account().await.is_none());
    assert!(!store.allow_alternate_payment_method().await);
    assert!(alerts.alerts().is_empty());
}
