#![allow(dead_code)]

use pay_fees::application::pay_fees::PayFeesStore;
use pay_fees::domain::fee::FeeInfo;
use pay_fees::domain::payment::{CfsAccount, PaymentAccountSnapshot, PaymentMethod, PaymentStatus};
use pay_fees::infrastructure::in_memory::{
    InMemoryFeeSchedule, InMemoryPaymentAccounts, RecordingAlertSink,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const ACCOUNT_ID: u64 = 2617;

pub fn annual_report(code: &str, total: Decimal) -> FeeInfo {
    FeeInfo {
        filing_fees: total,
        filing_type: "Annual Report".to_string(),
        filing_type_code: code.to_string(),
        future_effective_fees: Decimal::ZERO,
        priority_fees: Decimal::ZERO,
        processing_fees: Decimal::ZERO,
        service_fees: Decimal::ZERO,
        tax: Default::default(),
        total,
    }
}

pub fn pad_account(status: PaymentStatus) -> PaymentAccountSnapshot {
    PaymentAccountSnapshot {
        account_id: Some(ACCOUNT_ID),
        payment_method: Some(PaymentMethod::Pad),
        cfs_account: Some(CfsAccount {
            status: Some(status),
            ..Default::default()
        }),
    }
}

pub struct Fixture {
    pub store: PayFeesStore,
    pub schedule: InMemoryFeeSchedule,
    pub accounts: InMemoryPaymentAccounts,
    pub alerts: RecordingAlertSink,
}

/// A store for account 2617 whose schedule knows the BC and BEN annual reports.
pub fn fixture() -> Fixture {
    let schedule = InMemoryFeeSchedule::new();
    schedule.insert("BC", annual_report("BCANN", dec!(43.39)));
    schedule.insert("BEN", annual_report("BENANN", dec!(44.89)));
    let accounts = InMemoryPaymentAccounts::new();
    let alerts = RecordingAlertSink::new();

    let store = PayFeesStore::new(
        Arc::new(schedule.clone()),
        Arc::new(accounts.clone()),
        Arc::new(alerts.clone()),
    )
    .with_account_id(ACCOUNT_ID);

    Fixture {
        store,
        schedule,
        accounts,
        alerts,
    }
}

pub fn actions_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "action, fee_code").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}
