use crate::domain::alert::{Alert, AlertCategory};
use crate::domain::fee::{FeeInfo, FeeInfoCacheEntry, FeeItem, FeeLineItem, FilingData};
use crate::domain::fee_types::FeeTypeTable;
use crate::domain::ledger::FeeLedger;
use crate::domain::payment::PaymentOptions;
use crate::domain::ports::{AlertSinkRef, FeeScheduleResolverRef, PaymentAccountResolverRef};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The pay-fees store for one session.
///
/// Holds the fee ledger and the payment options for the current account.
/// Cloning is cheap and every clone shares the same state. Locks are only held
/// while state is read or written, never across a remote call, so a reset can
/// happen while a lookup is in flight; such a lookup is discarded on completion.
#[derive(Clone)]
pub struct PayFeesStore {
    pub(super) ledger: Arc<RwLock<FeeLedger>>,
    pub(super) payment: Arc<RwLock<PaymentOptions>>,
    pub(super) fee_types: Arc<FeeTypeTable>,
    pub(super) fee_schedule: FeeScheduleResolverRef,
    pub(super) payment_accounts: PaymentAccountResolverRef,
    pub(super) alerts: AlertSinkRef,
    pub(super) account_id: Option<u64>,
}

impl PayFeesStore {
    /// Creates a new store with the default fee-type table and no account.
    ///
    /// # Arguments
    ///
    /// * `fee_schedule` - Resolves fee-schedule entries.
    /// * `payment_accounts` - Resolves the account's payment configuration.
    /// * `alerts` - Receives user-facing alerts.
    pub fn new(
        fee_schedule: FeeScheduleResolverRef,
        payment_accounts: PaymentAccountResolverRef,
        alerts: AlertSinkRef,
    ) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(FeeLedger::new())),
            payment: Arc::new(RwLock::new(PaymentOptions::new())),
            fee_types: Arc::new(FeeTypeTable::default()),
            fee_schedule,
            payment_accounts,
            alerts,
            account_id: None,
        }
    }

    pub fn with_fee_types(mut self, fee_types: FeeTypeTable) -> Self {
        self.fee_types = Arc::new(fee_types);
        self
    }

    pub fn with_account_id(mut self, account_id: u64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn account_id(&self) -> Option<u64> {
        self.account_id
    }

    /// Adds one unit of `item` to the ledger.
    ///
    /// Items missing a total, filing fees or filing type code are logged and
    /// ignored.
    pub async fn add_fee(&self, item: &FeeItem) {
        let mut ledger = self.ledger.write().await;
        match ledger.add_fee(item) {
            Ok(line) => debug!(
                filing_type_code = %line.filing_type_code,
                quantity = line.quantity,
                "fee added"
            ),
            Err(e) => warn!(filing_type = %item.filing_type, "{e}"),
        }
    }

    /// Removes one unit of `item`. Unknown items are ignored.
    pub async fn remove_fee(&self, item: &FeeItem) {
        let removed = self.ledger.write().await.remove_fee(item);
        if !removed {
            debug!(filing_type = %item.filing_type, "fee not in ledger, nothing to remove");
        }
    }

    /// Records `folio_number` and resolves each descriptor in order, caching
    /// the ones the fee schedule knows about.
    ///
    /// A failed lookup is logged and skipped. If the ledger is reset while a
    /// lookup is in flight the rest of the batch is abandoned.
    pub async fn load_fee_types_and_charges(
        &self,
        folio_number: Option<String>,
        filing_data: Vec<FilingData>,
    ) {
        let generation = {
            let mut ledger = self.ledger.write().await;
            ledger.set_folio_number(folio_number);
            ledger.generation()
        };

        for filing in filing_data {
            let fetched = self.fee_schedule.fetch_fee(&filing).await;

            let mut ledger = self.ledger.write().await;
            if ledger.generation() != generation {
                debug!("ledger was reset during fee lookup, dropping results");
                return;
            }
            match fetched {
                Ok(Some(fee_info)) => {
                    ledger.cache_fee_info(filing, fee_info);
                }
                Ok(None) => warn!(
                    entity_type = %filing.entity_type,
                    filing_type_code = %filing.filing_type_code,
                    "fee schedule has no such fee"
                ),
                Err(e) => warn!(
                    entity_type = %filing.entity_type,
                    filing_type_code = %filing.filing_type_code,
                    "fee lookup failed: {e}"
                ),
            }
        }
    }

    /// Returns the cached fee for `filing`, loading it once if allowed.
    pub async fn get_fee_info(
        &self,
        filing: &FilingData,
        try_load_if_not_cached: bool,
    ) -> Option<FeeInfo> {
        if let Some(fee_info) = self.ledger.read().await.cached_fee_info(filing) {
            return Some(fee_info.clone());
        }
        if !try_load_if_not_cached {
            return None;
        }

        debug!(filing_type_code = %filing.filing_type_code, "fee not cached, loading");
        let folio_number = self.folio_number().await;
        self.load_fee_types_and_charges(folio_number, vec![filing.clone()])
            .await;

        self.ledger.read().await.cached_fee_info(filing).cloned()
    }

    /// Resolves `fee_code` through the fee-type table and adds the fee.
    ///
    /// Any failure leaves the ledger untouched and raises a FEE_INFO alert.
    pub async fn add_pay_fees(&self, fee_code: &str) {
        let Some(filing) = self.fee_types.get(fee_code) else {
            warn!(fee_code, "unknown fee code");
            self.alerts.add_alert(Alert::error(AlertCategory::FeeInfo));
            return;
        };

        match self.get_fee_info(filing, true).await {
            Some(fee_info) => self.add_fee(&FeeItem::from(fee_info)).await,
            None => {
                warn!(fee_code, "no fee info available");
                self.alerts.add_alert(Alert::error(AlertCategory::FeeInfo));
            }
        }
    }

    /// Removes one unit of the fee behind `fee_code`, using cached fee info only.
    pub async fn remove_pay_fees(&self, fee_code: &str) {
        let Some(filing) = self.fee_types.get(fee_code) else {
            warn!(fee_code, "unknown fee code");
            return;
        };

        match self.get_fee_info(filing, false).await {
            Some(fee_info) => self.remove_fee(&FeeItem::from(fee_info)).await,
            None => debug!(fee_code, "fee was never loaded, nothing to remove"),
        }
    }

    /// Clears fees, folio number and cached fee info in one step.
    pub async fn reset(&self) {
        self.ledger.write().await.reset();
    }

    pub async fn fees(&self) -> Vec<FeeLineItem> {
        self.ledger.read().await.fees().to_vec()
    }

    pub async fn folio_number(&self) -> Option<String> {
        self.ledger.read().await.folio_number().map(str::to_owned)
    }

    pub async fn fee_info(&self) -> Vec<FeeInfoCacheEntry> {
        self.ledger.read().await.fee_info().to_vec()
    }

    pub async fn fees_total(&self) -> Decimal {
        self.ledger.read().await.fees_total()
    }

    pub async fn fee_count(&self) -> u32 {
        self.ledger.read().await.fee_count()
    }
}
