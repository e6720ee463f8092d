//! Optional JSON configuration for the `pay-fees` binary.
//!
//! Every field may be omitted. Command-line flags and their environment
//! variables take precedence over values read from the file.
//!
//! ```json
//! {
//!   "payApiUrl": "https://pay.example/api/v1/",
//!   "accountId": 2617,
//!   "feeTypes": { "BCANN": { "entityType": "BC", "filingTypeCode": "BCANN" } },
//!   "fees": [{ "entityType": "BC", "filingType": "Annual Report",
//!              "filingTypeCode": "BCANN", "filingFees": 43.39, "total": 43.39 }],
//!   "paymentAccounts": { "2617": { "paymentMethod": "PAD",
//!                                  "cfsAccount": { "status": "ACTIVE" } } }
//! }
//! ```

use crate::domain::fee::{FeeInfo, FilingData};
use crate::domain::fee_types::FeeTypeTable;
use crate::domain::payment::PaymentAccountSnapshot;
use crate::error::Result;
use crate::infrastructure::in_memory::{InMemoryFeeSchedule, InMemoryPaymentAccounts};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub pay_api_url: Option<Url>,
    #[serde(default)]
    pub account_id: Option<u64>,
    /// Added to, or overriding, the built-in fee-type table.
    #[serde(default)]
    pub fee_types: HashMap<String, FilingData>,
    /// Offline fee schedule, used when no pay-api URL is configured.
    #[serde(default)]
    pub fees: Vec<ScheduledFee>,
    /// Offline payment accounts, used when no pay-api URL is configured.
    #[serde(default)]
    pub payment_accounts: HashMap<u64, PaymentAccountSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledFee {
    pub entity_type: String,
    #[serde(flatten)]
    pub fee: FeeInfo,
}

impl Config {
    /// Reads the configuration at `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn fee_type_table(&self) -> FeeTypeTable {
        let mut table = FeeTypeTable::default();
        table.extend(self.fee_types.clone());
        table
    }

    pub fn fee_schedule(&self) -> InMemoryFeeSchedule {
        InMemoryFeeSchedule::from_entries(
            self.fees
                .iter()
                .map(|scheduled| (scheduled.entity_type.clone(), scheduled.fee.clone())),
        )
    }

    pub fn payment_account_store(&self) -> InMemoryPaymentAccounts {
        let accounts = InMemoryPaymentAccounts::new();
        for (account_id, snapshot) in &self.payment_accounts {
            accounts.insert(*account_id, snapshot.clone());
        }
        accounts
    }
}
