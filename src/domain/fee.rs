use crate::error::PayFeesError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Describes which fee-schedule entry to look up.
///
/// Two descriptors refer to the same fee when their `entity_type` and
/// `filing_type_code` match; the optional flags only shape the remote query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingData {
    pub entity_type: String,
    pub filing_type_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future_effective: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waive_fees: Option<bool>,
}

impl FilingData {
    pub fn new(entity_type: impl Into<String>, filing_type_code: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            filing_type_code: filing_type_code.into(),
            future_effective: None,
            priority: None,
            waive_fees: None,
        }
    }

    /// Returns true if `other` points at the same fee-schedule entry.
    pub fn same_fee(&self, other: &FilingData) -> bool {
        self.entity_type == other.entity_type && self.filing_type_code == other.filing_type_code
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    #[serde(default)]
    pub gst: Decimal,
    #[serde(default)]
    pub pst: Decimal,
}

/// A fee-schedule record as returned by the pricing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeInfo {
    pub filing_fees: Decimal,
    pub filing_type: String,
    pub filing_type_code: String,
    #[serde(default)]
    pub future_effective_fees: Decimal,
    #[serde(default)]
    pub priority_fees: Decimal,
    #[serde(default)]
    pub processing_fees: Decimal,
    #[serde(default)]
    pub service_fees: Decimal,
    #[serde(default)]
    pub tax: Tax,
    pub total: Decimal,
}

/// A resolved fee-schedule lookup kept for the lifetime of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeInfoCacheEntry {
    pub filing_data: FilingData,
    pub fee_info: FeeInfo,
}

/// A fee item as handed to the ledger by callers.
///
/// Amounts and the filing type code may be missing; the ledger rejects
/// such items instead of guessing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeItem {
    pub filing_type: String,
    pub filing_type_code: Option<String>,
    pub total: Option<Decimal>,
    pub filing_fees: Option<Decimal>,
}

impl From<FeeInfo> for FeeItem {
    fn from(info: FeeInfo) -> Self {
        Self {
            filing_type: info.filing_type,
            filing_type_code: Some(info.filing_type_code),
            total: Some(info.total),
            filing_fees: Some(info.filing_fees),
        }
    }
}

/// A validated line item held by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeLineItem {
    pub filing_type: String,
    pub filing_type_code: String,
    pub total: Decimal,
    pub filing_fees: Decimal,
    pub quantity: u32,
    pub ui_id: Uuid,
}

impl FeeLineItem {
    /// Builds a fresh line item with quantity 1 and a new ui id.
    pub fn new(item: &FeeItem) -> Result<Self, PayFeesError> {
        let (Some(filing_type_code), Some(total), Some(filing_fees)) =
            (&item.filing_type_code, item.total, item.filing_fees)
        else {
            return Err(PayFeesError::InvalidFeeItem(format!(
                "{} is missing total, filingFees or filingTypeCode",
                item.filing_type
            )));
        };

        Ok(Self {
            filing_type: item.filing_type.clone(),
            filing_type_code: filing_type_code.clone(),
            total,
            filing_fees,
            quantity: 1,
            ui_id: Uuid::new_v4(),
        })
    }

    pub fn matches(&self, item: &FeeItem) -> bool {
        self.filing_type == item.filing_type
            && item.filing_type_code.as_deref() == Some(self.filing_type_code.as_str())
    }

    /// Total charged for this line, i.e. `total * quantity`.
    pub fn line_total(&self) -> Decimal {
        self.total * Decimal::from(self.quantity)
    }
}
