use super::fee::{FeeInfo, FeeInfoCacheEntry, FeeItem, FeeLineItem, FilingData};
use crate::error::PayFeesError;
use rust_decimal::Decimal;

/// The fees selected during the current session plus the fee-schedule
/// lookups resolved so far.
///
/// Invariants: no two line items share `(filing_type, filing_type_code)` and
/// every line item has `quantity >= 1`.
#[derive(Debug, Clone, Default)]
pub struct FeeLedger {
    fees: Vec<FeeLineItem>,
    folio_number: Option<String>,
    fee_info: Vec<FeeInfoCacheEntry>,
    generation: u64,
}

impl FeeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fees(&self) -> &[FeeLineItem] {
        &self.fees
    }

    pub fn folio_number(&self) -> Option<&str> {
        self.folio_number.as_deref()
    }

    pub fn fee_info(&self) -> &[FeeInfoCacheEntry] {
        &self.fee_info
    }

    /// Bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Adds one unit of `item`, inserting a new line item on first use.
    pub fn add_fee(&mut self, item: &FeeItem) -> Result<&FeeLineItem, PayFeesError> {
        let line = FeeLineItem::new(item)?;

        if let Some(index) = self.position(item) {
            self.fees[index].quantity += 1;
            return Ok(&self.fees[index]);
        }

        self.fees.push(line);
        Ok(&self.fees[self.fees.len() - 1])
    }

    /// Removes one unit of `item`; returns false if it was not in the ledger.
    pub fn remove_fee(&mut self, item: &FeeItem) -> bool {
        let Some(index) = self.position(item) else {
            return false;
        };

        if self.fees[index].quantity > 1 {
            self.fees[index].quantity -= 1;
        } else {
            self.fees.remove(index);
        }
        true
    }

    pub fn set_folio_number(&mut self, folio_number: Option<String>) {
        self.folio_number = folio_number;
    }

    pub fn cached_fee_info(&self, filing_data: &FilingData) -> Option<&FeeInfo> {
        self.fee_info
            .iter()
            .find(|entry| entry.filing_data.same_fee(filing_data))
            .map(|entry| &entry.fee_info)
    }

    /// Caches a lookup result. Returns false if the key was already cached.
    pub fn cache_fee_info(&mut self, filing_data: FilingData, fee_info: FeeInfo) -> bool {
        if self.cached_fee_info(&filing_data).is_some() {
            return false;
        }
        self.fee_info.push(FeeInfoCacheEntry {
            filing_data,
            fee_info,
        });
        true
    }

    /// Sum of `total * quantity` over all line items.
    pub fn fees_total(&self) -> Decimal {
        self.fees.iter().map(FeeLineItem::line_total).sum()
    }

    pub fn fee_count(&self) -> u32 {
        self.fees.iter().map(|fee| fee.quantity).sum()
    }

    pub fn reset(&mut self) {
        self.fees.clear();
        self.folio_number = None;
        self.fee_info.clear();
        self.generation += 1;
    }

    fn position(&self, item: &FeeItem) -> Option<usize> {
        self.fees.iter().position(|fee| fee.matches(item))
    }
}
