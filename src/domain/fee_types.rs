use super::fee::FilingData;
use std::collections::HashMap;

/// Maps short fee codes used by the UI to fee-schedule descriptors.
#[derive(Debug, Clone)]
pub struct FeeTypeTable {
    entries: HashMap<String, FilingData>,
}

impl FeeTypeTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Annual report filings for each corporation type the registry files for.
    pub fn annual_reports() -> Self {
        let mut table = Self::new();
        for (code, entity_type) in [
            ("BCANN", "BC"),
            ("BENANN", "BEN"),
            ("CCANN", "CC"),
            ("ULCANN", "ULC"),
        ] {
            table.insert(code, FilingData::new(entity_type, code));
        }
        table
    }

    pub fn insert(&mut self, fee_code: impl Into<String>, filing_data: FilingData) {
        self.entries.insert(fee_code.into(), filing_data);
    }

    /// Overrides entries with those from `other`.
    pub fn extend(&mut self, other: impl IntoIterator<Item = (String, FilingData)>) {
        self.entries.extend(other);
    }

    pub fn get(&self, fee_code: &str) -> Option<&FilingData> {
        self.entries.get(fee_code)
    }
}

impl Default for FeeTypeTable {
    fn default() -> Self {
        Self::annual_reports()
    }
}
