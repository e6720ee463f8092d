use crate::domain::fee::FeeLineItem;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct FeeRow<'a> {
    filing_type: &'a str,
    filing_type_code: &'a str,
    quantity: u32,
    filing_fees: Decimal,
    total: Decimal,
    line_total: Decimal,
}

/// Writes the fee ledger as CSV, one row per line item followed by a `TOTAL` row.
pub struct FeeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> FeeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_fees(&mut self, fees: &[FeeLineItem]) -> Result<()> {
        if fees.is_empty() {
            self.writer.write_record([
                "filing_type",
                "filing_type_code",
                "quantity",
                "filing_fees",
                "total",
                "line_total",
            ])?;
        }
        for fee in fees {
            self.writer.serialize(FeeRow {
                filing_type: &fee.filing_type,
                filing_type_code: &fee.filing_type_code,
                quantity: fee.quantity,
                filing_fees: fee.filing_fees,
                total: fee.total,
                line_total: fee.line_total(),
            })?;
        }

        let count: u32 = fees.iter().map(|fee| fee.quantity).sum();
        let total: Decimal = fees.iter().map(FeeLineItem::line_total).sum();
        self.writer.write_record([
            "TOTAL".to_string(),
            String::new(),
            count.to_string(),
            String::new(),
            String::new(),
            total.to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}
