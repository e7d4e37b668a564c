// 📥 Purchase Import - CSV batches of purchases
//
// Expected headers: name,tier,amount,bonus
// `bonus` is a fraction (0.1 = +10%) and may be left empty or omitted.

use crate::entities::Tier;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub name: String,
    pub tier: Tier,
    pub amount: Decimal,
    #[serde(default)]
    pub bonus: Option<Decimal>,
}

/// Outcome of applying a batch to a ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Names seen for the first time
    pub registered: usize,
    pub purchases_recorded: usize,
    /// Rows with a non-positive amount, a negative bonus, or an accrual too large to hold
    pub skipped: usize,
    pub points_accrued: Decimal,
}

pub fn load_purchases(csv_path: &Path) -> Result<Vec<PurchaseRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open purchases CSV: {:?}", csv_path))?;

    let mut records = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        // Header is line 1
        let record: PurchaseRecord = result
            .with_context(|| format!("Failed to deserialize purchase on line {}", index + 2))?;
        records.push(record);
    }

    Ok(records)
}
