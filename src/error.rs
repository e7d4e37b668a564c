// ❗ Ledger Errors
// Failures the ledger reports to callers. Non-positive amounts and points are
// not errors: those paths are silent no-ops.

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// Balance lookup for a name that was never registered
    #[error("customer not found: {name}")]
    NotFound { name: String },

    /// Redemption asked for more points than the authoritative balance holds
    #[error("insufficient points balance for {name}: requested {requested}, available {available}")]
    InsufficientBalance {
        name: String,
        requested: Decimal,
        available: Decimal,
    },

    /// Rejected economics configuration
    #[error("invalid ledger configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
