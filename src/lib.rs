// Loyalty Ledger - Core Library
// Exposes all modules for use in the CLI and tests

pub mod config;
pub mod entities;
pub mod error;
pub mod import;
pub mod ledger;
pub mod logging;
pub mod money;

// Re-export commonly used types
pub use config::LedgerConfig;
pub use entities::{Customer, Tier};
pub use error::{LedgerError, Result};
pub use import::{load_purchases, ImportSummary, PurchaseRecord};
pub use ledger::LoyaltyLedger;
pub use money::{round_points, POINTS_SCALE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
