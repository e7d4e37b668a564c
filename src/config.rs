// ⚙️ Ledger Configuration - Economics as Data
// Tier multipliers, redemption rate and the expiry month length

use crate::entities::Tier;
use crate::error::LedgerError;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Points per currency unit for STANDARD customers
    pub standard_multiplier: Decimal,

    /// Points per currency unit for PREMIUM customers
    pub premium_multiplier: Decimal,

    /// Points per currency unit for VIP customers
    pub vip_multiplier: Decimal,

    /// Currency units granted per redeemed point (0.05 = 20 points per unit)
    pub redemption_rate: Decimal,

    /// Length of a "month" when measuring inactivity
    pub days_per_month: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            standard_multiplier: dec!(1),
            premium_multiplier: dec!(1.5),
            vip_multiplier: dec!(2),
            redemption_rate: dec!(0.05),
            days_per_month: 30,
        }
    }
}

impl LedgerConfig {
    /// Load config from JSON file; absent fields keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: LedgerConfig =
            serde_json::from_str(&content).context("Failed to parse ledger config JSON")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        for tier in [Tier::Standard, Tier::Premium, Tier::Vip] {
            if self.multiplier(tier) < Decimal::ZERO {
                return Err(LedgerError::Config(format!(
                    "{} multiplier must not be negative",
                    tier
                )));
            }
        }

        if self.redemption_rate < Decimal::ZERO {
            return Err(LedgerError::Config(
                "redemption_rate must not be negative".to_string(),
            ));
        }

        if self.days_per_month == 0 {
            return Err(LedgerError::Config(
                "days_per_month must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Accrual multiplier for a tier
    pub fn multiplier(&self, tier: Tier) -> Decimal {
        match tier {
            Tier::Standard => self.standard_multiplier,
            Tier::Premium => self.premium_multiplier,
            Tier::Vip => self.vip_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_economics() {
        let config = LedgerConfig::default();

        assert_eq!(config.multiplier(Tier::Standard), dec!(1));
        assert_eq!(config.multiplier(Tier::Premium), dec!(1.5));
        assert_eq!(config.multiplier(Tier::Vip), dec!(2));
        assert_eq!(config.redemption_rate, dec!(0.05));
        assert_eq!(config.days_per_month, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "vip_multiplier": 3, "redemption_rate": "0.10" }}"#).unwrap();

        let config = LedgerConfig::from_file(file.path()).unwrap();

        assert_eq!(config.vip_multiplier, dec!(3));
        assert_eq!(config.redemption_rate, dec!(0.10));
        // Untouched fields keep defaults
        assert_eq!(config.premium_multiplier, dec!(1.5));
        assert_eq!(config.days_per_month, 30);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "days_per_month": 0 }}"#).unwrap();

        let result = LedgerConfig::from_file(file.path());
        assert!(result.is_err());
        assert!(format!("{:#}", result.unwrap_err()).contains("days_per_month"));
    }

    #[test]
    fn test_validate_negative_multiplier() {
        let config = LedgerConfig {
            premium_multiplier: dec!(-1),
            ..LedgerConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(LedgerError::Config(
                "PREMIUM multiplier must not be negative".to_string()
            ))
        );
    }

    #[test]
    fn test_missing_file() {
        let result = LedgerConfig::from_file("/nonexistent/ledger.json");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
