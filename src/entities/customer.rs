// 👤 Customer Entity - Name is identity, balance is value
//
// A Customer value held by a caller is a HANDLE. The ledger keeps its own
// copy per name and that copy is authoritative when the two disagree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Base accrual rate
    #[serde(alias = "PADRAO")]
    Standard,

    /// 1.5x accrual
    Premium,

    /// 2x accrual
    Vip,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "STANDARD",
            Tier::Premium => "PREMIUM",
            Tier::Vip => "VIP",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STANDARD" | "PADRAO" => Ok(Tier::Standard),
            "PREMIUM" => Ok(Tier::Premium),
            "VIP" => Ok(Tier::Vip),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

// ============================================================================
// CUSTOMER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique key in the ledger
    pub name: String,

    pub tier: Tier,

    /// Never negative, kept at 2 decimal places
    pub points: Decimal,

    /// Set on registration and on every accrual
    pub last_updated: DateTime<Utc>,
}

impl Customer {
    /// Create a handle with a zero balance (not registered anywhere)
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Customer::with_points(name, tier, Decimal::ZERO)
    }

    pub fn with_points(name: impl Into<String>, tier: Tier, points: Decimal) -> Self {
        Customer {
            name: name.into(),
            tier,
            points,
            last_updated: Utc::now(),
        }
    }

    /// Stamp the record as updated now
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new("Ana", Tier::Standard);

        assert_eq!(customer.name, "Ana");
        assert_eq!(customer.tier, Tier::Standard);
        assert_eq!(customer.points, Decimal::ZERO);
        assert!(customer.last_updated <= Utc::now());
    }

    #[test]
    fn test_customer_with_points() {
        let customer = Customer::with_points("Bia", Tier::Vip, dec!(50));
        assert_eq!(customer.points, dec!(50));
    }

    #[test]
    fn test_touch_moves_timestamp_forward() {
        let mut customer = Customer::new("Caio", Tier::Premium);
        let before = customer.last_updated;

        std::thread::sleep(std::time::Duration::from_millis(5));
        customer.touch();

        assert!(customer.last_updated > before);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("standard".parse::<Tier>(), Ok(Tier::Standard));
        assert_eq!("PADRAO".parse::<Tier>(), Ok(Tier::Standard));
        assert_eq!(" Premium ".parse::<Tier>(), Ok(Tier::Premium));
        assert_eq!("vip".parse::<Tier>(), Ok(Tier::Vip));
        assert!("GOLD".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_display_and_serde() {
        assert_eq!(Tier::Vip.to_string(), "VIP");
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"PREMIUM\"");

        let legacy: Tier = serde_json::from_str("\"PADRAO\"").unwrap();
        assert_eq!(legacy, Tier::Standard);
    }
}
