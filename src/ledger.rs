// 🎟️ Loyalty Ledger - Point balances per customer
//
// The ledger owns one authoritative Customer record per name.
// Callers hold handles (copies) that can go stale:
//   - accrual writes the caller's handle into the registry
//   - redemption prefers the registry record and writes back to both
//   - expiry only touches the handle it was given
//   - read queries resolve balances registry-first, handle-second

use crate::config::LedgerConfig;
use crate::entities::{Customer, Tier};
use crate::error::{LedgerError, Result};
use crate::import::{ImportSummary, PurchaseRecord};
use crate::money::round_points;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub struct LoyaltyLedger {
    /// Authoritative records keyed by customer name
    customers: HashMap<String, Customer>,

    config: LedgerConfig,
}

impl LoyaltyLedger {
    /// Empty ledger with default economics
    pub fn new() -> Self {
        LoyaltyLedger {
            customers: HashMap::new(),
            config: LedgerConfig::default(),
        }
    }

    pub fn with_config(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(LoyaltyLedger {
            customers: HashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    /// Register a customer with a zero balance
    pub fn register_customer(&mut self, name: impl Into<String>, tier: Tier) -> Customer {
        self.register_customer_with_points(name, tier, Decimal::ZERO)
    }

    /// Register a customer with an opening balance.
    ///
    /// An existing record with the same name is replaced. The opening
    /// balance is rounded to cents and floored at zero.
    pub fn register_customer_with_points(
        &mut self,
        name: impl Into<String>,
        tier: Tier,
        initial_points: Decimal,
    ) -> Customer {
        let opening = round_points(initial_points).max(Decimal::ZERO);
        let customer = Customer::with_points(name, tier, opening);

        if self.customers.contains_key(&customer.name) {
            debug!("event=register customer={} replaced=true", customer.name);
        } else {
            debug!("event=register customer={} tier={}", customer.name, tier);
        }

        self.customers
            .insert(customer.name.clone(), customer.clone());
        customer
    }

    // ========================================================================
    // ACCRUAL
    // ========================================================================

    /// Points earned for a purchase amount at the customer's tier.
    ///
    /// Zero for non-positive amounts; otherwise rounded half-up to cents.
    /// Saturates at `Decimal::MAX` when the product does not fit.
    pub fn compute_points(&self, customer: &Customer, amount: Decimal) -> Decimal {
        if amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        self.checked_points(customer.tier, amount).unwrap_or_else(|| {
            warn!(
                "event=compute_points customer={} amount={} status=saturated",
                customer.name, amount
            );
            Decimal::MAX
        })
    }

    fn checked_points(&self, tier: Tier, amount: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(self.config.multiplier(tier))
            .map(round_points)
    }

    /// Record a purchase with no promotional bonus
    pub fn record_purchase(&mut self, customer: &mut Customer, amount: Decimal) {
        self.record_purchase_with_bonus(customer, amount, Decimal::ZERO);
    }

    /// Record a purchase and credit `base * (1 + bonus_fraction)` points.
    ///
    /// Accrues onto the handle's own balance, stamps it, then stores the
    /// handle as the ledger's record for that name. Non-positive amounts,
    /// negative bonus fractions and accruals that would overflow are
    /// ignored and leave both the handle and the registry untouched.
    pub fn record_purchase_with_bonus(
        &mut self,
        customer: &mut Customer,
        amount: Decimal,
        bonus_fraction: Decimal,
    ) {
        self.accrue(customer, amount, bonus_fraction);
    }

    /// Points credited, or `None` when the purchase was not applied
    fn accrue(
        &mut self,
        customer: &mut Customer,
        amount: Decimal,
        bonus_fraction: Decimal,
    ) -> Option<Decimal> {
        if amount <= Decimal::ZERO {
            return None;
        }

        if bonus_fraction < Decimal::ZERO {
            warn!(
                "event=accrue customer={} status=rejected bonus_fraction={}",
                customer.name, bonus_fraction
            );
            return None;
        }

        let accrual = self.checked_points(customer.tier, amount).and_then(|base| {
            let bonus = base.checked_mul(bonus_fraction)?;
            let balance = customer.points.checked_add(base)?.checked_add(bonus)?;
            Some((base, bonus, balance))
        });

        let Some((base, bonus, balance)) = accrual else {
            warn!(
                "event=accrue customer={} status=overflow amount={} balance={}",
                customer.name, amount, customer.points
            );
            return None;
        };

        let before = customer.points;
        customer.points = round_points(balance).max(Decimal::ZERO);
        customer.touch();

        debug!(
            "event=accrue customer={} amount={} base={} bonus={} balance={}",
            customer.name, amount, base, bonus, customer.points
        );

        self.customers
            .insert(customer.name.clone(), customer.clone());
        Some(customer.points.saturating_sub(before))
    }

    // ========================================================================
    // BALANCE & REDEMPTION
    // ========================================================================

    /// Stored balance for the handle's name. The handle's own field is ignored.
    pub fn get_balance(&self, customer: &Customer) -> Result<Decimal> {
        match self.customers.get(&customer.name) {
            Some(record) => Ok(record.points),
            None => {
                warn!("event=balance_lookup customer={} status=not_found", customer.name);
                Err(LedgerError::NotFound {
                    name: customer.name.clone(),
                })
            }
        }
    }

    /// Redeem points for a discount of `points * redemption_rate`.
    ///
    /// Works on the registered record when there is one, otherwise on the
    /// handle itself (which then becomes registered). Fails without touching
    /// any balance when the balance is smaller than `points`.
    pub fn redeem_points(&mut self, customer: &mut Customer, points: Decimal) -> Result<Decimal> {
        // Deduction and discount both use the cent-rounded quantity
        let points = round_points(points);
        if points <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let mut record = self
            .customers
            .get(&customer.name)
            .cloned()
            .unwrap_or_else(|| customer.clone());

        if record.points < points {
            warn!(
                "event=redeem customer={} status=rejected requested={} available={}",
                record.name, points, record.points
            );
            return Err(LedgerError::InsufficientBalance {
                name: record.name,
                requested: points,
                available: record.points,
            });
        }

        record.points = (record.points - points).max(Decimal::ZERO);
        customer.points = record.points;

        let discount = points.saturating_mul(self.config.redemption_rate);

        debug!(
            "event=redeem customer={} points={} discount={} balance={}",
            record.name, points, discount, record.points
        );

        self.customers.insert(record.name.clone(), record);
        Ok(discount)
    }

    // ========================================================================
    // EXPIRY
    // ========================================================================

    /// Zero the handle's balance when it has been idle longer than
    /// `months_threshold` months. The stored record is left alone.
    pub fn expire_points(&self, customer: &mut Customer, months_threshold: u32) {
        self.expire_points_at(customer, months_threshold, Utc::now());
    }

    /// Same as [`expire_points`](Self::expire_points) against an explicit clock
    pub fn expire_points_at(
        &self,
        customer: &mut Customer,
        months_threshold: u32,
        now: DateTime<Utc>,
    ) {
        let idle_months = self.months_between(customer.last_updated, now);

        if idle_months > f64::from(months_threshold) {
            debug!(
                "event=expire customer={} idle_months={:.2} forfeited={}",
                customer.name, idle_months, customer.points
            );
            customer.points = Decimal::ZERO;
        }
    }

    fn months_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
        let elapsed_ms = to.signed_duration_since(from).num_milliseconds() as f64;
        elapsed_ms / (f64::from(self.config.days_per_month) * MILLIS_PER_DAY)
    }

    // ========================================================================
    // QUERIES (read-only, over caller-supplied handles)
    // ========================================================================

    /// Registry balance for the handle's name, else the handle's own balance
    pub fn resolved_balance(&self, customer: &Customer) -> Decimal {
        self.customers
            .get(&customer.name)
            .map(|record| record.points)
            .unwrap_or(customer.points)
    }

    pub fn total_points(&self, customers: &[Customer]) -> Decimal {
        customers
            .iter()
            .map(|customer| self.resolved_balance(customer))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Customers whose balance is strictly above `threshold`, in input order
    pub fn filter_above(&self, customers: &[Customer], threshold: Decimal) -> Vec<Customer> {
        customers
            .iter()
            .filter(|customer| self.resolved_balance(customer) > threshold)
            .cloned()
            .collect()
    }

    /// Highest balance first; ties keep their input order
    pub fn sort_by_points_descending(&self, customers: &[Customer]) -> Vec<Customer> {
        let mut sorted = customers.to_vec();
        sorted.sort_by(|a, b| self.resolved_balance(b).cmp(&self.resolved_balance(a)));
        sorted
    }

    pub fn remove_zero_balance(&self, customers: &[Customer]) -> Vec<Customer> {
        customers
            .iter()
            .filter(|customer| self.resolved_balance(customer) > Decimal::ZERO)
            .cloned()
            .collect()
    }

    /// First customer with exactly this name
    pub fn find_by_name(&self, customers: &[Customer], name: &str) -> Option<Customer> {
        customers.iter().find(|customer| customer.name == name).cloned()
    }

    // ========================================================================
    // REGISTRY LOOKUPS
    // ========================================================================

    pub fn get(&self, name: &str) -> Option<&Customer> {
        self.customers.get(name)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// Registered customers of a tier, sorted by name
    pub fn customers_by_tier(&self, tier: Tier) -> Vec<Customer> {
        let mut matching: Vec<Customer> = self
            .customers
            .values()
            .filter(|customer| customer.tier == tier)
            .cloned()
            .collect();

        matching.sort_by(|a, b| a.name.cmp(&b.name));
        matching
    }

    // ========================================================================
    // BATCH IMPORT
    // ========================================================================

    /// Apply a batch of purchases, registering unknown names first
    pub fn apply_purchases(&mut self, records: &[PurchaseRecord]) -> ImportSummary {
        let mut summary = ImportSummary::default();

        for record in records {
            let mut handle = match self.customers.get(&record.name) {
                Some(existing) => existing.clone(),
                None => {
                    summary.registered += 1;
                    self.register_customer(record.name.clone(), record.tier)
                }
            };

            let bonus = record.bonus.unwrap_or(Decimal::ZERO);
            match self.accrue(&mut handle, record.amount, bonus) {
                Some(credited) => {
                    summary.purchases_recorded += 1;
                    summary.points_accrued = summary.points_accrued.saturating_add(credited);
                }
                None => summary.skipped += 1,
            }
        }

        info!(
            "event=import registered={} recorded={} skipped={} points={}",
            summary.registered, summary.purchases_recorded, summary.skipped, summary.points_accrued
        );

        summary
    }
}

impl Default for LoyaltyLedger {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
