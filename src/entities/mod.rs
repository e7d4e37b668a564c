// Entity Models
// Customer identity is the name; the ledger owns the authoritative copy.

pub mod customer;

pub use customer::{Customer, Tier};
