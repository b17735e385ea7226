//! Canonical domain model for vendors, transactions, and stock.
//!
//! # Responsibility
//! - Define the record shapes shared by ledger, persistence, and reporting.
//! - Pin the wire-level serialization to the legacy document format.
//!
//! # Invariants
//! - Every vendor and transaction is identified by a stable UUID.
//! - Transactions are immutable once created; the log is never rewritten.
//! - `cylinders_out` is a derived projection of the log, never authoritative.

pub mod stock;
pub mod transaction;
pub mod vendor;
