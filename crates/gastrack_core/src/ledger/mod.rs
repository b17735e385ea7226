//! Pure ledger state transitions.
//!
//! # Responsibility
//! - Decide admissibility of a transaction request against current state.
//! - Compute the resulting vendor balance and global stock, without I/O.
//!
//! # Invariants
//! - Loan balances are always recomputed by replaying the log, never patched
//!   incrementally.
//! - Global stock cannot be overdrawn; vendors cannot return more than they
//!   hold.
//! - Vendor-owned movements are audit-only and leave balances and stock
//!   untouched.

pub mod engine;
