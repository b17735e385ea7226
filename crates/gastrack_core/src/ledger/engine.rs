//! Transaction admissibility and balance reconciliation.
//!
//! # Responsibility
//! - Validate one transaction request against vendor and stock state.
//! - Produce the immutable ledger entry plus the successor state.
//!
//! # Invariants
//! - Rejections leave no trace; the caller's state is untouched.
//! - `cylinders_out` is derived by replaying organization-owned entries,
//!   out adds, in subtracts, floored at zero per cylinder type.
//! - Stock moves only for organization-owned entries.

use crate::model::stock::Stock;
use crate::model::transaction::{
    CylinderType, Ownership, Transaction, TransactionKind,
};
use crate::model::vendor::{CylinderCount, Vendor};
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::iter;

/// Terminal rejection reasons for a transaction request.
///
/// Every rejection is recoverable by resubmitting corrected input; none of
/// them mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// Requested count is not strictly positive.
    InvalidCount,
    /// Check-out would overdraw the global stock pool.
    InsufficientStock {
        cylinder_type: CylinderType,
        requested: u32,
        available: u32,
    },
    /// Check-in exceeds what the vendor currently holds on loan.
    OverReturn {
        cylinder_type: CylinderType,
        requested: u32,
        held: u32,
    },
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCount => {
                write!(f, "transaction count must be a positive number")
            }
            Self::InsufficientStock {
                cylinder_type,
                requested,
                available,
            } => write!(
                f,
                "cannot check out {requested} {} cylinder(s), only {available} in stock",
                cylinder_type.as_wire_str().to_ascii_uppercase()
            ),
            Self::OverReturn {
                cylinder_type,
                requested,
                held,
            } => write!(
                f,
                "cannot check in {requested} {} cylinder(s), vendor only holds {held}",
                cylinder_type.as_wire_str().to_ascii_uppercase()
            ),
        }
    }
}

impl Error for LedgerError {}

/// One transaction request, before admissibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub cylinder_type: CylinderType,
    pub count: u32,
    pub date: DateTime<Utc>,
    pub ownership: Ownership,
}

/// Successor state produced by an accepted request.
///
/// `entry` is the freshly minted ledger record; `cylinders_out` and `stock`
/// are complete replacement values, committed together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerUpdate {
    pub entry: Transaction,
    pub cylinders_out: CylinderCount,
    pub stock: Stock,
}

/// Decides one transaction request and computes the successor state.
///
/// Checks run in a fixed order: count, stock cover, loan cover. Vendor-owned
/// requests skip the stock and loan checks entirely.
///
/// # Errors
/// - `InvalidCount` when `count == 0`.
/// - `InsufficientStock` for an organization check-out not covered by stock.
/// - `OverReturn` for an organization check-in above the vendor's balance.
pub fn record_transaction(
    vendor: &Vendor,
    stock: &Stock,
    request: &TransactionRequest,
) -> Result<LedgerUpdate, LedgerError> {
    if request.count == 0 {
        return Err(LedgerError::InvalidCount);
    }

    if request.ownership == Ownership::Organization {
        match request.kind {
            TransactionKind::Out => {
                let available = stock.get(request.cylinder_type);
                if available < request.count {
                    return Err(LedgerError::InsufficientStock {
                        cylinder_type: request.cylinder_type,
                        requested: request.count,
                        available,
                    });
                }
            }
            TransactionKind::In => {
                let held = vendor.cylinders_out.get(request.cylinder_type);
                if held < request.count {
                    return Err(LedgerError::OverReturn {
                        cylinder_type: request.cylinder_type,
                        requested: request.count,
                        held,
                    });
                }
            }
        }
    }

    let entry = Transaction::new(
        request.kind,
        request.cylinder_type,
        request.count,
        request.date,
        request.ownership,
    );

    // Replay the whole log (new entry included) instead of patching the
    // cached balance; the projection self-heals against any prior drift.
    let cylinders_out =
        replay_cylinders_out(iter::once(&entry).chain(vendor.transactions.iter()));

    let stock = match request.ownership {
        Ownership::VendorOwned => *stock,
        Ownership::Organization => {
            let current = stock.get(request.cylinder_type);
            let next = match request.kind {
                TransactionKind::In => current.saturating_add(request.count),
                // The stock check above guarantees `current >= count`.
                TransactionKind::Out => current - request.count,
            };
            stock.with(request.cylinder_type, next)
        }
    };

    Ok(LedgerUpdate {
        entry,
        cylinders_out,
        stock,
    })
}

/// Derives the loan balance from a transaction log.
///
/// Only organization-owned entries participate: `out` adds, `in` subtracts.
/// Each cylinder type is floored at zero, so legacy logs with excess returns
/// collapse to an empty balance instead of going negative.
pub fn replay_cylinders_out<'a>(
    entries: impl Iterator<Item = &'a Transaction>,
) -> CylinderCount {
    let mut oxygen: i64 = 0;
    let mut co2: i64 = 0;

    for entry in entries {
        if entry.ownership != Ownership::Organization {
            continue;
        }
        let signed = match entry.kind {
            TransactionKind::Out => i64::from(entry.count),
            TransactionKind::In => -i64::from(entry.count),
        };
        match entry.cylinder_type {
            CylinderType::Oxygen => oxygen += signed,
            CylinderType::Co2 => co2 += signed,
        }
    }

    CylinderCount {
        oxygen: clamp_to_u32(oxygen),
        co2: clamp_to_u32(co2),
    }
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
