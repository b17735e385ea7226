//! Inventory use-case service.
//!
//! # Responsibility
//! - Provide vendor registry, ledger, and stocktake entry points.
//! - Surface every rejection with its specific reason, never a generic
//!   failure.
//! - Notify subscribers after successful commits.
//!
//! # Invariants
//! - Vendor names are trimmed and unique case-insensitively.
//! - A rejected or failed operation leaves prior state observable unchanged.
//! - Snapshot reads degrade to "no data yet" on backend failure instead of
//!   blocking callers.

use crate::ledger::engine::{self, LedgerError, LedgerUpdate, TransactionRequest};
use crate::model::stock::Stock;
use crate::model::transaction::Ownership;
use crate::model::vendor::{Vendor, VendorId};
use crate::notify::hub::{ChangeEvent, ChangeHub, ChangeListener, SubscriptionId};
use crate::repo::inventory_repo::{
    InventoryRepository, LedgerCommitError, RepoError,
};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Service error for inventory use-cases.
///
/// Every variant is recoverable by resubmitting corrected input.
#[derive(Debug)]
pub enum InventoryError {
    /// Vendor name is blank after trimming.
    EmptyName,
    /// A vendor with this name (case-insensitive) already exists.
    DuplicateName(String),
    /// Target vendor does not exist.
    VendorNotFound(VendorId),
    /// The ledger engine rejected the request; state is unchanged.
    Rejected(LedgerError),
    /// Persistence-layer failure.
    Backend(RepoError),
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "vendor name cannot be empty"),
            Self::DuplicateName(name) => {
                write!(f, "a vendor named `{name}` already exists")
            }
            Self::VendorNotFound(id) => write!(f, "vendor not found: {id}"),
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Backend(err) => write!(f, "backend unavailable: {err}"),
        }
    }
}

impl Error for InventoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for InventoryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::VendorNotFound(id) => Self::VendorNotFound(id),
            other => Self::Backend(other),
        }
    }
}

impl From<LedgerCommitError> for InventoryError {
    fn from(value: LedgerCommitError) -> Self {
        match value {
            LedgerCommitError::VendorNotFound(id) => Self::VendorNotFound(id),
            LedgerCommitError::Rejected(err) => Self::Rejected(err),
            LedgerCommitError::Repo(err) => Self::from(err),
        }
    }
}

/// Point-in-time view of the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySnapshot {
    pub vendors: Vec<Vendor>,
    pub stock: Stock,
}

/// Inventory service facade over repository implementations.
///
/// Owns the change hub; there are no ambient globals.
pub struct InventoryService<R: InventoryRepository> {
    repo: R,
    hub: ChangeHub,
}

impl<R: InventoryRepository> InventoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            hub: ChangeHub::new(),
        }
    }

    /// Registers a vendor with a trimmed, unique name.
    ///
    /// # Errors
    /// - `EmptyName` when the name trims to nothing.
    /// - `DuplicateName` on a case-insensitive collision.
    pub fn add_vendor(&self, name: &str) -> Result<Vendor, InventoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InventoryError::EmptyName);
        }
        if let Some(existing) = self.repo.find_vendor_by_name(name)? {
            return Err(InventoryError::DuplicateName(existing.name));
        }

        let vendor = Vendor::new(name);
        self.repo.create_vendor(&vendor)?;
        info!(
            "event=vendor_added module=service status=ok vendor={}",
            vendor.uuid
        );
        self.hub.emit(&ChangeEvent::VendorAdded(vendor.uuid));
        Ok(vendor)
    }

    /// Records one ledger transaction for a vendor.
    ///
    /// Admissibility and the successor state are decided by the pure ledger
    /// engine, evaluated inside the repository's atomic read-modify-write:
    /// entry, loan balance, and stock commit together or not at all.
    ///
    /// # Errors
    /// - `VendorNotFound` when the vendor does not exist.
    /// - `Rejected` with the engine's specific reason; state is unchanged.
    /// - `Backend` on persistence failure; the write rolled back.
    pub fn record_transaction(
        &self,
        vendor_id: VendorId,
        request: &TransactionRequest,
    ) -> Result<LedgerUpdate, InventoryError> {
        let outcome = self.repo.record_transaction(vendor_id, &mut |vendor, stock| {
            engine::record_transaction(vendor, stock, request)
        });

        match outcome {
            Ok(update) => {
                info!(
                    "event=transaction_recorded module=service status=ok vendor={} entry={} kind={} cylinder={} count={} ownership={}",
                    vendor_id,
                    update.entry.uuid,
                    update.entry.kind.as_wire_str(),
                    update.entry.cylinder_type.as_wire_str(),
                    update.entry.count,
                    update.entry.ownership.as_wire_str()
                );
                self.hub.emit(&ChangeEvent::TransactionRecorded {
                    vendor: vendor_id,
                    transaction: update.entry.uuid,
                });
                if update.entry.ownership == Ownership::Organization {
                    self.hub.emit(&ChangeEvent::StockChanged(update.stock));
                }
                Ok(update)
            }
            Err(LedgerCommitError::Rejected(reason)) => {
                warn!(
                    "event=transaction_rejected module=service vendor={vendor_id} reason={reason}"
                );
                Err(InventoryError::Rejected(reason))
            }
            Err(other) => Err(InventoryError::from(other)),
        }
    }

    /// Replaces global stock counters directly (manual stocktake).
    ///
    /// Bypasses the ledger; callers clamp inputs to non-negative values
    /// upstream, which the unsigned types enforce here.
    pub fn set_stock(&self, oxygen: u32, co2: u32) -> Result<Stock, InventoryError> {
        let stock = Stock { oxygen, co2 };
        self.repo.replace_stock(&stock)?;
        info!("event=stock_override module=service status=ok oxygen={oxygen} co2={co2}");
        self.hub.emit(&ChangeEvent::StockChanged(stock));
        Ok(stock)
    }

    /// Gets one vendor with its full ledger.
    pub fn vendor(&self, id: VendorId) -> Result<Option<Vendor>, InventoryError> {
        Ok(self.repo.get_vendor(id)?)
    }

    /// Lists all vendors in creation order.
    pub fn vendors(&self) -> Result<Vec<Vendor>, InventoryError> {
        Ok(self.repo.list_vendors()?)
    }

    /// Current global stock counters.
    pub fn stock(&self) -> Result<Stock, InventoryError> {
        Ok(self.repo.stock()?)
    }

    /// Reads vendors and stock in one call.
    ///
    /// Backend failure is logged and degrades to an empty vendor list with
    /// the initial stock seed, so callers are never blocked on a broken
    /// store.
    pub fn snapshot(&self) -> InventorySnapshot {
        match self.try_snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!("event=snapshot_fallback module=service status=error error={err}");
                InventorySnapshot {
                    vendors: Vec::new(),
                    stock: Stock::initial(),
                }
            }
        }
    }

    /// Registers a change listener; events arrive after successful commits.
    pub fn subscribe(&self, listener: Arc<dyn ChangeListener>) -> SubscriptionId {
        self.hub.subscribe(listener)
    }

    /// Removes a change listener. Returns whether the handle was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.hub.unsubscribe(id)
    }

    fn try_snapshot(&self) -> Result<InventorySnapshot, InventoryError> {
        Ok(InventorySnapshot {
            vendors: self.repo.list_vendors()?,
            stock: self.repo.stock()?,
        })
    }
}
