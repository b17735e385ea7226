//! Vendor domain model.
//!
//! # Responsibility
//! - Define the vendor record with its newest-first transaction log.
//! - Keep the per-type loan balance (`cylinders_out`) shape stable.
//!
//! # Invariants
//! - `transactions` is ordered newest-first by insertion.
//! - `cylinders_out` equals the organization-owned net of the log, floored
//!   at zero per cylinder type; the log is the source of truth.
//! - Vendor names are unique under case-insensitive comparison (enforced at
//!   service level, backstopped by storage).

use crate::model::transaction::{CylinderType, Transaction};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one vendor.
pub type VendorId = Uuid;

/// Per-cylinder-type counters, used for loan balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CylinderCount {
    pub oxygen: u32,
    pub co2: u32,
}

impl CylinderCount {
    /// All counters at zero.
    pub const ZERO: Self = Self { oxygen: 0, co2: 0 };

    /// Returns the counter for one cylinder type.
    pub const fn get(self, cylinder_type: CylinderType) -> u32 {
        match cylinder_type {
            CylinderType::Oxygen => self.oxygen,
            CylinderType::Co2 => self.co2,
        }
    }

    /// Sets the counter for one cylinder type.
    pub fn set(&mut self, cylinder_type: CylinderType, value: u32) {
        match cylinder_type {
            CylinderType::Oxygen => self.oxygen = value,
            CylinderType::Co2 => self.co2 = value,
        }
    }
}

/// Validation failures for vendor records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorValidationError {
    /// Name is blank after trimming.
    BlankName,
    /// Vendor identity must be a real UUID.
    NilUuid,
}

impl Display for VendorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "vendor name must not be blank"),
            Self::NilUuid => write!(f, "vendor uuid must not be nil"),
        }
    }
}

impl Error for VendorValidationError {}

/// One vendor with its running loan balance and full ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Stable global ID, serialized as `id` to match the document schema.
    #[serde(rename = "id")]
    pub uuid: VendorId,
    pub name: String,
    /// Derived cache of organization-owned cylinders currently on loan.
    pub cylinders_out: CylinderCount,
    /// Newest-first ledger. Absent in some legacy documents.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Vendor {
    /// Creates a vendor with a generated stable ID, zeroed balances, and an
    /// empty ledger. The caller is responsible for name normalization.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a vendor with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: VendorId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            cylinders_out: CylinderCount::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `BlankName` when the name trims to nothing.
    /// - `NilUuid` when the identity is the nil UUID.
    pub fn validate(&self) -> Result<(), VendorValidationError> {
        if self.uuid.is_nil() {
            return Err(VendorValidationError::NilUuid);
        }
        if self.name.trim().is_empty() {
            return Err(VendorValidationError::BlankName);
        }
        Ok(())
    }
}
