//! Transaction domain model.
//!
//! # Responsibility
//! - Define the immutable ledger entry and its enumerated value domains.
//! - Keep wire names identical to the legacy document schema
//!   (`type`, `cylinderType`, `ownership`, values `in`/`out`,
//!   `oxygen`/`co2`, `organization`/`vendor-owned`).
//!
//! # Invariants
//! - `count` is strictly positive for every persisted entry.
//! - Entries are never updated or deleted once written.
//! - Records lacking `ownership` predate the field and load as
//!   organization-owned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one ledger entry.
pub type TransactionId = Uuid;

/// Direction of a cylinder movement, seen from the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Cylinders returned by the vendor.
    In,
    /// Cylinders handed out to the vendor.
    Out,
}

/// Gas type of the cylinders moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CylinderType {
    Oxygen,
    Co2,
}

/// Custody of the cylinders moved.
///
/// Organization-owned movements are counted against the managed stock pool.
/// Vendor-owned movements are logged for audit only and never touch stock
/// or loan balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ownership {
    /// Default also covers legacy records written before the field existed.
    #[default]
    Organization,
    VendorOwned,
}

impl TransactionKind {
    /// Serialized form, identical to the serde wire name.
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// Parses the serialized form back into the enum.
    pub fn from_wire_str(value: &str) -> Option<Self> {
        match value {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }
}

impl CylinderType {
    /// Serialized form, identical to the serde wire name.
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Oxygen => "oxygen",
            Self::Co2 => "co2",
        }
    }

    /// Parses the serialized form back into the enum.
    pub fn from_wire_str(value: &str) -> Option<Self> {
        match value {
            "oxygen" => Some(Self::Oxygen),
            "co2" => Some(Self::Co2),
            _ => None,
        }
    }
}

impl Ownership {
    /// Serialized form, identical to the serde wire name.
    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::VendorOwned => "vendor-owned",
        }
    }

    /// Parses the serialized form back into the enum.
    pub fn from_wire_str(value: &str) -> Option<Self> {
        match value {
            "organization" => Some(Self::Organization),
            "vendor-owned" => Some(Self::VendorOwned),
            _ => None,
        }
    }
}

/// Validation failures for transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionValidationError {
    /// `count` must be strictly positive.
    ZeroCount,
    /// Entry identity must be a real UUID.
    NilUuid,
}

impl Display for TransactionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCount => write!(f, "transaction count must be a positive number"),
            Self::NilUuid => write!(f, "transaction uuid must not be nil"),
        }
    }
}

impl Error for TransactionValidationError {}

/// One immutable ledger entry for a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Stable global ID, serialized as `id` to match the document schema.
    #[serde(rename = "id")]
    pub uuid: TransactionId,
    /// Moment of the movement, normalized to UTC (RFC 3339 on the wire).
    pub date: DateTime<Utc>,
    /// Serialized as `type` to match the document schema.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub cylinder_type: CylinderType,
    /// Number of cylinders moved. Always > 0.
    pub count: u32,
    /// Absent in legacy documents; defaults to organization custody.
    #[serde(default)]
    pub ownership: Ownership,
}

impl Transaction {
    /// Creates a new entry with a generated stable ID.
    pub fn new(
        kind: TransactionKind,
        cylinder_type: CylinderType,
        count: u32,
        date: DateTime<Utc>,
        ownership: Ownership,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            date,
            kind,
            cylinder_type,
            count,
            ownership,
        }
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - `ZeroCount` when `count == 0`.
    /// - `NilUuid` when the identity is the nil UUID.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.uuid.is_nil() {
            return Err(TransactionValidationError::NilUuid);
        }
        if self.count == 0 {
            return Err(TransactionValidationError::ZeroCount);
        }
        Ok(())
    }
}
