//! Global stock counters.
//!
//! # Responsibility
//! - Hold the singleton pool of organization-owned cylinders in store.
//!
//! # Invariants
//! - Counters never go negative; the ledger engine blocks any movement that
//!   would overdraw the pool.
//! - Only organization-owned transactions (and explicit stocktake overrides)
//!   mutate these counters.

use crate::model::transaction::CylinderType;
use serde::{Deserialize, Serialize};

/// Singleton global stock record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub oxygen: u32,
    pub co2: u32,
}

impl Stock {
    /// Seed values used on a fresh store, carried over from the legacy data.
    pub const INITIAL_OXYGEN: u32 = 50;
    pub const INITIAL_CO2: u32 = 50;

    /// Returns the stock a fresh (or unreadable) store starts with.
    pub const fn initial() -> Self {
        Self {
            oxygen: Self::INITIAL_OXYGEN,
            co2: Self::INITIAL_CO2,
        }
    }

    /// Returns the counter for one cylinder type.
    pub const fn get(self, cylinder_type: CylinderType) -> u32 {
        match cylinder_type {
            CylinderType::Oxygen => self.oxygen,
            CylinderType::Co2 => self.co2,
        }
    }

    /// Returns a copy with one counter replaced.
    pub const fn with(self, cylinder_type: CylinderType, value: u32) -> Self {
        match cylinder_type {
            CylinderType::Oxygen => Self {
                oxygen: value,
                co2: self.co2,
            },
            CylinderType::Co2 => Self {
                oxygen: self.oxygen,
                co2: value,
            },
        }
    }

    /// Total cylinders across both gas types.
    pub const fn total(self) -> u32 {
        self.oxygen.saturating_add(self.co2)
    }
}
