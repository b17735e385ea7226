//! Core domain logic for GasTrack cylinder inventory tracking.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use ledger::engine::{
    record_transaction, replay_cylinders_out, LedgerError, LedgerUpdate, TransactionRequest,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::stock::Stock;
pub use model::transaction::{
    CylinderType, Ownership, Transaction, TransactionId, TransactionKind,
    TransactionValidationError,
};
pub use model::vendor::{CylinderCount, Vendor, VendorId, VendorValidationError};
pub use notify::hub::{ChangeEvent, ChangeHub, ChangeListener, SubscriptionId};
pub use repo::inventory_repo::{
    InventoryRepository, LedgerCommitError, RepoError, RepoResult, SqliteInventoryRepository,
};
pub use service::alert_service::{low_stock_alert, LowStockAlert, DEFAULT_LOW_STOCK_THRESHOLD};
pub use service::inventory_service::{InventoryError, InventoryService, InventorySnapshot};
pub use service::report_service::{
    export_csv, export_file_name, ReportError, ReportRange, CSV_HEADERS,
};
pub use service::session_service::{
    SessionCredentials, SessionError, SessionGate, SessionState,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
