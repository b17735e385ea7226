//! Inventory repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable vendor/stock access over canonical SQLite storage.
//! - Run the ledger write path as one atomic read-modify-write spanning the
//!   vendor record and the stock record.
//!
//! # Invariants
//! - Vendor logs are returned newest-first (descending insertion order).
//! - A rejected ledger decision rolls back without any partial write.
//! - `NULL` ownership is the one sanctioned legacy shape and loads as
//!   organization-owned.

use crate::db::{migrations::latest_version, DbError};
use crate::ledger::engine::{LedgerError, LedgerUpdate};
use crate::model::stock::Stock;
use crate::model::transaction::{
    CylinderType, Ownership, Transaction, TransactionKind, TransactionValidationError,
};
use crate::model::vendor::{CylinderCount, Vendor, VendorId, VendorValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const VENDOR_SELECT_SQL: &str = "SELECT uuid, name, oxygen_out, co2_out FROM vendors";

const TRANSACTION_SELECT_SQL: &str = "SELECT
    uuid,
    date,
    type,
    cylinder_type,
    count,
    ownership
FROM transactions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for inventory persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    VendorValidation(VendorValidationError),
    TransactionValidation(TransactionValidationError),
    Db(DbError),
    VendorNotFound(VendorId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VendorValidation(err) => write!(f, "{err}"),
            Self::TransactionValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::VendorNotFound(id) => write!(f, "vendor not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted inventory data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::VendorValidation(err) => Some(err),
            Self::TransactionValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<VendorValidationError> for RepoError {
    fn from(value: VendorValidationError) -> Self {
        Self::VendorValidation(value)
    }
}

impl From<TransactionValidationError> for RepoError {
    fn from(value: TransactionValidationError) -> Self {
        Self::TransactionValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Outcome of the atomic ledger write path.
#[derive(Debug)]
pub enum LedgerCommitError {
    /// Target vendor does not exist.
    VendorNotFound(VendorId),
    /// The decision function rejected the request; nothing was written.
    Rejected(LedgerError),
    /// Persistence-layer failure; the storage transaction rolled back.
    Repo(RepoError),
}

impl Display for LedgerCommitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VendorNotFound(id) => write!(f, "vendor not found: {id}"),
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LedgerCommitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::VendorNotFound(_) => None,
            Self::Rejected(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for LedgerCommitError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::VendorNotFound(id) => Self::VendorNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for LedgerCommitError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Pure decision function evaluated inside the storage transaction.
///
/// Receives the vendor and stock as read under the transaction; returns the
/// successor state to commit, or a rejection that rolls everything back.
pub type LedgerDecision<'a> =
    &'a mut dyn FnMut(&Vendor, &Stock) -> Result<LedgerUpdate, LedgerError>;

/// Repository interface for vendor, ledger, and stock persistence.
pub trait InventoryRepository {
    fn create_vendor(&self, vendor: &Vendor) -> RepoResult<VendorId>;
    fn get_vendor(&self, id: VendorId) -> RepoResult<Option<Vendor>>;
    /// Case-insensitive lookup on the trimmed name.
    fn find_vendor_by_name(&self, name: &str) -> RepoResult<Option<Vendor>>;
    /// All vendors in creation order, each with its full newest-first log.
    fn list_vendors(&self) -> RepoResult<Vec<Vendor>>;
    fn stock(&self) -> RepoResult<Stock>;
    /// Administrative stock override; bypasses the ledger entirely.
    fn replace_stock(&self, stock: &Stock) -> RepoResult<()>;
    /// Atomic ledger write: reads vendor + stock under one storage
    /// transaction, runs `decide`, and commits entry, balance, and stock
    /// together — or rolls back on rejection/failure.
    fn record_transaction(
        &self,
        vendor_id: VendorId,
        decide: LedgerDecision<'_>,
    ) -> Result<LedgerUpdate, LedgerCommitError>;
}

/// SQLite-backed inventory repository.
pub struct SqliteInventoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteInventoryRepository<'conn> {
    /// Wraps a connection after verifying it carries the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the storage this repository relies on.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_table(conn, "vendors", &["uuid", "name", "oxygen_out", "co2_out"])?;
        ensure_table(
            conn,
            "transactions",
            &[
                "uuid",
                "vendor_uuid",
                "date",
                "type",
                "cylinder_type",
                "count",
                "ownership",
            ],
        )?;
        ensure_table(conn, "stock", &["oxygen", "co2"])?;

        Ok(Self { conn })
    }
}

impl InventoryRepository for SqliteInventoryRepository<'_> {
    fn create_vendor(&self, vendor: &Vendor) -> RepoResult<VendorId> {
        vendor.validate()?;
        for entry in &vendor.transactions {
            entry.validate()?;
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO vendors (uuid, name, oxygen_out, co2_out)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                vendor.uuid.to_string(),
                vendor.name.as_str(),
                vendor.cylinders_out.oxygen,
                vendor.cylinders_out.co2,
            ],
        )?;
        // The in-memory log is newest-first; insert oldest-first so `seq`
        // reproduces insertion order.
        for entry in vendor.transactions.iter().rev() {
            insert_transaction(&tx, vendor.uuid, entry)?;
        }
        tx.commit()?;

        Ok(vendor.uuid)
    }

    fn get_vendor(&self, id: VendorId) -> RepoResult<Option<Vendor>> {
        read_vendor(self.conn, id)
    }

    fn find_vendor_by_name(&self, name: &str) -> RepoResult<Option<Vendor>> {
        let row = self
            .conn
            .query_row(
                &format!("{VENDOR_SELECT_SQL} WHERE name = ?1 COLLATE NOCASE;"),
                [name.trim()],
                parse_vendor_row,
            )
            .optional()?;

        match row {
            Some(vendor) => Ok(Some(attach_transactions(self.conn, vendor?)?)),
            None => Ok(None),
        }
    }

    fn list_vendors(&self) -> RepoResult<Vec<Vendor>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VENDOR_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;

        let mut vendors = Vec::new();
        while let Some(row) = rows.next()? {
            let vendor = parse_vendor_row(row)??;
            vendors.push(attach_transactions(self.conn, vendor)?);
        }
        Ok(vendors)
    }

    fn stock(&self) -> RepoResult<Stock> {
        read_stock(self.conn)
    }

    fn replace_stock(&self, stock: &Stock) -> RepoResult<()> {
        write_stock(self.conn, stock)
    }

    fn record_transaction(
        &self,
        vendor_id: VendorId,
        decide: LedgerDecision<'_>,
    ) -> Result<LedgerUpdate, LedgerCommitError> {
        let tx = self.conn.unchecked_transaction()?;

        let vendor = read_vendor(&tx, vendor_id)?
            .ok_or(LedgerCommitError::VendorNotFound(vendor_id))?;
        let stock = read_stock(&tx)?;

        // Rejection drops `tx` unfinished, which rolls back; prior state is
        // observable unchanged by the caller.
        let update = decide(&vendor, &stock).map_err(LedgerCommitError::Rejected)?;
        update.entry.validate().map_err(RepoError::from)?;

        insert_transaction(&tx, vendor_id, &update.entry)?;
        let changed = tx.execute(
            "UPDATE vendors SET oxygen_out = ?1, co2_out = ?2 WHERE uuid = ?3;",
            params![
                update.cylinders_out.oxygen,
                update.cylinders_out.co2,
                vendor_id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(LedgerCommitError::VendorNotFound(vendor_id));
        }
        write_stock(&tx, &update.stock)?;
        tx.commit()?;

        Ok(update)
    }
}

fn insert_transaction(
    conn: &Connection,
    vendor_id: VendorId,
    entry: &Transaction,
) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO transactions (uuid, vendor_uuid, date, type, cylinder_type, count, ownership)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            entry.uuid.to_string(),
            vendor_id.to_string(),
            entry.date,
            entry.kind.as_wire_str(),
            entry.cylinder_type.as_wire_str(),
            entry.count,
            entry.ownership.as_wire_str(),
        ],
    )?;
    Ok(())
}

fn read_vendor(conn: &Connection, id: VendorId) -> RepoResult<Option<Vendor>> {
    let row = conn
        .query_row(
            &format!("{VENDOR_SELECT_SQL} WHERE uuid = ?1;"),
            [id.to_string()],
            parse_vendor_row,
        )
        .optional()?;

    match row {
        Some(vendor) => Ok(Some(attach_transactions(conn, vendor?)?)),
        None => Ok(None),
    }
}

fn attach_transactions(conn: &Connection, mut vendor: Vendor) -> RepoResult<Vendor> {
    let mut stmt = conn.prepare(&format!(
        "{TRANSACTION_SELECT_SQL} WHERE vendor_uuid = ?1 ORDER BY seq DESC;"
    ))?;
    let mut rows = stmt.query([vendor.uuid.to_string()])?;

    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_transaction_row(row)?);
    }
    vendor.transactions = entries;
    Ok(vendor)
}

fn read_stock(conn: &Connection) -> RepoResult<Stock> {
    let stock = conn
        .query_row("SELECT oxygen, co2 FROM stock WHERE id = 1;", [], |row| {
            Ok((row.get::<_, i64>("oxygen")?, row.get::<_, i64>("co2")?))
        })
        .optional()?;

    match stock {
        Some((oxygen, co2)) => Ok(Stock {
            oxygen: parse_count(oxygen, "stock.oxygen")?,
            co2: parse_count(co2, "stock.co2")?,
        }),
        None => Err(RepoError::InvalidData(
            "stock singleton row is missing".to_string(),
        )),
    }
}

fn write_stock(conn: &Connection, stock: &Stock) -> RepoResult<()> {
    let changed = conn.execute(
        "UPDATE stock SET oxygen = ?1, co2 = ?2 WHERE id = 1;",
        params![stock.oxygen, stock.co2],
    )?;
    if changed == 0 {
        return Err(RepoError::InvalidData(
            "stock singleton row is missing".to_string(),
        ));
    }
    Ok(())
}

fn parse_vendor_row(row: &Row<'_>) -> rusqlite::Result<RepoResult<Vendor>> {
    let uuid_text: String = row.get("uuid")?;
    let name: String = row.get("name")?;
    let oxygen_out: i64 = row.get("oxygen_out")?;
    let co2_out: i64 = row.get("co2_out")?;

    Ok(build_vendor(uuid_text, name, oxygen_out, co2_out))
}

fn build_vendor(
    uuid_text: String,
    name: String,
    oxygen_out: i64,
    co2_out: i64,
) -> RepoResult<Vendor> {
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in vendors.uuid"))
    })?;

    Ok(Vendor {
        uuid,
        name,
        cylinders_out: CylinderCount {
            oxygen: parse_count(oxygen_out, "vendors.oxygen_out")?,
            co2: parse_count(co2_out, "vendors.co2_out")?,
        },
        transactions: Vec::new(),
    })
}

fn parse_transaction_row(row: &Row<'_>) -> RepoResult<Transaction> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid uuid value `{uuid_text}` in transactions.uuid"
        ))
    })?;

    let kind_text: String = row.get("type")?;
    let kind = TransactionKind::from_wire_str(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid transaction type `{kind_text}` in transactions.type"
        ))
    })?;

    let cylinder_text: String = row.get("cylinder_type")?;
    let cylinder_type = CylinderType::from_wire_str(&cylinder_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid cylinder type `{cylinder_text}` in transactions.cylinder_type"
        ))
    })?;

    // Legacy rows carry NULL ownership and are organization-owned.
    let ownership = match row.get::<_, Option<String>>("ownership")? {
        None => Ownership::default(),
        Some(value) => Ownership::from_wire_str(&value).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid ownership `{value}` in transactions.ownership"
            ))
        })?,
    };

    let entry = Transaction {
        uuid,
        date: row.get("date")?,
        kind,
        cylinder_type,
        count: parse_count(row.get::<_, i64>("count")?, "transactions.count")?,
        ownership,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_count(value: i64, context: &str) -> RepoResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid count value `{value}` in {context}")))
}

fn ensure_table(
    conn: &Connection,
    table: &'static str,
    required_columns: &[&'static str],
) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    for &column in required_columns {
        if !columns.iter().any(|present| present == column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }
    Ok(())
}
