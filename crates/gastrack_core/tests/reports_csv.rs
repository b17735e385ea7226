use chrono::{NaiveDate, TimeZone, Utc};
use gastrack_core::db::open_db_in_memory;
use gastrack_core::{
    export_csv, export_file_name, CylinderType, InventoryRepository, Ownership, ReportError,
    ReportRange, SqliteInventoryRepository, Transaction, TransactionKind, Vendor,
};
use rusqlite::params;
use uuid::Uuid;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn entry_at(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    kind: TransactionKind,
    cylinder_type: CylinderType,
    count: u32,
    ownership: Ownership,
) -> Transaction {
    Transaction::new(
        kind,
        cylinder_type,
        count,
        Utc.with_ymd_and_hms(year, month, day, hour, 15, 42).unwrap(),
        ownership,
    )
}

fn vendor_with_log(name: &str, entries: Vec<Transaction>) -> Vendor {
    let mut vendor = Vendor::new(name);
    vendor.transactions = entries;
    vendor
}

#[test]
fn export_renders_fixed_headers_and_uppercased_values() {
    let vendor = vendor_with_log(
        "Acme",
        vec![entry_at(2024, 1, 15, 10, TransactionKind::Out, CylinderType::Oxygen, 5, Ownership::Organization)],
    );

    let csv = export_csv(&[vendor], None).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Vendor Name,Date,Type,Cylinder Type,Count,Ownership"
    );
    assert_eq!(
        lines.next().unwrap(),
        "Acme,2024-01-15 10:15:42,OUT,OXYGEN,5,ORGANIZATION"
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn export_quotes_names_containing_commas() {
    let vendor = vendor_with_log(
        "Acme, Inc.",
        vec![entry_at(2024, 2, 1, 8, TransactionKind::In, CylinderType::Co2, 2, Ownership::VendorOwned)],
    );

    let csv = export_csv(&[vendor], None).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert_eq!(row, "\"Acme, Inc.\",2024-02-01 08:15:42,IN,CO2,2,VENDOR-OWNED");
}

#[test]
fn export_follows_vendor_order_then_newest_first_logs() {
    let first = vendor_with_log(
        "First",
        vec![
            entry_at(2024, 1, 2, 9, TransactionKind::In, CylinderType::Oxygen, 1, Ownership::Organization),
            entry_at(2024, 1, 1, 9, TransactionKind::Out, CylinderType::Oxygen, 3, Ownership::Organization),
        ],
    );
    let second = vendor_with_log(
        "Second",
        vec![entry_at(2024, 1, 1, 12, TransactionKind::Out, CylinderType::Co2, 7, Ownership::Organization)],
    );

    let csv = export_csv(&[first, second], None).unwrap();
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("First,2024-01-02"));
    assert!(rows[1].starts_with("First,2024-01-01"));
    assert!(rows[2].starts_with("Second,2024-01-01"));
}

#[test]
fn date_range_filter_is_inclusive_at_day_granularity() {
    let vendor = vendor_with_log(
        "Acme",
        vec![
            entry_at(2023, 12, 31, 23, TransactionKind::Out, CylinderType::Oxygen, 1, Ownership::Organization),
            entry_at(2024, 1, 1, 0, TransactionKind::Out, CylinderType::Oxygen, 2, Ownership::Organization),
            entry_at(2024, 1, 31, 23, TransactionKind::Out, CylinderType::Oxygen, 3, Ownership::Organization),
            entry_at(2024, 2, 1, 0, TransactionKind::Out, CylinderType::Oxygen, 4, Ownership::Organization),
        ],
    );

    let range = ReportRange {
        from: day(2024, 1, 1),
        to: Some(day(2024, 1, 31)),
    };
    let csv = export_csv(std::slice::from_ref(&vendor), Some(&range)).unwrap();
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("2024-01-01"));
    assert!(rows[1].contains("2024-01-31"));
}

#[test]
fn missing_end_date_means_the_single_from_day() {
    let vendor = vendor_with_log(
        "Acme",
        vec![
            entry_at(2024, 1, 14, 23, TransactionKind::Out, CylinderType::Co2, 1, Ownership::Organization),
            entry_at(2024, 1, 15, 0, TransactionKind::Out, CylinderType::Co2, 2, Ownership::Organization),
            entry_at(2024, 1, 15, 23, TransactionKind::Out, CylinderType::Co2, 3, Ownership::Organization),
            entry_at(2024, 1, 16, 0, TransactionKind::Out, CylinderType::Co2, 4, Ownership::Organization),
        ],
    );

    let range = ReportRange {
        from: day(2024, 1, 15),
        to: None,
    };
    let csv = export_csv(std::slice::from_ref(&vendor), Some(&range)).unwrap();
    let rows: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.contains("2024-01-15")));
}

#[test]
fn empty_selection_is_reported_not_silently_exported() {
    let vendor = vendor_with_log("Acme", Vec::new());

    let err = export_csv(std::slice::from_ref(&vendor), None).unwrap_err();
    assert!(matches!(err, ReportError::NoMatchingTransactions));

    let vendor = vendor_with_log(
        "Acme",
        vec![entry_at(2024, 6, 1, 9, TransactionKind::Out, CylinderType::Oxygen, 1, Ownership::Organization)],
    );
    let range = ReportRange {
        from: day(2020, 1, 1),
        to: Some(day(2020, 12, 31)),
    };
    let err = export_csv(&[vendor], Some(&range)).unwrap_err();
    assert!(matches!(err, ReportError::NoMatchingTransactions));
}

#[test]
fn legacy_rows_without_ownership_export_as_organization() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInventoryRepository::try_new(&conn).unwrap();

    let vendor = Vendor::new("Legacy");
    repo.create_vendor(&vendor).unwrap();
    conn.execute(
        "INSERT INTO transactions (uuid, vendor_uuid, date, type, cylinder_type, count, ownership)
         VALUES (?1, ?2, ?3, 'out', 'oxygen', 4, NULL);",
        params![
            Uuid::new_v4().to_string(),
            vendor.uuid.to_string(),
            Utc.with_ymd_and_hms(2019, 5, 4, 11, 0, 0).unwrap(),
        ],
    )
    .unwrap();

    let loaded = repo.get_vendor(vendor.uuid).unwrap().unwrap();
    assert_eq!(loaded.transactions[0].ownership, Ownership::Organization);

    let csv = export_csv(&[loaded], None).unwrap();
    assert!(csv.lines().nth(1).unwrap().ends_with(",ORGANIZATION"));
}

#[test]
fn export_file_names_encode_the_selected_range() {
    assert_eq!(export_file_name(None), "gastrack_transactions_all_time.csv");
    assert_eq!(
        export_file_name(Some(&ReportRange {
            from: day(2024, 1, 1),
            to: None,
        })),
        "gastrack_transactions_from_2024-01-01.csv"
    );
    assert_eq!(
        export_file_name(Some(&ReportRange {
            from: day(2024, 1, 1),
            to: Some(day(2024, 1, 31)),
        })),
        "gastrack_transactions_2024-01-01_to_2024-01-31.csv"
    );
}
