use gastrack_core::db::open_db_in_memory;
use gastrack_core::{
    CylinderCount, InventoryError, InventoryService, SqliteInventoryRepository,
};

#[test]
fn add_vendor_trims_name_and_starts_zeroed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInventoryRepository::try_new(&conn).unwrap();
    let service = InventoryService::new(repo);

    let vendor = service.add_vendor("  Acme Gas  ").unwrap();
    assert_eq!(vendor.name, "Acme Gas");
    assert_eq!(vendor.cylinders_out, CylinderCount::ZERO);
    assert!(vendor.transactions.is_empty());

    let loaded = service.vendor(vendor.uuid).unwrap().unwrap();
    assert_eq!(loaded, vendor);
}

#[test]
fn blank_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInventoryRepository::try_new(&conn).unwrap();
    let service = InventoryService::new(repo);

    let err = service.add_vendor("   ").unwrap_err();
    assert!(matches!(err, InventoryError::EmptyName));
    assert!(service.vendors().unwrap().is_empty());
}

#[test]
fn duplicate_name_is_rejected_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInventoryRepository::try_new(&conn).unwrap();
    let service = InventoryService::new(repo);

    service.add_vendor("Acme").unwrap();

    let err = service.add_vendor("acme").unwrap_err();
    assert!(matches!(err, InventoryError::DuplicateName(name) if name == "Acme"));

    let err = service.add_vendor("  ACME ").unwrap_err();
    assert!(matches!(err, InventoryError::DuplicateName(_)));

    assert_eq!(service.vendors().unwrap().len(), 1);
}

#[test]
fn vendors_list_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteInventoryRepository::try_new(&conn).unwrap();
    let service = InventoryService::new(repo);

    let first = service.add_vendor("First").unwrap();
    let second = service.add_vendor("Second").unwrap();
    let third = service.add_vendor("Third").unwrap();

    let names: Vec<_> = service
        .vendors()
        .unwrap()
        .into_iter()
        .map(|vendor| vendor.uuid)
        .collect();
    assert_eq!(names, vec![first.uuid, second.uuid, third.uuid]);
}
