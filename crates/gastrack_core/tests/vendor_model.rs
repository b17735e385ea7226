use chrono::{TimeZone, Utc};
use gastrack_core::{
    CylinderCount, CylinderType, Ownership, Transaction, TransactionKind,
    TransactionValidationError, Vendor, VendorValidationError,
};
use uuid::Uuid;

#[test]
fn vendor_new_starts_zeroed_with_empty_log() {
    let vendor = Vendor::new("Acme");

    assert!(!vendor.uuid.is_nil());
    assert_eq!(vendor.name, "Acme");
    assert_eq!(vendor.cylinders_out, CylinderCount::ZERO);
    assert!(vendor.transactions.is_empty());
    vendor.validate().unwrap();
}

#[test]
fn vendor_serialization_uses_legacy_wire_fields() {
    let vendor_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut vendor = Vendor::with_id(vendor_id, "Acme");
    vendor.cylinders_out = CylinderCount { oxygen: 3, co2: 0 };
    vendor.transactions = vec![Transaction {
        uuid: Uuid::parse_str("99999999-8888-4777-8666-555555555555").unwrap(),
        date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        kind: TransactionKind::Out,
        cylinder_type: CylinderType::Oxygen,
        count: 3,
        ownership: Ownership::Organization,
    }];

    let json = serde_json::to_value(&vendor).unwrap();
    assert_eq!(json["id"], vendor_id.to_string());
    assert_eq!(json["name"], "Acme");
    assert_eq!(json["cylindersOut"]["oxygen"], 3);
    assert_eq!(json["cylindersOut"]["co2"], 0);

    let entry = &json["transactions"][0];
    assert_eq!(entry["id"], "99999999-8888-4777-8666-555555555555");
    assert_eq!(entry["date"], "2024-01-02T03:04:05Z");
    assert_eq!(entry["type"], "out");
    assert_eq!(entry["cylinderType"], "oxygen");
    assert_eq!(entry["count"], 3);
    assert_eq!(entry["ownership"], "organization");

    let decoded: Vendor = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, vendor);
}

#[test]
fn vendor_owned_custody_serializes_with_kebab_case_value() {
    let entry = Transaction::new(
        TransactionKind::In,
        CylinderType::Co2,
        2,
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        Ownership::VendorOwned,
    );

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["type"], "in");
    assert_eq!(json["cylinderType"], "co2");
    assert_eq!(json["ownership"], "vendor-owned");
}

#[test]
fn legacy_documents_without_ownership_load_as_organization() {
    let value = serde_json::json!({
        "id": "99999999-8888-4777-8666-555555555555",
        "date": "2019-06-01T10:00:00.000Z",
        "type": "out",
        "cylinderType": "co2",
        "count": 7
    });

    let entry: Transaction = serde_json::from_value(value).unwrap();
    assert_eq!(entry.ownership, Ownership::Organization);
    assert_eq!(entry.count, 7);
}

#[test]
fn legacy_vendor_documents_without_transactions_load_with_empty_log() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "name": "Acme",
        "cylindersOut": { "oxygen": 0, "co2": 0 }
    });

    let vendor: Vendor = serde_json::from_value(value).unwrap();
    assert!(vendor.transactions.is_empty());
}

#[test]
fn wire_names_roundtrip_through_the_enum_helpers() {
    for kind in [TransactionKind::In, TransactionKind::Out] {
        assert_eq!(TransactionKind::from_wire_str(kind.as_wire_str()), Some(kind));
    }
    for cylinder_type in [CylinderType::Oxygen, CylinderType::Co2] {
        assert_eq!(
            CylinderType::from_wire_str(cylinder_type.as_wire_str()),
            Some(cylinder_type)
        );
    }
    for ownership in [Ownership::Organization, Ownership::VendorOwned] {
        assert_eq!(Ownership::from_wire_str(ownership.as_wire_str()), Some(ownership));
    }
    assert_eq!(TransactionKind::from_wire_str("sideways"), None);
}

#[test]
fn validation_rejects_zero_counts_and_nil_ids() {
    let mut entry = Transaction::new(
        TransactionKind::Out,
        CylinderType::Oxygen,
        0,
        Utc::now(),
        Ownership::Organization,
    );
    assert_eq!(
        entry.validate().unwrap_err(),
        TransactionValidationError::ZeroCount
    );

    entry.count = 1;
    entry.uuid = Uuid::nil();
    assert_eq!(
        entry.validate().unwrap_err(),
        TransactionValidationError::NilUuid
    );

    let vendor = Vendor::with_id(Uuid::nil(), "Acme");
    assert_eq!(vendor.validate().unwrap_err(), VendorValidationError::NilUuid);

    let vendor = Vendor::new("   ");
    assert_eq!(
        vendor.validate().unwrap_err(),
        VendorValidationError::BlankName
    );
}
