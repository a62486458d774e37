use ohub_schemas::SourceSystem;
use ohub_store::OrderRepository;
use ohub_testkit::{fixture_dir, system_a_record, write_system_a_json, write_system_b_csv};

#[test]
fn scenario_get_by_id_finds_record_and_not_found_is_none() {
    let dir = fixture_dir().unwrap();
    let a_path = write_system_a_json(
        dir.path(),
        &[system_a_record("A1", "Jane", "2024-01-05", 100.0, "SHIP")],
    )
    .unwrap();
    let b_path = write_system_b_csv(dir.path(), &[["B1", "Bob", "2024-02-10", "50", "4"]]).unwrap();

    let repo = OrderRepository::new(Some(a_path), Some(b_path));
    repo.load().unwrap();

    let hit = repo.get_by_id("A1").unwrap();
    assert_eq!(hit.source_system, SourceSystem::SystemA);
    assert_eq!(hit.customer_name, "Jane");

    assert_eq!(repo.get_by_id("does-not-exist"), None);
}

#[test]
fn scenario_colliding_id_returns_first_in_collection_order() {
    let dir = fixture_dir().unwrap();
    // Both sources emit "X1": ids are unique within a source, not across.
    let a_path = write_system_a_json(
        dir.path(),
        &[system_a_record("X1", "Jane", "2024-01-05", 100.0, "SHIP")],
    )
    .unwrap();
    let b_path = write_system_b_csv(dir.path(), &[["X1", "Bob", "2024-02-10", "50", "4"]]).unwrap();

    let repo = OrderRepository::new(Some(a_path), Some(b_path));
    let report = repo.load().unwrap();

    // The collision is visible in the report, but never deduplicated.
    assert_eq!(report.total_records, 2);
    assert_eq!(report.id_collisions.len(), 1);
    assert_eq!(report.id_collisions[0].order_id, "X1");
    assert_eq!(report.id_collisions[0].count, 2);

    // SystemA loads before SystemB, so first-match is the SystemA record.
    let hit = repo.get_by_id("X1").unwrap();
    assert_eq!(hit.source_system, SourceSystem::SystemA);
    assert_eq!(hit.customer_name, "Jane");
}
