use ohub_schemas::SourceSystem;
use ohub_store::{LoadError, OrderRepository};
use ohub_testkit::{fixture_dir, system_a_record, write_file, write_system_a_json, write_system_b_csv};

#[test]
fn scenario_broken_csv_does_not_block_json_source() {
    let dir = fixture_dir().unwrap();
    let a_path = write_system_a_json(
        dir.path(),
        &[system_a_record("A1", "Jane", "2024-01-05", 100.0, "SHIP")],
    )
    .unwrap();
    // Header is missing the 'total' column: structural, fails System B only.
    let b_path = write_file(
        dir.path(),
        "system_b_orders.csv",
        "order_num,client_name,date_placed,order_status\nB1,Bob,2024-02-10,4\n",
    )
    .unwrap();

    let repo = OrderRepository::new(Some(a_path), Some(b_path));
    let err = repo.load().unwrap_err();

    let LoadError::Sources(failures) = err;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].system, SourceSystem::SystemB);

    // The surviving source's records were still published.
    let all = repo.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].order_id, "A1");
}

#[test]
fn scenario_broken_json_does_not_block_csv_source() {
    let dir = fixture_dir().unwrap();
    let a_path = write_file(dir.path(), "system_a_orders.json", "[{\"orderID\":").unwrap();
    let b_path = write_system_b_csv(dir.path(), &[["B1", "Bob", "2024-02-10", "50", "4"]]).unwrap();

    let repo = OrderRepository::new(Some(a_path), Some(b_path));
    let err = repo.load().unwrap_err();

    let LoadError::Sources(failures) = err;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].system, SourceSystem::SystemA);

    let all = repo.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].order_id, "B1");
    assert_eq!(all[0].source_system, SourceSystem::SystemB);
}
