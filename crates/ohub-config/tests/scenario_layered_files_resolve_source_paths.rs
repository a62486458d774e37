use ohub_config::{load_layered_yaml, SourcePaths};
use std::fs;

#[test]
fn scenario_layered_files_resolve_source_paths() {
    let dir = tempfile::tempdir().unwrap();

    let base = dir.path().join("base.yaml");
    fs::write(
        &base,
        "sources:\n  system_a:\n    path: /srv/exports/system_a_orders.json\n  system_b:\n    path: /srv/exports/system_b_orders.csv\n",
    )
    .unwrap();

    let env = dir.path().join("env.yaml");
    fs::write(
        &env,
        "sources:\n  system_a:\n    path: /srv/staging/system_a_orders.json\n",
    )
    .unwrap();

    let cfg = load_layered_yaml(&[
        base.to_str().unwrap(),
        env.to_str().unwrap(),
    ])
    .unwrap();

    let paths = SourcePaths::from_config(&cfg.config_json).unwrap();
    assert_eq!(
        paths.system_a.as_deref(),
        Some(std::path::Path::new("/srv/staging/system_a_orders.json"))
    );
    assert_eq!(
        paths.system_b.as_deref(),
        Some(std::path::Path::new("/srv/exports/system_b_orders.csv"))
    );
    assert_eq!(cfg.config_hash.len(), 64);
}

#[test]
fn scenario_unreadable_layer_fails_with_path_context() {
    let err = load_layered_yaml(&["/definitely/not/here.yaml"]).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}
