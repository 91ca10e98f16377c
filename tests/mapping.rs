// Integration tests for mapping persistence
use pathlink::error::LinkError;
use pathlink::mapping::PathMapping;

#[test]
fn test_persist_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symlinks.json");
    let mapping: PathMapping = [
        ("outputs/muestreos", "C:\\Users\\agro\\OneDrive\\Muestreos"),
        ("outputs/cultivos", "/data/cultivos"),
        ("outputs/kmz", "\\\\nas\\share\\kmz ñ"),
    ]
    .into_iter()
    .collect();

    mapping.persist(&path).unwrap();
    let loaded = PathMapping::load(&path).unwrap();

    assert_eq!(loaded, mapping);
    let keys: Vec<_> = loaded.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["outputs/muestreos", "outputs/cultivos", "outputs/kmz"]);
}

#[test]
fn test_persisted_format_is_flat_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/dir/symlinks.json");
    let mapping: PathMapping = [("outputs/cultivos", "/data/cultivos")].into_iter().collect();

    mapping.persist(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "{\n  \"outputs/cultivos\": \"/data/cultivos\"\n}\n");
    assert!(!dir.path().join("nested/dir/symlinks.json.tmp").exists());
}

#[test]
fn test_missing_file_is_empty_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let mapping = PathMapping::load(&dir.path().join("absent.json")).unwrap();
    assert!(mapping.is_empty());
}

#[test]
fn test_hand_edited_keys_are_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symlinks.json");
    std::fs::write(
        &path,
        r#"{
  "outputs\\cultivos\\": "/data/cultivos",
  "outputs/cultivos": "/other",
  "./outputs/kmz": "  D:\\kmz  "
}"#,
    )
    .unwrap();

    let mapping = PathMapping::load(&path).unwrap();
    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(
        entries,
        vec![("outputs/cultivos", "/data/cultivos"), ("outputs/kmz", "D:\\kmz")]
    );
}

#[test]
fn test_invalid_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symlinks.json");

    for content in [
        "not json",
        r#"["outputs/a"]"#,
        r#"{"outputs/a": 3}"#,
        r#"{"outputs/a": ""}"#,
        r#"{"outputs/a": "relative/target"}"#,
        r#"{"": "/a"}"#,
        r#"{"outputs/../x": "/a"}"#,
        r#"{"outputs/../../Users/me/Documents": "D:\\Sync\\x"}"#,
        r#"{"C:\\x": "/a"}"#,
        r#"{"/etc/outputs": "/a"}"#,
        r#"{"outputs/a:b": "/a"}"#,
    ] {
        std::fs::write(&path, content).unwrap();
        let result = PathMapping::load(&path);
        assert!(
            matches!(result, Err(LinkError::Mapping { .. })),
            "accepted {content:?}"
        );
    }
}

#[test]
fn test_keys_differing_only_by_case_collapse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("symlinks.json");
    std::fs::write(
        &path,
        r#"{
  "outputs/Kmz": "D:\\Sync\\kmz",
  "outputs/kmz": "D:\\Other",
  "outputs/cultivos": "/data/cultivos"
}"#,
    )
    .unwrap();

    let mapping = PathMapping::load(&path).unwrap();
    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(
        entries,
        vec![("outputs/Kmz", "D:\\Sync\\kmz"), ("outputs/cultivos", "/data/cultivos")]
    );
}
