use shapeforge_settings::{EditorConfig, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = EditorConfig::default();
    config.grid.snap = true;
    config.grid.size = 12.5;
    config.handles.size_px = 10.0;
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = EditorConfig::default();
    config.gestures.min_shape_size = 2.0;
    config.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"min_shape_size\": 2.0"));
    assert_eq!(EditorConfig::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "grid: {}").unwrap();
    assert!(matches!(
        EditorConfig::load_from_file(&path),
        Err(SettingsError::UnsupportedFormat(ext)) if ext == "yaml"
    ));
    assert!(EditorConfig::default().save_to_file(&path).is_err());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[grid]\nsize = -4.0\n").unwrap();
    assert!(matches!(
        EditorConfig::load_from_file(&path),
        Err(SettingsError::Invalid { .. })
    ));
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert_eq!(EditorConfig::load_or_default(&path).unwrap(), EditorConfig::default());
}

#[test]
fn test_default_path_layout() {
    if let Ok(path) = EditorConfig::default_path() {
        assert!(path.ends_with("shapeforge/config.toml"));
    }
}
