use shapeforge::report::{normalize_file, summarize};
use shapeforge_core::{serialization, ShapeKind};

const LEGACY: &str = r##"{
  "shapes": [
    {"type": "Rectangle", "name": "flipped", "geom": {"x": 50, "y": 40, "w": -30, "h": -20},
     "transform": {"tx": 5, "ty": 5}},
    {"type": "Hexagon", "geom": {}},
    {"type": "Circle", "geom": {"cx": 0, "cy": 0, "r": 10}, "style": {"color": "#ff0000"}}
  ]
}"##;

#[test]
fn test_normalize_drops_unknown_and_flips_rectangles() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("legacy.json");
    let output = dir.path().join("tidy.json");
    std::fs::write(&input, LEGACY).unwrap();

    assert_eq!(normalize_file(&input, &output).unwrap(), 2);

    let text = std::fs::read_to_string(&output).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let rect = &json["shapes"][0];
    assert_eq!(rect["geom"]["x"], 20.0);
    assert_eq!(rect["geom"]["w"], 30.0);
    assert_eq!(rect["transform"]["rotation"], 0.0);
    let circle = &json["shapes"][1];
    assert_eq!(circle["style"]["pen"]["color"], "#ffff0000");

    let shapes = serialization::load_from_file(&output).unwrap();
    let kinds: Vec<_> = summarize(&shapes).into_iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![ShapeKind::Rectangle, ShapeKind::Circle]);
}

#[test]
fn test_normalize_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = normalize_file(&dir.path().join("nope.json"), &dir.path().join("out.json"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to load"));
}
