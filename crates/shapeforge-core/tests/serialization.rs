use shapeforge_core::serialization::{self, Document};
use shapeforge_core::{apply_record, Color, PersistenceError, Point, Rect, Shape, ShapeKind};
use tempfile::TempDir;

fn sample_shapes() -> Vec<Shape> {
    let mut rect = Shape::rectangle(Rect::new(0.0, 0.0, 10.0, 20.0)).with_name("rect");
    rect.color = Color::rgb(10, 20, 30);
    rect.pen.width = 2.5;
    rect.move_to(5.0, 6.0);
    rect.set_rotation_degrees(30.0);
    vec![
        rect,
        Shape::line_segment(Point::new(1.0, 2.0), Point::new(3.0, 4.0)).with_name("line"),
        Shape::circle(Point::new(7.0, 7.0), 3.0),
        Shape::ellipse(Point::ZERO, 4.0, 2.0),
        Shape::triangle(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)),
        Shape::polygon(vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)]),
        Shape::polyline(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
    ]
}

#[test]
fn test_round_trip_all_kinds() {
    let shapes = sample_shapes();
    let restored = serialization::deserialize(&serialization::serialize(&shapes));
    assert_eq!(restored, shapes);
}

#[test]
fn test_unknown_type_is_dropped() {
    let text = r#"{
        "version": 1,
        "shapes": [
            {"type": "Rectangle", "name": "r", "geom": {"x": 0, "y": 0, "w": 5, "h": 5}},
            {"type": "Bogus", "name": "b", "geom": {}}
        ]
    }"#;
    let doc = Document::from_json_str(text).unwrap();
    let shapes = serialization::deserialize(&doc);
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].kind(), ShapeKind::Rectangle);
    assert_eq!(shapes[0].name, "r");
}

#[test]
fn test_wrong_geometry_types_drop_record() {
    let text = r#"{"version":1,"shapes":[
        {"type":"Circle","geom":{"cx":"left","cy":0,"r":1}},
        {"type":"Circle","geom":{"cx":1,"cy":2,"r":3}}
    ]}"#;
    let shapes = serialization::deserialize(&Document::from_json_str(text).unwrap());
    assert_eq!(shapes.len(), 1);
}

#[test]
fn test_rectangle_written_normalized() {
    let shape = Shape::rectangle(Rect::new(10.0, 10.0, -10.0, -5.0));
    let record = shape.to_record();
    assert_eq!(record.geom["x"], 0.0);
    assert_eq!(record.geom["y"], 5.0);
    assert_eq!(record.geom["w"], 10.0);
    assert_eq!(record.geom["h"], 5.0);
}

#[test]
fn test_legacy_record_without_rotation_or_pen_colour() {
    let text = r##"{"shapes":[{"type":"Circle","name":"old",
        "style":{"color":"#ff00ff00","pen":{"width":3}},
        "transform":{"tx":4,"ty":5},
        "geom":{"cx":0,"cy":0,"r":2}}]}"##;
    let shapes = serialization::deserialize(&Document::from_json_str(text).unwrap());
    let c = &shapes[0];
    assert_eq!(c.rotation_degrees(), 0.0);
    assert_eq!(c.pen.width, 3.0);
    assert_eq!(c.pen.color, Color::rgb(0, 255, 0));
    assert_eq!(c.transform().translation(), Point::new(4.0, 5.0));
}

#[test]
fn test_apply_record_in_place() {
    let mut shape = Shape::circle(Point::ZERO, 1.0);
    let mut target = Shape::circle(Point::new(3.0, 3.0), 9.0).with_name("big");
    target.move_to(1.0, 1.0);
    apply_record(&mut shape, &target.to_record()).unwrap();
    assert_eq!(shape, target);
}

#[test]
fn test_save_and_load_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drawing.json");
    let shapes = sample_shapes();

    serialization::save_to_file(&path, &shapes).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"version\": 1"));

    let loaded = serialization::load_from_file(&path).unwrap();
    assert_eq!(loaded, shapes);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");
    let err = serialization::load_from_file(&path).unwrap_err();
    assert!(matches!(err, PersistenceError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_load_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"shapes\": [").unwrap();
    let err = serialization::load_from_file(&path).unwrap_err();
    assert!(matches!(err, PersistenceError::Parse(_)));
}
