use shapeforge_core::{Color, Document, PersistenceError, Point, Rect, Shape};
use shapeforge_editor::{EditorError, HandleKind, Key, Modifiers, MouseButton, Scene, SceneEvent, UndoStack};

fn drag(scene: &mut Scene, from: Point, to: Point) {
    scene.pointer_press(from, MouseButton::Left, Modifiers::default());
    scene.pointer_move(to);
    scene.pointer_release(to, MouseButton::Left);
}

/// Undo then redo twice over, checking both states every time.
fn assert_replays(scene: &mut Scene, before: &Document) {
    let after = scene.document();
    assert_ne!(&after, before);
    for _ in 0..2 {
        assert!(scene.undo());
        assert_eq!(&scene.document(), before);
        assert!(scene.redo());
        assert_eq!(scene.document(), after);
    }
}

fn sample_scene() -> Scene {
    let mut scene = Scene::default();
    scene.add_shape(Shape::rectangle(Rect::new(0.0, 0.0, 100.0, 50.0)).with_name("frame"));
    scene.add_shape(Shape::circle(Point::new(300.0, 300.0), 40.0));
    scene
}

#[test]
fn test_add_replays() {
    let mut scene = sample_scene();
    let before = scene.document();
    scene.add_shape(Shape::polyline(vec![Point::ZERO, Point::new(5.0, 5.0)]));
    assert_replays(&mut scene, &before);
}

#[test]
fn test_delete_replays_and_keeps_ids() {
    let mut scene = sample_scene();
    let ids: Vec<_> = scene.items().map(|i| i.id()).collect();
    let before = scene.document();

    for id in &ids {
        scene.select(*id);
    }
    assert_eq!(scene.delete_selected(), 2);
    assert!(scene.is_empty());
    assert_eq!(
        scene.undo_stack().unwrap().undo_text().as_deref(),
        Some("Delete 2 Shapes")
    );

    assert_replays(&mut scene, &before);
    assert!(scene.undo());
    let restored: Vec<_> = scene.items().map(|i| i.id()).collect();
    assert_eq!(restored, ids);
}

#[test]
fn test_transform_replays() {
    let mut scene = sample_scene();
    let before = scene.document();
    drag(&mut scene, Point::new(50.0, 25.0), Point::new(80.0, 45.0));
    assert_replays(&mut scene, &before);
}

#[test]
fn test_rotation_replays() {
    let mut scene = Scene::default();
    let id = scene.add_shape(Shape::circle(Point::ZERO, 50.0));
    scene.select(id);
    let before = scene.document();

    let handle = scene
        .item(id)
        .and_then(|item| item.handle_scene_pos(HandleKind::Rotation, 0))
        .unwrap();
    drag(&mut scene, handle, Point::new(80.0, 0.0));
    assert_eq!(
        scene.undo_stack().unwrap().undo_text().as_deref(),
        Some("Rotate Shape")
    );

    assert_replays(&mut scene, &before);
    assert!(scene.undo());
    assert_eq!(scene.item(id).unwrap().rotation(), 0.0);
}

#[test]
fn test_geometry_edit_replays() {
    let mut scene = sample_scene();
    let id = scene.items().next().unwrap().id();
    scene.select(id);
    let before = scene.document();
    drag(&mut scene, Point::new(100.0, 50.0), Point::new(140.0, 70.0));
    assert_replays(&mut scene, &before);
}

#[test]
fn test_new_step_after_undo_drops_redo() {
    let mut scene = sample_scene();
    assert!(scene.undo());
    assert!(scene.can_redo());
    scene.add_shape(Shape::circle(Point::ZERO, 1.0));
    assert!(!scene.can_redo());
}

#[test]
fn test_undo_reports_status() {
    let mut scene = sample_scene();
    scene.take_events();
    scene.undo();
    assert!(scene
        .take_events()
        .contains(&SceneEvent::Status("Undo Add Circle".to_string())));
}

#[test]
fn test_without_history_edits_apply_directly() {
    let mut scene = Scene::default();
    scene.set_undo_stack(None);
    let id = scene.add_shape(Shape::circle(Point::ZERO, 10.0));
    scene.select(id);
    assert!(scene.set_active_name("disc"));
    scene.key_press(Key::Delete);

    assert!(scene.is_empty());
    assert!(!scene.can_undo());
    assert!(!scene.undo());
}

#[test]
fn test_property_edits_are_undoable() {
    let mut scene = sample_scene();
    assert!(scene.active_properties().is_none());
    assert!(!scene.set_active_name("nothing selected"));

    let id = scene.items().next().unwrap().id();
    scene.select(id);
    let sheet = scene.active_properties().unwrap();
    assert_eq!(sheet.type_name, "Rectangle");
    assert_eq!(sheet.name, "frame");
    assert_eq!(sheet.area, "5000.00");

    assert!(scene.set_active_name("border"));
    assert!(scene.set_active_pen_width(-3.0));
    assert!(scene.set_active_color(Color::rgb(255, 0, 0)));
    assert!(!scene.set_active_color(Color::rgb(255, 0, 0)));

    let sheet = scene.active_properties().unwrap();
    assert_eq!(sheet.name, "border");
    assert_eq!(sheet.pen_width, "0.00");
    assert_eq!(sheet.color, "#ffff0000");

    assert!(scene.undo());
    assert!(scene.undo());
    assert_eq!(scene.active_properties().unwrap().pen_width, "1.00");
    assert!(scene.undo());
    assert_eq!(scene.active_properties().unwrap().name, "frame");
}

#[test]
fn test_history_limit() {
    let mut scene = Scene::default();
    scene.set_undo_stack(Some(UndoStack::with_limit(3)));
    for i in 0..5 {
        scene.add_shape(Shape::circle(Point::new(i as f64 * 10.0, 0.0), 2.0));
    }
    let mut undone = 0;
    while scene.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drawing.json");

    let mut scene = sample_scene();
    assert!(scene.is_modified());
    scene.save_to_file(&path).unwrap();
    assert!(!scene.is_modified());

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["shapes"].as_array().map(Vec::len), Some(2));

    let mut other = Scene::default();
    other.add_shape(Shape::circle(Point::ZERO, 1.0));
    assert_eq!(other.load_from_file(&path).unwrap(), 2);
    assert_eq!(other.document(), scene.document());
    assert!(!other.can_undo());
    assert!(!other.is_modified());
}

#[test]
fn test_failed_load_leaves_scene_alone() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = sample_scene();
    let before = scene.document();

    let err = scene
        .load_from_file(dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(
        err,
        EditorError::Persistence(PersistenceError::Read { .. })
    ));

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json").unwrap();
    assert!(scene.load_from_file(&garbage).is_err());

    assert_eq!(scene.document(), before);
    assert!(scene.can_undo());
}

#[test]
fn test_new_document_clears_everything() {
    let mut scene = sample_scene();
    let id = scene.items().next().unwrap().id();
    scene.select(id);
    scene.take_events();

    scene.new_document();
    assert!(scene.is_empty());
    assert!(!scene.can_undo());
    assert!(scene
        .take_events()
        .contains(&SceneEvent::SelectionChanged(Vec::new())));
}
