use shapeforge_core::{apply_record, Shape, ShapeRecord};

use crate::context::InteractionContext;
use crate::item::{ItemId, Pose};
use crate::store::ItemStore;

/// Reversible edit on the item store.
///
/// Every variant carries full before/after state, so `apply` and `undo` can
/// be replayed any number of times and always land on the same result.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoCommand {
    AddShape(AddShape),
    DeleteShapes(DeleteShapes),
    TransformShape(TransformShape),
    EditShapeJson(EditShapeJson),
}

/// Inserts one shape under an id reserved when the command was built.
#[derive(Debug, Clone, PartialEq)]
pub struct AddShape {
    pub id: ItemId,
    pub record: ShapeRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteShapes {
    pub entries: Vec<(ItemId, ShapeRecord)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformShape {
    pub id: ItemId,
    pub old: Pose,
    pub new: Pose,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditShapeJson {
    pub id: ItemId,
    pub old: ShapeRecord,
    pub new: ShapeRecord,
}

impl AddShape {
    pub fn new(store: &mut ItemStore, shape: &Shape) -> Self {
        Self {
            id: store.reserve_id(),
            record: shape.to_record(),
        }
    }
}

impl DeleteShapes {
    /// Snapshots the listed items; ids not in the store are skipped.
    pub fn new(store: &ItemStore, ids: &[ItemId]) -> Self {
        let entries = ids
            .iter()
            .filter_map(|&id| store.get(id).map(|item| (id, item.shape().to_record())))
            .collect();
        Self { entries }
    }
}

fn insert_record(store: &mut ItemStore, id: ItemId, record: &ShapeRecord) {
    match Shape::from_record(record) {
        Ok(shape) => {
            store.insert(id, shape);
        }
        Err(e) => {
            tracing::error!(item = %id, error = %e, "Cannot rebuild shape from snapshot");
            debug_assert!(false, "snapshot for {id} does not decode: {e}");
        }
    }
}

fn apply_pose(store: &mut ItemStore, id: ItemId, pose: Pose, ctx: &InteractionContext) {
    match store.get_mut(id) {
        Some(item) => item.set_pose(pose, ctx),
        None => tracing::warn!(item = %id, "Transform target is gone"),
    }
}

fn apply_snapshot(
    store: &mut ItemStore,
    id: ItemId,
    record: &ShapeRecord,
    ctx: &InteractionContext,
) {
    let Some(item) = store.get_mut(id) else {
        tracing::warn!(item = %id, "Edit target is gone");
        return;
    };
    if let Err(e) = apply_record(item.shape_mut(), record) {
        tracing::error!(item = %id, error = %e, "Snapshot does not fit its shape");
        debug_assert!(false, "snapshot for {id} rejected: {e}");
        return;
    }
    item.sync_from_shape();
    item.update_handles(ctx);
}

impl UndoCommand {
    /// Label for undo/redo menu entries.
    pub fn text(&self) -> String {
        match self {
            UndoCommand::AddShape(cmd) => format!("Add {}", cmd.record.type_name),
            UndoCommand::DeleteShapes(cmd) if cmd.entries.len() == 1 => "Delete Shape".to_string(),
            UndoCommand::DeleteShapes(cmd) => format!("Delete {} Shapes", cmd.entries.len()),
            UndoCommand::TransformShape(cmd) if cmd.old.pos == cmd.new.pos => {
                "Rotate Shape".to_string()
            }
            UndoCommand::TransformShape(_) => "Move Shape".to_string(),
            UndoCommand::EditShapeJson(_) => "Edit Shape".to_string(),
        }
    }

    pub fn apply(&self, store: &mut ItemStore, ctx: &InteractionContext) {
        match self {
            UndoCommand::AddShape(cmd) => insert_record(store, cmd.id, &cmd.record),
            UndoCommand::DeleteShapes(cmd) => {
                for (id, _) in &cmd.entries {
                    if store.remove(*id).is_none() {
                        tracing::warn!(item = %id, "Delete target is gone");
                    }
                }
            }
            UndoCommand::TransformShape(cmd) => apply_pose(store, cmd.id, cmd.new, ctx),
            UndoCommand::EditShapeJson(cmd) => apply_snapshot(store, cmd.id, &cmd.new, ctx),
        }
    }

    pub fn undo(&self, store: &mut ItemStore, ctx: &InteractionContext) {
        match self {
            UndoCommand::AddShape(cmd) => {
                if store.remove(cmd.id).is_none() {
                    tracing::warn!(item = %cmd.id, "Added item is already gone");
                }
            }
            UndoCommand::DeleteShapes(cmd) => {
                for (id, record) in &cmd.entries {
                    insert_record(store, *id, record);
                }
            }
            UndoCommand::TransformShape(cmd) => apply_pose(store, cmd.id, cmd.old, ctx),
            UndoCommand::EditShapeJson(cmd) => apply_snapshot(store, cmd.id, &cmd.old, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeforge_core::{Point, Rect};

    #[test]
    fn test_texts() {
        let mut store = ItemStore::new();
        let add = UndoCommand::AddShape(AddShape::new(
            &mut store,
            &Shape::rectangle(Rect::new(0.0, 0.0, 1.0, 1.0)),
        ));
        assert_eq!(add.text(), "Add Rectangle");

        let rotate = UndoCommand::TransformShape(TransformShape {
            id: ItemId(1),
            old: Pose::new(Point::ZERO, 0.0),
            new: Pose::new(Point::ZERO, 45.0),
        });
        assert_eq!(rotate.text(), "Rotate Shape");
    }

    #[test]
    fn test_missing_target_is_noop() {
        let mut store = ItemStore::new();
        let ctx = InteractionContext::default();
        let cmd = UndoCommand::TransformShape(TransformShape {
            id: ItemId(42),
            old: Pose::default(),
            new: Pose::new(Point::new(1.0, 1.0), 0.0),
        });
        cmd.apply(&mut store, &ctx);
        cmd.undo(&mut store, &ctx);
        assert!(store.is_empty());
    }
}
