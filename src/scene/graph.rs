//! Source elements paired with their instantiated objects.

use crate::foundation::core::{Affine, ObjectId};
use crate::parser::dom::NodeId;
use crate::scene::object::SceneObject;

/// One instantiated element. `object` is `None` when instantiation failed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSlot {
    pub element: NodeId,
    pub object: Option<SceneObject>,
}

/// Flat, index-addressed store of every instantiated element.
///
/// Slot order is the document order of the instantiated elements, and an [`ObjectId`] is a
/// slot index. Failed instantiations keep their slot, so element and object never drift apart.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneGraph {
    slots: Vec<SceneSlot>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: Vec<SceneSlot>) -> Self {
        Self { slots }
    }

    /// Append a slot and return its id.
    pub fn push(&mut self, element: NodeId, object: Option<SceneObject>) -> ObjectId {
        self.slots.push(SceneSlot { element, object });
        ObjectId(self.slots.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[SceneSlot] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [SceneSlot] {
        &mut self.slots
    }

    pub fn element(&self, id: ObjectId) -> Option<NodeId> {
        self.slots.get(id.0).map(|s| s.element)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.slots.get(id.0)?.object.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.slots.get_mut(id.0)?.object.as_mut()
    }

    /// Slot holding the object instantiated from `element`.
    pub fn find_by_element(&self, element: NodeId) -> Option<ObjectId> {
        self.slots
            .iter()
            .position(|s| s.element == element)
            .map(ObjectId)
    }

    /// Instantiated objects with their ids, skipping failed slots.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.object.as_ref().map(|o| (ObjectId(i), o)))
    }

    /// Objects whose parent link points at `parent`.
    pub fn children_of(&self, parent: ObjectId) -> Vec<ObjectId> {
        self.objects()
            .filter(|(_, o)| o.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }

    /// Product of the parent chain's local transforms and the object's own, root first.
    pub fn world_matrix(&self, id: ObjectId) -> Option<Affine> {
        let mut m = self.get(id)?.own_matrix();
        let mut seen = vec![id];
        let mut cursor = self.get(id)?.parent;
        while let Some(p) = cursor {
            if seen.contains(&p) {
                break;
            }
            seen.push(p);
            let Some(parent) = self.get(p) else {
                break;
            };
            m = parent.own_matrix() * m;
            cursor = parent.parent;
        }
        Some(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
