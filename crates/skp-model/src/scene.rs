//! Scenes and their hidden-entity references

use crate::entity::EntityRef;
use crate::id::PersistentId;

/// A scene: a named view state that hides a set of entities.
///
/// `hidden_entities` holds references, never ownership; the referenced
/// entities belong to the document this scene was projected from, and the
/// scene never outlives that document. The list is read-only after
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub name: String,
    /// Ordered references to the entities this scene hides
    pub hidden_entities: Vec<EntityRef>,
}

impl Scene {
    /// Create a scene hiding nothing
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hidden_entities: Vec::new(),
        }
    }

    /// Create a scene with its hidden-entity references
    pub fn with_hidden(name: impl Into<String>, hidden_entities: Vec<EntityRef>) -> Self {
        Self {
            name: name.into(),
            hidden_entities,
        }
    }

    /// Persistent identifiers of all hidden entities, in list order
    pub fn hidden_ids(&self) -> Vec<PersistentId> {
        self.hidden_entities
            .iter()
            .map(|e| e.persistent_id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::geometry::Edge;
    use glam::Vec3;
    use std::sync::Arc;

    #[test]
    fn test_empty_scene_has_empty_list() {
        let scene = Scene::new("Overview");
        assert_eq!(scene.name, "Overview");
        assert!(scene.hidden_entities.is_empty());
        assert!(scene.hidden_ids().is_empty());
    }

    #[test]
    fn test_hidden_ids_preserve_order() {
        let a = Arc::new(Entity::Edge(Edge::new(
            PersistentId::new(3),
            Vec3::ZERO,
            Vec3::X,
        )));
        let b = Arc::new(Entity::Edge(Edge::new(
            PersistentId::new(1),
            Vec3::X,
            Vec3::Y,
        )));
        let scene = Scene::with_hidden("Detail", vec![a, b]);
        assert_eq!(
            scene.hidden_ids(),
            vec![PersistentId::new(3), PersistentId::new(1)]
        );
    }
}
