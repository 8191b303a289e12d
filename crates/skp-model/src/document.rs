//! Document snapshot serialization

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::entity::{Entity, EntityRef};
use crate::id::PersistentId;
use crate::scene::Scene;

/// Serialization format for backward compatibility.
///
/// Scene references are flattened to persistent identifiers; the shared
/// `Arc` structure is rebuilt on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentData {
    version: u32,
    name: String,
    components: Vec<Component>,
    entities: Vec<Entity>,
    scenes: Vec<SceneData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneData {
    name: String,
    hidden_entities: Vec<PersistentId>,
}

/// A whole-graph projection of one native document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Snapshot format version
    pub version: u32,
    /// Document name
    pub name: String,
    /// All component definitions
    pub components: Vec<Component>,
    /// Every addressable entity, in registration order; scenes share
    /// references into this list
    pub entities: Vec<EntityRef>,
    /// All scenes
    pub scenes: Vec<Scene>,
}

impl From<&Document> for DocumentData {
    fn from(document: &Document) -> Self {
        Self {
            version: document.version,
            name: document.name.clone(),
            components: document.components.clone(),
            entities: document.entities.iter().map(|e| (**e).clone()).collect(),
            scenes: document
                .scenes
                .iter()
                .map(|s| SceneData {
                    name: s.name.clone(),
                    hidden_entities: s.hidden_ids(),
                })
                .collect(),
        }
    }
}

impl From<DocumentData> for Document {
    fn from(data: DocumentData) -> Self {
        let entities: Vec<EntityRef> = data.entities.into_iter().map(Arc::new).collect();
        let mut by_id: HashMap<PersistentId, EntityRef> = HashMap::with_capacity(entities.len());
        let mut duplicates = 0usize;
        for entity in &entities {
            if by_id
                .insert(entity.persistent_id(), Arc::clone(entity))
                .is_some()
            {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            // Persistent ids are unique per document; a snapshot carrying
            // duplicates is corrupt. Loading stays tolerant (last wins for
            // reference resolution) but the collision is reported.
            tracing::warn!(duplicates, "duplicate persistent ids in document snapshot");
        }

        let mut dropped = 0usize;
        let scenes = data
            .scenes
            .into_iter()
            .map(|s| {
                let hidden = s
                    .hidden_entities
                    .iter()
                    .filter_map(|id| {
                        let resolved = by_id.get(id).cloned();
                        if resolved.is_none() {
                            dropped += 1;
                        }
                        resolved
                    })
                    .collect();
                Scene::with_hidden(s.name, hidden)
            })
            .collect();

        if dropped > 0 {
            tracing::warn!(dropped, "dropped unknown hidden-entity ids while loading document");
        }

        Self {
            version: data.version,
            name: data.name,
            components: data.components,
            entities,
            scenes,
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DocumentData::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = DocumentData::deserialize(deserializer)?;
        Ok(Document::from(data))
    }
}

impl Document {
    /// Create a new empty document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            components: Vec::new(),
            entities: Vec::new(),
            scenes: Vec::new(),
        }
    }

    /// Look up an entity by persistent identifier
    pub fn entity(&self, id: PersistentId) -> Option<&EntityRef> {
        self.entities.iter().find(|e| e.persistent_id() == id)
    }

    /// Save the document snapshot to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| DocumentError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize the document snapshot to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load a document snapshot from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| DocumentError::Io(e.to_string()))?;
        let document: Document =
            ron::from_str(&content).map_err(|e| DocumentError::Deserialize(e.to_string()))?;
        Ok(document)
    }

    /// Load a document snapshot from bytes
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, DocumentError> {
        let content =
            std::str::from_utf8(data).map_err(|e| DocumentError::Deserialize(e.to_string()))?;
        let document: Document =
            ron::from_str(content).map_err(|e| DocumentError::Deserialize(e.to_string()))?;
        Ok(document)
    }
}

/// Document snapshot errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edge;
    use glam::Vec3;

    fn sample_document() -> Document {
        let edge = Arc::new(Entity::Edge(Edge::new(
            PersistentId::new(11),
            Vec3::ZERO,
            Vec3::X,
        )));
        let mut document = Document::new("house");
        document.components.push(Component::new("Door", "guid-1"));
        document.entities.push(Arc::clone(&edge));
        document
            .scenes
            .push(Scene::with_hidden("Detail", vec![edge]));
        document
    }

    #[test]
    fn test_snapshot_round_trip_rebuilds_sharing() {
        let document = sample_document();
        let bytes = document.to_bytes().unwrap();
        let loaded = Document::load_from_bytes(&bytes).unwrap();

        assert_eq!(loaded.name, "house");
        assert_eq!(loaded.components.len(), 1);
        assert_eq!(loaded.entities.len(), 1);
        assert_eq!(loaded.scenes.len(), 1);

        // The scene reference must point at the document's entity, not a copy.
        assert!(Arc::ptr_eq(
            &loaded.entities[0],
            &loaded.scenes[0].hidden_entities[0]
        ));
        assert_eq!(
            loaded.scenes[0].hidden_ids(),
            vec![PersistentId::new(11)]
        );
    }

    #[test]
    fn test_empty_scene_round_trip() {
        let mut document = Document::new("empty");
        document.scenes.push(Scene::new("Overview"));

        let bytes = document.to_bytes().unwrap();
        let loaded = Document::load_from_bytes(&bytes).unwrap();
        assert_eq!(loaded.scenes.len(), 1);
        assert!(loaded.scenes[0].hidden_entities.is_empty());
    }

    #[test]
    fn test_unknown_hidden_id_dropped_on_load() {
        // Hand-built snapshot referencing an id that is not in the entity set.
        let data = DocumentData {
            version: 1,
            name: "broken".to_string(),
            components: Vec::new(),
            entities: Vec::new(),
            scenes: vec![SceneData {
                name: "Detail".to_string(),
                hidden_entities: vec![PersistentId::new(99)],
            }],
        };
        let document = Document::from(data);
        assert!(document.scenes[0].hidden_entities.is_empty());
    }

    #[test]
    fn test_duplicate_ids_in_snapshot_resolve_to_last_entity() {
        // Corrupt snapshot: two different edges under one persistent id.
        let data = DocumentData {
            version: 1,
            name: "corrupt".to_string(),
            components: Vec::new(),
            entities: vec![
                Entity::Edge(Edge::new(PersistentId::new(5), Vec3::ZERO, Vec3::X)),
                Entity::Edge(Edge::new(PersistentId::new(5), Vec3::Y, Vec3::Z)),
            ],
            scenes: vec![SceneData {
                name: "Detail".to_string(),
                hidden_entities: vec![PersistentId::new(5)],
            }],
        };
        let document = Document::from(data);

        // Both copies stay in the entity list; references resolve to the
        // later one.
        assert_eq!(document.entities.len(), 2);
        assert_eq!(document.scenes[0].hidden_entities.len(), 1);
        assert!(Arc::ptr_eq(
            &document.scenes[0].hidden_entities[0],
            &document.entities[1]
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        use tempfile::tempdir;

        let temp = tempdir().unwrap();
        let path = temp.path().join("house.skpd");

        let document = sample_document();
        document.save(&path).unwrap();
        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded, document);
    }
}
