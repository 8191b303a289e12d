//! Addressable entities and shared entity references

use std::sync::Arc;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::geometry::{Curve, Edge, Surface};
use crate::id::PersistentId;

/// A shared reference to an entity.
///
/// Reference-holding fields (a scene's hidden set, the identity index)
/// store these instead of owning the entity; the referent lives as long as
/// the document that produced it.
pub type EntityRef = Arc<Entity>;

/// Anything addressable in the document graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Surface(Surface),
    Edge(Edge),
    Curve(Curve),
    Instance(Instance),
}

impl Entity {
    /// Kernel-assigned identifier of this entity
    pub fn persistent_id(&self) -> PersistentId {
        match self {
            Entity::Surface(s) => s.persistent_id,
            Entity::Edge(e) => e.persistent_id,
            Entity::Curve(c) => c.persistent_id,
            Entity::Instance(i) => i.persistent_id,
        }
    }

    /// Discriminant of this entity
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Surface(_) => EntityKind::Surface,
            Entity::Edge(_) => EntityKind::Edge,
            Entity::Curve(_) => EntityKind::Curve,
            Entity::Instance(_) => EntityKind::Instance,
        }
    }
}

/// Entity discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Surface,
    Edge,
    Curve,
    Instance,
}

impl EntityKind {
    /// Human-readable kind name
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Surface => "Surface",
            EntityKind::Edge => "Edge",
            EntityKind::Curve => "Curve",
            EntityKind::Instance => "Instance",
        }
    }
}

/// A placed instance of a component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Kernel-assigned identifier of the native instance
    pub persistent_id: PersistentId,
    pub name: String,
    /// Guid of the component definition this instance places
    pub definition_guid: String,
    /// Placement transform in document space
    pub transform: Mat4,
}

impl Instance {
    /// Create an instance with an identity placement
    pub fn new(
        persistent_id: PersistentId,
        name: impl Into<String>,
        definition_guid: impl Into<String>,
    ) -> Self {
        Self {
            persistent_id,
            name: name.into(),
            definition_guid: definition_guid.into(),
            transform: Mat4::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_entity_persistent_id_dispatch() {
        let edge = Entity::Edge(Edge::new(PersistentId::new(7), Vec3::ZERO, Vec3::X));
        assert_eq!(edge.persistent_id(), PersistentId::new(7));
        assert_eq!(edge.kind(), EntityKind::Edge);

        let instance = Entity::Instance(Instance::new(PersistentId::new(9), "door", "guid-1"));
        assert_eq!(instance.persistent_id(), PersistentId::new(9));
        assert_eq!(instance.kind().name(), "Instance");
    }
}
