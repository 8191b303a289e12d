//! Identity index
//!
//! The per-document mapping from persistent identifier to the
//! already-constructed independent entity. Building and resolving are
//! separate phases: [`IndexBuilder`] only registers, and must be sealed
//! into an [`IdentityIndex`] before anything can resolve against it.
//! Resolving before the whole document is registered is a type error.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use thiserror::Error;

use skp_model::{EntityRef, PersistentId};

/// Two different entities were registered under the same persistent
/// identifier. Identifiers are unique per document, so this is a
/// corruption signal: every cross-reference resolved afterwards would be
/// unreliable, and the whole pass must stop.
#[derive(Debug, Clone, Error)]
#[error("duplicate persistent id {id} registered in identity index")]
pub struct DuplicateIdentity {
    pub id: PersistentId,
}

/// Registration phase of the identity index
#[derive(Debug, Default)]
pub struct IndexBuilder {
    by_id: HashMap<PersistentId, EntityRef>,
    /// Registration order, for deterministic document assembly
    order: Vec<EntityRef>,
}

impl IndexBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its persistent identifier.
    ///
    /// Never overwrites: a duplicate identifier fails with
    /// [`DuplicateIdentity`] and leaves the index unchanged.
    pub fn register(&mut self, entity: EntityRef) -> Result<(), DuplicateIdentity> {
        let id = entity.persistent_id();
        match self.by_id.entry(id) {
            Entry::Occupied(_) => Err(DuplicateIdentity { id }),
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&entity));
                self.order.push(entity);
                Ok(())
            }
        }
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// End the registration phase; the result only resolves
    pub fn seal(self) -> IdentityIndex {
        IdentityIndex {
            by_id: self.by_id,
            order: self.order,
        }
    }
}

/// Resolution phase of the identity index
#[derive(Debug)]
pub struct IdentityIndex {
    by_id: HashMap<PersistentId, EntityRef>,
    order: Vec<EntityRef>,
}

impl IdentityIndex {
    /// Resolve a persistent identifier.
    ///
    /// `None` means the referenced entity was not part of the projected
    /// entity set; callers skip such references rather than failing.
    pub fn resolve(&self, id: PersistentId) -> Option<&EntityRef> {
        self.by_id.get(&id)
    }

    /// Whether an identifier is registered
    pub fn contains(&self, id: PersistentId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All registered entities, in registration order
    pub fn entities(&self) -> impl Iterator<Item = &EntityRef> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use skp_model::{Edge, Entity};

    fn edge_entity(id: i64) -> EntityRef {
        Arc::new(Entity::Edge(Edge::new(
            PersistentId::new(id),
            Vec3::ZERO,
            Vec3::X,
        )))
    }

    #[test]
    fn test_register_and_resolve() {
        let mut builder = IndexBuilder::new();
        builder.register(edge_entity(1)).unwrap();
        builder.register(edge_entity(2)).unwrap();

        let index = builder.seal();
        assert_eq!(index.len(), 2);
        assert!(index.contains(PersistentId::new(1)));
        let resolved = index.resolve(PersistentId::new(2)).unwrap();
        assert_eq!(resolved.persistent_id(), PersistentId::new(2));
        assert!(index.resolve(PersistentId::new(3)).is_none());
    }

    #[test]
    fn test_duplicate_identity_is_rejected() {
        let mut builder = IndexBuilder::new();
        builder.register(edge_entity(7)).unwrap();

        let err = builder.register(edge_entity(7)).unwrap_err();
        assert_eq!(err.id, PersistentId::new(7));
        // The first registration survives untouched.
        assert_eq!(builder.len(), 1);
        let index = builder.seal();
        assert!(index.contains(PersistentId::new(7)));
    }

    #[test]
    fn test_entities_keep_registration_order() {
        let mut builder = IndexBuilder::new();
        builder.register(edge_entity(30)).unwrap();
        builder.register(edge_entity(10)).unwrap();
        builder.register(edge_entity(20)).unwrap();

        let index = builder.seal();
        let ids: Vec<i64> = index.entities().map(|e| e.persistent_id().raw()).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }
}
