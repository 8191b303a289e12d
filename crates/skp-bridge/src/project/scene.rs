//! Scene projection

use std::sync::Arc;

use skp_model::{PersistentId, Scene};

use crate::index::IdentityIndex;
use crate::kernel::{DocumentKernel, SceneHandle};

use super::ProjectError;

/// Result of projecting one native scene
#[derive(Debug, Clone)]
pub struct SceneProjection {
    pub scene: Scene,
    /// Hidden-entity identifiers that were not in the identity index, in
    /// encounter order. These references were dropped from the scene.
    pub unresolved: Vec<PersistentId>,
}

/// Project one native scene into an independent [`Scene`].
///
/// Each hidden-entity handle is read for its persistent identifier and
/// resolved through the sealed `index`; hits are appended in scene order,
/// misses are dropped from the hidden set and reported in
/// [`SceneProjection::unresolved`]. A scene hiding nothing yields an empty
/// list, never an absent one.
///
/// The index must have been built over the document's full entity set.
/// The `IdentityIndex` type only exists sealed, so a caller cannot resolve
/// against a half-built registration pass.
pub fn project_scene(
    kernel: &dyn DocumentKernel,
    scene: SceneHandle,
    index: &IdentityIndex,
) -> Result<SceneProjection, ProjectError> {
    let name = kernel.scene_name(scene)?;
    let handles = kernel.scene_hidden_entities(scene)?;

    let mut hidden = Vec::with_capacity(handles.len());
    let mut unresolved = Vec::new();
    for handle in handles {
        let id = kernel.entity_persistent_id(handle)?;
        match index.resolve(id) {
            Some(entity) => hidden.push(Arc::clone(entity)),
            None => {
                tracing::warn!(%id, scene = %name, "hidden entity not in identity index, dropping reference");
                unresolved.push(id);
            }
        }
    }

    Ok(SceneProjection {
        scene: Scene::with_hidden(name, hidden),
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::kernel::MemoryKernel;
    use glam::Vec3;
    use skp_model::{Edge, Entity};

    fn edge(id: i64) -> Edge {
        Edge::new(PersistentId::new(id), Vec3::ZERO, Vec3::X)
    }

    #[test]
    fn test_project_scene_resolves_hidden_entities() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let container = kernel.model_entities(model).unwrap();
        let e1 = kernel.add_edge(container, edge(1)).unwrap();
        let e2 = kernel.add_edge(container, edge(2)).unwrap();

        let native_scene = kernel.create_scene(model).unwrap();
        kernel.set_scene_name(native_scene, "Detail").unwrap();
        kernel.hide_in_scene(native_scene, e2).unwrap();
        kernel.hide_in_scene(native_scene, e1).unwrap();

        let mut builder = IndexBuilder::new();
        builder.register(Arc::new(Entity::Edge(edge(1)))).unwrap();
        builder.register(Arc::new(Entity::Edge(edge(2)))).unwrap();
        let index = builder.seal();

        let projection = project_scene(&kernel, native_scene, &index).unwrap();
        assert_eq!(projection.scene.name, "Detail");
        assert!(projection.unresolved.is_empty());
        // Scene order, not registration order.
        assert_eq!(
            projection.scene.hidden_ids(),
            vec![PersistentId::new(2), PersistentId::new(1)]
        );
    }

    #[test]
    fn test_unresolved_reference_is_dropped_and_reported() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let container = kernel.model_entities(model).unwrap();
        let e1 = kernel.add_edge(container, edge(1)).unwrap();
        let e2 = kernel.add_edge(container, edge(2)).unwrap();

        let native_scene = kernel.create_scene(model).unwrap();
        kernel.hide_in_scene(native_scene, e1).unwrap();
        kernel.hide_in_scene(native_scene, e2).unwrap();

        // Index only knows about edge 1.
        let mut builder = IndexBuilder::new();
        builder.register(Arc::new(Entity::Edge(edge(1)))).unwrap();
        let index = builder.seal();

        let projection = project_scene(&kernel, native_scene, &index).unwrap();
        assert_eq!(projection.scene.hidden_ids(), vec![PersistentId::new(1)]);
        assert_eq!(projection.unresolved, vec![PersistentId::new(2)]);
    }

    #[test]
    fn test_scene_without_hidden_entities() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let native_scene = kernel.create_scene(model).unwrap();
        kernel.set_scene_name(native_scene, "Overview").unwrap();

        let index = IndexBuilder::new().seal();
        let projection = project_scene(&kernel, native_scene, &index).unwrap();
        assert_eq!(projection.scene.name, "Overview");
        assert!(projection.scene.hidden_entities.is_empty());
        assert!(projection.unresolved.is_empty());
    }

    #[test]
    fn test_resolved_reference_shares_the_indexed_entity() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let container = kernel.model_entities(model).unwrap();
        let e1 = kernel.add_edge(container, edge(1)).unwrap();
        let native_scene = kernel.create_scene(model).unwrap();
        kernel.hide_in_scene(native_scene, e1).unwrap();

        let registered = Arc::new(Entity::Edge(edge(1)));
        let mut builder = IndexBuilder::new();
        builder.register(Arc::clone(&registered)).unwrap();
        let index = builder.seal();

        let projection = project_scene(&kernel, native_scene, &index).unwrap();
        assert!(Arc::ptr_eq(
            &projection.scene.hidden_entities[0],
            &registered
        ));
    }
}
