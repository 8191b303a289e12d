//! In-memory kernel backend
//!
//! A self-contained document store implementing [`DocumentKernel`]. It
//! backs the projector tests and serves as a materialization target; it has
//! no file format, so `open_model`/`save_model` report unavailability.
//!
//! Handles issued by this backend are plain slot numbers. Persistent
//! identifiers are supplied by the caller when populating a model, standing
//! in for the identifiers a native kernel would assign.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;

use skp_model::{Curve, Edge, Instance, PersistentId, Surface};

use super::traits::{
    ContainerHandle, DefinitionHandle, DocumentKernel, EntityHandle, KernelError, KernelResult,
    ModelHandle, SceneHandle,
};

/// In-memory document kernel
#[derive(Default)]
pub struct MemoryKernel {
    store: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    next_handle: u64,
    models: HashMap<u64, ModelRecord>,
    definitions: HashMap<u64, DefinitionRecord>,
    containers: HashMap<u64, ContainerRecord>,
    scenes: HashMap<u64, SceneRecord>,
    /// Entity handle -> persistent identifier
    entities: HashMap<u64, PersistentId>,
}

struct ModelRecord {
    name: String,
    container: u64,
    definitions: Vec<u64>,
    scenes: Vec<u64>,
    /// Model-wide persistent-identifier lookup
    by_persistent_id: HashMap<PersistentId, u64>,
}

struct DefinitionRecord {
    name: String,
    guid: String,
    container: u64,
}

struct ContainerRecord {
    model: u64,
    surfaces: Vec<Surface>,
    edges: Vec<Edge>,
    curves: Vec<Curve>,
    instances: Vec<Instance>,
}

struct SceneRecord {
    name: String,
    hidden: Vec<u64>,
}

impl Store {
    fn alloc(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn new_container(&mut self, model: u64) -> u64 {
        let handle = self.alloc();
        self.containers.insert(
            handle,
            ContainerRecord {
                model,
                surfaces: Vec::new(),
                edges: Vec::new(),
                curves: Vec::new(),
                instances: Vec::new(),
            },
        );
        handle
    }

    fn model(&self, handle: ModelHandle) -> KernelResult<&ModelRecord> {
        self.models
            .get(&handle.0)
            .ok_or_else(|| KernelError::InvalidHandle(format!("unknown model {}", handle.0)))
    }

    fn container(&self, handle: ContainerHandle) -> KernelResult<&ContainerRecord> {
        self.containers
            .get(&handle.0)
            .ok_or_else(|| KernelError::InvalidHandle(format!("unknown container {}", handle.0)))
    }

    fn scene(&self, handle: SceneHandle) -> KernelResult<&SceneRecord> {
        self.scenes
            .get(&handle.0)
            .ok_or_else(|| KernelError::InvalidHandle(format!("unknown scene {}", handle.0)))
    }

    /// Register a new entity handle for `persistent_id` in the model owning
    /// `container`. A repeated identifier overwrites the model-wide lookup
    /// entry; the projection layer is responsible for flagging that as
    /// corruption.
    fn register_entity(&mut self, container: u64, persistent_id: PersistentId) -> KernelResult<u64> {
        let model = self
            .containers
            .get(&container)
            .ok_or_else(|| KernelError::InvalidHandle(format!("unknown container {container}")))?
            .model;
        let handle = self.alloc();
        self.entities.insert(handle, persistent_id);
        if let Some(record) = self.models.get_mut(&model) {
            record.by_persistent_id.insert(persistent_id, handle);
        }
        Ok(handle)
    }
}

impl MemoryKernel {
    /// Create a new empty kernel
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Population API ==========

    /// Set a model's name
    pub fn set_model_name(&self, model: ModelHandle, name: &str) -> KernelResult<()> {
        let mut store = self.store.write();
        store.model(model)?;
        if let Some(record) = store.models.get_mut(&model.0) {
            record.name = name.to_string();
        }
        Ok(())
    }

    /// Add a component definition to a model
    pub fn add_definition(
        &self,
        model: ModelHandle,
        name: &str,
        guid: &str,
    ) -> KernelResult<DefinitionHandle> {
        let mut store = self.store.write();
        store.model(model)?;
        let container = store.new_container(model.0);
        let handle = store.alloc();
        store.definitions.insert(
            handle,
            DefinitionRecord {
                name: name.to_string(),
                guid: guid.to_string(),
                container,
            },
        );
        if let Some(record) = store.models.get_mut(&model.0) {
            record.definitions.push(handle);
        }
        Ok(DefinitionHandle(handle))
    }

    /// Place a face in a container
    pub fn add_surface(
        &self,
        container: ContainerHandle,
        surface: Surface,
    ) -> KernelResult<EntityHandle> {
        let mut store = self.store.write();
        let handle = store.register_entity(container.0, surface.persistent_id)?;
        if let Some(record) = store.containers.get_mut(&container.0) {
            record.surfaces.push(surface);
        }
        Ok(EntityHandle(handle))
    }

    /// Place an edge in a container
    pub fn add_edge(&self, container: ContainerHandle, edge: Edge) -> KernelResult<EntityHandle> {
        let mut store = self.store.write();
        let handle = store.register_entity(container.0, edge.persistent_id)?;
        if let Some(record) = store.containers.get_mut(&container.0) {
            record.edges.push(edge);
        }
        Ok(EntityHandle(handle))
    }

    /// Place a curve in a container
    pub fn add_curve(
        &self,
        container: ContainerHandle,
        curve: Curve,
    ) -> KernelResult<EntityHandle> {
        let mut store = self.store.write();
        let handle = store.register_entity(container.0, curve.persistent_id)?;
        if let Some(record) = store.containers.get_mut(&container.0) {
            record.curves.push(curve);
        }
        Ok(EntityHandle(handle))
    }

    /// Place a component instance in a container
    pub fn add_instance(
        &self,
        container: ContainerHandle,
        instance: Instance,
    ) -> KernelResult<EntityHandle> {
        let mut store = self.store.write();
        let handle = store.register_entity(container.0, instance.persistent_id)?;
        if let Some(record) = store.containers.get_mut(&container.0) {
            record.instances.push(instance);
        }
        Ok(EntityHandle(handle))
    }

    /// Remove all geometry from a container (simulates native edits)
    pub fn clear_container(&self, container: ContainerHandle) -> KernelResult<()> {
        let mut store = self.store.write();
        store.container(container)?;
        if let Some(record) = store.containers.get_mut(&container.0) {
            record.surfaces.clear();
            record.edges.clear();
            record.curves.clear();
            record.instances.clear();
        }
        Ok(())
    }
}

impl DocumentKernel for MemoryKernel {
    fn name(&self) -> &str {
        "memory"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn open_model(&self, _path: &Path) -> KernelResult<ModelHandle> {
        Err(KernelError::NotAvailable(
            "memory kernel has no file backing".into(),
        ))
    }

    fn create_model(&self) -> KernelResult<ModelHandle> {
        let mut store = self.store.write();
        let model = store.alloc();
        let container = store.new_container(model);
        store.models.insert(
            model,
            ModelRecord {
                name: "Untitled".to_string(),
                container,
                definitions: Vec::new(),
                scenes: Vec::new(),
                by_persistent_id: HashMap::new(),
            },
        );
        Ok(ModelHandle(model))
    }

    fn save_model(&self, _model: ModelHandle, _path: &Path) -> KernelResult<()> {
        Err(KernelError::NotAvailable(
            "memory kernel has no file backing".into(),
        ))
    }

    fn close_model(&self, model: ModelHandle) -> KernelResult<()> {
        let mut store = self.store.write();
        let record = store
            .models
            .remove(&model.0)
            .ok_or_else(|| KernelError::InvalidHandle(format!("unknown model {}", model.0)))?;

        let mut containers = vec![record.container];
        for definition in &record.definitions {
            if let Some(def) = store.definitions.remove(definition) {
                containers.push(def.container);
            }
        }
        for container in containers {
            store.containers.remove(&container);
        }
        for scene in &record.scenes {
            store.scenes.remove(scene);
        }
        for entity in record.by_persistent_id.values() {
            store.entities.remove(entity);
        }
        Ok(())
    }

    fn model_name(&self, model: ModelHandle) -> KernelResult<String> {
        Ok(self.store.read().model(model)?.name.clone())
    }

    fn model_entities(&self, model: ModelHandle) -> KernelResult<ContainerHandle> {
        Ok(ContainerHandle(self.store.read().model(model)?.container))
    }

    fn model_definitions(&self, model: ModelHandle) -> KernelResult<Vec<DefinitionHandle>> {
        Ok(self
            .store
            .read()
            .model(model)?
            .definitions
            .iter()
            .map(|h| DefinitionHandle(*h))
            .collect())
    }

    fn model_scenes(&self, model: ModelHandle) -> KernelResult<Vec<SceneHandle>> {
        Ok(self
            .store
            .read()
            .model(model)?
            .scenes
            .iter()
            .map(|h| SceneHandle(*h))
            .collect())
    }

    fn definition_name(&self, definition: DefinitionHandle) -> KernelResult<String> {
        let store = self.store.read();
        let record = store.definitions.get(&definition.0).ok_or_else(|| {
            KernelError::InvalidHandle(format!("unknown definition {}", definition.0))
        })?;
        Ok(record.name.clone())
    }

    fn definition_guid(&self, definition: DefinitionHandle) -> KernelResult<String> {
        let store = self.store.read();
        let record = store.definitions.get(&definition.0).ok_or_else(|| {
            KernelError::InvalidHandle(format!("unknown definition {}", definition.0))
        })?;
        Ok(record.guid.clone())
    }

    fn definition_entities(&self, definition: DefinitionHandle) -> KernelResult<ContainerHandle> {
        let store = self.store.read();
        let record = store.definitions.get(&definition.0).ok_or_else(|| {
            KernelError::InvalidHandle(format!("unknown definition {}", definition.0))
        })?;
        Ok(ContainerHandle(record.container))
    }

    fn extract_surfaces(&self, container: ContainerHandle) -> KernelResult<Vec<Surface>> {
        Ok(self.store.read().container(container)?.surfaces.clone())
    }

    fn extract_edges(&self, container: ContainerHandle) -> KernelResult<Vec<Edge>> {
        Ok(self.store.read().container(container)?.edges.clone())
    }

    fn extract_curves(&self, container: ContainerHandle) -> KernelResult<Vec<Curve>> {
        Ok(self.store.read().container(container)?.curves.clone())
    }

    fn extract_instances(&self, container: ContainerHandle) -> KernelResult<Vec<Instance>> {
        Ok(self.store.read().container(container)?.instances.clone())
    }

    fn scene_name(&self, scene: SceneHandle) -> KernelResult<String> {
        Ok(self.store.read().scene(scene)?.name.clone())
    }

    fn scene_hidden_entities(&self, scene: SceneHandle) -> KernelResult<Vec<EntityHandle>> {
        Ok(self
            .store
            .read()
            .scene(scene)?
            .hidden
            .iter()
            .map(|h| EntityHandle(*h))
            .collect())
    }

    fn entity_persistent_id(&self, entity: EntityHandle) -> KernelResult<PersistentId> {
        self.store
            .read()
            .entities
            .get(&entity.0)
            .copied()
            .ok_or_else(|| KernelError::InvalidHandle(format!("unknown entity {}", entity.0)))
    }

    fn create_scene(&self, model: ModelHandle) -> KernelResult<SceneHandle> {
        let mut store = self.store.write();
        store.model(model)?;
        let handle = store.alloc();
        store.scenes.insert(
            handle,
            SceneRecord {
                name: String::new(),
                hidden: Vec::new(),
            },
        );
        if let Some(record) = store.models.get_mut(&model.0) {
            record.scenes.push(handle);
        }
        Ok(SceneHandle(handle))
    }

    fn set_scene_name(&self, scene: SceneHandle, name: &str) -> KernelResult<()> {
        let mut store = self.store.write();
        store.scene(scene)?;
        if let Some(record) = store.scenes.get_mut(&scene.0) {
            record.name = name.to_string();
        }
        Ok(())
    }

    fn resolve_by_persistent_ids(
        &self,
        model: ModelHandle,
        ids: &[PersistentId],
    ) -> KernelResult<Vec<Option<EntityHandle>>> {
        let store = self.store.read();
        let record = store.model(model)?;
        Ok(ids
            .iter()
            .map(|id| record.by_persistent_id.get(id).map(|h| EntityHandle(*h)))
            .collect())
    }

    fn hide_in_scene(&self, scene: SceneHandle, entity: EntityHandle) -> KernelResult<()> {
        let mut store = self.store.write();
        store.scene(scene)?;
        if !store.entities.contains_key(&entity.0) {
            return Err(KernelError::InvalidHandle(format!(
                "unknown entity {}",
                entity.0
            )));
        }
        if let Some(record) = store.scenes.get_mut(&scene.0) {
            record.hidden.push(entity.0);
        }
        Ok(())
    }
}
