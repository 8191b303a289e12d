//! Document kernel trait definitions
//!
//! These traits define the interface the native CAD kernel must offer.
//! All handles are opaque tokens: they are meaningful only to the kernel
//! that issued them, carry no ownership, and are ephemeral. The only
//! stable way to refer to an entity across representations is its
//! persistent identifier.

use std::path::Path;

use thiserror::Error;

use skp_model::{Curve, Edge, Instance, PersistentId, Surface};

/// Opaque token for a loaded native model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(pub u64);

/// Opaque token for a native component definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefinitionHandle(pub u64);

/// Opaque token for a native entity container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerHandle(pub u64);

/// Opaque token for a native scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Opaque token for a single native entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// Error type for kernel operations
#[derive(Debug, Clone, Error)]
pub enum KernelError {
    #[error("Kernel not available: {0}")]
    NotAvailable(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Native access failed: {0}")]
    NativeAccess(String),
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

/// The native document kernel trait
///
/// Implementations wrap a concrete backend (the native SDK, or the
/// in-memory backend used for tests and as a materialization target).
/// All operations take `&self`; backends that mutate state use interior
/// mutability, matching the FFI surface of a native SDK.
pub trait DocumentKernel: Send + Sync {
    /// Get the name of this kernel backend
    fn name(&self) -> &str;

    /// Check if the backend is available
    fn is_available(&self) -> bool;

    /// Initialize process-wide kernel state.
    ///
    /// Must be called once before any document operation; paired with
    /// [`shutdown`](Self::shutdown). Backends without process-wide state
    /// keep the default no-op.
    fn startup(&self) -> KernelResult<()> {
        Ok(())
    }

    /// Tear down process-wide kernel state
    fn shutdown(&self) -> KernelResult<()> {
        Ok(())
    }

    // ========== Model Lifecycle ==========

    /// Open a native model from a file
    fn open_model(&self, path: &Path) -> KernelResult<ModelHandle>;

    /// Create a new empty native model (target for materialization)
    fn create_model(&self) -> KernelResult<ModelHandle>;

    /// Save a native model to a file
    fn save_model(&self, model: ModelHandle, path: &Path) -> KernelResult<()>;

    /// Release a native model and everything reached through it.
    /// All handles issued for the model become invalid.
    fn close_model(&self, model: ModelHandle) -> KernelResult<()>;

    // ========== Model Access ==========

    /// Get the model name
    fn model_name(&self, model: ModelHandle) -> KernelResult<String>;

    /// Get the model's top-level entity container
    fn model_entities(&self, model: ModelHandle) -> KernelResult<ContainerHandle>;

    /// Get all component definitions in the model
    fn model_definitions(&self, model: ModelHandle) -> KernelResult<Vec<DefinitionHandle>>;

    /// Get all scenes in the model
    fn model_scenes(&self, model: ModelHandle) -> KernelResult<Vec<SceneHandle>>;

    // ========== Component Definition Access ==========

    /// Get a definition's name
    fn definition_name(&self, definition: DefinitionHandle) -> KernelResult<String>;

    /// Get a definition's kernel-assigned guid text
    fn definition_guid(&self, definition: DefinitionHandle) -> KernelResult<String>;

    /// Get a definition's entity container
    fn definition_entities(&self, definition: DefinitionHandle) -> KernelResult<ContainerHandle>;

    // ========== Geometry Extractors ==========
    //
    // Idempotent reads: repeated calls on an unmodified container return
    // identical sequences. Empty containers yield empty sequences.

    /// Extract all faces in a container as owned surface values
    fn extract_surfaces(&self, container: ContainerHandle) -> KernelResult<Vec<Surface>>;

    /// Extract all edges in a container as owned edge values
    fn extract_edges(&self, container: ContainerHandle) -> KernelResult<Vec<Edge>>;

    /// Extract all curves in a container as owned curve values
    fn extract_curves(&self, container: ContainerHandle) -> KernelResult<Vec<Curve>>;

    /// Extract all component instances placed in a container
    fn extract_instances(&self, container: ContainerHandle) -> KernelResult<Vec<Instance>>;

    // ========== Scene Read ==========

    /// Get a scene's name
    fn scene_name(&self, scene: SceneHandle) -> KernelResult<String>;

    /// Get the handles of all entities hidden in a scene, in scene order
    fn scene_hidden_entities(&self, scene: SceneHandle) -> KernelResult<Vec<EntityHandle>>;

    /// Read an entity's persistent identifier
    fn entity_persistent_id(&self, entity: EntityHandle) -> KernelResult<PersistentId>;

    // ========== Scene Write ==========

    /// Create a new scene in a model; ownership of the returned handle
    /// rests with the model
    fn create_scene(&self, model: ModelHandle) -> KernelResult<SceneHandle>;

    /// Set a scene's name
    fn set_scene_name(&self, scene: SceneHandle, name: &str) -> KernelResult<()>;

    /// Batch-resolve persistent identifiers to entity handles.
    ///
    /// The output is parallel to `ids` (equal length, same order, no
    /// ordering requirement on the input); identifiers not present in the
    /// model resolve to `None`.
    fn resolve_by_persistent_ids(
        &self,
        model: ModelHandle,
        ids: &[PersistentId],
    ) -> KernelResult<Vec<Option<EntityHandle>>>;

    /// Mark a drawing element hidden in a scene
    fn hide_in_scene(&self, scene: SceneHandle, entity: EntityHandle) -> KernelResult<()>;
}

/// A null kernel that always returns errors (used when no backend is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl NullKernel {
    fn unavailable<T>() -> KernelResult<T> {
        Err(KernelError::NotAvailable(
            "No document kernel available".into(),
        ))
    }
}

impl DocumentKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn open_model(&self, _path: &Path) -> KernelResult<ModelHandle> {
        Self::unavailable()
    }

    fn create_model(&self) -> KernelResult<ModelHandle> {
        Self::unavailable()
    }

    fn save_model(&self, _model: ModelHandle, _path: &Path) -> KernelResult<()> {
        Self::unavailable()
    }

    fn close_model(&self, _model: ModelHandle) -> KernelResult<()> {
        Self::unavailable()
    }

    fn model_name(&self, _model: ModelHandle) -> KernelResult<String> {
        Self::unavailable()
    }

    fn model_entities(&self, _model: ModelHandle) -> KernelResult<ContainerHandle> {
        Self::unavailable()
    }

    fn model_definitions(&self, _model: ModelHandle) -> KernelResult<Vec<DefinitionHandle>> {
        Self::unavailable()
    }

    fn model_scenes(&self, _model: ModelHandle) -> KernelResult<Vec<SceneHandle>> {
        Self::unavailable()
    }

    fn definition_name(&self, _definition: DefinitionHandle) -> KernelResult<String> {
        Self::unavailable()
    }

    fn definition_guid(&self, _definition: DefinitionHandle) -> KernelResult<String> {
        Self::unavailable()
    }

    fn definition_entities(&self, _definition: DefinitionHandle) -> KernelResult<ContainerHandle> {
        Self::unavailable()
    }

    fn extract_surfaces(&self, _container: ContainerHandle) -> KernelResult<Vec<Surface>> {
        Self::unavailable()
    }

    fn extract_edges(&self, _container: ContainerHandle) -> KernelResult<Vec<Edge>> {
        Self::unavailable()
    }

    fn extract_curves(&self, _container: ContainerHandle) -> KernelResult<Vec<Curve>> {
        Self::unavailable()
    }

    fn extract_instances(&self, _container: ContainerHandle) -> KernelResult<Vec<Instance>> {
        Self::unavailable()
    }

    fn scene_name(&self, _scene: SceneHandle) -> KernelResult<String> {
        Self::unavailable()
    }

    fn scene_hidden_entities(&self, _scene: SceneHandle) -> KernelResult<Vec<EntityHandle>> {
        Self::unavailable()
    }

    fn entity_persistent_id(&self, _entity: EntityHandle) -> KernelResult<PersistentId> {
        Self::unavailable()
    }

    fn create_scene(&self, _model: ModelHandle) -> KernelResult<SceneHandle> {
        Self::unavailable()
    }

    fn set_scene_name(&self, _scene: SceneHandle, _name: &str) -> KernelResult<()> {
        Self::unavailable()
    }

    fn resolve_by_persistent_ids(
        &self,
        _model: ModelHandle,
        _ids: &[PersistentId],
    ) -> KernelResult<Vec<Option<EntityHandle>>> {
        Self::unavailable()
    }

    fn hide_in_scene(&self, _scene: SceneHandle, _entity: EntityHandle) -> KernelResult<()> {
        Self::unavailable()
    }
}
