//! Native Kernel Bridge
//!
//! This crate provides:
//! - A trait seam over the native CAD document kernel (opaque handles)
//! - The phase-gated identity index keyed by persistent identifier
//! - Forward projection: native graph -> independent document model
//! - Scene materialization: independent model -> native graph

pub mod index;
pub mod kernel;
pub mod materialize;
pub mod project;

// Re-exports for convenience
pub use index::{DuplicateIdentity, IdentityIndex, IndexBuilder};
pub use kernel::{
    ContainerHandle, DefinitionHandle, DocumentKernel, EntityHandle, KernelError, KernelResult,
    MemoryKernel, ModelHandle, NullKernel, SceneHandle, Session, default_kernel,
};
pub use materialize::{MaterializeError, MaterializedScene, materialize_scene};
pub use project::{
    Diagnostics, ProjectError, Projection, SceneProjection, project_component, project_document,
    project_scene,
};
