//! Forward projection: native graph -> independent document model
//!
//! The document projector owns the traversal order. It runs a strict
//! two-phase protocol: phase one walks the whole model (top-level
//! container, then every component definition) and registers every entity
//! into the identity index; only after the index is sealed does phase two
//! project scenes, whose hidden-entity references resolve against it.
//! Interleaving the phases would silently lose cross-references, which is
//! why resolution requires the sealed index type.

mod component;
mod scene;

use std::sync::Arc;

use skp_model::{Component, Document, Entity, PersistentId};

use crate::index::{DuplicateIdentity, IndexBuilder};
use crate::kernel::{ContainerHandle, DocumentKernel, KernelError, ModelHandle};

pub use component::project_component;
pub use scene::{SceneProjection, project_scene};

/// Errors that can occur during projection
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProjectError {
    /// A required native handle could not be obtained. Fatal to the single
    /// entity being projected; the document projector skips it and
    /// continues.
    #[error("native access failed: {0}")]
    Kernel(#[from] KernelError),

    /// The identity index is corrupted. Fatal to the whole pass: every
    /// cross-reference resolved afterwards would be unreliable.
    #[error("identity index corrupted: {0}")]
    DuplicateIdentity(#[from] DuplicateIdentity),
}

/// Counts and identifiers of everything the projector tolerated
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Definitions skipped because a native accessor failed
    pub skipped_definitions: usize,
    /// Scenes skipped because a native accessor failed
    pub skipped_scenes: usize,
    /// Hidden-entity references dropped because their identifier was not
    /// in the identity index
    pub unresolved_references: Vec<PersistentId>,
}

/// A projected document together with its diagnostics
#[derive(Debug, Clone)]
pub struct Projection {
    pub document: Document,
    pub diagnostics: Diagnostics,
}

/// Project a whole native model into an independent [`Document`].
///
/// Error policy: a `KernelError` on one definition or scene skips that
/// item (counted in [`Diagnostics`]) and the pass continues; a
/// [`DuplicateIdentity`] aborts the pass.
pub fn project_document(
    kernel: &dyn DocumentKernel,
    model: ModelHandle,
) -> Result<Projection, ProjectError> {
    let name = kernel.model_name(model)?;
    let mut builder = IndexBuilder::new();
    let mut diagnostics = Diagnostics::default();

    // Phase one: register every entity in the document.
    tracing::debug!(model = %name, "projection: registration phase");
    let top = kernel.model_entities(model)?;
    register_container(kernel, top, &mut builder)?;

    let mut components = Vec::new();
    for definition in kernel.model_definitions(model)? {
        match project_component(kernel, definition) {
            Ok(component) => {
                register_component(&component, &mut builder)?;
                components.push(component);
            }
            Err(ProjectError::Kernel(error)) => {
                tracing::warn!(%error, "skipping definition, native access failed");
                diagnostics.skipped_definitions += 1;
            }
            Err(error) => return Err(error),
        }
    }

    let index = builder.seal();

    // Phase two: resolve cross-references against the sealed index.
    tracing::debug!(entities = index.len(), "projection: resolution phase");
    let mut scenes = Vec::new();
    for scene_handle in kernel.model_scenes(model)? {
        match project_scene(kernel, scene_handle, &index) {
            Ok(SceneProjection { scene, unresolved }) => {
                diagnostics.unresolved_references.extend(unresolved);
                scenes.push(scene);
            }
            Err(ProjectError::Kernel(error)) => {
                tracing::warn!(%error, "skipping scene, native access failed");
                diagnostics.skipped_scenes += 1;
            }
            Err(error) => return Err(error),
        }
    }

    if !diagnostics.unresolved_references.is_empty() {
        tracing::warn!(
            dropped = diagnostics.unresolved_references.len(),
            "projection dropped unresolved hidden-entity references"
        );
    }

    let document = Document {
        version: 1,
        name,
        components,
        entities: index.entities().cloned().collect(),
        scenes,
    };
    Ok(Projection {
        document,
        diagnostics,
    })
}

/// Register everything reachable in a container
fn register_container(
    kernel: &dyn DocumentKernel,
    container: ContainerHandle,
    builder: &mut IndexBuilder,
) -> Result<(), ProjectError> {
    for surface in kernel.extract_surfaces(container)? {
        builder.register(Arc::new(Entity::Surface(surface)))?;
    }
    for edge in kernel.extract_edges(container)? {
        builder.register(Arc::new(Entity::Edge(edge)))?;
    }
    for curve in kernel.extract_curves(container)? {
        builder.register(Arc::new(Entity::Curve(curve)))?;
    }
    for instance in kernel.extract_instances(container)? {
        builder.register(Arc::new(Entity::Instance(instance)))?;
    }
    Ok(())
}

/// Register a component's owned geometry as shared entities.
///
/// The component keeps exclusive ownership of its collections; the index
/// holds separate shared values under the same persistent identifiers, so
/// scenes can reference what components own.
fn register_component(
    component: &Component,
    builder: &mut IndexBuilder,
) -> Result<(), DuplicateIdentity> {
    for surface in &component.surfaces {
        builder.register(Arc::new(Entity::Surface(surface.clone())))?;
    }
    for edge in &component.edges {
        builder.register(Arc::new(Entity::Edge(edge.clone())))?;
    }
    for curve in &component.curves {
        builder.register(Arc::new(Entity::Curve(curve.clone())))?;
    }
    Ok(())
}
