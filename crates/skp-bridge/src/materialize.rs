//! Scene materialization: independent model -> native graph
//!
//! The reverse direction inverts the forward data flow: the scene's
//! entity references are flattened to a contiguous persistent-identifier
//! list, one batch lookup translates identifiers to native handles, and
//! the resolved drawing elements are marked hidden in a freshly created
//! native scene.

use skp_model::{PersistentId, Scene};

use crate::kernel::{DocumentKernel, KernelError, ModelHandle, SceneHandle};

/// Errors that can occur during materialization
#[derive(Debug, Clone, thiserror::Error)]
pub enum MaterializeError {
    #[error("native access failed: {0}")]
    Kernel(#[from] KernelError),
}

/// Result of materializing one scene
#[derive(Debug, Clone)]
pub struct MaterializedScene {
    /// The new native scene; ownership rests with the target model
    pub handle: SceneHandle,
    /// Identifiers the target model could not resolve, in list order.
    /// The corresponding entities are simply not hidden.
    pub dangling: Vec<PersistentId>,
}

/// Materialize an independent [`Scene`] into a native scene in `model`.
///
/// Every hidden-entity identifier absent from the target model is a
/// dangling reference: the independent model referenced an entity that
/// does not exist under the same identifier there. Dangling references
/// are tolerated but reported: the scene is still produced, with those
/// entities left visible.
pub fn materialize_scene(
    kernel: &dyn DocumentKernel,
    model: ModelHandle,
    scene: &Scene,
) -> Result<MaterializedScene, MaterializeError> {
    let handle = kernel.create_scene(model)?;
    kernel.set_scene_name(handle, &scene.name)?;

    let ids = scene.hidden_ids();
    let resolved = kernel.resolve_by_persistent_ids(model, &ids)?;

    let mut dangling = Vec::new();
    for (id, entity) in ids.iter().zip(resolved) {
        match entity {
            Some(entity) => kernel.hide_in_scene(handle, entity)?,
            None => {
                tracing::warn!(%id, scene = %scene.name, "dangling reference, entity missing from target model");
                dangling.push(*id);
            }
        }
    }

    Ok(MaterializedScene { handle, dangling })
}
