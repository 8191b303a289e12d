//! Component projection

use skp_model::Component;

use crate::kernel::{DefinitionHandle, DocumentKernel};

use super::ProjectError;

/// Project one native component definition into an owned [`Component`].
///
/// Reads the definition's name and guid, then runs the three geometry
/// extractors on its entity container. A definition with no faces, curves,
/// or edges is valid and yields empty collections. The result is a
/// consistent snapshot: later native mutation does not change it.
///
/// The component itself is never registered in the identity index; only
/// entities reached through containers are cross-referenced by persistent
/// identifier.
pub fn project_component(
    kernel: &dyn DocumentKernel,
    definition: DefinitionHandle,
) -> Result<Component, ProjectError> {
    let name = kernel.definition_name(definition)?;
    let guid = kernel.definition_guid(definition)?;
    let container = kernel.definition_entities(definition)?;

    let surfaces = kernel.extract_surfaces(container)?;
    let curves = kernel.extract_curves(container)?;
    let edges = kernel.extract_edges(container)?;

    Ok(Component {
        name,
        guid,
        surfaces,
        curves,
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{KernelError, MemoryKernel, NullKernel};
    use glam::Vec3;
    use skp_model::{Edge, PersistentId, Surface};

    fn triangle(id: i64) -> Surface {
        Surface::new(
            PersistentId::new(id),
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            Vec3::Z,
        )
    }

    #[test]
    fn test_project_component_counts() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let definition = kernel.add_definition(model, "Door", "guid-1").unwrap();
        let container = kernel.definition_entities(definition).unwrap();
        kernel.add_surface(container, triangle(1)).unwrap();
        kernel.add_surface(container, triangle(2)).unwrap();
        kernel
            .add_edge(
                container,
                Edge::new(PersistentId::new(3), Vec3::ZERO, Vec3::X),
            )
            .unwrap();

        let component = project_component(&kernel, definition).unwrap();
        assert_eq!(component.name, "Door");
        assert_eq!(component.guid, "guid-1");
        assert_eq!(component.surfaces.len(), 2);
        assert_eq!(component.curves.len(), 0);
        assert_eq!(component.edges.len(), 1);
    }

    #[test]
    fn test_empty_definition_yields_empty_collections() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let definition = kernel.add_definition(model, "Marker", "guid-2").unwrap();

        let component = project_component(&kernel, definition).unwrap();
        assert!(component.surfaces.is_empty());
        assert!(component.curves.is_empty());
        assert!(component.edges.is_empty());
    }

    #[test]
    fn test_component_is_a_snapshot() {
        let kernel = MemoryKernel::new();
        let model = kernel.create_model().unwrap();
        let definition = kernel.add_definition(model, "Door", "guid-1").unwrap();
        let container = kernel.definition_entities(definition).unwrap();
        kernel.add_surface(container, triangle(1)).unwrap();

        let component = project_component(&kernel, definition).unwrap();
        kernel.clear_container(container).unwrap();

        assert_eq!(component.surfaces.len(), 1);
        assert_eq!(component.surfaces[0].persistent_id, PersistentId::new(1));
    }

    #[test]
    fn test_unreachable_container_fails() {
        let kernel = NullKernel;
        let result = project_component(&kernel, DefinitionHandle(1));
        assert!(matches!(
            result,
            Err(ProjectError::Kernel(KernelError::NotAvailable(_)))
        ));
    }
}
