//! Component definitions

use serde::{Deserialize, Serialize};

use crate::geometry::{Curve, Edge, Surface};

/// A component definition with its owned geometry.
///
/// A component owns its geometry outright; the geometry values have no
/// identity outside their parent. The collections are consistent snapshots
/// of the native state at projection time and never change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Kernel-assigned globally unique identifier text
    pub guid: String,
    pub surfaces: Vec<Surface>,
    pub curves: Vec<Curve>,
    pub edges: Vec<Edge>,
}

impl Component {
    /// Create a component with empty geometry
    pub fn new(name: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            guid: guid.into(),
            surfaces: Vec::new(),
            curves: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Total number of geometry values in this component
    pub fn geometry_count(&self) -> usize {
        self.surfaces.len() + self.curves.len() + self.edges.len()
    }
}
