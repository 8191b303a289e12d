//! Owned geometry value objects
//!
//! Produced by the kernel-side extractors and owned outright by their
//! parent component. Each value carries the persistent identifier the
//! kernel assigned to the native entity it was read from.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::id::PersistentId;

/// A planar face with one outer loop and any number of inner loops (holes)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Kernel-assigned identifier of the native face
    pub persistent_id: PersistentId,
    /// Vertices of the outer boundary, in loop order
    pub outer_loop: Vec<Vec3>,
    /// Vertices of each hole boundary, in loop order
    pub inner_loops: Vec<Vec<Vec3>>,
    /// Face normal
    pub normal: Vec3,
}

impl Surface {
    /// Create a surface without holes
    pub fn new(persistent_id: PersistentId, outer_loop: Vec<Vec3>, normal: Vec3) -> Self {
        Self {
            persistent_id,
            outer_loop,
            inner_loops: Vec::new(),
            normal,
        }
    }

    /// Number of vertices on the outer boundary
    pub fn vertex_count(&self) -> usize {
        self.outer_loop.len()
    }
}

/// A straight edge between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Kernel-assigned identifier of the native edge
    pub persistent_id: PersistentId,
    pub start: Vec3,
    pub end: Vec3,
    /// Smooth shading flag carried over from the native edge
    pub smooth: bool,
    /// Soft (coplanar-merge) flag carried over from the native edge
    pub soft: bool,
}

impl Edge {
    /// Create a hard edge
    pub fn new(persistent_id: PersistentId, start: Vec3, end: Vec3) -> Self {
        Self {
            persistent_id,
            start,
            end,
            smooth: false,
            soft: false,
        }
    }

    /// Length of the edge
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// A polyline curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Kernel-assigned identifier of the native curve
    pub persistent_id: PersistentId,
    /// Points along the curve, in order
    pub points: Vec<Vec3>,
}

impl Curve {
    /// Create a curve from ordered points
    pub fn new(persistent_id: PersistentId, points: Vec<Vec3>) -> Self {
        Self {
            persistent_id,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_length() {
        let edge = Edge::new(
            PersistentId::new(1),
            Vec3::ZERO,
            Vec3::new(3.0, 4.0, 0.0),
        );
        assert_eq!(edge.length(), 5.0);
        assert!(!edge.smooth);
        assert!(!edge.soft);
    }

    #[test]
    fn test_surface_without_holes() {
        let surface = Surface::new(
            PersistentId::new(2),
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            Vec3::Z,
        );
        assert_eq!(surface.vertex_count(), 3);
        assert!(surface.inner_loops.is_empty());
    }
}
