//! Independent Document Model
//!
//! This crate provides:
//! - Persistent identifiers (kernel-assigned, never invented here)
//! - Owned geometry value objects (surfaces, edges, curves)
//! - Addressable entities and shared entity references
//! - Components, scenes, and the whole-graph Document snapshot

pub mod component;
pub mod document;
pub mod entity;
pub mod geometry;
pub mod id;
pub mod scene;

// Re-exports for convenience
pub use component::Component;
pub use document::{Document, DocumentError};
pub use entity::{Entity, EntityKind, EntityRef, Instance};
pub use geometry::{Curve, Edge, Surface};
pub use id::PersistentId;
pub use scene::Scene;
