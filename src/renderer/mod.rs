//! GPU-facing dot data
//!
//! The host engine owns the draw pipeline; this module defines the instance
//! and mesh layouts it uploads.

pub mod instance;
pub mod material;
pub mod quad;

pub use instance::{DotInstance, ring_floats, ring_instances};
pub use material::DotMaterial;
pub use quad::{DotVertex, QUAD_INDICES, quad_floats, quad_vertices};
