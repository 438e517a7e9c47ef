//! Per-dot instance data

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::projector::DotRing;

/// One dot's model matrix, column-major (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DotInstance {
    pub model: [[f32; 4]; 4],
}

impl DotInstance {
    /// Floats per instance in the flat upload
    pub const FLOATS: usize = 16;

    pub fn from_mat4(m: &Mat4) -> Self {
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}

/// Snapshot every ring slot as instance data
pub fn ring_instances(ring: &DotRing) -> Vec<DotInstance> {
    ring.transforms().iter().map(DotInstance::from_mat4).collect()
}

/// Flat `f32` view of the ring, 16 floats per slot, for the host's thin-instance buffer
pub fn ring_floats(ring: &DotRing) -> Vec<f32> {
    bytemuck::cast_slice::<DotInstance, f32>(&ring_instances(ring)).to_vec()
}
