//! Billboard quad mesh

use bytemuck::{Pod, Zeroable};

/// Quad vertex: local position and UV for the round dot falloff
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DotVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl DotVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y, 0.0],
            uv: [u, v],
        }
    }
}

/// Two triangles, counter-clockwise seen from +Z
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Square of edge `size` in local XY, facing +Z
pub fn quad_vertices(size: f32) -> [DotVertex; 4] {
    let h = size.abs() * 0.5;
    [
        DotVertex::new(-h, -h, 0.0, 1.0),
        DotVertex::new(h, -h, 1.0, 1.0),
        DotVertex::new(h, h, 1.0, 0.0),
        DotVertex::new(-h, h, 0.0, 0.0),
    ]
}

/// Interleaved `x, y, z, u, v` per vertex
pub fn quad_floats(vertices: &[DotVertex]) -> Vec<f32> {
    bytemuck::cast_slice::<DotVertex, f32>(vertices).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_size_and_winding() {
        let v = quad_vertices(0.04);
        assert!((v[1].position[0] - v[0].position[0] - 0.04).abs() < 1e-6);
        assert!((v[3].position[1] - v[0].position[1] - 0.04).abs() < 1e-6);

        // Counter-clockwise: positive z of the cross product
        let [a, b, c] = [0, 1, 2].map(|i| glam::Vec3::from(v[QUAD_INDICES[i] as usize].position));
        assert!((b - a).cross(c - a).z > 0.0);
    }

    #[test]
    fn test_quad_floats_interleaved() {
        let floats = quad_floats(&quad_vertices(2.0));
        assert_eq!(floats.len(), 20);
        assert_eq!(&floats[..5], &[-1.0, -1.0, 0.0, 0.0, 1.0]);
    }
}
