use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

pub struct TorusMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Torus around the Y axis.
///
/// `u` runs once around the ring and `v` once around the tube, so a texture
/// sampled with these coordinates covers the surface exactly once and its
/// opposite edges meet at the seams.
pub fn torus(major_radius: f32, minor_radius: f32, major_segments: u32, minor_segments: u32) -> TorusMesh {
    let major_segments = major_segments.max(3);
    let minor_segments = minor_segments.max(3);
    let stride = minor_segments + 1;

    let mut vertices = Vec::with_capacity(((major_segments + 1) * stride) as usize);
    for i in 0..=major_segments {
        let u = i as f32 / major_segments as f32;
        let (sin_major, cos_major) = (TAU * u).sin_cos();

        for j in 0..=minor_segments {
            let v = j as f32 / minor_segments as f32;
            let (sin_minor, cos_minor) = (TAU * v).sin_cos();

            let ring = major_radius + minor_radius * cos_minor;
            vertices.push(MeshVertex {
                position: [ring * cos_major, minor_radius * sin_minor, ring * sin_major],
                normal: [cos_minor * cos_major, sin_minor, cos_minor * sin_major],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((major_segments * minor_segments * 6) as usize);
    for i in 0..major_segments {
        for j in 0..minor_segments {
            let i0 = i * stride + j;
            let i1 = i0 + 1;
            let i2 = i0 + stride;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i3, i0, i3, i1]);
        }
    }

    TorusMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mesh = torus(6.0, 2.4, 72, 72);
        assert_eq!(mesh.vertices.len(), 73 * 73);
        assert_eq!(mesh.indices.len(), 72 * 72 * 6);
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn segments_have_a_floor() {
        let mesh = torus(1.0, 0.25, 0, 1);
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.indices.len(), 3 * 3 * 6);
    }

    #[test]
    fn vertices_lie_on_the_surface() {
        let (major, minor) = (6.0f32, 2.4f32);
        for vertex in torus(major, minor, 16, 12).vertices {
            let [x, y, z] = vertex.position;
            let from_ring = (x * x + z * z).sqrt() - major;
            let distance = (from_ring * from_ring + y * y).sqrt();
            assert!((distance - minor).abs() < 1e-4);

            let [nx, ny, nz] = vertex.normal;
            assert!(((nx * nx + ny * ny + nz * nz).sqrt() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn uvs_span_the_unit_square() {
        let mesh = torus(6.0, 2.4, 8, 8);
        let first = mesh.vertices.first().unwrap().uv;
        let last = mesh.vertices.last().unwrap().uv;
        assert_eq!(first, [0.0, 0.0]);
        assert_eq!(last, [1.0, 1.0]);
    }

    #[test]
    fn seam_vertices_coincide() {
        let mesh = torus(6.0, 2.4, 8, 8);
        let stride = 9;
        for j in 0..stride {
            let start = mesh.vertices[j].position;
            let end = mesh.vertices[8 * stride + j].position;
            for axis in 0..3 {
                assert!((start[axis] - end[axis]).abs() < 1e-4);
            }
        }
    }
}
