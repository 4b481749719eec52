use bytemuck::{Pod, Zeroable};
use glam::Vec3;

const GRID_COLOR: [f32; 4] = [0.35, 0.37, 0.40, 1.0];
const AXIS_X_COLOR: [f32; 4] = [0.75, 0.30, 0.30, 1.0];
const AXIS_Z_COLOR: [f32; 4] = [0.30, 0.45, 0.80, 1.0];
const MARKER_COLOR: [f32; 4] = [1.0, 0.85, 0.2, 1.0];

/// Lit triangle vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Unlit colored line vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// The cube a fitted model occupies: side 1, centered on the origin.
///
/// Faces wind counter-clockwise seen from outside.
pub(crate) fn unit_cube() -> (Vec<MeshVertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for axis in 0..3 {
        for sign in [1.0_f32, -1.0] {
            let n = Vec3::AXES[axis] * sign;
            let (mut u, mut v) = (Vec3::AXES[(axis + 1) % 3], Vec3::AXES[(axis + 2) % 3]);
            if sign < 0.0 {
                std::mem::swap(&mut u, &mut v);
            }

            let base = vertices.len() as u16;
            for corner in [-u - v, u - v, u + v, -u + v] {
                vertices.push(MeshVertex {
                    position: ((n + corner) * 0.5).to_array(),
                    normal: n.to_array(),
                });
            }
            indices.extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
        }
    }
    (vertices, indices)
}

/// Line list for a square floor grid at `height`, with the X and Z axes highlighted.
pub(crate) fn floor_grid(half_lines: i32, spacing: f32, height: f32) -> Vec<LineVertex> {
    let extent = half_lines as f32 * spacing;
    let mut lines = Vec::with_capacity((2 * half_lines as usize + 1) * 4);

    for i in -half_lines..=half_lines {
        let offset = i as f32 * spacing;
        let (along_x, along_z) = if i == 0 {
            (AXIS_X_COLOR, AXIS_Z_COLOR)
        } else {
            (GRID_COLOR, GRID_COLOR)
        };
        lines.push(LineVertex::new(Vec3::new(-extent, height, offset), along_x));
        lines.push(LineVertex::new(Vec3::new(extent, height, offset), along_x));
        lines.push(LineVertex::new(Vec3::new(offset, height, -extent), along_z));
        lines.push(LineVertex::new(Vec3::new(offset, height, extent), along_z));
    }
    lines
}

/// A small three-axis cross at the camera's look-at target.
pub(crate) fn target_marker(target: Vec3, size: f32) -> [LineVertex; 6] {
    let [x, y, z] = Vec3::AXES.map(|axis| axis * size * 0.5);
    [
        LineVertex::new(target - x, MARKER_COLOR),
        LineVertex::new(target + x, MARKER_COLOR),
        LineVertex::new(target - y, MARKER_COLOR),
        LineVertex::new(target + y, MARKER_COLOR),
        LineVertex::new(target - z, MARKER_COLOR),
        LineVertex::new(target + z, MARKER_COLOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_fits_unit_cube() {
        let (verts, indices) = unit_cube();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(verts.iter().flat_map(|v| v.position).all(|c| c.abs() == 0.5));
    }

    #[test]
    fn cube_faces_point_outward() {
        let (verts, indices) = unit_cube();
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(verts[tri[i] as usize].position));
            let normal = Vec3::from(verts[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
            assert!(a.dot(normal) > 0.0);
        }
    }

    #[test]
    fn grid_is_flat_with_axis_lines() {
        let lines = floor_grid(10, 0.25, -0.5);
        assert_eq!(lines.len(), 21 * 4);
        assert!(lines.iter().all(|v| v.position[1] == -0.5));
        assert_eq!(
            lines.iter().filter(|v| v.color == AXIS_X_COLOR).count(),
            2
        );
    }

    #[test]
    fn marker_centers_on_target() {
        let target = Vec3::new(0.43, 0.09, 0.09);
        let marker = target_marker(target, 0.1);
        for pair in marker.chunks(2) {
            let mid = (Vec3::from(pair[0].position) + Vec3::from(pair[1].position)) * 0.5;
            assert!((mid - target).length() < 1e-6);
        }
    }
}
