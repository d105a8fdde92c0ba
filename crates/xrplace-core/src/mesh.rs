//! Mesh generators for shapes Bevy has no primitive for.
//!
//! Provides the torus-knot figure and the flat reticle ring. Both produce
//! indexed triangle-list meshes with positions, normals, and UVs.

use bevy::mesh::{Indices, Mesh, PrimitiveTopology};
use bevy::prelude::*;

/// Builds a (p, q) torus-knot tube mesh.
///
/// `radius` is the knot's overall radius, `tube` the tube radius;
/// `tubular_segments` subdivides the curve, `radial_segments` the tube
/// cross-section.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> Mesh {
    let vertex_count = ((tubular_segments + 1) * (radial_segments + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity((tubular_segments * radial_segments * 6) as usize);

    #[allow(clippy::cast_precision_loss)]
    let (p_f, q_f) = (p as f32, q as f32);

    // Point on the knot's center curve at parameter u.
    let curve_point = |u: f32| -> Vec3 {
        let qu_over_p = q_f / p_f * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * qu_over_p.sin() * 0.5,
        )
    };

    #[allow(clippy::cast_precision_loss)]
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p_f * std::f32::consts::TAU;

        // Frenet-like frame from two nearby curve points.
        let p1 = curve_point(u);
        let p2 = curve_point(u + 0.01);
        let tangent = p2 - p1;
        let mut normal = p2 + p1;
        let binormal = tangent.cross(normal).normalize();
        normal = binormal.cross(tangent).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let pos = p1 + cx * normal + cy * binormal;
            positions.push([pos.x, pos.y, pos.z]);
            let n = (pos - p1).normalize();
            normals.push([n.x, n.y, n.z]);
            uvs.push([
                i as f32 / tubular_segments as f32,
                j as f32 / radial_segments as f32,
            ]);
        }
    }

    for i in 1..=tubular_segments {
        for j in 1..=radial_segments {
            let a = (radial_segments + 1) * (i - 1) + (j - 1);
            let b = (radial_segments + 1) * i + (j - 1);
            let c = (radial_segments + 1) * i + j;
            let d = (radial_segments + 1) * (i - 1) + j;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Builds a flat ring (annulus) lying in the XZ plane, facing +Y.
///
/// Used for the reticle: the hit-test pose orients it flush with the
/// detected surface.
pub fn flat_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Mesh {
    let vertex_count = ((segments + 1) * 2) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(segments as usize * 6);

    #[allow(clippy::cast_precision_loss)]
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
        let (sin, cos) = theta.sin_cos();

        positions.push([inner_radius * cos, 0.0, inner_radius * sin]);
        positions.push([outer_radius * cos, 0.0, outer_radius * sin]);
        normals.push([0.0, 1.0, 0.0]);
        normals.push([0.0, 1.0, 0.0]);
        let u = i as f32 / segments as f32;
        uvs.push([u, 0.0]);
        uvs.push([u, 1.0]);
    }

    for i in 0..segments {
        let a = i * 2;
        // Wound so the face is visible from +Y.
        indices.extend_from_slice(&[a, a + 1, a + 2, a + 2, a + 1, a + 3]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn positions_of(mesh: &Mesh) -> &Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => values,
            _ => panic!("missing position attribute"),
        }
    }

    fn indices_of(mesh: &Mesh) -> &Vec<u32> {
        match mesh.indices() {
            Some(Indices::U32(values)) => values,
            _ => panic!("missing u32 indices"),
        }
    }

    #[test]
    fn torus_knot_counts() {
        let mesh = torus_knot(0.3, 0.1, 100, 16, 2, 3);
        assert_eq!(positions_of(&mesh).len(), 101 * 17);
        assert_eq!(indices_of(&mesh).len(), 100 * 16 * 6);
    }

    #[test]
    fn torus_knot_indices_in_range() {
        let mesh = torus_knot(0.3, 0.1, 20, 8, 2, 3);
        let vertex_count = positions_of(&mesh).len() as u32;
        assert!(indices_of(&mesh).iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn torus_knot_normals_are_unit_length() {
        let mesh = torus_knot(0.3, 0.1, 20, 8, 2, 3);
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("missing normal attribute");
        };
        for n in normals {
            let len = Vec3::from_array(*n).length();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn flat_ring_lies_in_xz_plane() {
        let mesh = flat_ring(0.15, 0.2, 32);
        for p in positions_of(&mesh) {
            assert_eq!(p[1], 0.0);
        }
    }

    #[test]
    fn flat_ring_radii_respected() {
        let mesh = flat_ring(0.15, 0.2, 32);
        for p in positions_of(&mesh) {
            let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
            assert!(r > 0.15 - 1e-4 && r < 0.2 + 1e-4);
        }
    }
}
