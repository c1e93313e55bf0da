//! Triangle meshes, materials and the scene instance list.

use std::sync::Arc;

use glam::{Mat4, Vec3};

/// A mesh vertex: position and normal in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// Non-indexed triangle list. Front faces wind counter-clockwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    /// Build from a flat triangle list. A trailing partial triangle is dropped.
    pub fn from_vertices(mut vertices: Vec<Vertex>) -> Self {
        let remainder = vertices.len() % 3;
        if remainder != 0 {
            log::warn!("dropping {remainder} trailing vertices from triangle list");
            vertices.truncate(vertices.len() - remainder);
        }
        Self { vertices }
    }

    /// Planar quad `a b c d` as two triangles, wound so its front face points along `normal`.
    pub fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3, normal: Vec3) -> Self {
        let winding = (b - a).cross(c - a).dot(normal);
        let corners = if winding >= 0.0 {
            [a, b, c, a, c, d]
        } else {
            [a, c, b, a, d, c]
        };
        Self {
            vertices: corners.iter().map(|&p| Vertex::new(p, normal)).collect(),
        }
    }

    /// Unit cube centred on the origin with outward-facing sides.
    pub fn cube() -> Self {
        let mut cube = Self::default();
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            for normal in [axis, -axis] {
                let u = normal.any_orthonormal_vector();
                let v = normal.cross(u);
                let centre = normal * 0.5;
                cube.append(Self::quad(
                    centre - u * 0.5 - v * 0.5,
                    centre + u * 0.5 - v * 0.5,
                    centre + u * 0.5 + v * 0.5,
                    centre - u * 0.5 + v * 0.5,
                    normal,
                ));
            }
        }
        cube
    }

    /// Move all of `other`'s triangles into this mesh.
    pub fn append(&mut self, mut other: Mesh) {
        self.vertices.append(&mut other.vertices);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Iterate triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// How a surface responds to light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    /// Diffuse surface seen through the fog.
    Lit {
        /// Linear RGB reflectance.
        albedo: Vec3,
    },
    /// Self-lit surface written as-is, e.g. the sky seen through the window.
    Emissive {
        /// Linear RGB output color.
        color: Vec3,
    },
}

/// One placed mesh. Every instance is opaque and casts shadows.
#[derive(Clone, Debug)]
pub struct MeshInstance {
    pub mesh: Arc<Mesh>,
    pub model: Mat4,
    pub material: Material,
}

/// Everything drawn in both passes of a frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    instances: Vec<MeshInstance>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh instance.
    pub fn push(&mut self, mesh: Arc<Mesh>, model: Mat4, material: Material) {
        self.instances.push(MeshInstance {
            mesh,
            model,
            material,
        });
    }

    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total triangles across all instances.
    pub fn triangle_count(&self) -> usize {
        self.instances
            .iter()
            .map(|inst| inst.mesh.triangle_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(tri: &[Vertex; 3]) -> Vec3 {
        (tri[1].position - tri[0].position)
            .cross(tri[2].position - tri[0].position)
            .normalize()
    }

    #[test]
    fn test_quad_winds_toward_normal() {
        // Same corners, opposite normals: both must face their normal.
        let a = Vec3::new(-2.0, 0.0, -2.0);
        let b = Vec3::new(2.0, 0.0, -2.0);
        let c = Vec3::new(2.0, 0.0, 2.0);
        let d = Vec3::new(-2.0, 0.0, 2.0);
        for normal in [Vec3::Y, Vec3::NEG_Y] {
            let quad = Mesh::quad(a, b, c, d, normal);
            assert_eq!(quad.triangle_count(), 2);
            for tri in quad.triangles() {
                assert!(face_normal(&tri).dot(normal) > 0.99);
            }
        }
    }

    #[test]
    fn test_cube_faces_point_outward() {
        let cube = Mesh::cube();
        assert_eq!(cube.triangle_count(), 12);
        for tri in cube.triangles() {
            let centroid = (tri[0].position + tri[1].position + tri[2].position) / 3.0;
            assert!(face_normal(&tri).dot(centroid) > 0.0);
            assert!((tri[0].normal - face_normal(&tri)).length() < 1e-5);
            for v in tri {
                assert!(v.position.abs().max_element() <= 0.5 + 1e-6);
            }
        }
    }

    #[test]
    fn test_partial_triangle_is_dropped() {
        let v = Vertex::new(Vec3::ZERO, Vec3::Y);
        let mesh = Mesh::from_vertices(vec![v; 7]);
        assert_eq!(mesh.vertices().len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_scene_counts() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        let cube = Arc::new(Mesh::cube());
        scene.push(
            cube.clone(),
            Mat4::IDENTITY,
            Material::Lit { albedo: Vec3::ONE },
        );
        scene.push(
            cube,
            Mat4::from_translation(Vec3::X),
            Material::Emissive { color: Vec3::ONE },
        );
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.triangle_count(), 24);
    }
}
