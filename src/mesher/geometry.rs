//! Mesh geometry types.

use glam::{Mat4, Vec3};

/// A vertex in a page mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in page space (spine along the Y axis at x = 0).
    pub position: [f32; 3],
    /// Normal vector.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        }
    }
}

/// A triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,
    /// Triangle indices (3 per triangle).
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a flat page grid in the XY plane facing +Z.
    ///
    /// The spine runs along x = 0 and the free edge along x = `width`; Y is
    /// centered on the page. Vertices are laid out row by row, `width_segments + 1`
    /// per row, bottom row first.
    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        let columns = width_segments.max(1);
        let rows = height_segments.max(1);
        let stride = columns + 1;

        let mut mesh = Mesh {
            vertices: Vec::with_capacity((columns as usize + 1) * (rows as usize + 1)),
            indices: Vec::with_capacity(columns as usize * rows as usize * 6),
        };

        for row in 0..=rows {
            let v = row as f32 / rows as f32;
            let y = (v - 0.5) * height;
            for column in 0..=columns {
                let u = column as f32 / columns as f32;
                mesh.add_vertex(Vertex::new([u * width, y, 0.0], [0.0, 0.0, 1.0], [u, v]));
            }
        }

        for row in 0..rows {
            for column in 0..columns {
                let p00 = row * stride + column;
                let p10 = p00 + 1;
                let p01 = p00 + stride;
                let p11 = p01 + 1;
                mesh.add_quad(p00, p01, p11, p10);
            }
        }

        mesh
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle by vertex indices.
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Add a quad (two triangles) by vertex indices.
    /// Vertices are provided clockwise around the quad. Triangles are wound CCW for front-facing.
    pub fn add_quad(&mut self, i0: u32, i1: u32, i2: u32, i3: u32) {
        self.add_triangle(i0, i2, i1);
        self.add_triangle(i0, i3, i2);
    }

    /// Reverse the winding of every triangle and negate normals, turning a
    /// front-facing sheet into a back-facing one.
    pub fn flip_winding(&mut self) {
        for triangle in self.indices.chunks_exact_mut(3) {
            triangle.swap(1, 2);
        }
        for vertex in &mut self.vertices {
            vertex.normal = [-vertex.normal[0], -vertex.normal[1], -vertex.normal[2]];
        }
    }

    /// Recompute smooth vertex normals from the current positions.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh more.
    /// A vertex whose accumulated normal vanishes keeps its previous normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.vertices.len()];

        for triangle in self.indices.chunks_exact(3) {
            let (a, b, c) = (triangle[0] as usize, triangle[1] as usize, triangle[2] as usize);
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            let face = (pb - pa).cross(pc - pa);
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            if let Some(n) = normal.try_normalize() {
                vertex.normal = n.to_array();
            }
        }
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&other.vertices);

        for index in &other.indices {
            self.indices.push(index + offset);
        }
    }

    /// Apply an affine transform to positions and normals.
    pub fn transform(&mut self, matrix: &Mat4) {
        for vertex in &mut self.vertices {
            vertex.position = matrix.transform_point3(Vec3::from(vertex.position)).to_array();
            let normal = matrix.transform_vector3(Vec3::from(vertex.normal));
            vertex.normal = normal.normalize_or_zero().to_array();
        }
    }

    /// Get positions as a flat array.
    pub fn positions_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.position).collect()
    }

    /// Get normals as a flat array.
    pub fn normals_flat(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.normal).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_mesh_quad() {
        let mut mesh = Mesh::new();

        let v0 = mesh.add_vertex(Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]));
        let v1 = mesh.add_vertex(Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]));
        let v2 = mesh.add_vertex(Vertex::new([1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0]));
        let v3 = mesh.add_vertex(Vertex::new([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0]));

        mesh.add_quad(v0, v1, v2, v3);

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 2, 1, 0, 3, 2]);
    }

    #[test]
    fn test_plane_layout() {
        let mesh = Mesh::plane(2.0, 3.0, 4, 1);

        assert_eq!(mesh.vertex_count(), 10);
        assert_eq!(mesh.triangle_count(), 8);
        assert_close(mesh.vertices[0].position, [0.0, -1.5, 0.0]);
        assert_close(mesh.vertices[4].position, [2.0, -1.5, 0.0]);
        assert_close(mesh.vertices[9].position, [2.0, 1.5, 0.0]);
    }

    #[test]
    fn test_plane_normals_face_forward() {
        let mut mesh = Mesh::plane(2.0, 3.0, 4, 2);
        mesh.compute_vertex_normals();
        for vertex in &mesh.vertices {
            assert_close(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_flip_winding_faces_backward() {
        let mut mesh = Mesh::plane(1.0, 1.0, 2, 2);
        mesh.flip_winding();
        mesh.compute_vertex_normals();
        for vertex in &mesh.vertices {
            assert_close(vertex.normal, [0.0, 0.0, -1.0]);
        }
    }

    #[test]
    fn test_mesh_merge() {
        let mut mesh1 = Mesh::plane(1.0, 1.0, 1, 1);
        let mesh2 = Mesh::plane(1.0, 1.0, 1, 1);

        mesh1.merge(&mesh2);

        assert_eq!(mesh1.vertex_count(), 8);
        assert_eq!(mesh1.triangle_count(), 4);
        assert!(mesh1.indices[6..].iter().all(|&i| i >= 4));
    }

    #[test]
    fn test_transform_rotates_normals() {
        let mut mesh = Mesh::plane(1.0, 1.0, 1, 1);
        mesh.transform(&Mat4::from_rotation_y(-std::f32::consts::PI));

        assert_close(mesh.vertices[1].position, [-1.0, -0.5, 0.0]);
        assert_close(mesh.vertices[1].normal, [0.0, 0.0, -1.0]);
    }
}
