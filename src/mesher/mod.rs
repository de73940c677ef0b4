//! Page mesh generation and deformation.
//!
//! Every page owns two surfaces, one per face, bent together from the same
//! flip progress.

pub mod bend;
pub mod geometry;

pub use bend::{BendProfile, PageSurface};
pub use geometry::{Mesh, Vertex};

use crate::config::BookConfig;
use crate::types::PageFace;

/// Front and back surfaces of one page.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    front: PageSurface,
    back: PageSurface,
}

impl PageGeometry {
    /// Build flat surfaces sized by the configuration.
    pub fn new(config: &BookConfig) -> Self {
        let profile = BendProfile {
            amplitude: config.bend_amplitude,
            curl_span: config.curl_span,
        };
        let front = Mesh::plane(
            config.page_width,
            config.page_height,
            config.width_segments,
            config.height_segments,
        );
        let mut back = front.clone();
        back.flip_winding();

        Self {
            front: PageSurface::new(front, config.page_width, profile),
            back: PageSurface::new(back, config.page_width, profile),
        }
    }

    /// Bend both faces for a flip progress.
    pub fn deform(&mut self, progress: f32) {
        self.front.deform(progress);
        self.back.deform(progress);
    }

    pub fn surface(&self, face: PageFace) -> &PageSurface {
        match face {
            PageFace::Front => &self.front,
            PageFace::Back => &self.back,
        }
    }

    /// One face pushed off the page's mid plane by `face_offset`.
    pub fn face_mesh(&self, face: PageFace, face_offset: f32) -> Mesh {
        let mut mesh = self.surface(face).mesh().clone();
        let dz = face.offset_sign() * face_offset;
        for vertex in &mut mesh.vertices {
            vertex.position[2] += dz;
        }
        mesh
    }

    /// Both faces merged into one mesh.
    pub fn combined_mesh(&self, face_offset: f32) -> Mesh {
        let mut combined = Mesh::new();
        for face in PageFace::ALL {
            combined.merge(&self.face_mesh(face, face_offset));
        }
        combined
    }
}
