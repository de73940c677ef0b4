//! Page bending while turning.
//!
//! A turning page curls away from its rest plane: the bend vanishes at the
//! spine, grows toward the free edge, and peaks at mid-turn. Only Z moves.

use crate::mesher::geometry::Mesh;
use std::f32::consts::PI;

/// Shape parameters of the curl.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendProfile {
    /// Peak bend strength at mid-turn.
    pub amplitude: f32,
    /// Fraction of a half sine wave spanned from spine to free edge.
    pub curl_span: f32,
}

impl Default for BendProfile {
    fn default() -> Self {
        Self {
            amplitude: 0.4,
            curl_span: 0.8,
        }
    }
}

impl BendProfile {
    /// Bend strength for a flip progress in [0, 1]. Zero at both rest states.
    pub fn strength(&self, progress: f32) -> f32 {
        (progress.clamp(0.0, 1.0) * PI).sin() * self.amplitude
    }

    /// Z displacement at normalized spine distance `u` (0 at the spine, 1 at the free edge).
    pub fn displacement(&self, u: f32, strength: f32) -> f32 {
        (u * PI * self.curl_span).sin() * strength * u
    }
}

/// A page surface that can be bent by flip progress.
///
/// Holds the live mesh plus a snapshot of the undeformed positions, taken the
/// first time the surface is deformed and never written again.
#[derive(Debug, Clone)]
pub struct PageSurface {
    mesh: Mesh,
    width: f32,
    profile: BendProfile,
    original: Option<Vec<[f32; 3]>>,
    last_progress: Option<f32>,
}

impl PageSurface {
    /// Wrap a page mesh of the given width (spine at x = 0).
    pub fn new(mesh: Mesh, width: f32, profile: BendProfile) -> Self {
        Self {
            mesh,
            width,
            profile,
            original: None,
            last_progress: None,
        }
    }

    /// The live, possibly deformed mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Undeformed positions, once captured.
    pub fn original_positions(&self) -> Option<&[[f32; 3]]> {
        self.original.as_deref()
    }

    /// Progress the surface was last deformed for.
    pub fn progress(&self) -> Option<f32> {
        self.last_progress
    }

    /// Reshape the surface for a flip progress and recompute its normals.
    ///
    /// The result depends only on the captured originals and `progress`.
    /// Deforming again with the same progress is skipped.
    pub fn deform(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        if self.last_progress == Some(progress) {
            return;
        }

        let width = self.width;
        let profile = self.profile;
        let strength = profile.strength(progress);

        if self.original.is_none() {
            self.original = Some(self.mesh.vertices.iter().map(|v| v.position).collect());
        }
        let Some(original) = self.original.as_ref() else {
            return;
        };
        let mesh = &mut self.mesh;

        for (vertex, base) in mesh.vertices.iter_mut().zip(original) {
            let u = if width > 0.0 { base[0] / width } else { 0.0 };
            vertex.position = [base[0], base[1], base[2] + profile.displacement(u, strength)];
        }

        mesh.compute_vertex_normals();
        self.last_progress = Some(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> PageSurface {
        PageSurface::new(Mesh::plane(2.2, 3.0, 30, 1), 2.2, BendProfile::default())
    }

    #[test]
    fn test_strength_zero_at_rest() {
        let profile = BendProfile::default();
        assert_eq!(profile.strength(0.0), 0.0);
        assert!(profile.strength(1.0).abs() < 1e-6);
        assert!((profile.strength(0.5) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_deform_at_zero_matches_original() {
        let mut surface = surface();
        let before: Vec<_> = surface.mesh().vertices.iter().map(|v| v.position).collect();

        surface.deform(0.0);

        let after: Vec<_> = surface.mesh().vertices.iter().map(|v| v.position).collect();
        assert_eq!(before, after);
        assert_eq!(surface.original_positions().unwrap(), before.as_slice());
    }

    #[test]
    fn test_deform_midway_grows_from_spine() {
        let mut surface = surface();
        surface.deform(0.5);

        // Bottom row, spine to free edge. The curl peaks near u = 0.8.
        let row: Vec<_> = surface.mesh().vertices[..31].iter().map(|v| v.position).collect();
        assert_eq!(row[0][2], 0.0);
        for pair in row[..=20].windows(2) {
            assert!(pair[1][2] > pair[0][2], "z must grow away from the spine");
        }
        assert!(row[1..].iter().all(|p| p[2] > 0.0));
    }

    #[test]
    fn test_deform_only_moves_z() {
        let mut surface = surface();
        surface.deform(0.37);

        let original = surface.original_positions().unwrap();
        for (vertex, base) in surface.mesh().vertices.iter().zip(original) {
            assert_eq!(vertex.position[0], base[0]);
            assert_eq!(vertex.position[1], base[1]);
        }
    }

    #[test]
    fn test_deform_flat_when_fully_flipped() {
        let mut surface = surface();
        surface.deform(1.0);
        for vertex in &surface.mesh().vertices {
            assert!(vertex.position[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_deform_is_not_path_dependent() {
        let mut direct = surface();
        direct.deform(0.42);

        let mut winding = surface();
        for p in [0.1, 0.9, 0.3, 0.75] {
            winding.deform(p);
        }
        winding.deform(0.42);

        assert_eq!(direct.mesh().vertices, winding.mesh().vertices);
    }

    #[test]
    fn test_originals_survive_deformation() {
        let mut surface = surface();
        surface.deform(0.0);
        let captured = surface.original_positions().unwrap().to_vec();

        surface.deform(0.5);
        surface.deform(0.8);

        assert_eq!(surface.original_positions().unwrap(), captured.as_slice());
    }

    #[test]
    fn test_bent_normals_tilt() {
        let mut surface = surface();
        surface.deform(0.5);

        let middle = surface.mesh().vertices[15].normal;
        assert!(middle[0] < 0.0, "rising surface normal should lean back toward the spine");
        let length = (middle[0] * middle[0] + middle[1] * middle[1] + middle[2] * middle[2]).sqrt();
        assert!((length - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut surface = surface();
        surface.deform(1.5);
        assert_eq!(surface.progress(), Some(1.0));
    }
}
