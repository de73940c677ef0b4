//! Page roles, faces and the surface materials they map to.

use serde::{Deserialize, Serialize};

/// What a page is within the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    #[serde(alias = "cover")]
    FrontCover,
    Content,
    #[serde(alias = "back")]
    BackCover,
}

impl PageRole {
    /// Covers are bound in leather, everything else is parchment.
    pub fn is_cover(&self) -> bool {
        matches!(self, PageRole::FrontCover | PageRole::BackCover)
    }

    /// Get the material for one face of a page with this role.
    pub fn material(&self, face: PageFace) -> SurfaceMaterial {
        match (self.is_cover(), face) {
            (true, PageFace::Front) => SurfaceMaterial::LEATHER,
            // The inside of a cover keeps the leather color but not its sheen
            (true, PageFace::Back) => SurfaceMaterial {
                roughness: 0.9,
                metalness: 0.0,
                ..SurfaceMaterial::LEATHER
            },
            (false, _) => SurfaceMaterial::PARCHMENT,
        }
    }
}

/// One side of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFace {
    Front,
    Back,
}

impl PageFace {
    /// Both faces in draw order.
    pub const ALL: [PageFace; 2] = [PageFace::Front, PageFace::Back];

    /// Sign of this face's offset along the page normal.
    pub fn offset_sign(&self) -> f32 {
        match self {
            PageFace::Front => 1.0,
            PageFace::Back => -1.0,
        }
    }
}

/// PBR parameters for a page surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterial {
    /// Base color (RGBA).
    pub color: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
}

impl SurfaceMaterial {
    /// Dark brown cover leather (#2a1810).
    pub const LEATHER: SurfaceMaterial = SurfaceMaterial {
        color: [0.164_705_9, 0.094_117_65, 0.062_745_1, 1.0],
        roughness: 0.75,
        metalness: 0.1,
    };

    /// Off-white page paper (#f8f4eb).
    pub const PARCHMENT: SurfaceMaterial = SurfaceMaterial {
        color: [0.972_549, 0.956_862_75, 0.921_568_6, 1.0],
        roughness: 0.9,
        metalness: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_materials() {
        let front = PageRole::FrontCover.material(PageFace::Front);
        assert_eq!(front, SurfaceMaterial::LEATHER);

        let inside = PageRole::BackCover.material(PageFace::Back);
        assert_eq!(inside.color, SurfaceMaterial::LEATHER.color);
        assert_eq!(inside.metalness, 0.0);
    }

    #[test]
    fn test_content_material_both_faces() {
        for face in PageFace::ALL {
            assert_eq!(PageRole::Content.material(face), SurfaceMaterial::PARCHMENT);
        }
    }

    #[test]
    fn test_role_aliases() {
        let role: PageRole = serde_json::from_str("\"cover\"").unwrap();
        assert_eq!(role, PageRole::FrontCover);
        let role: PageRole = serde_json::from_str("\"back_cover\"").unwrap();
        assert_eq!(role, PageRole::BackCover);
    }
}
