//! Per-frame render state handed to the host renderer.

use crate::animator::FlipPhase;
use crate::config::BookConfig;
use crate::error::Result;
use crate::stack::StackDepths;
use crate::types::{PageFace, PageRole, SurfaceMaterial};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Fixed backward tilt of the book toward the camera.
pub const BOOK_TILT: f32 = -0.25;

/// Host time for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameClock {
    /// Seconds since the book was created.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

impl FrameClock {
    pub fn at(elapsed: f32, delta: f32) -> Self {
        Self { elapsed, delta }
    }

    /// The clock one frame of `delta` seconds later.
    pub fn next(&self, delta: f32) -> Self {
        Self {
            elapsed: self.elapsed + delta,
            delta,
        }
    }
}

/// Idle floating motion of the whole book.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BookPose {
    pub height: f32,
    pub yaw: f32,
    pub tilt: f32,
}

impl BookPose {
    pub fn at(elapsed: f32, config: &BookConfig) -> Self {
        Self {
            height: (elapsed * 0.4).sin() * config.sway_height,
            yaw: (elapsed * 0.2).sin() * config.sway_yaw,
            tilt: BOOK_TILT,
        }
    }

    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.height, 0.0))
            * Mat4::from_rotation_x(self.tilt)
            * Mat4::from_rotation_y(self.yaw)
    }
}

/// Everything a renderer needs to draw one page this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRenderState {
    pub index: usize,
    pub role: PageRole,
    /// Rotation about the spine (radians).
    pub angle: f32,
    /// Offset along the book normal.
    pub depth: f32,
    pub flip_progress: f32,
    pub flipped: bool,
    pub phase: FlipPhase,
    /// Face whose content is shown: front while unread, back once read.
    pub visible_face: PageFace,
    pub material: SurfaceMaterial,
    /// Whether the page reacts to the pointer.
    pub interactive: bool,
}

impl PageRenderState {
    /// Page space to book space: lift by depth, then swing about the spine.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.depth)) * Mat4::from_rotation_y(self.angle)
    }
}

/// Snapshot of the whole book for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    pub current_page: usize,
    pub page_count: usize,
    pub pages: Vec<PageRenderState>,
    pub stacks: StackDepths,
    /// One dot per page, lit once the page has been read.
    pub indicator: Vec<bool>,
    pub pose: BookPose,
}

impl FrameState {
    pub fn is_settled(&self) -> bool {
        self.pages.iter().all(|p| p.phase.is_at_rest())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
