//! WASM bindings for flipping-book.
//!
//! This module provides JavaScript-friendly APIs for driving a book from a
//! browser render loop.

use crate::types::PageFace;
use js_sys::{Float32Array, Uint32Array};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// A book driven from JavaScript.
#[wasm_bindgen]
pub struct BookHandle {
    inner: crate::FlippingBook,
}

#[wasm_bindgen]
impl BookHandle {
    /// Create a book. Both arguments are optional JSON strings; without them
    /// the default five-page book and configuration are used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        manifest_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<BookHandle, JsError> {
        let manifest = match manifest_json {
            Some(json) => crate::BookManifest::from_json_str(&json)
                .map_err(|e| JsError::new(&e.to_string()))?,
            None => crate::BookManifest::default(),
        };
        let config = match config_json {
            Some(json) => crate::BookConfig::from_json_str(&json)
                .map_err(|e| JsError::new(&e.to_string()))?,
            None => crate::BookConfig::default(),
        };
        let inner = crate::FlippingBook::new(&manifest, config)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(BookHandle { inner })
    }

    /// Get the reading position.
    #[wasm_bindgen(getter)]
    pub fn current_page(&self) -> usize {
        self.inner.current_page()
    }

    /// Get the number of pages.
    #[wasm_bindgen(getter)]
    pub fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    pub fn turn_forward(&mut self) -> bool {
        self.inner.turn_forward()
    }

    pub fn turn_back(&mut self) -> bool {
        self.inner.turn_back()
    }

    /// Advance one frame. Call from `requestAnimationFrame` after handling input.
    pub fn tick(&mut self, elapsed: f32, delta: f32) {
        self.inner.tick(crate::FrameClock::at(elapsed, delta));
    }

    /// Route a click on a page. Returns 1 for forward, -1 for back, 0 if ignored.
    pub fn click(&mut self, page_index: usize, x: f32, y: f32) -> i32 {
        match self.inner.handle_click(&crate::PointerHit::new(page_index, [x, y])) {
            Some(crate::TurnCommand::Forward) => 1,
            Some(crate::TurnCommand::Back) => -1,
            None => 0,
        }
    }

    /// Whether hovering a page should show a pointer cursor.
    pub fn is_interactive(&self, page_index: usize) -> bool {
        self.inner.is_interactive(page_index)
    }

    /// Rotation of a page about the spine (radians).
    pub fn page_angle(&self, page_index: usize) -> f32 {
        self.inner.page_state(page_index).map(|s| s.angle).unwrap_or(0.0)
    }

    /// Depth offset of a page.
    pub fn page_depth(&self, page_index: usize) -> f32 {
        self.inner.page_state(page_index).map(|s| s.depth).unwrap_or(0.0)
    }

    /// Flip progress of a page in [0, 1].
    pub fn page_progress(&self, page_index: usize) -> f32 {
        self.inner.page_state(page_index).map(|s| s.flip_progress).unwrap_or(0.0)
    }

    /// Bent positions of one page face (x, y, z per vertex), in page space.
    pub fn face_positions(&self, page_index: usize, back: bool) -> Float32Array {
        let data = self
            .face_mesh(page_index, back)
            .map(|m| m.positions_flat())
            .unwrap_or_default();
        Float32Array::from(data.as_slice())
    }

    /// Recomputed normals of one page face.
    pub fn face_normals(&self, page_index: usize, back: bool) -> Float32Array {
        let data = self
            .face_mesh(page_index, back)
            .map(|m| m.normals_flat())
            .unwrap_or_default();
        Float32Array::from(data.as_slice())
    }

    /// Triangle indices of one page face.
    pub fn face_indices(&self, page_index: usize, back: bool) -> Uint32Array {
        let data = self
            .face_mesh(page_index, back)
            .map(|m| m.indices)
            .unwrap_or_default();
        Uint32Array::from(data.as_slice())
    }

    /// Left and right stack depths.
    pub fn stack_depths(&self) -> Float32Array {
        let depths = self.inner.stack_depths();
        Float32Array::from([depths.left, depths.right].as_slice())
    }

    /// The full frame state as JSON.
    pub fn frame_json(&self) -> Result<String, JsError> {
        self.inner
            .frame()
            .to_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl BookHandle {
    fn face_mesh(&self, page_index: usize, back: bool) -> Option<crate::Mesh> {
        let face = if back { PageFace::Back } else { PageFace::Front };
        let offset = self.inner.config().face_offset;
        self.inner
            .geometry(page_index)
            .map(|g| g.face_mesh(face, offset))
    }
}
