//! # Flipping Book
//!
//! A page-flip animation engine for interactive 3D books.
//!
//! ## Overview
//!
//! The book owns a single reading position. Every page derives from it where
//! it should rest, and each frame moves part of the way there: its rotation
//! about the spine, its depth in the stack, and the curl of its surface. The
//! host feeds in clicks and frame times and reads back per-page render state.
//!
//! ## Quick Start
//!
//! ```ignore
//! use flipping_book::{BookConfig, BookManifest, FlippingBook, FrameClock, PointerHit};
//!
//! let mut book = FlippingBook::new(&BookManifest::default(), BookConfig::default())?;
//!
//! // Input first, then the frame update
//! book.handle_click(&PointerHit::new(0, [1.8, 0.2]));
//! book.tick(FrameClock::at(elapsed, delta));
//!
//! for page in book.frame().pages {
//!     renderer.draw(page.index, page.transform(), book.geometry(page.index));
//! }
//! ```

pub mod animator;
pub mod book;
pub mod config;
pub mod error;
pub mod export;
pub mod frame;
pub mod input;
pub mod mesher;
pub mod stack;
pub mod types;

// Re-export main types for convenience
pub use animator::{FlipPhase, PageAnimator};
pub use book::{BookController, FlippingBook};
pub use config::{BookConfig, ClickPolicy, TerminalPage};
pub use error::{BookError, Result};
pub use export::obj::{export_obj, ObjExport};
pub use frame::{BookPose, FrameClock, FrameState, PageRenderState};
pub use input::InputMapper;
pub use mesher::{BendProfile, Mesh, PageGeometry, PageSurface, Vertex};
pub use stack::StackDepths;
pub use types::{
    BookManifest, PageContent, PageDescriptor, PageFace, PageRole, PageSource, PointerHit,
    SurfaceMaterial, TurnCommand,
};

/// Load a page manifest from a JSON file.
pub fn load_manifest<P: AsRef<std::path::Path>>(path: P) -> Result<BookManifest> {
    BookManifest::from_path(path)
}

/// Load a book configuration from a JSON file.
pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<BookConfig> {
    BookConfig::from_path(path)
}

#[cfg(feature = "wasm")]
pub mod wasm;
