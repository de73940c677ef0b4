//! Shared types used throughout the library.

mod command;
mod role;

pub use command::{PointerHit, TurnCommand};
pub use role::{PageFace, PageRole, SurfaceMaterial};

use crate::error::{BookError, Result};
use serde::{Deserialize, Serialize};

/// An item shown on a page (opaque to the flip engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Content payload attached to a page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageContent {
    pub id: String,
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

impl PageContent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.items.push(ContentItem {
            id: id.into(),
            title: title.into(),
        });
        self
    }
}

/// Immutable description of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Position in the book, 0-based.
    pub index: usize,
    pub role: PageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PageContent>,
}

impl PageDescriptor {
    pub fn new(index: usize, role: PageRole) -> Self {
        Self {
            index,
            role,
            content: None,
        }
    }

    pub fn with_content(mut self, content: PageContent) -> Self {
        self.content = Some(content);
        self
    }
}

/// Trait for page content providers.
pub trait PageSource {
    /// Number of pages in the book.
    fn page_count(&self) -> usize;

    /// Get the descriptor at an index.
    fn page(&self, index: usize) -> Option<&PageDescriptor>;

    /// Iterate over all pages in index order.
    fn iter_pages(&self) -> Box<dyn Iterator<Item = &PageDescriptor> + '_> {
        Box::new((0..self.page_count()).filter_map(move |i| self.page(i)))
    }
}

/// A page entry as written in a manifest file. The index comes from its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestEntry {
    role: PageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<PageContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestFile {
    pages: Vec<ManifestEntry>,
}

/// An ordered list of page descriptors.
///
/// JSON format:
/// ```json
/// {
///   "pages": [
///     { "role": "cover" },
///     { "role": "content", "content": { "id": "page1", "items": [{ "id": "m1", "title": "Kyoto" }] } },
///     { "role": "back" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BookManifest {
    pages: Vec<PageDescriptor>,
}

impl BookManifest {
    /// Build a manifest from descriptors. Indices must match positions.
    pub fn new(pages: Vec<PageDescriptor>) -> Result<Self> {
        if pages.is_empty() {
            return Err(BookError::EmptyBook);
        }
        for (position, page) in pages.iter().enumerate() {
            if page.index != position {
                return Err(BookError::InvalidPage(format!(
                    "page at position {} has index {}",
                    position, page.index
                )));
            }
        }
        Ok(Self { pages })
    }

    /// Build a manifest from roles alone.
    pub fn from_roles(roles: impl IntoIterator<Item = PageRole>) -> Result<Self> {
        let pages = roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| PageDescriptor::new(i, role))
            .collect();
        Self::new(pages)
    }

    /// Cover, `content_pages` content pages, back cover.
    pub fn bound(content_pages: usize) -> Self {
        let mut pages = Vec::with_capacity(content_pages + 2);
        pages.push(PageDescriptor::new(0, PageRole::FrontCover));
        for i in 1..=content_pages {
            pages.push(
                PageDescriptor::new(i, PageRole::Content)
                    .with_content(PageContent::new(format!("page{}", i))),
            );
        }
        pages.push(PageDescriptor::new(content_pages + 1, PageRole::BackCover));
        Self { pages }
    }

    /// Parse a manifest from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ManifestFile = serde_json::from_str(json)?;
        let pages = file
            .pages
            .into_iter()
            .enumerate()
            .map(|(index, entry)| PageDescriptor {
                index,
                role: entry.role,
                content: entry.content,
            })
            .collect();
        Self::new(pages)
    }

    /// Load a manifest from a JSON file.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize back to the manifest JSON format.
    pub fn to_json(&self) -> Result<String> {
        let file = ManifestFile {
            pages: self
                .pages
                .iter()
                .map(|p| ManifestEntry {
                    role: p.role,
                    content: p.content.clone(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }
}

impl Default for BookManifest {
    /// The keepsake book: cover, three memory pages, back cover.
    fn default() -> Self {
        let memories = [
            ("page1", "memory1", "Santorini Sunset"),
            ("page2", "memory2", "Kyoto Gardens"),
            ("page3", "memory3", "Paris Nights"),
        ];
        let mut pages = vec![PageDescriptor::new(0, PageRole::FrontCover)];
        for (i, (page_id, item_id, title)) in memories.iter().enumerate() {
            pages.push(
                PageDescriptor::new(i + 1, PageRole::Content)
                    .with_content(PageContent::new(*page_id).with_item(*item_id, *title)),
            );
        }
        pages.push(PageDescriptor::new(4, PageRole::BackCover));
        Self { pages }
    }
}

impl PageSource for BookManifest {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Option<&PageDescriptor> {
        self.pages.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_manifest_layout() {
        let manifest = BookManifest::default();
        assert_eq!(manifest.page_count(), 5);
        assert_eq!(manifest.page(0).unwrap().role, PageRole::FrontCover);
        assert_eq!(manifest.page(4).unwrap().role, PageRole::BackCover);
        let titles: Vec<_> = manifest
            .iter_pages()
            .filter_map(|p| p.content.as_ref())
            .flat_map(|c| c.items.iter().map(|i| i.title.as_str()))
            .collect();
        assert_eq!(titles, vec!["Santorini Sunset", "Kyoto Gardens", "Paris Nights"]);
    }

    #[test]
    fn test_bound_manifest() {
        let manifest = BookManifest::bound(2);
        assert_eq!(manifest.page_count(), 4);
        assert_eq!(manifest.page(1).unwrap().role, PageRole::Content);
        assert_eq!(manifest.page(3).unwrap().role, PageRole::BackCover);
    }

    #[test]
    fn test_manifest_from_roles() {
        let manifest =
            BookManifest::from_roles([PageRole::FrontCover, PageRole::Content, PageRole::BackCover])
                .unwrap();
        assert_eq!(manifest.page_count(), 3);
        assert_eq!(manifest.page(2).unwrap().index, 2);
        assert_eq!(manifest.page(1).unwrap().role, PageRole::Content);
        assert!(manifest.page(1).unwrap().content.is_none());

        assert!(matches!(
            BookManifest::from_roles(Vec::new()),
            Err(BookError::EmptyBook)
        ));
    }

    #[test]
    fn test_empty_manifest_rejected() {
        assert!(matches!(BookManifest::new(Vec::new()), Err(BookError::EmptyBook)));
    }

    #[test]
    fn test_index_mismatch_rejected() {
        let pages = vec![
            PageDescriptor::new(0, PageRole::FrontCover),
            PageDescriptor::new(2, PageRole::BackCover),
        ];
        assert!(matches!(BookManifest::new(pages), Err(BookError::InvalidPage(_))));
    }

    #[test]
    fn test_manifest_json() {
        let json = r#"{
            "pages": [
                { "role": "cover" },
                { "role": "content", "content": { "id": "p1", "items": [{ "id": "m1", "title": "Kyoto" }] } },
                { "role": "back" }
            ]
        }"#;
        let manifest = BookManifest::from_json_str(json).unwrap();
        assert_eq!(manifest.page_count(), 3);
        assert_eq!(manifest.page(1).unwrap().index, 1);
        assert_eq!(manifest.page(1).unwrap().content.as_ref().unwrap().items[0].title, "Kyoto");

        let reparsed = BookManifest::from_json_str(&manifest.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn test_manifest_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "pages": [{{ "role": "front_cover" }}, {{ "role": "back_cover" }}] }}"#
        )
        .unwrap();

        let manifest = BookManifest::from_path(file.path()).unwrap();
        assert_eq!(manifest.page_count(), 2);
    }

    #[test]
    fn test_manifest_bad_json() {
        assert!(matches!(
            BookManifest::from_json_str("{ \"pages\": 3 }"),
            Err(BookError::Json(_))
        ));
    }
}
