//! Document and page assembly.
//!
//! A [`Document`] owns an ordered list of [`Page`]s and the identifier
//! allocator shared by all of them. Cells are added through the document,
//! addressed by the [`PageHandle`] returned from [`Document::add_page`].
//!
//! # Example
//!
//! ```
//! use mxdraft::{
//!     Document,
//!     geometry::Bounds,
//!     style::ShapeCategory,
//! };
//!
//! let mut doc = Document::new();
//! let styles = doc.styles().clone();
//!
//! let page = doc.add_page("Demo");
//! let start = doc
//!     .add_vertex(page, Bounds::new(0.0, 0.0, 30.0, 30.0), "", styles.get(ShapeCategory::Start))
//!     .unwrap();
//! let step = doc
//!     .add_vertex(page, Bounds::new(100.0, 0.0, 180.0, 50.0), "Step", styles.get(ShapeCategory::Action))
//!     .unwrap();
//! doc.add_edge(page, start, step, "", None).unwrap();
//!
//! assert_eq!(doc.page(page).unwrap().name(), "01 - Demo");
//! assert_eq!(doc.cell_count(), 3);
//! ```

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use log::{debug, info, trace};
use thiserror::Error;

use mxdraft_core::{
    cell::Cell,
    geometry::Bounds,
    identifier::{CellId, IdAllocator},
    style::{ShapeCategory, Style, StyleRegistry},
};

/// Source of per-document tokens so handles cannot cross documents.
static NEXT_DOCUMENT: AtomicU64 = AtomicU64::new(0);

/// Errors raised while adding cells to a document.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    #[error("page handle does not belong to this document")]
    UnknownPage,

    #[error("parent `{parent}` does not exist on page `{page}`")]
    UnknownParent { parent: CellId, page: String },

    #[error("parent `{parent}` on page `{page}` is not a container")]
    NotAContainer { parent: CellId, page: String },
}

/// Handle to a page of a specific [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle {
    document: u64,
    index: usize,
}

impl PageHandle {
    /// Zero-based position of the page in its document.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One diagram of a multi-page document.
///
/// Every page has its own graph namespace rooted at the reserved root cell
/// (`"0"`) and default layer (`"1"`). Cells are kept in insertion order,
/// which is also their rendering order.
#[derive(Debug, Clone)]
pub struct Page {
    name: String,
    title: String,
    cells: Vec<Cell>,
    positions: HashMap<CellId, usize>,
}

impl Page {
    fn new(number: usize, title: &str) -> Self {
        Self {
            name: format!("{number:02} - {title}"),
            title: title.to_string(),
            cells: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Display name, prefixed with the page number (`"01 - <title>"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title as given to [`Document::add_page`].
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Constructed cells in insertion order, without the reserved pair.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Looks up a constructed cell of this page.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.positions.get(&id).map(|&position| &self.cells[position])
    }

    /// Returns `true` if `id` names a reserved cell or a cell of this page.
    pub fn contains(&self, id: CellId) -> bool {
        id.is_reserved() || self.positions.contains_key(&id)
    }

    fn push(&mut self, cell: Cell) -> CellId {
        let id = cell.id();
        trace!(page = self.name, cell:? = cell; "Appending cell");
        self.positions.insert(id, self.cells.len());
        self.cells.push(cell);
        id
    }

    fn check_parent(&self, parent: CellId) -> Result<(), DocumentError> {
        if parent.is_reserved() {
            return Ok(());
        }
        match self.cell(parent) {
            Some(cell) if cell.is_container() => Ok(()),
            Some(_) => Err(DocumentError::NotAContainer {
                parent,
                page: self.name.clone(),
            }),
            None => Err(DocumentError::UnknownParent {
                parent,
                page: self.name.clone(),
            }),
        }
    }
}

/// A multi-page diagram document under construction.
///
/// The document is the single owner of all build state: the page list and
/// the identifier allocator. Identifiers are allocated document-wide, so
/// they are unique across pages as well as within each page.
///
/// Documents are write-once: cells can be added but never changed or
/// removed.
#[derive(Debug)]
pub struct Document {
    token: u64,
    ids: IdAllocator,
    pages: Vec<Page>,
    styles: StyleRegistry,
}

impl Document {
    /// Creates an empty document using the built-in style registry.
    pub fn new() -> Self {
        Self::with_styles(StyleRegistry::new())
    }

    /// Creates an empty document using the given style registry.
    ///
    /// The registry provides the default edge style
    /// ([`ShapeCategory::Connector`]).
    pub fn with_styles(styles: StyleRegistry) -> Self {
        Self {
            token: NEXT_DOCUMENT.fetch_add(1, Ordering::Relaxed),
            ids: IdAllocator::new(),
            pages: Vec::new(),
            styles,
        }
    }

    /// The style registry of this document.
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Pages in the order they were added.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the page addressed by `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnknownPage`] for a handle from another
    /// document.
    pub fn page(&self, handle: PageHandle) -> Result<&Page, DocumentError> {
        if handle.document != self.token {
            return Err(DocumentError::UnknownPage);
        }
        self.pages.get(handle.index).ok_or(DocumentError::UnknownPage)
    }

    /// Iterates over every constructed cell, page by page.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.pages.iter().flat_map(|page| page.cells.iter())
    }

    /// Looks up a constructed cell on any page.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.pages.iter().find_map(|page| page.cell(id))
    }

    /// Total number of constructed cells across all pages.
    pub fn cell_count(&self) -> usize {
        self.pages.iter().map(|page| page.cells.len()).sum()
    }

    /// Appends a new page and returns its handle.
    ///
    /// The display name is auto-numbered: the first page added as `"Demo"`
    /// is named `"01 - Demo"`. Titles need not be unique.
    pub fn add_page(&mut self, title: &str) -> PageHandle {
        let page = Page::new(self.pages.len() + 1, title);
        info!(page = page.name(); "Adding page");
        self.pages.push(page);

        PageHandle {
            document: self.token,
            index: self.pages.len() - 1,
        }
    }

    /// Adds a vertex on the page's default layer.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnknownPage`] for a foreign handle.
    pub fn add_vertex(
        &mut self,
        page: PageHandle,
        bounds: Bounds,
        label: &str,
        style: impl Into<Style>,
    ) -> Result<CellId, DocumentError> {
        self.add_child_vertex(page, CellId::default_layer(), bounds, label, style)
    }

    /// Adds a container on the page's default layer.
    ///
    /// Cells added later may name the returned identifier as their parent.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnknownPage`] for a foreign handle.
    pub fn add_container(
        &mut self,
        page: PageHandle,
        bounds: Bounds,
        label: &str,
        style: impl Into<Style>,
    ) -> Result<CellId, DocumentError> {
        self.add_child_container(page, CellId::default_layer(), bounds, label, style)
    }

    /// Adds an edge on the page's default layer.
    ///
    /// `style` defaults to the registry's [`ShapeCategory::Connector`]
    /// presentation. The endpoints are not checked here; run
    /// [`crate::validate::validate`] to detect dangling references.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnknownPage`] for a foreign handle.
    pub fn add_edge(
        &mut self,
        page: PageHandle,
        source: CellId,
        target: CellId,
        label: &str,
        style: Option<Style>,
    ) -> Result<CellId, DocumentError> {
        self.add_child_edge(page, CellId::default_layer(), source, target, label, style)
    }

    /// Adds a vertex whose parent is `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is foreign, if `parent` does not exist
    /// on the page yet, or if it is not a container.
    pub fn add_child_vertex(
        &mut self,
        page: PageHandle,
        parent: CellId,
        bounds: Bounds,
        label: &str,
        style: impl Into<Style>,
    ) -> Result<CellId, DocumentError> {
        self.page(page)?.check_parent(parent)?;
        let id = self.ids.next_id();
        debug!(id:% = id, parent:% = parent, label; "Adding vertex");

        let cell = Cell::vertex(id, parent, bounds, label, style.into());
        Ok(self.pages[page.index].push(cell))
    }

    /// Adds a container whose parent is `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`Document::add_child_vertex`].
    pub fn add_child_container(
        &mut self,
        page: PageHandle,
        parent: CellId,
        bounds: Bounds,
        label: &str,
        style: impl Into<Style>,
    ) -> Result<CellId, DocumentError> {
        self.page(page)?.check_parent(parent)?;
        let id = self.ids.next_id();
        debug!(id:% = id, parent:% = parent, label; "Adding container");

        let cell = Cell::container(id, parent, bounds, label, style.into());
        Ok(self.pages[page.index].push(cell))
    }

    /// Adds an edge whose parent is `parent`.
    ///
    /// # Errors
    ///
    /// Same as [`Document::add_child_vertex`]. Endpoints are not checked.
    pub fn add_child_edge(
        &mut self,
        page: PageHandle,
        parent: CellId,
        source: CellId,
        target: CellId,
        label: &str,
        style: Option<Style>,
    ) -> Result<CellId, DocumentError> {
        self.page(page)?.check_parent(parent)?;
        let id = self.ids.next_id();
        debug!(id:% = id, source:% = source, target:% = target, label; "Adding edge");

        let style = style.unwrap_or_else(|| self.styles.get(ShapeCategory::Connector).clone());
        let cell = Cell::edge(id, parent, source, target, label, style);
        Ok(self.pages[page.index].push(cell))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
