//! In-memory input contract for the extraction pipeline.
//!
//! The upstream reader (a pdfplumber-style extractor, or anything else that
//! can produce tabular regions and plain text per page) is an external
//! collaborator. This crate only sees its output: for every page, zero or
//! more tables as rows of cells, plus the page's free text.

/// A single table cell. `None` means the cell exists in the grid but holds
/// no content (e.g. a spanned or empty region).
pub type Cell = Option<String>;

/// One row of a tabular region.
pub type Row = Vec<Cell>;

/// One tabular region: rows of cells, not necessarily rectangular.
pub type Table = Vec<Row>;

/// Everything the pipeline needs from one document page.
#[derive(Clone, Debug, Default)]
pub struct PageContent {
    /// Tabular regions in top-to-bottom reading order.
    pub tables: Vec<Table>,
    /// The page's plain text, used for the department and class-details
    /// patterns.
    pub text: String,
}

impl PageContent {
    pub fn new(tables: Vec<Table>, text: impl Into<String>) -> Self {
        Self {
            tables,
            text: text.into(),
        }
    }
}

/// A whole document, pages in document order.
///
/// Page order matters: surrogate ids downstream are assigned in first-seen
/// page-then-row order, so the same pages in a different order yield
/// different (but equally consistent) id assignments.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub pages: Vec<PageContent>,
}

impl Document {
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl From<Vec<PageContent>> for Document {
    fn from(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }
}
