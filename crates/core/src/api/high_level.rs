//! High-level extraction API.
//!
//! Provides the main public entry points:
//! - `extract_pages()` - parse every page into its course/schedule rows
//! - `extract_timetable()` - full pipeline: pages plus entity normalization
//!
//! Pages are parsed in parallel worker tasks; per-page parsing shares no
//! state, and the results are re-sorted into document page order before the
//! strictly serial normalizer assigns surrogate ids. That keeps the output a
//! pure function of the input document.

use rayon::prelude::*;
use tracing::debug;

use crate::document::Document;
use crate::error::Result;
use crate::extract::{parse_page, PageExtract};
use crate::mapping::CourseMap;
use crate::normalize::{normalize_document, TimetableTables};

/// Parse all pages of a document, in document page order.
///
/// Pages without a timetable contribute nothing. Errors surface in page
/// order; partial results are discarded wholesale, never merged.
pub fn extract_pages(doc: &Document, map: &CourseMap) -> Result<Vec<PageExtract>> {
    let mut results: Vec<(usize, Result<Option<PageExtract>>)> = doc
        .pages
        .par_iter()
        .enumerate()
        .map(|(page_idx, page)| (page_idx, parse_page(page, map)))
        .collect();
    results.sort_by_key(|(page_idx, _)| *page_idx);

    let mut extracts = Vec::new();
    let mut skipped = 0usize;
    for (_, result) in results {
        match result? {
            Some(extract) => extracts.push(extract),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, total = doc.page_count(), "pages without timetable tables");
    }
    Ok(extracts)
}

/// Run the full pipeline: per-page extraction followed by entity
/// normalization into the six relational tables.
///
/// The table set is produced atomically for the document; there is no
/// partial or streaming output.
pub fn extract_timetable(doc: &Document, map: &CourseMap) -> Result<TimetableTables> {
    let extracts = extract_pages(doc, map)?;
    Ok(normalize_document(&extracts, map))
}
