//! timegrid - timetable table extraction and relational normalization.
//!
//! Takes per-page tabular regions of an institutional timetable document
//! (as produced by a pdfplumber-style reader) and recovers a clean
//! relational model: subjects, faculty, rooms, time slots, days, and the
//! assignment facts linking them, with stable deduplicated surrogate ids.

pub mod api;
pub mod document;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod normalize;

// Re-export high_level for convenience
pub use api::high_level;

pub use api::high_level::{extract_pages, extract_timetable};
pub use document::{Cell, Document, PageContent, Row, Table};
pub use error::{ExtractError, Result};
pub use extract::cabins::{extract_cabins, CabinRow};
pub use mapping::CourseMap;
pub use normalize::TimetableTables;
