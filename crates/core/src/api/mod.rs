//! High-level API module for timetable extraction.
//!
//! # Example
//!
//! ```no_run
//! use timegrid_core::{extract_timetable, CourseMap, Document, PageContent};
//!
//! # fn read_pages() -> Vec<PageContent> { Vec::new() }
//! let doc = Document::new(read_pages());
//! let tables = extract_timetable(&doc, &CourseMap::builtin())?;
//! println!("{} scheduled entries", tables.entries.len());
//! # Ok::<(), timegrid_core::ExtractError>(())
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{extract_pages, extract_timetable};
