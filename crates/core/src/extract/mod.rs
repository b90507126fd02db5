//! Per-page extraction: table location, legend and grid parsing.
//!
//! Everything in this module is page-local and shares no state between
//! pages, which is what lets the high-level API fan pages out to worker
//! threads.

pub mod cabins;
pub mod cell;
pub mod directory;
pub mod grid;
pub mod time;

use tracing::{debug, trace};

use crate::document::PageContent;
use crate::error::Result;
use crate::extract::directory::{extract_class_details, extract_course_rows, ClassDetails, CourseRow};
use crate::extract::grid::{parse_schedule, Assignment};
use crate::mapping::CourseMap;

/// Where the tables of interest sit on a page.
///
/// The legend (course directory) is the last table on the page and the
/// weekly grid the one before it. Threading this through both extractors
/// keeps the two reads consistent without any shared state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub table_count: usize,
    pub legend_index: usize,
    pub grid_index: usize,
}

/// Locate the legend and grid tables on a page.
///
/// `None` means "not a timetable page": cover and title pages are normal,
/// non-exceptional inputs and simply contribute nothing.
pub fn locate_tables(page: &PageContent) -> Option<PageLayout> {
    let table_count = page.tables.len();
    if table_count < 2 {
        return None;
    }
    Some(PageLayout {
        table_count,
        legend_index: table_count - 1,
        grid_index: table_count - 2,
    })
}

/// Everything extracted from one timetable page.
#[derive(Clone, Debug)]
pub struct PageExtract {
    pub courses: Vec<CourseRow>,
    pub schedule: Vec<Assignment>,
    pub class_details: Option<ClassDetails>,
}

/// Parse one page into its course directory and joined schedule.
///
/// Returns `Ok(None)` for pages without a timetable. A malformed slot label
/// in the grid header is the only per-page failure.
pub fn parse_page(page: &PageContent, map: &CourseMap) -> Result<Option<PageExtract>> {
    let Some(layout) = locate_tables(page) else {
        debug!("page has no timetable tables, skipped");
        return Ok(None);
    };
    trace!(tables = layout.table_count, "parsing timetable page");

    let courses = extract_course_rows(&page.tables[layout.legend_index], &page.text);
    let schedule = parse_schedule(&page.tables[layout.grid_index], &courses, map)?;
    let class_details = extract_class_details(&page.text);

    Ok(Some(PageExtract {
        courses,
        schedule,
        class_details,
    }))
}
