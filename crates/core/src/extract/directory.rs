//! Legend-table (course directory) extraction.
//!
//! Every timetable page carries a legend table listing course code, full
//! course name, and faculty, plus free text naming the department and the
//! class coordinator.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::document::{Row, Table};

// Legend column positions observed in the source layout.
const COL_COURSE_CODE: usize = 1;
const COL_COURSE_NAME: usize = 2;
const COL_FACULTY: usize = 10;

static DEPARTMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"DEPARTMENT OF ([A-Z\s]+)\n(?:EVEN|ODD) SEMESTER").expect("department regex"));

static CLASS_DETAILS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)SLOT:\s*(SLOT\s*\d+).*?SECTION\s*[-\x{2013}\x{2014}]\s*(S\d+).*?(?:Class Coordinator|Mr\.|Ms\.)\s*([A-Za-z.\s-]+)",
    )
    .expect("class details regex")
});

/// One legend-table row. A synthetic all-"Free" row representing
/// unscheduled cells is always emitted first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRow {
    pub course_code: String,
    pub course_name: String,
    pub faculty_name: String,
    pub department: Option<String>,
}

impl CourseRow {
    fn free(department: Option<String>) -> Self {
        Self {
            course_code: crate::mapping::FREE.to_string(),
            course_name: crate::mapping::FREE.to_string(),
            faculty_name: crate::mapping::FREE.to_string(),
            department,
        }
    }
}

/// Slot/section/coordinator header parsed from page free text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDetails {
    pub slot: String,
    pub section: String,
    pub coordinator: String,
}

/// Department name from the page banner, absent when the banner does not
/// match (not an error).
pub fn extract_department(text: &str) -> Option<String> {
    DEPARTMENT_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Class coordinator details from page free text; `None` on no match.
pub fn extract_class_details(text: &str) -> Option<ClassDetails> {
    CLASS_DETAILS_RE.captures(text).map(|caps| ClassDetails {
        slot: caps[1].trim().to_string(),
        section: caps[2].trim().to_string(),
        coordinator: caps[3].trim().to_string(),
    })
}

/// Read the legend table into course rows.
///
/// Row 0 is the header and skipped. Rows too short to carry the three fixed
/// columns are skipped rather than failing the page.
pub fn extract_course_rows(legend: &Table, text: &str) -> Vec<CourseRow> {
    let department = extract_department(text);

    let mut rows = vec![CourseRow::free(department.clone())];
    for (idx, row) in legend.iter().enumerate().skip(1) {
        let fields = (
            cell_text(row, COL_COURSE_CODE),
            cell_text(row, COL_COURSE_NAME),
            cell_text(row, COL_FACULTY),
        );
        let (Some(course_code), Some(course_name), Some(faculty_name)) = fields else {
            debug!(row = idx, "legend row missing fixed columns, skipped");
            continue;
        };
        rows.push(CourseRow {
            course_code,
            course_name,
            faculty_name,
            department: department.clone(),
        });
    }
    rows
}

/// Cell content at a fixed column with embedded line breaks collapsed to
/// spaces, or `None` when the column is absent.
fn cell_text(row: &Row, col: usize) -> Option<String> {
    row.get(col)?.as_ref().map(|s| s.replace('\n', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legend_row(code: &str, name: &str, faculty: &str) -> Row {
        let mut row: Row = vec![None; 11];
        row[0] = Some("1".to_string());
        row[COL_COURSE_CODE] = Some(code.to_string());
        row[COL_COURSE_NAME] = Some(name.to_string());
        row[COL_FACULTY] = Some(faculty.to_string());
        row
    }

    #[test]
    fn header_is_skipped_and_free_row_prepended() {
        let legend = vec![
            legend_row("Code", "Course", "Faculty"),
            legend_row("21CS301", "Database Management\nSystems", "Dr. Rao"),
        ];
        let rows = extract_course_rows(&legend, "");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course_code, "Free");
        assert_eq!(rows[0].faculty_name, "Free");
        assert_eq!(rows[1].course_code, "21CS301");
        assert_eq!(rows[1].course_name, "Database Management Systems");
        assert_eq!(rows[1].faculty_name, "Dr. Rao");
    }

    #[test]
    fn short_rows_are_skipped() {
        let legend = vec![
            legend_row("Code", "Course", "Faculty"),
            vec![Some("only two".to_string()), Some("cells".to_string())],
            legend_row("21CS302", "Machine Learning", "Dr. Iyer"),
        ];
        let rows = extract_course_rows(&legend, "");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].course_code, "21CS302");
    }

    #[test]
    fn department_banner_is_matched() {
        let text = "DEPARTMENT OF COMPUTER SCIENCE\nEVEN SEMESTER 2024";
        assert_eq!(
            extract_department(text).as_deref(),
            Some("COMPUTER SCIENCE")
        );
        assert_eq!(extract_department("no banner here"), None);

        let legend = vec![legend_row("Code", "Course", "Faculty")];
        let rows = extract_course_rows(&legend, text);
        assert_eq!(rows[0].department.as_deref(), Some("COMPUTER SCIENCE"));
    }

    #[test]
    fn class_details_fall_back_to_none() {
        let text = "SLOT: SLOT 2 ... SECTION \u{2013} S05 ... Class Coordinator Priya K";
        let details = extract_class_details(text).unwrap();
        assert_eq!(details.slot, "SLOT 2");
        assert_eq!(details.section, "S05");
        assert_eq!(details.coordinator, "Priya K");

        assert_eq!(extract_class_details("plain page text"), None);
    }
}
