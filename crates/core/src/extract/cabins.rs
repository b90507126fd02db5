//! Faculty cabin directory extraction.
//!
//! A separate source document lists faculty names against their cabins as a
//! single table per page: faculty in column 1, cabin in the last column.

use tracing::debug;

use crate::document::Document;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CabinRow {
    pub faculty_name: String,
    pub cabin: String,
}

/// Read every page's first table into cabin rows, skipping header rows and
/// rows without both columns.
pub fn extract_cabins(doc: &Document) -> Vec<CabinRow> {
    let mut rows = Vec::new();
    for (page_idx, page) in doc.pages.iter().enumerate() {
        let Some(table) = page.tables.first() else {
            debug!(page = page_idx, "no cabin table on page, skipped");
            continue;
        };
        for row in table.iter().skip(1) {
            let faculty = row.get(1).and_then(Option::as_deref);
            let cabin = row.last().and_then(Option::as_deref);
            let (Some(faculty_name), Some(cabin)) = (faculty, cabin) else {
                continue;
            };
            rows.push(CabinRow {
                faculty_name: faculty_name.replace('\n', " "),
                cabin: cabin.replace('\n', " "),
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PageContent, Row};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Some(c.to_string())).collect()
    }

    #[test]
    fn cabin_rows_come_from_the_first_table() {
        let table = vec![
            row(&["S.No", "Faculty", "Dept", "Cabin"]),
            row(&["1", "Dr. Rao", "CSE", "A-204"]),
            row(&["2", "Dr. Iyer", "CSE", "B-101"]),
        ];
        let doc = Document::new(vec![
            PageContent::new(vec![table], ""),
            PageContent::new(vec![], "cover page"),
        ]);

        let rows = extract_cabins(&doc);
        assert_eq!(
            rows,
            vec![
                CabinRow {
                    faculty_name: "Dr. Rao".into(),
                    cabin: "A-204".into(),
                },
                CabinRow {
                    faculty_name: "Dr. Iyer".into(),
                    cabin: "B-101".into(),
                },
            ]
        );
    }
}
