//! Weekly schedule grid parsing.
//!
//! The grid table is ragged in practice: spacer columns, stray rows above
//! and below the real grid, and a header row that is sometimes pruned along
//! with the noise. The passes here repair that structure before reshaping
//! the grid into per-cell schedule rows and joining them against the page's
//! course directory.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::document::Table;
use crate::error::Result;
use crate::extract::cell::{decode_cell, CellContent};
use crate::extract::directory::CourseRow;
use crate::extract::time::to_24h;
use crate::mapping::{CourseMap, FREE};

/// Cell values equivalent to an empty cell.
const BLANK_TOKENS: [&str; 4] = ["", "None", "---", "-x-"];

/// A column this sparse is a spacer, not data.
const MAX_FREE_PER_COLUMN: usize = 5;
/// A row this sparse is a footer or stray text, not a day row.
const MAX_FREE_PER_ROW: usize = 6;
/// One header row plus up to six day rows.
const MAX_GRID_ROWS: usize = 6;

/// Reinserted when the real header was pruned as sparse noise.
const CANONICAL_HEADER: [&str; 9] = [
    "Period / Day",
    "9.00-10.00",
    "10.00-11.00",
    "11.00-12.00",
    "12.00-\n1.00",
    "1.00-2.00",
    "2.00-3.00",
    "3.00-4.00",
    "4.00-5.00",
];

/// One grid cell reshaped against its day row and header column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRow {
    pub day: String,
    /// Raw header label for this column, not yet canonicalized.
    pub slot_label: String,
    pub content: CellContent,
}

/// A schedule row joined against the course directory, with its slot label
/// normalized. This is the per-page unit the entity normalizer consumes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub day: String,
    /// Normalized `HH:MM-HH:MM` slot label.
    pub slot: String,
    pub room: String,
    pub course_code: String,
    pub faculty_name: String,
}

/// Repair the raw grid table and reshape it into schedule rows.
pub fn parse_grid(table: &Table) -> Vec<ScheduleRow> {
    let grid = repair_grid(table);
    reshape(&grid)
}

/// Parse the grid and inner-join it against the page's course rows.
///
/// The join runs in short-code space: each course row's full name is mapped
/// through `map`, and cells whose decoded course matches no mapped course
/// row are dropped (noise filtering inherited from the source system; the
/// drop count is logged). Slot labels are normalized here, so a malformed
/// header label fails the page with [`crate::ExtractError::SlotFormat`].
pub fn parse_schedule(
    table: &Table,
    courses: &[CourseRow],
    map: &CourseMap,
) -> Result<Vec<Assignment>> {
    let rows = parse_grid(table);

    // Short-code -> course rows teaching it. Unmapped course names never
    // join, exactly as in the source system.
    let by_code: HashMap<&str, Vec<&CourseRow>> = courses
        .iter()
        .filter_map(|c| map.short_code(&c.course_name).map(|code| (code, c)))
        .into_group_map();

    let mut assignments = Vec::new();
    let mut dropped = 0usize;
    for row in &rows {
        let Some(matches) = by_code.get(row.content.course_label()) else {
            dropped += 1;
            continue;
        };
        for course in matches {
            assignments.push(Assignment {
                day: row.day.clone(),
                slot: to_24h(&row.slot_label)?,
                room: row.content.room_label().to_string(),
                course_code: course.course_code.clone(),
                faculty_name: course.faculty_name.clone(),
            });
        }
    }
    if dropped > 0 {
        debug!(dropped, total = rows.len(), "grid cells without a matching course row");
    }
    Ok(assignments)
}

/// The structural repair passes, in order:
/// 1. blank-equivalent cells become missing, all-missing rows are dropped;
/// 2. rows are padded to the widest row and missing cells become `Free`;
/// 3. columns with more than [`MAX_FREE_PER_COLUMN`] `Free` cells are
///    dropped, then rows with more than [`MAX_FREE_PER_ROW`];
/// 4. only the last [`MAX_GRID_ROWS`] rows are kept;
/// 5. a grid of exactly 5 rows lost its header to pruning and gets the
///    canonical one reinserted.
fn repair_grid(table: &Table) -> Vec<Vec<String>> {
    let scrubbed: Vec<Vec<Option<&str>>> = table
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell.as_deref() {
                    None => None,
                    Some(s) if BLANK_TOKENS.contains(&s) => None,
                    Some(s) => Some(s),
                })
                .collect()
        })
        .filter(|row: &Vec<Option<&str>>| row.iter().any(Option::is_some))
        .collect();

    let width = scrubbed.iter().map(Vec::len).max().unwrap_or(0);
    let mut grid: Vec<Vec<String>> = scrubbed
        .iter()
        .map(|row| {
            (0..width)
                .map(|i| {
                    row.get(i)
                        .copied()
                        .flatten()
                        .unwrap_or(FREE)
                        .to_string()
                })
                .collect()
        })
        .collect();

    let keep_col: Vec<bool> = (0..width)
        .map(|col| {
            let free = grid.iter().filter(|row| row[col] == FREE).count();
            free <= MAX_FREE_PER_COLUMN
        })
        .collect();
    grid = grid
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(&keep_col)
                .filter(|(_, keep)| **keep)
                .map(|(cell, _)| cell)
                .collect()
        })
        .collect();

    grid.retain(|row| row.iter().filter(|c| *c == FREE).count() <= MAX_FREE_PER_ROW);

    if grid.len() > MAX_GRID_ROWS {
        grid.drain(..grid.len() - MAX_GRID_ROWS);
    }

    if grid.len() == MAX_GRID_ROWS - 1 {
        debug!("header row pruned as sparse, reinserting canonical slots");
        grid.insert(0, CANONICAL_HEADER.iter().map(|s| s.to_string()).collect());
    }

    for row in &mut grid {
        for cell in row {
            *cell = cell.replace('\n', " ");
        }
    }
    grid
}

/// Reshape the repaired grid: row 0 is the slot-label header, each further
/// row is one day whose first cell names it.
fn reshape(grid: &[Vec<String>]) -> Vec<ScheduleRow> {
    let Some((header, day_rows)) = grid.split_first() else {
        return Vec::new();
    };
    let slots = &header[1..];

    let mut rows = Vec::new();
    for day_row in day_rows {
        let Some((day, cells)) = day_row.split_first() else {
            continue;
        };
        for (idx, cell) in cells.iter().enumerate() {
            // A grid wider than its header has no slot label for the
            // trailing cells; after padding those header cells read as the
            // `Free` filler. Skip such cells instead of inventing a label.
            let slot_label = match slots.get(idx) {
                Some(label) if label != FREE => label,
                _ => {
                    debug!(column = idx + 1, "grid cell without a slot label, skipped");
                    continue;
                }
            };
            rows.push(ScheduleRow {
                day: day.clone(),
                slot_label: slot_label.clone(),
                content: decode_cell(cell),
            });
        }
    }
    rows
}
