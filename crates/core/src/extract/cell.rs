//! Grid cell decoding.
//!
//! A raw cell holds something like `DBMS Lab R204`, `ML CCF R101`, `Lunch`,
//! or nothing at all. Decoding separates the course short code from the room
//! label, stripping the layout artifacts the source grids embed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::mapping::FREE;

// Mirrors re.match semantics: anchored at the start, suffix allowed.
static ROOM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^R?\d+").expect("room regex"));

/// Decoded content of one grid cell.
///
/// An unscheduled cell is a first-class state, not missing data; the literal
/// `"Free"` sentinel only exists at the table-output boundary (see
/// [`CellContent::course_label`] / [`CellContent::room_label`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    /// Empty cell, lunch marker, or explicit free marker.
    Empty,
    /// A scheduled course. `room` is `None` when the cell carried no
    /// room-shaped token.
    Assigned {
        course: String,
        room: Option<String>,
    },
}

impl CellContent {
    /// Course short code as it appears in the output tables.
    pub fn course_label(&self) -> &str {
        match self {
            CellContent::Empty => FREE,
            CellContent::Assigned { course, .. } => course,
        }
    }

    /// Room label as it appears in the output tables.
    pub fn room_label(&self) -> &str {
        match self {
            CellContent::Empty => FREE,
            CellContent::Assigned { room, .. } => room.as_deref().unwrap_or(FREE),
        }
    }
}

/// Decode one raw cell.
///
/// Rules, in order:
/// - empty / `Lunch` marker / `Free` marker => [`CellContent::Empty`];
/// - standalone `Lab` and `R` tokens are layout artifacts and dropped;
/// - a trailing `R<digits>` or `<digits>` token is the room (the `R` prefix
///   is stripped); a `CCF` marker in the course moves into the room as a
///   `CCF ` prefix, and a trailing `T` token on the course is dropped;
/// - otherwise the whole cell is the course and there is no room.
pub fn decode_cell(raw: &str) -> CellContent {
    if raw.contains("Lunch") || raw.contains(FREE) {
        return CellContent::Empty;
    }

    let mut tokens: Vec<&str> = raw
        .split_whitespace()
        .filter(|t| *t != "Lab" && *t != "R")
        .collect();
    let Some(&last) = tokens.last() else {
        return CellContent::Empty;
    };

    if !ROOM_RE.is_match(last) {
        return CellContent::Assigned {
            course: tokens.join(" "),
            room: None,
        };
    }

    tokens.pop();
    let ccf = tokens.iter().any(|t| *t == "CCF");
    if ccf {
        tokens.retain(|t| *t != "CCF");
    }
    if tokens.last() == Some(&"T") {
        tokens.pop();
    }

    let bare = last.strip_prefix('R').unwrap_or(last);
    let room = if ccf {
        format!("CCF {bare}")
    } else {
        bare.to_string()
    };

    CellContent::Assigned {
        course: tokens.join(" "),
        room: Some(room),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigned(course: &str, room: &str) -> CellContent {
        CellContent::Assigned {
            course: course.to_string(),
            room: Some(room.to_string()),
        }
    }

    #[test]
    fn lab_artifact_and_room_prefix_are_stripped() {
        assert_eq!(decode_cell("DBMS Lab R204"), assigned("DBMS", "204"));
        assert_eq!(decode_cell("CN R112"), assigned("CN", "112"));
        assert_eq!(decode_cell("Java 305"), assigned("Java", "305"));
    }

    #[test]
    fn ccf_marker_moves_into_the_room() {
        assert_eq!(decode_cell("ML CCF R101"), assigned("ML", "CCF 101"));
    }

    #[test]
    fn trailing_t_token_is_dropped() {
        assert_eq!(decode_cell("DPSD T R210"), assigned("DPSD", "210"));
    }

    #[test]
    fn empty_and_marker_cells_are_free() {
        assert_eq!(decode_cell(""), CellContent::Empty);
        assert_eq!(decode_cell("Lunch"), CellContent::Empty);
        assert_eq!(decode_cell("Free"), CellContent::Empty);
        assert_eq!(decode_cell("   "), CellContent::Empty);
    }

    #[test]
    fn non_room_last_token_leaves_room_unassigned() {
        let cell = decode_cell("University Elective");
        assert_eq!(
            cell,
            CellContent::Assigned {
                course: "University Elective".to_string(),
                room: None,
            }
        );
        assert_eq!(cell.course_label(), "University Elective");
        assert_eq!(cell.room_label(), "Free");
    }

    #[test]
    fn sentinel_only_at_the_boundary() {
        assert_eq!(CellContent::Empty.course_label(), "Free");
        assert_eq!(CellContent::Empty.room_label(), "Free");
    }
}
