//! Entity normalization: per-page extracts into six relational tables.
//!
//! This is the only stage that assigns global identifiers, so it is strictly
//! serial and consumes the whole document's page extracts at once, in page
//! order. Every dimension is an insertion-ordered natural-key map, which
//! makes surrogate ids a pure function of the input ordering.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::extract::PageExtract;
use crate::mapping::CourseMap;

/// Room label spelled out in full before dedup and fact resolution.
fn canonical_room(label: &str) -> &str {
    if label == "Comp" {
        "Computer block"
    } else {
        label
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubjectRecord {
    pub course_code: String,
    /// Full course name as printed in the legend.
    pub course_name: String,
    /// Mapped short code; `None` when the name is not in the course map.
    pub short_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacultyRecord {
    pub faculty_id: u32,
    pub faculty_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacultySubjectRecord {
    pub fs_id: u32,
    pub course_code: String,
    pub faculty_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub day_id: u32,
    pub day_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeSlotRecord {
    pub slot_id: u32,
    /// Normalized `HH:MM-HH:MM` label.
    pub slot_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomRecord {
    pub room_id: u32,
    pub room_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimetableEntryRecord {
    pub time_table_id: u32,
    pub fs_id: u32,
    pub room_id: u32,
    pub slot_id: u32,
    pub day_id: u32,
}

/// The full normalized table set for one document, produced atomically and
/// handed to the persistence collaborator with replace-table semantics.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TimetableTables {
    pub subjects: Vec<SubjectRecord>,
    pub faculty: Vec<FacultyRecord>,
    pub faculty_subjects: Vec<FacultySubjectRecord>,
    pub days: Vec<DayRecord>,
    pub slots: Vec<TimeSlotRecord>,
    pub rooms: Vec<RoomRecord>,
    pub entries: Vec<TimetableEntryRecord>,
}

/// Natural key -> surrogate id, first seen wins, insertion order preserved.
#[derive(Debug, Default)]
struct IdMap<K> {
    ids: IndexMap<K, u32>,
}

impl<K: std::hash::Hash + Eq> IdMap<K> {
    fn new() -> Self {
        Self {
            ids: IndexMap::new(),
        }
    }

    fn intern(&mut self, key: K) -> u32 {
        let next = self.ids.len() as u32;
        *self.ids.entry(key).or_insert(next)
    }

    fn get<Q>(&self, key: &Q) -> Option<u32>
    where
        Q: std::hash::Hash + indexmap::Equivalent<K> + ?Sized,
    {
        self.ids.get(key).copied()
    }

    fn into_records<R>(self, make: impl Fn(K, u32) -> R) -> Vec<R> {
        self.ids.into_iter().map(|(k, id)| make(k, id)).collect()
    }
}

/// Build the six tables from all pages of a document.
///
/// Dimensions first (Subject, Faculty, FacultySubject from the course
/// directories; Day, TimeSlot, Room from the joined schedules), the fact
/// table last. A fact row that fails to resolve any of its four foreign
/// keys is dropped, never fabricated; drops are counted and logged.
pub fn normalize_document(pages: &[PageExtract], map: &CourseMap) -> TimetableTables {
    let mut subjects: IndexMap<String, SubjectRecord> = IndexMap::new();
    let mut faculty = IdMap::new();
    let mut faculty_subject: IdMap<(String, String)> = IdMap::new();

    for page in pages {
        for course in &page.courses {
            subjects
                .entry(course.course_code.clone())
                .or_insert_with(|| SubjectRecord {
                    course_code: course.course_code.clone(),
                    course_name: course.course_name.clone(),
                    short_name: map.short_code(&course.course_name).map(str::to_string),
                });
            faculty.intern(course.faculty_name.clone());
            faculty_subject.intern((course.course_code.clone(), course.faculty_name.clone()));
        }
    }

    let mut days = IdMap::new();
    let mut slots = IdMap::new();
    let mut rooms = IdMap::new();
    for page in pages {
        for row in &page.schedule {
            days.intern(row.day.clone());
            slots.intern(row.slot.clone());
            rooms.intern(canonical_room(&row.room).to_string());
        }
    }

    // Fact rows resolve against the finished dimensions; a miss on any key
    // drops the row (noise filtering inherited from the source system).
    let fs_ids: FxHashMap<(&str, &str), u32> = faculty_subject
        .ids
        .iter()
        .map(|((code, name), id)| ((code.as_str(), name.as_str()), *id))
        .collect();

    let mut entries = Vec::new();
    let mut dropped = 0usize;
    for page in pages {
        for row in &page.schedule {
            let resolved = (
                fs_ids
                    .get(&(row.course_code.as_str(), row.faculty_name.as_str()))
                    .copied(),
                rooms.get(canonical_room(&row.room)),
                slots.get(row.slot.as_str()),
                days.get(row.day.as_str()),
            );
            let (Some(fs_id), Some(room_id), Some(slot_id), Some(day_id)) = resolved else {
                dropped += 1;
                continue;
            };
            entries.push(TimetableEntryRecord {
                time_table_id: entries.len() as u32,
                fs_id,
                room_id,
                slot_id,
                day_id,
            });
        }
    }
    if dropped > 0 {
        debug!(dropped, "schedule rows failed foreign-key resolution");
    }

    let faculty_records = faculty.into_records(|faculty_name, faculty_id| FacultyRecord {
        faculty_id,
        faculty_name,
    });
    let faculty_by_name: FxHashMap<&str, u32> = faculty_records
        .iter()
        .map(|f| (f.faculty_name.as_str(), f.faculty_id))
        .collect();

    let faculty_subjects = faculty_subject.into_records(|(course_code, faculty_name), fs_id| {
        FacultySubjectRecord {
            fs_id,
            course_code,
            // Interned from the same course rows, so always present.
            faculty_id: faculty_by_name[faculty_name.as_str()],
        }
    });

    TimetableTables {
        subjects: subjects.into_values().collect(),
        faculty: faculty_records,
        faculty_subjects,
        days: days.into_records(|day_name, day_id| DayRecord { day_id, day_name }),
        slots: slots.into_records(|slot_label, slot_id| TimeSlotRecord { slot_id, slot_label }),
        rooms: rooms.into_records(|room_label, room_id| RoomRecord { room_id, room_label }),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::directory::CourseRow;
    use crate::extract::grid::Assignment;

    fn course(code: &str, name: &str, faculty: &str) -> CourseRow {
        CourseRow {
            course_code: code.into(),
            course_name: name.into(),
            faculty_name: faculty.into(),
            department: None,
        }
    }

    fn assignment(day: &str, slot: &str, room: &str, code: &str, faculty: &str) -> Assignment {
        Assignment {
            day: day.into(),
            slot: slot.into(),
            room: room.into(),
            course_code: code.into(),
            faculty_name: faculty.into(),
        }
    }

    fn page(courses: Vec<CourseRow>, schedule: Vec<Assignment>) -> PageExtract {
        PageExtract {
            courses,
            schedule,
            class_details: None,
        }
    }

    #[test]
    fn surrogate_ids_follow_first_seen_order() {
        let pages = vec![page(
            vec![
                course("C1", "Machine Learning", "Dr. B"),
                course("C2", "Computer Networks", "Dr. A"),
            ],
            vec![
                assignment("Tuesday", "09:00-10:00", "101", "C2", "Dr. A"),
                assignment("Monday", "10:00-11:00", "102", "C1", "Dr. B"),
            ],
        )];
        let tables = normalize_document(&pages, &CourseMap::builtin());

        assert_eq!(tables.faculty[0].faculty_name, "Dr. B");
        assert_eq!(tables.faculty[0].faculty_id, 0);
        assert_eq!(tables.faculty[1].faculty_name, "Dr. A");
        assert_eq!(tables.days[0].day_name, "Tuesday");
        assert_eq!(tables.days[1].day_name, "Monday");
        assert_eq!(tables.entries.len(), 2);
        assert_eq!(tables.entries[0].time_table_id, 0);
        assert_eq!(tables.entries[1].time_table_id, 1);
    }

    #[test]
    fn comp_room_is_canonicalized_and_still_resolves() {
        let pages = vec![page(
            vec![course("C1", "Machine Learning", "Dr. B")],
            vec![assignment("Monday", "09:00-10:00", "Comp", "C1", "Dr. B")],
        )];
        let tables = normalize_document(&pages, &CourseMap::builtin());

        assert_eq!(tables.rooms.len(), 1);
        assert_eq!(tables.rooms[0].room_label, "Computer block");
        assert_eq!(tables.entries.len(), 1);
        assert_eq!(tables.entries[0].room_id, tables.rooms[0].room_id);
    }

    #[test]
    fn unresolvable_fact_rows_are_dropped() {
        let pages = vec![page(
            vec![course("C1", "Machine Learning", "Dr. B")],
            vec![
                assignment("Monday", "09:00-10:00", "101", "C1", "Dr. B"),
                // No course row for this pair anywhere in the document.
                assignment("Monday", "09:00-10:00", "101", "C9", "Dr. Z"),
            ],
        )];
        let tables = normalize_document(&pages, &CourseMap::builtin());
        assert_eq!(tables.entries.len(), 1);
        assert_eq!(tables.entries[0].fs_id, 0);
    }

    #[test]
    fn normalization_is_idempotent() {
        let pages = vec![page(
            vec![
                course("Free", "Free", "Free"),
                course("C1", "Database Management Systems", "Dr. A"),
            ],
            vec![
                assignment("Monday", "09:00-10:00", "204", "C1", "Dr. A"),
                assignment("Monday", "10:00-11:00", "Free", "Free", "Free"),
            ],
        )];
        let map = CourseMap::builtin();
        let first = normalize_document(&pages, &map);
        let second = normalize_document(&pages, &map);
        assert_eq!(first.subjects, second.subjects);
        assert_eq!(first.faculty, second.faculty);
        assert_eq!(first.faculty_subjects, second.faculty_subjects);
        assert_eq!(first.days, second.days);
        assert_eq!(first.slots, second.slots);
        assert_eq!(first.rooms, second.rooms);
        assert_eq!(first.entries, second.entries);
    }
}
