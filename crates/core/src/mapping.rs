//! Course name to short-code mapping.
//!
//! Legend tables spell courses out in full ("Database Management Systems")
//! while grid cells use short codes ("DBMS"). The join between the two
//! happens in short-code space, driven by this caller-supplied table.

use indexmap::IndexMap;

/// Sentinel used for unscheduled cells throughout the pipeline output.
pub const FREE: &str = "Free";

/// Maps a full course name to the short code used in grid cells.
///
/// The `Free -> Free` entry is always present: the synthetic Free course row
/// must survive the short-code join or empty cells would be dropped.
/// Unknown full names have no short code and silently fail the join
/// downstream.
#[derive(Clone, Debug, Default)]
pub struct CourseMap {
    entries: IndexMap<String, String>,
}

impl CourseMap {
    pub fn new() -> Self {
        let mut map = Self {
            entries: IndexMap::new(),
        };
        map.insert(FREE, FREE);
        map
    }

    /// The course table observed in the source institution's timetables.
    pub fn builtin() -> Self {
        let mut map = Self::new();
        for (name, code) in [
            ("Statistics for Engineers", "Statis"),
            ("Database Management Systems", "DBMS"),
            ("Java Programming", "Java"),
            ("Computer Architecture and Organization", "CAO"),
            ("Excel Skills", "EXSEL"),
            ("Machine Learning", "ML"),
            ("Digital Principles and System Design", "DPSD"),
            ("University Elective", "UE"),
            ("Computer Networks", "CN"),
            ("Automata and Compiler Design", "ACD"),
            ("Pattern and Anomaly Detection", "PAD"),
            ("Foundation on Innovation and Entrepreneurship", "FIE"),
            ("Design Project II", "EXSEL"),
            ("Secured Computing", "SC"),
            ("Smarter City", "SCITY"),
            ("Big Data Analytics", "BA"),
            ("Design Project I", "EXSEL"),
            ("Ethical Hacking & Penetration Testing", "EHPT"),
        ] {
            map.insert(name, code);
        }
        map
    }

    pub fn insert(&mut self, full_name: impl Into<String>, short_code: impl Into<String>) {
        self.entries.insert(full_name.into(), short_code.into());
    }

    /// Short code for a full course name, if the name is recognized.
    pub fn short_code(&self, full_name: &str) -> Option<&str> {
        self.entries.get(full_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, S: Into<String>> FromIterator<(N, S)> for CourseMap {
    fn from_iter<T: IntoIterator<Item = (N, S)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (name, code) in iter {
            map.insert(name, code);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_entry_is_always_present() {
        let map = CourseMap::new();
        assert_eq!(map.short_code("Free"), Some("Free"));

        let map: CourseMap = [("Machine Learning", "ML")].into_iter().collect();
        assert_eq!(map.short_code("Free"), Some("Free"));
        assert_eq!(map.short_code("Machine Learning"), Some("ML"));
    }

    #[test]
    fn unknown_names_have_no_code() {
        let map = CourseMap::builtin();
        assert_eq!(map.short_code("Underwater Basket Weaving"), None);
        assert_eq!(map.short_code("Database Management Systems"), Some("DBMS"));
    }
}
