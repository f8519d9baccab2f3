use indexmap::IndexMap;
use serde::Serialize;

/// One graded submission: the assignment it belongs to and the points awarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub assignment: String,
    pub points: i32,
}

impl Record {
    pub fn new(assignment: impl Into<String>, points: i32) -> Self {
        Self {
            assignment: assignment.into(),
            points,
        }
    }
}

/// Records keyed by GitHub username, iterated in the order students were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gradebook {
    students: IndexMap<String, Vec<Record>>,
}

impl Gradebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, student: impl Into<String>, record: Record) {
        self.students.entry(student.into()).or_default().push(record);
    }

    /// Appends every record in `entries` to the matching student, creating
    /// students that are not present yet. Duplicates are kept as-is.
    pub fn merge(&mut self, entries: Gradebook) {
        for (student, records) in entries.students {
            self.students.entry(student).or_default().extend(records);
        }
    }

    #[cfg(test)]
    pub fn get(&self, student: &str) -> Option<&[Record]> {
        self.students.get(student).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.students
            .iter()
            .map(|(student, records)| (student.as_str(), records.as_slice()))
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn record_count(&self) -> usize {
        self.students.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Record)> for Gradebook {
    fn from_iter<I: IntoIterator<Item = (S, Record)>>(iter: I) -> Self {
        let mut gradebook = Gradebook::new();
        for (student, record) in iter {
            gradebook.push(student, record);
        }
        gradebook
    }
}

/// A row of a GitHub Classroom grade export, as written by `init`.
#[derive(Debug, Serialize)]
pub struct ClassroomExportRow {
    pub assignment_name: String,
    pub assignment_url: String,
    pub starter_code_url: String,
    pub github_username: String,
    pub roster_identifier: String,
    pub student_repository_name: String,
    pub student_repository_url: String,
    pub submission_timestamp: String,
    pub points_awarded: String,
    pub points_available: String,
}
