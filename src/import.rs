use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::ImportError;
use crate::model::{Gradebook, Record};

// Positions in a GitHub Classroom grade export.
pub const ASSIGNMENT_FIELD: usize = 0;
pub const USERNAME_FIELD: usize = 3;
pub const POINTS_FIELD: usize = 8;

const MIN_FIELDS: usize = POINTS_FIELD + 1;

/// Removes every leading and trailing `"`, leaving inner quotes alone.
pub fn strip_quotes(field: &str) -> &str {
    field.trim_matches('"')
}

/// Paths pasted from a file manager often arrive wrapped in quotes.
pub fn clean_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(strip_quotes(s.trim())),
        None => path.to_path_buf(),
    }
}

/// Reads one classroom export into a fresh gradebook.
///
/// Nothing is merged anywhere; a failure leaves the caller's state untouched.
pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<Gradebook, ImportError> {
    let path = clean_path(path.as_ref());
    let file = File::open(&path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ImportError::FileNotFound(path.clone()),
        _ => ImportError::Io(err),
    })?;
    let gradebook = parse_export(file)?;
    debug!(
        path = %path.display(),
        records = gradebook.record_count(),
        students = gradebook.student_count(),
        "imported classroom export"
    );
    Ok(gradebook)
}

/// Parses export text. The first line is a header. Fields are split on every
/// comma with no quote handling, so a comma inside a quoted value shifts the
/// remaining columns.
pub fn parse_export<R: Read>(reader: R) -> Result<Gradebook, ImportError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut gradebook = Gradebook::new();
    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, |pos| pos.line());
        if row.len() < MIN_FIELDS {
            return Err(ImportError::MalformedRow {
                line,
                expected: MIN_FIELDS,
                found: row.len(),
            });
        }

        let assignment = strip_quotes(&row[ASSIGNMENT_FIELD]);
        let student = strip_quotes(&row[USERNAME_FIELD]);
        let raw_points = strip_quotes(&row[POINTS_FIELD]);
        let points = raw_points
            .trim()
            .parse::<i32>()
            .map_err(|source| ImportError::Format {
                line,
                value: raw_points.to_string(),
                source,
            })?;

        gradebook.push(student, Record::new(assignment, points));
    }
    Ok(gradebook)
}
