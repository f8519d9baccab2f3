use std::path::PathBuf;

use anyhow::{Context, Result};
use csv::Writer;
use tracing::info;

use crate::model::ClassroomExportRow;

fn sample_row() -> ClassroomExportRow {
    ClassroomExportRow {
        assignment_name: "hello-world".to_string(),
        assignment_url: "https://classroom.github.com/classrooms/example/assignments/hello-world".to_string(),
        starter_code_url: "https://github.com/example/hello-world".to_string(),
        github_username: "octocat".to_string(),
        roster_identifier: "octocat@example.edu".to_string(),
        student_repository_name: "hello-world-octocat".to_string(),
        student_repository_url: "https://github.com/example/hello-world-octocat".to_string(),
        submission_timestamp: "2024-09-01 12:00:00 UTC".to_string(),
        points_awarded: "100".to_string(),
        points_available: "100".to_string(),
    }
}

/// Writes a sample grade export with the standard header and one example row.
pub fn init_csv(filename: &str) -> Result<PathBuf> {
    let csv_filename = if filename.ends_with(".csv") {
        filename.to_string()
    } else {
        format!("{}.csv", filename)
    };

    let mut wtr = Writer::from_path(&csv_filename)
        .with_context(|| format!("failed to create {csv_filename}"))?;
    wtr.serialize(sample_row())?;
    wtr.flush()?;
    info!(path = %csv_filename, "created sample classroom export");
    Ok(PathBuf::from(csv_filename))
}
