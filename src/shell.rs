use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::error::{ImportError, SaveError};
use crate::import::import_csv;
use crate::model::Gradebook;
use crate::render::render;
use crate::report::save_xlsx;

const MENU: &str = "Menu:\n1. Add Assignment from File\n2. Create Excel Sheet (end with .xlsx)\n3. Exit\n";

/// Imports one export and merges it. On error the gradebook is left as it was.
pub fn import_into(gradebook: &mut Gradebook, path: &Path) -> Result<(usize, usize), ImportError> {
    let entries = import_csv(path)?;
    let counts = (entries.record_count(), entries.student_count());
    gradebook.merge(entries);
    Ok(counts)
}

pub struct ExportSummary {
    pub path: PathBuf,
    pub passed: usize,
    pub failed: usize,
}

pub fn export(gradebook: &Gradebook, path: &Path) -> Result<ExportSummary, SaveError> {
    if gradebook.is_empty() {
        warn!("exporting an empty gradebook");
    }
    let grid = render(gradebook);
    let path = save_xlsx(&grid, path)?;
    Ok(ExportSummary {
        path,
        passed: grid.passed(),
        failed: grid.failed(),
    })
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Runs the menu until the user exits or input ends, returning the gradebook
/// built during the session.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Gradebook> {
    let mut gradebook = Gradebook::new();
    loop {
        write!(output, "{MENU}")?;
        let Some(choice) = prompt(&mut input, &mut output, "Select an option: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(path) = prompt(&mut input, &mut output, "Enter the path to the CSV file: ")? else {
                    break;
                };
                match import_into(&mut gradebook, Path::new(&path)) {
                    Ok((records, students)) => writeln!(
                        output,
                        "Assignments added successfully. ({records} records for {students} students)"
                    )?,
                    Err(err) => {
                        warn!(%path, error = %err, "import failed");
                        writeln!(output, "Import failed: {err}")?;
                    }
                }
            }
            "2" => {
                let Some(path) = prompt(&mut input, &mut output, "Enter the path to save the Excel file: ")? else {
                    break;
                };
                match export(&gradebook, Path::new(&path)) {
                    Ok(summary) => writeln!(
                        output,
                        "Excel file created successfully. ({}: {} passed, {} failed)",
                        summary.path.display(),
                        summary.passed,
                        summary.failed
                    )?,
                    Err(err) => {
                        warn!(%path, error = %err, "export failed");
                        writeln!(output, "Export failed: {err}")?;
                    }
                }
            }
            "3" => {
                writeln!(output, "Exiting program.")?;
                break;
            }
            _ => writeln!(output, "Invalid option. Please try again.")?,
        }
    }
    Ok(gradebook)
}
