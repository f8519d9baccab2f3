use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::SaveError;
use crate::import::clean_path;
use crate::render::{CellStyle, CellValue, Grid, NOT_AVAILABLE};

pub const SHEET_NAME: &str = "Assignments";

const PASS_FILL: u32 = 0x90EE90;
const PASS_FONT: u32 = 0x006400;
const FAIL_FILL: u32 = 0xFFCCCB;
const FAIL_FONT: u32 = 0x8B0000;

const USERNAME_WIDTH: f64 = 24.0;
const SCORE_WIDTH: f64 = 14.0;

struct ReportFormats {
    header: Format,
    plain: Format,
    pass: Format,
    fail: Format,
}

impl ReportFormats {
    fn new() -> Self {
        let cell = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::VerticalCenter);
        Self {
            header: cell
                .clone()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_text_wrap(),
            plain: cell.clone().set_align(FormatAlign::Left),
            pass: cell
                .clone()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(PASS_FILL))
                .set_font_color(Color::RGB(PASS_FONT)),
            fail: cell
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(FAIL_FILL))
                .set_font_color(Color::RGB(FAIL_FONT)),
        }
    }

    fn for_style(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Header => &self.header,
            CellStyle::Plain => &self.plain,
            CellStyle::Pass => &self.pass,
            CellStyle::Fail => &self.fail,
        }
    }
}

/// Quotes are trimmed and `.xlsx` is appended when the extension is missing.
pub fn output_path(raw: &Path) -> Result<PathBuf, SaveError> {
    let mut path = clean_path(raw);
    if path.as_os_str().is_empty() {
        return Err(SaveError::EmptyPath);
    }
    let is_xlsx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if !is_xlsx {
        let mut name = path.clone().into_os_string();
        name.push(".xlsx");
        path = PathBuf::from(name);
    }
    Ok(path)
}

fn write_grid(ws: &mut Worksheet, grid: &Grid, fmt: &ReportFormats) -> Result<(), XlsxError> {
    ws.set_name(SHEET_NAME)?;
    for (r, row) in grid.rows.iter().enumerate() {
        let r = r as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            let format = fmt.for_style(cell.style);
            match &cell.value {
                CellValue::Label(text) => {
                    ws.write_string_with_format(r, c, text, format)?;
                }
                CellValue::Score(points) => {
                    ws.write_number_with_format(r, c, *points as f64, format)?;
                }
                CellValue::NotAvailable => {
                    ws.write_string_with_format(r, c, NOT_AVAILABLE, format)?;
                }
                CellValue::Verdict(verdict) => {
                    ws.write_string_with_format(r, c, verdict.as_str(), format)?;
                }
            }
        }
    }

    let columns = grid.header().len() as u16;
    ws.set_column_width(0, USERNAME_WIDTH)?;
    for c in 1..columns {
        ws.set_column_width(c, SCORE_WIDTH)?;
    }
    ws.set_freeze_panes(1, 1)?;
    Ok(())
}

/// Writes the grid to a single-sheet workbook and returns the path written.
pub fn save_xlsx(grid: &Grid, path: &Path) -> Result<PathBuf, SaveError> {
    let path = output_path(path)?;
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let fmt = ReportFormats::new();

    let wrap = |source| SaveError::Xlsx {
        path: path.clone(),
        source,
    };
    write_grid(worksheet, grid, &fmt).map_err(wrap)?;
    workbook.save(&path).map_err(wrap)?;

    info!(
        path = %path.display(),
        students = grid.students().len(),
        passed = grid.passed(),
        "report written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gradebook, Record};
    use crate::render::render;
    use calamine::{Data, Reader, Xlsx, open_workbook};

    fn sample() -> Gradebook {
        [
            ("user1", Record::new("Assignment1", 100)),
            ("user2", Record::new("Assignment2", 90)),
            ("user3", Record::new("Assignment1", 100)),
            ("user3", Record::new("Assignment2", 100)),
        ]
        .into_iter()
        .collect()
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn workbook_matches_rendered_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_xlsx(&render(&sample()), &dir.path().join("grades.xlsx")).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let cell = |r: u32, c: u32| range.get_value((r, c)).cloned().unwrap();

        assert_eq!(cell(0, 0), text("GitHub Username"));
        assert_eq!(cell(0, 1), text("Assignment1"));
        assert_eq!(cell(0, 2), text("Assignment2"));
        assert_eq!(cell(0, 3), text("Pass/Fail"));

        assert_eq!(cell(1, 0), text("user1"));
        assert_eq!(cell(1, 1), Data::Float(100.0));
        assert_eq!(cell(1, 2), text("N/A"));
        assert_eq!(cell(1, 3), text("Fail"));

        assert_eq!(cell(2, 0), text("user2"));
        assert_eq!(cell(2, 1), text("N/A"));
        assert_eq!(cell(2, 2), Data::Float(90.0));
        assert_eq!(cell(2, 3), text("Fail"));

        assert_eq!(cell(3, 0), text("user3"));
        assert_eq!(cell(3, 1), Data::Float(100.0));
        assert_eq!(cell(3, 2), Data::Float(100.0));
        assert_eq!(cell(3, 3), text("Pass"));
    }

    #[test]
    fn extension_is_added_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_xlsx(&render(&sample()), &dir.path().join("grades")).unwrap();
        assert_eq!(path, dir.path().join("grades.xlsx"));
        assert!(path.exists());
    }

    #[test]
    fn quoted_output_path_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.xlsx");
        let quoted = PathBuf::from(format!("\"{}\"", target.display()));
        let path = save_xlsx(&render(&sample()), &quoted).unwrap();
        assert_eq!(path, target);
    }

    #[test]
    fn unwritable_path_is_a_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grades.xlsx");
        let err = save_xlsx(&render(&sample()), &path).unwrap_err();
        assert!(matches!(err, SaveError::Xlsx { .. }));
    }

    #[test]
    fn empty_path_is_rejected() {
        let err = output_path(Path::new("\"\"")).unwrap_err();
        assert!(matches!(err, SaveError::EmptyPath));
    }
}
