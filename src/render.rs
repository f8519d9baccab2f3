use tracing::debug;

use crate::model::Gradebook;
use crate::pivot::{build_columns, latest_scores};

/// Scores below this fail the assignment and therefore the student.
pub const PASS_THRESHOLD: i32 = 100;

pub const USERNAME_HEADER: &str = "GitHub Username";
pub const VERDICT_HEADER: &str = "Pass/Fail";
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "Pass",
            Verdict::Fail => "Fail",
        }
    }

    fn style(self) -> CellStyle {
        match self {
            Verdict::Pass => CellStyle::Pass,
            Verdict::Fail => CellStyle::Fail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Label(String),
    Score(i32),
    NotAvailable,
    Verdict(Verdict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Header,
    Plain,
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    fn header(text: &str) -> Self {
        Self {
            value: CellValue::Label(text.to_string()),
            style: CellStyle::Header,
        }
    }

    fn plain(text: &str) -> Self {
        Self {
            value: CellValue::Label(text.to_string()),
            style: CellStyle::Plain,
        }
    }
}

/// Rendered report. Row 0 is the header; every other row is one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn header(&self) -> &[Cell] {
        &self.rows[0]
    }

    pub fn students(&self) -> &[Vec<Cell>] {
        &self.rows[1..]
    }

    pub fn passed(&self) -> usize {
        self.count(Verdict::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(Verdict::Fail)
    }

    fn count(&self, verdict: Verdict) -> usize {
        self.students()
            .iter()
            .filter(|row| {
                row.last()
                    .is_some_and(|cell| cell.value == CellValue::Verdict(verdict))
            })
            .count()
    }
}

pub fn render(gradebook: &Gradebook) -> Grid {
    let columns = build_columns(gradebook);
    render_columns(gradebook, &columns)
}

/// Builds the report for an explicit column order.
pub fn render_columns(gradebook: &Gradebook, columns: &[String]) -> Grid {
    let mut header = Vec::with_capacity(columns.len() + 2);
    header.push(Cell::header(USERNAME_HEADER));
    header.extend(columns.iter().map(|name| Cell::header(name)));
    header.push(Cell::header(VERDICT_HEADER));

    let mut rows = Vec::with_capacity(gradebook.student_count() + 1);
    rows.push(header);

    for (student, records) in gradebook.iter() {
        let scores = latest_scores(records);
        let mut row = Vec::with_capacity(columns.len() + 2);
        row.push(Cell::plain(student));

        let mut verdict = Verdict::Pass;
        for name in columns {
            let cell = match scores.get(name.as_str()) {
                Some(&points) if points >= PASS_THRESHOLD => Cell {
                    value: CellValue::Score(points),
                    style: CellStyle::Pass,
                },
                Some(&points) => {
                    verdict = Verdict::Fail;
                    Cell {
                        value: CellValue::Score(points),
                        style: CellStyle::Fail,
                    }
                }
                None => {
                    verdict = Verdict::Fail;
                    Cell {
                        value: CellValue::NotAvailable,
                        style: CellStyle::Fail,
                    }
                }
            };
            row.push(cell);
        }

        row.push(Cell {
            value: CellValue::Verdict(verdict),
            style: verdict.style(),
        });
        rows.push(row);
    }

    let grid = Grid { rows };
    debug!(
        students = gradebook.student_count(),
        assignments = columns.len(),
        passed = grid.passed(),
        "rendered gradebook"
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn label(cell: &Cell) -> &str {
        match &cell.value {
            CellValue::Label(text) => text,
            other => panic!("expected label, got {other:?}"),
        }
    }

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

    #[test]
    fn header_lists_assignments_between_fixed_labels() {
        let grid = render(&sample());
        let header: Vec<_> = grid.header().iter().map(label).collect();
        assert_eq!(
            header,
            ["GitHub Username", "Assignment1", "Assignment2", "Pass/Fail"]
        );
        assert!(grid.header().iter().all(|c| c.style == CellStyle::Header));
    }

    #[test]
    fn rows_match_classroom_scenario() {
        let grid = render(&sample());
        let rows = grid.students();
        assert_eq!(rows.len(), 3);

        let values: Vec<Vec<CellValue>> = rows
            .iter()
            .map(|row| row.iter().map(|c| c.value.clone()).collect())
            .collect();
        assert_eq!(
            values,
            vec![
                vec![
                    CellValue::Label("user1".into()),
                    CellValue::Score(100),
                    CellValue::NotAvailable,
                    CellValue::Verdict(Verdict::Fail),
                ],
                vec![
                    CellValue::Label("user2".into()),
                    CellValue::NotAvailable,
                    CellValue::Score(90),
                    CellValue::Verdict(Verdict::Fail),
                ],
                vec![
                    CellValue::Label("user3".into()),
                    CellValue::Score(100),
                    CellValue::Score(100),
                    CellValue::Verdict(Verdict::Pass),
                ],
            ]
        );
        assert_eq!(grid.passed(), 1);
        assert_eq!(grid.failed(), 2);
    }

    #[test]
    fn styles_follow_threshold() {
        let grid = render(&sample());
        let user1 = &grid.students()[0];
        assert_eq!(user1[0].style, CellStyle::Plain);
        assert_eq!(user1[1].style, CellStyle::Pass);
        assert_eq!(user1[2].style, CellStyle::Fail);
        assert_eq!(user1[3].style, CellStyle::Fail);

        let user2 = &grid.students()[1];
        assert_eq!(user2[2].style, CellStyle::Fail);

        let user3 = &grid.students()[2];
        assert!(user3[1..].iter().all(|c| c.style == CellStyle::Pass));
    }

    #[test]
    fn score_just_below_threshold_fails() {
        let gradebook: Gradebook = [("amy", Record::new("hw1", PASS_THRESHOLD - 1))]
            .into_iter()
            .collect();
        let grid = render(&gradebook);
        assert_eq!(
            grid.students()[0].last().unwrap().value,
            CellValue::Verdict(Verdict::Fail)
        );
    }

    #[test]
    fn scores_above_threshold_pass() {
        let gradebook: Gradebook = [
            ("amy", Record::new("hw1", 100)),
            ("amy", Record::new("hw2", 120)),
        ]
        .into_iter()
        .collect();
        let grid = render(&gradebook);
        assert_eq!(grid.passed(), 1);
    }

    #[test]
    fn missing_assignment_fails_regardless_of_other_scores() {
        let gradebook: Gradebook = [
            ("amy", Record::new("A", 100)),
            ("ben", Record::new("A", 100)),
            ("ben", Record::new("B", 100)),
        ]
        .into_iter()
        .collect();
        let grid = render(&gradebook);
        let amy = &grid.students()[0];
        assert_eq!(amy[2].value, CellValue::NotAvailable);
        assert_eq!(amy[3].value, CellValue::Verdict(Verdict::Fail));
    }

    // Documented quirk: the last import of an assignment decides the cell.
    #[test]
    fn reimported_score_overrides_earlier_one() {
        let gradebook: Gradebook = [
            ("amy", Record::new("hw1", 100)),
            ("amy", Record::new("hw1", 50)),
        ]
        .into_iter()
        .collect();
        let grid = render(&gradebook);
        let amy = &grid.students()[0];
        assert_eq!(grid.header().len(), 3);
        assert_eq!(amy[1].value, CellValue::Score(50));
        assert_eq!(amy[2].value, CellValue::Verdict(Verdict::Fail));
    }

    #[test]
    fn explicit_column_order_is_respected() {
        let columns = vec!["Assignment2".to_string(), "Assignment1".to_string()];
        let grid = render_columns(&sample(), &columns);
        let header: Vec<_> = grid.header().iter().map(label).collect();
        assert_eq!(
            header,
            ["GitHub Username", "Assignment2", "Assignment1", "Pass/Fail"]
        );
        assert_eq!(grid.students()[1][1].value, CellValue::Score(90));
    }

    #[test]
    fn empty_gradebook_renders_header_only() {
        let grid = render(&Gradebook::new());
        let header: Vec<_> = grid.header().iter().map(label).collect();
        assert_eq!(header, ["GitHub Username", "Pass/Fail"]);
        assert!(grid.students().is_empty());
    }
}
