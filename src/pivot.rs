use std::collections::HashMap;

use indexmap::IndexSet;

use crate::model::{Gradebook, Record};

/// Distinct assignment names in discovery order: students in gradebook order,
/// then each student's records in import order.
///
/// The result depends on import order and is not sorted.
pub fn build_columns(gradebook: &Gradebook) -> Vec<String> {
    let mut columns: IndexSet<&str> = IndexSet::new();
    for (_, records) in gradebook.iter() {
        for record in records {
            columns.insert(record.assignment.as_str());
        }
    }
    columns.into_iter().map(str::to_owned).collect()
}

/// Assignment name to points for one student. When the same assignment was
/// imported more than once, the record imported last wins.
pub fn latest_scores(records: &[Record]) -> HashMap<&str, i32> {
    records
        .iter()
        .map(|record| (record.assignment.as_str(), record.points))
        .collect()
}
