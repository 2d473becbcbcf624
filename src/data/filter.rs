use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dataset, Value};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Row selection by column values
// ---------------------------------------------------------------------------

/// Per-column selection: maps column_name → set of accepted values.
/// Columns absent from the map are unconstrained.
pub type Filter = BTreeMap<String, BTreeSet<Value>>;

/// Return indices of rows that pass all active filters.
///
/// A row passes a column filter when:
/// * The filter set for that column is empty → nothing selected → fails
/// * The row's value for that column is in the selected set → passes
/// * The row lacks the column → passes only if `Null` is selected
pub fn filtered_indices(dataset: &Dataset, filters: &Filter) -> Vec<usize> {
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            filters.iter().all(|(col, selected)| {
                if selected.is_empty() {
                    return false;
                }
                match row.get(col) {
                    Some(val) => selected.contains(val),
                    None => selected.contains(&Value::Null),
                }
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Group row indices by the distinct values of `column`, ascending by value.
pub fn group_indices(dataset: &Dataset, column: &str) -> Result<BTreeMap<Value, Vec<usize>>> {
    let mut groups: BTreeMap<Value, Vec<usize>> = dataset
        .levels(column)?
        .iter()
        .map(|level| (level.clone(), Vec::new()))
        .collect();
    for i in 0..dataset.len() {
        if let Some(val) = dataset.value(i, column) {
            groups.entry(val.clone()).or_default().push(i);
        }
    }
    groups.retain(|_, rows| !rows.is_empty());
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;
    use crate::error::Error;

    fn dataset() -> Dataset {
        let rows: Vec<Row> = [("a", 1), ("b", 2), ("a", 3), ("c", 4)]
            .iter()
            .map(|(g, x)| {
                Row::from([
                    ("g".to_string(), Value::String(g.to_string())),
                    ("x".to_string(), Value::Integer(*x)),
                ])
            })
            .collect();
        Dataset::from_rows(rows, vec!["g".into(), "x".into()])
    }

    #[test]
    fn filter_keeps_selected_values_only() {
        let ds = dataset();
        let filters = Filter::from([(
            "g".to_string(),
            BTreeSet::from([Value::String("a".into()), Value::String("c".into())]),
        )]);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2, 3]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let ds = dataset();
        let filters = Filter::from([("g".to_string(), BTreeSet::new())]);
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn no_filters_keeps_all_rows() {
        assert_eq!(filtered_indices(&dataset(), &Filter::new()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn groups_follow_level_order() {
        let groups = group_indices(&dataset(), "g").unwrap();
        let collected: Vec<_> = groups.into_iter().collect();
        assert_eq!(
            collected,
            vec![
                (Value::String("a".into()), vec![0, 2]),
                (Value::String("b".into()), vec![1]),
                (Value::String("c".into()), vec![3]),
            ]
        );
    }

    #[test]
    fn grouping_by_unknown_column_fails() {
        assert!(matches!(
            group_indices(&dataset(), "missing"),
            Err(Error::MissingColumn(_))
        ));
    }
}
