use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Grouping uses `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Interpret the value as an `f64` for model fitting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Guess the type of a raw text cell.
pub fn guess_value_type(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Row – one record of the table
// ---------------------------------------------------------------------------

/// One row: column_name → value.
pub type Row = BTreeMap<String, Value>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
///
/// Fields are private: once built, a dataset cannot be mutated, so index-based
/// splits taken over it stay valid for its whole lifetime.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<Row>,
    column_names: Vec<String>,
    unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl Dataset {
    /// Build column indices from loaded rows.
    ///
    /// `column_order` fixes the column order (usually the file header);
    /// columns that only appear in rows are appended in name order.
    pub fn from_rows(rows: Vec<Row>, column_order: Vec<String>) -> Self {
        let mut column_names = column_order;
        let mut seen: BTreeSet<String> = column_names.iter().cloned().collect();
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in row {
                if seen.insert(col.clone()) {
                    column_names.push(col.clone());
                }
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        Dataset {
            rows,
            column_names,
            unique_values,
        }
    }

    /// Build a dataset from named numeric columns of equal length.
    pub fn from_columns<C: AsRef<[f64]>>(columns: &[(&str, C)]) -> Result<Self> {
        let n = columns.first().map(|(_, v)| v.as_ref().len()).unwrap_or(0);
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.as_ref().len() != n) {
            return Err(Error::InvalidParameter(format!(
                "column '{name}' has {} values, expected {n}",
                values.as_ref().len()
            )));
        }
        let rows: Vec<Row> = (0..n)
            .map(|i| {
                columns
                    .iter()
                    .map(|(name, values)| (name.to_string(), Value::Float(values.as_ref()[i])))
                    .collect()
            })
            .collect();
        let order = columns.iter().map(|(name, _)| name.to_string()).collect();
        Ok(Self::from_rows(rows, order))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Ordered column names.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.unique_values.contains_key(column) || self.column_names.iter().any(|c| c == column)
    }

    /// Sorted distinct values of a column (its factor levels).
    pub fn levels(&self, column: &str) -> Result<&BTreeSet<Value>> {
        self.unique_values
            .get(column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    /// Value of `column` at `row`; a row without the column reads as `Null`.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        const NULL: &Value = &Value::Null;
        self.rows
            .get(row)
            .map(|r| r.get(column).unwrap_or(NULL))
    }

    /// Gather a numeric column for the given row indices.
    pub fn numeric_at(&self, column: &str, indices: &[usize]) -> Result<Vec<f64>> {
        if !self.has_column(column) {
            return Err(Error::MissingColumn(column.to_string()));
        }
        indices
            .iter()
            .map(|&i| {
                self.value(i, column)
                    .and_then(Value::as_f64)
                    .ok_or_else(|| Error::NonNumeric {
                        column: column.to_string(),
                        row: i,
                    })
            })
            .collect()
    }

    /// The whole numeric column.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>> {
        let all: Vec<usize> = (0..self.len()).collect();
        self.numeric_at(column, &all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn levels_are_sorted_and_distinct() {
        let ds = Dataset::from_rows(
            vec![
                row(&[("g", Value::String("b".into()))]),
                row(&[("g", Value::String("a".into()))]),
                row(&[("g", Value::String("b".into()))]),
            ],
            vec!["g".into()],
        );
        let levels: Vec<_> = ds.levels("g").unwrap().iter().cloned().collect();
        assert_eq!(
            levels,
            vec![Value::String("a".into()), Value::String("b".into())]
        );
    }

    #[test]
    fn numeric_column_reports_missing_and_non_numeric() {
        let ds = Dataset::from_rows(
            vec![
                row(&[("x", Value::Integer(1)), ("label", Value::String("a".into()))]),
                row(&[("x", Value::Float(2.5)), ("label", Value::String("b".into()))]),
            ],
            vec!["x".into(), "label".into()],
        );
        assert_eq!(ds.numeric_column("x").unwrap(), vec![1.0, 2.5]);
        assert!(matches!(
            ds.numeric_column("nope"),
            Err(Error::MissingColumn(c)) if c == "nope"
        ));
        assert!(matches!(
            ds.numeric_column("label"),
            Err(Error::NonNumeric { row: 0, .. })
        ));
    }

    #[test]
    fn from_columns_rejects_ragged_input() {
        let x: &[f64] = &[1.0, 2.0];
        let y: &[f64] = &[1.0];
        assert!(matches!(
            Dataset::from_columns(&[("x", x), ("y", y)]),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn column_order_follows_header_then_extras() {
        let ds = Dataset::from_rows(
            vec![row(&[("b", Value::Null), ("a", Value::Null), ("z", Value::Null)])],
            vec!["b".into(), "a".into()],
        );
        assert_eq!(ds.column_names(), &["b", "a", "z"]);
    }

    #[test]
    fn guess_value_type_infers_cells() {
        assert_eq!(guess_value_type(""), Value::Null);
        assert_eq!(guess_value_type("3"), Value::Integer(3));
        assert_eq!(guess_value_type("3.5"), Value::Float(3.5));
        assert_eq!(guess_value_type("true"), Value::Bool(true));
        assert_eq!(guess_value_type("abc"), Value::String("abc".into()));
    }
}
