use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for statistics and charting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

/// A single named column (all cells, in row order).
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

/// Classification of a column for charting and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-null cell is an integer or float, with at least one non-null.
    Numeric,
    /// Everything else (text, bools, mixed, all-null).
    Categorical,
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        let mut seen_number = false;
        for v in &self.values {
            match v {
                CellValue::Integer(_) | CellValue::Float(_) => seen_number = true,
                CellValue::Null => {}
                _ => return ColumnKind::Categorical,
            }
        }
        if seen_number {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    /// All non-null cells as `f64`, in row order (numeric columns).
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset, column-major, row order preserved from the file.
/// Read-only after loading; replaced wholesale when a new file is opened.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from equal-length columns.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(|c| c.values.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.values.len() == row_count));
        Table { columns, row_count }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Numeric)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Names of categorical columns, in table order.
    pub fn categorical_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind() == ColumnKind::Categorical)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// The first `n` rows, as display strings per column (dataframe preview).
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        let n = n.min(self.row_count);
        (0..n)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values[row].to_string())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str, values: Vec<CellValue>) -> Column {
        Column {
            name: name.to_string(),
            values,
        }
    }

    #[test]
    fn numeric_column_with_nulls_is_numeric() {
        let c = col(
            "price",
            vec![
                CellValue::Float(1.5),
                CellValue::Null,
                CellValue::Integer(3),
            ],
        );
        assert_eq!(c.kind(), ColumnKind::Numeric);
        assert_eq!(c.numeric_values(), vec![1.5, 3.0]);
    }

    #[test]
    fn mixed_column_is_categorical() {
        let c = col(
            "code",
            vec![CellValue::Integer(1), CellValue::Text("A1".into())],
        );
        assert_eq!(c.kind(), ColumnKind::Categorical);
    }

    #[test]
    fn all_null_column_is_categorical() {
        let c = col("empty", vec![CellValue::Null, CellValue::Null]);
        assert_eq!(c.kind(), ColumnKind::Categorical);
    }

    #[test]
    fn head_truncates_and_preserves_order() {
        let t = Table::from_columns(vec![
            col(
                "region",
                vec![
                    CellValue::Text("north".into()),
                    CellValue::Text("south".into()),
                ],
            ),
            col("sales", vec![CellValue::Integer(10), CellValue::Integer(20)]),
        ]);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 2);
        let head = t.head(5);
        assert_eq!(head.len(), 2);
        assert_eq!(head[0], vec!["north".to_string(), "10".to_string()]);
        assert_eq!(head[1], vec!["south".to_string(), "20".to_string()]);
    }
}
