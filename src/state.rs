use std::collections::BTreeMap;

use crate::data::model::Table;
use crate::data::summary::{self, ColumnSummary};

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Which chart the central panel renders for the selected metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Histogram of the metric column.
    Histogram,
    /// Mean of the metric per value of the group-by column.
    GroupedMean,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
///
/// One instance lives for the whole interactive session and is the single
/// owner of the last assistant answer: each new question overwrites it,
/// nothing persists it, and the report export only reads it.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub table: Option<Table>,

    /// Per-numeric-column statistics, recomputed when the table changes.
    pub summaries: BTreeMap<String, ColumnSummary>,

    /// Metric column feeding the chart (numeric columns only).
    pub metric_column: Option<String>,

    /// Optional group-by column (categorical columns only).
    pub group_column: Option<String>,

    /// Chart flavour derived from the group selection.
    pub chart_kind: ChartKind,

    /// The question currently typed into the ask box.
    pub question: String,

    /// Last assistant answer, if any. Gates the report download.
    pub answer: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether an assistant call is in flight (interactions are serialized,
    /// so this only drives the button label).
    pub asking: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            summaries: BTreeMap::new(),
            metric_column: None,
            group_column: None,
            chart_kind: ChartKind::Histogram,
            question: String::new(),
            answer: None,
            status_message: None,
            asking: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: recompute statistics, reset the chart
    /// selection to the first numeric column, and drop the stale answer.
    pub fn set_table(&mut self, table: Table) {
        self.summaries = summary::summarize(&table);
        self.metric_column = table.numeric_columns().first().map(|s| s.to_string());
        self.group_column = None;
        self.chart_kind = ChartKind::Histogram;
        self.answer = None;
        self.status_message = None;
        self.table = Some(table);
    }

    /// `(rows, columns)` of the loaded table.
    pub fn dataset_shape(&self) -> Option<(usize, usize)> {
        self.table
            .as_ref()
            .map(|t| (t.row_count(), t.column_count()))
    }

    /// The stored assistant answer, if one exists this session.
    pub fn current_answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    /// Whether the loaded table has any numeric column to chart.
    pub fn has_numeric_columns(&self) -> bool {
        !self.summaries.is_empty()
    }

    /// Store a fresh answer, replacing any previous one.
    pub fn set_answer(&mut self, answer: String) {
        self.answer = Some(answer);
        self.status_message = None;
        self.asking = false;
    }

    /// Select the chart metric.
    pub fn set_metric_column(&mut self, column: String) {
        self.metric_column = Some(column);
    }

    /// Select or clear the group-by column; the chart kind follows.
    pub fn set_group_column(&mut self, column: Option<String>) {
        self.chart_kind = if column.is_some() {
            ChartKind::GroupedMean
        } else {
            ChartKind::Histogram
        };
        self.group_column = column;
    }
}
