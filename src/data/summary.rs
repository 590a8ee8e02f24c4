use std::collections::BTreeMap;

use super::model::{ColumnKind, Table};

// ---------------------------------------------------------------------------
// Descriptive statistics per numeric column
// ---------------------------------------------------------------------------

/// Describe-style statistics for one numeric column (Pandas `describe` shape).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Compute summaries for every numeric column, keyed by column name.
///
/// Recomputed on demand whenever the table changes; never mutated in place.
pub fn summarize(table: &Table) -> BTreeMap<String, ColumnSummary> {
    table
        .columns
        .iter()
        .filter(|c| c.kind() == ColumnKind::Numeric)
        .filter_map(|c| {
            let values = c.numeric_values();
            describe(&values).map(|s| (c.name.clone(), s))
        })
        .collect()
}

/// Describe a single series of values. `None` when the series is empty.
pub fn describe(values: &[f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let count = sorted.len();
    let mean = sorted.iter().sum::<f64>() / count as f64;

    // Sample standard deviation (ddof = 1), matching Pandas describe().
    let std_dev = if count > 1 {
        let var = sorted
            .iter()
            .map(|&x| {
                let d = x - mean;
                d * d
            })
            .sum::<f64>()
            / (count - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };

    Some(ColumnSummary {
        count,
        mean,
        std_dev,
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Linear-interpolation quantile over a pre-sorted slice (Pandas default).
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Plain-text statistics dump (assistant context)
// ---------------------------------------------------------------------------

/// Render the full statistics block sent to the assistant.
///
/// Deliberately untruncated: very wide tables produce a large context and
/// may exceed the hosted model's input budget, which then surfaces as an
/// assistant error for that question.
pub fn summary_text_dump(summaries: &BTreeMap<String, ColumnSummary>) -> String {
    let mut out = String::new();
    for (name, s) in summaries {
        out.push_str(&format!(
            "{name}: count={}, mean={:.4}, std={:.4}, min={:.4}, 25%={:.4}, 50%={:.4}, 75%={:.4}, max={:.4}\n",
            s.count, s.mean, s.std_dev, s.min, s.q1, s.median, s.q3, s.max
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Aggregations backing the chart
// ---------------------------------------------------------------------------

/// Mean of `metric` per distinct value of `group`, ordered by group label.
///
/// Rows where the metric cell is non-numeric are skipped; rows where the
/// group cell is null are bucketed under the empty label.
pub fn group_means(table: &Table, metric: &str, group: &str) -> Vec<(String, f64)> {
    let Some(metric_col) = table.column(metric) else {
        return Vec::new();
    };
    let Some(group_col) = table.column(group) else {
        return Vec::new();
    };

    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (g, m) in group_col.values.iter().zip(metric_col.values.iter()) {
        let Some(value) = m.as_f64() else { continue };
        let entry = sums.entry(g.to_string()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(label, (sum, n))| (label, sum / n as f64))
        .collect()
}

/// Equal-width histogram of `metric` over `[min, max]` with `bins` buckets.
/// Returns `(bin_center, count)` pairs; empty when the column has no values.
pub fn histogram(table: &Table, metric: &str, bins: usize) -> Vec<(f64, usize)> {
    let Some(col) = table.column(metric) else {
        return Vec::new();
    };
    let values = col.numeric_values();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    // Degenerate range: every value identical, single full bucket.
    if width.abs() < f64::EPSILON {
        return vec![(min, values.len())];
    }

    let mut counts = vec![0usize; bins];
    for &v in &values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, n)| (min + width * (i as f64 + 0.5), n))
        .collect()
}
