//! Descriptive summary report: overall statistics, missing values and one
//! section per species.

use std::collections::BTreeMap;

use log::debug;

use super::stats::{distinct_count, NumericSummary};
use crate::data::model::{IrisDataset, Observation, Species, Variable, SPECIES_COLUMN};

const STAT_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

const NAN: &str = "NaN";

/// Build the full report text.
pub fn descriptive_summary(dataset: &IrisDataset) -> String {
    let all: Vec<&Observation> = dataset.rows().iter().collect();
    let mut out = format!(
        "(1) Overall Descriptive Statistics:\n{}\n\n(2) Missing Values Summary:\n{}\n\n",
        describe_table(&all),
        missing_values(&all)
    );
    debug!("overall summary computed");

    out.push_str("(3) Summary for Each Species:\n\n");
    for (k, (species, group)) in dataset.partition().into_iter().enumerate() {
        out.push_str(&format!(
            "3.{} Summary for {species}\n\
             a) Descriptive Statistics:\n{}\n\n\
             b) Missing Values:\n{}\n\n\
             c) Unique Values:\n{}\n\n\n\n",
            k + 1,
            describe_table(&group),
            missing_values(&group),
            unique_values(&group)
        ));
    }
    debug!("species summary computed");

    out
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// The `describe(include='all')` table: statistic rows × dataset columns.
fn describe_table(rows: &[&Observation]) -> String {
    let mut columns: Vec<(String, Vec<String>)> = Variable::ALL
        .iter()
        .map(|&var| {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.value(var)).collect();
            (var.column_name().to_string(), numeric_cells(&NumericSummary::of(&values)))
        })
        .collect();
    columns.push((SPECIES_COLUMN.to_string(), species_cells(rows)));
    render_table(&STAT_ROWS, &columns)
}

fn numeric_cells(s: &NumericSummary) -> Vec<String> {
    vec![
        fmt_num(s.count as f64),
        NAN.to_string(),
        NAN.to_string(),
        NAN.to_string(),
        fmt_num(s.mean),
        fmt_num(s.std),
        fmt_num(s.min),
        fmt_num(s.q1),
        fmt_num(s.median),
        fmt_num(s.q3),
        fmt_num(s.max),
    ]
}

fn species_cells(rows: &[&Observation]) -> Vec<String> {
    let counts = species_counts(rows);
    // first label wins a tie
    let top = counts
        .iter()
        .fold(None, |best: Option<(Species, usize)>, (&sp, &n)| match best {
            Some((_, m)) if m >= n => best,
            _ => Some((sp, n)),
        });

    let mut cells = vec![
        rows.len().to_string(),
        counts.len().to_string(),
        top.map(|(sp, _)| sp.to_string()).unwrap_or_else(|| NAN.to_string()),
        top.map(|(_, n)| n.to_string()).unwrap_or_else(|| NAN.to_string()),
    ];
    cells.resize(STAT_ROWS.len(), NAN.to_string());
    cells
}

fn species_counts(rows: &[&Observation]) -> BTreeMap<Species, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.species).or_insert(0) += 1;
    }
    counts
}

fn missing_values(rows: &[&Observation]) -> String {
    let mut entries: Vec<(String, String)> = Variable::ALL
        .iter()
        .map(|&var| {
            let missing = rows.iter().filter(|r| r.value(var).is_none()).count();
            (var.column_name().to_string(), missing.to_string())
        })
        .collect();
    // species is never missing once loaded
    entries.push((SPECIES_COLUMN.to_string(), "0".to_string()));
    render_series(&entries)
}

fn unique_values(rows: &[&Observation]) -> String {
    let mut entries: Vec<(String, String)> = Variable::ALL
        .iter()
        .map(|&var| {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.value(var)).collect();
            (var.column_name().to_string(), distinct_count(&values).to_string())
        })
        .collect();
    entries.push((
        SPECIES_COLUMN.to_string(),
        species_counts(rows).len().to_string(),
    ));
    render_series(&entries)
}

// ---------------------------------------------------------------------------
// Text layout
// ---------------------------------------------------------------------------

fn fmt_num(v: f64) -> String {
    if v.is_nan() {
        NAN.to_string()
    } else {
        format!("{v:.6}")
    }
}

/// Right-aligned grid with a header line of column names.
fn render_table(row_labels: &[&str], columns: &[(String, Vec<String>)]) -> String {
    let label_width = row_labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = columns
        .iter()
        .map(|(name, cells)| {
            cells
                .iter()
                .map(String::len)
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(row_labels.len() + 1);

    let mut header = " ".repeat(label_width);
    for ((name, _), &w) in columns.iter().zip(&widths) {
        header.push_str(&format!("  {name:>w$}"));
    }
    lines.push(header);

    for (i, label) in row_labels.iter().enumerate() {
        let mut line = format!("{label:<label_width$}");
        for ((_, cells), &w) in columns.iter().zip(&widths) {
            let cell = cells.get(i).map(String::as_str).unwrap_or(NAN);
            line.push_str(&format!("  {cell:>w$}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// `name    value` lines, names left-aligned.
fn render_series(entries: &[(String, String)]) -> String {
    let name_width = entries.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    let value_width = entries.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|(name, value)| format!("{name:<name_width$}    {value:>value_width$}"))
        .collect::<Vec<_>>()
        .join("\n")
}
