//! PNG figures drawn with plotters: histogram grid, pair grid, PCA scatter.

use std::path::Path;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::pca::ReducedDataset;
use crate::analysis::stats::linear_fit;
use crate::color::species_rgb;
use crate::data::model::{IrisDataset, Species, Variable};

const FONT: &str = "sans-serif";
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Binning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over the range of `values`; the last bin is closed.
/// A constant sample gets a unit-wide range centred on its value.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = min_max(values.iter().copied());
    if hi - lo <= f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Range padded by 5% on each side so edge points are not clipped.
fn padded(lo: f64, hi: f64) -> std::ops::Range<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(0.05);
    (lo - pad)..(hi + pad)
}

fn present(dataset: &IrisDataset, species: Species, variable: Variable) -> Vec<f64> {
    dataset
        .subgroup(species)
        .iter()
        .filter_map(|row| row.value(variable))
        .collect()
}

fn present_pairs(dataset: &IrisDataset, species: Species, x: Variable, y: Variable) -> Vec<(f64, f64)> {
    dataset
        .subgroup(species)
        .iter()
        .filter_map(|row| Some((row.value(x)?, row.value(y)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram grid
// ---------------------------------------------------------------------------

/// 2×2 grid, one panel per variable, species overlaid.
pub fn draw_histograms(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Distribution of Variables in the Iris Dataset", (FONT, 26))?;

    let species = dataset.species_in_order_of_appearance();
    let rows = Variable::ALL.len().div_ceil(2);
    let panels = root.split_evenly((rows, 2));

    for (panel, &variable) in panels.iter().zip(Variable::ALL.iter()) {
        draw_histogram_panel(panel, dataset, &species, variable, Some(variable.column_name()))?;
    }

    root.present()?;
    Ok(())
}

fn draw_histogram_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    dataset: &IrisDataset,
    species: &[Species],
    variable: Variable,
    caption: Option<&str>,
) -> Result<()> {
    let per_species: Vec<(Species, Vec<Bin>)> = species
        .iter()
        .map(|&sp| (sp, histogram_bins(&present(dataset, sp, variable), HISTOGRAM_BINS)))
        .collect();

    let (lo, hi) = min_max(per_species.iter().flat_map(|(_, bins)| {
        bins.iter().flat_map(|b| [b.start, b.end])
    }));
    let max_count = per_species
        .iter()
        .flat_map(|(_, bins)| bins.iter().map(|b| b.count))
        .max()
        .unwrap_or(0);

    let mut builder = ChartBuilder::on(area);
    builder.margin(10).x_label_area_size(30).y_label_area_size(40);
    if let Some(caption) = caption {
        builder.caption(caption, (FONT, 18));
    }
    let mut chart = builder.build_cartesian_2d(padded(lo, hi), 0.0..(max_count as f64 + 1.0))?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh();
    if caption.is_some() {
        mesh.x_desc("Value").y_desc("Frequency");
    }
    mesh.draw()?;

    for (sp, bins) in &per_species {
        let color = species_rgb(*sp);
        chart
            .draw_series(bins.iter().map(|b| {
                Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], color.mix(0.5).filled())
            }))?
            .label(sp.to_string())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
        }))?;
    }

    if caption.is_some() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pair grid
// ---------------------------------------------------------------------------

/// Variables × variables matrix: histograms on the diagonal, scatter plus a
/// per-species least-squares line elsewhere.
pub fn draw_pair_grid(dataset: &IrisDataset, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (1600, 1600)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Attribute Pairs by Species", (FONT, 28))?;

    let species = dataset.species_in_order_of_appearance();
    let n = Variable::ALL.len();
    let cells = root.split_evenly((n, n));

    for (i, cell) in cells.iter().enumerate() {
        let y_var = Variable::ALL[i / n];
        let x_var = Variable::ALL[i % n];
        if x_var == y_var {
            draw_histogram_panel(cell, dataset, &species, x_var, None)?;
        } else {
            draw_scatter_panel(cell, dataset, &species, x_var, y_var)?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_scatter_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    dataset: &IrisDataset,
    species: &[Species],
    x_var: Variable,
    y_var: Variable,
) -> Result<()> {
    let (x_lo, x_hi) = min_max(dataset.column(x_var).into_iter().flatten());
    let (y_lo, y_hi) = min_max(dataset.column(y_var).into_iter().flatten());

    let mut chart = ChartBuilder::on(area)
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_var.column_name())
        .y_desc(y_var.column_name())
        .draw()?;

    for &sp in species {
        let color = species_rgb(sp);
        let points = present_pairs(dataset, sp, x_var, y_var);
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.mix(0.7).filled())),
        )?;

        if let Some((slope, intercept)) = linear_fit(&points) {
            let (px_lo, px_hi) = min_max(points.iter().map(|p| p.0));
            chart.draw_series(LineSeries::new(
                [px_lo, px_hi].map(|x| (x, slope * x + intercept)),
                BLACK.stroke_width(1),
            ))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// PCA scatter
// ---------------------------------------------------------------------------

pub fn draw_pca_scatter(reduced: &ReducedDataset, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = min_max(reduced.rows.iter().map(|r| r.pc1));
    let (y_lo, y_hi) = min_max(reduced.rows.iter().map(|r| r.pc2));

    let mut chart = ChartBuilder::on(&root)
        .caption("Principal Component Analysis with 2 Elements", (FONT, 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))?;

    chart
        .configure_mesh()
        .x_desc("Principal Component #1")
        .y_desc("Principal Component #2")
        .draw()?;

    let mut seen: Vec<Species> = Vec::new();
    for row in &reduced.rows {
        if !seen.contains(&row.species) {
            seen.push(row.species);
        }
    }

    for sp in seen {
        let color = species_rgb(sp);
        chart
            .draw_series(
                reduced
                    .rows
                    .iter()
                    .filter(|r| r.species == sp)
                    .map(|r| Circle::new((r.pc1, r.pc2), 4, color.filled())),
            )?
            .label(sp.to_string())
            .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
