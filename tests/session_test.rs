use std::collections::BTreeSet;
use std::fs;

use petalist::analysis::outliers::{find_outliers, remove_outliers};
use petalist::analysis::pca::reduce_dimensions;
use petalist::data::loader;
use petalist::data::model::{RowId, Species};
use petalist::export::ResultsDir;
use petalist::session::{Command, PlotKind, Preview, Session, Variant};

fn session(dir: &std::path::Path) -> Session {
    Session::new(
        loader::load_bundled().expect("bundled dataset"),
        ResultsDir::new(dir.join("results")),
    )
}

#[test]
fn descriptive_summary_file_has_all_sections() {
    let dir = tempfile::tempdir().unwrap();
    let staged = session(dir.path()).run(Command::DescriptiveSummary).unwrap();

    assert!(staged.path.ends_with("results/I.variables_summary.txt"));
    let text = fs::read_to_string(&staged.path).unwrap();
    assert!(text.starts_with("(1) Overall Descriptive Statistics:"));
    assert!(text.contains("3.1 Summary for setosa"));
    assert!(text.contains("3.2 Summary for versicolor"));
    assert!(text.contains("3.3 Summary for virginica"));
    assert_eq!(text.matches("c) Unique Values:").count(), 3);
    match staged.preview {
        Preview::Text(preview) => assert_eq!(preview, text),
        other => panic!("unexpected preview {other:?}"),
    }
}

#[test]
fn outlier_summary_covers_every_species_and_variable() {
    let dir = tempfile::tempdir().unwrap();
    let staged = session(dir.path()).run(Command::OutlierSummary).unwrap();
    let text = fs::read_to_string(&staged.path).unwrap();

    for species in Species::ALL {
        assert!(text.contains(&format!(">>> Outlier summary for {species} <<<")));
    }
    let per_variable = text.matches("Outliers found for").count()
        + text.matches("No outliers found for").count();
    assert_eq!(per_variable, 12);
}

#[test]
fn outlier_bounds_are_ordered_on_iris() {
    let ds = loader::load_bundled().unwrap();
    for group in find_outliers(&ds).groups {
        assert_eq!(group.group_size, 50);
        for var in group.variables {
            let b = var.bounds.expect("complete data has bounds");
            assert!(b.lower <= b.upper);
            assert!(var.positions().iter().all(|&p| p < group.group_size));
        }
    }
}

#[test]
fn cleanup_row_bookkeeping_on_iris() {
    let ds = loader::load_bundled().unwrap();
    let cleanup = remove_outliers(&ds);

    assert_eq!(cleanup.cleaned.len() + cleanup.removed.len(), ds.len());
    let kept: BTreeSet<RowId> = cleanup.cleaned.ids().collect();
    assert!(kept.is_disjoint(&cleanup.removed));

    // every removed id belongs to a row flagged inside its own species
    let report = find_outliers(&ds);
    let mut expected = BTreeSet::new();
    for group in &report.groups {
        let rows = ds.subgroup(group.species);
        for var in &group.variables {
            expected.extend(var.positions().into_iter().map(|p| rows[p].id));
        }
    }
    assert_eq!(cleanup.removed, expected);
    assert!(!cleanup.removed.is_empty());
}

#[test]
fn cleaned_csv_reloads_with_same_rows() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path());
    let staged = session.run(Command::RemoveOutliers).unwrap();
    assert!(staged.path.ends_with("II.dataframe_cleaned.csv"));

    let reloaded = loader::load_file(&staged.path).unwrap();
    let Preview::Table(cleaned) = staged.preview else {
        panic!("cleanup should stage a table");
    };
    assert_eq!(reloaded.len(), cleaned.len());
    for (a, b) in reloaded.rows().iter().zip(cleaned.rows()) {
        assert_eq!(a.measurements, b.measurements);
        assert_eq!(a.species, b.species);
    }

    let header = fs::read_to_string(&staged.path)
        .unwrap()
        .lines()
        .next()
        .map(str::to_string);
    assert_eq!(
        header.as_deref(),
        Some("row_id,sepal_length,sepal_width,petal_length,petal_width,species")
    );
}

#[test]
fn pca_on_both_variants_keeps_row_alignment() {
    let ds = loader::load_bundled().unwrap();
    for data in [ds.clone(), remove_outliers(&ds).cleaned] {
        let reduced = reduce_dimensions(&data).unwrap();
        assert_eq!(reduced.len(), data.len());
        for (out, input) in reduced.rows.iter().zip(data.rows()) {
            assert_eq!(out.species, input.species);
        }
        let [r1, r2] = reduced.explained_variance_ratio;
        assert!(r1 >= r2);
        assert!(r1 + r2 <= 1.0 + 1e-9);
    }
}

#[test]
fn base_dataset_is_never_mutated() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path());
    let before = session.base().clone();
    session.run(Command::RemoveOutliers).unwrap();
    session.run(Command::OutlierSummary).unwrap();
    assert_eq!(session.base(), &before);
}

#[test]
fn unwritable_results_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("results");
    fs::write(&blocker, "not a directory").unwrap();
    let session = Session::new(loader::load_bundled().unwrap(), ResultsDir::new(&blocker));
    assert!(session.run(Command::DescriptiveSummary).is_err());
}

#[test]
fn pca_variant_choice_picks_the_plotted_table() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path());
    let base_len = session.base().len();
    let cleaned_len = remove_outliers(session.base()).cleaned.len();
    assert!(cleaned_len < base_len);

    for (variant, expected) in [(Variant::Original, base_len), (Variant::Cleaned, cleaned_len)] {
        let staged = session.run(Command::Pca(variant)).unwrap();
        match staged.preview {
            Preview::Scatter(reduced) => assert_eq!(reduced.len(), expected),
            other => panic!("expected a scatter preview, got {other:?}"),
        }
        assert!(staged.path.is_file());
    }
}

#[test]
fn plot_commands_write_one_file_per_variant() {
    let dir = tempfile::tempdir().unwrap();
    let session = session(dir.path());

    for kind in [PlotKind::Histograms, PlotKind::PairPlot] {
        for variant in [Variant::Original, Variant::Cleaned] {
            let command = kind.with(variant);
            let staged = session.run(command).unwrap();
            assert_eq!(staged.command, command);
            assert!(matches!(staged.preview, Preview::Image));
            assert_eq!(staged.path, dir.path().join("results").join(command.file_name()));
            assert!(fs::metadata(&staged.path).unwrap().len() > 0);
        }
    }
}
