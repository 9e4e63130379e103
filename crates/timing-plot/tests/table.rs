// File: crates/timing-plot/tests/table.rs
// Purpose: Results table loading: column integrity, missing files, malformed input.

mod common;

use std::path::Path;

use timing_plot::{PlotError, ResultsTable};

#[test]
fn loads_all_columns_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_csv(dir.path(), "results.csv", common::SCENARIO_CSV);

    let table = ResultsTable::load(&path).expect("load");
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column("Size").unwrap(), &[100.0, 200.0]);
    assert_eq!(table.column("Naive").unwrap(), &[5.0, 40.0]);
    assert_eq!(table.column("CacheAware").unwrap(), &[3.0, 20.0]);
    assert_eq!(table.column("CacheOblivious").unwrap(), &[4.0, 25.0]);
    assert_eq!(table.column("CacheAware1D").unwrap(), &[3.5, 22.0]);
}

#[test]
fn values_survive_bit_for_bit() {
    let csv = "Size,Naive\n1024,0.1\n2048,123456.789012345\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("inline.csv")).unwrap();
    let naive = table.column("Naive").unwrap();
    assert_eq!(naive[0].to_bits(), 0.1f64.to_bits());
    assert_eq!(naive[1].to_bits(), 123456.789012345f64.to_bits());
}

#[test]
fn column_order_does_not_matter() {
    let csv = "CacheAware1D,Naive,Size,CacheOblivious,CacheAware\n3.5,5,100,4,3\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("shuffled.csv")).unwrap();
    assert_eq!(table.column("Size").unwrap(), &[100.0]);
    assert_eq!(table.column("CacheAware1D").unwrap(), &[3.5]);
    assert_eq!(table.column_names().len(), 5);
}

#[test]
fn headers_and_cells_are_trimmed() {
    let csv = " Size , Naive \n 64 , 1.5 \n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("spaced.csv")).unwrap();
    assert!(table.has_column("Size"));
    assert_eq!(table.column("Naive").unwrap(), &[1.5]);
}

#[test]
fn header_only_file_is_empty() {
    let csv = "Size,Naive\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("empty.csv")).unwrap();
    assert!(table.is_empty());
    assert!(table.column("Naive").unwrap().is_empty());
}

#[test]
fn missing_file_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResultsTable::load(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, PlotError::FileAccess { .. }), "got {err:?}");
}

#[test]
fn directory_path_is_file_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResultsTable::load(dir.path()).unwrap_err();
    assert!(matches!(err, PlotError::FileAccess { .. }), "got {err:?}");
}

#[test]
fn missing_column_is_schema_error_on_lookup() {
    let csv = "Size,Naive\n100,5\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("narrow.csv")).unwrap();
    match table.column("CacheAware") {
        Err(PlotError::Schema { column, available }) => {
            assert_eq!(column, "CacheAware");
            assert_eq!(available, vec!["Size".to_string(), "Naive".to_string()]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn non_numeric_cell_is_parse_error_on_lookup() {
    let csv = "Size,Naive\n100,5\n200,slow\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("bad.csv")).expect("text cells load");
    assert_eq!(table.column("Size").unwrap(), &[100.0, 200.0]);
    match table.column("Naive").unwrap_err() {
        PlotError::Parse { path, row, column, value } => {
            assert_eq!(path, Path::new("bad.csv"));
            assert_eq!(row, 2);
            assert_eq!(column, "Naive");
            assert_eq!(value, "slow");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn text_columns_load_untouched() {
    let csv = "Size,Compiler,Naive\n100,gcc,5\n200,clang,40\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("mixed.csv")).unwrap();
    assert_eq!(table.row_count(), 2);
    assert!(table.has_column("Compiler"));
    assert_eq!(table.column("Naive").unwrap(), &[5.0, 40.0]);
}

#[test]
fn ragged_row_is_csv_error() {
    let csv = "Size,Naive\n100,5\n200\n";
    let err = ResultsTable::from_reader(csv.as_bytes(), Path::new("ragged.csv")).unwrap_err();
    assert!(matches!(err, PlotError::Csv { .. }), "got {err:?}");
}

#[test]
fn empty_cell_loads_as_nan() {
    let csv = "Size,Naive\n100,\n200,4\n";
    let table = ResultsTable::from_reader(csv.as_bytes(), Path::new("gap.csv")).unwrap();
    let naive = table.column("Naive").unwrap();
    assert!(naive[0].is_nan());
    assert_eq!(naive[1], 4.0);
}
