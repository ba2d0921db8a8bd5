//! End-to-end behavior of the filter engine against an in-memory grid.

use std::cell::RefCell;
use std::rc::Rc;

use votv_seeker::{
    matches, matches_with, suggest, CandidateSource, DataView, FilterExpression, FilterSet,
    RawCellFormatter, RowFilter, RowSource, SeekerConfig, Suggester,
};
use votv_table::{Datatype, Field, Metadata, Row};

// ============================================================================
// Fixtures
// ============================================================================

fn observations() -> (Metadata, Vec<Row>) {
    let metadata = Metadata::with_fields([
        Field::new("obs_id").with_datatype(Datatype::new("char")),
        Field::new("target").with_datatype(Datatype::new("adql:VARCHAR")),
        Field::new("instrument").with_datatype(Datatype::new("char")),
        Field::new("exptime")
            .with_datatype(Datatype::new("double"))
            .with_unit("s"),
        Field::new("time_bounds")
            .with_datatype(Datatype::new("double"))
            .with_xtype("adql:INTERVAL")
            .with_arraysize("2"),
    ]);

    let data = [
        ("a1", "M31", "MegaPrime", "30", "55000.1 55000.2"),
        ("a2", "M33", "MegaPrime", "120", "55001.0 55001.5"),
        ("a3", "M31", "WIRCam", "45", "55002.0 55003.0"),
        ("a4", "NGC 253", "ESPaDOnS", "600", "55010.0 55010.5"),
        ("a5", "M81", "WIRCam", "", "55020.0 55021.0"),
    ];

    let rows = data
        .iter()
        .map(|(id, target, instrument, exptime, bounds)| {
            Row::new(*id)
                .with_cell("obs_id", *id)
                .with_cell("target", *target)
                .with_cell("instrument", *instrument)
                .with_cell("exptime", *exptime)
                .with_cell("time_bounds", *bounds)
        })
        .collect();

    (metadata, rows)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ids(rows: &[&Row]) -> Vec<String> {
    rows.iter().map(|row| row.id.clone()).collect()
}

fn run(filters: &FilterSet, metadata: &Metadata, rows: &[Row]) -> Vec<String> {
    ids(&RowFilter::compile(filters, metadata).filter(rows, &RawCellFormatter))
}

fn numbered(values: &[&str]) -> (Metadata, Vec<Row>) {
    let metadata = Metadata::with_fields([Field::new("v").with_datatype(Datatype::new("int"))]);
    let rows = values
        .iter()
        .map(|v| Row::new(*v).with_cell("v", *v))
        .collect();
    (metadata, rows)
}

// ============================================================================
// Row matching
// ============================================================================

#[test]
fn numeric_range_keeps_inner_rows() {
    let (metadata, rows) = numbered(&["1", "2", "3", "4", "5"]);
    let filters = FilterSet::from_iter([("v", "2..4")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["2", "3", "4"]);
}

#[test]
fn greater_than() {
    let (metadata, rows) = numbered(&["1", "2", "3", "4", "5"]);
    let filters = FilterSet::from_iter([("v", ">3")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["4", "5"]);
}

#[test]
fn equals_with_trailing_space_is_exact() {
    let (metadata, rows) = numbered(&["1", "3", "33", "5"]);
    let filters = FilterSet::from_iter([("v", "=3 ")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["3"]);

    let filters = FilterSet::from_iter([("v", "3 ")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["3"]);
}

#[test]
fn plain_text_is_substring() {
    let metadata = Metadata::with_fields([Field::new("name")]);
    let rows: Vec<Row> = ["alpha", "beta", "alabama"]
        .iter()
        .map(|n| Row::new(*n).with_cell("name", *n))
        .collect();

    let filters = FilterSet::from_iter([("name", "al")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["alpha", "alabama"]);
}

#[test]
fn filters_narrow_progressively() {
    let (metadata, rows) = observations();
    let mut filters = FilterSet::new();

    filters.set_filter("target", "M3");
    assert_eq!(run(&filters, &metadata, &rows), vec!["a1", "a2", "a3"]);

    filters.set_filter("instrument", "wir");
    assert_eq!(run(&filters, &metadata, &rows), vec!["a3"]);

    filters.clear_filter("target");
    assert_eq!(run(&filters, &metadata, &rows), vec!["a3", "a5"]);
}

#[test]
fn blank_numeric_cells_never_match_numeric_filters() {
    let (metadata, rows) = observations();
    let filters = FilterSet::from_iter([("exptime", "<1000")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["a1", "a2", "a3", "a4"]);
}

#[test]
fn interval_column_uses_overlap() {
    let (metadata, rows) = observations();

    let filters = FilterSet::from_iter([("time_bounds", "55001.2..55002.5")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["a2", "a3"]);

    let filters = FilterSet::from_iter([("time_bounds", "55010.2..")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["a4", "a5"]);
}

#[test]
fn negated_and_wildcard_filters() {
    let (metadata, rows) = observations();

    let filters = FilterSet::from_iter([("instrument", "!megaprime ")]);
    // Exact match is case-sensitive, so nothing is excluded.
    assert_eq!(run(&filters, &metadata, &rows).len(), 5);

    let filters = FilterSet::from_iter([("instrument", "!MegaPrime ")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["a3", "a4", "a5"]);

    let filters = FilterSet::from_iter([("target", "m*1")]);
    assert_eq!(run(&filters, &metadata, &rows), vec!["a1", "a3", "a5"]);
}

#[test]
fn malformed_numeric_input_matches_nothing() {
    let (metadata, rows) = observations();
    for raw in [">abc", "1..x", "x..", "=seven"] {
        let filters = FilterSet::from_iter([("exptime", raw)]);
        assert!(run(&filters, &metadata, &rows).is_empty(), "{raw}");
    }
}

#[test]
fn free_matches_agrees_with_compiled_filter() {
    let (metadata, rows) = observations();
    let filters = FilterSet::from_iter([("target", "m"), ("exptime", "30..200")]);
    let compiled = RowFilter::compile(&filters, &metadata);

    for row in &rows {
        assert_eq!(
            matches(row, &filters, &metadata, &RawCellFormatter),
            compiled.matches(row, &RawCellFormatter)
        );
    }
}

#[test]
fn formatter_failures_exclude_rows() {
    init_tracing();
    let (metadata, rows) = observations();
    let formatter = |row: &Row, column: &str| -> Result<String, String> {
        if row.id == "a2" {
            return Err(format!("no renderer for {column}"));
        }
        Ok(row.cell_value(column).unwrap_or_default().to_string())
    };

    let filters = FilterSet::from_iter([("target", "M3")]);
    let hits = RowFilter::compile(&filters, &metadata).filter(&rows, &formatter);
    assert_eq!(ids(&hits), vec!["a1", "a3"]);

    let filters = FilterSet::from_iter([("target", "!M3")]);
    let hits = RowFilter::compile(&filters, &metadata).filter(&rows, &formatter);
    assert_eq!(ids(&hits), vec!["a4", "a5"]);
}

#[test]
fn classify_entry_point() {
    let expr = FilterExpression::classify("10..20", &Datatype::new("adql:INTEGER"));
    assert!(expr.evaluate("15", Some(&Field::new("n").with_datatype("int"))));
}

// ============================================================================
// Filter set notifications drive the host
// ============================================================================

#[test]
fn host_refreshes_on_every_change() {
    let (metadata, rows) = observations();
    let view = Rc::new(RefCell::new(DataView::new(rows)));
    let metadata = Rc::new(metadata);

    let mut filters = FilterSet::new();
    {
        let view = Rc::clone(&view);
        let metadata = Rc::clone(&metadata);
        filters.on_change(move |filters| {
            view.borrow_mut()
                .refresh(filters, &metadata, &RawCellFormatter);
        });
    }

    filters.set_filter("instrument", "MegaPrime");
    assert_eq!(view.borrow().visible_len(), 2);

    filters.set_filter("exptime", ">60");
    assert_eq!(view.borrow().visible_len(), 1);

    filters.clear_all();
    assert_eq!(view.borrow().visible_len(), 5);
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn suggestions_are_capped_and_ordered() {
    let metadata = Metadata::with_fields([Field::new("name")]);
    let view = DataView::new(
        ["ab", "ac", "ab", "ad", "ae", "af"]
            .iter()
            .enumerate()
            .map(|(i, n)| Row::new(i.to_string()).with_cell("name", *n))
            .collect(),
    );

    let found = suggest("name", "a", &FilterSet::new(), &metadata, &view, &RawCellFormatter, 2);
    assert_eq!(found.values, vec!["ab", "ac"]);
    assert!(!found.auto_apply);
}

#[test]
fn typing_in_the_only_filtered_column_scans_everything() {
    let (metadata, rows) = observations();
    let mut view = DataView::new(rows);

    let mut filters = FilterSet::new();
    filters.set_filter("target", "M31 ");
    view.refresh(&filters, &metadata, &RawCellFormatter);
    assert_eq!(view.visible_len(), 2);

    let found = suggest("target", "m", &filters, &metadata, &view, &RawCellFormatter, 15);
    assert_eq!(found.source, CandidateSource::All);
    assert_eq!(found.values, vec!["M31", "M33", "M81"]);
}

#[test]
fn other_filtered_columns_restrict_candidates() {
    let (metadata, rows) = observations();
    let mut view = DataView::new(rows);

    let mut filters = FilterSet::new();
    filters.set_filter("instrument", "WIRCam");
    view.refresh(&filters, &metadata, &RawCellFormatter);

    let found = suggest("target", "m", &filters, &metadata, &view, &RawCellFormatter, 15);
    assert_eq!(found.source, CandidateSource::Filtered);
    assert_eq!(found.values, vec!["M31", "M81"]);
}

#[test]
fn unique_suggestion_can_be_applied() {
    let (metadata, rows) = observations();
    let view = DataView::new(rows);
    let mut filters = FilterSet::new();

    let found = suggest("target", "ngc", &filters, &metadata, &view, &RawCellFormatter, 15);
    assert!(found.auto_apply);

    if let Some(value) = found.single() {
        filters.set_filter("target", format!("{value} "));
    }
    assert_eq!(run(&filters, &metadata, view.rows()), vec!["a4"]);
}

#[test]
fn grid_and_suggestions_share_the_config() {
    let metadata = Metadata::with_fields([Field::new("name")]);
    let mut view = DataView::new(vec![
        Row::new("1").with_cell("name", "!bang"),
        Row::new("2").with_cell("name", "plain"),
    ]);
    let config = SeekerConfig::from_yaml_str("negation: false\n").unwrap();
    let filters = FilterSet::from_iter([("name", "!bang")]);

    view.refresh_with(&filters, &metadata, &config, &RawCellFormatter);
    let shown: Vec<&str> = view.filtered_rows().map(|row| row.id.as_str()).collect();
    assert_eq!(shown, vec!["1"]);

    let found = Suggester::new(config.clone()).suggest(
        "name",
        "!bang",
        &FilterSet::new(),
        &metadata,
        &view,
        &RawCellFormatter,
    );
    assert_eq!(found.values, vec!["!bang"]);

    for row in view.rows() {
        assert_eq!(
            matches_with(row, &filters, &metadata, &config, &RawCellFormatter),
            shown.contains(&row.id.as_str())
        );
    }
}

#[test]
fn suggester_from_yaml_config() {
    let (metadata, rows) = observations();
    let view = DataView::new(rows);
    let config = SeekerConfig::from_yaml_str("return_count: 1\n").unwrap();

    let found = Suggester::new(config).suggest(
        "instrument",
        "a",
        &FilterSet::new(),
        &metadata,
        &view,
        &RawCellFormatter,
    );
    assert_eq!(found.values, vec!["MegaPrime"]);
    assert!(found.auto_apply);
}
