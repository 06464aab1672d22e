use molhover::data_types::{ChartView, VecTable};
use molhover::error::ResolutionError;
use molhover::grouping::CurveGroupMap;
use molhover::resolver::RowResolver;

fn assay_table() -> VecTable {
    VecTable::new()
        .with_column("Name", ["a", "b", "c", "d", "e", "f"])
        .with_column("Active", [true, false, false, true, false, true])
        .with_column("Batch", [3, 1, 3, 2, 1, 3])
}

#[test]
fn test_ungrouped_is_identity() {
    let table = assay_table();
    let groups = CurveGroupMap::ungrouped();
    let resolver = RowResolver::new(&table, &groups);

    for point in 0..6 {
        let row = resolver.resolve(0, point).unwrap();
        assert_eq!(row.index, point);
        assert_eq!(row.color, "black");
    }
}

#[test]
fn test_ungrouped_rejects_other_series() {
    let table = assay_table();
    let groups = CurveGroupMap::ungrouped();
    let resolver = RowResolver::new(&table, &groups);

    assert_eq!(
        resolver.resolve(1, 0),
        Err(ResolutionError::UnknownSeries { series: 1 })
    );
    assert_eq!(
        resolver.resolve(0, 6),
        Err(ResolutionError::PointOutOfRange {
            series: 0,
            point: 6,
            len: 6
        })
    );
}

#[test]
fn test_grouped_boolean_series() {
    let table = assay_table();
    let chart = ChartView::new("x", "y")
        .with_series("True", "#636efa")
        .with_series("False", "#EF553B");
    let groups = CurveGroupMap::build(&chart, &table, Some("Active")).unwrap();
    let resolver = RowResolver::new(&table, &groups);

    assert_eq!(resolver.series_rows(0).unwrap(), vec![0, 3, 5]);
    assert_eq!(resolver.series_rows(1).unwrap(), vec![1, 2, 4]);

    let row = resolver.resolve(1, 0).unwrap();
    assert_eq!(row.index, 1);
    assert_eq!(row.series, 1);
    assert_eq!(row.color, "#EF553B");

    assert_eq!(resolver.resolve(0, 2).unwrap().index, 5);
}

#[test]
fn test_grouped_integer_series_order_follows_labels() {
    let table = assay_table();
    // Series order is the chart's, not the table's first-seen order.
    let chart = ChartView::new("x", "y")
        .with_series("1", "red")
        .with_series("2", "green")
        .with_series("3", "blue");
    let groups = CurveGroupMap::build(&chart, &table, Some("Batch")).unwrap();
    let resolver = RowResolver::new(&table, &groups);

    assert_eq!(resolver.resolve(0, 1).unwrap().index, 4);
    assert_eq!(resolver.resolve(1, 0).unwrap().index, 3);
    assert_eq!(resolver.resolve(2, 2).unwrap().index, 5);
}

#[test]
fn test_grouped_out_of_range() {
    let table = assay_table();
    let chart = ChartView::new("x", "y")
        .with_series("True", "a")
        .with_series("False", "b");
    let groups = CurveGroupMap::build(&chart, &table, Some("Active")).unwrap();
    let resolver = RowResolver::new(&table, &groups);

    assert_eq!(
        resolver.resolve(0, 3),
        Err(ResolutionError::PointOutOfRange {
            series: 0,
            point: 3,
            len: 3
        })
    );
    assert_eq!(
        resolver.resolve(2, 0),
        Err(ResolutionError::UnknownSeries { series: 2 })
    );
}

#[test]
fn test_null_group_cells_are_skipped() {
    let table = VecTable::new()
        .with_column("Label", [Some("x"), None, Some("y"), Some("x")])
        .with_column("n", [0, 1, 2, 3]);
    let chart = ChartView::new("x", "y")
        .with_series("x", "a")
        .with_series("y", "b");
    let groups = CurveGroupMap::build(&chart, &table, Some("Label")).unwrap();
    let resolver = RowResolver::new(&table, &groups);

    assert_eq!(resolver.series_rows(0).unwrap(), vec![0, 3]);
    assert_eq!(resolver.resolve(1, 0).unwrap().index, 2);
}
