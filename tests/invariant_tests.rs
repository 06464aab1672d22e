use molhover::data_types::{CellValue, ChartView, TableSource, VecTable};
use molhover::grouping::CurveGroupMap;
use molhover::resolver::RowResolver;
use molhover::text::{fit_title, wrap_words};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SITES: [&str; 4] = ["north", "south", "east", "west"];

fn random_table(rng: &mut StdRng, rows: usize) -> VecTable {
    let sites: Vec<&str> = (0..rows)
        .map(|_| SITES[rng.random_range(0..SITES.len())])
        .collect();
    let flags: Vec<bool> = (0..rows).map(|_| rng.random_bool(0.3)).collect();
    let ids: Vec<i64> = (0..rows as i64).collect();
    VecTable::new()
        .with_column("id", ids)
        .with_column("Site", sites)
        .with_column("Flag", flags)
}

#[test]
fn test_ungrouped_resolution_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    let table = random_table(&mut rng, 500);
    let groups = CurveGroupMap::ungrouped();
    let resolver = RowResolver::new(&table, &groups);

    for point in 0..table.len() {
        assert_eq!(resolver.resolve(0, point).unwrap().index, point);
    }
    assert!(resolver.resolve(0, table.len()).is_err());
}

#[test]
fn test_grouped_rows_match_their_group() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let rows = rng.random_range(1..300);
        let table = random_table(&mut rng, rows);
        let chart = SITES
            .iter()
            .fold(ChartView::new("x", "y"), |chart, site| chart.with_series(*site, *site));
        let groups = CurveGroupMap::build(&chart, &table, Some("Site")).unwrap();
        let resolver = RowResolver::new(&table, &groups);

        let mut seen = vec![false; rows];
        for (series, site) in SITES.iter().enumerate() {
            let mut point = 0;
            while let Ok(row) = resolver.resolve(series, point) {
                assert_eq!(table.cell(row.index, "Site"), Some(CellValue::from(*site)));
                assert_eq!(row.color, *site);
                assert!(!seen[row.index], "row {} resolved twice", row.index);
                seen[row.index] = true;
                point += 1;
            }
            assert_eq!(resolver.series_rows(series).unwrap().len(), point);
        }
        assert!(seen.iter().all(|s| *s));
    }
}

#[test]
fn test_grouped_rows_preserve_table_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let table = random_table(&mut rng, 200);
    let chart = ChartView::new("x", "y")
        .with_series("true", "a")
        .with_series("false", "b");
    let groups = CurveGroupMap::build(&chart, &table, Some("Flag")).unwrap();
    let resolver = RowResolver::new(&table, &groups);

    for series in 0..2 {
        let rows = resolver.series_rows(series).unwrap();
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        for (point, row) in rows.iter().enumerate() {
            assert_eq!(resolver.resolve(series, point).unwrap().index, *row);
        }
    }
}

fn random_title(rng: &mut StdRng, max_word: usize) -> String {
    let words = rng.random_range(1..8);
    (0..words)
        .map(|_| {
            let len = rng.random_range(1..=max_word);
            (0..len)
                .map(|_| rng.random_range(b'a'..=b'z') as char)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_wrapped_lines_fit_width() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let width = rng.random_range(8..30);
        let title = random_title(&mut rng, width);
        let lines = wrap_words(&title, width);

        assert!(lines.iter().all(|line| line.chars().count() <= width), "{lines:?}");
        assert_eq!(lines.join(" "), title);
    }
}

#[test]
fn test_long_words_stay_whole() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let width = rng.random_range(4..12);
        let title = random_title(&mut rng, width * 3);
        let fitted = fit_title(&title, width, true);

        let words: Vec<&str> = title.split(' ').collect();
        let fitted_words: Vec<&str> = fitted.split(|c: char| c == ' ' || c == '\n').collect();
        assert_eq!(words, fitted_words);
        for line in fitted.lines() {
            assert!(line.chars().count() <= width || !line.contains(' '), "{line:?}");
        }
    }
}

#[test]
fn test_fit_title_threshold() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let width = rng.random_range(5..25);
        let title = random_title(&mut rng, 6);
        let fitted = fit_title(&title, width, false);
        if title.chars().count() <= width {
            assert_eq!(fitted, title);
        } else {
            assert_eq!(fitted.chars().count(), width + 3);
            assert!(fitted.ends_with("..."));
        }
    }
}
