//! Integration tests for the cointegration graph pipeline.

use chrono::{Duration, NaiveDate};
use cointegration_graph::{
    analysis::compute_pairwise,
    api::DailyBar,
    data::{ClosePanel, PriceSeries},
    graph::{normalize_weights, MarketGraph, SpringLayout},
    render::{colors, GraphRenderer},
};

/// Deterministic pseudo-noise in roughly [-0.1, 0.1].
fn noise(i: usize, mult: usize) -> f64 {
    ((i * mult) % 1000) as f64 / 5000.0 - 0.1
}

fn walk(n: usize, mult: usize) -> Vec<f64> {
    let mut w = vec![100.0];
    for i in 1..n {
        w.push(w[i - 1] + noise(i, mult));
    }
    w
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 2, 1).unwrap()
}

/// Helper to build a daily series from a close sequence.
fn make_series(ticker: &str, start: NaiveDate, closes: &[f64]) -> PriceSeries {
    let bars: Vec<DailyBar> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| DailyBar {
            date: start + Duration::days(i as i64),
            open: close * 0.99,
            high: close * 1.01,
            low: close * 0.98,
            close,
            volume: Some(1000.0),
        })
        .collect();
    PriceSeries::new(ticker, bars)
}

/// Panel with one cointegrated pair (AAA, BBB) and two loose columns.
fn create_test_panel() -> ClosePanel {
    let start = start_date();
    let a = walk(500, 7919);
    let b: Vec<f64> = a
        .iter()
        .enumerate()
        .map(|(i, &v)| 2.0 * v + noise(i, 1237))
        .collect();
    let c = walk(500, 104729);
    let d = walk(500, 1299709);

    ClosePanel::from_series(&[
        make_series("AAA", start, &a),
        make_series("BBB", start, &b),
        make_series("CCC", start, &c),
        make_series("DDD", start, &d),
    ])
}

#[test]
fn test_seven_tickers_yield_42_ordered_pairs() {
    let start = start_date();
    let series: Vec<PriceSeries> = (0..7)
        .map(|t| make_series(&format!("T{}", t), start, &walk(60, 7919 + 2 * t)))
        .collect();
    let panel = ClosePanel::from_series(&series);

    let outcome = compute_pairwise(&panel);
    assert_eq!(outcome.n_pairs(), 42);
    for r in &outcome.results {
        assert_ne!(r.source, r.target);
    }
}

#[test]
fn test_end_to_end_pipeline() {
    // 1. Build the aligned close panel
    let panel = create_test_panel();
    assert_eq!(panel.n_tickers(), 4);
    assert_eq!(panel.n_dates(), 500);

    // 2. Test every ordered pair
    let pairwise = compute_pairwise(&panel);
    assert_eq!(pairwise.n_pairs(), 12);
    assert!(pairwise.failures.is_empty());

    // 3. Normalize p-values into edge weights
    let edges = normalize_weights(&pairwise.results).unwrap();
    assert_eq!(edges.len(), pairwise.results.len());
    assert!(edges
        .iter()
        .all(|e| (0.0..=1.0).contains(&e.normalized_weight)));
    // The smallest p-value is pinned to weight 1.0.
    assert!(edges.iter().any(|e| e.floored_weight == 1.0));

    // 4. Assemble the graph from surviving edges
    let surviving = edges.iter().filter(|e| e.survives_floor()).count();
    let graph = MarketGraph::from_edges(&edges);
    assert_eq!(graph.edge_count(), surviving);
    assert!(graph.node_count() >= 2 && graph.node_count() <= 4);

    // 5. Lay out nodes
    let positions = SpringLayout::new().with_seed(42).run(&graph);
    assert_eq!(positions.len(), graph.node_count());
    for &(x, y) in &positions {
        assert!(x.is_finite() && y.is_finite());
        assert!(x.abs() <= 1.0 + 1e-9 && y.abs() <= 1.0 + 1e-9);
    }

    // 6. Render
    let image = GraphRenderer::default().render(&graph, &positions);
    assert_eq!(image.width(), 800);
    assert_eq!(image.height(), 800);
    assert!(image.pixels().any(|&p| p == colors::RED));
    assert!(image.pixels().any(|&p| p == colors::WHITE));
}

#[test]
fn test_seeded_layout_is_reproducible() {
    let panel = create_test_panel();
    let edges = normalize_weights(&compute_pairwise(&panel).results).unwrap();
    let graph = MarketGraph::from_edges(&edges);

    let first = SpringLayout::new().with_seed(7).run(&graph);
    let second = SpringLayout::new().with_seed(7).run(&graph);
    assert_eq!(first, second);

    let other = SpringLayout::new().with_seed(8).run(&graph);
    assert_ne!(first, other);
}

#[test]
fn test_missing_ticker_stays_out_of_the_graph() {
    let start = start_date();
    // "ZZZ" failed to download, so only three series reach the panel.
    let series = vec![
        make_series("AAA", start, &walk(120, 7919)),
        make_series("BBB", start, &walk(120, 104729)),
        make_series("CCC", start, &walk(120, 1299709)),
    ];
    let panel = ClosePanel::from_series(&series);
    assert_eq!(panel.n_tickers(), 3);

    let pairwise = compute_pairwise(&panel);
    assert_eq!(pairwise.n_pairs(), 6);

    let edges = normalize_weights(&pairwise.results).unwrap();
    let graph = MarketGraph::from_edges(&edges);

    assert!(!graph.contains("ZZZ"));
    for e in &edges {
        assert_ne!(e.source, "ZZZ");
        assert_ne!(e.target, "ZZZ");
    }
}

#[test]
fn test_short_overlap_is_a_recorded_failure() {
    let start = start_date();
    // Only 10 shared dates between the two series.
    let early = make_series("AAA", start, &walk(40, 7919));
    let late = make_series("BBB", start + Duration::days(30), &walk(40, 104729));
    let panel = ClosePanel::from_series(&[early, late]);

    let outcome = compute_pairwise(&panel);
    assert!(outcome.results.is_empty());
    assert_eq!(outcome.failures.len(), 2);
}
