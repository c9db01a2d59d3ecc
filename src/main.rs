//! Pairwise cointegration graph of daily equity closes.
//!
//! Downloads Stooq daily data for a set of tickers, runs the Engle-Granger
//! test on every ordered pair, converts p-values to edge weights and renders
//! the resulting directed graph as a PNG.
//!
//! Usage:
//! ```
//! cargo run -- --tickers AAPL MS ABT --start 2016-02-01 --end 2016-04-01
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use cointegration_graph::analysis::compute_pairwise;
use cointegration_graph::api::StooqClient;
use cointegration_graph::data::{fetch_all_series, ClosePanel};
use cointegration_graph::graph::{normalize_weights, MarketGraph, SpringLayout};
use cointegration_graph::render::GraphRenderer;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a cointegration graph for a set of equities")]
struct Args {
    /// Tickers to analyze
    #[arg(
        long,
        num_args = 1..,
        default_values = ["VOD", "ABT", "ABBV", "ABMD", "ACN", "ATVI", "AAPL", "MS"]
    )]
    tickers: Vec<String>,

    /// First day of the price window (YYYY-MM-DD)
    #[arg(long, default_value = "2016-02-01")]
    start: String,

    /// Last day of the price window (YYYY-MM-DD)
    #[arg(long, default_value = "2016-04-01")]
    end: String,

    /// Output image path
    #[arg(long, default_value = "cointegration_graph.png")]
    output: PathBuf,

    /// Layout RNG seed, for reproducible node placement
    #[arg(long)]
    seed: Option<u64>,

    /// Spring layout iterations
    #[arg(long, default_value = "500")]
    iterations: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Cointegration Graph".bold().blue());
    println!("{}", "=".repeat(60).blue());

    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .with_context(|| format!("Invalid start date: {}", args.start))?;
    let end = NaiveDate::parse_from_str(&args.end, "%Y-%m-%d")
        .with_context(|| format!("Invalid end date: {}", args.end))?;
    if start > end {
        anyhow::bail!("Start date {} is after end date {}", start, end);
    }

    println!("\nTickers: {}", args.tickers.join(", ").cyan());
    println!("Window: {} to {}", start, end);

    // Download daily closes
    println!("\n{}", "Downloading Prices".bold());
    println!("{}", "-".repeat(40));

    let client = StooqClient::new();
    let fetch_start = Instant::now();
    let outcome = fetch_all_series(&client, &args.tickers, start, end);
    println!(
        "{} {} of {} tickers in {:.2}s",
        "Fetched:".green(),
        outcome.series.len(),
        args.tickers.len(),
        fetch_start.elapsed().as_secs_f64()
    );

    let panel = ClosePanel::from_series(&outcome.series);
    println!(
        "Panel: {} dates x {} tickers",
        panel.n_dates(),
        panel.n_tickers()
    );

    // Pairwise Engle-Granger tests
    println!("\n{}", "Pairwise Cointegration".bold());
    println!("{}", "-".repeat(40));

    let test_start = Instant::now();
    let pairwise = compute_pairwise(&panel);
    println!(
        "Tested {} ordered pairs in {:.2}s ({} failed)",
        pairwise.n_pairs(),
        test_start.elapsed().as_secs_f64(),
        pairwise.failures.len()
    );

    let edges = normalize_weights(&pairwise.results)?;
    let triples: Vec<(String, String, f64)> = edges.iter().map(|e| e.triple()).collect();
    println!("{:?}", triples);

    let surviving = edges.iter().filter(|e| e.survives_floor()).count();
    println!(
        "{} {} of {} edges above the weight floor",
        "Kept:".green(),
        surviving,
        edges.len()
    );

    // Lay out and render
    println!("\n{}", "Rendering".bold());
    println!("{}", "-".repeat(40));

    let graph = MarketGraph::from_edges(&edges);
    println!(
        "Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let mut layout = SpringLayout::new().with_iterations(args.iterations);
    if let Some(seed) = args.seed {
        layout = layout.with_seed(seed);
    }
    let positions = layout.run(&graph);

    let image = GraphRenderer::default().render(&graph, &positions);
    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved: {}", args.output.display());

    println!("\n{}", "Done!".green().bold());
    Ok(())
}
