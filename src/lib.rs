//! # Cointegration Graph
//!
//! A library for mapping cointegration relationships between equities as a
//! weighted directed graph, from daily Stooq price data to a rendered image.
//!
//! ## Features
//!
//! - **Api Module**: Stooq daily OHLC download and CSV parsing
//! - **Data Module**: per-ticker price series and the aligned close panel
//! - **Analysis Module**: Engle-Granger cointegration and ADF stationarity tests
//! - **Graph Module**: p-value weight normalization, multigraph assembly, spring layout
//! - **Render Module**: raster drawing of nodes, directed edges and ticker labels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use cointegration_graph::{
//!     analysis::compute_pairwise,
//!     api::StooqClient,
//!     data::{fetch_all_series, ClosePanel},
//!     graph::{normalize_weights, MarketGraph, SpringLayout},
//!     render::GraphRenderer,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     // Fetch daily closes
//!     let client = StooqClient::new();
//!     let tickers: Vec<String> = ["AAPL", "MS", "ABT"].iter().map(|s| s.to_string()).collect();
//!     let start = NaiveDate::from_ymd_opt(2016, 2, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2016, 4, 1).unwrap();
//!     let outcome = fetch_all_series(&client, &tickers, start, end);
//!
//!     // Test every ordered pair for cointegration
//!     let panel = ClosePanel::from_series(&outcome.series);
//!     let pairwise = compute_pairwise(&panel);
//!
//!     // Build and lay out the weighted graph
//!     let edges = normalize_weights(&pairwise.results)?;
//!     let graph = MarketGraph::from_edges(&edges);
//!     let positions = SpringLayout::new().run(&graph);
//!
//!     // Render to PNG
//!     let image = GraphRenderer::default().render(&graph, &positions);
//!     image.save("cointegration_graph.png")?;
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod data;
pub mod graph;
pub mod render;

// Re-export commonly used types
pub use analysis::{compute_pairwise, engle_granger_test, CointegrationResult, PairwiseOutcome};
pub use api::{DailyBar, StooqClient};
pub use data::{fetch_all_series, ClosePanel, PriceSeries};
pub use graph::{normalize_weights, Edge, MarketGraph, SpringLayout};
pub use render::{GraphRenderer, ImageConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
