//! Graph construction: weight normalization, the directed multigraph,
//! and force-directed layout.

mod layout;
mod market_graph;
mod weights;

pub use layout::SpringLayout;
pub use market_graph::MarketGraph;
pub use weights::{normalize_weights, Edge, WeightError};
