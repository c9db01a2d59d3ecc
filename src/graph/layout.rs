//! Force-directed (spring) node placement.

use crate::graph::MarketGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fruchterman-Reingold spring layout.
///
/// Every node pair repels with `k²/d`; every edge pulls its endpoints
/// together with `d²/k` scaled by the edge weight, so zero-weight edges
/// exert no pull. Per-iteration displacement is capped by a linearly
/// cooling temperature. Final positions are rescaled to [-1, 1]².
///
/// Unseeded runs start from entropy and are non-deterministic; seed the
/// layout for reproducible output.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    iterations: usize,
    seed: Option<u64>,
    k: Option<f64>,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl SpringLayout {
    pub fn new() -> Self {
        Self {
            iterations: 500,
            seed: None,
            k: None,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the ideal edge length (default `1/√n`).
    pub fn with_k(mut self, k: f64) -> Self {
        self.k = Some(k);
        self
    }

    /// Compute a position per node, indexed by `NodeIndex::index()`.
    pub fn run(&self, graph: &MarketGraph) -> Vec<(f64, f64)> {
        let n = graph.node_count();
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![(0.0, 0.0)];
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut pos: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5)))
            .collect();

        let k = self.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
        let edges = graph.edge_list();
        let t0 = 0.1;

        for iteration in 0..self.iterations {
            let mut disp = vec![(0.0f64, 0.0f64); n];

            // Pairwise repulsion.
            for i in 0..n {
                for j in (i + 1)..n {
                    let dx = pos[i].0 - pos[j].0;
                    let dy = pos[i].1 - pos[j].1;
                    let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                    let force = k * k / dist;
                    let (ux, uy) = (dx / dist, dy / dist);
                    disp[i].0 += ux * force;
                    disp[i].1 += uy * force;
                    disp[j].0 -= ux * force;
                    disp[j].1 -= uy * force;
                }
            }

            // Attraction along edges, weight-scaled.
            for &(a, b, weight) in &edges {
                let (i, j) = (a.index(), b.index());
                if i == j {
                    continue;
                }
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = dist * dist / k * weight;
                let (ux, uy) = (dx / dist, dy / dist);
                disp[i].0 -= ux * force;
                disp[i].1 -= uy * force;
                disp[j].0 += ux * force;
                disp[j].1 += uy * force;
            }

            // Apply, capped by the cooling temperature.
            let t = t0 * (1.0 - iteration as f64 / self.iterations as f64);
            for i in 0..n {
                let (dx, dy) = disp[i];
                let len = (dx * dx + dy * dy).sqrt().max(1e-9);
                let step = len.min(t);
                pos[i].0 += dx / len * step;
                pos[i].1 += dy / len * step;
            }
        }

        rescale(&mut pos);
        pos
    }
}

/// Center on the origin and scale the largest extent to exactly 1.
fn rescale(pos: &mut [(f64, f64)]) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;

    let max_abs = pos
        .iter()
        .map(|p| (p.0 - cx).abs().max((p.1 - cy).abs()))
        .fold(0.0, f64::max);

    for p in pos.iter_mut() {
        if max_abs > 0.0 {
            p.0 = (p.0 - cx) / max_abs;
            p.1 = (p.1 - cy) / max_abs;
        } else {
            p.0 = 0.0;
            p.1 = 0.0;
        }
    }
}
