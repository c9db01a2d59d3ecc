//! Graph figure rendering: edge, node and label layers.

use crate::graph::MarketGraph;
use crate::render::{colors, draw_filled_circle, draw_line, font, ImageConfig};
use image::RgbImage;

/// Arrowhead wing length in pixels and half-angle in radians.
const ARROW_LENGTH: f64 = 10.0;
const ARROW_ANGLE: f64 = 0.45;

/// Renders a laid-out graph into an RGB image.
///
/// Styling is uniform across elements, matching the figure this crate
/// reproduces: red nodes, black directed edges, blue ticker labels.
/// Edge weights are carried by the graph but not visually encoded.
pub struct GraphRenderer {
    config: ImageConfig,
    node_radius: i32,
    label_scale: u32,
}

impl Default for GraphRenderer {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}

impl GraphRenderer {
    pub fn new(config: ImageConfig) -> Self {
        Self {
            config,
            node_radius: 6,
            label_scale: 2,
        }
    }

    pub fn with_node_radius(mut self, radius: i32) -> Self {
        self.node_radius = radius;
        self
    }

    pub fn with_label_scale(mut self, scale: u32) -> Self {
        self.label_scale = scale;
        self
    }

    /// Render the graph. `positions` holds one [-1, 1]² coordinate per
    /// node, indexed by `NodeIndex::index()` (as produced by
    /// [`crate::graph::SpringLayout::run`]).
    pub fn render(&self, graph: &MarketGraph, positions: &[(f64, f64)]) -> RgbImage {
        let mut img = RgbImage::from_pixel(
            self.config.width,
            self.config.height,
            self.config.background,
        );

        let projected: Vec<(i32, i32)> = positions.iter().map(|&p| self.project(p)).collect();

        // Edge layer.
        for (a, b, _weight) in graph.edge_list() {
            let (pa, pb) = match (projected.get(a.index()), projected.get(b.index())) {
                (Some(&pa), Some(&pb)) => (pa, pb),
                _ => continue,
            };
            if pa == pb {
                continue;
            }
            draw_line(&mut img, pa.0, pa.1, pb.0, pb.1, colors::BLACK);
            self.draw_arrowhead(&mut img, pa, pb);
        }

        // Node layer, on top of the edges.
        for &(px, py) in &projected {
            draw_filled_circle(&mut img, px, py, self.node_radius, colors::RED);
        }

        // Label layer.
        for (idx, symbol) in graph.symbols().iter().enumerate() {
            let (px, py) = match projected.get(idx) {
                Some(&p) => p,
                None => continue,
            };
            let width = font::text_width(symbol, self.label_scale) as i32;
            let mut lx = px + self.node_radius + 4;
            if lx + width >= self.config.width as i32 {
                lx = px - self.node_radius - 4 - width;
            }
            let ly = py - (font::GLYPH_HEIGHT * self.label_scale) as i32 / 2;
            font::draw_text(&mut img, lx, ly, symbol, self.label_scale, colors::BLUE);
        }

        img
    }

    /// Map a layout coordinate into the margined pixel area. The y axis
    /// flips so positive layout y points up in the image.
    fn project(&self, (x, y): (f64, f64)) -> (i32, i32) {
        let margin = self.config.margin as f64;
        let usable_w = self.config.width.saturating_sub(2 * self.config.margin) as f64;
        let usable_h = self.config.height.saturating_sub(2 * self.config.margin) as f64;

        let px = margin + (x + 1.0) / 2.0 * usable_w;
        let py = margin + (1.0 - (y + 1.0) / 2.0) * usable_h;
        (px.round() as i32, py.round() as i32)
    }

    /// Two-stroke arrowhead at the target end, pulled back to the node
    /// circle's rim.
    fn draw_arrowhead(&self, img: &mut RgbImage, from: (i32, i32), to: (i32, i32)) {
        let dx = (to.0 - from.0) as f64;
        let dy = (to.1 - from.1) as f64;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1.0 {
            return;
        }
        let (ux, uy) = (dx / len, dy / len);

        let tip_x = to.0 as f64 - ux * self.node_radius as f64;
        let tip_y = to.1 as f64 - uy * self.node_radius as f64;

        for angle in [ARROW_ANGLE, -ARROW_ANGLE] {
            let (sin, cos) = angle.sin_cos();
            // Rotate the reversed direction vector by ±angle.
            let wx = -ux * cos + uy * sin;
            let wy = -ux * sin - uy * cos;
            draw_line(
                img,
                tip_x.round() as i32,
                tip_y.round() as i32,
                (tip_x + wx * ARROW_LENGTH).round() as i32,
                (tip_y + wy * ARROW_LENGTH).round() as i32,
                colors::BLACK,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn edge(source: &str, target: &str, weight: f64) -> Edge {
        Edge {
            source: source.to_string(),
            target: target.to_string(),
            raw_weight: 0.05,
            normalized_weight: weight,
            floored_weight: weight,
        }
    }

    #[test]
    fn test_render_dimensions() {
        let graph = MarketGraph::from_edges(&[edge("A", "B", 1.0)]);
        let img = GraphRenderer::default().render(&graph, &[(-1.0, 0.0), (1.0, 0.0)]);

        assert_eq!(img.width(), 800);
        assert_eq!(img.height(), 800);
    }

    #[test]
    fn test_layers_present_at_expected_pixels() {
        let graph = MarketGraph::from_edges(&[edge("A", "B", 1.0)]);
        // Nodes pinned to the horizontal extremes of the layout square.
        let img = GraphRenderer::default().render(&graph, &[(-1.0, 0.0), (1.0, 0.0)]);

        // Projected centers: x = 80 and 720, y = 400 (margin 80, 640 usable).
        assert_eq!(*img.get_pixel(80, 400), colors::RED);
        assert_eq!(*img.get_pixel(720, 400), colors::RED);
        // Mid-span of the connecting edge.
        assert_eq!(*img.get_pixel(400, 400), colors::BLACK);
        // Background untouched in a corner.
        assert_eq!(*img.get_pixel(0, 0), colors::WHITE);
        // Some label ink exists.
        assert!(img.pixels().any(|&p| p == colors::BLUE));
    }

    #[test]
    fn test_empty_graph_renders_background_only() {
        let graph = MarketGraph::new();
        let img = GraphRenderer::default().render(&graph, &[]);

        assert!(img.pixels().all(|&p| p == colors::WHITE));
    }

    #[test]
    fn test_label_flips_inside_right_margin() {
        let graph = MarketGraph::from_edges(&[edge("AAAAAAAA", "B", 1.0)]);
        let config = ImageConfig {
            width: 200,
            height: 200,
            margin: 10,
            ..Default::default()
        };
        let img = GraphRenderer::new(config).render(&graph, &[(1.0, 0.0), (-1.0, 0.0)]);

        // Label for the rightmost node must be drawn, to its left.
        assert!(img.pixels().any(|&p| p == colors::BLUE));
    }
}
