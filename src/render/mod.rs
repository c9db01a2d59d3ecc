//! Raster rendering of the cointegration graph.

mod font;
mod graph_image;

pub use graph_image::GraphRenderer;

use image::{Rgb, RgbImage};

/// Color palette for graph images.
pub mod colors {
    use image::Rgb;

    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const RED: Rgb<u8> = Rgb([255, 68, 68]);
    pub const BLUE: Rgb<u8> = Rgb([33, 150, 243]);
}

/// Image dimensions and framing.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    /// Blank border kept around the drawing area, in pixels.
    pub margin: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            background: colors::WHITE,
            margin: 80,
        }
    }
}

/// Draw a line segment with Bresenham's algorithm. Out-of-bounds
/// pixels are skipped.
pub(crate) fn draw_line(img: &mut RgbImage, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb<u8>) {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut x = x1;
    let mut y = y1;

    loop {
        put_pixel_checked(img, x, y, color);

        if x == x2 && y == y2 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle centered on `(cx, cy)`.
pub(crate) fn draw_filled_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_checked(img, cx + dx, cy + dy, color);
            }
        }
    }
}

fn put_pixel_checked(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
