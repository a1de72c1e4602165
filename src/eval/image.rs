// eval/image.rs — Pixel grid rendering with rayon parallelism
//
// Evaluates the three channel trees over a width × height pixel grid.
// Pixel index `i` maps to x and `j` to y, both through
// `remap_interval(idx, 0, size, -1, 1)`, so the grid covers [-1, 1) with
// the top-left pixel at (-1, -1).
//
// Rows are evaluated in parallel using rayon::par_iter. Trees are immutable
// after construction, so workers share them by reference.

use crate::error::{ArtError, Result};
use crate::eval::builder::ChannelTrees;
use crate::eval::remap::remap_interval;
use log::info;
use rayon::prelude::*;
use serde::Serialize;

/// Time value used for single still images.
pub const STILL_TIME: f64 = 1.0;

/// A rendered RGB image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageResult {
    /// Row-major pixels: `pixels[j * width + i]`.
    /// Length = width × height.
    pub pixels: Vec<[u8; 3]>,
    pub width: u32,
    pub height: u32,
}

impl ImageResult {
    /// Pixel at column `i`, row `j`, or `None` outside the image.
    pub fn pixel(&self, i: u32, j: u32) -> Option<[u8; 3]> {
        if i >= self.width || j >= self.height {
            return None;
        }
        self.pixels
            .get(j as usize * self.width as usize + i as usize)
            .copied()
    }

    /// Flat RGB8 buffer, row-major, ready for a raster encoder.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Normalized coordinates of every pixel index along one axis.
pub(crate) fn axis_coords(size: u32) -> Result<Vec<f64>> {
    (0..size)
        .map(|idx| remap_interval(idx as f64, 0.0, size as f64, -1.0, 1.0))
        .collect()
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ArtError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Render the channel trees at time `time` over a width × height grid.
pub fn render_image(
    trees: &ChannelTrees,
    width: u32,
    height: u32,
    time: f64,
) -> Result<ImageResult> {
    check_dimensions(width, height)?;
    let xs = axis_coords(width)?;
    let ys = axis_coords(height)?;

    // Evaluate rows in parallel, each row is one y coordinate
    let rows: Vec<Vec<[u8; 3]>> = ys
        .par_iter()
        .map(|&y| xs.iter().map(|&x| trees.pixel_color(x, y, time)).collect())
        .collect();

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for row in rows {
        pixels.extend(row);
    }

    Ok(ImageResult {
        pixels,
        width,
        height,
    })
}

/// Render a single still image (`t = 1`).
pub fn render_art(trees: &ChannelTrees, width: u32, height: u32) -> Result<ImageResult> {
    info!("rendering {}x{} still", width, height);
    render_image(trees, width, height, STILL_TIME)
}
