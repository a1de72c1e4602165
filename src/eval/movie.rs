// eval/movie.rs — Frame sequences and frame selection
//
// A movie reuses one set of channel trees for every frame and sweeps the
// time input across [-1, 1). A `FrameSet` is what a display collaborator
// holds on to: it only ever asks for a frame by index or by a scalar
// level (e.g. a loudness reading) that maps onto an index.

use crate::error::{ArtError, Result};
use crate::eval::builder::ChannelTrees;
use crate::eval::image::{check_dimensions, render_image, ImageResult};
use crate::eval::remap::remap_interval;
use log::info;

/// Level range the frame selector maps onto frame indices by default.
pub const DEFAULT_QUIET_LEVEL: f64 = 500.0;
pub const DEFAULT_LOUD_LEVEL: f64 = 5000.0;

/// Time input for frame `frame` of `frame_count`.
pub fn frame_time(frame: u32, frame_count: u32) -> Result<f64> {
    if frame_count == 0 {
        return Err(ArtError::InvalidFrameCount);
    }
    remap_interval(frame as f64, 0.0, frame_count as f64, -1.0, 1.0)
}

/// File name for frame `index`: `<prefix><index>.png`.
pub fn frame_name(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}.png")
}

/// Render `frame_count` frames of the same trees.
pub fn render_movie(
    trees: &ChannelTrees,
    width: u32,
    height: u32,
    frame_count: u32,
) -> Result<FrameSet> {
    check_dimensions(width, height)?;
    if frame_count == 0 {
        return Err(ArtError::InvalidFrameCount);
    }
    info!("rendering {} frames at {}x{}", frame_count, width, height);

    let frames = (0..frame_count)
        .map(|frame| render_image(trees, width, height, frame_time(frame, frame_count)?))
        .collect::<Result<Vec<_>>>()?;
    FrameSet::new(frames)
}

/// An ordered, non-empty list of rendered frames.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<ImageResult>,
}

impl FrameSet {
    pub fn new(frames: Vec<ImageResult>) -> Result<Self> {
        if frames.is_empty() {
            return Err(ArtError::InvalidFrameCount);
        }
        Ok(FrameSet { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[ImageResult] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&ImageResult> {
        self.frames.get(index)
    }

    /// Frame at `index`; indices past the end fall back to the last frame.
    pub fn select(&self, index: usize) -> &ImageResult {
        let last = self.frames.len() - 1;
        &self.frames[index.min(last)]
    }

    /// Index a level maps to.
    ///
    /// `level` is remapped from `[quiet, loud]` onto `[1, frame_count]` and
    /// truncated; results below zero clamp to the first frame and results
    /// past the end clamp to the last. Negative positions do not wrap
    /// around from the end the way the Python tool's list indexing did.
    pub fn level_index(&self, level: f64, quiet: f64, loud: f64) -> Result<usize> {
        let pos = remap_interval(level, quiet, loud, 1.0, self.frames.len() as f64)?.trunc();
        let last = self.frames.len() - 1;
        if pos.is_nan() || pos <= 0.0 {
            Ok(0)
        } else {
            Ok((pos as usize).min(last))
        }
    }

    /// Frame for a level reading, see `level_index`.
    pub fn select_by_level(&self, level: f64, quiet: f64, loud: f64) -> Result<&ImageResult> {
        let idx = self.level_index(level, quiet, loud)?;
        Ok(&self.frames[idx])
    }
}

impl IntoIterator for FrameSet {
    type Item = ImageResult;
    type IntoIter = std::vec::IntoIter<ImageResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}
