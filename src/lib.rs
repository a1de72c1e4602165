//! Procedural art from random recursive function trees.
//!
//! Three random function trees (one per color channel) are evaluated over
//! a normalized `[-1, 1)` pixel grid and mapped to 8-bit channel values.
//! Everything is deterministic given the seed of the random source.

pub mod commands;
pub mod config;
pub mod error;
pub mod eval;

pub use config::ArtConfig;
pub use error::{ArtError, Result};
pub use eval::builder::{build_random_function, ChannelTrees};
pub use eval::function::{Coord, FunctionNode};
pub use eval::image::{render_art, render_image, ImageResult};
pub use eval::movie::{render_movie, FrameSet};
pub use eval::remap::{color_map, remap_interval};
