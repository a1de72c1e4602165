use crate::config::ArtConfig;
use crate::eval::builder::ChannelTrees;
use crate::eval::image::{render_image, STILL_TIME};
use crate::eval::movie::frame_time;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
    /// Seed for the channel tree builder
    pub seed: u64,
    /// Depth bounds for every channel tree
    pub min_depth: i32,
    pub max_depth: i32,
    /// Time input for every pixel
    pub time: f64,
}

impl Default for RenderRequest {
    fn default() -> Self {
        let config = ArtConfig::default();
        RenderRequest {
            width: config.width,
            height: config.height,
            seed: 0,
            min_depth: config.min_depth,
            max_depth: config.max_depth,
            time: STILL_TIME,
        }
    }
}

impl RenderRequest {
    /// Request for frame `frame` of a `frame_count`-frame movie.
    pub fn for_frame(
        seed: u64,
        width: u32,
        height: u32,
        frame: u32,
        frame_count: u32,
    ) -> Result<Self, String> {
        let time = frame_time(frame, frame_count).map_err(|e| e.to_string())?;
        Ok(RenderRequest {
            width,
            height,
            seed,
            time,
            ..RenderRequest::default()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub width: u32,
    pub height: u32,
    /// Flattened RGB8 pixels (row-major)
    pub rgb: Vec<u8>,
    /// Channel formulas, for inspection
    pub red: String,
    pub green: String,
    pub blue: String,
}

/// Build seeded channel trees and render one image.
pub fn render_request(request: &RenderRequest) -> Result<RenderResponse, String> {
    let config = ArtConfig {
        width: request.width,
        height: request.height,
        min_depth: request.min_depth,
        max_depth: request.max_depth,
        seed: Some(request.seed),
        ..ArtConfig::default()
    };
    config
        .validate()
        .map_err(|e| format!("Invalid request: {}", e))?;

    let trees = ChannelTrees::from_seed(request.seed, request.min_depth, request.max_depth);
    let image = render_image(&trees, request.width, request.height, request.time)
        .map_err(|e| format!("Render error: {}", e))?;

    Ok(RenderResponse {
        width: image.width,
        height: image.height,
        rgb: image.to_rgb_bytes(),
        red: trees.red.to_string(),
        green: trees.green.to_string(),
        blue: trees.blue.to_string(),
    })
}
