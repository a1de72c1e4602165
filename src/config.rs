use crate::error::{ArtError, Result};
use crate::eval::builder::{ChannelTrees, DEFAULT_MAX_DEPTH, DEFAULT_MIN_DEPTH};
use crate::eval::movie::{DEFAULT_LOUD_LEVEL, DEFAULT_QUIET_LEVEL};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Generation parameters for stills and movies.
///
/// Every field has a default, so a config file only needs the keys it
/// changes. Without a `seed` the trees come from OS entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtConfig {
    pub width: u32,
    pub height: u32,
    pub min_depth: i32,
    pub max_depth: i32,
    /// Frames per movie; also the number of selectable frames.
    pub frame_count: u32,
    pub seed: Option<u64>,
    /// Level mapped onto frame 1 by the frame selector.
    pub quiet_level: f64,
    /// Level mapped onto the last frame by the frame selector.
    pub loud_level: f64,
}

impl Default for ArtConfig {
    fn default() -> Self {
        ArtConfig {
            width: 350,
            height: 350,
            min_depth: DEFAULT_MIN_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
            frame_count: 50,
            seed: None,
            quiet_level: DEFAULT_QUIET_LEVEL,
            loud_level: DEFAULT_LOUD_LEVEL,
        }
    }
}

impl ArtConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ArtConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ArtError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_depth < 0 || self.min_depth > self.max_depth {
            return Err(ArtError::InvalidDepth {
                min_depth: self.min_depth,
                max_depth: self.max_depth,
            });
        }
        if self.frame_count == 0 {
            return Err(ArtError::InvalidFrameCount);
        }
        if self.quiet_level == self.loud_level {
            return Err(ArtError::InvalidInterval {
                start: self.quiet_level,
                end: self.loud_level,
            });
        }
        Ok(())
    }

    /// Build the channel trees this config describes.
    pub fn channel_trees(&self) -> ChannelTrees {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            "building channel trees, depth {}..={}, seed {:?}",
            self.min_depth, self.max_depth, self.seed
        );
        ChannelTrees::build(&mut rng, self.min_depth, self.max_depth)
    }
}
