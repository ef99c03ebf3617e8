use morphimate_image::ImageSize;
use morphimate_imgproc::interpolation::InterpolationMode;
use serde::{Deserialize, Serialize};

use crate::error::MorphError;

/// Settings of a morph animation.
///
/// Missing fields take their [`Default`] value when deserializing.
///
/// # Example
///
/// ```
/// use morphimate::MorphConfig;
///
/// let config = MorphConfig::from_json(r#"{ "size": { "width": 64, "height": 48 } }"#).unwrap();
/// assert_eq!(config.size.width, 64);
/// assert_eq!(config.morph_steps, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Output image size; every warp and blend is computed on this grid.
    pub size: ImageSize,
    /// Number of geometric steps from one image to the next.
    pub morph_steps: usize,
    /// Number of tween frames rendered between two geometric steps.
    pub tweens_per_morph: usize,
    /// Maximum number of produced frames waiting for the consumer.
    pub frame_buffer: usize,
    /// Resampling used by the warps.
    pub interpolation: InterpolationMode,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            size: ImageSize {
                width: 500,
                height: 600,
            },
            morph_steps: 50,
            tweens_per_morph: 50,
            frame_buffer: 200,
            interpolation: InterpolationMode::Bicubic,
        }
    }
}

impl MorphConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, MorphError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MorphError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive an animation.
    pub fn validate(&self) -> Result<(), MorphError> {
        if self.size.is_empty() {
            return Err(MorphError::Config(format!(
                "output size must not be empty, got {}",
                self.size
            )));
        }
        if self.morph_steps < 2 {
            return Err(MorphError::Config(format!(
                "morph_steps must be at least 2, got {}",
                self.morph_steps
            )));
        }
        if self.tweens_per_morph == 0 {
            return Err(MorphError::Config("tweens_per_morph must be > 0".into()));
        }
        if self.frame_buffer == 0 {
            return Err(MorphError::Config("frame_buffer must be > 0".into()));
        }
        Ok(())
    }
}
