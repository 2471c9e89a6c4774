use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a `RasterConfig` can't be used to build a raster.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidConfig {
    #[error("raster must be constructed with a width")]
    MissingWidth,
    #[error("raster must be constructed with a height")]
    MissingHeight,
    #[error("raster width must be non-zero")]
    ZeroWidth,
    #[error("raster height must be non-zero")]
    ZeroHeight,
    #[error("raster width {0} is not a multiple of 8")]
    UnalignedWidth(u32),
}

/// Construction parameters for a raster. Both fields are required; they are optional here
/// so that partially filled config files can be merged before validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
}
impl RasterConfig {
    pub fn new(width: u32, height: u32) -> Self {
        RasterConfig {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Fields set in `other` take precedence.
    pub fn merge(self, other: RasterConfig) -> Self {
        RasterConfig {
            width: other.width.or(self.width),
            height: other.height.or(self.height),
        }
    }

    /// Checks the width first, then the height, and returns `(width, height)`.
    pub fn validate(&self) -> Result<(u32, u32), InvalidConfig> {
        let width = match self.width {
            None => return Err(InvalidConfig::MissingWidth),
            Some(0) => return Err(InvalidConfig::ZeroWidth),
            Some(w) if w % 8 != 0 => return Err(InvalidConfig::UnalignedWidth(w)),
            Some(w) => w,
        };
        let height = match self.height {
            None => return Err(InvalidConfig::MissingHeight),
            Some(0) => return Err(InvalidConfig::ZeroHeight),
            Some(h) => h,
        };
        Ok((width, height))
    }
}
