use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RenderError;

/// Edge length of the square master canvas every format is derived from.
pub const MASTER_SIZE: u32 = 1200;

/// A named output format derived from the master render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormatSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl FormatSpec {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Open-graph style landscape cover, 1200x628.
    pub fn landscape() -> Self {
        Self::new("landscape", MASTER_SIZE, 628)
    }

    /// Square cover matching the master extent.
    pub fn square() -> Self {
        Self::new("square", MASTER_SIZE, MASTER_SIZE)
    }

    /// Reject degenerate target sizes up front so determinism bugs surface
    /// as errors instead of empty images.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Check that a direct (unscaled) crop of this format fits the master.
    pub fn validate_within(&self, master_width: u32, master_height: u32) -> Result<(), RenderError> {
        self.validate()?;
        if self.width > master_width || self.height > master_height {
            return Err(RenderError::CropExceedsMaster {
                width: self.width,
                height: self.height,
                master_width,
                master_height,
            });
        }
        Ok(())
    }
}
