#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for a [`crate::workspace::Workspace`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Edge length in pixels of preview renders.
    pub preview_size: u32,
    /// Largest edge length any render, heightmap sample or export may use.
    pub max_image_size: u32,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            preview_size: 128,
            max_image_size: 8192,
        }
    }
}

impl WorkspaceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preview render size.
    pub fn with_preview_size(mut self, preview_size: u32) -> Self {
        self.preview_size = preview_size;
        self
    }

    /// Sets the export size limit.
    pub fn with_max_image_size(mut self, max_image_size: u32) -> Self {
        self.max_image_size = max_image_size;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.preview_size == 0 {
            return Err(Error::InvalidConfig("preview_size must be > 0".into()));
        }
        if self.max_image_size == 0 {
            return Err(Error::InvalidConfig("max_image_size must be > 0".into()));
        }
        if self.preview_size > self.max_image_size {
            return Err(Error::InvalidConfig(
                "preview_size must not exceed max_image_size".into(),
            ));
        }
        Ok(())
    }
}
