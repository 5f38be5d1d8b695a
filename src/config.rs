use std::path::Path;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use specseg::segment::FallbackPolicy;
use specseg::window::{DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT};
use tracing::info;

use crate::util::read_json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub row_height: f64,
    pub overscan: usize,
    pub fallback: FallbackPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let config: Self = read_json(path)?;
        if !config.row_height.is_finite() || config.row_height <= 0.0 {
            bail!(
                "row_height must be a positive number in {} (got {})",
                path.display(),
                config.row_height
            );
        }

        info!(
            path = %path.display(),
            row_height = config.row_height,
            overscan = config.overscan,
            fallback = ?config.fallback,
            "loaded engine config"
        );
        Ok(config)
    }
}
