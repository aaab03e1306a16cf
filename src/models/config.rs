//! Configuration data model and validation

use crate::types::{AppError, PayloadTier, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Run the download tiers
    #[serde(default = "default_true")]
    pub run_download: bool,

    /// Run the upload tiers
    #[serde(default = "default_true")]
    pub run_upload: bool,

    /// Skip download tiers above 10MB
    #[serde(default)]
    pub lite_download: bool,

    /// Skip upload tiers above 10MB
    #[serde(default)]
    pub lite_upload: bool,

    /// Per-request timeout; `None` leaves requests unbounded
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_download: true,
            run_upload: true,
            lite_download: false,
            lite_upload: false,
            timeout_seconds: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Lite mode in both directions
    pub fn is_lite(&self) -> bool {
        self.lite_download && self.lite_upload
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if !self.run_download && !self.run_upload {
            return Err(AppError::config("At least one of download or upload must be enabled"));
        }

        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(AppError::config("Timeout must be greater than 0"));
            }

            if timeout > crate::defaults::MAX_TIMEOUT_SECS {
                return Err(AppError::config(format!(
                    "Timeout cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECS
                )));
            }
        }

        Ok(())
    }

    /// Download tiers to run, lite filtering applied
    pub fn download_plan(&self) -> Vec<PayloadTier> {
        plan(crate::defaults::DOWNLOAD_TIERS, self.lite_download)
    }

    /// Upload tiers to run, lite filtering applied
    pub fn upload_plan(&self) -> Vec<PayloadTier> {
        plan(crate::defaults::UPLOAD_TIERS, self.lite_upload)
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(timeout) = std::env::var("TIMEOUT_SECONDS") {
            let timeout = timeout.parse()
                .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
            self.timeout_seconds = Some(timeout);
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

fn plan(tiers: &[PayloadTier], lite: bool) -> Vec<PayloadTier> {
    tiers.iter().copied().filter(|tier| !lite || tier.is_lite()).collect()
}

fn default_true() -> bool {
    true
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
