//! Network Speed Tester
//!
//! Measures latency, jitter, download and upload throughput against the
//! Cloudflare speed-test service and prints a formatted summary.

pub mod app;
pub mod cli;
pub mod config;
pub mod client;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod logging;
pub mod measurement;
pub mod models;
pub mod output;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, TimingSample, TraceInfo, LocationDirectory, PhaseReport, TierResult};
pub use client::{HttpProbe, TimingProbe, ProbeRequest};
pub use executor::Sampler;
pub use app::{App, RunSummary};
pub use measurement::{download, upload, Measurement, MeasurementIds, LatencyMeasurement, DownloadMeasurement, UploadMeasurement};
pub use stats::{average, median, quantile, jitter, SampleSummary};
pub use types::{Sample, SampleSet, TestKind, PayloadTier};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata recorded by the build script
pub mod build_info {
    pub const BUILD_TIME: &str = env!("BUILD_TIME");
    pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");
    pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");
}

/// Default configuration values
pub mod defaults {
    use crate::types::PayloadTier;

    pub const SPEED_TEST_URL: &str = "https://speed.cloudflare.com";
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";

    /// Payload used for latency probes
    pub const LATENCY_PAYLOAD_BYTES: u64 = 1000;
    pub const LATENCY_SAMPLES: u32 = 20;

    /// Largest payload kept in lite mode
    pub const LITE_MAX_BYTES: u64 = 10_001_000;

    /// Quantile reported as the overall download/upload speed
    pub const SPEED_QUANTILE: f64 = 0.9;

    pub const DOWNLOAD_TIERS: &[PayloadTier] = &[
        PayloadTier::new("100kB", 101_000, 10),
        PayloadTier::new("1MB", 1_001_000, 8),
        PayloadTier::new("10MB", 10_001_000, 6),
        PayloadTier::new("100MB", 25_001_000, 4),
    ];

    pub const UPLOAD_TIERS: &[PayloadTier] = &[
        PayloadTier::new("10kB", 11_000, 10),
        PayloadTier::new("1MB", 1_001_000, 8),
        PayloadTier::new("10MB", 10_001_000, 6),
        PayloadTier::new("100MB", 25_001_000, 4),
    ];

    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
}
