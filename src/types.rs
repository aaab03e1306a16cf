//! Type definitions and aliases

use std::fmt;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// A single measurement: milliseconds for latency, Mbps for throughput
pub type Sample = f64;

/// Ordered samples from one sampler run. May be shorter than requested.
pub type SampleSet = Vec<Sample>;

/// Kind of measurement performed by a test phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestKind {
    /// Round-trip latency derived from time-to-first-byte
    Latency,
    /// Download throughput
    Download,
    /// Upload throughput
    Upload,
}

impl TestKind {
    /// Unit of the samples produced by this kind of test
    pub fn unit(&self) -> &'static str {
        match self {
            TestKind::Latency => "ms",
            TestKind::Download | TestKind::Upload => "Mbps",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::Latency => write!(f, "latency"),
            TestKind::Download => write!(f, "download"),
            TestKind::Upload => write!(f, "upload"),
        }
    }
}

/// One payload size of the test plan and how often it is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadTier {
    /// Display label, e.g. `1MB`
    pub label: &'static str,
    /// Payload size in bytes
    pub bytes: u64,
    /// Number of sequential samples to take
    pub iterations: u32,
}

impl PayloadTier {
    pub const fn new(label: &'static str, bytes: u64, iterations: u32) -> Self {
        Self { label, bytes, iterations }
    }

    /// Whether this tier survives lite mode
    pub fn is_lite(&self) -> bool {
        self.bytes <= crate::defaults::LITE_MAX_BYTES
    }
}
