//! Timing samples and speed test result data models

use crate::types::{PayloadTier, SampleSet, TestKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Raw instants captured by one probe request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSample {
    /// Immediately before the request was sent
    pub start: Instant,

    /// When the first response body byte was observed
    pub first_byte: Instant,

    /// When the response body was fully drained
    pub end: Instant,

    /// When the request body was fully handed to the connection (uploads only)
    pub upload_done: Option<Instant>,

    /// Server-reported processing duration from `Server-Timing`, 0 when absent
    pub server_duration: f64,
}

impl TimingSample {
    /// Time from request start to first byte
    pub fn time_to_first_byte(&self) -> Duration {
        self.first_byte.saturating_duration_since(self.start)
    }

    /// Time from first byte to end of body
    pub fn transfer_duration(&self) -> Duration {
        self.end.saturating_duration_since(self.first_byte)
    }

    /// Whole client-observed request lifetime
    pub fn total_duration(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }

    /// Time spent writing the request body, if it was instrumented
    pub fn upload_write_duration(&self) -> Option<Duration> {
        self.upload_done.map(|done| done.saturating_duration_since(self.start))
    }

    /// First-byte latency in milliseconds with server processing time removed
    pub fn latency_ms(&self) -> f64 {
        self.time_to_first_byte().as_secs_f64() * 1000.0 - self.server_duration
    }

    pub fn first_byte_ms(&self) -> f64 {
        self.time_to_first_byte().as_secs_f64() * 1000.0
    }

    pub fn total_ms(&self) -> f64 {
        self.total_duration().as_secs_f64() * 1000.0
    }
}

/// Caller details reported by the trace endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceInfo {
    /// Public IP of the caller
    pub ip: String,
    /// Coarse location (country code)
    pub loc: String,
    /// Data-center code that served the request
    pub colo: String,
}

impl TraceInfo {
    pub fn is_empty(&self) -> bool {
        self.ip.is_empty() && self.loc.is_empty() && self.colo.is_empty()
    }
}

/// Data-center code to city name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDirectory {
    cities: HashMap<String, String>,
}

impl LocationDirectory {
    pub fn new(cities: HashMap<String, String>) -> Self {
        Self { cities }
    }

    /// Resolve a data-center code to its city
    pub fn city(&self, colo: &str) -> Option<&str> {
        self.cities.get(colo).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl FromIterator<(String, String)> for LocationDirectory {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { cities: iter.into_iter().collect() }
    }
}

/// Samples collected for one payload tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    pub label: String,
    pub bytes: u64,
    pub requested: u32,
    pub samples: SampleSet,
}

impl TierResult {
    pub fn new(tier: &PayloadTier, samples: SampleSet) -> Self {
        Self {
            label: tier.label.to_string(),
            bytes: tier.bytes,
            requested: tier.iterations,
            samples,
        }
    }

    /// Number of samples that were dropped after failing
    pub fn failed(&self) -> usize {
        (self.requested as usize).saturating_sub(self.samples.len())
    }
}

/// All tiers of one test direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
    pub kind: TestKind,
    pub tiers: Vec<TierResult>,
}

impl PhaseReport {
    pub fn new(kind: TestKind) -> Self {
        Self { kind, tiers: Vec::new() }
    }

    pub fn push(&mut self, tier: TierResult) {
        self.tiers.push(tier);
    }

    /// Every tier's samples concatenated in plan order
    pub fn all_samples(&self) -> SampleSet {
        self.tiers.iter().flat_map(|t| t.samples.iter().copied()).collect()
    }
}
