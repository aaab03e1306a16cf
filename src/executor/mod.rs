//! Sequential sample collection
//!
//! The sampler drives a [`Measurement`] a fixed number of times, one call
//! after the other. Failed calls are logged and dropped, so the resulting
//! sample set may be shorter than requested but the run itself never fails.

use crate::{
    logging::Logger,
    measurement::Measurement,
    models::{PhaseReport, TierResult},
    stats::SampleSummary,
    types::{PayloadTier, SampleSet},
};
use std::time::Instant;

/// Runs measurements strictly in sequence and collects their samples
#[derive(Clone)]
pub struct Sampler {
    logger: Logger,
}

impl Sampler {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Invoke `measurement` `iterations` times with a payload of `bytes`
    pub async fn run(&self, measurement: &dyn Measurement, bytes: u64, iterations: u32) -> SampleSet {
        let kind = measurement.kind();
        let started = Instant::now();
        let mut samples = SampleSet::with_capacity(iterations as usize);

        for iteration in 1..=iterations {
            match measurement.measure(bytes).await {
                Ok(sample) => samples.push(sample),
                Err(error) => {
                    self.logger
                        .warn(&format!("{} sample failed", kind))
                        .field("bytes", bytes)
                        .field("iteration", iteration)
                        .error_info(&error)
                        .location(file!(), line!(), Some(module_path!()))
                        .log()
                        .await;
                }
            }
        }

        let mut entry = self
            .logger
            .info(&format!("{} sampling finished", kind))
            .field("bytes", bytes)
            .field("requested", iterations)
            .field("collected", samples.len())
            .field("elapsed_ms", started.elapsed().as_secs_f64() * 1000.0);
        if let Some(summary) = SampleSummary::from_samples(&samples) {
            entry = entry.field("summary", summary);
        }
        entry.log().await;

        samples
    }

    /// Sample one tier of the test plan
    pub async fn run_tier(&self, measurement: &dyn Measurement, tier: &PayloadTier) -> TierResult {
        let samples = self.run(measurement, tier.bytes, tier.iterations).await;
        TierResult::new(tier, samples)
    }

    /// Sample every tier of `plan` in order, calling `on_tier` as each completes
    pub async fn run_plan<F>(&self, measurement: &dyn Measurement, plan: &[PayloadTier], mut on_tier: F) -> PhaseReport
    where
        F: FnMut(&TierResult),
    {
        let mut report = PhaseReport::new(measurement.kind());
        for tier in plan {
            let result = self.run_tier(measurement, tier).await;
            on_tier(&result);
            report.push(result);
        }
        report
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(Logger::quiet("SAMPLER"))
    }
}
