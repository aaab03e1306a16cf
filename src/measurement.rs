//! Latency and throughput measurements built on the timing probe
//!
//! Download and upload are separate variants on purpose: download latency is
//! corrected by the server-reported processing time and its throughput uses
//! only the body transfer window, while upload throughput is taken over the
//! whole client-observed request lifetime.

use crate::{
    client::{ProbeRequest, TimingProbe},
    error::Result,
    logging::Logger,
    models::TimingSample,
    types::{Sample, TestKind},
};
use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Lower bound (inclusive) of generated measurement ids
pub const MEAS_ID_MIN: u64 = 1_000_000_000_000_000;
/// Upper bound (exclusive) of generated measurement ids
pub const MEAS_ID_MAX: u64 = 11_000_000_000_000_000;

/// Megabits per second for `bytes` moved in `elapsed`; 0 when nothing elapsed
pub fn throughput_mbps(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        (bytes * 8) as f64 / secs / 1e6
    } else {
        0.0
    }
}

/// Result of one download probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadSample {
    pub latency_ms: f64,
    pub speed_mbps: f64,
    pub timing: TimingSample,
}

/// Result of one upload probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadSample {
    pub speed_mbps: f64,
    pub timing: TimingSample,
}

impl UploadSample {
    /// Time until the request body was fully written, when instrumented
    pub fn write_duration(&self) -> Option<Duration> {
        self.timing.upload_write_duration()
    }
}

/// Download `bytes` and derive latency and throughput
pub async fn download(probe: &dyn TimingProbe, bytes: u64) -> Result<DownloadSample> {
    let timing = probe.request(ProbeRequest::download(bytes)).await?;

    Ok(DownloadSample {
        latency_ms: timing.latency_ms(),
        speed_mbps: throughput_mbps(bytes, timing.transfer_duration()),
        timing,
    })
}

/// Upload `bytes` of synthetic payload and derive throughput
pub async fn upload(probe: &dyn TimingProbe, ids: &MeasurementIds, bytes: u64) -> Result<UploadSample> {
    let request = ProbeRequest::upload(&ids.next_id(), synthetic_payload(bytes));
    let timing = probe.request(request).await?;

    Ok(UploadSample {
        speed_mbps: throughput_mbps(bytes, timing.total_duration()),
        timing,
    })
}

/// Upload body of `bytes` ASCII zeros
pub fn synthetic_payload(bytes: u64) -> Vec<u8> {
    vec![b'0'; bytes as usize]
}

/// Generator of upload measurement ids, seeded once per process
pub struct MeasurementIds {
    rng: Mutex<StdRng>,
}

impl MeasurementIds {
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    /// Deterministic sequence, for tests
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    pub fn next_id(&self) -> String {
        let id = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(MEAS_ID_MIN..MEAS_ID_MAX),
            Err(poisoned) => poisoned.into_inner().gen_range(MEAS_ID_MIN..MEAS_ID_MAX),
        };
        id.to_string()
    }
}

impl Default for MeasurementIds {
    fn default() -> Self {
        Self::new()
    }
}

/// One repeatable measurement the sampler can drive
#[async_trait]
pub trait Measurement: Send + Sync {
    fn kind(&self) -> TestKind;

    /// Take one sample for a payload of `bytes`
    async fn measure(&self, bytes: u64) -> Result<Sample>;
}

/// First-byte latency of a download, in ms
pub struct LatencyMeasurement {
    probe: Arc<dyn TimingProbe>,
    logger: Logger,
}

impl LatencyMeasurement {
    pub fn new(probe: Arc<dyn TimingProbe>) -> Self {
        Self {
            probe,
            logger: Logger::quiet("LATENCY"),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

#[async_trait]
impl Measurement for LatencyMeasurement {
    fn kind(&self) -> TestKind {
        TestKind::Latency
    }

    async fn measure(&self, bytes: u64) -> Result<Sample> {
        let sample = download(self.probe.as_ref(), bytes).await?;

        self.logger
            .trace("Latency sample")
            .probe_timing(&sample.timing)
            .field("latency_ms", sample.latency_ms)
            .log()
            .await;

        Ok(sample.latency_ms)
    }
}

/// Download throughput, in Mbps
pub struct DownloadMeasurement {
    probe: Arc<dyn TimingProbe>,
    logger: Logger,
}

impl DownloadMeasurement {
    pub fn new(probe: Arc<dyn TimingProbe>) -> Self {
        Self {
            probe,
            logger: Logger::quiet("DOWNLOAD"),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

#[async_trait]
impl Measurement for DownloadMeasurement {
    fn kind(&self) -> TestKind {
        TestKind::Download
    }

    async fn measure(&self, bytes: u64) -> Result<Sample> {
        let sample = download(self.probe.as_ref(), bytes).await?;

        self.logger
            .debug("Download sample")
            .probe_timing(&sample.timing)
            .field("bytes", bytes)
            .field("speed_mbps", sample.speed_mbps)
            .log()
            .await;

        Ok(sample.speed_mbps)
    }
}

/// Upload throughput, in Mbps
pub struct UploadMeasurement {
    probe: Arc<dyn TimingProbe>,
    ids: MeasurementIds,
    logger: Logger,
}

impl UploadMeasurement {
    pub fn new(probe: Arc<dyn TimingProbe>, ids: MeasurementIds) -> Self {
        Self {
            probe,
            ids,
            logger: Logger::quiet("UPLOAD"),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }
}

#[async_trait]
impl Measurement for UploadMeasurement {
    fn kind(&self) -> TestKind {
        TestKind::Upload
    }

    async fn measure(&self, bytes: u64) -> Result<Sample> {
        let sample = upload(self.probe.as_ref(), &self.ids, bytes).await?;

        self.logger
            .debug("Upload sample")
            .probe_timing(&sample.timing)
            .field("bytes", bytes)
            .field("speed_mbps", sample.speed_mbps)
            .log()
            .await;

        Ok(sample.speed_mbps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashSet;
    use std::time::Instant;

    /// Probe replaying fixed durations and recording what it was asked
    struct FixedProbe {
        ttfb: Duration,
        transfer: Duration,
        server_duration: f64,
        requests: Mutex<Vec<ProbeRequest>>,
    }

    impl FixedProbe {
        fn new(ttfb_ms: u64, transfer_ms: u64, server_duration: f64) -> Self {
            Self {
                ttfb: Duration::from_millis(ttfb_ms),
                transfer: Duration::from_millis(transfer_ms),
                server_duration,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TimingProbe for FixedProbe {
        async fn request(&self, request: ProbeRequest) -> Result<TimingSample> {
            let upload = request.is_upload();
            self.requests.lock().unwrap().push(request);

            let start = Instant::now();
            let first_byte = start + self.ttfb;
            Ok(TimingSample {
                start,
                first_byte,
                end: first_byte + self.transfer,
                upload_done: upload.then_some(start + self.ttfb / 2),
                server_duration: self.server_duration,
            })
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl TimingProbe for FailingProbe {
        async fn request(&self, _request: ProbeRequest) -> Result<TimingSample> {
            Err(AppError::network("connection refused"))
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_throughput() {
        // 1_000_000 bytes in one second is 8 Mbps
        assert_close(throughput_mbps(1_000_000, Duration::from_secs(1)), 8.0);
        assert_close(throughput_mbps(101_000, Duration::from_millis(80)), 10.1);
    }

    #[test]
    fn test_zero_duration_throughput_is_zero() {
        let speed = throughput_mbps(1_000_000, Duration::ZERO);
        assert_eq!(speed, 0.0);
        assert!(speed.is_finite());
    }

    #[tokio::test]
    async fn test_download_metrics() {
        let probe = FixedProbe::new(40, 100, 12.0);
        let sample = download(&probe, 1_000_000).await.unwrap();

        assert_close(sample.latency_ms, 28.0);
        assert_close(sample.speed_mbps, 80.0);

        let requests = probe.requests.lock().unwrap();
        assert_eq!(requests[0], ProbeRequest::download(1_000_000));
    }

    #[tokio::test]
    async fn test_download_with_no_transfer_time_reports_zero() {
        let probe = FixedProbe::new(10, 0, 0.0);
        let sample = download(&probe, 101_000).await.unwrap();
        assert_eq!(sample.speed_mbps, 0.0);
    }

    #[tokio::test]
    async fn test_upload_uses_whole_request_lifetime() {
        let probe = FixedProbe::new(150, 50, 99.0);
        let ids = MeasurementIds::seeded(7);
        let sample = upload(&probe, &ids, 1_000_000).await.unwrap();

        // 8 Mbit over 200ms, server timing ignored
        assert_close(sample.speed_mbps, 40.0);
        assert_eq!(sample.write_duration(), Some(Duration::from_millis(75)));

        let requests = probe.requests.lock().unwrap();
        assert_eq!(requests[0].body_len(), 1_000_000);
        assert!(requests[0].path.starts_with("/__up?measId="));
        assert!(requests[0].body.as_ref().unwrap().iter().all(|b| *b == b'0'));
    }

    #[tokio::test]
    async fn test_failures_propagate() {
        let ids = MeasurementIds::seeded(1);
        assert!(download(&FailingProbe, 1000).await.is_err());
        assert!(upload(&FailingProbe, &ids, 1000).await.is_err());
    }

    #[tokio::test]
    async fn test_measurement_variants() {
        let probe: Arc<dyn TimingProbe> = Arc::new(FixedProbe::new(20, 100, 5.0));

        let latency = LatencyMeasurement::new(probe.clone());
        assert_eq!(latency.kind(), TestKind::Latency);
        assert_close(latency.measure(1000).await.unwrap(), 15.0);

        let download = DownloadMeasurement::new(probe.clone());
        assert_eq!(download.kind(), TestKind::Download);
        assert_close(download.measure(1_000_000).await.unwrap(), 80.0);

        let upload = UploadMeasurement::new(probe, MeasurementIds::seeded(3));
        assert_eq!(upload.kind(), TestKind::Upload);
        assert_close(upload.measure(1_000_000).await.unwrap(), 8.0 / 0.12);
    }

    #[test]
    fn test_measurement_ids_are_wide_and_distinct() {
        let ids = MeasurementIds::new();
        let generated: HashSet<String> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);

        for id in &generated {
            let value: u64 = id.parse().unwrap();
            assert!((MEAS_ID_MIN..MEAS_ID_MAX).contains(&value));
        }
    }

    #[test]
    fn test_seeded_ids_are_reproducible() {
        let a = MeasurementIds::seeded(42);
        let b = MeasurementIds::seeded(42);
        assert_eq!(a.next_id(), b.next_id());
    }
}
