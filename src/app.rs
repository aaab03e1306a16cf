//! Main application orchestration and execution

use crate::{
    client::{HttpProbe, TimingProbe},
    config::display_config_summary,
    defaults, discovery,
    error::Result,
    executor::Sampler,
    logging::Logger,
    measurement::{DownloadMeasurement, LatencyMeasurement, MeasurementIds, UploadMeasurement, Measurement},
    models::{Config, LocationDirectory, PhaseReport, TraceInfo},
    output::ConsoleReporter,
    stats::SampleSummary,
    types::{PayloadTier, SampleSet},
};
use std::sync::Arc;

/// Everything measured in one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub latency: SampleSet,
    pub trace: TraceInfo,
    pub locations: LocationDirectory,
    pub download: Option<PhaseReport>,
    pub upload: Option<PhaseReport>,
}

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    probe: Arc<HttpProbe>,
    logger: Logger,
    reporter: ConsoleReporter,
}

impl App {
    /// Create a new application against the public speed-test host
    pub fn new(config: Config) -> Result<Self> {
        let probe = HttpProbe::new(config.timeout())?;
        Ok(Self::with_probe(config, probe))
    }

    /// Create a new application using an already configured probe
    pub fn with_probe(config: Config, probe: HttpProbe) -> Self {
        let logger = Logger::with_config("APP".to_string(), &config);
        let reporter = ConsoleReporter::new(config.enable_color);
        Self {
            config,
            probe: Arc::new(probe),
            logger,
            reporter,
        }
    }

    /// Run the whole test sequence, printing results as they arrive
    pub async fn run(&self) -> Result<RunSummary> {
        let session = self.logger.start_session().await;
        self.logger
            .debug("Starting speed test session")
            .correlation_id(&session)
            .field("version", crate::VERSION)
            .field("build_time", crate::build_info::BUILD_TIME)
            .field("target", crate::build_info::TARGET_TRIPLE)
            .field("git_commit", crate::build_info::GIT_COMMIT)
            .log()
            .await;
        if self.config.debug {
            crate::log_debug!(self.logger, "Configuration:\n{}", display_config_summary(&self.config));
        }

        let sampler = Sampler::new(self.logger.named("SAMPLER"));
        let probe: Arc<dyn TimingProbe> = self.probe.clone();

        self.reporter.title();

        let latency_measurement = LatencyMeasurement::new(probe.clone()).with_logger(self.logger.named("LATENCY"));
        let latency = sampler
            .run(&latency_measurement, defaults::LATENCY_PAYLOAD_BYTES, defaults::LATENCY_SAMPLES)
            .await;

        let locations = discovery::fetch_locations(&self.probe, &self.logger).await;
        let trace = discovery::fetch_trace(&self.probe, &self.logger).await;
        self.reporter.connection(
            &discovery::server_location(&trace, &locations),
            &discovery::client_address(&trace),
        );
        self.reporter.latency(&latency);

        self.reporter.banners(&self.config);

        let download = if self.config.run_download {
            let measurement = DownloadMeasurement::new(probe.clone()).with_logger(self.logger.named("DOWNLOAD"));
            Some(self.run_phase(&sampler, &measurement, &self.config.download_plan()).await)
        } else {
            None
        };

        let upload = if self.config.run_upload {
            let measurement = UploadMeasurement::new(probe, MeasurementIds::new()).with_logger(self.logger.named("UPLOAD"));
            Some(self.run_phase(&sampler, &measurement, &self.config.upload_plan()).await)
        } else {
            None
        };

        Ok(RunSummary {
            latency,
            trace,
            locations,
            download,
            upload,
        })
    }

    async fn run_phase(&self, sampler: &Sampler, measurement: &dyn Measurement, plan: &[PayloadTier]) -> PhaseReport {
        let report = sampler
            .run_plan(measurement, plan, |tier| self.reporter.tier(tier))
            .await;
        self.reporter.overall(&report);

        let all = report.all_samples();
        let mut entry = self
            .logger
            .info(&format!("{} phase finished", report.kind))
            .field("tiers", report.tiers.len())
            .field("failed", report.tiers.iter().map(|t| t.failed()).sum::<usize>());
        if let Some(summary) = SampleSummary::from_samples(&all) {
            entry = entry.field("summary", summary);
        }
        entry.log().await;

        report
    }
}
