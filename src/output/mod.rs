//! Report formatting for the speed test summary
//!
//! Formatting is split from printing: [`ReportFormatter`] builds each line as
//! a string, [`ConsoleReporter`] writes them to stdout as the run progresses.

mod colored;

pub use self::colored::{ConsoleStyle, Tone};

use crate::{
    defaults,
    models::{Config, PhaseReport, TierResult},
    stats,
    types::{Sample, TestKind},
};

/// Right edge of the labels in the header and latency block
const LABEL_WIDTH: usize = 15;
/// Right edge of the tier size in per-tier lines
const TIER_WIDTH: usize = 9;

const NOT_AVAILABLE: &str = "N/A";

/// `value` with two decimals and its unit, or `N/A` when it cannot be shown
pub fn format_value(value: f64, unit: &str) -> String {
    if value.is_finite() {
        format!("{:.2} {}", value, unit)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Builds the report lines
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    style: ConsoleStyle,
}

impl ReportFormatter {
    pub fn new(enable_color: bool) -> Self {
        Self {
            style: ConsoleStyle::new(enable_color),
        }
    }

    pub fn title(&self) -> String {
        self.style.bold("Cloudflare Speed Test").to_string()
    }

    /// `label: value`, label right-aligned
    pub fn info_line(&self, label: &str, value: &str) -> String {
        let label = format!("{:>width$}:", label, width = LABEL_WIDTH);
        self.style.labelled(&label, value, Tone::Info)
    }

    /// Median latency and jitter of the latency samples
    pub fn latency_lines(&self, samples: &[Sample]) -> [String; 2] {
        let unit = TestKind::Latency.unit();
        [
            self.metric_line("Latency", &format_value(stats::median(samples), unit), Tone::Latency),
            self.metric_line("Jitter", &format_value(jitter_or_nan(samples), unit), Tone::Latency),
        ]
    }

    /// Mode banners for the configured run, in display order
    pub fn banners(&self, config: &Config) -> Vec<String> {
        let mut banners = Vec::new();

        if config.is_lite() {
            banners.push(self.style.emphasize("[Lite mode] Only running up to 10MB download/upload tests.", Tone::Highlight));
        } else {
            if config.lite_download {
                banners.push(self.style.emphasize("[Lite download mode] Only running up to 10MB download tests.", Tone::Highlight));
            }
            if config.lite_upload {
                banners.push(self.style.emphasize("[Lite upload mode] Only running up to 10MB upload tests.", Tone::Highlight));
            }
        }

        if config.run_download && !config.run_upload {
            banners.push(self.style.emphasize("[Download only mode]", Tone::Mode));
        }
        if config.run_upload && !config.run_download {
            banners.push(self.style.emphasize("[Upload only mode]", Tone::Mode));
        }

        banners.into_iter().map(|banner| banner.to_string()).collect()
    }

    /// Median speed of one tier
    pub fn tier_line(&self, tier: &TierResult) -> String {
        let label = format!("{:>width$} speed:", tier.label, width = TIER_WIDTH + 1);
        let speed = format_value(stats::median(&tier.samples), "Mbps");
        self.style.labelled(&label, &speed, Tone::TierSpeed)
    }

    /// Overall speed of one direction: the high quantile of every sample
    pub fn overall_line(&self, report: &PhaseReport) -> String {
        let label = match report.kind {
            TestKind::Upload => "Upload speed",
            _ => "Download speed",
        };

        let samples = report.all_samples();
        if samples.is_empty() {
            return format!("{:>width$}: {}", label, NOT_AVAILABLE, width = LABEL_WIDTH + 1);
        }

        let speed = stats::quantile(&samples, defaults::SPEED_QUANTILE);
        self.metric_line(label, &format_value(speed, report.kind.unit()), Tone::Highlight)
    }

    fn metric_line(&self, label: &str, value: &str, tone: Tone) -> String {
        let label = format!("{:>width$}:", label, width = LABEL_WIDTH + 1);
        self.style.labelled(&label, value, tone)
    }
}

/// Jitter of a latency series; NaN when no latency was measured at all
fn jitter_or_nan(samples: &[Sample]) -> f64 {
    if samples.is_empty() {
        f64::NAN
    } else {
        stats::jitter(samples)
    }
}

/// Writes report lines to stdout
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    formatter: ReportFormatter,
}

impl ConsoleReporter {
    pub fn new(enable_color: bool) -> Self {
        Self {
            formatter: ReportFormatter::new(enable_color),
        }
    }

    pub fn formatter(&self) -> &ReportFormatter {
        &self.formatter
    }

    pub fn title(&self) {
        println!("{}", self.formatter.title());
    }

    pub fn connection(&self, server_location: &str, client_address: &str) {
        println!("{}", self.formatter.info_line("Server location", server_location));
        println!("{}", self.formatter.info_line("Your IP", client_address));
    }

    pub fn latency(&self, samples: &[Sample]) {
        for line in self.formatter.latency_lines(samples) {
            println!("{}", line);
        }
    }

    pub fn banners(&self, config: &Config) {
        for banner in self.formatter.banners(config) {
            println!("{}", banner);
        }
    }

    pub fn tier(&self, tier: &TierResult) {
        println!("{}", self.formatter.tier_line(tier));
    }

    pub fn overall(&self, report: &PhaseReport) {
        println!("{}", self.formatter.overall_line(report));
    }
}
