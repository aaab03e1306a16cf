//! Command-line interface

use clap::Parser;

/// Network Speed Tester - measure latency, jitter and throughput against Cloudflare
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "nst")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Test download speed only
    #[arg(long)]
    pub download: bool,

    /// Test upload speed only
    #[arg(long)]
    pub upload: bool,

    /// Show version and exit
    #[arg(long)]
    pub version: bool,

    /// Run only up to 10MB download/upload tests
    #[arg(long)]
    pub lite: bool,

    /// Run only up to 10MB download tests
    #[arg(long)]
    pub lite_download: bool,

    /// Run only up to 10MB upload tests
    #[arg(long)]
    pub lite_upload: bool,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(short, long, value_parser = parse_duration)]
    pub timeout: Option<u64>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }
        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }

    /// Whether the download phase runs; neither direction flag means both
    pub fn runs_download(&self) -> bool {
        self.download || !self.upload
    }

    /// Whether the upload phase runs; neither direction flag means both
    pub fn runs_upload(&self) -> bool {
        self.upload || !self.download
    }

    pub fn version_line() -> String {
        format!("{} version {}", crate::PKG_NAME, crate::VERSION)
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        summary.push_str(&format!("  Download test: {}\n", self.runs_download()));
        summary.push_str(&format!("  Upload test: {}\n", self.runs_upload()));
        summary.push_str(&format!("  Lite download: {}\n", self.lite || self.lite_download));
        summary.push_str(&format!("  Lite upload: {}\n", self.lite || self.lite_upload));
        match self.timeout {
            Some(secs) => summary.push_str(&format!("  Timeout: {}s\n", secs)),
            None => summary.push_str("  Timeout: none\n"),
        }
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        summary
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_TIMEOUT_SECS {
                Err(format!("Duration cannot exceed {} seconds", crate::defaults::MAX_TIMEOUT_SECS))
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
