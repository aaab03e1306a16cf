//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    error::{AppError, Result},
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        self.cli.validate().map_err(AppError::validation)?;

        let mut config = Config::default();
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        config.run_download = self.cli.runs_download();
        config.run_upload = self.cli.runs_upload();
        config.lite_download = self.cli.lite || self.cli.lite_download;
        config.lite_upload = self.cli.lite || self.cli.lite_upload;

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = Some(timeout);
        }

        // Explicit flags win over ENABLE_COLOR; otherwise the terminal decides
        if self.cli.color || self.cli.no_color {
            config.enable_color = self.cli.use_colors();
        } else {
            config.enable_color = config.enable_color && self.cli.use_colors();
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let labels = |plan: Vec<crate::types::PayloadTier>| {
        plan.iter().map(|tier| tier.label).collect::<Vec<_>>().join(", ")
    };

    let mut summary = Vec::new();

    summary.push(format!("Speed test host: {}", crate::defaults::SPEED_TEST_URL));
    if config.run_download {
        summary.push(format!("Download tiers: {}", labels(config.download_plan())));
    }
    if config.run_upload {
        summary.push(format!("Upload tiers: {}", labels(config.upload_plan())));
    }
    match config.timeout_seconds {
        Some(secs) => summary.push(format!("Timeout: {}s", secs)),
        None => summary.push("Timeout: none".to_string()),
    }
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::env;
    use std::sync::Mutex;

    // Serializes tests that touch process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("TIMEOUT_SECONDS");
        env::remove_var("ENABLE_COLOR");
    }

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["nst"];
        argv.extend_from_slice(args);
        ConfigParser::new(Cli::parse_from(argv)).parse()
    }

    #[test]
    fn test_defaults_run_everything() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = parse(&[]).unwrap();
        assert!(config.run_download);
        assert!(config.run_upload);
        assert!(!config.lite_download);
        assert!(!config.lite_upload);
        assert_eq!(config.timeout_seconds, None);
    }

    #[test]
    fn test_cli_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = parse(&["--upload", "--lite-upload", "--timeout", "5", "--no-color", "--verbose"]).unwrap();
        assert!(!config.run_download);
        assert!(config.run_upload);
        assert!(!config.lite_download);
        assert!(config.lite_upload);
        assert_eq!(config.timeout_seconds, Some(5));
        assert!(!config.enable_color);
        assert!(config.verbose);
        assert!(!config.debug);
    }

    #[test]
    fn test_lite_applies_to_both_directions() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = parse(&["--lite"]).unwrap();
        assert!(config.is_lite());
        assert_eq!(config.download_plan().len(), 3);
        assert_eq!(config.upload_plan().len(), 3);
    }

    #[test]
    fn test_env_values_are_merged() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("TIMEOUT_SECONDS", "42");
        env::set_var("ENABLE_COLOR", "false");

        let config = parse(&[]).unwrap();
        assert_eq!(config.timeout_seconds, Some(42));
        assert!(!config.enable_color);

        // CLI wins over the environment
        let config = parse(&["--timeout", "7", "--color"]).unwrap();
        assert_eq!(config.timeout_seconds, Some(7));
        assert!(config.enable_color);

        clear_env();
    }

    #[test]
    fn test_invalid_env_values() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("TIMEOUT_SECONDS", "soon");
        assert!(matches!(parse(&[]), Err(AppError::Config(_))));

        env::set_var("TIMEOUT_SECONDS", "0");
        assert!(parse(&[]).is_err());

        env::set_var("TIMEOUT_SECONDS", "301");
        assert!(parse(&[]).is_err());

        clear_env();
        env::set_var("ENABLE_COLOR", "maybe");
        assert!(parse(&[]).is_err());

        clear_env();
    }

    #[test]
    fn test_color_conflict_is_validation_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let error = parse(&["--color", "--no-color"]).unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_config_summary() {
        let config = Config { lite_download: true, run_upload: false, timeout_seconds: Some(15), ..Config::default() };
        let summary = display_config_summary(&config);

        assert!(summary.contains("Download tiers: 100kB, 1MB, 10MB"));
        assert!(!summary.contains("100MB"));
        assert!(!summary.contains("Upload tiers"));
        assert!(summary.contains("Timeout: 15s"));
    }
}
