//! Network Speed Tester - Main CLI Application
//!
//! Measures latency, jitter, download and upload throughput against the
//! Cloudflare speed-test service.

use clap::Parser;
use network_speed_tester::{
    app::App,
    cli::Cli,
    config::load_config,
    error::{AppError, Result},
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    if cli.version {
        println!("{}", Cli::version_line());
        return;
    }

    let use_color = !cli.no_color;
    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    let config = load_config(cli)?;
    let app = App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Use either --color or --no-color, not both");
            eprintln!("  - --timeout and TIMEOUT_SECONDS accept 1 to 300 seconds");
            eprintln!("  - ENABLE_COLOR accepts true or false");
        }
        AppError::Network(_) | AppError::HttpRequest(_) | AppError::Timeout(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Verify that speed.cloudflare.com is reachable");
            eprintln!("  - Increase the limit with --timeout");
        }
        _ => {}
    }
}
