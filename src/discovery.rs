//! Client and server discovery
//!
//! Both lookups are best-effort: any failure is logged as a warning and an
//! empty result is returned so the speed test can go on.

use crate::{
    client::HttpProbe,
    error::Result,
    logging::Logger,
    models::{LocationDirectory, TraceInfo},
};
use serde::Deserialize;

pub const TRACE_PATH: &str = "/cdn-cgi/trace";
pub const LOCATIONS_PATH: &str = "/locations";

#[derive(Debug, Deserialize)]
struct LocationEntry {
    iata: String,
    city: String,
}

/// Parse a `key=value` trace body. Lines without `=` are skipped; only
/// `ip`, `loc` and `colo` are kept.
pub fn parse_trace(body: &str) -> TraceInfo {
    let mut trace = TraceInfo::default();

    for line in body.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key {
            "ip" => trace.ip = value.to_string(),
            "loc" => trace.loc = value.to_string(),
            "colo" => trace.colo = value.to_string(),
            _ => {}
        }
    }

    trace
}

/// Parse the `/locations` JSON array into an IATA → city directory
pub fn parse_locations(body: &[u8]) -> Result<LocationDirectory> {
    let entries: Vec<LocationEntry> = serde_json::from_slice(body)?;
    Ok(entries.into_iter().map(|entry| (entry.iata, entry.city)).collect())
}

/// Fetch and parse `/cdn-cgi/trace`; default trace on failure
pub async fn fetch_trace(probe: &HttpProbe, logger: &Logger) -> TraceInfo {
    let body = match probe.get_bytes(TRACE_PATH).await {
        Ok(body) => body,
        Err(error) => {
            logger
                .warn("Could not fetch client trace")
                .error_info(&error)
                .log()
                .await;
            return TraceInfo::default();
        }
    };

    let trace = parse_trace(&String::from_utf8_lossy(&body));
    if trace.is_empty() {
        crate::log_warn!(logger, "Client trace contained no known fields");
    }
    trace
}

/// Fetch and parse `/locations`; empty directory on failure
pub async fn fetch_locations(probe: &HttpProbe, logger: &Logger) -> LocationDirectory {
    let result = match probe.get_bytes(LOCATIONS_PATH).await {
        Ok(body) => parse_locations(&body),
        Err(error) => Err(error),
    };

    match result {
        Ok(directory) => {
            crate::log_debug!(logger, "Loaded {} server locations", directory.len());
            directory
        }
        Err(error) => {
            logger
                .warn("Could not load server locations")
                .error_info(&error)
                .log()
                .await;
            LocationDirectory::default()
        }
    }
}

/// Server location as `City (COLO)`; the city is blank when unknown
pub fn server_location(trace: &TraceInfo, directory: &LocationDirectory) -> String {
    format!("{} ({})", directory.city(&trace.colo).unwrap_or_default(), trace.colo)
}

/// Client address as `IP (LOC)`
pub fn client_address(trace: &TraceInfo) -> String {
    format!("{} ({})", trace.ip, trace.loc)
}
