//! HTTP timing probe against the speed-test service

pub mod server_timing;
pub mod upload_body;


use crate::{
    defaults,
    error::{AppError, Result},
    models::TimingSample,
};
use async_trait::async_trait;
use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE, ORIGIN, REFERER},
    Client, Method, Url,
};
use std::time::{Duration, Instant};

/// One timed request. Abstracted so measurements can run against a
/// deterministic probe in tests.
#[async_trait]
pub trait TimingProbe: Send + Sync {
    /// Perform exactly one request and report its timestamps
    async fn request(&self, request: ProbeRequest) -> Result<TimingSample>;
}

/// Request issued by a probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub method: Method,
    /// Path and query relative to the speed-test host
    pub path: String,
    pub body: Option<Vec<u8>>,
}

impl ProbeRequest {
    /// `GET /__down?bytes=<bytes>`
    pub fn download(bytes: u64) -> Self {
        Self {
            method: Method::GET,
            path: format!("/__down?bytes={}", bytes),
            body: None,
        }
    }

    /// `POST /__up?measId=<id>` carrying `payload`
    pub fn upload(meas_id: &str, payload: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            path: format!("/__up?measId={}", meas_id),
            body: Some(payload),
        }
    }

    /// Upload requests get browser headers and an instrumented body
    pub fn is_upload(&self) -> bool {
        self.method == Method::POST
            && self.path.starts_with("/__up")
            && self.body.as_ref().is_some_and(|body| !body.is_empty())
    }

    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}

/// reqwest-backed probe
pub struct HttpProbe {
    client: Client,
    base_url: Url,
}

impl HttpProbe {
    /// Probe against the public speed-test host
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_base_url(defaults::SPEED_TEST_URL, timeout)
    }

    /// Probe against another host serving the same endpoints
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::config(format!("Invalid speed-test URL '{}': {}", base_url, e)))?;

        let mut builder = Client::builder().user_agent(defaults::USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Plain GET returning the whole body; used for the discovery endpoints
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.url(path)?)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TimingProbe for HttpProbe {
    async fn request(&self, request: ProbeRequest) -> Result<TimingSample> {
        let is_upload = request.is_upload();
        let mut builder = self.client.request(request.method, self.url(&request.path)?);

        let mut write_marker = None;
        if let Some(body) = request.body {
            if is_upload {
                let origin = self.base_url.origin().ascii_serialization();
                let content_length = body.len();
                let (stream, marker) = upload_body::instrumented(body);
                builder = builder
                    .header(CONTENT_TYPE, "text/plain;charset=UTF-8")
                    .header(CONTENT_LENGTH, content_length)
                    .header(ORIGIN, origin.as_str())
                    .header(REFERER, format!("{}/", origin))
                    .body(stream);
                write_marker = Some(marker);
            } else {
                builder = builder.body(body);
            }
        }

        let start = Instant::now();
        let mut response = builder.send().await?;
        let server_duration = server_timing::from_headers(response.headers());

        // First body chunk marks time-to-first-byte; an empty body reads as EOF here.
        let first_chunk = response.chunk().await?;
        let first_byte = Instant::now();
        if first_chunk.is_some() {
            while response.chunk().await?.is_some() {}
        }
        let end = Instant::now();

        Ok(TimingSample {
            start,
            first_byte,
            end,
            upload_done: write_marker.and_then(|marker| marker.get()),
            server_duration,
        })
    }
}
