//! HTTP client for the listing site.
//!
//! Features:
//! - Fresh browser fingerprint per request (see [`crate::fingerprint`])
//! - Brotli, Zstd, Gzip compression (auto-negotiated)
//! - Bounded connect and total timeouts per fetch
//! - Non-success statuses surfaced as [`BridgeError::Blocked`]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, COOKIE, REFERER};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::fingerprint::ProfileRotation;

/// One outbound page fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFetch {
    pub url: String,
    /// Page that "embedded" this one. Also switches the fingerprint to an iframe load.
    pub referer: Option<String>,
    /// Raw `Cookie` header value.
    pub cookies: Option<String>,
}

impl PageFetch {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }
}

/// Fetches page bodies. Implemented by [`SiteClient`] and by test fixtures.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `request.url` and return the body text. Exactly one attempt, no retries.
    async fn fetch_page(&self, request: &PageFetch) -> Result<String>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch_page(&self, request: &PageFetch) -> Result<String> {
        (**self).fetch_page(request).await
    }
}

/// HTTP client that impersonates ordinary desktop browser traffic.
pub struct SiteClient {
    client: Client,
    profiles: ProfileRotation,
}

impl SiteClient {
    /// Build a client from configuration.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let client = Client::builder()
            // Let the server negotiate HTTP/1.1 vs HTTP/2
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(config.connect_timeout())
            .timeout(config.fetch_timeout())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        let profiles = ProfileRotation::from_user_agents(&config.user_agents);
        debug!(
            configured_agents = profiles.configured_len(),
            "Site client ready"
        );

        Ok(Self { client, profiles })
    }
}

#[async_trait]
impl PageFetcher for SiteClient {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn fetch_page(&self, request: &PageFetch) -> Result<String> {
        let profile = self.profiles.next_profile();
        let profile = if request.referer.is_some() {
            profile.for_iframe()
        } else {
            profile
        };

        let mut headers = profile.to_headers();
        if let Some(referer) = request.referer.as_deref() {
            if let Ok(value) = HeaderValue::from_str(referer) {
                headers.insert(REFERER, value);
            }
        }
        if let Some(cookies) = request.cookies.as_deref() {
            if let Ok(value) = HeaderValue::from_str(cookies) {
                headers.insert(COOKIE, value);
            }
        }

        debug!(user_agent = %profile.user_agent, "Fetching");
        let response = self
            .client
            .get(&request.url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| classify(e, &request.url))?;

        let status = response.status();
        info!(
            status = %status,
            version = ?response.version(),
            content_encoding = ?response.headers().get("content-encoding"),
            "Response received"
        );

        if !status.is_success() {
            if status == reqwest::StatusCode::FORBIDDEN {
                warn!("Request blocked, likely bot mitigation");
            }
            return Err(BridgeError::Blocked {
                status,
                url: request.url.clone(),
            });
        }

        response.text().await.map_err(|e| classify(e, &request.url))
    }
}

fn classify(err: reqwest::Error, url: &str) -> BridgeError {
    if err.is_timeout() {
        BridgeError::Timeout {
            url: url.to_string(),
        }
    } else {
        BridgeError::Transport(err)
    }
}
