//! Ordered fallback over shortening services

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, info, warn};

use ghr_core::ShortUrlConfig;

use crate::error::{Result, ShortUrlError};
use crate::service::{BitlyService, ServiceKind, ShortUrlService, TextApiService};

/// Tries each service in order until one returns a short URL
///
/// Shortening never fails: when every service errors or answers with an
/// empty result, the original URL is used.
#[derive(Clone, Default)]
pub struct FallbackShortener {
    services: Vec<Arc<dyn ShortUrlService>>,
}

impl FallbackShortener {
    /// Create a shortener over services in fallback order
    pub fn new(services: Vec<Arc<dyn ShortUrlService>>) -> Self {
        Self { services }
    }

    /// Build the service list from the `[shorturl]` config section
    ///
    /// bit.ly is skipped when no token is configured.
    pub fn from_config(config: &ShortUrlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ShortUrlError::HttpError)?;

        // A blank token, e.g. an unset `${BITLY_TOKEN}`, counts as none
        let bitly_token = config.bitly_token.as_deref().filter(|t| !t.trim().is_empty());

        let mut services: Vec<Arc<dyn ShortUrlService>> = Vec::new();
        for name in &config.services {
            let kind: ServiceKind = name.parse()?;
            match kind {
                ServiceKind::IsGd => services.push(Arc::new(TextApiService::is_gd(client.clone()))),
                ServiceKind::VGd => services.push(Arc::new(TextApiService::v_gd(client.clone()))),
                ServiceKind::TinyUrl => {
                    services.push(Arc::new(TextApiService::tinyurl(client.clone())))
                }
                ServiceKind::DaGd => services.push(Arc::new(TextApiService::da_gd(client.clone()))),
                ServiceKind::Bitly => match bitly_token {
                    Some(token) => services.push(Arc::new(BitlyService::new(client.clone(), token))),
                    None => warn!("bit.ly configured without bitly_token, skipping"),
                },
            }
        }

        info!(
            "URL shortening services: {:?}",
            services.iter().map(|s| s.name()).collect::<Vec<_>>()
        );

        Ok(Self { services })
    }

    /// Service names in fallback order
    pub fn service_names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name()).collect()
    }

    /// Shorten a URL, falling back to the original
    pub async fn shorten(&self, url: &str) -> String {
        for service in &self.services {
            match service.shorten(url).await {
                Ok(short) => {
                    let short = short.trim();
                    if !short.is_empty() {
                        debug!("{} shortened {} to {}", service.name(), url, short);
                        return short.to_string();
                    }
                    warn!("{} returned an empty short URL for {}", service.name(), url);
                }
                Err(e) => warn!("{} failed for {}: {}", service.name(), url, e),
            }
        }

        debug!("No short URL for {}, using original", url);
        url.to_string()
    }

    /// Shorten several URLs concurrently, results in input order
    pub async fn shorten_all(&self, urls: &[String]) -> Vec<String> {
        join_all(urls.iter().map(|url| self.shorten(url))).await
    }
}
