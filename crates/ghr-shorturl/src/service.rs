//! URL shortening service clients

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ShortUrlError};

/// A single URL shortening service
#[async_trait]
pub trait ShortUrlService: Send + Sync {
    /// Service name used in config and logs
    fn name(&self) -> &str;

    /// Shorten `url`
    ///
    /// The returned string may be empty when the service answered without a
    /// usable result; callers treat that as a failure.
    async fn shorten(&self, url: &str) -> Result<String>;
}

/// Services selectable from config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    IsGd,
    VGd,
    TinyUrl,
    DaGd,
    Bitly,
}

impl FromStr for ServiceKind {
    type Err = ShortUrlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "is.gd" | "isgd" => Ok(Self::IsGd),
            "v.gd" | "vgd" => Ok(Self::VGd),
            "tinyurl" | "tinyurl.com" => Ok(Self::TinyUrl),
            "da.gd" | "dagd" => Ok(Self::DaGd),
            "bit.ly" | "bitly" => Ok(Self::Bitly),
            other => Err(ShortUrlError::UnknownService(other.to_string())),
        }
    }
}

/// Service answering a GET request with the short URL as plain text
#[derive(Clone)]
pub struct TextApiService {
    name: String,
    client: Client,
    endpoint: String,
    url_param: String,
    extra_params: Vec<(String, String)>,
}

impl TextApiService {
    /// Create a service for an arbitrary plain-text endpoint
    pub fn new(name: &str, client: Client, endpoint: &str, url_param: &str) -> Self {
        Self {
            name: name.to_string(),
            client,
            endpoint: endpoint.to_string(),
            url_param: url_param.to_string(),
            extra_params: Vec::new(),
        }
    }

    /// Add a fixed query parameter sent with every request
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.extra_params.push((key.to_string(), value.to_string()));
        self
    }

    /// is.gd
    pub fn is_gd(client: Client) -> Self {
        Self::new("is.gd", client, "https://is.gd/create.php", "url").with_param("format", "simple")
    }

    /// v.gd, the is.gd sibling without preview pages
    pub fn v_gd(client: Client) -> Self {
        Self::new("v.gd", client, "https://v.gd/create.php", "url").with_param("format", "simple")
    }

    /// TinyURL
    pub fn tinyurl(client: Client) -> Self {
        Self::new("tinyurl", client, "https://tinyurl.com/api-create.php", "url")
    }

    /// da.gd
    pub fn da_gd(client: Client) -> Self {
        Self::new("da.gd", client, "https://da.gd/s", "url")
    }
}

#[async_trait]
impl ShortUrlService for TextApiService {
    fn name(&self) -> &str {
        &self.name
    }

    async fn shorten(&self, url: &str) -> Result<String> {
        let mut params: Vec<(&str, &str)> = self
            .extra_params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        params.push((self.url_param.as_str(), url));

        debug!("Shortening {} via {}", url, self.name);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(ShortUrlError::HttpError)?;

        let status = response.status();
        let body = response.text().await.map_err(ShortUrlError::HttpError)?;

        if !status.is_success() {
            return Err(ShortUrlError::ApiError {
                service: self.name.clone(),
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        Ok(body.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct BitlyRequest<'a> {
    long_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct BitlyResponse {
    #[serde(default)]
    link: Option<String>,
}

/// bit.ly v4 API client
#[derive(Clone)]
pub struct BitlyService {
    client: Client,
    token: String,
    base_url: String,
}

impl BitlyService {
    pub fn new(client: Client, token: &str) -> Self {
        Self::with_base_url(client, token, "https://api-ssl.bitly.com")
    }

    /// Create a client against a custom API host
    pub fn with_base_url(client: Client, token: &str, base_url: &str) -> Self {
        Self {
            client,
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ShortUrlService for BitlyService {
    fn name(&self) -> &str {
        "bit.ly"
    }

    async fn shorten(&self, url: &str) -> Result<String> {
        let endpoint = format!("{}/v4/shorten", self.base_url);

        debug!("Shortening {} via bit.ly", url);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.token)
            .json(&BitlyRequest { long_url: url })
            .send()
            .await
            .map_err(ShortUrlError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShortUrlError::ApiError {
                service: "bit.ly".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let result: BitlyResponse = response
            .json()
            .await
            .map_err(|e| ShortUrlError::ParseError(e.to_string()))?;

        Ok(result.link.unwrap_or_default())
    }
}
