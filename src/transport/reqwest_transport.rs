use crate::transport::{Method, Transport, TransportRequest, TransportResponse};
use crate::{FaError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use std::time::Duration;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent string sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Default transport backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = build_http_client(user_agent).map_err(|source| FaError::Http {
            url: String::new(),
            source,
        })?;
        Ok(Self { client })
    }

    /// Wraps an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue(&self, url: &str, request: &TransportRequest) -> Result<TransportResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };

        if let Some(cookies) = &request.cookies {
            builder = builder.header(COOKIE, cookies.as_str());
        }

        if let Some(body) = &request.body {
            let content_type = request.content_type.as_deref().unwrap_or(FORM_CONTENT_TYPE);
            builder = builder.header(CONTENT_TYPE, content_type).body(body.encode());
        }

        let response = builder.send().await.map_err(|source| FaError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| FaError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(TransportResponse { status, body })
    }
}
