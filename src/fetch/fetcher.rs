//! Page fetcher
//!
//! Resolves a page path against the site root, issues the request through the
//! configured [`Transport`], classifies the response and backs off on
//! transient failures.

use crate::fetch::classify::{classify, is_transient, SoftErrorTable};
use crate::normalize::plain_text;
use crate::transport::{FormBody, Transport, TransportRequest};
use crate::{FaError, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// `Some` sends a form POST, `None` a GET
    pub form: Option<FormBody>,
}

impl FetchOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(form: FormBody) -> Self {
        Self { form: Some(form) }
    }

    fn to_request(&self, cookies: Option<&str>) -> TransportRequest {
        let mut request = match &self.form {
            Some(form) => TransportRequest::post_form(form.clone()),
            None => TransportRequest::get(),
        };
        request.cookies = cookies.map(str::to_string);
        request
    }
}

/// Delay before retry number `attempt` (1-based): 2, 4, 8, ... seconds
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(20))
}

/// Fetches pages through an injected transport
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn Transport>,
    site_root: Url,
    cookies: Option<String>,
    disable_retry: bool,
    max_retries: u32,
    soft_errors: SoftErrorTable,
}

impl PageFetcher {
    pub fn new(transport: Arc<dyn Transport>, site_root: Url) -> Self {
        Self {
            transport,
            site_root,
            cookies: None,
            disable_retry: false,
            max_retries: crate::config::DEFAULT_MAX_RETRIES,
            soft_errors: SoftErrorTable::default(),
        }
    }

    pub fn with_cookies(mut self, cookies: Option<String>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_retry(mut self, disable_retry: bool, max_retries: u32) -> Self {
        self.disable_retry = disable_retry;
        self.max_retries = max_retries;
        self
    }

    pub fn with_soft_errors(mut self, soft_errors: SoftErrorTable) -> Self {
        self.soft_errors = soft_errors;
        self
    }

    pub fn site_root(&self) -> &Url {
        &self.site_root
    }

    pub fn soft_errors(&self) -> &SoftErrorTable {
        &self.soft_errors
    }

    /// Absolute URL for a page path; absolute inputs pass through
    pub fn resolve(&self, path: &str) -> Result<Url> {
        Ok(self.site_root.join(path)?)
    }

    fn should_retry(&self, status: u16, attempt: u32) -> bool {
        !self.disable_retry && is_transient(status) && attempt <= self.max_retries
    }

    /// Fetches one page and returns its body
    ///
    /// # Arguments
    ///
    /// * `path` - Page path, relative to the site root or absolute
    /// * `options` - Method and form body
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The body of a page classified as 200
    /// * `Err(FaError::Site)` - A permanent error, or a transient one that
    ///   outlived its retries
    /// * `Err(_)` - The transport failed; these are not retried
    pub async fn fetch(&self, path: &str, options: &FetchOptions) -> Result<String> {
        let url = self.resolve(path)?.to_string();
        let request = options.to_request(self.cookies.as_deref());

        let mut attempt: u32 = 1;
        loop {
            tracing::debug!("Fetching {} (attempt {})", url, attempt);
            let response = self.transport.issue(&url, &request).await?;

            let status = classify(response.status, &response.body, &self.soft_errors);
            if status == 200 {
                return Ok(response.body);
            }

            tracing::warn!("Got site error {} at {}", status, url);

            if self.should_retry(status, attempt) {
                let delay = backoff_delay(attempt);
                tracing::warn!("Retrying {} in {}s", url, delay.as_secs());
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(FaError::Site {
                status,
                url,
                body: plain_text(&response.body),
            });
        }
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("site_root", &self.site_root.as_str())
            .field("has_cookies", &self.cookies.is_some())
            .field("disable_retry", &self.disable_retry)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
