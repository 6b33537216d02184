//! Transport boundary
//!
//! The client never opens sockets itself. Every request goes through a
//! [`Transport`], so tests and alternative network stacks can be substituted.
//! [`ReqwestTransport`] is the default implementation.

mod reqwest_transport;
#[cfg(test)]
pub(crate) mod scripted;

pub use reqwest_transport::{build_http_client, ReqwestTransport, FORM_CONTENT_TYPE};

use crate::Result;
use async_trait::async_trait;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// An ordered form body; keys may repeat (`items[]`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Builder form of [`FormBody::push`]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// All values recorded under `key`, in order
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// `application/x-www-form-urlencoded` rendering
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Everything a transport needs to issue one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub cookies: Option<String>,
    pub body: Option<FormBody>,
    pub content_type: Option<String>,
}

impl TransportRequest {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            cookies: None,
            body: None,
            content_type: None,
        }
    }

    /// A form POST
    pub fn post_form(body: FormBody) -> Self {
        Self {
            method: Method::Post,
            cookies: None,
            body: Some(body),
            content_type: Some(FORM_CONTENT_TYPE.to_string()),
        }
    }
}

/// Raw response handed back to the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Issues HTTP requests on behalf of the client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request to an absolute URL
    ///
    /// Non-2xx statuses are not errors at this layer; they are returned as-is
    /// and classified by the fetcher.
    async fn issue(&self, url: &str, request: &TransportRequest) -> Result<TransportResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_keeps_repeated_keys_in_order() {
        let body = FormBody::new()
            .with("manage_notes", 1)
            .with("move_to", "archive")
            .with("items[]", 111)
            .with("items[]", 222);

        assert_eq!(body.values("items[]"), vec!["111", "222"]);
        assert_eq!(
            body.encode(),
            "manage_notes=1&move_to=archive&items%5B%5D=111&items%5B%5D=222"
        );
    }

    #[test]
    fn test_post_form_sets_content_type() {
        let request = TransportRequest::post_form(FormBody::new().with("q", "fox"));
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.content_type.as_deref(), Some(FORM_CONTENT_TYPE));
    }
}
