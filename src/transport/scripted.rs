//! In-memory transport for unit tests

use crate::transport::{Transport, TransportRequest, TransportResponse};
use crate::{FaError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Replays canned responses per URL and records every request
///
/// Each URL holds a queue; the last response of a queue is sticky, so a page
/// can be fetched any number of times.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<TransportResponse>>>,
    requests: Mutex<Vec<(String, TransportRequest)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for an absolute URL
    pub fn respond(self, url: &str, status: u16, body: &str) -> Self {
        if let Ok(mut routes) = self.routes.lock() {
            routes
                .entry(url.to_string())
                .or_default()
                .push_back(TransportResponse {
                    status,
                    body: body.to_string(),
                });
        }
        self
    }

    pub fn requests(&self) -> Vec<(String, TransportRequest)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn issue(&self, url: &str, request: &TransportRequest) -> Result<TransportResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((url.to_string(), request.clone()));
        }

        let mut routes = self
            .routes
            .lock()
            .map_err(|_| FaError::Transport("scripted transport poisoned".to_string()))?;
        let queue = routes
            .get_mut(url)
            .ok_or_else(|| FaError::Transport(format!("no scripted response for {}", url)))?;

        let response = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        response.ok_or_else(|| FaError::Transport(format!("empty script for {}", url)))
    }
}
