//! Test doubles for the transport port.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use sailthru_domain::Result;

use crate::transport_ports::{PreparedRequest, Transport};

/// Transport that records every request and replays canned responses.
///
/// Queued responses are returned first, in order; after that every call
/// returns the default body.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    default_body: String,
    queued: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<PreparedRequest>>,
}

impl RecordingTransport {
    /// Returns `{}` unless responses are queued.
    pub fn new() -> Self {
        Self::with_body("{}")
    }

    pub fn with_body(body: impl Into<String>) -> Self {
        Self { default_body: body.into(), ..Self::default() }
    }

    pub fn push_response(&self, response: Result<String>) {
        self.queued.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
    }

    pub fn push_body(&self, body: impl Into<String>) {
        self.push_response(Ok(body.into()));
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last_request(&self) -> Option<PreparedRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Transport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn execute(&self, request: &PreparedRequest) -> Result<String> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Ok(self.default_body.clone()))
    }
}
