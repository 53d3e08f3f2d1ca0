//! Mock implementations for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::{ApiGateway, ApiRequest, ClientError};

/// Mock gateway that records every request and replays queued outcomes
///
/// Outcomes are consumed in FIFO order. With an empty queue the mock answers
/// `{}` so tests that only inspect the outbound request need no setup.
#[derive(Default)]
pub struct MockGateway {
    requests: Mutex<Vec<ApiRequest>>,
    outcomes: Mutex<VecDeque<Result<Value, ClientError>>>,
}

impl MockGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response
    pub fn push_response(&self, value: Value) {
        self.outcomes.lock().unwrap().push_back(Ok(value));
    }

    /// Queue a failure
    pub fn push_error(&self, error: ClientError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiGateway for MockGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }
}
