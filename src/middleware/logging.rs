//! Request logging middleware
//!
//! This module tracks outgoing API calls: a request id per call, timing,
//! and the outcome at a level matching its severity.

use std::time::Instant;
use reqwest::{Method, StatusCode};
use tracing::{debug, info, warn, error};
use crate::utils::helpers::generate_request_id;

/// Logging middleware for API calls
#[derive(Debug, Clone)]
pub struct RequestLogger {
    log_requests: bool,
    log_performance: bool,
}

/// One in-flight request
#[derive(Debug)]
pub struct RequestSpan {
    pub request_id: String,
    method: Method,
    path: String,
    started: Instant,
}

impl RequestLogger {
    pub fn new(log_requests: bool, log_performance: bool) -> Self {
        Self {
            log_requests,
            log_performance,
        }
    }

    /// Log an outgoing request and start timing it
    pub fn start(&self, method: &Method, path: &str, authenticated: bool) -> RequestSpan {
        let span = RequestSpan {
            request_id: generate_request_id(),
            method: method.clone(),
            path: path.to_string(),
            started: Instant::now(),
        };

        if self.log_requests {
            debug!(
                request_id = %span.request_id,
                method = %span.method,
                path = %span.path,
                authenticated = authenticated,
                "API request"
            );
        }

        span
    }

    /// Log the response status
    pub fn finish(&self, span: &RequestSpan, status: StatusCode) {
        let elapsed_ms = span.started.elapsed().as_millis() as u64;

        if status.is_success() {
            if self.log_requests {
                debug!(request_id = %span.request_id, status = status.as_u16(), "API response");
            }
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(
                request_id = %span.request_id,
                method = %span.method,
                path = %span.path,
                "API responded 401"
            );
        } else if status.is_server_error() {
            error!(
                request_id = %span.request_id,
                method = %span.method,
                path = %span.path,
                status = status.as_u16(),
                "API server error"
            );
        } else {
            warn!(
                request_id = %span.request_id,
                method = %span.method,
                path = %span.path,
                status = status.as_u16(),
                "API request rejected"
            );
        }

        if self.log_performance {
            info!(request_id = %span.request_id, path = %span.path, elapsed_ms = elapsed_ms, "API timing");
        }
    }

    /// Log a transport failure (no response at all)
    pub fn failed(&self, span: &RequestSpan, err: &reqwest::Error) {
        error!(
            request_id = %span.request_id,
            method = %span.method,
            path = %span.path,
            error = %err,
            "API request failed"
        );
    }
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self::new(true, false)
    }
}
