//! In-memory transport for fetcher tests

use std::cell::RefCell;
use std::collections::HashMap;

use super::http::{HttpRequest, HttpResponse, Transport};
use crate::error::{NewsError, Result};

enum Route {
    Respond { status: u16, body: Vec<u8> },
    Fail(String),
}

/// Serves canned responses keyed by URL (query ignored); unknown URLs fail like a refused connection
#[derive(Default)]
pub struct FixtureTransport {
    routes: HashMap<String, Route>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn ok(self, url: &str, body: &str) -> Self {
        self.respond(url, 200, body)
    }

    pub fn fail(mut self, url: &str, reason: &str) -> Self {
        self.routes
            .insert(url.to_string(), Route::Fail(reason.to_string()));
        self
    }

    /// Requests sent so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FixtureTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        self.requests.borrow_mut().push(request.clone());
        match self.routes.get(&request.url) {
            Some(Route::Respond { status, body }) => Ok(HttpResponse {
                url: request.url.clone(),
                status: *status,
                body: body.clone(),
            }),
            Some(Route::Fail(reason)) => Err(NewsError::Fetch(reason.clone())),
            None => Err(NewsError::Fetch(format!(
                "connection refused: {}",
                request.url
            ))),
        }
    }
}
