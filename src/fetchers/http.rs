use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::Http;
use crate::error::{NewsError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    /// POST with an `application/x-www-form-urlencoded` body
    PostForm(Vec<(String, String)>),
}

/// An outbound request, independent of the HTTP client in use
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub basic_auth: Option<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            basic_auth: None,
        }
    }

    pub fn post_form(url: impl Into<String>, form: &[(&str, &str)]) -> Self {
        let form = form
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            method: Method::PostForm(form),
            ..Self::get(url)
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    pub fn basic_auth(mut self, user: &str, password: &str) -> Self {
        self.basic_auth = Some((user.to_string(), password.to_string()));
        self
    }
}

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: String,
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail on any non-2xx status
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NewsError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Sends requests on behalf of the fetchers
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Blocking reqwest client with a bounded per-request timeout
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(settings: &Http) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = match &request.method {
            Method::Get => self.client.get(&request.url),
            Method::PostForm(form) => self.client.post(&request.url).form(form),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some((user, password)) = &request.basic_auth {
            builder = builder.basic_auth(user, Some(password));
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();
        debug!(url = %request.url, status, bytes = body.len(), "http response");

        Ok(HttpResponse {
            url: request.url.clone(),
            status,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::get("https://api.example.com/items")
            .query("limit", 5)
            .bearer("tok")
            .header("Accept", "application/json");

        assert_eq!(request.method, Method::Get);
        assert_eq!(request.query, vec![("limit".to_string(), "5".to_string())]);
        assert_eq!(request.headers[0].1, "Bearer tok");
        assert_eq!(request.headers.len(), 2);
    }

    #[test]
    fn test_post_form() {
        let request = HttpRequest::post_form(
            "https://auth.example.com/token",
            &[("grant_type", "client_credentials")],
        )
        .basic_auth("id", "secret");

        assert_eq!(
            request.method,
            Method::PostForm(vec![(
                "grant_type".to_string(),
                "client_credentials".to_string()
            )])
        );
        assert_eq!(
            request.basic_auth,
            Some(("id".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_error_for_status() {
        let ok = HttpResponse {
            url: "u".to_string(),
            status: 204,
            body: vec![],
        };
        assert!(ok.error_for_status().is_ok());

        let limited = HttpResponse {
            url: "https://api.example.com".to_string(),
            status: 429,
            body: b"slow down".to_vec(),
        };
        let err = limited.error_for_status().unwrap_err();
        assert!(matches!(err, NewsError::Status { status: 429, .. }));
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(&Http::default()).is_ok());
    }
}
