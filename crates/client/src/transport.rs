//! HTTP transport adapter.
//!
//! One blocking request per call. Failures never escape as errors: they are
//! returned in-band as a JSON body `{"error": "..."}` so callers always parse
//! the response as JSON.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde_json::Value;

/// HTTP verbs used by the catalog API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        })
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

/// Performs exactly one request and returns the body or an in-band error.
pub trait Transport {
    fn send(&self, method: HttpMethod, url: &str, payload: Option<&Value>) -> String;
}

/// Fill a URL template.
///
/// Path parameters replace `{name}` tokens and take precedence: when any are
/// given, query parameters are ignored. Otherwise query parameters are
/// appended as `?k=v&k2=v2` in the given order.
pub fn build_url(template: &str, path_params: &[(&str, &str)], query_params: &[(&str, &str)]) -> String {
    if !path_params.is_empty() {
        return path_params
            .iter()
            .fold(template.to_string(), |url, (key, value)| {
                url.replace(&format!("{{{key}}}"), value)
            });
    }
    if !query_params.is_empty() {
        let query = query_params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        return format!("{template}?{query}");
    }
    template.to_string()
}

/// In-band error body.
pub fn error_body(description: &str) -> String {
    serde_json::json!({ "error": description }).to_string()
}

/// Blocking reqwest transport against `base_url`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: HttpMethod, url: &str, payload: Option<&Value>) -> String {
        let full_url = format!("{}{url}", self.base_url);
        tracing::info!("Sending {method} to URL: {full_url}");

        // a fresh client without idle pooling: no connection outlives the call
        let client = match Client::builder().pool_max_idle_per_host(0).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Failed to build HTTP client: {e}");
                return error_body(&e.to_string());
            }
        };

        let mut request = client.request(method.into(), &full_url);
        if let Some(body) = payload {
            tracing::debug!("Payload: {body}");
            request = request.json(body);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{method} {full_url} failed: {e}");
                return error_body(&e.to_string());
            }
        };

        let status = response.status();
        tracing::info!("Response status: {status}");
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            tracing::warn!("Error response: {} {reason}", status.as_u16());
            return error_body(&format!("HTTP {}: {reason}", status.as_u16()));
        }

        match response.text() {
            Ok(body) => {
                tracing::debug!("Response body: {body}");
                body
            }
            Err(e) => {
                tracing::warn!("Failed to decode response body: {e}");
                error_body(&e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_path_params() {
        let url = build_url("/api/basic_object/{id}/children", &[("id", "e97")], &[]);
        assert_eq!(url, "/api/basic_object/e97/children");
    }

    #[test]
    fn test_build_url_query_params_in_order() {
        let url = build_url("/api/basic_object", &[], &[("name", "bracket"), ("limit", "5")]);
        assert_eq!(url, "/api/basic_object?name=bracket&limit=5");
    }

    #[test]
    fn test_build_url_path_params_take_precedence() {
        let url = build_url("/api/basic_object/{id}", &[("id", "7")], &[("name", "x")]);
        assert_eq!(url, "/api/basic_object/7");
    }

    #[test]
    fn test_build_url_plain() {
        assert_eq!(build_url("/api/basic_objects", &[], &[]), "/api/basic_objects");
    }

    #[test]
    fn test_error_body_is_json() {
        let body = error_body("HTTP 404: Not Found");
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["error"], "HTTP 404: Not Found");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        assert_eq!(HttpTransport::new("http://h:1/").base_url(), "http://h:1");
    }
}
