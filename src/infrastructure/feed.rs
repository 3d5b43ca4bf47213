//! Construction of the feed request handed to the host.
//!
//! The host performs the HTTP call and answers with a `WebRequestResult`
//! event carrying the context map it was given. The request id travels in
//! that context so a response can be matched to the fetch that issued it.

use crate::domain::error::{DashboardError, Result};
use std::collections::BTreeMap;

/// Default endpoint serving the update list.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/get-latest-updates";

/// Context key carrying the request id.
const REQUEST_ID_KEY: &str = "trustboard_request_id";

/// A feed read ready to hand to `web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub context: BTreeMap<String, String>,
}

impl FeedRequest {
    /// Builds the `GET` request for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if `endpoint` is not an `http` or
    /// `https` URL.
    pub fn new(endpoint: &str, request_id: u64) -> Result<Self> {
        let url = endpoint.trim();
        let has_host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(DashboardError::Config(format!(
                "endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let mut context = BTreeMap::new();
        context.insert(REQUEST_ID_KEY.to_string(), request_id.to_string());

        Ok(Self {
            url: url.to_string(),
            headers,
            context,
        })
    }
}

/// Recovers the request id from a `WebRequestResult` context.
#[must_use]
pub fn request_id_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    context.get(REQUEST_ID_KEY)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_survives_the_context() {
        let request = FeedRequest::new(DEFAULT_ENDPOINT, 42).unwrap();
        assert_eq!(request.url, DEFAULT_ENDPOINT);
        assert_eq!(request_id_from_context(&request.context), Some(42));
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
    }

    #[test]
    fn foreign_contexts_have_no_request_id() {
        assert_eq!(request_id_from_context(&BTreeMap::new()), None);

        let mut context = BTreeMap::new();
        context.insert(REQUEST_ID_KEY.to_string(), "soon".to_string());
        assert_eq!(request_id_from_context(&context), None);
    }

    #[test]
    fn non_http_endpoints_are_config_errors() {
        assert!(matches!(FeedRequest::new("ftp://feeds", 1), Err(DashboardError::Config(_))));
        assert!(matches!(FeedRequest::new("https://", 1), Err(DashboardError::Config(_))));
        assert!(FeedRequest::new(" https://ops.example/api/updates ", 1).is_ok());
    }
}
