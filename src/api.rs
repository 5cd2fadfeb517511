//! Shared HTTP client for the booking backend.
//!
//! Every resource wrapper goes through [`ApiClient`]: one request per call,
//! a diagnostic log line on failure, and the `reqwest` error handed back to
//! the caller as-is. No retries and no caching.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ActivityPath, ClientConfig, join_url};
use crate::error::Error;
use crate::resources::{Activities, Loyalty, OrderedQuantities, Packages, Plans, Statistics};

/// Configured HTTP client for the booking backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    activity_path: ActivityPath,
}

impl ApiClient {
    /// Build the client from configuration (base URL plus JSON content type).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the underlying client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url().clone(),
            activity_path: config.activity_path(),
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    ///
    /// The caller is responsible for its default headers.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn packages(&self) -> Packages<'_> {
        Packages::new(self)
    }

    pub fn plans(&self) -> Plans<'_> {
        Plans::new(self)
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities::new(self, self.activity_path)
    }

    pub fn ordered_quantities(&self) -> OrderedQuantities<'_> {
        OrderedQuantities::new(self)
    }

    pub fn loyalty(&self) -> Loyalty<'_> {
        Loyalty::new(self)
    }

    pub fn statistics(&self) -> Statistics<'_> {
        Statistics::new(self)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let url = join_url(&self.base_url, path)?;
        Ok(self.http.request(method, url))
    }

    /// Sends `request` and decodes a JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
        subject: Option<&str>,
    ) -> Result<T, Error> {
        let result: Result<T, reqwest::Error> = async {
            let response = request.send().await?.error_for_status()?;
            response.json::<T>().await
        }
        .await;

        result.map_err(|e| log_failure(e, operation, subject))
    }

    /// Sends `request` and discards whatever body comes back.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        operation: &'static str,
        subject: Option<&str>,
    ) -> Result<(), Error> {
        request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map(drop)
            .map_err(|e| log_failure(e, operation, subject))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        operation: &'static str,
        subject: Option<&str>,
    ) -> Result<T, Error> {
        let request = self.request(Method::GET, path)?;
        self.fetch(request, operation, subject).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        operation: &'static str,
        subject: Option<&str>,
    ) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path)?.json(body);
        self.fetch(request, operation, subject).await
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        operation: &'static str,
        subject: Option<&str>,
    ) -> Result<(), Error> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request, operation, subject).await
    }
}

/// Encodes an identifier for use as a single path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

fn log_failure(error: reqwest::Error, operation: &'static str, subject: Option<&str>) -> Error {
    tracing::error!(
        operation,
        id = subject,
        status = error.status().map(|s| s.as_u16()),
        error = %error,
        "Backend request failed"
    );
    Error::Http(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        let config = ClientConfig::new(
            "https://app.example.com".parse().unwrap(),
            "https://sso.example.com".parse().unwrap(),
        )
        .with_api_base_url("https://api.example.com/v2/".parse().unwrap());
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn request_url_keeps_base_path() {
        let request = client()
            .request(Method::GET, "/package/abc")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "https://api.example.com/v2/package/abc");
        assert_eq!(request.method(), &Method::GET);
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("plain-id"), "plain-id");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
