use reqwest::Method;
use serde_json::Value as JsonValue;

use crate::api::ApiClient;
use crate::error::Error;

/// `/statistics` revenue endpoint.
pub struct Statistics<'a> {
    api: &'a ApiClient,
}

impl<'a> Statistics<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Revenue statistics, optionally narrowed to a year and month.
    ///
    /// Unset filters are left out of the query string entirely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn revenue(&self, year: Option<u16>, month: Option<u8>) -> Result<JsonValue, Error> {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(2);
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        if let Some(month) = month {
            params.push(("month", month.to_string()));
        }

        let mut request = self.api.request(Method::GET, "/statistics")?;
        if !params.is_empty() {
            request = request.query(&params);
        }
        self.api.fetch(request, "fetch statistics", None).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::testing::api_client;

    #[tokio::test]
    async fn filters_become_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/statistics"))
            .and(query_param("year", "2025"))
            .and(query_param("month", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 42})))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_client(&server);
        let stats = api.statistics().revenue(Some(2025), Some(3)).await.unwrap();
        assert_eq!(stats["total"], 42);
    }

    #[tokio::test]
    async fn unset_filters_send_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/statistics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_client(&server);
        api.statistics().revenue(None, None).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
    }
}
