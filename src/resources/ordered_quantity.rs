use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::api::{ApiClient, segment};
use crate::error::Error;
use crate::types::{OrderedQuantityId, PlanId};

/// New allocation size for an activity already attached to a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedQuantityUpdate {
    pub ordered_quota: u32,
}

/// `/ordered-activities` endpoints: activity allocations on a plan.
///
/// The backend's allocation payloads are not fixed, so bodies are passed
/// through as JSON.
pub struct OrderedQuantities<'a> {
    api: &'a ApiClient,
}

impl<'a> OrderedQuantities<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Attaches an activity allocation to `plan_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn attach<B: Serialize + ?Sized>(
        &self,
        plan_id: &PlanId,
        allocation: &B,
    ) -> Result<JsonValue, Error> {
        let path = format!("/ordered-activities/create/plan/{}", segment(plan_id.as_str()));
        self.api
            .send_json(
                Method::POST,
                &path,
                allocation,
                "add activity to plan",
                Some(plan_id.as_str()),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn resize(
        &self,
        id: &OrderedQuantityId,
        update: OrderedQuantityUpdate,
    ) -> Result<JsonValue, Error> {
        let path = format!("/ordered-activities/{}/edit", segment(id.as_str()));
        self.api
            .send_json(
                Method::PUT,
                &path,
                &update,
                "update ordered quantity",
                Some(id.as_str()),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn detach(&self, id: &OrderedQuantityId) -> Result<(), Error> {
        let path = format!("/ordered-activities/{}/delete", segment(id.as_str()));
        self.api
            .delete(&path, "remove activity", Some(id.as_str()))
            .await
    }
}
