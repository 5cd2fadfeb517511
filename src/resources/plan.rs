use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, segment};
use crate::error::Error;
use crate::types::{PackageId, PlanId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanActivityType {
    Accommodation,
    VehicleRental,
    Flight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Unfulfilled,
    Fulfilled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Plan {
    pub id: PlanId,
    pub plan_name: String,
    pub activity_type: PlanActivityType,
    pub price: f64,
    pub status: PlanStatus,
    pub start_date: String,
    pub end_date: String,
    pub start_location: String,
    pub end_location: String,
    pub package_id: PackageId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlan {
    pub plan_name: String,
    pub activity_type: PlanActivityType,
    pub start_date: String,
    pub end_date: String,
    pub start_location: String,
    pub end_location: String,
}

/// Plan edit payload; the activity type is fixed once a plan exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    pub plan_name: String,
    pub start_date: String,
    pub end_date: String,
    pub start_location: String,
    pub end_location: String,
}

/// `/plans` endpoints.
pub struct Plans<'a> {
    api: &'a ApiClient,
}

impl<'a> Plans<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn get(&self, id: &PlanId) -> Result<Plan, Error> {
        let path = format!("/plans/{}", segment(id.as_str()));
        self.api.get(&path, "fetch plan", Some(id.as_str())).await
    }

    /// Creates a plan under `package_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn create(&self, package_id: &PackageId, plan: &CreatePlan) -> Result<Plan, Error> {
        let path = format!("/packages/{}/plans/create", segment(package_id.as_str()));
        self.api
            .send_json(
                Method::POST,
                &path,
                plan,
                "create plan for package",
                Some(package_id.as_str()),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn update(&self, id: &PlanId, plan: &UpdatePlan) -> Result<Plan, Error> {
        let path = format!("/plans/{}/edit", segment(id.as_str()));
        self.api
            .send_json(Method::PUT, &path, plan, "update plan", Some(id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn delete(&self, id: &PlanId) -> Result<(), Error> {
        let path = format!("/plans/{}/delete", segment(id.as_str()));
        self.api.delete(&path, "delete plan", Some(id.as_str())).await
    }
}
