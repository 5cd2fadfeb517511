use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, segment};
use crate::config::ActivityPath;
use crate::error::Error;
use crate::types::{ActivityId, PlanId};

/// Locations offered by the activity editor.
pub const LOCATION_OPTIONS: [&str; 4] = [
    "DKI Jakarta (Provinsi)",
    "Bali (Provinsi)",
    "Jawa Barat (Provinsi)",
    "Yogyakarta (Provinsi)",
];

/// Activity type labels as the backend spells them.
pub const ACTIVITY_TYPES: [&str; 3] = ["Flight", "Accommodation", "Vehicle Rental"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Activity {
    pub id: ActivityId,
    pub activity_name: String,
    pub activity_type: String,
    pub price: f64,
    pub capacity: u32,
    pub start_date: String,
    pub end_date: String,
    pub start_location: String,
    pub end_location: String,
    pub activity_item: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivity {
    pub activity_name: String,
    pub activity_type: String,
    pub price: f64,
    pub capacity: u32,
    pub start_date: String,
    pub end_date: String,
    pub start_location: String,
    pub end_location: String,
    pub activity_item: String,
}

/// Client-side filter over an activity listing.
///
/// Unset criteria match everything. Dates compare as ISO-8601 strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilter {
    pub show_deleted: bool,
    pub activity_type: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub search_query: String,
}

impl ActivityFilter {
    #[must_use]
    pub fn matches(&self, activity: &Activity) -> bool {
        if activity.is_deleted && !self.show_deleted {
            return false;
        }
        if !field_matches(self.activity_type.as_deref(), &activity.activity_type)
            || !field_matches(self.start_location.as_deref(), &activity.start_location)
            || !field_matches(self.end_location.as_deref(), &activity.end_location)
        {
            return false;
        }
        if let Some(from) = self.start_date.as_deref() {
            if activity.start_date.as_str() < from {
                return false;
            }
        }
        if let Some(until) = self.end_date.as_deref() {
            if activity.end_date.as_str() > until {
                return false;
            }
        }

        let query = self.search_query.trim().to_lowercase();
        query.is_empty()
            || activity.activity_name.to_lowercase().contains(&query)
            || activity.activity_item.to_lowercase().contains(&query)
    }

    /// Keeps the activities this filter matches, preserving order.
    pub fn apply<'a, I>(&self, activities: I) -> Vec<&'a Activity>
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        activities.into_iter().filter(|a| self.matches(a)).collect()
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|w| w.is_empty() || w == actual)
}

/// Activity catalog endpoints, under the configured collection path.
pub struct Activities<'a> {
    api: &'a ApiClient,
    collection: ActivityPath,
}

impl<'a> Activities<'a> {
    pub(crate) fn new(api: &'a ApiClient, collection: ActivityPath) -> Self {
        Self { api, collection }
    }

    fn path(&self, suffix: &str) -> String {
        format!("/{}{suffix}", self.collection.as_str())
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn list(&self) -> Result<Vec<Activity>, Error> {
        self.api.get(&self.path(""), "fetch activities", None).await
    }

    /// Activities the backend considers eligible for `plan_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn for_plan(&self, plan_id: &PlanId) -> Result<Vec<Activity>, Error> {
        let request = self
            .api
            .request(Method::GET, &self.path(""))?
            .query(&[("planId", plan_id.as_str())]);
        self.api
            .fetch(request, "fetch filtered activities for plan", Some(plan_id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn get(&self, id: &ActivityId) -> Result<Activity, Error> {
        let path = self.path(&format!("/{}", segment(id.as_str())));
        self.api.get(&path, "fetch activity", Some(id.as_str())).await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn create(&self, activity: &CreateActivity) -> Result<Activity, Error> {
        self.api
            .send_json(
                Method::POST,
                &self.path("/create"),
                activity,
                "create activity",
                Some(activity.activity_name.as_str()),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn update(&self, id: &ActivityId, activity: &CreateActivity) -> Result<Activity, Error> {
        let path = self.path(&format!("/{}/update", segment(id.as_str())));
        self.api
            .send_json(Method::PUT, &path, activity, "update activity", Some(id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn delete(&self, id: &ActivityId) -> Result<(), Error> {
        let path = self.path(&format!("/{}/delete", segment(id.as_str())));
        self.api
            .delete(&path, "delete activity", Some(id.as_str()))
            .await
    }
}
