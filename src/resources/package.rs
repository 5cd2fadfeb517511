use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, segment};
use crate::error::Error;
use crate::types::PackageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageStatus {
    Pending,
    Processed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Package {
    pub id: PackageId,
    pub package_name: String,
    pub user_id: String,
    pub quota: u32,
    pub price: f64,
    pub status: PackageStatus,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackage {
    pub package_name: String,
    pub user_id: String,
    pub quota: u32,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackage {
    pub package_name: String,
    pub quota: u32,
    pub start_date: String,
    pub end_date: String,
}

/// `/package` endpoints.
pub struct Packages<'a> {
    api: &'a ApiClient,
}

impl<'a> Packages<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn list(&self) -> Result<Vec<Package>, Error> {
        self.api.get("/package", "fetch packages", None).await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn get(&self, id: &PackageId) -> Result<Package, Error> {
        let path = format!("/package/{}", segment(id.as_str()));
        self.api.get(&path, "fetch package", Some(id.as_str())).await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn create(&self, package: &CreatePackage) -> Result<Package, Error> {
        self.api
            .send_json(
                Method::POST,
                "/package/create",
                package,
                "create package",
                Some(package.package_name.as_str()),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn update(&self, id: &PackageId, package: &UpdatePackage) -> Result<Package, Error> {
        let path = format!("/package/{}/edit", segment(id.as_str()));
        self.api
            .send_json(Method::PUT, &path, package, "update package", Some(id.as_str()))
            .await
    }

    /// Marks a pending package as processed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn process(&self, id: &PackageId) -> Result<Package, Error> {
        let path = format!("/package/{}/process", segment(id.as_str()));
        let request = self.api.request(Method::PUT, &path)?;
        self.api
            .fetch(request, "process package", Some(id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn delete(&self, id: &PackageId) -> Result<(), Error> {
        let path = format!("/package/{}/delete", segment(id.as_str()));
        self.api
            .delete(&path, "delete package", Some(id.as_str()))
            .await
    }
}
