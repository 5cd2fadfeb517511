use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, segment};
use crate::error::Error;
use crate::types::{CouponId, CustomerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Coupon {
    pub id: CouponId,
    pub name: String,
    pub description: String,
    pub points: u32,
    pub percent_off: f64,
    pub created_date: String,
    pub updated_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PurchasedCoupon {
    pub id: String,
    pub code: String,
    pub customer_id: CustomerId,
    pub coupon: Coupon,
    pub purchased_date: String,
    #[serde(default)]
    pub used_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyPoints {
    pub customer_id: CustomerId,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoupon {
    pub name: String,
    pub description: String,
    pub points: u32,
    pub percent_off: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCoupon {
    pub customer_id: CustomerId,
    pub coupon_id: CouponId,
}

/// `/loyalty` endpoints: coupon catalog, purchases and points.
pub struct Loyalty<'a> {
    api: &'a ApiClient,
}

impl<'a> Loyalty<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn available_coupons(&self) -> Result<Vec<Coupon>, Error> {
        self.api
            .get("/loyalty/coupons", "fetch available coupons", None)
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn purchased_coupons(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<PurchasedCoupon>, Error> {
        let path = format!("/loyalty/purchased-coupons/{}", segment(customer_id.as_str()));
        self.api
            .get(&path, "fetch purchased coupons", Some(customer_id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn points(&self, customer_id: &CustomerId) -> Result<LoyaltyPoints, Error> {
        let path = format!("/loyalty/points/{}", segment(customer_id.as_str()));
        self.api
            .get(&path, "fetch customer points", Some(customer_id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn create_coupon(&self, coupon: &CreateCoupon) -> Result<Coupon, Error> {
        self.api
            .send_json(
                Method::POST,
                "/loyalty/coupon",
                coupon,
                "create coupon",
                Some(coupon.name.as_str()),
            )
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn update_coupon(&self, id: &CouponId, coupon: &CreateCoupon) -> Result<Coupon, Error> {
        let path = format!("/loyalty/coupon/{}", segment(id.as_str()));
        self.api
            .send_json(Method::PUT, &path, coupon, "update coupon", Some(id.as_str()))
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn purchase(&self, purchase: &PurchaseCoupon) -> Result<PurchasedCoupon, Error> {
        self.api
            .send_json(
                Method::POST,
                "/loyalty/purchase",
                purchase,
                "purchase coupon",
                Some(purchase.coupon_id.as_str()),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::testing::api_client;

    fn coupon_json() -> serde_json::Value {
        json!({
            "id": "c1",
            "name": "Early bird",
            "description": "10% off",
            "points": 200,
            "percentOff": 10.0,
            "createdDate": "2025-01-01T00:00:00",
            "updatedDate": "2025-01-01T00:00:00"
        })
    }

    #[tokio::test]
    async fn purchase_returns_purchased_coupon() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/loyalty/purchase"))
            .and(body_json(json!({"customerId": "cust-1", "couponId": "c1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pc1",
                "code": "EARLY-XYZ",
                "customerId": "cust-1",
                "coupon": coupon_json(),
                "purchasedDate": "2025-02-01T10:00:00",
                "usedDate": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_client(&server);
        let purchased = api
            .loyalty()
            .purchase(&PurchaseCoupon {
                customer_id: CustomerId::from("cust-1"),
                coupon_id: CouponId::from("c1"),
            })
            .await
            .unwrap();

        assert_eq!(purchased.code, "EARLY-XYZ");
        assert_eq!(purchased.coupon.id, CouponId::from("c1"));
        assert!(purchased.used_date.is_none());
    }

    #[tokio::test]
    async fn catalog_points_and_update() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loyalty/coupons"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([coupon_json()])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/loyalty/points/cust-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"customerId": "cust-1", "points": 350})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/loyalty/coupon/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coupon_json()))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_client(&server);
        let loyalty = api.loyalty();

        let coupons = loyalty.available_coupons().await.unwrap();
        assert_eq!(coupons[0].points, 200);

        let points = loyalty.points(&CustomerId::from("cust-1")).await.unwrap();
        assert_eq!(points.points, 350);

        let updated = loyalty
            .update_coupon(
                &CouponId::from("c1"),
                &CreateCoupon {
                    name: "Early bird".into(),
                    description: "10% off".into(),
                    points: 200,
                    percent_off: 10.0,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Early bird");
    }

    #[tokio::test]
    async fn purchased_coupons_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/loyalty/purchased-coupons/cust-1"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = api_client(&server);
        let err = api
            .loyalty()
            .purchased_coupons(&CustomerId::from("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::FORBIDDEN));
    }
}
