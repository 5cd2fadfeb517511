//! Typed wrappers over the booking backend's REST resources.
//!
//! Each wrapper borrows the shared [`ApiClient`](crate::ApiClient) and maps
//! one method to one endpoint. Failures are logged with the operation name and
//! returned unchanged.

mod activity;
mod loyalty;
mod ordered_quantity;
mod package;
mod plan;
mod statistics;

pub use activity::{
    ACTIVITY_TYPES, Activities, Activity, ActivityFilter, CreateActivity, LOCATION_OPTIONS,
};
pub use loyalty::{
    Coupon, CreateCoupon, Loyalty, LoyaltyPoints, PurchaseCoupon, PurchasedCoupon,
};
pub use ordered_quantity::{OrderedQuantities, OrderedQuantityUpdate};
pub use package::{CreatePackage, Package, PackageStatus, Packages, UpdatePackage};
pub use plan::{CreatePlan, Plan, PlanActivityType, PlanStatus, Plans, UpdatePlan};
pub use statistics::Statistics;
