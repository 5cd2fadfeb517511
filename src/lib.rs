#![doc = include_str!("../README.md")]

pub mod api;
pub mod config;
pub mod error;
pub mod resources;
pub mod session;
pub mod types;

// Re-exports for convenient access
pub use api::ApiClient;
pub use config::{ActivityPath, ClientConfig};
pub use error::Error;
pub use session::{
    Decision, KeyValueStore, MemoryStore, RedirectAction, RouteGuard, RouteMeta, RouteTable,
    SessionPayload, SessionStorage, SsoGateway,
};
pub use types::{ActivityId, CouponId, CustomerId, OrderedQuantityId, PackageId, PlanId};
