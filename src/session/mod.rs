//! Single sign-on session handling for the booking app.
//!
//! The flow, end to end:
//!
//! 1. [`RouteGuard::authorize`] runs before each navigation. Protected routes
//!    without a session token yield [`Decision::Redirect`] and the target is
//!    saved as the intended destination.
//! 2. The host follows the [`RedirectAction`] to the identity provider.
//! 3. The provider redirects back to the callback route with `?ticket=...`.
//! 4. [`SsoGateway::handle_callback`] exchanges the ticket, stores the token
//!    and returns the saved destination (or the home route).
//! 5. [`SsoGateway::terminate_session`] clears the token and profile and
//!    redirects to the provider's logout endpoint.
//!
//! ```rust,ignore
//! use travel_booking_client::session::{
//!     Decision, MemoryStore, RouteGuard, RouteTable, SessionStorage, SsoGateway,
//! };
//!
//! let config = ClientConfig::from_env()?;
//! let routes = RouteTable::standard(config.callback_path())?;
//! let guard = RouteGuard::new(routes, SsoGateway::new(config));
//! let storage = SessionStorage::new(MemoryStore::new(), MemoryStore::new());
//!
//! match guard.authorize("/packages", &storage)? {
//!     Decision::Allow => render("/packages"),
//!     Decision::Redirect(action) => navigate_away(action.url),
//! }
//! ```

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
mod browser;
mod gateway;
mod guard;
mod routes;
mod storage;
mod types;

#[cfg(all(feature = "browser", target_arch = "wasm32"))]
pub use browser::BrowserStore;
pub use gateway::SsoGateway;
pub use guard::RouteGuard;
pub use routes::{RouteMeta, RouteTable};
pub use storage::{
    INTENDED_PATH_KEY, KeyValueStore, MemoryStore, SessionStorage, StoreError, TOKEN_KEY,
    USER_KEY,
};
pub use types::{Decision, RedirectAction, SessionPayload};
