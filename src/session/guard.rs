use super::gateway::SsoGateway;
use super::routes::{RouteMeta, RouteTable};
use super::storage::{KeyValueStore, SessionStorage};
use super::types::Decision;
use crate::error::Error;

/// Navigation check run before every in-app route change.
///
/// Protected routes need a session token in durable storage. Without one the
/// navigation is cancelled, the target becomes the intended destination, and
/// the host is told to redirect to the identity provider. The guard itself
/// never touches the network.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    routes: RouteTable,
    gateway: SsoGateway,
}

impl RouteGuard {
    #[must_use]
    pub fn new(routes: RouteTable, gateway: SsoGateway) -> Self {
        Self { routes, gateway }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    #[must_use]
    pub fn gateway(&self) -> &SsoGateway {
        &self.gateway
    }

    /// Decides a navigation to `target` (path and query).
    ///
    /// Paths missing from the route table are treated as protected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if session storage cannot be read or written.
    pub fn authorize<D, S>(
        &self,
        target: &str,
        storage: &SessionStorage<D, S>,
    ) -> Result<Decision, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        match self.routes.resolve(target) {
            Some(route) => self.authorize_route(route, target, storage),
            None => self.require_session(target, storage),
        }
    }

    /// Decides a navigation to `target`, already matched to `route`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if session storage cannot be read or written.
    pub fn authorize_route<D, S>(
        &self,
        route: &RouteMeta,
        target: &str,
        storage: &SessionStorage<D, S>,
    ) -> Result<Decision, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        if !route.requires_auth {
            return Ok(Decision::Allow);
        }
        self.require_session(target, storage)
    }

    fn require_session<D, S>(
        &self,
        target: &str,
        storage: &SessionStorage<D, S>,
    ) -> Result<Decision, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        if storage.token()?.is_some() {
            return Ok(Decision::Allow);
        }

        tracing::info!(target_path = %target, "Navigation blocked: no session");
        let action = self.gateway.initiate_login(storage, target, None)?;
        Ok(Decision::Redirect(action))
    }
}
