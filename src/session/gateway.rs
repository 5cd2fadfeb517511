use serde_json::Value as JsonValue;
use url::Url;

use super::routes::{path_of, pattern_matches};
use super::storage::{KeyValueStore, SessionStorage};
use super::types::{RedirectAction, SessionPayload};
use crate::config::{ClientConfig, join_url};
use crate::error::Error;

const AUTHORIZE_PATH: &str = "/api/auth/sso/authorize";
const EXCHANGE_PATH: &str = "/api/auth/sso/exchange";
const LOGOUT_PATH: &str = "/api/auth/logout";

/// Single sign-on gateway for the travel booking identity provider.
///
/// Login and logout are browser navigations: they return a
/// [`RedirectAction`] for the host to follow. The provider is the source of
/// truth for credentials; the token is only ever checked for presence.
#[derive(Debug, Clone)]
pub struct SsoGateway {
    config: ClientConfig,
    http: reqwest::Client,
}

impl SsoGateway {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Provider authorize URL carrying this app's callback route as `returnUrl`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the configured URLs cannot be combined.
    pub fn authorize_url(&self) -> Result<Url, Error> {
        let callback = self.config.callback_url()?;
        let mut url = join_url(&self.config.sso_url, AUTHORIZE_PATH)?;
        url.query_pairs_mut()
            .append_pair("returnUrl", callback.as_str());
        Ok(url)
    }

    /// Provider logout URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the identity provider URL is malformed.
    pub fn logout_url(&self) -> Result<Url, Error> {
        join_url(&self.config.sso_url, LOGOUT_PATH)
    }

    /// Saves where the user should land after login and returns the redirect
    /// to the identity provider.
    ///
    /// The saved destination is `return_path` when given and non-empty,
    /// otherwise `current_location` (path and query). It must be an in-app
    /// path and never the callback route itself; anything else falls back to
    /// the home route.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the destination cannot be saved, or
    /// [`Error::Url`] if the authorize URL cannot be built.
    pub fn initiate_login<D, S>(
        &self,
        storage: &SessionStorage<D, S>,
        current_location: &str,
        return_path: Option<&str>,
    ) -> Result<RedirectAction, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        let destination = return_path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| current_location.trim());
        let destination = self.landing_path(destination);

        storage.set_intended_path(destination)?;
        let url = self.authorize_url()?;

        tracing::debug!(intended_path = %destination, "Redirecting to SSO login");
        Ok(RedirectAction::new(url))
    }

    /// Exchanges a one-time ticket for a session payload.
    ///
    /// Issues exactly one request and persists nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a non-2xx response.
    pub async fn exchange_ticket(&self, ticket: &str) -> Result<SessionPayload, Error> {
        let mut url = join_url(&self.config.sso_url, EXCHANGE_PATH)?;
        url.query_pairs_mut().append_pair("ticket", ticket);

        let result: Result<SessionPayload, reqwest::Error> = async {
            let response = self.http.post(url).send().await?.error_for_status()?;
            response.json::<SessionPayload>().await
        }
        .await;

        result.map_err(|e| {
            tracing::warn!(
                status = e.status().map(|s| s.as_u16()),
                error = %e,
                "SSO ticket exchange failed"
            );
            Error::Http(e)
        })
    }

    /// Finishes a login on the callback route.
    ///
    /// Exchanges `ticket`, persists the token (and profile, when sent), and
    /// returns the in-app path to navigate to: the saved destination, or the
    /// home route if none was saved. On failure nothing is persisted and the
    /// saved destination is kept for the next attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTicket`] for an empty ticket, [`Error::Http`]
    /// if the exchange fails, or [`Error::Store`] if persisting fails.
    pub async fn complete_login<D, S>(
        &self,
        storage: &SessionStorage<D, S>,
        ticket: &str,
    ) -> Result<String, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        let ticket = ticket.trim();
        if ticket.is_empty() {
            return Err(Error::MissingTicket);
        }

        let payload = self.exchange_ticket(ticket).await?;

        storage.set_token(&payload.token)?;
        if let Some(user) = &payload.user {
            storage.set_user_profile(user)?;
        }

        let destination = storage
            .take_intended_path()?
            .unwrap_or_else(|| self.config.home_path.clone());

        tracing::info!(destination = %destination, "SSO login completed");
        Ok(destination)
    }

    /// Handles a request to the callback route, e.g. `/auth/ott?ticket=T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTicket`] if the location has no `ticket`
    /// parameter, otherwise as [`complete_login`](Self::complete_login).
    pub async fn handle_callback<D, S>(
        &self,
        storage: &SessionStorage<D, S>,
        callback_location: &str,
    ) -> Result<String, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        let url = self.config.app_origin.join(callback_location)?;
        let ticket = url
            .query_pairs()
            .find(|(key, _)| key == "ticket")
            .map(|(_, value)| value.into_owned())
            .ok_or(Error::MissingTicket)?;

        self.complete_login(storage, &ticket).await
    }

    /// Forgets the local session and returns the redirect to the provider's
    /// logout endpoint. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the durable store rejects the removal, or
    /// [`Error::Url`] if the logout URL cannot be built.
    pub fn terminate_session<D, S>(
        &self,
        storage: &SessionStorage<D, S>,
    ) -> Result<RedirectAction, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        storage.clear_credentials()?;
        let url = self.logout_url()?;

        tracing::info!("Local session cleared, redirecting to SSO logout");
        Ok(RedirectAction::new(url))
    }

    /// Whether a session token is present. Presence is all that is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the durable store cannot be read.
    pub fn is_authenticated<D, S>(&self, storage: &SessionStorage<D, S>) -> Result<bool, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        Ok(storage.token()?.is_some())
    }

    /// The session token, if one is stored. Presence is all that is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the durable store cannot be read.
    pub fn session_token<D, S>(
        &self,
        storage: &SessionStorage<D, S>,
    ) -> Result<Option<String>, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        storage.token()
    }

    /// The user profile cached at login, if the provider sent one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] on read failure, or [`Error::Serialization`]
    /// if the stored value is not JSON.
    pub fn user_profile<D, S>(
        &self,
        storage: &SessionStorage<D, S>,
    ) -> Result<Option<JsonValue>, Error>
    where
        D: KeyValueStore,
        S: KeyValueStore,
    {
        storage.user_profile()
    }

    /// Only in-app paths are kept; anything else lands on the home route.
    fn landing_path<'a>(&'a self, candidate: &'a str) -> &'a str {
        let in_app = candidate.starts_with('/')
            && !candidate.starts_with("//")
            && !candidate.starts_with("/\\");
        if !in_app || pattern_matches(&self.config.callback_path, path_of(candidate)) {
            self.config.home_path.as_str()
        } else {
            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::session::storage::{INTENDED_PATH_KEY, MemoryStore, TOKEN_KEY, USER_KEY};

    type Storage = SessionStorage<MemoryStore, MemoryStore>;

    fn storage() -> Storage {
        SessionStorage::new(MemoryStore::new(), MemoryStore::new())
    }

    fn gateway(sso_url: &str) -> SsoGateway {
        SsoGateway::new(ClientConfig::new(
            "https://app.example.com".parse().unwrap(),
            sso_url.parse().unwrap(),
        ))
    }

    #[test]
    fn authorize_url_encodes_callback() {
        let gateway = gateway("https://sso.example.com");
        let url = gateway.authorize_url().unwrap();

        assert_eq!(url.path(), "/api/auth/sso/authorize");
        assert_eq!(
            url.query(),
            Some("returnUrl=https%3A%2F%2Fapp.example.com%2Fauth%2Fott")
        );
    }

    #[test]
    fn initiate_login_saves_current_location() {
        let storage = storage();
        let action = gateway("https://sso.example.com")
            .initiate_login(&storage, "/packages?page=2", None)
            .unwrap();

        assert!(action.url.as_str().starts_with("https://sso.example.com/api/auth/sso/authorize?"));
        assert_eq!(
            storage.intended_path().unwrap().as_deref(),
            Some("/packages?page=2")
        );
    }

    #[test]
    fn initiate_login_prefers_explicit_return_path() {
        let storage = storage();
        let gateway = gateway("https://sso.example.com");

        gateway
            .initiate_login(&storage, "/packages", Some("/loyalty/coupons"))
            .unwrap();
        assert_eq!(
            storage.intended_path().unwrap().as_deref(),
            Some("/loyalty/coupons")
        );

        gateway.initiate_login(&storage, "/packages", Some("  ")).unwrap();
        assert_eq!(storage.intended_path().unwrap().as_deref(), Some("/packages"));
    }

    #[test]
    fn initiate_login_never_saves_empty_or_callback_path() {
        let storage = storage();
        let gateway = gateway("https://sso.example.com");

        gateway.initiate_login(&storage, "", None).unwrap();
        assert_eq!(storage.intended_path().unwrap().as_deref(), Some("/"));

        gateway
            .initiate_login(&storage, "/auth/ott?ticket=old", None)
            .unwrap();
        assert_eq!(storage.intended_path().unwrap().as_deref(), Some("/"));
    }

    #[test]
    fn initiate_login_matches_callback_by_route() {
        let storage = storage();
        let gateway = SsoGateway::new(
            ClientConfig::new(
                "https://app.example.com".parse().unwrap(),
                "https://sso.example.com".parse().unwrap(),
            )
            .with_callback_path("/auth/ott/"),
        );

        gateway
            .initiate_login(&storage, "/auth/ott?ticket=old", None)
            .unwrap();
        assert_eq!(storage.intended_path().unwrap().as_deref(), Some("/"));

        gateway
            .initiate_login(&storage, "/auth/ott/?ticket=old", None)
            .unwrap();
        assert_eq!(storage.intended_path().unwrap().as_deref(), Some("/"));
    }

    #[test]
    fn initiate_login_rejects_off_site_return_path() {
        let gateway = gateway("https://sso.example.com");
        for target in ["https://evil.example", "//evil.example/x", "/\\evil.example", "packages"] {
            let storage = storage();
            gateway.initiate_login(&storage, "/packages", Some(target)).unwrap();
            assert_eq!(
                storage.intended_path().unwrap().as_deref(),
                Some("/"),
                "{target} should not be saved"
            );
        }
    }

    #[tokio::test]
    async fn exchange_ticket_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sso/exchange"))
            .and(query_param("ticket", "T-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = gateway(&server.uri()).exchange_ticket("T-1").await.unwrap();
        assert_eq!(payload.token, "abc");
        assert!(payload.user.is_none());
    }

    #[tokio::test]
    async fn rejected_ticket_persists_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sso/exchange"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let storage = storage();
        storage.set_intended_path("/statistics").unwrap();

        let err = gateway(&server.uri())
            .complete_login(&storage, "bad")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
        assert_eq!(storage.token().unwrap(), None);
        assert_eq!(storage.durable().get(USER_KEY).unwrap(), None);
        assert_eq!(
            storage.scoped().get(INTENDED_PATH_KEY).unwrap().as_deref(),
            Some("/statistics")
        );
    }

    #[tokio::test]
    async fn complete_login_restores_destination_and_profile() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sso/exchange"))
            .and(query_param("ticket", "T"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "abc",
                "user": {"name": "Sari"}
            })))
            .mount(&server)
            .await;

        let storage = storage();
        storage.set_intended_path("/packages/pkg-1").unwrap();

        let landing = gateway(&server.uri())
            .handle_callback(&storage, "/auth/ott?ticket=T")
            .await
            .unwrap();

        assert_eq!(landing, "/packages/pkg-1");
        assert_eq!(storage.token().unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.user_profile().unwrap().unwrap()["name"], "Sari");
        assert_eq!(storage.intended_path().unwrap(), None);
    }

    #[tokio::test]
    async fn complete_login_falls_back_to_home() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/sso/exchange"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
            .mount(&server)
            .await;

        let storage = storage();
        let landing = gateway(&server.uri())
            .complete_login(&storage, "T")
            .await
            .unwrap();

        assert_eq!(landing, "/");
    }

    #[tokio::test]
    async fn callback_without_ticket_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let storage = storage();
        let gateway = gateway(&server.uri());

        let err = gateway.handle_callback(&storage, "/auth/ott").await.unwrap_err();
        assert!(matches!(err, Error::MissingTicket));

        let err = gateway
            .handle_callback(&storage, "/auth/ott?ticket=")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingTicket));
    }

    #[test]
    fn terminate_session_clears_credentials_idempotently() {
        let storage = storage();
        storage.durable().set(TOKEN_KEY, "abc").unwrap();
        storage.durable().set(USER_KEY, "{}").unwrap();
        let gateway = gateway("https://sso.example.com");

        let action = gateway.terminate_session(&storage).unwrap();
        assert_eq!(action.url.as_str(), "https://sso.example.com/api/auth/logout");
        assert_eq!(storage.durable().get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.durable().get(USER_KEY).unwrap(), None);

        let again = gateway.terminate_session(&storage).unwrap();
        assert_eq!(again, action);
        assert!(!gateway.is_authenticated(&storage).unwrap());
        assert_eq!(gateway.session_token(&storage).unwrap(), None);
        assert_eq!(gateway.user_profile(&storage).unwrap(), None);
    }
}
