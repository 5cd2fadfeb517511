use url::Url;

use crate::error::Error;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_CALLBACK_PATH: &str = "/auth/ott";
const DEFAULT_HOME_PATH: &str = "/";

/// Collection path used for the activity resource.
///
/// The backend has exposed both spellings; `Plural` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityPath {
    #[default]
    Plural,
    Singular,
}

impl ActivityPath {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plural => "activities",
            Self::Singular => "activity",
        }
    }
}

impl std::str::FromStr for ActivityPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('/') {
            "activities" => Ok(Self::Plural),
            "activity" => Ok(Self::Singular),
            other => Err(Error::Config(format!(
                "activity path must be 'activities' or 'activity', got '{other}'"
            ))),
        }
    }
}

/// Client configuration: backend API, identity provider and app routes.
///
/// Required fields are constructor parameters; everything else has a default.
///
/// ```rust,ignore
/// use travel_booking_client::ClientConfig;
///
/// let config = ClientConfig::new(
///     "https://booking.example.com".parse()?,
///     "https://sso.example.com".parse()?,
/// )
/// .with_api_base_url("https://api.example.com".parse()?);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    pub(crate) app_origin: Url,
    pub(crate) sso_url: Url,
    pub(crate) api_base_url: Url,
    pub(crate) callback_path: String,
    pub(crate) home_path: String,
    pub(crate) activity_path: ActivityPath,
}

impl ClientConfig {
    /// Create a configuration for an app served at `app_origin` that signs in
    /// through the identity provider at `sso_url`.
    #[must_use]
    pub fn new(app_origin: Url, sso_url: Url) -> Self {
        Self {
            app_origin,
            sso_url,
            api_base_url: DEFAULT_API_URL.parse().expect("valid default URL"),
            callback_path: DEFAULT_CALLBACK_PATH.into(),
            home_path: DEFAULT_HOME_PATH.into(),
            activity_path: ActivityPath::default(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `TRAVEL_APP_ORIGIN`: origin the app is served from
    /// - `TRAVEL_SSO_AUTH_URL`: identity provider base URL
    ///
    /// # Optional env vars
    /// - `TRAVEL_API_URL`: backend base URL (default `http://localhost:8080`)
    /// - `TRAVEL_CALLBACK_PATH`: ticket callback route (default `/auth/ott`)
    /// - `TRAVEL_HOME_PATH`: landing route after login (default `/`)
    /// - `TRAVEL_ACTIVITY_PATH`: `activities` or `activity`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let var = |name: &str| lookup(name).and_then(|v| normalize_value(&v));
        let url = |name: &str, value: String| -> Result<Url, Error> {
            value
                .parse()
                .map_err(|e| Error::Config(format!("{name}: {e}")))
        };

        let origin = var("TRAVEL_APP_ORIGIN")
            .ok_or_else(|| Error::Config("TRAVEL_APP_ORIGIN is required".into()))?;
        let sso = var("TRAVEL_SSO_AUTH_URL")
            .ok_or_else(|| Error::Config("TRAVEL_SSO_AUTH_URL is required".into()))?;

        let mut config = Self::new(
            url("TRAVEL_APP_ORIGIN", origin)?,
            url("TRAVEL_SSO_AUTH_URL", sso)?,
        );

        if let Some(api) = var("TRAVEL_API_URL") {
            config = config.with_api_base_url(url("TRAVEL_API_URL", api)?);
        }
        if let Some(path) = var("TRAVEL_CALLBACK_PATH") {
            config = config.with_callback_path(path);
        }
        if let Some(path) = var("TRAVEL_HOME_PATH") {
            config = config.with_home_path(path);
        }
        if let Some(path) = var("TRAVEL_ACTIVITY_PATH") {
            config = config.with_activity_path(path.parse()?);
        }

        Ok(config)
    }

    /// Override the backend API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = url;
        self
    }

    /// Override the route that receives the one-time ticket.
    #[must_use]
    pub fn with_callback_path(mut self, path: impl Into<String>) -> Self {
        self.callback_path = normalize_path(path.into());
        self
    }

    /// Override the landing route used when no destination was saved.
    #[must_use]
    pub fn with_home_path(mut self, path: impl Into<String>) -> Self {
        self.home_path = normalize_path(path.into());
        self
    }

    #[must_use]
    pub fn with_activity_path(mut self, path: ActivityPath) -> Self {
        self.activity_path = path;
        self
    }

    #[must_use]
    pub fn app_origin(&self) -> &Url {
        &self.app_origin
    }

    #[must_use]
    pub fn sso_url(&self) -> &Url {
        &self.sso_url
    }

    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    #[must_use]
    pub fn callback_path(&self) -> &str {
        &self.callback_path
    }

    #[must_use]
    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    #[must_use]
    pub fn activity_path(&self) -> ActivityPath {
        self.activity_path
    }

    /// Absolute URL of the ticket callback route, handed to the identity provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the origin and callback path do not form a URL.
    pub fn callback_url(&self) -> Result<Url, Error> {
        join_url(&self.app_origin, &self.callback_path)
    }
}

/// Appends `path` to `base`, keeping any path prefix the base already carries.
pub(crate) fn join_url(base: &Url, path: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    Ok(format!("{base}/{path}").parse()?)
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Leading slash, no trailing slash; blank means `/`.
fn normalize_path(path: String) -> String {
    format!("/{}", path.trim().trim_matches('/'))
}
