//! # Core Configuration Module
//!
//! Provides configuration management for the Login Widget Core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds all necessary dependencies and settings for the core library.
//! It enforces fail-fast validation to ensure all required bridges are provided
//! before initialization.
//!
//! ## Required Dependencies
//!
//! - `ModalHost` - Required for login dialogs and user-facing notices
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//! - `WindowOpener` - Popup login windows (optional)
//! - `HostEnvironment` - Credential-cache probing (optional)
//!
//! When the `desktop-shims` feature is enabled, a desktop-ready default for
//! `HttpClient` is injected automatically if not provided.
//!
//! ## Usage
//!
//! ### Basic Configuration with Desktop Defaults
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .base_url("https://auth.example.com/")
//!     .modal_host(Arc::new(MyModalHost))
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### Configuration with Custom Bridges
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, EndpointLocations};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! // Note: Requires implementing HttpClient, ModalHost, WindowOpener
//! let config = CoreConfig::builder()
//!     .base_url("https://auth.example.com/")
//!     .locations(EndpointLocations::new().with_user_info("whoami.json"))
//!     .poll_interval(Duration::from_millis(500))
//!     .http_client(Arc::new(MyHttpClient))
//!     .modal_host(Arc::new(MyModalHost))
//!     .window_opener(Arc::new(MyWindowOpener))
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ## Error Handling
//!
//! The builder validates all required dependencies and provides actionable error
//! messages when capabilities are missing:
//!
//! ```should_panic
//! use core_runtime::config::CoreConfig;
//!
//! // This will panic with an actionable error message
//! let config = CoreConfig::builder()
//!     .base_url("https://auth.example.com/")
//!     .build()
//!     .expect("Should fail - missing required bridges");
//! ```

use crate::error::{Error, Result};
use bridge_traits::{HostEnvironment, HttpClient, ModalHost, WindowOpener};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Core configuration for the Login Widget Core.
///
/// This struct holds all dependencies and settings required to bind a login
/// widget. Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Absolute base URL that relative endpoint locations resolve against
    pub base_url: Url,

    /// Server endpoint locations (user info, profile page, cache-clear page)
    pub locations: EndpointLocations,

    /// Interval between closed-state probes of an external login window
    pub poll_interval: Duration,

    /// HTTP client for session and logout requests (optional with desktop default)
    pub http_client: Arc<dyn HttpClient>,

    /// Dialog surface of the embedding shell (required)
    pub modal_host: Arc<dyn ModalHost>,

    /// Opener for external login windows (optional, popup mode only)
    pub window_opener: Option<Arc<dyn WindowOpener>>,

    /// Host environment for credential-cache capabilities (optional)
    pub environment: Option<Arc<dyn HostEnvironment>>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("base_url", &self.base_url.as_str())
            .field("locations", &self.locations)
            .field("poll_interval", &self.poll_interval)
            .field("http_client", &"HttpClient { ... }")
            .field("modal_host", &"ModalHost { ... }")
            .field(
                "window_opener",
                &self.window_opener.as_ref().map(|_| "WindowOpener { ... }"),
            )
            .field(
                "environment",
                &self.environment.as_ref().map(|_| "HostEnvironment { ... }"),
            )
            .finish()
    }
}

/// Server endpoint locations used by the login widget.
///
/// Each location is resolved against [`CoreConfig::base_url`] with RFC 3986
/// semantics: a relative location keeps the base URL's path (a base of
/// `https://example.com/app/` resolves `user_info` to
/// `https://example.com/app/user_info`), while a location starting with `/`
/// replaces it.
///
/// # Example
///
/// ```
/// use core_runtime::config::EndpointLocations;
///
/// let locations = EndpointLocations::new()
///     .with_user_info("whoami.json")
///     .with_cache_clear_page("logout/force");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointLocations {
    /// Location of the user-info endpoint returning the session JSON document
    ///
    /// Default: `user_info`
    pub user_info: String,

    /// Location of the profile page shown in the profile dialog when the
    /// session document carries no profile URL of its own
    ///
    /// Default: `user_profile`
    pub user_profile: String,

    /// Location of the page used to displace cached HTTP credentials
    ///
    /// Default: `.force_logout`
    pub cache_clear_page: String,
}

impl Default for EndpointLocations {
    fn default() -> Self {
        Self {
            user_info: "user_info".to_string(),
            user_profile: "user_profile".to_string(),
            cache_clear_page: ".force_logout".to_string(),
        }
    }
}

impl EndpointLocations {
    /// Creates endpoint locations with the default relative paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user-info location
    pub fn with_user_info(mut self, location: impl Into<String>) -> Self {
        self.user_info = location.into();
        self
    }

    /// Sets the profile-page location
    pub fn with_user_profile(mut self, location: impl Into<String>) -> Self {
        self.user_profile = location.into();
        self
    }

    /// Sets the cache-clear page location
    pub fn with_cache_clear_page(mut self, location: impl Into<String>) -> Self {
        self.cache_clear_page = location.into();
        self
    }

    /// Validates the locations
    pub fn validate(&self) -> Result<()> {
        if self.user_info.is_empty() {
            return Err(Error::Config(
                "User-info location cannot be empty".to_string(),
            ));
        }

        if self.user_profile.is_empty() {
            return Err(Error::Config(
                "User-profile location cannot be empty".to_string(),
            ));
        }

        if self.cache_clear_page.is_empty() {
            return Err(Error::Config(
                "Cache-clear location cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder();
    /// ```
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Base URL uses the http or https scheme
    /// - Poll interval is reasonable (> 0 and <= 60 seconds)
    /// - Endpoint locations are not empty
    pub fn validate(&self) -> Result<()> {
        // Only http(s) bases can resolve relative endpoint locations
        match self.base_url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "Base URL must use the http or https scheme, got '{}'",
                    other
                )));
            }
        }

        if self.poll_interval.is_zero() {
            return Err(Error::Config(
                "Poll interval must be greater than 0ms".to_string(),
            ));
        }

        if self.poll_interval > Duration::from_secs(60) {
            return Err(Error::Config(
                "Poll interval exceeds maximum of 60 seconds (60,000ms)".to_string(),
            ));
        }

        self.locations.validate()?;

        Ok(())
    }

    /// Resolves the user-info endpoint against the base URL.
    pub fn user_info_url(&self) -> Result<Url> {
        self.resolve(&self.locations.user_info)
    }

    /// Resolves the profile-page endpoint against the base URL.
    pub fn user_profile_url(&self) -> Result<Url> {
        self.resolve(&self.locations.user_profile)
    }

    /// Resolves the cache-clear page against the base URL.
    pub fn cache_clear_url(&self) -> Result<Url> {
        self.resolve(&self.locations.cache_clear_page)
    }

    /// Resolves a location (relative or absolute) against the base URL.
    pub fn resolve(&self, location: &str) -> Result<Url> {
        self.base_url.join(location).map_err(|e| {
            Error::Endpoint(format!(
                "Failed to resolve '{}' against '{}': {}",
                location, self.base_url, e
            ))
        })
    }
}

fn modal_host_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "ModalHost".to_string(),
        message: "ModalHost implementation is required for login dialogs and blocking notices. \
                 Inject the embedding shell's dialog surface with .modal_host()."
            .to_string(),
    }
}

#[cfg(not(feature = "desktop-shims"))]
fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for session and logout requests. \
                 Desktop: ensure the 'desktop-shims' feature is enabled to use the default ReqwestHttpClient. \
                 Embedded: inject a client backed by the host shell's network stack."
            .to_string(),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(http_client_missing_error())
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
/// The builder validates required dependencies and provides helpful error
/// messages.
#[derive(Default)]
pub struct CoreConfigBuilder {
    base_url: Option<String>,
    locations: Option<EndpointLocations>,
    poll_interval: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
    modal_host: Option<Arc<dyn ModalHost>>,
    window_opener: Option<Arc<dyn WindowOpener>>,
    environment: Option<Arc<dyn HostEnvironment>>,
}

impl CoreConfigBuilder {
    /// Sets the base URL.
    ///
    /// The value is parsed during [`build()`](CoreConfigBuilder::build); all
    /// relative endpoint locations resolve against it. End the path with `/`
    /// to keep it as a prefix.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute http(s) URL of the authentication server
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::CoreConfig;
    ///
    /// let builder = CoreConfig::builder()
    ///     .base_url("https://auth.example.com/");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the server endpoint locations.
    ///
    /// Default: [`EndpointLocations::default()`]
    ///
    /// # Arguments
    ///
    /// * `locations` - Endpoint locations to resolve against the base URL
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::{CoreConfig, EndpointLocations};
    ///
    /// let builder = CoreConfig::builder()
    ///     .locations(EndpointLocations::new().with_user_info("whoami.json"));
    /// ```
    pub fn locations(mut self, locations: EndpointLocations) -> Self {
        self.locations = Some(locations);
        self
    }

    /// Sets the interval between closed-state probes of an external login window.
    ///
    /// Default: 1000ms
    ///
    /// # Arguments
    ///
    /// * `interval` - Probe interval
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::CoreConfig;
    /// use std::time::Duration;
    ///
    /// let builder = CoreConfig::builder()
    ///     .poll_interval(Duration::from_millis(500));
    /// ```
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the desktop default (reqwest-based) will be used when
    /// the `desktop-shims` feature is enabled.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client implementation
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_runtime::config::CoreConfig;
    /// use std::sync::Arc;
    ///
    /// let builder = CoreConfig::builder()
    ///     .http_client(Arc::new(MyHttpClient));
    /// ```
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the modal host implementation (required).
    ///
    /// The modal host presents login and profile dialogs, surfaces request
    /// failures, and shows blocking notices. It must be provided by the
    /// embedding shell; there is no platform default.
    ///
    /// # Arguments
    ///
    /// * `host` - Modal host implementation
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_runtime::config::CoreConfig;
    /// use std::sync::Arc;
    ///
    /// let builder = CoreConfig::builder()
    ///     .modal_host(Arc::new(MyModalHost));
    /// ```
    pub fn modal_host(mut self, host: Arc<dyn ModalHost>) -> Self {
        self.modal_host = Some(host);
        self
    }

    /// Sets the window opener implementation (optional).
    ///
    /// The window opener launches external login windows for widgets in popup
    /// mode. Without one, popup logins complete on the first closed-state
    /// probe, as if the window had been dismissed immediately.
    ///
    /// # Arguments
    ///
    /// * `opener` - Window opener implementation
    pub fn window_opener(mut self, opener: Arc<dyn WindowOpener>) -> Self {
        self.window_opener = Some(opener);
        self
    }

    /// Sets the host environment implementation (optional).
    ///
    /// The host environment advertises credential-cache capabilities used to
    /// pick a cache-clear strategy during logout.
    ///
    /// # Arguments
    ///
    /// * `environment` - Host environment implementation
    pub fn environment(mut self, environment: Arc<dyn HostEnvironment>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// This validates all required dependencies are provided and returns
    /// an error with an actionable message if anything is missing.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if:
    /// - The base URL is missing or does not parse
    /// - Required bridges are missing (ModalHost)
    /// - Configuration values are invalid
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use core_runtime::config::CoreConfig;
    /// let config = CoreConfig::builder()
    ///     .base_url("https://auth.example.com/")
    ///     .modal_host(Arc::new(MyModalHost))
    ///     .build()?;
    /// # Ok::<(), core_runtime::Error>(())
    /// ```
    pub fn build(self) -> Result<CoreConfig> {
        // Validate required fields
        let base_url = self.base_url.ok_or_else(|| {
            Error::Config("Base URL is required. Use .base_url() to set it.".to_string())
        })?;

        let base_url = Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        let modal_host = self.modal_host.ok_or_else(modal_host_missing_error)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        // Create config with defaults
        let config = CoreConfig {
            base_url,
            locations: self.locations.unwrap_or_default(),
            poll_interval: self.poll_interval.unwrap_or(Duration::from_millis(1000)), // Default 1 second
            http_client,
            modal_host,
            window_opener: self.window_opener,
            environment: self.environment,
        };

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }
}
