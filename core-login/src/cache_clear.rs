//! Credential-cache displacement strategies.
//!
//! HTTP auth has no logout. Once the host's request layer has cached a
//! Basic or Digest credential it resends it on every request, so "logging
//! out" means making the cache forget. No portable way to do that exists;
//! this module picks the best trick the environment supports:
//!
//! 1. `ClearCommand`: the environment exposes a direct clear command
//! 2. `BasicOverwrite`: overwrite the cached Basic credential by sending
//!    a request with a bogus `Authorization` header
//! 3. `AbortProbe`: request a protected page with bogus credentials and
//!    abort it mid-flight, leaving the bogus pair in the cache
//!
//! Every strategy is best-effort. Failures are logged at debug level and
//! swallowed; the caller reconciles against the server afterwards and the
//! session state comes from that, not from the clearing attempt.

use bridge_traits::{
    AuthCacheCapabilities, HostEnvironment, HttpClient, HttpMethod, HttpRequest,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::types::AuthMethod;

/// Bogus header value used to overwrite a cached Basic credential
const OVERWRITE_AUTH_HEADER: &str = "Basic logout";

/// Username for the abort-probe credential pair
const PROBE_USER: &str = "logout";

/// Password for the abort-probe credential pair
const PROBE_PASSWORD: &str = "logout";

/// How long the abort probe is allowed to run before it is cut off
///
/// The abort is the mechanism, not an error: cutting the request off
/// mid-flight leaves the bogus credentials in the cache without waiting
/// for the server to finish rejecting them.
pub const DEFAULT_PROBE_ABORT: Duration = Duration::from_millis(50);

/// Strategy used to displace a cached credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClearStrategy {
    /// Direct clear command exposed by the environment
    ClearCommand,
    /// Overwrite the cached Basic credential via a header override
    BasicOverwrite,
    /// Bogus-credential request aborted mid-flight
    AbortProbe,
}

/// Picks the strongest strategy the environment supports for `method`.
///
/// A header override can only displace a Basic credential; Digest
/// challenges are computed per request, so overwriting the header does
/// nothing and the probe is used instead.
pub fn select_strategy(
    capabilities: AuthCacheCapabilities,
    method: AuthMethod,
) -> CacheClearStrategy {
    if capabilities.clear_command {
        CacheClearStrategy::ClearCommand
    } else if capabilities.header_override && method == AuthMethod::Basic {
        CacheClearStrategy::BasicOverwrite
    } else {
        CacheClearStrategy::AbortProbe
    }
}

/// Best-effort invalidation of cached HTTP auth credentials.
pub struct AuthCacheClearer {
    http: Arc<dyn HttpClient>,
    environment: Option<Arc<dyn HostEnvironment>>,
    probe_abort_after: Duration,
}

impl AuthCacheClearer {
    pub fn new(http: Arc<dyn HttpClient>, environment: Option<Arc<dyn HostEnvironment>>) -> Self {
        Self {
            http,
            environment,
            probe_abort_after: DEFAULT_PROBE_ABORT,
        }
    }

    /// Sets how long the abort probe may run before it is cut off.
    pub fn with_probe_abort_after(mut self, deadline: Duration) -> Self {
        self.probe_abort_after = deadline;
        self
    }

    /// Attempts to displace the cached credential for `method`.
    ///
    /// `endpoint` is the protected page the overwrite and probe
    /// strategies request. Never fails: the outcome is advisory and the
    /// caller verifies the real session state against the server.
    pub async fn clear(&self, endpoint: &str, method: AuthMethod) {
        let capabilities = self
            .environment
            .as_ref()
            .map(|env| env.auth_cache_capabilities())
            .unwrap_or_else(AuthCacheCapabilities::none);
        let strategy = select_strategy(capabilities, method);
        debug!(strategy = ?strategy, method = %method, "Clearing cached credentials");

        match strategy {
            CacheClearStrategy::ClearCommand => {
                // The capability came from an environment, so one is present
                if let Some(environment) = &self.environment {
                    if let Err(e) = environment.clear_auth_cache().await {
                        debug!("Environment clear command failed: {}", e);
                    }
                }
            }
            CacheClearStrategy::BasicOverwrite => {
                let request = HttpRequest::new(HttpMethod::Get, endpoint)
                    .header("Authorization", OVERWRITE_AUTH_HEADER);
                if let Err(e) = self.http.execute(request).await {
                    debug!("Credential overwrite request failed: {}", e);
                }
            }
            CacheClearStrategy::AbortProbe => {
                let request = HttpRequest::new(HttpMethod::Get, endpoint)
                    .basic_auth(PROBE_USER, PROBE_PASSWORD);
                match tokio::time::timeout(self.probe_abort_after, self.http.execute(request)).await
                {
                    Ok(Ok(response)) => {
                        debug!(status = response.status, "Cache-clear probe finished")
                    }
                    Ok(Err(e)) => debug!("Cache-clear probe failed: {}", e),
                    Err(_) => debug!(
                        "Cache-clear probe aborted after {:?}",
                        self.probe_abort_after
                    ),
                }
            }
        }
    }
}
