//! Host Environment Capabilities
//!
//! Credential-cache invalidation is deeply environment specific: some
//! hosts expose a direct clear command, some let the request layer
//! override the `Authorization` header, most offer nothing at all. The
//! widget probes these capabilities and picks the best available
//! strategy.

use async_trait::async_trait;

use crate::error::Result;

/// Capabilities the environment offers for invalidating cached credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthCacheCapabilities {
    /// Environment exposes a direct "clear auth cache" command
    pub clear_command: bool,
    /// Request layer honors a caller-supplied `Authorization` header
    /// override for cached Basic credentials
    pub header_override: bool,
}

impl AuthCacheCapabilities {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Environment the widget is embedded in
#[async_trait]
pub trait HostEnvironment: Send + Sync {
    /// Capabilities available for credential-cache invalidation
    fn auth_cache_capabilities(&self) -> AuthCacheCapabilities;

    /// Invoke the environment's direct clear command
    ///
    /// # Errors
    ///
    /// Returns `NotAvailable` when the environment has no such command;
    /// callers should have checked [`auth_cache_capabilities`] first.
    ///
    /// [`auth_cache_capabilities`]: HostEnvironment::auth_cache_capabilities
    async fn clear_auth_cache(&self) -> Result<()>;
}
