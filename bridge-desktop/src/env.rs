//! Host Environment Implementation for Desktop Shells
//!
//! Plain desktop shells offer neither a credential-cache clear command
//! nor request-layer header overrides; both live inside browser engines.
//! Shells that embed an engine exposing one can declare it via
//! [`DesktopEnvironment::with_capabilities`].

use async_trait::async_trait;
use bridge_traits::{
    env::{AuthCacheCapabilities, HostEnvironment},
    error::{BridgeError, Result},
};

/// Desktop host environment
#[derive(Debug, Clone, Default)]
pub struct DesktopEnvironment {
    capabilities: AuthCacheCapabilities,
}

impl DesktopEnvironment {
    /// Environment with no cache-clearing capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment advertising host-verified capabilities
    pub fn with_capabilities(capabilities: AuthCacheCapabilities) -> Self {
        Self { capabilities }
    }
}

#[async_trait]
impl HostEnvironment for DesktopEnvironment {
    fn auth_cache_capabilities(&self) -> AuthCacheCapabilities {
        self.capabilities
    }

    async fn clear_auth_cache(&self) -> Result<()> {
        Err(BridgeError::NotAvailable(
            "Desktop shells have no credential-cache clear command".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_environment_has_no_capabilities() {
        let env = DesktopEnvironment::new();
        let caps = env.auth_cache_capabilities();

        assert!(!caps.clear_command);
        assert!(!caps.header_override);
        assert!(env.clear_auth_cache().await.is_err());
    }

    #[test]
    fn test_declared_capabilities_pass_through() {
        let env = DesktopEnvironment::with_capabilities(AuthCacheCapabilities {
            clear_command: false,
            header_override: true,
        });

        assert!(env.auth_cache_capabilities().header_override);
    }
}
