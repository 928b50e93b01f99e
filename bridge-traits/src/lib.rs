//! # Host Bridge Traits
//!
//! Platform abstraction traits that must be implemented by each embedding host.
//!
//! ## Overview
//!
//! This crate defines the contract between the login widget core and
//! host-specific implementations. Each trait represents a capability the core
//! requires but that must be implemented differently per host (browser shell,
//! desktop shell, test harness).
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP operations with credential injection and TLS
//!
//! ### Widget Surface
//! - [`WidgetElement`](surface::WidgetElement) - The element a widget binding decorates
//! - [`ModalHost`](surface::ModalHost) - Modal dialogs, error reporting, blocking notifications
//!
//! ### External Flows
//! - [`WindowOpener`](window::WindowOpener) - Open detached login windows
//! - [`ExternalWindow`](window::ExternalWindow) - Probe a detached window for closure
//!
//! ### Environment
//! - [`HostEnvironment`](env::HostEnvironment) - Credential-cache capabilities of the host
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! ## Host Requirements
//!
//! Each supported host must ship concrete adapters for every required bridge trait:
//!
//! | Host     | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ In Progress |
//! | Browser shell | TBD            | 📋 Planned |
//!
//! ## Fail-Fast Strategy
//!
//! The core should fail fast with descriptive errors when a required capability is missing:
//!
//! ```ignore
//! use core_runtime::error::Error;
//!
//! pub fn build(self) -> Result<CoreConfig> {
//!     let modal_host = self.modal_host
//!         .ok_or_else(|| Error::CapabilityMissing {
//!             capability: "ModalHost".to_string(),
//!             message: "No modal layer provided. \
//!                      Inject the host shell's dialog implementation.".to_string()
//!         })?;
//!     // ...
//! }
//! ```
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for consistent
//! error handling. Host implementations should:
//!
//! - Convert host-specific errors to `BridgeError`
//! - Provide actionable error messages
//! - Include error context (e.g., endpoint URLs, window state)
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent usage
//! across async tasks. Implementations must ensure thread safety.
//!
//! ## Examples
//!
//! ### Implementing HttpClient
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         // Implementation
//!         todo!()
//!     }
//! }
//! ```

pub mod env;
pub mod error;
pub mod http;
pub mod surface;
pub mod time;
pub mod window;

pub use error::{BridgeError, Result};

// Re-export commonly used types
pub use env::{AuthCacheCapabilities, HostEnvironment};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use surface::{
    AjaxFailure, IdentityBadge, MenuAction, ModalHost, ModalSession, ModalSpec, PresentationMode,
    VisualState, WidgetElement,
};
pub use time::{Clock, SystemClock};
pub use window::{ExternalWindow, WindowFeatures, WindowOpener};
