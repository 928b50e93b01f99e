//! # Login Widget Module
//!
//! Core of the embeddable login widget: binds a host element to an
//! authentication server, keeps the element's visual state in sync with
//! the server's session answer, and runs the login, logout, and profile
//! flows.
//!
//! ## Features
//!
//! - **Server-truth reconciliation**: the user-info endpoint decides who
//!   is signed in; every ambiguous answer fails open to logged out
//! - **Popup and iframe login flows**: external flows are opaque, the
//!   widget only detects when they end and reconciles
//! - **Logout**: per-account logout endpoint or credential-cache
//!   displacement for HTTP auth sessions
//! - **Profile dialog**: shown immediately, populated asynchronously
//! - **Events**: session and flow events published on the shared bus

pub mod cache_clear;
pub mod detect;
pub mod error;
pub mod reconcile;
pub mod session;
pub mod types;
pub mod widget;

pub use cache_clear::{select_strategy, AuthCacheClearer, CacheClearStrategy};
pub use detect::{CompletionDetector, FlowCompletion};
pub use error::{LoginError, Result};
pub use reconcile::Reconciler;
pub use session::SessionStore;
pub use types::{AuthMethod, FlowId, UserInfo, WidgetState};
pub use widget::LoginWidget;
