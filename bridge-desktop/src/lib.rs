//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! This crate provides production-ready implementations of the bridge traits
//! a desktop shell can satisfy without an embedded browser engine:
//! - `HttpClient` using `reqwest`
//! - `WindowOpener` / `ExternalWindow` using spawned viewer processes
//! - `HostEnvironment` declaring the shell's credential-cache capabilities
//!
//! The widget surface traits (`WidgetElement`, `ModalHost`) stay with the
//! embedding shell; only it knows what its UI tree looks like.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{CommandWindowOpener, ReqwestHttpClient};
//! use bridge_traits::{HttpClient, WindowOpener};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http_client = ReqwestHttpClient::new();
//!     let opener = CommandWindowOpener::new("xdg-open");
//!
//!     // Use in core configuration
//! }
//! ```

mod env;
mod http;
mod window;

pub use env::DesktopEnvironment;
pub use http::ReqwestHttpClient;
pub use window::{CommandWindowOpener, ProcessWindow};
