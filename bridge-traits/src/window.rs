//! External Window Abstraction
//!
//! Detached login flows run in a window the host opens on the widget's
//! behalf. The core never sees inside that window; it only needs to open
//! one and find out when it is gone.

use async_trait::async_trait;

use crate::error::Result;

/// Presentation hints for a detached window.
///
/// Mirrors the feature string browsers accept (`location=true,status=true,...`).
/// Hosts that cannot honor a hint are free to ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFeatures {
    /// Show the location bar so users can verify the login origin
    pub location_bar: bool,
    /// Show the status bar
    pub status_bar: bool,
    /// Requested height in pixels
    pub height: u32,
    /// Requested width in pixels
    pub width: u32,
}

impl Default for WindowFeatures {
    fn default() -> Self {
        Self {
            location_bar: true,
            status_bar: true,
            height: 400,
            width: 800,
        }
    }
}

impl WindowFeatures {
    /// Render the browser-style feature string
    pub fn to_feature_string(&self) -> String {
        format!(
            "location={},status={},height={},width={}",
            self.location_bar, self.status_bar, self.height, self.width
        )
    }
}

/// Opens detached windows on behalf of the core
///
/// # Errors
///
/// `open` returns an error when the environment refuses to create the
/// window (popup blockers, kiosk policies). Callers treat a refused
/// window the same as one that was closed immediately.
#[async_trait]
pub trait WindowOpener: Send + Sync {
    /// Open a detached window showing `url`
    async fn open(&self, url: &str, features: &WindowFeatures) -> Result<Box<dyn ExternalWindow>>;
}

/// Handle to a window the host opened for us
///
/// The handle outlives the user's interaction with the window; probing a
/// closed window must stay safe indefinitely.
pub trait ExternalWindow: Send + Sync {
    /// Whether the window has been closed
    ///
    /// # Errors
    ///
    /// Returns an error when the host forbids probing the window in its
    /// current state (cross-origin navigation, sandbox policies). Such
    /// errors are transient; callers should probe again later.
    fn is_closed(&self) -> Result<bool>;

    /// Bring the window to the foreground. Advisory; hosts may ignore it.
    fn focus(&self) {}
}
