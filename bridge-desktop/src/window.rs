//! External Window Implementation using Child Processes
//!
//! Desktop shells rarely embed a browser engine, so the detached login
//! window is delegated to an external viewer command (the system browser
//! opener, a kiosk viewer, an Electron helper). The viewer process itself
//! stands in for the window: when it exits, the window counts as closed.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    window::{ExternalWindow, WindowFeatures, WindowOpener},
};
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;
use tracing::debug;

/// Opens login windows by spawning a viewer command
///
/// The URL is appended as the final argument. Geometry hints are logged
/// but not forwarded; most viewer commands have no portable way to accept
/// them.
pub struct CommandWindowOpener {
    program: String,
    args: Vec<String>,
}

impl CommandWindowOpener {
    /// Create an opener that runs `program <url>`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create an opener that runs `program <args..> <url>`
    pub fn with_args(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl WindowOpener for CommandWindowOpener {
    async fn open(&self, url: &str, features: &WindowFeatures) -> Result<Box<dyn ExternalWindow>> {
        debug!(
            program = %self.program,
            url = %url,
            features = %features.to_feature_string(),
            "Opening external window"
        );

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                BridgeError::OperationFailed(format!(
                    "Failed to launch viewer command '{}': {}",
                    self.program, e
                ))
            })?;

        Ok(Box::new(ProcessWindow {
            child: Mutex::new(child),
        }))
    }
}

/// Window handle backed by a spawned viewer process
///
/// `is_closed` reaps the process on first observation of its exit, so
/// repeated probes after closure stay cheap and safe.
pub struct ProcessWindow {
    child: Mutex<Child>,
}

impl ExternalWindow for ProcessWindow {
    fn is_closed(&self) -> Result<bool> {
        let mut child = self
            .child
            .lock()
            .map_err(|_| BridgeError::OperationFailed("Window handle poisoned".to_string()))?;

        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(exit = ?status.code(), "Viewer process exited");
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => Err(BridgeError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_short_lived_viewer_reports_closed() {
        let opener = CommandWindowOpener::new("true");
        let window = opener
            .open("https://example.org/login", &WindowFeatures::default())
            .await
            .unwrap();

        // Give the process a moment to exit
        let mut closed = false;
        for _ in 0..20 {
            if window.is_closed().unwrap() {
                closed = true;
                break;
            }
            sleep(Duration::from_millis(25)).await;
        }

        assert!(closed);
        // Probing after closure stays safe
        assert!(window.is_closed().unwrap());
    }

    #[tokio::test]
    async fn test_running_viewer_reports_open() {
        let opener =
            CommandWindowOpener::with_args("sh", vec!["-c".to_string(), "sleep 0.3".to_string()]);
        let window = opener
            .open("https://example.org/login", &WindowFeatures::default())
            .await
            .unwrap();

        assert!(!window.is_closed().unwrap());

        sleep(Duration::from_millis(500)).await;
        assert!(window.is_closed().unwrap());
    }

    #[tokio::test]
    async fn test_missing_viewer_command_fails() {
        let opener = CommandWindowOpener::new("definitely-not-a-real-viewer-command");
        let result = opener
            .open("https://example.org/login", &WindowFeatures::default())
            .await;

        assert!(result.is_err());
    }
}
