//! Widget Surface Abstractions
//!
//! The login widget drives a small piece of host UI: the element it is
//! bound to, plus modal dialogs for inline login, profile display, and
//! error reporting. These traits keep the core free of any rendering
//! concern; hosts map them onto DOM nodes, native views, or test fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Visual state a bound element renders
///
/// Maps one-to-one onto the `login` / `logout` style classes hosts apply
/// to the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualState {
    /// Element offers a login action
    #[default]
    LoggedOut,
    /// Element offers logout and profile actions
    LoggedIn,
}

impl VisualState {
    /// Style class hosts apply to the bound element
    pub fn as_class(&self) -> &'static str {
        match self {
            VisualState::LoggedOut => "login",
            VisualState::LoggedIn => "logout",
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, VisualState::LoggedIn)
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_class())
    }
}

/// How the login flow is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Detached window the user completes login in
    Popup,
    /// Inline frame inside a modal dialog
    #[default]
    Iframe,
}

impl PresentationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationMode::Popup => "popup",
            PresentationMode::Iframe => "iframe",
        }
    }

    /// Parse a host-supplied mode attribute. Unrecognized values fall back
    /// to the inline frame.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "popup" => PresentationMode::Popup,
            _ => PresentationMode::Iframe,
        }
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Menu actions offered next to a signed-in element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    Logout,
    Profile,
}

impl MenuAction {
    /// User-facing label for the action
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Logout => "Logout",
            MenuAction::Profile => "Profile",
        }
    }
}

/// Identity affordance rendered on a signed-in element
///
/// Hosts show the avatar when one is available and fall back to a generic
/// user icon otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityBadge {
    /// Display name, when the account exposes one
    pub display_name: Option<String>,
    /// Avatar image URL; `None` means render the generic icon
    pub avatar_url: Option<String>,
    /// Actions offered in the badge's dropdown menu
    pub menu: Vec<MenuAction>,
}

impl IdentityBadge {
    pub fn new(display_name: Option<String>, avatar_url: Option<String>) -> Self {
        Self {
            display_name,
            avatar_url,
            menu: vec![MenuAction::Logout, MenuAction::Profile],
        }
    }
}

/// Host-bound element the widget decorates
///
/// One binding per element. All methods are synchronous because hosts
/// apply them directly to their UI tree; anything slow belongs behind the
/// async traits instead.
pub trait WidgetElement: Send + Sync {
    /// Remove and return the element's direct navigation target
    ///
    /// Called once at bind time so activating the element never navigates
    /// the embedding page away.
    fn take_nav_target(&self) -> Option<String>;

    /// Apply the visual state's style class, replacing the previous one
    fn set_visual_state(&self, state: VisualState);

    /// Render the identity badge for a signed-in account
    fn render_identity(&self, badge: IdentityBadge);

    /// Remove any rendered identity badge
    fn clear_identity(&self);

    /// Server identity inherited from the nearest enclosing container,
    /// when the host tags one
    fn server_identity(&self) -> Option<String>;

    /// Presentation mode inherited from the nearest enclosing container
    fn presentation_mode(&self) -> PresentationMode {
        PresentationMode::default()
    }
}

/// Description of a modal dialog the host should render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalSpec {
    /// Dialog title
    pub title: String,
    /// URL to show in an inline frame filling the dialog body
    pub iframe_url: Option<String>,
    /// Label for the dismiss control; hosts pick their own default when absent
    pub dismiss_label: Option<String>,
}

impl ModalSpec {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_iframe(mut self, url: impl Into<String>) -> Self {
        self.iframe_url = Some(url.into());
        self
    }

    pub fn with_dismiss_label(mut self, label: impl Into<String>) -> Self {
        self.dismiss_label = Some(label.into());
        self
    }
}

/// Failure detail routed to the host's shared error reporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AjaxFailure {
    /// Endpoint the failed request targeted
    pub endpoint: String,
    /// HTTP status when a response arrived at all
    pub status: Option<u16>,
    /// Human-readable failure detail
    pub detail: String,
}

/// Modal dialog layer of the embedding host
#[async_trait]
pub trait ModalHost: Send + Sync {
    /// Show a modal dialog
    ///
    /// Returns a session handle used to populate the body and await
    /// dismissal.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot present dialogs in its
    /// current state.
    async fn show(&self, spec: ModalSpec) -> Result<Box<dyn ModalSession>>;

    /// Route a user-visible request failure to the host's error reporter
    fn report_ajax_error(&self, failure: AjaxFailure);

    /// Show a blocking notification and return once acknowledged
    ///
    /// Synchronous on purpose: the caller must not proceed until the user
    /// has seen the message.
    fn notify_blocking(&self, message: &str);
}

/// Live handle to a modal dialog
#[async_trait]
pub trait ModalSession: Send + Sync {
    /// Replace the dialog body with host-rendered markup
    async fn set_body(&self, content: &str) -> Result<()>;

    /// Resolve once the user dismisses the dialog
    ///
    /// Resolves at most once; the dialog is gone afterwards.
    async fn dismissed(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_state_classes() {
        assert_eq!(VisualState::LoggedOut.as_class(), "login");
        assert_eq!(VisualState::LoggedIn.as_class(), "logout");
        assert!(VisualState::LoggedIn.is_logged_in());
        assert!(!VisualState::LoggedOut.is_logged_in());
    }

    #[test]
    fn test_visual_state_default() {
        assert_eq!(VisualState::default(), VisualState::LoggedOut);
    }

    #[test]
    fn test_presentation_mode_parse() {
        assert_eq!(PresentationMode::parse("popup"), PresentationMode::Popup);
        assert_eq!(PresentationMode::parse("POPUP"), PresentationMode::Popup);
        assert_eq!(PresentationMode::parse("iframe"), PresentationMode::Iframe);
        assert_eq!(PresentationMode::parse("anything"), PresentationMode::Iframe);
    }

    #[test]
    fn test_identity_badge_menu() {
        let badge = IdentityBadge::new(Some("Jan".to_string()), None);

        assert_eq!(badge.menu, vec![MenuAction::Logout, MenuAction::Profile]);
        assert_eq!(badge.avatar_url, None);
    }

    #[test]
    fn test_menu_action_labels() {
        assert_eq!(MenuAction::Logout.label(), "Logout");
        assert_eq!(MenuAction::Profile.label(), "Profile");
    }

    #[test]
    fn test_modal_spec_builder() {
        let spec = ModalSpec::titled("Login")
            .with_iframe("https://example.org/login")
            .with_dismiss_label("Continue");

        assert_eq!(spec.title, "Login");
        assert_eq!(spec.iframe_url.as_deref(), Some("https://example.org/login"));
        assert_eq!(spec.dismiss_label.as_deref(), Some("Continue"));
    }
}
