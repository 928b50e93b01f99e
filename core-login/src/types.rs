use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a login flow.
///
/// Each external login attempt (popup window or embedded dialog) gets its
/// own flow ID so completions can be matched to the attempt that opened
/// them.
///
/// # Examples
///
/// ```
/// use core_login::FlowId;
///
/// // Create a new flow ID
/// let flow_id = FlowId::new();
///
/// // Parse from string
/// let id_str = "550e8400-e29b-41d4-a716-446655440000";
/// let flow_id = FlowId::from_string(id_str).unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowId(Uuid);

impl FlowId {
    /// Create a new random flow ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a flow ID from a string
    ///
    /// # Arguments
    ///
    /// * `s` - UUID string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use core_login::FlowId;
    ///
    /// let id = FlowId::from_string("550e8400-e29b-41d4-a716-446655440000").unwrap();
    /// ```
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FlowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for FlowId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// HTTP authentication methods whose cached credentials the widget knows
/// how to displace.
///
/// # Examples
///
/// ```
/// use core_login::AuthMethod;
///
/// let method = AuthMethod::Basic;
/// assert_eq!(method.as_str(), "basic");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// HTTP Basic authentication
    Basic,
    /// HTTP Digest authentication
    Digest,
}

impl AuthMethod {
    /// Get the method identifier string
    ///
    /// Matches the `auth_method` values the server reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_login::AuthMethod;
    ///
    /// assert_eq!(AuthMethod::Basic.as_str(), "basic");
    /// assert_eq!(AuthMethod::Digest.as_str(), "digest");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Basic => "basic",
            AuthMethod::Digest => "digest",
        }
    }

    /// Parse an authentication method from a string identifier
    ///
    /// # Arguments
    ///
    /// * `s` - Method identifier string
    ///
    /// # Examples
    ///
    /// ```
    /// use core_login::AuthMethod;
    ///
    /// assert_eq!(AuthMethod::parse("basic"), Some(AuthMethod::Basic));
    /// assert_eq!(AuthMethod::parse("ntlm"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(AuthMethod::Basic),
            "digest" => Some(AuthMethod::Digest),
            _ => None,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session document returned by the server's user-info endpoint.
///
/// Every field is optional; the server sends only what the account
/// exposes. A `null` body (no session at all) deserializes as
/// `Option::<UserInfo>::None`, while an empty object is a valid signed-in
/// session with nothing to show.
///
/// # Examples
///
/// ```
/// use core_login::UserInfo;
///
/// let json = r#"{"name": "Jan Novak", "logout_url": "bye"}"#;
/// let user: UserInfo = serde_json::from_str(json).unwrap();
/// assert_eq!(user.display_label(), Some("Jan Novak"));
/// assert_eq!(user.logout_url.as_deref(), Some("bye"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// Login name of the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Display name of the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,

    /// Server endpoint that terminates the session when fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logout_url: Option<String>,

    /// Profile page for this account, overriding the configured default
    #[serde(
        default,
        rename = "swish_profile_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_url: Option<String>,

    /// HTTP authentication method backing the session ("basic", "digest")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
}

impl UserInfo {
    /// Label shown on the identity badge
    ///
    /// Prefers the display name and falls back to the login name.
    pub fn display_label(&self) -> Option<&str> {
        self.name.as_deref().or(self.user.as_deref())
    }

    /// Credential-cache method advertised by the server, when it maps to a
    /// known [`AuthMethod`]
    pub fn cache_clear_method(&self) -> Option<AuthMethod> {
        self.auth_method.as_deref().and_then(AuthMethod::parse)
    }
}

/// Lifecycle state of a bound login widget.
///
/// Tracks where the widget currently is between the server-confirmed
/// states and the flows that move between them.
///
/// # State Transitions
///
/// ```text
/// LoggedOut -> LoggingIn -> LoggedIn
///     ^                       |
///     |                       v
///     +------- LoggingOut <---+
/// ```
///
/// # Examples
///
/// ```
/// use core_login::WidgetState;
///
/// let state = WidgetState::LoggedOut;
/// assert!(state.is_authenticated() == false);
///
/// let state = WidgetState::LoggedIn;
/// assert!(state.is_authenticated() == true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WidgetState {
    /// No authenticated session
    #[default]
    LoggedOut,
    /// A login flow is in progress
    LoggingIn,
    /// The server confirmed an authenticated session
    LoggedIn,
    /// A logout attempt is in progress
    LoggingOut,
}

impl WidgetState {
    /// Check if the widget still holds an authenticated session
    ///
    /// Returns `true` for `LoggedIn` and `LoggingOut` states.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, WidgetState::LoggedIn | WidgetState::LoggingOut)
    }

    /// Check if a flow is in progress
    ///
    /// Returns `true` for `LoggingIn` and `LoggingOut` states.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, WidgetState::LoggingIn | WidgetState::LoggingOut)
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetState::LoggedOut => write!(f, "Logged Out"),
            WidgetState::LoggingIn => write!(f, "Logging In..."),
            WidgetState::LoggedIn => write!(f, "Logged In"),
            WidgetState::LoggingOut => write!(f, "Logging Out..."),
        }
    }
}
