//! # Login Widget
//!
//! Binds one host element to an authentication server and drives it
//! through the widget lifecycle: initial reconciliation, login flows,
//! logout, and the profile dialog.
//!
//! ## Overview
//!
//! The widget owns a small state machine:
//!
//! ```text
//! LoggedOut ──login()──> LoggingIn ──reconcile──> LoggedIn
//!     ^                                              │
//!     └──────reconcile<── LoggingOut <──logout()─────┘
//! ```
//!
//! Every flow ends in reconciliation; the server's user-info answer is
//! the only thing that moves the widget into or out of `LoggedIn`. The
//! widget itself never concludes "login worked" from a closed window or
//! a dismissed dialog, it only concludes "time to ask the server again".
//!
//! ## Features
//!
//! - **Click handling**: activating the element starts a login flow from
//!   the logged-out state and is ignored while a flow is in progress
//! - **Popup and iframe flows**: presentation mode comes from the host
//!   element; popups are watched for closure, dialogs for dismissal
//! - **Logout**: per-account logout endpoint when the server names one,
//!   credential-cache displacement for `basic`/`digest` sessions, and a
//!   blocking notice when no mechanism exists
//! - **Profile dialog**: opens immediately, body populated asynchronously
//!
//! ## Usage
//!
//! ```ignore
//! use core_login::LoginWidget;
//! use core_runtime::config::CoreConfig;
//! use core_runtime::events::EventBus;
//!
//! let config = CoreConfig::builder()
//!     .base_url("https://swish.example.org/")
//!     .modal_host(modal_host)
//!     .build()?;
//!
//! let event_bus = EventBus::default();
//! let widget = LoginWidget::bind(config, element, event_bus.clone()).await?;
//!
//! // Host wiring: forward element activation
//! widget.handle_click().await?;
//! ```

use bridge_traits::{
    AjaxFailure, HttpClient, ModalHost, ModalSession, ModalSpec, PresentationMode, VisualState,
    WidgetElement, WindowFeatures, WindowOpener,
};
use core_runtime::config::CoreConfig;
use core_runtime::events::{CoreEvent, EventBus, FlowEvent};
use core_runtime::logging::strip_query;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::cache_clear::AuthCacheClearer;
use crate::detect::CompletionDetector;
use crate::error::{LoginError, Result};
use crate::reconcile::Reconciler;
use crate::session::SessionStore;
use crate::types::{AuthMethod, FlowId, UserInfo, WidgetState};

/// Title of the inline login dialog
const LOGIN_MODAL_TITLE: &str = "Login";

/// Dismiss-control label of the inline login dialog
const LOGIN_DISMISS_LABEL: &str = "Continue";

/// Title of the profile dialog
const PROFILE_MODAL_TITLE: &str = "User profile";

/// Blocking notice shown when the session offers no logout mechanism
const NO_LOGOUT_MECHANISM_MESSAGE: &str = "Don't know how to logout";

/// A login widget bound to one host element.
///
/// Cheap to clone; clones share the binding.
#[derive(Clone)]
pub struct LoginWidget {
    inner: Arc<WidgetInner>,
}

struct WidgetInner {
    element: Arc<dyn WidgetElement>,
    event_bus: EventBus,
    session: Arc<SessionStore>,
    reconciler: Reconciler,
    clearer: AuthCacheClearer,
    detector: CompletionDetector,
    http: Arc<dyn HttpClient>,
    modal_host: Arc<dyn ModalHost>,
    window_opener: Option<Arc<dyn WindowOpener>>,
    base_url: Url,
    login_url: Url,
    user_profile_url: Url,
    cache_clear_url: Url,
    state: RwLock<WidgetState>,
    pending_flow: Mutex<Option<FlowId>>,
}

impl LoginWidget {
    /// Binds the widget to `element` and reconciles the initial state.
    ///
    /// The element's navigation target is taken over as the login URL so
    /// activating the element never navigates the embedding page away.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::MissingLoginTarget`] when the element has no
    /// navigation target, and a configuration error when the endpoint
    /// locations cannot be resolved against the base URL.
    pub async fn bind(
        config: CoreConfig,
        element: Arc<dyn WidgetElement>,
        event_bus: EventBus,
    ) -> Result<Self> {
        let nav_target = element
            .take_nav_target()
            .ok_or(LoginError::MissingLoginTarget)?;
        let login_url = config
            .resolve(&nav_target)
            .map_err(|e| LoginError::InvalidUrl(e.to_string()))?;
        let user_info_url = config
            .user_info_url()
            .map_err(|e| LoginError::Config(e.to_string()))?;
        let user_profile_url = config
            .user_profile_url()
            .map_err(|e| LoginError::Config(e.to_string()))?;
        let cache_clear_url = config
            .cache_clear_url()
            .map_err(|e| LoginError::Config(e.to_string()))?;

        let session = Arc::new(SessionStore::new());
        let reconciler = Reconciler::new(
            config.http_client.clone(),
            session.clone(),
            element.clone(),
            event_bus.clone(),
            user_info_url,
        );
        let clearer = AuthCacheClearer::new(config.http_client.clone(), config.environment.clone());
        let detector = CompletionDetector::new().with_poll_interval(config.poll_interval);

        let inner = Arc::new(WidgetInner {
            element,
            event_bus,
            session,
            reconciler,
            clearer,
            detector,
            http: config.http_client,
            modal_host: config.modal_host,
            window_opener: config.window_opener,
            base_url: config.base_url,
            login_url,
            user_profile_url,
            cache_clear_url,
            state: RwLock::new(WidgetState::LoggedOut),
            pending_flow: Mutex::new(None),
        });

        info!(
            login_url = strip_query(inner.login_url.as_str()),
            "Login widget bound"
        );

        // The element starts from the server's answer, not from a guess
        inner.reconcile_and_sync().await;

        Ok(Self { inner })
    }

    /// Current widget state.
    pub async fn state(&self) -> WidgetState {
        self.inner.state.read().await.clone()
    }

    /// Snapshot of the signed-in account, if any.
    pub async fn current_user(&self) -> Option<UserInfo> {
        self.inner.session.snapshot().await
    }

    /// Re-asks the server who is signed in and applies the answer.
    ///
    /// Hosts call this when something outside the widget may have changed
    /// the session, e.g. the embedding page regained focus.
    pub async fn reconcile(&self) -> WidgetState {
        self.inner.reconcile_and_sync().await
    }

    /// Handles activation of the bound element.
    ///
    /// Starts a login flow from the logged-out state. In any other state
    /// the click belongs to the host (menu, no-op) and `None` is returned.
    pub async fn handle_click(&self) -> Result<Option<FlowId>> {
        let state = self.inner.state.read().await.clone();
        if state != WidgetState::LoggedOut {
            debug!(state = %state, "Click ignored outside the logged-out state");
            return Ok(None);
        }
        self.login().await.map(Some)
    }

    /// Starts a login flow in the element's presentation mode.
    ///
    /// At most one flow may be pending per binding; starting another one
    /// while a flow is pending abandons the first, whose completion is
    /// then ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Bridge`] when an inline dialog cannot be
    /// shown. A popup that fails to open is not an error: it counts as
    /// already closed and the flow resolves through reconciliation.
    pub async fn login(&self) -> Result<FlowId> {
        self.inner.login().await
    }

    /// Logs the signed-in account out.
    ///
    /// Picks the mechanism the session supports: the account's logout
    /// endpoint when the server names one, credential-cache displacement
    /// for `basic` and `digest` sessions, and a blocking "don't know how"
    /// notice otherwise. A rejected logout request is reported through
    /// the host's error reporter, not returned as an error.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::NotAuthenticated`] when nobody is signed in.
    pub async fn logout(&self) -> Result<()> {
        self.inner.logout().await
    }

    /// Opens the profile dialog and populates it asynchronously.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Bridge`] when the dialog cannot be shown.
    pub async fn profile(&self) -> Result<()> {
        self.inner.profile().await
    }
}

impl WidgetInner {
    #[instrument(skip(self))]
    async fn login(self: &Arc<Self>) -> Result<FlowId> {
        let flow_id = FlowId::new();
        let mode = self.element.presentation_mode();

        let mut url = self.login_url.clone();
        if let Some(identity) = self.element.server_identity() {
            url.query_pairs_mut().append_pair("server", &identity);
        }

        *self.state.write().await = WidgetState::LoggingIn;
        *self.pending_flow.lock().await = Some(flow_id);

        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::LoginStarted {
                flow_id: flow_id.to_string(),
                mode: mode.as_str().to_string(),
            }));
        info!(url = strip_query(url.as_str()), mode = %mode, "Login flow starting");

        match mode {
            PresentationMode::Popup => self.open_popup_flow(&url, flow_id).await?,
            PresentationMode::Iframe => self.open_iframe_flow(&url, flow_id).await?,
        }

        Ok(flow_id)
    }

    async fn open_popup_flow(self: &Arc<Self>, url: &Url, flow_id: FlowId) -> Result<()> {
        let window = match &self.window_opener {
            Some(opener) => {
                match opener.open(url.as_str(), &WindowFeatures::default()).await {
                    Ok(window) => {
                        window.focus();
                        Some(window)
                    }
                    Err(e) => {
                        debug!("Popup failed to open, treating it as already closed: {}", e);
                        None
                    }
                }
            }
            None => {
                debug!("No window opener available, treating the popup as already closed");
                None
            }
        };

        let completion = self.detector.await_closed(window);
        let inner = self.clone();
        tokio::spawn(async move {
            completion.wait().await;
            inner.flow_completed(flow_id).await;
        });

        Ok(())
    }

    async fn open_iframe_flow(self: &Arc<Self>, url: &Url, flow_id: FlowId) -> Result<()> {
        let spec = ModalSpec::titled(LOGIN_MODAL_TITLE)
            .with_iframe(url.as_str())
            .with_dismiss_label(LOGIN_DISMISS_LABEL);

        let dialog = match self.modal_host.show(spec).await {
            Ok(dialog) => dialog,
            Err(e) => {
                warn!("Login dialog failed to open: {}", e);
                *self.state.write().await = WidgetState::LoggedOut;
                *self.pending_flow.lock().await = None;
                return Err(LoginError::Bridge(e.to_string()));
            }
        };

        let inner = self.clone();
        tokio::spawn(async move {
            let mut dialog = dialog;
            dialog.dismissed().await;
            inner.flow_completed(flow_id).await;
        });

        Ok(())
    }

    /// Completion signal of an external flow.
    ///
    /// Only the pending flow counts; completions of abandoned flows are
    /// dropped so they cannot re-trigger reconciliation later.
    async fn flow_completed(&self, flow_id: FlowId) {
        {
            let mut pending = self.pending_flow.lock().await;
            if *pending != Some(flow_id) {
                debug!(flow_id = %flow_id, "Stale flow completion ignored");
                return;
            }
            *pending = None;
        }

        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::FlowCompleted {
                flow_id: flow_id.to_string(),
            }));
        info!(flow_id = %flow_id, "External flow completed, reconciling");

        self.reconcile_and_sync().await;
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        let user = self
            .session
            .snapshot()
            .await
            .ok_or(LoginError::NotAuthenticated)?;

        if let Some(location) = &user.logout_url {
            self.logout_via_endpoint(location).await
        } else if let Some(method) = user.cache_clear_method() {
            self.logout_via_cache_clear(method).await
        } else {
            self.logout_unsupported();
            Ok(())
        }
    }

    async fn logout_via_endpoint(&self, location: &str) -> Result<()> {
        let url = self.resolve(location)?;

        *self.state.write().await = WidgetState::LoggingOut;
        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::LogoutStarted {
                mechanism: "logout_url".to_string(),
            }));
        info!(
            url = strip_query(url.as_str()),
            "Logging out via the account's logout endpoint"
        );

        match self.http.get(url.as_str()).await {
            Ok(response) if response.is_success() => {
                self.reconcile_and_sync().await;
            }
            Ok(response) => {
                warn!(
                    status = response.status,
                    "Logout endpoint rejected the request"
                );
                self.logout_failed(
                    &url,
                    Some(response.status),
                    format!("Unexpected status {}", response.status),
                )
                .await;
            }
            Err(e) => {
                warn!("Logout request failed: {}", e);
                self.logout_failed(&url, None, e.to_string()).await;
            }
        }

        Ok(())
    }

    /// A logout request that failed leaves the session alone.
    ///
    /// The server never confirmed the session ended, so the widget stays
    /// logged in and routes the failure to the host's error reporter.
    async fn logout_failed(&self, url: &Url, status: Option<u16>, detail: String) {
        let endpoint = strip_query(url.as_str()).to_string();
        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::LogoutFailed {
                endpoint: endpoint.clone(),
                status,
            }));
        self.modal_host.report_ajax_error(AjaxFailure {
            endpoint,
            status,
            detail,
        });

        *self.state.write().await = WidgetState::LoggedIn;
    }

    async fn logout_via_cache_clear(&self, method: AuthMethod) -> Result<()> {
        *self.state.write().await = WidgetState::LoggingOut;
        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::LogoutStarted {
                mechanism: "cache_clear".to_string(),
            }));
        info!(method = %method, "Logging out by displacing the cached credential");

        self.clearer
            .clear(self.cache_clear_url.as_str(), method)
            .await;
        self.reconcile_and_sync().await;

        Ok(())
    }

    fn logout_unsupported(&self) {
        warn!("No logout mechanism available for the current session");
        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::LogoutUnsupported));
        self.modal_host.notify_blocking(NO_LOGOUT_MECHANISM_MESSAGE);
    }

    #[instrument(skip(self))]
    async fn profile(self: &Arc<Self>) -> Result<()> {
        let profile_url = match self
            .session
            .snapshot()
            .await
            .and_then(|user| user.profile_url)
        {
            Some(location) => self.resolve(&location)?,
            None => self.user_profile_url.clone(),
        };

        let dialog = self
            .modal_host
            .show(ModalSpec::titled(PROFILE_MODAL_TITLE))
            .await
            .map_err(|e| LoginError::Bridge(e.to_string()))?;

        let _ = self.event_bus.emit(CoreEvent::Flow(FlowEvent::ProfileOpened));
        info!(
            url = strip_query(profile_url.as_str()),
            "Profile dialog opened"
        );

        let inner = self.clone();
        tokio::spawn(async move {
            inner.populate_profile(dialog, profile_url).await;
        });

        Ok(())
    }

    /// Fills the profile dialog, then waits out its lifetime.
    ///
    /// The dialog shows whatever the server returns for the profile
    /// location; the widget does not interpret the content. Dismissal
    /// triggers reconciliation because the profile page may have let the
    /// user end the session.
    async fn populate_profile(&self, mut dialog: Box<dyn ModalSession>, url: Url) {
        match self.http.get(url.as_str()).await {
            Ok(response) if response.is_success() => match response.text() {
                Ok(content) => {
                    if let Err(e) = dialog.set_body(&content).await {
                        debug!("Profile dialog body update failed: {}", e);
                    }
                }
                Err(e) => self.profile_fetch_failed(&url, None, e.to_string()),
            },
            Ok(response) => {
                self.profile_fetch_failed(
                    &url,
                    Some(response.status),
                    format!("Unexpected status {}", response.status),
                );
            }
            Err(e) => self.profile_fetch_failed(&url, None, e.to_string()),
        }

        dialog.dismissed().await;
        debug!("Profile dialog dismissed, reconciling");
        self.reconcile_and_sync().await;
    }

    fn profile_fetch_failed(&self, url: &Url, status: Option<u16>, detail: String) {
        let endpoint = strip_query(url.as_str()).to_string();
        warn!(endpoint, "Profile content fetch failed");
        let _ = self
            .event_bus
            .emit(CoreEvent::Flow(FlowEvent::ProfileFetchFailed {
                endpoint: endpoint.clone(),
            }));
        self.modal_host.report_ajax_error(AjaxFailure {
            endpoint,
            status,
            detail,
        });
    }

    /// Reconciles against the server and mirrors the answer into the
    /// widget state.
    async fn reconcile_and_sync(&self) -> WidgetState {
        let visual = self.reconciler.reconcile().await;
        let next = match visual {
            VisualState::LoggedIn => WidgetState::LoggedIn,
            VisualState::LoggedOut => WidgetState::LoggedOut,
        };
        *self.state.write().await = next.clone();
        next
    }

    /// Resolves a server-supplied location against the base URL.
    fn resolve(&self, location: &str) -> Result<Url> {
        self.base_url.join(location).map_err(|e| {
            LoginError::InvalidUrl(format!(
                "Failed to resolve '{}' against '{}': {}",
                location, self.base_url, e
            ))
        })
    }
}
