//! Server-truth session reconciliation.
//!
//! The widget never decides locally whether someone is signed in; it asks
//! the server's user-info endpoint and applies the answer to the session
//! store and the bound element. Anything other than a definite "this
//! account is signed in" resolves to signed out: a `null` body, a
//! malformed body, a non-2xx status, or a transport failure. Failing open
//! to the login affordance beats showing logout controls for a session
//! the server no longer honors.
//!
//! Reconciliation is idempotent. Every pass emits [`SessionEvent::Reconciled`];
//! the edge events [`SessionEvent::SignedIn`] and [`SessionEvent::SignedOut`]
//! fire only when the answer differs from the stored session.

use bridge_traits::{HttpClient, IdentityBadge, VisualState, WidgetElement};
use core_runtime::events::{CoreEvent, EventBus, SessionEvent};
use core_runtime::logging::strip_query;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

use crate::session::SessionStore;
use crate::types::UserInfo;

/// Applies the server's session answer to local state.
pub struct Reconciler {
    http: Arc<dyn HttpClient>,
    session: Arc<SessionStore>,
    element: Arc<dyn WidgetElement>,
    event_bus: EventBus,
    user_info_url: Url,
}

impl Reconciler {
    pub fn new(
        http: Arc<dyn HttpClient>,
        session: Arc<SessionStore>,
        element: Arc<dyn WidgetElement>,
        event_bus: EventBus,
        user_info_url: Url,
    ) -> Self {
        Self {
            http,
            session,
            element,
            event_bus,
            user_info_url,
        }
    }

    /// Asks the server who is signed in and applies the answer.
    ///
    /// Returns the visual state the element was put into.
    #[instrument(skip(self))]
    pub async fn reconcile(&self) -> VisualState {
        match self.fetch_user_info().await {
            Some(user) => self.apply_signed_in(user).await,
            None => self.apply_signed_out().await,
        }
    }

    /// Fetches the current account from the user-info endpoint.
    ///
    /// `None` covers every non-affirmative outcome. A `null` body is the
    /// server's way of saying "nobody", and an empty JSON object is still
    /// an authenticated account with no attributes.
    async fn fetch_user_info(&self) -> Option<UserInfo> {
        let endpoint = strip_query(self.user_info_url.as_str());

        let response = match self.http.get(self.user_info_url.as_str()).await {
            Ok(response) => response,
            Err(e) => {
                debug!(endpoint, "User-info request failed: {}", e);
                return None;
            }
        };

        if !response.is_success() {
            debug!(
                endpoint,
                status = response.status,
                "User-info request returned a non-success status"
            );
            return None;
        }

        match response.json::<Option<UserInfo>>() {
            Ok(user) => user,
            Err(e) => {
                debug!(endpoint, "User-info body did not parse: {}", e);
                None
            }
        }
    }

    async fn apply_signed_in(&self, user: UserInfo) -> VisualState {
        let prior = self.session.replace(user.clone()).await;

        self.element.render_identity(IdentityBadge::new(
            user.display_label().map(str::to_string),
            user.picture.clone(),
        ));
        self.element.set_visual_state(VisualState::LoggedIn);

        let _ = self
            .event_bus
            .emit(CoreEvent::Session(SessionEvent::Reconciled {
                signed_in: true,
            }));

        if prior.is_none() {
            info!(display_name = ?user.display_label(), "User signed in");
            let _ = self
                .event_bus
                .emit(CoreEvent::Session(SessionEvent::SignedIn {
                    display_name: user.display_label().map(str::to_string),
                    auth_method: user.auth_method.clone(),
                }));
        }

        VisualState::LoggedIn
    }

    async fn apply_signed_out(&self) -> VisualState {
        let prior = self.session.clear().await;

        self.element.clear_identity();
        self.element.set_visual_state(VisualState::LoggedOut);

        let _ = self
            .event_bus
            .emit(CoreEvent::Session(SessionEvent::Reconciled {
                signed_in: false,
            }));

        if prior.is_some() {
            info!("User signed out");
            let _ = self
                .event_bus
                .emit(CoreEvent::Session(SessionEvent::SignedOut));
        }

        VisualState::LoggedOut
    }
}
