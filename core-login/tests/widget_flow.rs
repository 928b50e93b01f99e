//! End-to-end widget flows against scripted bridge fakes.
//!
//! Each test wires a `LoginWidget` to in-memory implementations of the
//! bridge traits and drives a full flow: bind, click, external flow
//! completion, logout, profile. Assertions cover the HTTP traffic, the
//! element's rendered state, dialog activity, and the published events.

use async_trait::async_trait;
use bridge_traits::{
    AjaxFailure, BridgeError, ExternalWindow, HttpClient, HttpRequest, HttpResponse, IdentityBadge,
    ModalHost, ModalSession, ModalSpec, PresentationMode, VisualState, WidgetElement,
    WindowFeatures, WindowOpener,
};
use bytes::Bytes;
use core_login::{LoginError, LoginWidget, WidgetState};
use core_runtime::config::CoreConfig;
use core_runtime::events::{CoreEvent, EventBus, FlowEvent, Receiver, SessionEvent};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;

const BASE_URL: &str = "https://swish.example.org/";

struct ScriptedHttpClient {
    responses: Mutex<VecDeque<bridge_traits::Result<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn push_json(&self, body: &str) {
        self.push_status(200, body);
    }

    fn push_status(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        }));
    }

    fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(BridgeError::NotAvailable(message.to_string())));
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn request_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn execute(&self, request: HttpRequest) -> bridge_traits::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(BridgeError::OperationFailed(
                    "no scripted response".to_string(),
                ))
            })
    }
}

struct StubElement {
    nav_target: Mutex<Option<String>>,
    server_identity: Option<String>,
    mode: PresentationMode,
    visual_states: Mutex<Vec<VisualState>>,
    badges: Mutex<Vec<IdentityBadge>>,
    cleared: AtomicUsize,
}

impl StubElement {
    fn new(mode: PresentationMode) -> Self {
        Self {
            nav_target: Mutex::new(Some("login".to_string())),
            server_identity: None,
            mode,
            visual_states: Mutex::new(Vec::new()),
            badges: Mutex::new(Vec::new()),
            cleared: AtomicUsize::new(0),
        }
    }

    fn without_nav_target(mode: PresentationMode) -> Self {
        let element = Self::new(mode);
        *element.nav_target.lock().unwrap() = None;
        element
    }

    fn with_server_identity(mut self, identity: &str) -> Self {
        self.server_identity = Some(identity.to_string());
        self
    }

    fn last_visual_state(&self) -> Option<VisualState> {
        self.visual_states.lock().unwrap().last().copied()
    }

    fn last_badge(&self) -> Option<IdentityBadge> {
        self.badges.lock().unwrap().last().cloned()
    }
}

impl WidgetElement for StubElement {
    fn take_nav_target(&self) -> Option<String> {
        self.nav_target.lock().unwrap().take()
    }

    fn set_visual_state(&self, state: VisualState) {
        self.visual_states.lock().unwrap().push(state);
    }

    fn render_identity(&self, badge: IdentityBadge) {
        self.badges.lock().unwrap().push(badge);
    }

    fn clear_identity(&self) {
        self.cleared.fetch_add(1, Ordering::SeqCst);
    }

    fn server_identity(&self) -> Option<String> {
        self.server_identity.clone()
    }

    fn presentation_mode(&self) -> PresentationMode {
        self.mode
    }
}

struct DialogHandle {
    body: Arc<Mutex<Option<String>>>,
    dismiss: Option<oneshot::Sender<()>>,
}

struct TestModalHost {
    dialogs: Mutex<Vec<DialogHandle>>,
    specs: Mutex<Vec<ModalSpec>>,
    failures: Mutex<Vec<AjaxFailure>>,
    notices: Mutex<Vec<String>>,
    fail_show: AtomicBool,
}

impl TestModalHost {
    fn new() -> Self {
        Self {
            dialogs: Mutex::new(Vec::new()),
            specs: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            fail_show: AtomicBool::new(false),
        }
    }

    fn dismiss_latest(&self) {
        let mut dialogs = self.dialogs.lock().unwrap();
        let handle = dialogs.last_mut().expect("no dialog to dismiss");
        if let Some(dismiss) = handle.dismiss.take() {
            let _ = dismiss.send(());
        }
    }

    fn latest_body(&self) -> Option<String> {
        let dialogs = self.dialogs.lock().unwrap();
        dialogs.last().and_then(|d| d.body.lock().unwrap().clone())
    }

    fn specs(&self) -> Vec<ModalSpec> {
        self.specs.lock().unwrap().clone()
    }

    fn failures(&self) -> Vec<AjaxFailure> {
        self.failures.lock().unwrap().clone()
    }

    fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

struct TestDialog {
    body: Arc<Mutex<Option<String>>>,
    dismiss_rx: oneshot::Receiver<()>,
}

#[async_trait]
impl ModalSession for TestDialog {
    async fn set_body(&self, content: &str) -> bridge_traits::Result<()> {
        *self.body.lock().unwrap() = Some(content.to_string());
        Ok(())
    }

    async fn dismissed(&mut self) {
        // A dropped host counts as dismissal
        let _ = (&mut self.dismiss_rx).await;
    }
}

#[async_trait]
impl ModalHost for TestModalHost {
    async fn show(&self, spec: ModalSpec) -> bridge_traits::Result<Box<dyn ModalSession>> {
        if self.fail_show.load(Ordering::SeqCst) {
            return Err(BridgeError::NotAvailable("no dialog layer".to_string()));
        }
        let (dismiss_tx, dismiss_rx) = oneshot::channel();
        let body = Arc::new(Mutex::new(None));
        self.specs.lock().unwrap().push(spec);
        self.dialogs.lock().unwrap().push(DialogHandle {
            body: body.clone(),
            dismiss: Some(dismiss_tx),
        });
        Ok(Box::new(TestDialog { body, dismiss_rx }))
    }

    fn report_ajax_error(&self, failure: AjaxFailure) {
        self.failures.lock().unwrap().push(failure);
    }

    fn notify_blocking(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

struct FakeWindow {
    closed: Arc<AtomicBool>,
}

impl ExternalWindow for FakeWindow {
    fn is_closed(&self) -> bridge_traits::Result<bool> {
        Ok(self.closed.load(Ordering::SeqCst))
    }
}

struct TestWindowOpener {
    closed: Arc<AtomicBool>,
    opened_urls: Mutex<Vec<String>>,
    fail_open: AtomicBool,
}

impl TestWindowOpener {
    fn new() -> Self {
        Self {
            closed: Arc::new(AtomicBool::new(false)),
            opened_urls: Mutex::new(Vec::new()),
            fail_open: AtomicBool::new(false),
        }
    }

    fn close_window(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn opened_urls(&self) -> Vec<String> {
        self.opened_urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WindowOpener for TestWindowOpener {
    async fn open(
        &self,
        url: &str,
        _features: &WindowFeatures,
    ) -> bridge_traits::Result<Box<dyn ExternalWindow>> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(BridgeError::OperationFailed(
                "popup blocked".to_string(),
            ));
        }
        self.opened_urls.lock().unwrap().push(url.to_string());
        Ok(Box::new(FakeWindow {
            closed: self.closed.clone(),
        }))
    }
}

struct Harness {
    http: Arc<ScriptedHttpClient>,
    element: Arc<StubElement>,
    modal_host: Arc<TestModalHost>,
    window_opener: Arc<TestWindowOpener>,
    event_bus: EventBus,
}

impl Harness {
    fn new(mode: PresentationMode) -> Self {
        Self::with_element(StubElement::new(mode))
    }

    fn with_element(element: StubElement) -> Self {
        Self {
            http: Arc::new(ScriptedHttpClient::new()),
            element: Arc::new(element),
            modal_host: Arc::new(TestModalHost::new()),
            window_opener: Arc::new(TestWindowOpener::new()),
            event_bus: EventBus::new(32),
        }
    }

    fn subscribe(&self) -> Receiver<CoreEvent> {
        self.event_bus.subscribe()
    }

    async fn bind(&self) -> core_login::Result<LoginWidget> {
        let config = CoreConfig::builder()
            .base_url(BASE_URL)
            .poll_interval(Duration::from_millis(25))
            .http_client(self.http.clone())
            .modal_host(self.modal_host.clone())
            .window_opener(self.window_opener.clone())
            .build()
            .expect("test config should build");

        LoginWidget::bind(config, self.element.clone(), self.event_bus.clone()).await
    }
}

fn drain(events: &mut Receiver<CoreEvent>) -> Vec<CoreEvent> {
    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    received
}

async fn wait_for_state(widget: &LoginWidget, want: WidgetState) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        if widget.state().await == want {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("widget never reached {}", want);
        }
        sleep(Duration::from_millis(10)).await;
    }
}

const SIGNED_IN_BASIC: &str =
    r#"{"user": "jan", "name": "Jan Doe", "logout_url": "bye", "auth_method": "basic"}"#;

#[tokio::test]
async fn test_bind_reconciles_initial_state() {
    let harness = Harness::new(PresentationMode::Iframe);
    let mut events = harness.subscribe();
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();

    assert_eq!(widget.state().await, WidgetState::LoggedOut);
    assert!(widget.current_user().await.is_none());
    assert_eq!(
        harness.element.last_visual_state(),
        Some(VisualState::LoggedOut)
    );
    assert_eq!(
        harness.http.request_urls(),
        vec!["https://swish.example.org/user_info".to_string()]
    );
    assert_eq!(
        drain(&mut events),
        vec![CoreEvent::Session(SessionEvent::Reconciled {
            signed_in: false
        })]
    );
}

#[tokio::test]
async fn test_bind_requires_nav_target() {
    let harness =
        Harness::with_element(StubElement::without_nav_target(PresentationMode::Iframe));

    let result = harness.bind().await;

    match result {
        Err(LoginError::MissingLoginTarget) => {}
        other => panic!("expected MissingLoginTarget, got {:?}", other.map(|_| ())),
    }
    assert!(harness.http.requests().is_empty());
}

#[tokio::test]
async fn test_popup_login_flow() {
    let harness = Harness::new(PresentationMode::Popup);
    let mut events = harness.subscribe();
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();
    let _ = drain(&mut events);

    let flow_id = widget
        .handle_click()
        .await
        .unwrap()
        .expect("click from logged out should start a flow");
    assert_eq!(widget.state().await, WidgetState::LoggingIn);
    assert_eq!(
        harness.window_opener.opened_urls(),
        vec!["https://swish.example.org/login".to_string()]
    );

    harness.http.push_json(SIGNED_IN_BASIC);
    harness.window_opener.close_window();
    wait_for_state(&widget, WidgetState::LoggedIn).await;

    let badge = harness.element.last_badge().unwrap();
    assert_eq!(badge.display_name.as_deref(), Some("Jan Doe"));
    assert_eq!(harness.http.requests().len(), 2);

    assert_eq!(
        drain(&mut events),
        vec![
            CoreEvent::Flow(FlowEvent::LoginStarted {
                flow_id: flow_id.to_string(),
                mode: "popup".to_string(),
            }),
            CoreEvent::Flow(FlowEvent::FlowCompleted {
                flow_id: flow_id.to_string(),
            }),
            CoreEvent::Session(SessionEvent::Reconciled { signed_in: true }),
            CoreEvent::Session(SessionEvent::SignedIn {
                display_name: Some("Jan Doe".to_string()),
                auth_method: Some("basic".to_string()),
            }),
        ]
    );
}

#[tokio::test]
async fn test_blocked_popup_counts_as_closed() {
    let harness = Harness::new(PresentationMode::Popup);
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();
    harness
        .window_opener
        .fail_open
        .store(true, Ordering::SeqCst);

    harness.http.push_json(SIGNED_IN_BASIC);
    widget.handle_click().await.unwrap();

    // The refused window reads as already closed, so the first probe
    // completes the flow and reconciliation runs
    wait_for_state(&widget, WidgetState::LoggedIn).await;

    assert!(harness.window_opener.opened_urls().is_empty());
    assert_eq!(harness.http.requests().len(), 2);
}

#[tokio::test]
async fn test_iframe_login_flow() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();
    widget.handle_click().await.unwrap();

    let specs = harness.modal_host.specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].title, "Login");
    assert_eq!(
        specs[0].iframe_url.as_deref(),
        Some("https://swish.example.org/login")
    );
    assert_eq!(specs[0].dismiss_label.as_deref(), Some("Continue"));
    assert_eq!(widget.state().await, WidgetState::LoggingIn);

    harness.http.push_json(SIGNED_IN_BASIC);
    harness.modal_host.dismiss_latest();
    wait_for_state(&widget, WidgetState::LoggedIn).await;

    assert_eq!(harness.http.requests().len(), 2);
}

#[tokio::test]
async fn test_login_url_carries_server_identity() {
    let element = StubElement::new(PresentationMode::Iframe)
        .with_server_identity("https://id.example.org");
    let harness = Harness::with_element(element);
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();
    widget.login().await.unwrap();

    let specs = harness.modal_host.specs();
    let iframe_url = specs[0].iframe_url.as_deref().unwrap();
    assert_eq!(
        iframe_url,
        "https://swish.example.org/login?server=https%3A%2F%2Fid.example.org"
    );
}

#[tokio::test]
async fn test_iframe_dialog_failure_resets_state() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();
    harness.modal_host.fail_show.store(true, Ordering::SeqCst);

    let result = widget.login().await;

    assert!(matches!(result, Err(LoginError::Bridge(_))));
    assert_eq!(widget.state().await, WidgetState::LoggedOut);
    // Only the bind-time reconcile hit the network
    assert_eq!(harness.http.requests().len(), 1);
}

#[tokio::test]
async fn test_click_ignored_while_logged_in() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness.http.push_json(SIGNED_IN_BASIC);

    let widget = harness.bind().await.unwrap();
    assert_eq!(widget.state().await, WidgetState::LoggedIn);

    let started = widget.handle_click().await.unwrap();

    assert!(started.is_none());
    assert_eq!(harness.http.requests().len(), 1);
    assert!(harness.modal_host.specs().is_empty());
}

#[tokio::test]
async fn test_logout_via_endpoint() {
    let harness = Harness::new(PresentationMode::Iframe);
    let mut events = harness.subscribe();
    harness.http.push_json(SIGNED_IN_BASIC);

    let widget = harness.bind().await.unwrap();
    let _ = drain(&mut events);

    harness.http.push_status(200, "bye");
    harness.http.push_json("null");
    widget.logout().await.unwrap();

    assert_eq!(widget.state().await, WidgetState::LoggedOut);
    assert_eq!(
        harness.http.request_urls(),
        vec![
            "https://swish.example.org/user_info".to_string(),
            "https://swish.example.org/bye".to_string(),
            "https://swish.example.org/user_info".to_string(),
        ]
    );
    assert_eq!(harness.element.cleared.load(Ordering::SeqCst), 1);

    assert_eq!(
        drain(&mut events),
        vec![
            CoreEvent::Flow(FlowEvent::LogoutStarted {
                mechanism: "logout_url".to_string(),
            }),
            CoreEvent::Session(SessionEvent::Reconciled { signed_in: false }),
            CoreEvent::Session(SessionEvent::SignedOut),
        ]
    );
}

#[tokio::test]
async fn test_logout_endpoint_failure_reported() {
    let harness = Harness::new(PresentationMode::Iframe);
    let mut events = harness.subscribe();
    harness.http.push_json(SIGNED_IN_BASIC);

    let widget = harness.bind().await.unwrap();
    let _ = drain(&mut events);

    harness.http.push_status(500, "Internal Server Error");
    widget.logout().await.unwrap();

    // No reconcile after a rejected logout; the session is still live
    assert_eq!(harness.http.requests().len(), 2);
    assert_eq!(widget.state().await, WidgetState::LoggedIn);
    assert!(widget.current_user().await.is_some());

    let failures = harness.modal_host.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].endpoint, "https://swish.example.org/bye");
    assert_eq!(failures[0].status, Some(500));

    let events = drain(&mut events);
    assert!(events.contains(&CoreEvent::Flow(FlowEvent::LogoutFailed {
        endpoint: "https://swish.example.org/bye".to_string(),
        status: Some(500),
    })));
}

#[tokio::test]
async fn test_logout_via_cache_clear() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness
        .http
        .push_json(r#"{"user": "jan", "auth_method": "digest"}"#);

    let widget = harness.bind().await.unwrap();

    harness.http.push_status(401, "Unauthorized");
    harness.http.push_json("null");
    widget.logout().await.unwrap();

    assert_eq!(widget.state().await, WidgetState::LoggedOut);

    let requests = harness.http.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].url, "https://swish.example.org/.force_logout");
    // base64("logout:logout")
    assert_eq!(
        requests[1].headers.get("Authorization"),
        Some(&"Basic bG9nb3V0OmxvZ291dA==".to_string())
    );
    assert_eq!(requests[2].url, "https://swish.example.org/user_info");
}

#[tokio::test]
async fn test_logout_basic_falls_back_to_cache_clear() {
    let harness = Harness::new(PresentationMode::Iframe);
    let mut events = harness.subscribe();
    harness
        .http
        .push_json(r#"{"user": "jan", "auth_method": "basic"}"#);

    let widget = harness.bind().await.unwrap();
    let _ = drain(&mut events);

    harness.http.push_status(401, "Unauthorized");
    harness.http.push_json("null");
    widget.logout().await.unwrap();

    assert_eq!(widget.state().await, WidgetState::LoggedOut);

    let requests = harness.http.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].url, "https://swish.example.org/.force_logout");
    assert_eq!(
        requests[1].headers.get("Authorization"),
        Some(&"Basic bG9nb3V0OmxvZ291dA==".to_string())
    );
    assert_eq!(requests[2].url, "https://swish.example.org/user_info");

    assert_eq!(
        drain(&mut events),
        vec![
            CoreEvent::Flow(FlowEvent::LogoutStarted {
                mechanism: "cache_clear".to_string(),
            }),
            CoreEvent::Session(SessionEvent::Reconciled { signed_in: false }),
            CoreEvent::Session(SessionEvent::SignedOut),
        ]
    );
}

#[tokio::test]
async fn test_logout_without_mechanism_notifies() {
    let harness = Harness::new(PresentationMode::Iframe);
    let mut events = harness.subscribe();
    harness.http.push_json(r#"{"user": "jan"}"#);

    let widget = harness.bind().await.unwrap();
    let _ = drain(&mut events);

    widget.logout().await.unwrap();

    assert_eq!(
        harness.modal_host.notices(),
        vec!["Don't know how to logout".to_string()]
    );
    // Nothing was sent and nothing changed
    assert_eq!(harness.http.requests().len(), 1);
    assert_eq!(widget.state().await, WidgetState::LoggedIn);
    assert_eq!(
        drain(&mut events),
        vec![CoreEvent::Flow(FlowEvent::LogoutUnsupported)]
    );
}

#[tokio::test]
async fn test_logout_requires_session() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness.http.push_json("null");

    let widget = harness.bind().await.unwrap();
    let result = widget.logout().await;

    match result {
        Err(e) => assert_eq!(e.to_string(), "Not authenticated"),
        Ok(()) => panic!("logout without a session should fail"),
    }
}

#[tokio::test]
async fn test_profile_dialog_populated() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness.http.push_json(SIGNED_IN_BASIC);

    let widget = harness.bind().await.unwrap();

    harness.http.push_status(200, "<h1>Jan Doe</h1>");
    widget.profile().await.unwrap();

    let specs = harness.modal_host.specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].title, "User profile");
    assert_eq!(specs[0].iframe_url, None);

    // Body arrives asynchronously after the dialog opened
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while harness.modal_host.latest_body().is_none() {
        if tokio::time::Instant::now() > deadline {
            panic!("profile body never arrived");
        }
        sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        harness.modal_host.latest_body().as_deref(),
        Some("<h1>Jan Doe</h1>")
    );
    assert_eq!(
        harness.http.request_urls()[1],
        "https://swish.example.org/user_profile"
    );

    // The profile page may have ended the session; dismissal reconciles
    harness.http.push_json("null");
    harness.modal_host.dismiss_latest();
    wait_for_state(&widget, WidgetState::LoggedOut).await;
}

#[tokio::test]
async fn test_profile_uses_account_location() {
    let harness = Harness::new(PresentationMode::Iframe);
    harness
        .http
        .push_json(r#"{"user": "jan", "swish_profile_url": "me/profile"}"#);

    let widget = harness.bind().await.unwrap();

    harness.http.push_status(200, "profile");
    widget.profile().await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while harness.http.requests().len() < 2 {
        if tokio::time::Instant::now() > deadline {
            panic!("profile fetch never happened");
        }
        sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(
        harness.http.request_urls()[1],
        "https://swish.example.org/me/profile"
    );
}

#[tokio::test]
async fn test_profile_fetch_failure_reported() {
    let harness = Harness::new(PresentationMode::Iframe);
    let mut events = harness.subscribe();
    harness.http.push_json(SIGNED_IN_BASIC);

    let widget = harness.bind().await.unwrap();
    let _ = drain(&mut events);

    harness.http.push_error("connection reset");
    widget.profile().await.unwrap();

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while harness.modal_host.failures().is_empty() {
        if tokio::time::Instant::now() > deadline {
            panic!("profile failure never reported");
        }
        sleep(Duration::from_millis(10)).await;
    }

    let failures = harness.modal_host.failures();
    assert_eq!(failures[0].endpoint, "https://swish.example.org/user_profile");
    assert_eq!(failures[0].status, None);
    assert!(harness.modal_host.latest_body().is_none());

    let events = drain(&mut events);
    assert!(events.contains(&CoreEvent::Flow(FlowEvent::ProfileOpened)));
    assert!(events.contains(&CoreEvent::Flow(FlowEvent::ProfileFetchFailed {
        endpoint: "https://swish.example.org/user_profile".to_string(),
    })));
}
