//! # Event Bus System
//!
//! Provides an event-driven architecture for the Login Widget Core using `tokio::sync::broadcast`.
//! This module enables decoupled communication between core modules through typed events.
//!
//! ## Overview
//!
//! The event bus system consists of:
//! - **Event Types**: Strongly-typed enum hierarchies for different domains
//! - **EventBus**: Central broadcast channel for publishing events
//! - **EventStream**: Wrapper for consuming events with filtering
//! - **Subscription Management**: Multiple subscribers can listen independently
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     emit      ┌───────────┐
//! │ Reconciler  ├──────────────>│           │
//! └─────────────┘               │           │
//!                               │ EventBus  │
//! ┌─────────────┐     emit      │ (broadcast│     subscribe    ┌────────────┐
//! │LoginWidget  ├──────────────>│  channel) ├─────────────────>│ Subscriber │
//! └─────────────┘               │           │                  └────────────┘
//!                               │           │
//!                               │           │     subscribe    ┌────────────┐
//!                               │           ├─────────────────>│ Subscriber │
//!                               └───────────┘                  └────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Creating an Event Bus
//!
//! ```rust
//! use core_runtime::events::EventBus;
//!
//! let event_bus = EventBus::new(100); // Buffer size of 100 events
//! ```
//!
//! ### Publishing Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent, SessionEvent};
//!
//! # let event_bus = EventBus::new(100);
//! let event = CoreEvent::Session(SessionEvent::SignedIn {
//!     display_name: Some("Jan".to_string()),
//!     auth_method: Some("basic".to_string()),
//! });
//!
//! event_bus.emit(event).ok();
//! ```
//!
//! ### Subscribing to Events
//!
//! ```rust
//! use core_runtime::events::{EventBus, CoreEvent};
//! use tokio::sync::broadcast::error::RecvError;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = EventBus::new(100);
//! let mut stream = event_bus.subscribe();
//!
//! tokio::spawn(async move {
//!     loop {
//!         match stream.recv().await {
//!             Ok(event) => println!("Received: {:?}", event),
//!             Err(RecvError::Lagged(n)) => {
//!                 eprintln!("Missed {} events", n);
//!             }
//!             Err(RecvError::Closed) => break,
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Event Types
//!
//! ### Session Events
//! - `Reconciled`: Server was asked who is signed in and the answer was applied
//! - `SignedIn`: Reconciliation found an authenticated account where there was none
//! - `SignedOut`: Reconciliation found no account where there was one
//!
//! ### Flow Events
//! - `LoginStarted`: An external login flow was opened
//! - `FlowCompleted`: The external flow's completion signal fired
//! - `LogoutStarted`: A logout mechanism was selected and started
//! - `LogoutFailed`: The logout request was rejected or never arrived
//! - `LogoutUnsupported`: No mechanism exists to log the current session out
//! - `ProfileOpened`: The profile dialog was shown
//! - `ProfileFetchFailed`: The profile content request failed
//!
//! ## Error Handling
//!
//! The event bus uses `tokio::sync::broadcast`, which can produce two types of errors:
//!
//! - **`RecvError::Lagged(n)`**: Subscriber was too slow and missed `n` events.
//!   This is non-fatal; the subscriber can continue receiving new events.
//! - **`RecvError::Closed`**: All senders have been dropped. This indicates shutdown.
//!
//! Subscribers should handle `Lagged` gracefully and treat `Closed` as a signal to exit.
//!
//! ## Thread Safety
//!
//! The event bus is fully thread-safe (`Send + Sync`). It can be safely shared across
//! async tasks using `Arc`:
//!
//! ```no_run
//! use std::sync::Arc;
//! use core_runtime::events::EventBus;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let event_bus = Arc::new(EventBus::new(100));
//! let bus_clone = Arc::clone(&event_bus);
//!
//! tokio::spawn(async move {
//!     // Use bus_clone in spawned task
//! });
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
///
/// This value balances memory usage with the ability to handle bursts of events.
/// Subscribers that can't keep up will receive `RecvError::Lagged`.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Core Event Types
// ============================================================================

/// Top-level event enum encompassing all event categories.
///
/// This is the main event type published and received through the event bus.
/// It wraps domain-specific event types for different modules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload")]
pub enum CoreEvent {
    /// Session reconciliation events
    Session(SessionEvent),
    /// Login, logout, and profile flow events
    Flow(FlowEvent),
}

impl CoreEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            CoreEvent::Session(e) => e.description(),
            CoreEvent::Flow(e) => e.description(),
        }
    }

    /// Returns the severity level of the event.
    pub fn severity(&self) -> EventSeverity {
        match self {
            CoreEvent::Flow(FlowEvent::LogoutFailed { .. }) => EventSeverity::Error,
            CoreEvent::Flow(FlowEvent::ProfileFetchFailed { .. }) => EventSeverity::Error,
            CoreEvent::Flow(FlowEvent::LogoutUnsupported) => EventSeverity::Warning,
            CoreEvent::Session(SessionEvent::SignedIn { .. }) => EventSeverity::Info,
            CoreEvent::Session(SessionEvent::SignedOut) => EventSeverity::Info,
            _ => EventSeverity::Debug,
        }
    }
}

/// Event severity levels for filtering and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventSeverity {
    /// Debug-level events (verbose)
    Debug,
    /// Informational events
    Info,
    /// Warning events
    Warning,
    /// Error events
    Error,
}

// ============================================================================
// Session Events
// ============================================================================

/// Events describing what reconciliation learned from the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum SessionEvent {
    /// A reconciliation pass resolved and its answer was applied.
    Reconciled {
        /// Whether the server reported an authenticated account.
        signed_in: bool,
    },
    /// Reconciliation found an authenticated account where there was none.
    SignedIn {
        /// Display name the account exposes, if any.
        display_name: Option<String>,
        /// Authentication method reported by the server (e.g., "basic", "digest").
        auth_method: Option<String>,
    },
    /// Reconciliation found no account where there previously was one.
    SignedOut,
}

impl SessionEvent {
    fn description(&self) -> &str {
        match self {
            SessionEvent::Reconciled { .. } => "Session reconciled with server",
            SessionEvent::SignedIn { .. } => "User signed in",
            SessionEvent::SignedOut => "User signed out",
        }
    }
}

// ============================================================================
// Flow Events
// ============================================================================

/// Events describing login, logout, and profile flows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum FlowEvent {
    /// An external login flow was opened.
    LoginStarted {
        /// Unique identifier for this flow.
        flow_id: String,
        /// Presentation mode ("popup" or "iframe").
        mode: String,
    },
    /// The external flow's completion signal fired.
    FlowCompleted {
        /// The flow that completed.
        flow_id: String,
    },
    /// A logout mechanism was selected and started.
    LogoutStarted {
        /// The mechanism in use ("logout_url" or "cache_clear").
        mechanism: String,
    },
    /// The logout request was rejected or never arrived.
    LogoutFailed {
        /// Endpoint the logout request targeted.
        endpoint: String,
        /// HTTP status when a response arrived at all.
        status: Option<u16>,
    },
    /// No mechanism exists to log the current session out.
    LogoutUnsupported,
    /// The profile dialog was shown.
    ProfileOpened,
    /// The profile content request failed.
    ProfileFetchFailed {
        /// Endpoint the profile request targeted.
        endpoint: String,
    },
}

impl FlowEvent {
    fn description(&self) -> &str {
        match self {
            FlowEvent::LoginStarted { .. } => "Login flow started",
            FlowEvent::FlowCompleted { .. } => "External flow completed",
            FlowEvent::LogoutStarted { .. } => "Logout started",
            FlowEvent::LogoutFailed { .. } => "Logout request failed",
            FlowEvent::LogoutUnsupported => "No logout mechanism available",
            FlowEvent::ProfileOpened => "Profile dialog opened",
            FlowEvent::ProfileFetchFailed { .. } => "Profile content fetch failed",
        }
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central event bus for publishing and subscribing to events.
///
/// Uses `tokio::sync::broadcast` internally, which provides:
/// - Multiple producers (clone the `EventBus`)
/// - Multiple consumers (each `subscribe()` creates a new receiver)
/// - Non-blocking sends (events are cloned for each subscriber)
/// - Lagging detection (slow subscribers get `RecvError::Lagged`)
///
/// # Example
///
/// ```rust
/// use core_runtime::events::{EventBus, CoreEvent, SessionEvent};
///
/// # #[tokio::main]
/// # async fn main() {
/// let event_bus = EventBus::new(100);
///
/// // Subscribe to events
/// let mut subscriber1 = event_bus.subscribe();
/// let mut subscriber2 = event_bus.subscribe();
///
/// // Emit an event
/// let event = CoreEvent::Session(SessionEvent::Reconciled { signed_in: true });
/// event_bus.emit(event).ok();
///
/// // Both subscribers receive the event
/// # tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
/// # }
/// ```
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CoreEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events to buffer per subscriber.
    ///   When a subscriber falls behind by more than this amount, it will
    ///   receive a `RecvError::Lagged` error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_runtime::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new event bus with the default buffer size.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_runtime::events::EventBus;
    ///
    /// let event_bus = EventBus::default();
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event.
    /// Returns an error if there are no active subscribers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_runtime::events::{EventBus, CoreEvent, SessionEvent};
    ///
    /// let event_bus = EventBus::new(100);
    /// let event = CoreEvent::Session(SessionEvent::SignedOut);
    ///
    /// match event_bus.emit(event) {
    ///     Ok(n) => println!("Event sent to {} subscribers", n),
    ///     Err(_) => println!("No active subscribers"),
    /// }
    /// ```
    pub fn emit(&self, event: CoreEvent) -> Result<usize, SendError<CoreEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber to receive events.
    ///
    /// Each call creates an independent receiver that will receive all future events.
    /// Past events are not replayed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use core_runtime::events::EventBus;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let event_bus = EventBus::new(100);
    /// let mut subscriber = event_bus.subscribe();
    ///
    /// tokio::spawn(async move {
    ///     while let Ok(event) = subscriber.recv().await {
    ///         println!("Received: {:?}", event);
    ///     }
    /// });
    /// # }
    /// ```
    pub fn subscribe(&self) -> Receiver<CoreEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_runtime::events::EventBus;
    ///
    /// let event_bus = EventBus::new(100);
    /// assert_eq!(event_bus.subscriber_count(), 0);
    ///
    /// let _subscriber = event_bus.subscribe();
    /// assert_eq!(event_bus.subscriber_count(), 1);
    /// ```
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

/// Type alias for event filter functions.
type EventFilter = Box<dyn Fn(&CoreEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with additional filtering capabilities.
///
/// This provides a more ergonomic API for consuming events with optional filtering
/// by event type or severity.
///
/// # Example
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream, CoreEvent};
///
/// # #[tokio::main]
/// # async fn main() {
/// let event_bus = EventBus::new(100);
/// let stream = EventStream::new(event_bus.subscribe());
///
/// // Filter for session events only
/// let mut session_stream = stream.filter(|event| {
///     matches!(event, CoreEvent::Session(_))
/// });
/// # }
/// ```
pub struct EventStream {
    receiver: Receiver<CoreEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    /// Creates a new event stream from a receiver.
    pub fn new(receiver: Receiver<CoreEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Adds a filter function to this stream.
    ///
    /// Only events that match the filter will be returned by `recv()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_runtime::events::{EventBus, EventStream, CoreEvent};
    ///
    /// let event_bus = EventBus::new(100);
    /// let stream = EventStream::new(event_bus.subscribe());
    ///
    /// let flow_stream = stream.filter(|event| {
    ///     matches!(event, CoreEvent::Flow(_))
    /// });
    /// ```
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CoreEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Receives the next event that passes the filter (if any).
    ///
    /// This will skip events that don't match the filter and return the next matching event.
    ///
    /// # Errors
    ///
    /// Returns `RecvError::Lagged(n)` if the subscriber fell behind by `n` events.
    /// Returns `RecvError::Closed` if all senders have been dropped.
    pub async fn recv(&mut self) -> Result<CoreEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;

            // If no filter, return immediately
            let Some(filter) = &self.filter else {
                return Ok(event);
            };

            // Apply filter
            if filter(&event) {
                return Ok(event);
            }

            // Event didn't match filter, continue to next event
        }
    }

    /// Attempts to receive an event without blocking.
    ///
    /// Returns `None` if no events are currently available.
    pub fn try_recv(&mut self) -> Option<Result<CoreEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    // If no filter, return immediately
                    let Some(filter) = &self.filter else {
                        return Some(Ok(event));
                    };

                    // Apply filter
                    if filter(&event) {
                        return Some(Ok(event));
                    }

                    // Event didn't match filter, continue
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus_creation() {
        let bus = EventBus::new(10);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_event_bus_subscription() {
        let bus = EventBus::new(10);
        let _sub1 = bus.subscribe();
        let _sub2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn test_event_emission_no_subscribers() {
        let bus = EventBus::new(10);
        let event = CoreEvent::Session(SessionEvent::SignedOut);

        // Should error when no subscribers
        assert!(bus.emit(event).is_err());
    }

    #[tokio::test]
    async fn test_event_emission_with_subscribers() {
        let bus = EventBus::new(10);
        let mut sub = bus.subscribe();

        let event = CoreEvent::Session(SessionEvent::SignedIn {
            display_name: Some("Jan".to_string()),
            auth_method: Some("basic".to_string()),
        });

        // Emit event
        let result = bus.emit(event.clone());
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 1);

        // Subscriber should receive it
        let received = sub.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_same_event() {
        let bus = EventBus::new(10);
        let mut sub1 = bus.subscribe();
        let mut sub2 = bus.subscribe();

        let event = CoreEvent::Flow(FlowEvent::LoginStarted {
            flow_id: "flow-1".to_string(),
            mode: "popup".to_string(),
        });

        bus.emit(event.clone()).ok();

        // Both should receive the event
        let received1 = sub1.recv().await.unwrap();
        let received2 = sub2.recv().await.unwrap();

        assert_eq!(received1, event);
        assert_eq!(received2, event);
    }

    #[tokio::test]
    async fn test_event_stream_without_filter() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());

        let event = CoreEvent::Flow(FlowEvent::LogoutStarted {
            mechanism: "logout_url".to_string(),
        });

        bus.emit(event.clone()).ok();

        let received = stream.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[tokio::test]
    async fn test_event_stream_with_filter() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe())
            .filter(|event| matches!(event, CoreEvent::Session(_)));

        // Emit flow event (should be filtered out)
        let flow_event = CoreEvent::Flow(FlowEvent::FlowCompleted {
            flow_id: "flow-1".to_string(),
        });
        bus.emit(flow_event).ok();

        // Emit session event (should pass through)
        let session_event = CoreEvent::Session(SessionEvent::Reconciled { signed_in: false });
        bus.emit(session_event.clone()).ok();

        // Should only receive the session event
        let received = stream.recv().await.unwrap();
        assert_eq!(received, session_event);
    }

    #[tokio::test]
    async fn test_lagged_subscriber() {
        let bus = EventBus::new(2); // Very small buffer
        let mut sub = bus.subscribe();

        // Emit more events than buffer size
        for i in 0..5 {
            let event = CoreEvent::Flow(FlowEvent::FlowCompleted {
                flow_id: format!("flow-{}", i),
            });
            bus.emit(event).ok();
        }

        // First recv should indicate lagging
        let result = sub.recv().await;
        assert!(matches!(result, Err(RecvError::Lagged(_))));
    }

    #[tokio::test]
    async fn test_event_severity() {
        let error_event = CoreEvent::Flow(FlowEvent::LogoutFailed {
            endpoint: "https://example.org/logout".to_string(),
            status: Some(500),
        });
        assert_eq!(error_event.severity(), EventSeverity::Error);

        let warning_event = CoreEvent::Flow(FlowEvent::LogoutUnsupported);
        assert_eq!(warning_event.severity(), EventSeverity::Warning);

        let info_event = CoreEvent::Session(SessionEvent::SignedOut);
        assert_eq!(info_event.severity(), EventSeverity::Info);

        let debug_event = CoreEvent::Session(SessionEvent::Reconciled { signed_in: true });
        assert_eq!(debug_event.severity(), EventSeverity::Debug);
    }

    #[tokio::test]
    async fn test_event_description() {
        let event = CoreEvent::Session(SessionEvent::SignedIn {
            display_name: None,
            auth_method: Some("digest".to_string()),
        });
        assert_eq!(event.description(), "User signed in");
    }

    #[tokio::test]
    async fn test_concurrent_publishers() {
        let bus = EventBus::new(100);
        let mut sub = bus.subscribe();

        let bus1 = bus.clone();
        let bus2 = bus.clone();

        // Spawn two concurrent publishers
        let handle1 = tokio::spawn(async move {
            for i in 0..10 {
                let event = CoreEvent::Flow(FlowEvent::FlowCompleted {
                    flow_id: format!("flow-{}", i),
                });
                bus1.emit(event).ok();
            }
        });

        let handle2 = tokio::spawn(async move {
            for _ in 0..10 {
                let event = CoreEvent::Session(SessionEvent::Reconciled { signed_in: true });
                bus2.emit(event).ok();
            }
        });

        // Wait for publishers
        handle1.await.ok();
        handle2.await.ok();

        // Should have received 20 events
        let mut count = 0;
        while sub.try_recv().is_ok() {
            count += 1;
        }
        assert_eq!(count, 20);
    }

    #[tokio::test]
    async fn test_event_serialization() {
        let event = CoreEvent::Flow(FlowEvent::LogoutFailed {
            endpoint: "https://example.org/logout".to_string(),
            status: Some(403),
        });

        // Serialize to JSON
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("logout"));
        assert!(json.contains("403"));

        // Deserialize back
        let deserialized: CoreEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_event_cloning() {
        let event = CoreEvent::Session(SessionEvent::SignedIn {
            display_name: Some("Jan".to_string()),
            auth_method: None,
        });

        let cloned = event.clone();
        assert_eq!(event, cloned);
    }

    #[tokio::test]
    async fn test_try_recv_empty() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());

        // Should return None when no events
        assert!(stream.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_try_recv_with_event() {
        let bus = EventBus::new(10);
        let mut stream = EventStream::new(bus.subscribe());

        let event = CoreEvent::Flow(FlowEvent::ProfileOpened);

        bus.emit(event.clone()).ok();

        // Give time for event to propagate
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        // Should receive the event
        let result = stream.try_recv();
        assert!(result.is_some());
        let received = result.unwrap().unwrap();
        assert_eq!(received, event);
    }
}
