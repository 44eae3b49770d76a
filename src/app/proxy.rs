//! Defines an abstraction over the event sending mechanism.

use super::events::UserEvent;
use tao::event_loop::EventLoopProxy;

/// A trait that abstracts the sending of user events.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}

/// Implement the trait for the real `tao::event_loop::EventLoopProxy`.
impl EventProxy for EventLoopProxy<UserEvent> {
    fn send_event(&self, event: UserEvent) {
        // The event loop only goes away on shutdown, so a failed send is logged and dropped.
        if let Err(e) = EventLoopProxy::send_event(self, event) {
            tracing::warn!("Failed to send event to event loop: {}", e);
        }
    }
}
