use std::sync::Arc;

use thiserror::Error;

use crate::events::{Event, EventPayload, Topic};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Event handler failed: {0}")]
pub struct HandlerError(pub String);

impl From<&str> for HandlerError {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for HandlerError {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Failures collected while delivering one event. Every subscriber still
/// received the event.
#[derive(Debug, Error)]
#[error("{} event handler(s) failed for topic {}", .failures.len(), .topic)]
pub struct PublishError {
    pub topic: Topic,
    pub failures: Vec<HandlerError>,
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event) -> Result<(), HandlerError>;
}

impl<F> EventHandler for F
where
    F: Fn(&Event) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        self(event)
    }
}

/// Handlers are identified by their `Arc` allocation, so subscribing a clone
/// of the same `Arc` twice is a no-op.
pub type SharedHandler = Arc<dyn EventHandler>;

pub trait EventBus: Send + Sync {
    /// Deliver `payload` to every handler subscribed to `topic`, in
    /// subscription order.
    fn publish(&self, topic: Topic, payload: EventPayload) -> Result<(), PublishError>;

    /// Returns `false` if the handler was already subscribed.
    fn subscribe(&self, topic: Topic, handler: SharedHandler) -> bool;

    /// Returns `false` if the handler was not subscribed.
    fn unsubscribe(&self, topic: Topic, handler: &SharedHandler) -> bool;
}

impl<B: EventBus + ?Sized> EventBus for Arc<B> {
    fn publish(&self, topic: Topic, payload: EventPayload) -> Result<(), PublishError> {
        (**self).publish(topic, payload)
    }

    fn subscribe(&self, topic: Topic, handler: SharedHandler) -> bool {
        (**self).subscribe(topic, handler)
    }

    fn unsubscribe(&self, topic: Topic, handler: &SharedHandler) -> bool {
        (**self).unsubscribe(topic, handler)
    }
}
