use std::{
    any::Any,
    collections::HashMap,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{Arc, LazyLock},
};

use arc_swap::ArcSwap;
use warden_core::{
    Event, EventBus, EventPayload, HandlerError, PublishError, SharedHandler, Topic,
};

type Subscribers = HashMap<Topic, Vec<SharedHandler>>;

static GLOBAL_EVENT_BUS: LazyLock<Arc<DefaultEventBus>> =
    LazyLock::new(|| Arc::new(DefaultEventBus::new()));

/// In-process event bus.
///
/// Publishing reads an immutable snapshot of the subscriber table, so handlers
/// run without any lock held and may themselves subscribe or unsubscribe.
/// Subscription changes copy the table and swap it in.
#[derive(Default)]
pub struct DefaultEventBus {
    subscribers: ArcSwap<Subscribers>,
}

impl DefaultEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance for callers that do not wire their own bus.
    pub fn global() -> Arc<DefaultEventBus> {
        Arc::clone(&GLOBAL_EVENT_BUS)
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.subscribers
            .load()
            .get(&topic)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl EventBus for DefaultEventBus {
    fn publish(&self, topic: Topic, payload: EventPayload) -> Result<(), PublishError> {
        let snapshot = self.subscribers.load_full();
        let Some(handlers) = snapshot.get(&topic) else {
            tracing::trace!(%topic, "No subscribers");
            return Ok(());
        };

        let event = Event::new(topic, payload);
        let mut failures = Vec::new();

        for handler in handlers {
            let outcome = catch_unwind(AssertUnwindSafe(|| handler.handle(&event)))
                .unwrap_or_else(|panic| Err(HandlerError(panic_message(panic))));

            if let Err(e) = outcome {
                tracing::debug!(%topic, event_id = %event.id(), error = %e, "Event handler failed");
                failures.push(e);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PublishError { topic, failures })
        }
    }

    fn subscribe(&self, topic: Topic, handler: SharedHandler) -> bool {
        let mut added = false;
        self.subscribers.rcu(|current| {
            let mut next = Subscribers::clone(current);
            let handlers = next.entry(topic).or_default();
            added = !handlers.iter().any(|h| Arc::ptr_eq(h, &handler));
            if added {
                handlers.push(Arc::clone(&handler));
            }
            next
        });
        added
    }

    fn unsubscribe(&self, topic: Topic, handler: &SharedHandler) -> bool {
        let mut removed = false;
        self.subscribers.rcu(|current| {
            let mut next = Subscribers::clone(current);
            removed = false;
            if let Some(handlers) = next.get_mut(&topic) {
                let before = handlers.len();
                handlers.retain(|h| !Arc::ptr_eq(h, handler));
                removed = handlers.len() != before;
                if handlers.is_empty() {
                    next.remove(&topic);
                }
            }
            next
        });
        removed
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("handler panicked: {message}")
    } else {
        "handler panicked".to_string()
    }
}
