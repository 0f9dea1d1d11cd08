use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use serde_json::Value;

/// Callback invoked with the payload of one received event.
pub type EventHandler = Arc<dyn Fn(&Value) + Send + Sync>;

/// Per-event handler lists. Registration is additive, dispatch follows
/// registration order.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    inner: Arc<Mutex<HashMap<String, Vec<EventHandler>>>>,
}

impl HandlerRegistry {
    pub fn add(&self, event: &str, handler: EventHandler) {
        self.lock().entry(event.to_owned()).or_default().push(handler);
    }

    /// Invokes every handler registered for `event`, returning how many ran.
    pub fn dispatch(&self, event: &str, payload: &Value) -> usize {
        // Handlers run outside the lock so they may subscribe themselves.
        let handlers = self.lock().get(event).cloned().unwrap_or_default();
        for handler in &handlers {
            handler(payload);
        }
        handlers.len()
    }

    pub fn handler_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<EventHandler>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<String, usize> = self
            .lock()
            .iter()
            .map(|(event, handlers)| (event.clone(), handlers.len()))
            .collect();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;

    use super::*;

    fn counting_handler(counter: &Arc<AtomicUsize>) -> EventHandler {
        let counter = Arc::clone(counter);
        Arc::new(move |_payload: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn dispatch_without_handlers_invokes_nothing() {
        let registry = HandlerRegistry::default();

        assert_eq!(registry.dispatch("received_message", &json!({})), 0);
    }

    #[test]
    fn registrations_for_same_event_are_additive() {
        let registry = HandlerRegistry::default();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.add("received_message", counting_handler(&counter));
        registry.add("received_message", counting_handler(&counter));

        let invoked = registry.dispatch("received_message", &json!({}));

        assert_eq!(invoked, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(registry.handler_count("received_message"), 2);
    }

    #[test]
    fn dispatch_only_reaches_handlers_of_that_event() {
        let registry = HandlerRegistry::default();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.add("other", counting_handler(&counter));

        registry.dispatch("received_message", &json!({}));

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let registry = HandlerRegistry::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second"] {
            let order = Arc::clone(&order);
            registry.add(
                "evt",
                Arc::new(move |_payload: &Value| order.lock().expect("lock").push(label)),
            );
        }

        registry.dispatch("evt", &json!(null));

        assert_eq!(*order.lock().expect("lock"), vec!["first", "second"]);
    }

    #[test]
    fn handler_may_subscribe_during_dispatch() {
        let registry = HandlerRegistry::default();
        let inner = registry.clone();
        registry.add(
            "evt",
            Arc::new(move |_payload: &Value| inner.add("evt", Arc::new(|_payload: &Value| {}))),
        );

        registry.dispatch("evt", &json!(null));

        assert_eq!(registry.handler_count("evt"), 2);
    }
}
