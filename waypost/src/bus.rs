//! In-memory event bus.

use indexmap::IndexMap;
use waypost_core::{ArcCallback, BoxError, EventBus, Payload};

/// An in-memory named-channel bus with sequential delivery.
///
/// Subscribers run in subscription order; the first subscriber error
/// stops delivery on that channel and is returned unmodified. This is
/// the standard [`EventBus`] for embedders without a host event system
/// of their own, and for tests.
pub struct ChannelBus<P: Payload> {
    channels: IndexMap<String, Vec<ArcCallback<P>>>,
}

impl<P: Payload> ChannelBus<P> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            channels: IndexMap::new(),
        }
    }

    /// The number of subscribers on a channel.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.channels.get(channel).map_or(0, Vec::len)
    }
}

impl<P: Payload> Default for ChannelBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> EventBus<P> for ChannelBus<P> {
    fn subscribe(&mut self, channel: &str, handler: ArcCallback<P>) {
        self.channels
            .entry(channel.to_string())
            .or_default()
            .push(handler);
    }

    fn emit(&self, channel: &str, payload: &P) -> Result<usize, BoxError> {
        let Some(handlers) = self.channels.get(channel) else {
            return Ok(0);
        };
        for handler in handlers {
            handler.invoke(payload)?;
        }
        Ok(handlers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelBus;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };
    use waypost_core::{BoxError, Callback, EventBus};

    struct OrderRecordingHandler {
        id: usize,
        order: Arc<Mutex<Vec<usize>>>,
    }

    impl Callback<String> for OrderRecordingHandler {
        fn invoke(&self, _payload: &String) -> Result<(), BoxError> {
            self.order.lock().unwrap().push(self.id);
            Ok(())
        }
    }

    struct FailingHandler;

    impl Callback<String> for FailingHandler {
        fn invoke(&self, _payload: &String) -> Result<(), BoxError> {
            Err("intentional failure".into())
        }
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = ChannelBus::<String>::new();
        for id in [1, 2, 3] {
            bus.subscribe(
                "evt",
                Arc::new(OrderRecordingHandler {
                    id,
                    order: order.clone(),
                }),
            );
        }

        let delivered = bus.emit("evt", &"payload".to_string()).unwrap();

        assert_eq!(delivered, 3);
        assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_emit_without_subscribers_reports_zero() {
        let bus = ChannelBus::<String>::new();
        assert_eq!(bus.emit("nobody", &"payload".to_string()).unwrap(), 0);
    }

    #[test]
    fn test_first_error_stops_delivery() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        let mut bus = ChannelBus::<String>::new();
        bus.subscribe("evt", Arc::new(FailingHandler));
        bus.subscribe(
            "evt",
            Arc::new(move |_payload: &String| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        let result = bus.emit("evt", &"payload".to_string());

        assert!(result.is_err(), "subscriber error must propagate");
        assert_eq!(
            count.load(Ordering::SeqCst),
            0,
            "delivery must stop at the first error"
        );
    }

    #[test]
    fn test_channels_are_independent() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut bus = ChannelBus::<String>::new();
        bus.subscribe(
            "a",
            Arc::new(OrderRecordingHandler {
                id: 1,
                order: order.clone(),
            }),
        );
        bus.subscribe(
            "b",
            Arc::new(OrderRecordingHandler {
                id: 2,
                order: order.clone(),
            }),
        );

        bus.emit("b", &"payload".to_string()).unwrap();

        assert_eq!(*order.lock().unwrap(), vec![2]);
        assert_eq!(bus.subscriber_count("a"), 1);
    }
}
