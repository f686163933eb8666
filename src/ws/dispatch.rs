//! Listener registry and frame fan-out.
//!
//! The dispatcher is owned by the feed task; attach/detach arrive as
//! commands on the same channel as everything else, so the listener list
//! never mutates in the middle of a dispatch pass.

use crate::ws::{Frame, Payload};

/// Callback invoked with `(channel, payload)` for every data frame.
pub type Listener = Box<dyn FnMut(&str, &Payload) + Send>;

/// Handle for detaching a previously attached listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Ordered listener set with synchronous fan-out.
#[derive(Default)]
pub struct Dispatcher {
    listeners: Vec<(ListenerId, Listener)>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, id: ListenerId, listener: Listener) {
        self.listeners.push((id, listener));
    }

    /// No-op when the id was never attached (or already detached).
    pub fn detach(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every listener with the frame's payload, in attachment
    /// order. Frames without a payload are dropped silently.
    pub fn dispatch(&mut self, frame: &Frame) {
        let Some(payload) = &frame.message else {
            tracing::debug!(channel = %frame.channel, "dropping frame without payload");
            return;
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&frame.channel, payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    fn data_frame(channel: &str, data: serde_json::Value) -> Frame {
        Frame {
            channel: channel.to_string(),
            message: Some(Payload { data }),
        }
    }

    #[test]
    fn test_dispatch_in_attachment_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();
        for tag in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            dispatcher.attach(
                ListenerId(tag.len() as u64),
                Box::new(move |channel: &str, _: &Payload| {
                    seen.lock().unwrap().push(format!("{tag}:{channel}"));
                }),
            );
        }

        dispatcher.dispatch(&data_frame("ticker_btc_jpy", json!({"last": "100"})));

        assert_eq!(
            *seen.lock().unwrap(),
            [
                "first:ticker_btc_jpy",
                "second:ticker_btc_jpy",
                "third:ticker_btc_jpy"
            ]
        );
    }

    #[test]
    fn test_payloadless_frame_dropped() {
        let count = Arc::new(Mutex::new(0));
        let mut dispatcher = Dispatcher::new();
        {
            let count = Arc::clone(&count);
            dispatcher.attach(
                ListenerId(1),
                Box::new(move |_: &str, _: &Payload| {
                    *count.lock().unwrap() += 1;
                }),
            );
        }

        dispatcher.dispatch(&Frame {
            channel: "ticker_btc_jpy".to_string(),
            message: None,
        });
        assert_eq!(*count.lock().unwrap(), 0);

        dispatcher.dispatch(&data_frame("ticker_btc_jpy", json!({})));
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_detach_unknown_is_noop() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.attach(ListenerId(1), Box::new(|_: &str, _: &Payload| {}));
        dispatcher.detach(ListenerId(99));
        assert_eq!(dispatcher.len(), 1);
        dispatcher.detach(ListenerId(1));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_payload_passed_through() {
        let last = Arc::new(Mutex::new(json!(null)));
        let mut dispatcher = Dispatcher::new();
        {
            let last = Arc::clone(&last);
            dispatcher.attach(
                ListenerId(1),
                Box::new(move |_: &str, payload: &Payload| {
                    *last.lock().unwrap() = payload.data.clone();
                }),
            );
        }

        dispatcher.dispatch(&data_frame("transactions_xrp_jpy", json!({"price": "50.1"})));
        assert_eq!(last.lock().unwrap()["price"], "50.1");
    }
}
