//! Realtime feed layer — frames, listener fan-out, native client.
//!
//! One multiplexed connection carries every subscribed channel. The
//! transport is `tokio-tungstenite`; [`native::FeedClient`] owns a
//! background task that manages the socket and dispatches inbound frames
//! to attached listeners.

pub mod dispatch;
pub mod native;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use dispatch::{Dispatcher, Listener, ListenerId};
pub use native::FeedClient;

// ─── Outbound messages ───────────────────────────────────────────────────────

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum MessageOut {
    #[serde(rename = "subscribe")]
    Subscribe { channels: Vec<String> },
    #[serde(rename = "unsubscribe")]
    Unsubscribe { channels: Vec<String> },
}

// ─── Inbound frames ──────────────────────────────────────────────────────────

/// Raw inbound frame: `{channel, message: {data: …}}`.
///
/// `message` is optional on the wire; frames without a payload are dropped
/// silently by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct Frame {
    pub channel: String,
    #[serde(default)]
    pub message: Option<Payload>,
}

/// The payload wrapper carried by every data frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    pub data: Value,
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    /// Key identifying the connection, appended to the URL query.
    pub subscribe_key: String,
    pub reconnect: bool,
    pub reconnect_delay_ms: u64,
    pub max_reconnect_attempts: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: crate::network::DEFAULT_FEED_URL.to_string(),
            subscribe_key: crate::network::DEFAULT_SUBSCRIBE_KEY.to_string(),
            reconnect: true,
            reconnect_delay_ms: 2000,
            max_reconnect_attempts: 10,
        }
    }
}

impl FeedConfig {
    /// Full connection URL with the subscribe key attached.
    pub fn connect_url(&self) -> String {
        format!(
            "{}?subscribe_key={}",
            self.url,
            urlencoding::encode(&self.subscribe_key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_serialization() {
        let msg = MessageOut::Subscribe {
            channels: vec!["ticker_btc_jpy".to_string()],
        };
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["type"], "subscribe");
        assert_eq!(parsed["channels"][0], "ticker_btc_jpy");
    }

    #[test]
    fn test_frame_without_message() {
        let frame: Frame = serde_json::from_str(r#"{"channel": "ticker_btc_jpy"}"#).unwrap();
        assert!(frame.message.is_none());
    }

    #[test]
    fn test_frame_with_payload() {
        let frame: Frame = serde_json::from_str(
            r#"{"channel": "depth_whole_btc_jpy", "message": {"data": {"bids": []}}}"#,
        )
        .unwrap();
        let payload = frame.message.unwrap();
        assert!(payload.data["bids"].is_array());
    }

    #[test]
    fn test_connect_url_carries_subscribe_key() {
        let config = FeedConfig {
            url: "wss://example.test/socket".to_string(),
            subscribe_key: "sub-key".to_string(),
            ..FeedConfig::default()
        };
        assert_eq!(
            config.connect_url(),
            "wss://example.test/socket?subscribe_key=sub-key"
        );
    }
}
