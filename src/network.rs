//! Network endpoint constants for the bitbank SDK.

use std::time::Duration;

/// Public (unauthenticated) REST API host.
pub const PUBLIC_ENDPOINT: &str = "https://public.bitbank.cc";

/// Private (authenticated) REST API host.
pub const PRIVATE_ENDPOINT: &str = "https://api.bitbank.cc";

/// Default realtime feed URL.
pub const DEFAULT_FEED_URL: &str = "wss://stream.bitbank.cc/socket";

/// Default subscribe key identifying the feed connection.
pub const DEFAULT_SUBSCRIBE_KEY: &str = "sub-c-e12e9174-dd60-11e6-806b-02ee2ddab7fe";

/// Connect and total timeout applied to every outbound HTTP call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);
