//! # bitbank SDK
//!
//! A Rust client toolkit for the bitbank exchange: validated REST
//! request building with HMAC signing, a push-feed client, and
//! app-owned market state containers.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, wire types, errors, network constants
//! 2. **Auth** — Credential session, monotonic nonce, HMAC-SHA256 signing
//! 3. **Operations** — Static descriptors for every REST operation
//! 4. **HTTP** — Generic validated request builder + transport (async and blocking)
//! 5. **Feed** — `FeedClient` over one multiplexed WebSocket connection
//! 6. **High-Level Client** — `BitbankClient`, the primary entry point
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bitbank_sdk::prelude::*;
//!
//! let client = BitbankClient::new()?;
//!
//! let ticker = client
//!     .request(&bitbank_sdk::ops::public::TICKER)
//!     .set(":pair", "btc_jpy")?
//!     .execute()
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all modules.
pub mod shared;

/// Market state containers: order book, executions, tickers, products.
pub mod market;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: credential session, nonce, request signing.
pub mod auth;

// ── Layer 3: Operations ──────────────────────────────────────────────────────

/// Static operation descriptors and validation rules.
pub mod ops;

// ── Layer 4: HTTP ────────────────────────────────────────────────────────────

/// Request builder and HTTP transport.
pub mod http;

// ── Layer 5: Feed ────────────────────────────────────────────────────────────

/// Push-feed client: frames, listener fan-out, native transport.
pub mod ws;

// ── Layer 6: High-Level Client ───────────────────────────────────────────────

/// `BitbankClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CandleType, OrderType, Pair, Side, SortOrder};

    // Market state containers
    pub use crate::market::{
        Execution, ExecutionBuffer, ExecutionStats, Health, OrderBook, Product, Ticker,
        TickerBoard,
    };

    // Wire types
    pub use crate::market::{DepthData, SpotStatusData, TickerData, TransactionData};

    // Errors
    pub use crate::error::{
        AuthError, FeedError, NetworkError, SdkError, ValidationError,
    };

    // Network
    pub use crate::network::{DEFAULT_FEED_URL, PRIVATE_ENDPOINT, PUBLIC_ENDPOINT};

    // Auth
    pub use crate::auth::{Credential, Session};

    // Operations + request building
    pub use crate::http::{PreparedRequest, RequestBuilder};
    pub use crate::ops::OperationDescriptor;

    // Client
    pub use crate::client::{BitbankClient, BitbankClientBuilder};

    // Feed
    pub use crate::ws::{FeedClient, FeedConfig, Frame, Listener, ListenerId, Payload};
}
