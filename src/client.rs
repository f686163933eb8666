//! High-level client — `BitbankClient` with builder and per-operation
//! request builders.
//!
//! One client owns one HTTP transport and one auth session; the feed
//! client is created on demand because its connection lifetime is
//! typically managed at the application layer.

use crate::auth::{Credential, Session};
use crate::error::{AuthError, SdkError};
use crate::http::{RequestBuilder, Transport};
use crate::ops::OperationDescriptor;
use crate::ws::{FeedClient, FeedConfig};

/// The primary entry point for the SDK.
#[derive(Debug)]
pub struct BitbankClient {
    transport: Transport,
    session: Session,
    feed_config: FeedConfig,
}

impl BitbankClient {
    pub fn builder() -> BitbankClientBuilder {
        BitbankClientBuilder::default()
    }

    /// New client with default endpoints and no credential.
    pub fn new() -> Result<Self, SdkError> {
        Self::builder().build()
    }

    /// Start building a call of the given operation.
    pub fn request(&self, descriptor: &'static OperationDescriptor) -> RequestBuilder<'_> {
        RequestBuilder::new(self, descriptor)
    }

    /// Create a new feed client from the current config.
    ///
    /// Not embedded in the client: the caller decides when to connect
    /// and how long the connection lives.
    pub fn feed(&self) -> FeedClient {
        FeedClient::new(self.feed_config.clone())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed_config
    }

    // ── Session passthroughs ─────────────────────────────────────────────

    pub fn set_credential(&self, credential: Credential) -> Result<(), AuthError> {
        self.session.set_credential(credential)
    }

    pub fn clear_credential(&self) {
        self.session.clear_credential()
    }

    /// Toggle dry-run mode: execution returns the constructed request
    /// instead of performing network I/O.
    pub fn set_debug(&self, on: bool) {
        self.session.set_debug(on)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct BitbankClientBuilder {
    feed_config: FeedConfig,
    credential: Option<Credential>,
    debug: bool,
}

impl Default for BitbankClientBuilder {
    fn default() -> Self {
        Self {
            feed_config: FeedConfig::default(),
            credential: None,
            debug: false,
        }
    }
}

impl BitbankClientBuilder {
    pub fn feed_url(mut self, url: &str) -> Self {
        self.feed_config.url = url.to_string();
        self
    }

    pub fn subscribe_key(mut self, key: &str) -> Self {
        self.feed_config.subscribe_key = key.to_string();
        self
    }

    /// Pre-set the credential on construction.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }

    pub fn build(self) -> Result<BitbankClient, SdkError> {
        let session = Session::new();
        if let Some(credential) = self.credential {
            session.set_credential(credential)?;
        }
        session.set_debug(self.debug);
        Ok(BitbankClient {
            transport: Transport::new()?,
            session,
            feed_config: self.feed_config,
        })
    }
}
