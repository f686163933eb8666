//! Authentication — credential storage, monotonic nonce, request signing.
//!
//! ## Security Model
//!
//! - The credential lives in a private slot on the [`Session`]; an absent
//!   credential is a valid state (public-only usage).
//! - The nonce is seeded from wall-clock millis at session construction and
//!   is strictly increasing for the lifetime of that session. It is
//!   incremented exactly once per private call, before use, and never reset.
//! - Each session owns its nonce, so multiple sessions coexist safely.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

// ─── Credential ──────────────────────────────────────────────────────────────

/// An API key / secret pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub key: String,
    pub secret: String,
}

impl Credential {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Both parts non-empty and restricted to `[A-Za-z0-9/-]`.
    pub fn is_well_formed(&self) -> bool {
        fn ok(s: &str) -> bool {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '/' || c == '-')
        }
        ok(&self.key) && ok(&self.secret)
    }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Per-client auth state: credential slot + nonce counter + dry-run flag.
#[derive(Debug)]
pub struct Session {
    credential: RwLock<Option<Credential>>,
    nonce: AtomicU64,
    debug: AtomicBool,
}

impl Session {
    /// New session with the nonce seeded from the current wall clock.
    pub fn new() -> Self {
        let seed = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self {
            credential: RwLock::new(None),
            nonce: AtomicU64::new(seed),
            debug: AtomicBool::new(false),
        }
    }

    /// Store a credential after checking its shape.
    pub fn set_credential(&self, credential: Credential) -> Result<(), AuthError> {
        if !credential.is_well_formed() {
            return Err(AuthError::MalformedCredential);
        }
        *self.credential.write().expect("credential lock poisoned") = Some(credential);
        Ok(())
    }

    /// Clone out the current credential, if any.
    pub fn credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .expect("credential lock poisoned")
            .clone()
    }

    pub fn clear_credential(&self) {
        *self.credential.write().expect("credential lock poisoned") = None;
    }

    /// Increment the nonce and return the new value.
    ///
    /// Called exactly once per private request, before signing.
    pub fn next_nonce(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Enable or disable dry-run mode: when set, execution returns the
    /// constructed request instead of performing network I/O.
    pub fn set_debug(&self, on: bool) {
        self.debug.store(on, Ordering::SeqCst);
    }

    pub fn debug(&self) -> bool {
        self.debug.load(Ordering::SeqCst)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Signing ─────────────────────────────────────────────────────────────────

/// Hex HMAC-SHA256 over `nonce_string + message`, keyed by the secret.
///
/// A pure function of its inputs: identical `(secret, nonce, message)`
/// always yields the identical digest.
pub fn sign(secret: &str, nonce: u64, message: &str) -> Result<String, AuthError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::Signing(e.to_string()))?;
    mac.update(nonce.to_string().as_bytes());
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_shape() {
        assert!(Credential::new("AbC/123-x", "s3cr3t").is_well_formed());
        assert!(!Credential::new("", "s3cr3t").is_well_formed());
        assert!(!Credential::new("key with space", "s3cr3t").is_well_formed());
        assert!(!Credential::new("key", "secret!").is_well_formed());
    }

    #[test]
    fn test_set_credential_rejects_malformed() {
        let session = Session::new();
        let err = session.set_credential(Credential::new("bad key", "secret"));
        assert!(matches!(err, Err(AuthError::MalformedCredential)));
        assert!(session.credential().is_none());
    }

    #[test]
    fn test_credential_set_get_clear() {
        let session = Session::new();
        session
            .set_credential(Credential::new("key", "secret"))
            .unwrap();
        assert_eq!(session.credential().unwrap().key, "key");
        session.clear_credential();
        assert!(session.credential().is_none());
    }

    #[test]
    fn test_nonce_strictly_increases() {
        let session = Session::new();
        let before = session.next_nonce();
        let mut last = before;
        for _ in 0..100 {
            let n = session.next_nonce();
            assert!(n > last);
            last = n;
        }
        assert_eq!(last, before + 100);
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = Session::new();
        let b = Session::new();
        let a1 = a.next_nonce();
        b.next_nonce();
        b.next_nonce();
        assert_eq!(a.next_nonce(), a1 + 1);
    }

    #[test]
    fn test_sign_deterministic() {
        let d1 = sign("secret", 42, "/v1/user/assets").unwrap();
        let d2 = sign("secret", 42, "/v1/user/assets").unwrap();
        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 64);
        assert!(d1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sign_sensitive_to_each_input() {
        let base = sign("secret", 42, "message").unwrap();
        assert_ne!(base, sign("secret2", 42, "message").unwrap());
        assert_ne!(base, sign("secret", 43, "message").unwrap());
        assert_ne!(base, sign("secret", 42, "message2").unwrap());
    }

    #[test]
    fn test_sign_concatenates_nonce_before_message() {
        // Both produce the HMAC input "123x": the signed message is the
        // nonce-as-string immediately followed by the signed string.
        let a = sign("secret", 12, "3x").unwrap();
        let b = sign("secret", 1, "23x").unwrap();
        assert_eq!(a, b);
    }
}
