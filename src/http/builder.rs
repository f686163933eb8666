//! Generic request builder — binds values to an operation descriptor via
//! validated setters and produces a transport-ready request.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::auth;
use crate::client::BitbankClient;
use crate::error::{AuthError, SdkError, ValidationError};
use crate::network::{PRIVATE_ENDPOINT, PUBLIC_ENDPOINT};
use crate::ops::{Host, HttpMethod, OperationDescriptor};

/// A fully constructed request: what would go on the wire.
///
/// In dry-run mode this is returned to the caller (serialized as JSON)
/// instead of being sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// Builder for one call of one operation.
///
/// Setters validate immediately; the required-field check and path
/// substitution happen at submission. Construction and validation are
/// identical for both execution modes.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    client: &'a BitbankClient,
    descriptor: &'static OperationDescriptor,
    params: BTreeMap<String, Value>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a BitbankClient, descriptor: &'static OperationDescriptor) -> Self {
        let params = descriptor
            .defaults
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        Self {
            client,
            descriptor,
            params,
        }
    }

    /// Bind one field, validating against its rule. Fails fast: a bad
    /// value is rejected here, not at submission.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Result<Self, SdkError> {
        let rule = self
            .descriptor
            .field(field)
            .map(|f| f.rule)
            .ok_or_else(|| ValidationError::UnknownField(field.to_string()))?;
        let bound = rule.check(field, value.into())?;
        self.params.insert(field.to_string(), bound);
        Ok(self)
    }

    /// Check required fields, substitute placeholders, build query/body,
    /// and (for private operations) sign.
    ///
    /// Consumes one nonce for private operations, in dry-run mode too.
    pub fn prepare(&self) -> Result<PreparedRequest, SdkError> {
        self.check_required()?;

        let path = self.substituted_path();
        let query = self.query_string();

        let (path_and_query, body) = match self.descriptor.method {
            HttpMethod::Get if !query.is_empty() => (format!("{path}?{query}"), String::new()),
            HttpMethod::Get => (path, String::new()),
            HttpMethod::Post => (path, self.json_body()?),
        };

        let host = match self.descriptor.host {
            Host::Public => PUBLIC_ENDPOINT,
            Host::Private => PRIVATE_ENDPOINT,
        };

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        if self.descriptor.private {
            let session = self.client.session();
            let credential = session.credential().ok_or(AuthError::MissingCredential)?;
            let nonce = session.next_nonce();
            let signed_string = match self.descriptor.method {
                HttpMethod::Get => path_and_query.as_str(),
                HttpMethod::Post => body.as_str(),
            };
            let signature = auth::sign(&credential.secret, nonce, signed_string)?;
            headers.insert("ACCESS-KEY".to_string(), credential.key);
            headers.insert("ACCESS-NONCE".to_string(), nonce.to_string());
            headers.insert("ACCESS-SIGNATURE".to_string(), signature);
        }

        Ok(PreparedRequest {
            method: self.descriptor.method.as_str().to_string(),
            url: format!("{host}{path_and_query}"),
            headers,
            body,
        })
    }

    /// Execute asynchronously. Suspends the caller without blocking other
    /// pending work; resolves with the decoded response or an error.
    pub async fn execute(self) -> Result<Value, SdkError> {
        let prepared = self.prepare()?;
        if self.client.session().debug() {
            return Ok(serde_json::to_value(&prepared)?);
        }
        self.client.transport().send(&prepared).await
    }

    /// Execute synchronously, stalling the calling thread until the HTTP
    /// exchange completes.
    ///
    /// For interactive call sites only — never invoke from the feed
    /// dispatch path or any async context.
    pub fn execute_blocking(self) -> Result<Value, SdkError> {
        let prepared = self.prepare()?;
        if self.client.session().debug() {
            return Ok(serde_json::to_value(&prepared)?);
        }
        self.client.transport().send_blocking(&prepared)
    }

    // ── Construction steps ───────────────────────────────────────────────

    /// Every missing required field and unbound placeholder, in one error.
    fn check_required(&self) -> Result<(), ValidationError> {
        let mut missing: Vec<String> = self
            .descriptor
            .required
            .iter()
            .filter(|name| !self.params.contains_key(**name))
            .map(|name| name.to_string())
            .collect();

        for placeholder in self.descriptor.placeholders() {
            if !self.params.contains_key(placeholder) && !missing.iter().any(|m| m == placeholder)
            {
                missing.push(placeholder.to_string());
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields { fields: missing })
        }
    }

    fn substituted_path(&self) -> String {
        self.descriptor
            .path
            .split('/')
            .map(|segment| {
                if segment.starts_with(':') {
                    self.params
                        .get(segment)
                        .map(render_plain)
                        .unwrap_or_default()
                } else {
                    segment.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Bound non-placeholder params as `k=v&…`, deterministic key order.
    fn query_string(&self) -> String {
        self.wire_params()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(&render_plain(value))))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn json_body(&self) -> Result<String, SdkError> {
        let map: serde_json::Map<String, Value> = self
            .wire_params()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if map.is_empty() {
            Ok(String::new())
        } else {
            Ok(serde_json::to_string(&Value::Object(map))?)
        }
    }

    fn wire_params(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params
            .iter()
            .filter(|(name, _)| !name.starts_with(':'))
    }
}

/// Render a bound value the way it appears in a path or query: strings
/// bare, numbers in their canonical form.
fn render_plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
