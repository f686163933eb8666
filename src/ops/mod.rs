//! Operation descriptors — static, data-driven definitions of every REST
//! operation the exchange offers.
//!
//! One generic [`crate::http::builder::RequestBuilder`] consumes these
//! tables; there is no per-operation request type. Each descriptor names
//! its HTTP method, path template, host, auth requirement, field rules,
//! required fields, and default parameter values.

pub mod private;
pub mod public;

use serde_json::Value;

use crate::error::ValidationError;

// ─── Method / host ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Which REST host serves the operation. Authentication is a separate
/// property: the spot status listing lives on the private host but is
/// callable without a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    Public,
    Private,
}

// ─── Validation rules ────────────────────────────────────────────────────────

/// Per-field validation rule, applied by the builder at set-time.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Any JSON string.
    Str,
    /// Any JSON number.
    Num,
    /// A JSON number with an integral value.
    Int,
    /// A JSON array of integral numbers.
    IntArray,
    /// A string drawn from a fixed set; matched case-insensitively and
    /// normalized to lower case before storage.
    Enum(&'static [&'static str]),
    /// A digit string (or integer) whose length is one of the allowed set.
    Digits(&'static [usize]),
}

impl Rule {
    /// Validate `value`, returning the (possibly normalized) value to bind.
    pub fn check(&self, field: &str, value: Value) -> Result<Value, ValidationError> {
        let violation = |rule: &Rule| ValidationError::Field {
            field: field.to_string(),
            rule: rule.to_string(),
        };

        match self {
            Rule::Str => match value {
                Value::String(_) => Ok(value),
                _ => Err(violation(self)),
            },
            Rule::Num => match value {
                Value::Number(_) => Ok(value),
                _ => Err(violation(self)),
            },
            Rule::Int => match &value {
                Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value),
                _ => Err(violation(self)),
            },
            Rule::IntArray => match &value {
                Value::Array(items)
                    if items
                        .iter()
                        .all(|v| v.as_i64().is_some() || v.as_u64().is_some()) =>
                {
                    Ok(value)
                }
                _ => Err(violation(self)),
            },
            Rule::Enum(members) => match &value {
                Value::String(s) => {
                    let lowered = s.to_lowercase();
                    if members.contains(&lowered.as_str()) {
                        Ok(Value::String(lowered))
                    } else {
                        Err(violation(self))
                    }
                }
                _ => Err(violation(self)),
            },
            Rule::Digits(lengths) => {
                let text = match &value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return Err(violation(self)),
                };
                if text.chars().all(|c| c.is_ascii_digit()) && lengths.contains(&text.len()) {
                    Ok(Value::String(text))
                } else {
                    Err(violation(self))
                }
            }
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Str => write!(f, "type string"),
            Rule::Num => write!(f, "type number"),
            Rule::Int => write!(f, "type integer"),
            Rule::IntArray => write!(f, "array of integers"),
            Rule::Enum(members) => write!(f, "one of [{}]", members.join(", ")),
            Rule::Digits(lengths) => {
                let lens: Vec<String> = lengths.iter().map(|n| n.to_string()).collect();
                write!(f, "digit string of length {}", lens.join(" or "))
            }
        }
    }
}

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// A settable parameter of an operation.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Path placeholders carry a leading `:` (e.g. `":pair"`); everything
    /// else becomes a query or body parameter.
    pub name: &'static str,
    pub rule: Rule,
}

/// Static definition of one exchange operation. Immutable once defined.
#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor {
    pub method: HttpMethod,
    pub path: &'static str,
    pub host: Host,
    /// Whether the call must carry nonce + signature headers.
    pub private: bool,
    pub fields: &'static [Field],
    pub required: &'static [&'static str],
    pub defaults: &'static [(&'static str, &'static str)],
}

impl OperationDescriptor {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Placeholder names appearing in the path template, leading `:` kept.
    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.path
            .split('/')
            .filter(|segment| segment.starts_with(':'))
    }
}
