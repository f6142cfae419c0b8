//! Requests carried in a render event's argument bag.
//!
//! The host builds them with [`Request::get`], [`Request::set`] and [`Request::delete`]
//! and ships [`Request::to_args`]. The bridge reads them back leniently with
//! [`Request::from_args`]: missing or ill-typed fields become `None` instead of errors.

use serde::Serialize;
use serde_json::{Number, Value};

use crate::cookies::SameSite;
use crate::errors::BridgeError;

/// Expiration used by [`Request::set`] unless overridden.
pub const DEFAULT_DAYS: f64 = 7.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    /// Read a cookie and report its value
    Get {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Write a cookie
    Set {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        /// `None` writes a session cookie
        #[serde(skip_serializing_if = "Option::is_none")]
        days: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        samesite: Option<SameSite>,
    },
    /// Expire a cookie
    Delete {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl Request {
    pub fn get(name: impl Into<String>) -> Self {
        Request::Get {
            name: Some(name.into()),
        }
    }

    /// A write that expires after [`DEFAULT_DAYS`] with a `Lax` policy.
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Request::Set {
            name: Some(name.into()),
            value: Some(value.into()),
            days: Some(DEFAULT_DAYS),
            samesite: Some(SameSite::Lax),
        }
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Request::Delete {
            name: Some(name.into()),
        }
    }

    /// Overrides the expiration of a set request. No effect on other actions.
    pub fn days(mut self, days: f64) -> Self {
        if let Request::Set { days: d, .. } = &mut self {
            *d = Some(days);
        }
        self
    }

    /// Turns a set request into a session cookie write.
    pub fn session(mut self) -> Self {
        if let Request::Set { days, .. } = &mut self {
            *days = None;
        }
        self
    }

    /// Overrides the SameSite policy of a set request.
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        if let Request::Set { samesite, .. } = &mut self {
            *samesite = Some(same_site);
        }
        self
    }

    /// The action discriminator as it appears on the wire.
    pub fn action(&self) -> &'static str {
        match self {
            Request::Get { .. } => "get",
            Request::Set { .. } => "set",
            Request::Delete { .. } => "delete",
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Request::Get { name } | Request::Set { name, .. } | Request::Delete { name } => {
                name.as_deref()
            }
        }
    }

    /// Serializes the request into the argument bag of a render event.
    pub fn to_args(&self) -> Result<Value, BridgeError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reads a request from a render event's argument bag.
    ///
    /// Returns `None` when `action` is missing or not one of `get`, `set`, `delete`.
    pub fn from_args(args: &Value) -> Option<Self> {
        let action = args.get("action").and_then(Value::as_str)?;
        let name = string_field(args, "name");

        match action {
            "get" => Some(Request::Get { name }),
            "set" => Some(Request::Set {
                name,
                value: args
                    .get("value")
                    .filter(|v| !is_falsy(v))
                    .and_then(|_| string_field(args, "value")),
                days: args.get("days").and_then(Value::as_f64),
                samesite: args
                    .get("samesite")
                    .and_then(Value::as_str)
                    .and_then(|s| match s.parse::<SameSite>() {
                        Ok(same_site) => Some(same_site),
                        Err(e) => {
                            log::warn!("{}, using the default policy", e);
                            None
                        }
                    }),
            }),
            "delete" => Some(Request::Delete { name }),
            _ => None,
        }
    }
}

/// Strings pass through, numbers and booleans are stringified, anything else is absent.
fn string_field(args: &Value, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Renders a number the way a script would interpolate it: `7.0` is `7`.
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

/// `null`, `false`, `0` and `""` write an empty value.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
