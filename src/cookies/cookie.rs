//! Cookie core types.
//!
//! [`Cookie`] is the record produced by a write and kept by the in-memory store.
//! It renders itself into the entry string a cookie store accepts:
//!
//! ```rust
//! use cookie_bridge::cookies::{Cookie, SameSite};
//!
//! let c = Cookie::new("session", "abc123").with_same_site(SameSite::Strict);
//! assert_eq!(c.to_entry(), "session=abc123; path=/; SameSite=Strict");
//! ```

use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// Path every write is scoped to.
pub const COOKIE_PATH: &str = "/";

/// Max-Age written on delete. Any non-positive value expires the cookie immediately.
pub const EXPIRED_MAX_AGE: i64 = -99_999_999;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Layout of `Date.prototype.toUTCString()`, e.g. `Thu, 01 Jan 1970 00:00:00 GMT`.
const UTC_STRING: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// SameSite policy of a cookie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl Display for SameSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown SameSite policy: {0}")]
pub struct UnknownSameSite(pub String);

impl FromStr for SameSite {
    type Err = UnknownSameSite;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val = s.trim();
        if val.eq_ignore_ascii_case("lax") {
            Ok(SameSite::Lax)
        } else if val.eq_ignore_ascii_case("strict") {
            Ok(SameSite::Strict)
        } else if val.eq_ignore_ascii_case("none") {
            Ok(SameSite::None)
        } else {
            Err(UnknownSameSite(val.to_string()))
        }
    }
}

/// A single cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name. Opaque, never validated.
    pub name: String,

    /// Raw cookie value, may be empty.
    pub value: String,

    /// Path scoping. Writes always use [`COOKIE_PATH`].
    pub path: String,

    /// Expiration moment. Session cookies have `None`.
    pub expires: Option<OffsetDateTime>,

    /// SameSite policy.
    pub same_site: SameSite,
}

impl Cookie {
    /// Creates a root-scoped `Lax` session cookie.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: COOKIE_PATH.to_string(),
            expires: None,
            same_site: SameSite::default(),
        }
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn with_expires(mut self, expires: OffsetDateTime) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Sets the expiration to `days * 86_400_000` milliseconds after `now`.
    ///
    /// Fractional and negative days are allowed. An offset outside the representable
    /// date range leaves the cookie as a session cookie.
    pub fn expires_in_days(mut self, days: f64, now: OffsetDateTime) -> Self {
        let millis = (days * MILLIS_PER_DAY) as i64;
        match now.checked_add(Duration::milliseconds(millis)) {
            Some(at) => self.expires = Some(at),
            None => log::warn!("Cookie[{}]: expiration of {} days is out of range", self.name, days),
        }
        self
    }

    /// Returns `true` when the cookie has an expiration at or before `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// Renders the cookie as a store entry:
    /// `name=value; [expires=<date>; ]path=/; SameSite=<policy>`.
    pub fn to_entry(&self) -> String {
        let expires = self
            .expires
            .and_then(format_utc_string)
            .map(|at| format!("; expires={}", at))
            .unwrap_or_default();

        format!(
            "{}={}{}; path={}; SameSite={}",
            self.name, self.value, expires, self.path, self.same_site
        )
    }
}

/// Formats a moment the way `Date.prototype.toUTCString()` does.
pub(crate) fn format_utc_string(at: OffsetDateTime) -> Option<String> {
    at.to_offset(time::UtcOffset::UTC).format(UTC_STRING).ok()
}

/// Parses a `toUTCString()`-style date. Returns `None` for anything else.
pub(crate) fn parse_utc_string(s: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(s.trim(), UTC_STRING)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}
