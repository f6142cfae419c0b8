use std::sync::{PoisonError, RwLock};

use time::{Duration, OffsetDateTime};

use crate::cookies::cookie::{parse_utc_string, Cookie, SameSite};
use crate::cookies::store::CookieStore;

/// In-memory cookie store (no persistence).
///
/// Entries are interpreted the way a browser treats `document.cookie` assignments:
/// - a cookie with the same name is replaced in place, otherwise appended;
/// - `Max-Age` wins over `Expires`; a non-positive `Max-Age` or a past `Expires`
///   removes the cookie;
/// - an unparsable `Expires` or `SameSite` attribute is ignored;
/// - `Secure`, `HttpOnly` and unknown attributes are ignored.
///
/// Every raw entry is also kept, in commit order, for inspection.
#[derive(Debug, Default)]
pub struct InMemoryCookieStore {
    /// Live cookies in creation order
    cookies: RwLock<Vec<Cookie>>,
    /// Raw entries as committed
    entries: RwLock<Vec<String>>,
    /// Fixed clock. `None` follows the system clock.
    now: Option<OffsetDateTime>,
}

impl InMemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose clock is frozen at `now`.
    pub fn at(now: OffsetDateTime) -> Self {
        Self {
            now: Some(now),
            ..Self::default()
        }
    }

    /// Returns the live cookie called `name`.
    pub fn cookie(&self, name: &str) -> Option<Cookie> {
        let now = self.now();
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| c.name == name && !c.is_expired(now))
            .cloned()
    }

    /// Returns every raw entry committed so far.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn now(&self) -> OffsetDateTime {
        self.now.unwrap_or_else(OffsetDateTime::now_utc)
    }
}

impl CookieStore for InMemoryCookieStore {
    fn get(&self) -> String {
        let now = self.now();
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| !c.is_expired(now))
            .map(|c| {
                if c.name.is_empty() {
                    c.value.clone()
                } else {
                    format!("{}={}", c.name, c.value)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set(&self, entry: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.to_string());

        let now = self.now();
        let cookie = parse_entry(entry, now);
        let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);

        if cookie.is_expired(now) {
            cookies.retain(|c| c.name != cookie.name);
        } else if let Some(existing) = cookies.iter_mut().find(|c| c.name == cookie.name) {
            *existing = cookie;
        } else {
            cookies.push(cookie);
        }
    }
}

/// Parses a `document.cookie` assignment into a cookie.
fn parse_entry(entry: &str, now: OffsetDateTime) -> Cookie {
    let (pair, attributes) = entry.split_once(';').unwrap_or((entry, ""));
    let (name, value) = match pair.split_once('=') {
        Some((name, value)) => (name.trim(), value.trim()),
        // A bare token is a nameless cookie
        None => ("", pair.trim()),
    };

    let mut cookie = Cookie::new(name, value);
    let mut max_age: Option<i64> = None;

    for part in attributes.split(';') {
        let Some((k, v)) = part.trim().split_once('=') else {
            continue;
        };

        match k.trim().to_ascii_lowercase().as_str() {
            "path" => cookie.path = v.trim().to_string(),
            "expires" => {
                if let Some(at) = parse_utc_string(v) {
                    cookie.expires = Some(at);
                }
            }
            "max-age" => {
                if let Ok(secs) = v.trim().parse::<i64>() {
                    max_age = Some(secs);
                }
            }
            "samesite" => {
                if let Ok(same_site) = v.parse::<SameSite>() {
                    cookie.same_site = same_site;
                }
            }
            _ => {}
        }
    }

    if let Some(secs) = max_age {
        cookie.expires = Some(if secs <= 0 {
            now
        } else {
            now.checked_add(Duration::seconds(secs))
                .unwrap_or_else(|| time::Date::MAX.midnight().assume_utc())
        });
    }

    cookie
}
