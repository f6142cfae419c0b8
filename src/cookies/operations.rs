//! Write, read and delete on top of a [`CookieStore`].
//!
//! None of these fail: whatever the store refuses to keep simply isn't there on the next read.

use crate::cookies::cookie::{Cookie, SameSite, COOKIE_PATH, EXPIRED_MAX_AGE};
use crate::cookies::store::CookieStore;
use time::OffsetDateTime;

/// Writes `name=value` at root path with the given SameSite policy.
///
/// `days` of `None`, `0` or `NaN` writes a session cookie.
pub fn write<S>(store: &S, name: &str, value: &str, days: Option<f64>, same_site: SameSite)
where
    S: CookieStore + ?Sized,
{
    write_at(store, name, value, days, same_site, OffsetDateTime::now_utc());
}

/// Same as [`write`], with the expiration computed from `now`.
pub fn write_at<S>(
    store: &S,
    name: &str,
    value: &str,
    days: Option<f64>,
    same_site: SameSite,
    now: OffsetDateTime,
) where
    S: CookieStore + ?Sized,
{
    let mut cookie = Cookie::new(name, value).with_same_site(same_site);
    if let Some(days) = days.filter(|d| *d != 0.0 && !d.is_nan()) {
        cookie = cookie.expires_in_days(days, now);
    }

    let entry = cookie.to_entry();
    log::debug!("Cookie[{}]: write {}", name, entry);
    store.set(&entry);
}

/// Returns the value of the cookie called exactly `name`, if present.
pub fn read<S>(store: &S, name: &str) -> Option<String>
where
    S: CookieStore + ?Sized,
{
    let serialized = store.get();
    let value = pairs(&serialized)
        .find(|(n, _)| *n == name)
        .map(|(_, v)| v.to_string());
    value
}

/// Expires the cookie called `name` immediately.
pub fn delete<S>(store: &S, name: &str)
where
    S: CookieStore + ?Sized,
{
    log::debug!("Cookie[{}]: delete", name);
    store.set(&format!("{}=; Max-Age={}; path={};", name, EXPIRED_MAX_AGE, COOKIE_PATH));
}

/// Splits a serialized jar (`a=1; b=2`) into `(name, value)` pairs.
///
/// Pieces without `=` are nameless cookies and never match a lookup.
fn pairs(serialized: &str) -> impl Iterator<Item = (&str, &str)> {
    serialized
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.split_once('='))
        .map(|(n, v)| (n.trim(), v.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::InMemoryCookieStore;
    use std::cell::RefCell;
    use time::macros::datetime;
    use time::Duration;

    /// Store that only hands back a fixed serialized string and records writes.
    struct FixedStore {
        serialized: String,
        written: RefCell<Vec<String>>,
    }

    impl FixedStore {
        fn new(serialized: &str) -> Self {
            Self {
                serialized: serialized.to_string(),
                written: RefCell::new(Vec::new()),
            }
        }
    }

    impl CookieStore for FixedStore {
        fn get(&self) -> String {
            self.serialized.clone()
        }

        fn set(&self, entry: &str) {
            self.written.borrow_mut().push(entry.to_string());
        }
    }

    #[test]
    fn read_does_not_match_name_collisions() {
        let store = FixedStore::new("barfoo=2; foo=1; foobar=3");
        assert_eq!(read(&store, "foo").as_deref(), Some("1"));

        let store = FixedStore::new("barfoo=2; foobar=3");
        assert_eq!(read(&store, "foo"), None);
        assert_eq!(read(&store, "bar"), None);
    }

    #[test]
    fn read_handles_loose_spacing_and_empty_values() {
        let store = FixedStore::new("a=1;b=;  c=x=y ;nameless");
        assert_eq!(read(&store, "a").as_deref(), Some("1"));
        assert_eq!(read(&store, "b").as_deref(), Some(""));
        assert_eq!(read(&store, "c").as_deref(), Some("x=y"));
        assert_eq!(read(&store, "nameless"), None);
        assert_eq!(read(&FixedStore::new(""), "a"), None);
    }

    #[test]
    fn read_returns_first_match() {
        let store = FixedStore::new("dup=first; dup=second");
        assert_eq!(read(&store, "dup").as_deref(), Some("first"));
    }

    #[test]
    fn falsy_days_write_session_cookie() {
        let store = FixedStore::new("");
        write(&store, "a", "1", None, SameSite::Lax);
        write(&store, "b", "2", Some(0.0), SameSite::Lax);
        write(&store, "c", "3", Some(f64::NAN), SameSite::None);

        assert_eq!(
            *store.written.borrow(),
            vec![
                "a=1; path=/; SameSite=Lax",
                "b=2; path=/; SameSite=Lax",
                "c=3; path=/; SameSite=None",
            ]
        );
    }

    #[test]
    fn delete_writes_negative_max_age() {
        let store = FixedStore::new("");
        delete(&store, "session");
        assert_eq!(*store.written.borrow(), vec!["session=; Max-Age=-99999999; path=/;"]);
    }

    #[test]
    fn write_then_read_returns_value() {
        let store = InMemoryCookieStore::new();
        for (name, value) in [("token", "abc123"), ("empty", ""), ("spaced", "a b")] {
            write(&store, name, value, None, SameSite::Lax);
            assert_eq!(read(&store, name).as_deref(), Some(value));
        }
        assert!(store.entries().iter().all(|e| !e.contains("expires=")));
    }

    #[test]
    fn write_with_days_expires_days_later() {
        let now = datetime!(2025-06-01 08:30:00 UTC);
        let store = InMemoryCookieStore::at(now);
        write_at(&store, "remember", "yes", Some(3.0), SameSite::Lax, now);

        let cookie = store.cookie("remember").unwrap();
        assert_eq!(cookie.expires, Some(now + Duration::milliseconds(3 * 86_400_000)));
        assert_eq!(read(&store, "remember").as_deref(), Some("yes"));
    }

    #[test]
    fn write_uses_current_time() {
        let before = OffsetDateTime::now_utc();
        let store = InMemoryCookieStore::new();
        write(&store, "a", "1", Some(1.0), SameSite::Lax);

        // Entry dates have second precision
        let expires = store.cookie("a").unwrap().expires.unwrap();
        let expected = before + Duration::days(1);
        assert!((expires - expected).abs() <= Duration::seconds(5));
    }

    #[test]
    fn delete_then_read_returns_none() {
        let store = InMemoryCookieStore::new();
        write(&store, "a", "1", Some(7.0), SameSite::Strict);
        write(&store, "b", "2", None, SameSite::Lax);

        delete(&store, "a");
        assert_eq!(read(&store, "a"), None);
        assert_eq!(read(&store, "b").as_deref(), Some("2"));

        // Deleting something that never existed is harmless
        delete(&store, "ghost");
        assert_eq!(read(&store, "ghost"), None);
    }

    #[test]
    fn repeated_write_overwrites() {
        let store = InMemoryCookieStore::new();
        write(&store, "a", "1", None, SameSite::Lax);
        write(&store, "a", "2", None, SameSite::Lax);
        assert_eq!(read(&store, "a").as_deref(), Some("2"));
        assert_eq!(store.get(), "a=2");
    }
}
