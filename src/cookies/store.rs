//! Cookie store capability.
//!
//! A **cookie store** is the ambient key/value jar cookies live in. It is shaped after
//! `document.cookie`: reading yields every visible cookie serialized as `name=value`
//! pairs joined by `; `, writing commits one entry string at a time and lets the store
//! apply its own rules (overwrite by name, expiry, rejection of malformed input).
//!
//! Backends:
//! - [`InMemoryCookieStore`]: interprets entries like a browser does, for tests and
//!   native hosts.
//! - `DocumentCookieStore` (wasm32 only): the page's real `document.cookie`.
mod in_memory;
#[cfg(target_arch = "wasm32")]
mod document;

pub use in_memory::InMemoryCookieStore;
#[cfg(target_arch = "wasm32")]
pub use document::DocumentCookieStore;

/// The serialized cookie jar the operations work on.
///
/// Implementations never fail: an entry the store cannot accept is dropped.
pub trait CookieStore {
    /// Returns all visible cookies as `name=value` pairs joined by `; `.
    fn get(&self) -> String;

    /// Commits a single entry such as `name=value; path=/; SameSite=Lax`.
    fn set(&self, entry: &str);
}
