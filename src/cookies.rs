// src/cookies.rs
//! Cookies: [`Cookie`], the [`CookieStore`] capability, its backends and the
//! write / read / delete operations the bridge dispatches to.

mod cookie;
mod operations;
mod store;

pub use cookie::Cookie;
pub use cookie::SameSite;
pub use cookie::UnknownSameSite;
pub use cookie::COOKIE_PATH;
pub use cookie::EXPIRED_MAX_AGE;

pub use operations::{delete, read, write, write_at};

pub use store::CookieStore;
pub use store::InMemoryCookieStore;
#[cfg(target_arch = "wasm32")]
pub use store::DocumentCookieStore;
