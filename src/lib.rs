pub mod bridge;
pub mod config;
pub mod cookies;
pub mod errors;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use bridge::{CookieBridge, Dispatch, Host};
pub use config::BridgeConfig;
pub use cookies::CookieStore;
pub use errors::BridgeError;
