// src/bridge.rs
//! Event bridge: turns host render events into cookie operations and reports read
//! results back through the [`Host`].

mod component;
mod host;
mod protocol;
mod request;

pub use component::{CookieBridge, Dispatch};

pub use host::{Host, RecordingHost};

pub use protocol::{ComponentMessage, DataType, HostMessage, RenderEvent};

pub use request::{Request, DEFAULT_DAYS};
