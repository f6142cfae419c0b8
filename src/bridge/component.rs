//! The bridge component.
//!
//! [`CookieBridge::start`] announces the component to the host (ready, then a zero-height
//! frame) and returns a bridge that dispatches one render event at a time:
//!
//! | action   | effect                    | reports to host |
//! |----------|---------------------------|-----------------|
//! | `get`    | [`cookies::read`]         | yes, once       |
//! | `set`    | [`cookies::write`]        | no              |
//! | `delete` | [`cookies::delete`]       | no              |
//! | other    | nothing                   | no              |
//!
//! Writes and deletes never report, so the host does not re-run for them.

use crate::bridge::host::Host;
use crate::bridge::protocol::{HostMessage, RenderEvent};
use crate::bridge::request::Request;
use crate::config::BridgeConfig;
use crate::cookies::{self, CookieStore};
use crate::errors::BridgeError;

/// Outcome of a single render event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A read happened and its result was reported
    Read(Option<String>),
    /// A cookie was written
    Written,
    /// A cookie was expired
    Deleted,
    /// Nothing to do for this event
    Ignored,
}

pub struct CookieBridge<S: CookieStore, H: Host> {
    store: S,
    host: H,
    config: BridgeConfig,
}

impl<S: CookieStore, H: Host> CookieBridge<S, H> {
    /// Creates the bridge and performs the one-time handshake with the host.
    pub fn start(store: S, host: H, config: BridgeConfig) -> Self {
        let bridge = Self { store, host, config };

        log::info!("Cookie bridge ready (api version {})", bridge.config.api_version);
        report(bridge.host.set_component_ready(bridge.config.api_version));
        report(bridge.host.set_frame_height(bridge.config.frame_height));

        bridge
    }

    /// Decodes a raw host message and dispatches it when it is a render event.
    ///
    /// Returns an error only when `raw` is not a host message at all.
    pub fn handle_message(&mut self, raw: &str) -> Result<Dispatch, BridgeError> {
        match HostMessage::from_json(raw)? {
            HostMessage::Render(event) => Ok(self.handle_render(&event)),
            HostMessage::Other => Ok(Dispatch::Ignored),
        }
    }

    /// Runs the request carried by `event` to completion.
    pub fn handle_render(&mut self, event: &RenderEvent) -> Dispatch {
        match Request::from_args(&event.args) {
            Some(request) => self.dispatch(request),
            None => {
                log::debug!("Ignoring render event without a known action: {}", event.args);
                Dispatch::Ignored
            }
        }
    }

    fn dispatch(&mut self, request: Request) -> Dispatch {
        let action = request.action();
        log::debug!("Dispatching {} for {:?}", action, request.name());

        match request {
            Request::Get { name } => {
                let value = name.and_then(|n| cookies::read(&self.store, &n));
                report(self.host.set_component_value(value.clone()));
                Dispatch::Read(value)
            }
            Request::Set {
                name: Some(name),
                value,
                days,
                samesite,
            } => {
                cookies::write(
                    &self.store,
                    &name,
                    value.as_deref().unwrap_or_default(),
                    days,
                    samesite.unwrap_or(self.config.default_same_site),
                );
                Dispatch::Written
            }
            Request::Delete { name: Some(name) } => {
                cookies::delete(&self.store, &name);
                Dispatch::Deleted
            }
            Request::Set { name: None, .. } | Request::Delete { name: None } => {
                log::warn!("Ignoring {} request without a cookie name", action);
                Dispatch::Ignored
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

/// Host failures are logged, never surfaced.
fn report(result: Result<(), BridgeError>) {
    if let Err(e) = result {
        log::warn!("Cannot report to host: {}", e);
    }
}
