//! Browser entry point.
//!
//! Binds the bridge to `document.cookie`, posts to the parent frame and listens for the
//! host's `message` events on the window.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{MessageEvent, Window};

use crate::bridge::{ComponentMessage, CookieBridge, Host};
use crate::config::BridgeConfig;
use crate::cookies::DocumentCookieStore;
use crate::errors::BridgeError;

/// Host reached through `postMessage` on the embedding window.
struct PostMessageHost {
    target: Window,
}

impl Host for PostMessageHost {
    fn post(&self, message: &ComponentMessage) -> Result<(), BridgeError> {
        let payload = js_sys::JSON::parse(&message.to_json()?)
            .map_err(|e| BridgeError::Transport(format!("{:?}", e)))?;
        self.target
            .post_message(&payload, "*")
            .map_err(|e| BridgeError::Transport(format!("{:?}", e)))
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    attach().map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn attach() -> anyhow::Result<()> {
    let window = web_sys::window().ok_or(BridgeError::Unavailable("window"))?;
    let parent = window
        .parent()
        .map_err(js_error)?
        .ok_or(BridgeError::Unavailable("parent window"))?;

    let store = DocumentCookieStore::new()?;
    let host = PostMessageHost { target: parent };
    let bridge = Rc::new(RefCell::new(CookieBridge::start(store, host, BridgeConfig::default())));

    let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
        let Some(raw) = message_text(&event.data()) else {
            return;
        };
        if let Err(e) = bridge.borrow_mut().handle_message(&raw) {
            log::debug!("Ignoring window message: {}", e);
        }
    });

    window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
        .map_err(js_error)?;
    // The listener lives as long as the page
    on_message.forget();

    Ok(())
}

/// JSON text of a message payload. `None` for payloads JSON cannot represent
/// (`undefined`, functions, cyclic objects).
fn message_text(data: &JsValue) -> Option<String> {
    js_sys::JSON::stringify(data).ok().and_then(|s| s.as_string())
}

fn js_error(value: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", value)
}
