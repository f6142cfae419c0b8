use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::cookies::store::CookieStore;
use crate::errors::BridgeError;

/// The browser's own cookie jar, reached through `document.cookie`.
pub struct DocumentCookieStore {
    document: HtmlDocument,
}

impl DocumentCookieStore {
    /// Binds to the document of the current window.
    pub fn new() -> Result<Self, BridgeError> {
        let document = web_sys::window()
            .ok_or(BridgeError::Unavailable("window"))?
            .document()
            .ok_or(BridgeError::Unavailable("document"))?
            .dyn_into::<HtmlDocument>()
            .map_err(|_| BridgeError::Unavailable("html document"))?;

        Ok(Self { document })
    }
}

impl CookieStore for DocumentCookieStore {
    fn get(&self) -> String {
        self.document.cookie().unwrap_or_else(|e| {
            log::warn!("Cannot read document.cookie: {:?}", e);
            String::new()
        })
    }

    fn set(&self, entry: &str) {
        if let Err(e) = self.document.set_cookie(entry) {
            log::warn!("Cannot write document.cookie: {:?}", e);
        }
    }
}
