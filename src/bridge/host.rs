use std::sync::{Mutex, PoisonError};

use crate::bridge::protocol::{ComponentMessage, DataType};
use crate::errors::BridgeError;

/// The embedding application, as seen from the component.
///
/// Only [`Host::post`] must be implemented; the lifecycle calls are built on top of it.
pub trait Host {
    /// Delivers one message to the host.
    fn post(&self, message: &ComponentMessage) -> Result<(), BridgeError>;

    /// Tells the host the component listens for render events.
    fn set_component_ready(&self, api_version: u32) -> Result<(), BridgeError> {
        self.post(&ComponentMessage::ComponentReady { api_version })
    }

    /// Declares the height of the component's frame.
    fn set_frame_height(&self, height: u32) -> Result<(), BridgeError> {
        self.post(&ComponentMessage::SetFrameHeight { height })
    }

    /// Reports the single result value back to the host.
    fn set_component_value(&self, value: Option<String>) -> Result<(), BridgeError> {
        self.post(&ComponentMessage::SetComponentValue {
            value,
            data_type: DataType::Json,
        })
    }
}

/// Host that keeps every message it receives. Used where there is no real frame to talk to.
#[derive(Debug, Default)]
pub struct RecordingHost {
    messages: Mutex<Vec<ComponentMessage>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far, in order.
    pub fn messages(&self) -> Vec<ComponentMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the reported component values, in order.
    pub fn values(&self) -> Vec<Option<String>> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                ComponentMessage::SetComponentValue { value, .. } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Forgets everything received so far.
    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Host for RecordingHost {
    fn post(&self, message: &ComponentMessage) -> Result<(), BridgeError> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_calls_post_messages() {
        let host = RecordingHost::new();
        host.set_component_ready(1).unwrap();
        host.set_frame_height(0).unwrap();
        host.set_component_value(None).unwrap();
        host.set_component_value(Some("v".into())).unwrap();

        assert_eq!(
            host.messages(),
            vec![
                ComponentMessage::ComponentReady { api_version: 1 },
                ComponentMessage::SetFrameHeight { height: 0 },
                ComponentMessage::SetComponentValue {
                    value: None,
                    data_type: DataType::Json
                },
                ComponentMessage::SetComponentValue {
                    value: Some("v".into()),
                    data_type: DataType::Json
                },
            ]
        );
        assert_eq!(host.values(), vec![None, Some("v".to_string())]);

        host.clear();
        assert!(host.messages().is_empty());
    }
}
