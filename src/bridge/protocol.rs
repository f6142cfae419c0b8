//! Wire format between the component and its host frame.
//!
//! Outbound messages are flat JSON objects flagged with `"isStreamlitMessage": true` and
//! discriminated by `"type"`. The only inbound message acted upon is the render event;
//! anything else decodes to [`HostMessage::Other`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::BridgeError;

/// Messages sent from the component to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ComponentMessage {
    /// The component is listening for render events
    #[serde(rename = "streamlit:componentReady", rename_all = "camelCase")]
    ComponentReady { api_version: u32 },

    /// Height of the iframe the host should reserve
    #[serde(rename = "streamlit:setFrameHeight")]
    SetFrameHeight { height: u32 },

    /// The single value returned to the host script
    #[serde(rename = "streamlit:setComponentValue", rename_all = "camelCase")]
    SetComponentValue {
        value: Option<String>,
        data_type: DataType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Json,
}

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "isStreamlitMessage")]
    is_streamlit_message: bool,
    #[serde(flatten)]
    message: &'a ComponentMessage,
}

impl ComponentMessage {
    /// Serializes the message into its framed JSON form.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(&Envelope {
            is_streamlit_message: true,
            message: self,
        })?)
    }
}

/// Messages received from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "streamlit:render")]
    Render(RenderEvent),

    #[serde(other)]
    Other,
}

/// A render notification. Only the argument bag matters here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RenderEvent {
    #[serde(default)]
    pub args: Value,
}

impl RenderEvent {
    pub fn new(args: Value) -> Self {
        Self { args }
    }
}

impl HostMessage {
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn framed(message: &ComponentMessage) -> Value {
        serde_json::from_str(&message.to_json().unwrap()).unwrap()
    }

    #[test]
    fn outbound_messages_are_framed() {
        assert_eq!(
            framed(&ComponentMessage::ComponentReady { api_version: 1 }),
            json!({"isStreamlitMessage": true, "type": "streamlit:componentReady", "apiVersion": 1})
        );
        assert_eq!(
            framed(&ComponentMessage::SetFrameHeight { height: 0 }),
            json!({"isStreamlitMessage": true, "type": "streamlit:setFrameHeight", "height": 0})
        );
        assert_eq!(
            framed(&ComponentMessage::SetComponentValue {
                value: Some("abc".into()),
                data_type: DataType::Json,
            }),
            json!({"isStreamlitMessage": true, "type": "streamlit:setComponentValue", "value": "abc", "dataType": "json"})
        );
    }

    #[test]
    fn missing_value_is_sent_as_null() {
        assert_eq!(
            framed(&ComponentMessage::SetComponentValue {
                value: None,
                data_type: DataType::Json,
            })["value"],
            Value::Null
        );
    }

    #[test]
    fn render_message_decodes_args() {
        let raw = r#"{"type":"streamlit:render","args":{"action":"get","name":"a"},"dfs":[],"disabled":false,"theme":{}}"#;
        assert_eq!(
            HostMessage::from_json(raw).unwrap(),
            HostMessage::Render(RenderEvent::new(json!({"action": "get", "name": "a"})))
        );

        let raw = r#"{"type":"streamlit:render"}"#;
        assert_eq!(
            HostMessage::from_json(raw).unwrap(),
            HostMessage::Render(RenderEvent::default())
        );
    }

    #[test]
    fn other_messages_are_recognized_or_rejected() {
        assert_eq!(
            HostMessage::from_json(r#"{"type":"devtools:ping","payload":1}"#).unwrap(),
            HostMessage::Other
        );
        assert!(matches!(
            HostMessage::from_json(r#"{"args":{}}"#),
            Err(BridgeError::Json(_))
        ));
        assert!(HostMessage::from_json("not json").is_err());
    }
}
