//! Wire contract of the sandboxed cell-builder frame.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every message on the channel carries this name; anything else is foreign.
pub const BRIDGE_NAME: &str = "nujan-ton-ide";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BridgeRequestKind {
    StateInitData,
    AbiData,
    Other(String),
}

impl BridgeRequestKind {
    pub fn as_str(&self) -> &str {
        match self {
            BridgeRequestKind::StateInitData => "state-init-data",
            BridgeRequestKind::AbiData => "abi-data",
            BridgeRequestKind::Other(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "state-init-data" => BridgeRequestKind::StateInitData,
            "abi-data" => BridgeRequestKind::AbiData,
            other => BridgeRequestKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub id: u64,
}

impl BridgeRequest {
    pub fn new(id: u64, kind: &BridgeRequestKind, code: impl Into<String>) -> Self {
        Self {
            name: BRIDGE_NAME.to_string(),
            kind: kind.as_str().to_string(),
            code: code.into(),
            id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeResponse {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Older frames do not echo the id back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// Delivers a serialized request to the frame (`postMessage` in the browser,
/// a channel in tests).
pub trait BridgeTransport: Send + Sync {
    fn post(&self, message: String) -> std::io::Result<()>;
}
