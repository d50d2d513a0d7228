//! Service ports: traits + data contracts.

pub mod bridge;
pub mod settings;

pub use bridge::{BridgeRequest, BridgeRequestKind, BridgeResponse, BridgeTransport, BRIDGE_NAME};
pub use settings::{EditorMode, Settings};
