use serde::{Deserialize, Serialize};

use crate::models::NetworkEnvironment;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Default,
    Vim,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub contract_debug: bool,
    pub format_on_save: bool,
    pub auto_build_and_deploy: bool,
    /// TON attached to getter/setter calls, kept as the user typed it
    pub ton_amount_for_interaction: String,
    pub editor_mode: EditorMode,
    pub external_message: bool,
    pub default_environment: NetworkEnvironment,
    pub bridge_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            contract_debug: false,
            format_on_save: false,
            auto_build_and_deploy: true,
            ton_amount_for_interaction: "0.05".to_string(),
            editor_mode: EditorMode::Default,
            external_message: false,
            default_environment: NetworkEnvironment::Sandbox,
            bridge_timeout_ms: 10_000,
        }
    }
}
