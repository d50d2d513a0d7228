//! 设置服务：持有当前工作区设置，支持运行时修改

use std::path::Path;
use std::time::Duration;

use super::settings::{load_settings_from, save_settings_to, SettingsError};
use crate::kernel::services::ports::settings::{EditorMode, Settings};
use crate::models::NetworkEnvironment;

pub struct SettingsService {
    settings: Settings,
}

impl SettingsService {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        Ok(Self::with_settings(load_settings_from(path)?))
    }

    /// 写回 `setting.json`；toggle/set 只改内存，调用方决定何时保存
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        save_settings_to(path, &self.settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn toggle_contract_debug(&mut self) -> bool {
        self.settings.contract_debug = !self.settings.contract_debug;
        self.settings.contract_debug
    }

    pub fn toggle_format_on_save(&mut self) -> bool {
        self.settings.format_on_save = !self.settings.format_on_save;
        self.settings.format_on_save
    }

    pub fn toggle_auto_build_and_deploy(&mut self) -> bool {
        self.settings.auto_build_and_deploy = !self.settings.auto_build_and_deploy;
        self.settings.auto_build_and_deploy
    }

    pub fn toggle_external_message(&mut self) -> bool {
        self.settings.external_message = !self.settings.external_message;
        self.settings.external_message
    }

    pub fn set_editor_mode(&mut self, mode: EditorMode) {
        self.settings.editor_mode = mode;
    }

    pub fn set_default_environment(&mut self, env: NetworkEnvironment) {
        self.settings.default_environment = env;
    }

    /// 只接受非负的十进制数，否则保持原值
    pub fn update_ton_amount_for_interaction(&mut self, amount: &str) -> bool {
        let amount = amount.trim();
        match amount.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                self.settings.ton_amount_for_interaction = amount.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn bridge_timeout(&self) -> Duration {
        Duration::from_millis(self.settings.bridge_timeout_ms.max(1))
    }
}

impl Default for SettingsService {
    fn default() -> Self {
        Self::new()
    }
}
