//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod bridge;
pub mod config;
pub mod settings;

pub use bridge::{BridgeError, CompilerBridge};
pub use config::SettingsService;
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings_from,
    save_settings_to, SettingsError,
};
