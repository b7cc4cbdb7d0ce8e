use std::{collections::HashMap, fs, time::Duration};

use client_core::ShellConfig;
use tracing::warn;

pub const SETTINGS_FILE: &str = "shell.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub shell: ShellConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            shell: ShellConfig::default(),
        }
    }
}

/// Defaults, then `shell.toml`, then `SHELL_*` / `APP__*` environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!(file = SETTINGS_FILE, error = %err, "ignoring unreadable settings file");
            return;
        }
    };

    for (key, value) in &file_cfg {
        apply_value(settings, key, value);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    for key in [
        "log_filter",
        "login_delay_ms",
        "home_load_delay_ms",
        "finance_load_delay_ms",
    ] {
        let upper = key.to_ascii_uppercase();
        for var in [format!("SHELL_{upper}"), format!("APP__{upper}")] {
            if let Some(value) = lookup(&var) {
                apply_value(settings, key, &value);
            }
        }
    }
}

fn apply_value(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "log_filter" => settings.log_filter = value.to_string(),
        "login_delay_ms" => set_millis(&mut settings.shell.login_delay, key, value),
        "home_load_delay_ms" => set_millis(&mut settings.shell.home_load_delay, key, value),
        "finance_load_delay_ms" => set_millis(&mut settings.shell.finance_load_delay, key, value),
        _ => warn!(key, "ignoring unknown setting"),
    }
}

fn set_millis(target: &mut Duration, key: &str, value: &str) {
    match value.trim().parse::<u64>() {
        Ok(ms) => *target = Duration::from_millis(ms),
        Err(_) => warn!(key, value, "ignoring non-numeric delay"),
    }
}
