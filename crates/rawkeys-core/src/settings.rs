// Rawkeys Settings Module
// User configuration: hot-key suppression, pointer buttons, keymap overrides

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::key::parse_code;
use crate::pointer::{ButtonCapabilities, PointerButton};
use crate::{Key, TranslationTable, VirtualKey};

/// Settings read once when the input subsystem starts.
///
/// Loaded from a TOML file (default: ~/.config/rawkeys/settings.toml).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Ask the OS to deliver reserved hot-key combinations to us
    ignore_windows_key: bool,

    /// Pointer buttons reported as key events
    pointer_buttons: ButtonCapabilities,

    /// Virtual key -> application key overrides, in virtual-key order
    keymap: BTreeMap<VirtualKey, Key>,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    input: Option<InputSection>,

    #[serde(default)]
    pointer: Option<PointerSection>,

    #[serde(default)]
    keymap: Option<BTreeMap<String, toml::Value>>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct InputSection {
    #[serde(default)]
    ignore_windows_key: Option<toml::Value>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct PointerSection {
    #[serde(default)]
    buttons: Option<Vec<String>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let parsed: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(value) = parsed.input.and_then(|input| input.ignore_windows_key) {
            settings.ignore_windows_key = parse_bool_value(&value)?;
        }

        if let Some(names) = parsed.pointer.and_then(|pointer| pointer.buttons) {
            settings.pointer_buttons = names
                .iter()
                .map(|name| {
                    PointerButton::from_str(name).map_err(|_| {
                        SettingsError::InvalidValue(format!("Unknown pointer button '{}'", name))
                    })
                })
                .collect::<Result<ButtonCapabilities, _>>()?;
        }

        for (vk, value) in parsed.keymap.unwrap_or_default() {
            let vk = parse_virtual_key(&vk)?;
            let key = parse_key_value(&value)?;
            settings.keymap.insert(vk, key);
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rawkeys").join("settings.toml"))
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::new())
    }

    /// Reload settings from the file they were loaded from
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            *self = Self::from_file(path)?;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn ignore_windows_key(&self) -> bool {
        self.ignore_windows_key
    }

    pub fn set_ignore_windows_key(&mut self, value: bool) {
        self.ignore_windows_key = value;
    }

    pub fn pointer_buttons(&self) -> ButtonCapabilities {
        self.pointer_buttons
    }

    pub fn set_pointer_buttons(&mut self, buttons: ButtonCapabilities) {
        self.pointer_buttons = buttons;
    }

    pub fn keymap_overrides(&self) -> &BTreeMap<VirtualKey, Key> {
        &self.keymap
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The default table with this file's overrides applied.
    ///
    /// Overriding an entry with `0` unmaps that virtual key.
    pub fn translation_table(&self) -> TranslationTable {
        let mut table = TranslationTable::default();
        for (vk, key) in &self.keymap {
            table.set(*vk, *key);
        }
        table
    }
}

fn parse_virtual_key(raw: &str) -> Result<VirtualKey, SettingsError> {
    parse_code(raw)
        .map(VirtualKey)
        .filter(|vk| vk.index().is_some())
        .ok_or_else(|| SettingsError::InvalidValue(format!("Invalid virtual key '{}'", raw)))
}

fn parse_key_value(value: &toml::Value) -> Result<Key, SettingsError> {
    match value {
        toml::Value::Integer(code) => u16::try_from(*code)
            .map(Key)
            .map_err(|_| SettingsError::InvalidValue(format!("Key code {} out of range", code))),
        toml::Value::String(name) => Key::from_str(name).map_err(SettingsError::InvalidValue),
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to a key",
            value
        ))),
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// Default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Rawkeys Settings
# Place this file at: ~/.config/rawkeys/settings.toml

[input]
# Deliver reserved combinations (Windows key, Alt+Tab...) to the application
ignore_windows_key = false

[pointer]
# Pointer buttons reported as key events: left, right, middle, x1, x2
buttons = ["right"]

[keymap]
# Virtual key (decimal or 0x hex) -> application key (code or name)
# "0x14" = "LEFT_CTRL"
"#
}
