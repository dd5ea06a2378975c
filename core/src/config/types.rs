use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings recognised by the runner and the output views.
///
/// Keys are camelCase on disk so a `specview.toml` reads like the settings
/// panel the options were first exposed through:
///
/// ```toml
/// useVendor = false
/// phpspecPath = "~/bin/phpspec"
/// outputViewFontSize = "16px"
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Save the active file before running its spec.
    #[serde(default = "default_true")]
    pub save_before_test: bool,

    /// Report passing runs as a notification instead of opening the panel.
    #[serde(default = "default_true")]
    pub success_as_notifications: bool,

    /// Report failing runs as a notification instead of opening the panel.
    #[serde(default)]
    pub failures_as_notifications: bool,

    /// Use the project's `./vendor/bin/phpspec`.
    #[serde(default = "default_true")]
    pub use_vendor: bool,

    /// Used only when `use_vendor` is off.
    #[serde(default = "default_phpspec_path")]
    pub phpspec_path: String,

    #[serde(default = "default_font_size")]
    pub output_view_font_size: String,

    /// Run phpspec through phpdbg instead of php + xdebug.
    #[serde(default)]
    pub use_phpdbg: bool,

    #[serde(default = "default_phpdbg_path")]
    pub phpdbg_path: String,

    #[serde(default)]
    pub output_format: OutputFormat,

    /// Target file of the HTML panel.
    #[serde(default = "default_html_path")]
    pub html_path: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "html" => Ok(OutputFormat::Html),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(ConfigError::InvalidValue {
                key: "outputFormat".to_string(),
                value: s.to_string(),
                reason: "expected text, html or jsonl",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to this file instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_phpspec_path() -> String {
    "/usr/local/bin/phpspec".to_string()
}

fn default_font_size() -> String {
    "14px".to_string()
}

fn default_phpdbg_path() -> String {
    "/usr/bin/phpdbg".to_string()
}

fn default_html_path() -> String {
    "specview-output.html".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_before_test: true,
            success_as_notifications: true,
            failures_as_notifications: false,
            use_vendor: true,
            phpspec_path: default_phpspec_path(),
            output_view_font_size: default_font_size(),
            use_phpdbg: false,
            phpdbg_path: default_phpdbg_path(),
            output_format: OutputFormat::default(),
            html_path: default_html_path(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Keys accepted by [`AppConfig::set_key`], in settings-panel order.
    pub const KEYS: [&'static str; 10] = [
        "saveBeforeTest",
        "successAsNotifications",
        "failuresAsNotifications",
        "useVendor",
        "phpspecPath",
        "outputViewFontSize",
        "usePhpdbg",
        "phpdbgPath",
        "outputFormat",
        "htmlPath",
    ];

    /// Sets a single value by its on-disk key name.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "saveBeforeTest" => self.save_before_test = parse_bool(key, value)?,
            "successAsNotifications" => self.success_as_notifications = parse_bool(key, value)?,
            "failuresAsNotifications" => self.failures_as_notifications = parse_bool(key, value)?,
            "useVendor" => self.use_vendor = parse_bool(key, value)?,
            "phpspecPath" => self.phpspec_path = non_empty(key, value)?,
            "outputViewFontSize" => self.output_view_font_size = non_empty(key, value)?,
            "usePhpdbg" => self.use_phpdbg = parse_bool(key, value)?,
            "phpdbgPath" => self.phpdbg_path = non_empty(key, value)?,
            "outputFormat" => self.output_format = value.parse()?,
            "htmlPath" => self.html_path = non_empty(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a boolean",
        }),
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "must not be empty",
        });
    }
    Ok(v.to_string())
}
