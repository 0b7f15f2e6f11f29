use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Console verbosity of the widgets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Element ids and selectors the calendar expects in the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarDomConfig {
    pub container_id: String,
    pub title_selector: String,
    pub grid_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub selected_input_id: String,
    pub modal_id: String,
    pub modal_date_selector: String,
    pub modal_status_selector: String,
    pub modal_count_selector: String,
    pub modal_add_selector: String,
    pub modal_list_selector: String,
    pub modal_preview_selector: String,
}

impl Default for CalendarDomConfig {
    fn default() -> Self {
        Self {
            container_id: "calendar".to_string(),
            title_selector: "[data-cal-title]".to_string(),
            grid_selector: ".cal-grid".to_string(),
            prev_selector: "[data-cal-prev]".to_string(),
            next_selector: "[data-cal-next]".to_string(),
            selected_input_id: "selected_date".to_string(),
            modal_id: "dayOptionsModal".to_string(),
            modal_date_selector: "[data-day-date]".to_string(),
            modal_status_selector: "[data-day-status]".to_string(),
            modal_count_selector: "[data-day-count]".to_string(),
            modal_add_selector: "[data-day-add]".to_string(),
            modal_list_selector: "[data-day-list]".to_string(),
            modal_preview_selector: "[data-day-preview]".to_string(),
        }
    }
}

/// Behaviour and CSS hooks of the price/quantity validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Quiet period after the last keystroke before re-validating
    pub debounce_ms: u32,
    pub valid_class: String,
    pub invalid_class: String,
    pub error_class: String,
    /// Classes of a freshly created error slot, besides `error_class`
    pub error_slot_classes: String,
    pub alert_class: String,
    pub alert_message: String,
    /// Marker class of display-only currency fields
    pub display_class: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            valid_class: "is-valid".to_string(),
            invalid_class: "is-invalid".to_string(),
            error_class: "price-error".to_string(),
            error_slot_classes: "text-danger small mt-1".to_string(),
            alert_class: "price-validation-alert".to_string(),
            alert_message: "Por favor corrige los errores en los campos marcados. \
                Los precios y cantidades no pueden ser negativos."
                .to_string(),
            display_class: "format-currency".to_string(),
        }
    }
}

/// Page-level configuration of both widgets.
///
/// Every field has a default, so a page only spells out what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Prefix for API calls; empty means same origin
    pub api_base_url: String,
    /// Explicit project id; otherwise taken from a global or the path
    pub project_id: Option<String>,
    /// Name of the `window` property holding the project id
    pub project_id_global: String,
    pub log_level: LogLevel,
    pub calendar: CalendarDomConfig,
    pub validator: ValidatorConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            project_id: None,
            project_id_global: "PROJECT_ID".to_string(),
            log_level: LogLevel::default(),
            calendar: CalendarDomConfig::default(),
            validator: ValidatorConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid widget configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WidgetConfig {
    /// Parse a JSON configuration block; blank text yields the defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_config_uses_defaults() {
        let config = WidgetConfig::from_json("  ").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.validator.debounce_ms, 500);
        assert_eq!(config.calendar.container_id, "calendar");
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = WidgetConfig::from_json(
            r#"{"project_id": "8", "log_level": "debug", "validator": {"debounce_ms": 250}}"#,
        )
        .unwrap();

        assert_eq!(config.project_id.as_deref(), Some("8"));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.validator.debounce_ms, 250);
        assert_eq!(config.validator.invalid_class, "is-invalid");
        assert_eq!(config.project_id_global, "PROJECT_ID");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let err = WidgetConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid widget configuration"));
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
    }
}
