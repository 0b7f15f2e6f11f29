//! Rules for price and quantity form fields.

use crate::number::{normalize, parse_decimal, NumberStyle};
use thiserror::Error;

const PRICE_PATTERNS: [&str; 4] = ["price", "precio", "cost", "costo"];
const QUANTITY_PATTERNS: [&str; 3] = ["quantity", "cantidad", "qty"];

/// Which validation family an input belongs to, based on its `name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Price,
    Quantity,
}

impl FieldKind {
    /// Classify an input by substring of its `name` attribute.
    /// Price patterns win when a name matches both families.
    pub fn from_name(name: &str) -> Option<Self> {
        if PRICE_PATTERNS.iter().any(|p| name.contains(p)) {
            Some(FieldKind::Price)
        } else if QUANTITY_PATTERNS.iter().any(|p| name.contains(p)) {
            Some(FieldKind::Quantity)
        } else {
            None
        }
    }

    /// Label used in messages when the page gives none
    pub fn default_label(&self) -> &'static str {
        match self {
            FieldKind::Price => "precio",
            FieldKind::Quantity => "cantidad",
        }
    }
}

/// Label used by the submission gate when the page gives none
pub const SUBMIT_FALLBACK_LABEL: &str = "valor";

/// Whether the submit-time cleanup pass should rewrite this input
pub fn is_numeric_like(input_type: &str, inputmode: &str, name: &str) -> bool {
    input_type.eq_ignore_ascii_case("number")
        || inputmode.eq_ignore_ascii_case("numeric")
        || PRICE_PATTERNS.iter().any(|p| name.contains(p))
}

/// Reasons a price or quantity value is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("El {label} debe ser un número válido.")]
    NotANumber { label: String },
    #[error("El {label} no puede ser negativo.")]
    Negative { label: String },
}

/// Validate the raw text of a field.
///
/// Empty input is accepted and read as zero.
pub fn validate_amount(raw: &str, label: &str, style: NumberStyle) -> Result<f64, FieldError> {
    let cleaned = normalize(raw, style);
    if cleaned.is_empty() {
        return Ok(0.0);
    }

    let value = parse_decimal(&cleaned).ok_or_else(|| FieldError::NotANumber {
        label: label.to_string(),
    })?;

    if value < 0.0 {
        return Err(FieldError::Negative {
            label: label.to_string(),
        });
    }

    Ok(value)
}

/// Pick the label shown in messages for a field: an explicit
/// `data-field-name`, else the text of the preceding label without its
/// colon, else `fallback`. Always lowercased.
pub fn resolve_label(data_field_name: Option<&str>, previous_text: Option<&str>, fallback: &str) -> String {
    let from_attribute = data_field_name.map(str::trim).filter(|s| !s.is_empty());
    let from_sibling = previous_text
        .map(|text| text.replace(':', ""))
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    match (from_attribute, from_sibling) {
        (Some(name), _) => name.to_lowercase(),
        (None, Some(text)) => text.to_lowercase(),
        (None, None) => fallback.to_lowercase(),
    }
}

/// What to do with a keydown inside a price or quantity field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    Allow,
    Block,
}

const ALWAYS_ALLOWED_KEYS: [&str; 11] = [
    "Backspace", "Delete", "Tab", "Escape", "Enter",
    "Home", "End", "ArrowLeft", "ArrowRight", "ArrowUp", "ArrowDown",
];

/// Early deterrent against typing a minus sign. Editing, navigation and
/// Ctrl+A/C/V/X stay available; the authoritative check is [`validate_amount`].
pub fn key_decision(key: &str, code: &str, ctrl: bool) -> KeyDecision {
    if ALWAYS_ALLOWED_KEYS.contains(&key) {
        return KeyDecision::Allow;
    }
    if ctrl && matches!(key.to_ascii_lowercase().as_str(), "a" | "c" | "v" | "x") {
        return KeyDecision::Allow;
    }
    if key == "-" || key == "Subtract" || code == "Minus" || code == "NumpadSubtract" {
        return KeyDecision::Block;
    }
    KeyDecision::Allow
}
