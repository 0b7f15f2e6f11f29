//! Display-only currency fields: grouped while idle, plain while edited.
//! These never take part in validation.

use super::NORMALIZED_ATTR;
use crate::services::dom;
use gloo::events::EventListener;
use shared::number::{format_grouped, parse_display_number, unformat_for_edit};
use shared::ValidatorConfig;
use web_sys::{Document, HtmlInputElement};

pub fn attach(document: &Document, config: &ValidatorConfig) -> Vec<EventListener> {
    let selector = format!(".{}", config.display_class);
    let mut listeners = Vec::new();

    for input in dom::document_query_all::<HtmlInputElement>(document, &selector) {
        let field = input.clone();
        listeners.push(EventListener::new(&input, "blur", move |_| format_on_blur(&field)));

        let field = input.clone();
        listeners.push(EventListener::new(&input, "focus", move |_| unformat_on_focus(&field)));
    }

    listeners
}

fn format_on_blur(input: &HtmlInputElement) {
    if let Some(value) = parse_display_number(&input.value()) {
        if value > 0.0 {
            input.set_value(&format_grouped(value));
            let _ = input.remove_attribute(NORMALIZED_ATTR);
        }
    }
}

fn unformat_on_focus(input: &HtmlInputElement) {
    let value = input.value();
    if !value.is_empty() {
        // The plain text uses `.` as the decimal point
        input.set_value(&unformat_for_edit(&value));
        let _ = input.set_attribute(NORMALIZED_ATTR, "");
    }
}
