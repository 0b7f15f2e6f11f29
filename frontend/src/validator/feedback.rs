//! How validation outcomes show up on the page: CSS state classes on the
//! field, an error slot next to it, and one alert per rejected form.

use crate::services::dom;
use gloo::events::EventListener;
use shared::ValidatorConfig;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

fn existing_slot(input: &HtmlInputElement, config: &ValidatorConfig) -> Option<Element> {
    let parent = input.parent_element()?;
    dom::query(&parent, &format!(".{}", config.error_class))
}

/// Error slot beside `input`, created the first time it is needed
fn error_slot(input: &HtmlInputElement, config: &ValidatorConfig) -> Option<Element> {
    if let Some(slot) = existing_slot(input, config) {
        return Some(slot);
    }

    let parent = input.parent_element()?;
    let document = input.owner_document()?;
    let classes = format!("{} {}", config.error_class, config.error_slot_classes);
    let slot = dom::create(&document, "div", classes.trim(), None).ok()?;
    parent.append_child(&slot).ok()?;
    Some(slot)
}

fn reset_state(input: &HtmlInputElement, config: &ValidatorConfig) {
    dom::toggle_class(input, &config.valid_class, false);
    dom::toggle_class(input, &config.invalid_class, false);
}

pub fn mark_valid(input: &HtmlInputElement, config: &ValidatorConfig) {
    reset_state(input, config);
    dom::toggle_class(input, &config.valid_class, true);
    if let Some(slot) = existing_slot(input, config) {
        slot.set_text_content(Some(""));
    }
}

pub fn mark_invalid(input: &HtmlInputElement, config: &ValidatorConfig, message: &str) {
    reset_state(input, config);
    dom::toggle_class(input, &config.invalid_class, true);
    if let Some(slot) = error_slot(input, config) {
        slot.set_text_content(Some(message));
    }
}

pub fn remove_form_alert(form: &Element, config: &ValidatorConfig) {
    for alert in dom::query_all::<Element>(form, &format!(".{}", config.alert_class)) {
        alert.remove();
    }
}

/// Dismissible alert at the top of `form`; replaces any earlier one.
///
/// Returns the close-button listener, which must be kept for as long as
/// the alert should stay dismissible.
pub fn show_form_alert(form: &HtmlFormElement, config: &ValidatorConfig) -> Option<EventListener> {
    remove_form_alert(form, config);

    let document = form.owner_document()?;

    let build = || -> anyhow::Result<(Element, EventListener)> {
        let alert = dom::create(
            &document,
            "div",
            &format!("alert alert-danger alert-dismissible fade show mt-3 {}", config.alert_class),
            None,
        )?;
        let _ = alert.set_attribute("role", "alert");

        let icon = dom::create(&document, "i", "fas fa-exclamation-triangle me-2", None)?;
        let title = dom::create(&document, "strong", "", Some("Error:"))?;
        let message = document.create_text_node(&format!(" {}", config.alert_message));
        let close = dom::create(&document, "button", "btn-close", None)?;
        let _ = close.set_attribute("type", "button");
        let _ = close.set_attribute("data-bs-dismiss", "alert");
        let _ = close.set_attribute("aria-label", "Cerrar");

        let _ = alert.append_child(&icon);
        let _ = alert.append_child(&title);
        let _ = alert.append_child(&message);
        let _ = alert.append_child(&close);

        // Works with or without Bootstrap's dismiss plugin
        let target = alert.clone();
        let on_close = EventListener::once(&close, "click", move |_| target.remove());
        Ok((alert, on_close))
    };

    let (alert, on_close) = build().ok()?;
    form.insert_before(&alert, form.first_child().as_ref()).ok()?;
    Some(on_close)
}

/// Bring the first rejected field into view and give it focus
pub fn focus_field(input: &HtmlInputElement) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    input.scroll_into_view_with_scroll_into_view_options(&options);

    let _ = input.focus();
}

/// Drop every validity class, error message and alert inside `form`
pub fn clear_form_errors(form: &Element, config: &ValidatorConfig) {
    for slot in dom::query_all::<Element>(form, &format!(".{}", config.error_class)) {
        slot.set_text_content(Some(""));
    }

    let marked = format!(".{}, .{}", config.invalid_class, config.valid_class);
    for field in dom::query_all::<Element>(form, &marked) {
        dom::toggle_class(&field, &config.invalid_class, false);
        dom::toggle_class(&field, &config.valid_class, false);
    }

    remove_form_alert(form, config);
}
