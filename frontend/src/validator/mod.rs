//! Price and quantity field validation.
//!
//! Fields are picked by their `name`, validated on blur and (debounced)
//! while typing, and every form is gated on submit so no negative or
//! non-numeric price or quantity reaches the server.

mod display;
mod feedback;

pub use feedback::clear_form_errors;

use crate::services::dom;
use crate::services::logging::Logger;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use shared::number::normalize_for_submit;
use shared::validation::{
    is_numeric_like, key_decision, resolve_label, validate_amount, SUBMIT_FALLBACK_LABEL,
};
use shared::{FieldKind, KeyDecision, NumberStyle, ValidatorConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, HtmlInputElement, KeyboardEvent};

const COMPONENT: &str = "price-validator";

/// Set on a text field once the submit pass has rewritten it to canonical
/// form, removed again when the user edits it
pub(crate) const NORMALIZED_ATTR: &str = "data-normalized";

/// A bound price or quantity input and its pending debounce timer
pub struct FieldBinding {
    input: HtmlInputElement,
    kind: FieldKind,
    config: Rc<ValidatorConfig>,
    debounce: RefCell<Option<Timeout>>,
}

type FieldHandler = fn(&Rc<FieldBinding>, &Event);

/// Handlers of a bound field, keyed by event type
const FIELD_HANDLERS: [(&str, FieldHandler); 3] = [
    ("blur", on_blur),
    ("input", on_input),
    ("keydown", on_keydown),
];

/// Validator attached to a page. Dropping it detaches every listener
/// and cancels pending debounce timers.
pub struct PriceValidator {
    bindings: Vec<Rc<FieldBinding>>,
    _listeners: Vec<EventListener>,
}

impl PriceValidator {
    pub fn attach(document: &Document, config: Rc<ValidatorConfig>) -> Self {
        let bindings: Vec<Rc<FieldBinding>> =
            dom::document_query_all::<HtmlInputElement>(document, "input[name]")
                .into_iter()
                .filter_map(|input| {
                    let kind = FieldKind::from_name(&input.name())?;
                    Some(Rc::new(FieldBinding {
                        input,
                        kind,
                        config: Rc::clone(&config),
                        debounce: RefCell::new(None),
                    }))
                })
                .collect();

        let mut listeners = Vec::new();
        for binding in &bindings {
            for (event_type, handler) in FIELD_HANDLERS {
                let weak = Rc::downgrade(binding);
                listeners.push(EventListener::new_with_options(
                    &binding.input,
                    event_type,
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        if let Some(binding) = weak.upgrade() {
                            handler(&binding, event);
                        }
                    },
                ));
            }
        }

        let forms = dom::document_query_all::<HtmlFormElement>(document, "form");
        let form_count = forms.len();
        for form in forms {
            let config = Rc::clone(&config);
            let target = form.clone();
            // Close handler of the form's current alert
            let alert_close: RefCell<Option<EventListener>> = RefCell::new(None);
            listeners.push(EventListener::new_with_options(
                &target,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| gate_submission(&form, &config, &alert_close, event),
            ));
        }

        // Typed text is localized again, whichever field it lands in
        listeners.push(EventListener::new(document, "input", |event| {
            if let Some(field) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
                let _ = field.remove_attribute(NORMALIZED_ATTR);
            }
        }));

        listeners.extend(display::attach(document, &config));

        Logger::info_with_component(
            COMPONENT,
            &format!("✅ Watching {} fields in {} forms", bindings.len(), form_count),
        );

        Self {
            bindings,
            _listeners: listeners,
        }
    }

    /// Number of price and quantity inputs being watched
    pub fn field_count(&self) -> usize {
        self.bindings.len()
    }
}

/// How the current text of `input` should be read
fn input_style(input: &HtmlInputElement) -> NumberStyle {
    NumberStyle::for_input(&input.type_(), input.has_attribute(NORMALIZED_ATTR))
}

fn field_label(input: &HtmlInputElement, fallback: &str) -> String {
    resolve_label(
        input.get_attribute("data-field-name").as_deref(),
        dom::previous_sibling_text(input).as_deref(),
        fallback,
    )
}

/// Validate one field and show the outcome next to it.
/// Returns whether the value is acceptable.
pub fn validate_field(input: &HtmlInputElement, label: &str, config: &ValidatorConfig) -> bool {
    let style = input_style(input);
    match validate_amount(&input.value(), label, style) {
        Ok(_) => {
            feedback::mark_valid(input, config);
            true
        }
        Err(error) => {
            feedback::mark_invalid(input, config, &error.to_string());
            false
        }
    }
}

fn on_blur(binding: &Rc<FieldBinding>, _event: &Event) {
    // A pending keystroke validation would only repeat this one
    binding.debounce.borrow_mut().take();

    let label = field_label(&binding.input, binding.kind.default_label());
    validate_field(&binding.input, &label, &binding.config);
}

fn on_input(binding: &Rc<FieldBinding>, _event: &Event) {
    let weak = Rc::downgrade(binding);
    let timeout = Timeout::new(binding.config.debounce_ms, move || {
        if let Some(binding) = weak.upgrade() {
            let label = field_label(&binding.input, binding.kind.default_label());
            validate_field(&binding.input, &label, &binding.config);
        }
    });

    // Replacing the handle cancels the previous timer
    *binding.debounce.borrow_mut() = Some(timeout);
}

fn on_keydown(_binding: &Rc<FieldBinding>, event: &Event) {
    let key_event = match event.dyn_ref::<KeyboardEvent>() {
        Some(key_event) => key_event,
        None => return,
    };

    let ctrl = key_event.ctrl_key() || key_event.meta_key();
    if key_decision(&key_event.key(), &key_event.code(), ctrl) == KeyDecision::Block {
        event.prevent_default();
    }
}

/// Normalize numeric inputs, validate every price and quantity field,
/// and cancel the submission if any of them is rejected
fn gate_submission(
    form: &HtmlFormElement,
    config: &ValidatorConfig,
    alert_close: &RefCell<Option<EventListener>>,
    event: &Event,
) {
    for input in dom::query_all::<HtmlInputElement>(form, "input") {
        let value = input.value();
        let input_type = input.type_();
        let inputmode = input.get_attribute("inputmode").unwrap_or_default();
        if value.is_empty() || !is_numeric_like(&input_type, &inputmode, &input.name()) {
            continue;
        }

        let normalized = normalize_for_submit(&value, input_style(&input));
        if normalized != value {
            input.set_value(&normalized);
        }
        let _ = input.set_attribute(NORMALIZED_ATTR, "");
    }

    let mut first_invalid: Option<HtmlInputElement> = None;
    for input in dom::query_all::<HtmlInputElement>(form, "input[name]") {
        if FieldKind::from_name(&input.name()).is_none() {
            continue;
        }

        let label = field_label(&input, SUBMIT_FALLBACK_LABEL);
        if !validate_field(&input, &label, config) && first_invalid.is_none() {
            first_invalid = Some(input);
        }
    }

    match first_invalid {
        None => {
            feedback::remove_form_alert(form, config);
            alert_close.borrow_mut().take();
        }
        Some(field) => {
            event.prevent_default();
            // Replacing the handle detaches the old alert's close listener
            *alert_close.borrow_mut() = feedback::show_form_alert(form, config);
            feedback::focus_field(&field);
            Logger::warn_with_component(
                COMPONENT,
                &format!("⚠️ Blocked submission, `{}` is invalid", field.name()),
            );
        }
    }
}
