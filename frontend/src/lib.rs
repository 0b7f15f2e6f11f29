//! Browser widgets for the server-rendered project pages: the material
//! consumption calendar and the price/quantity field validator.
//!
//! The module starts itself once loaded and exposes `validatePriceField`,
//! `clearPriceErrors` and `teardown` to the other scripts of the page.

pub mod calendar;
pub mod services;
pub mod validator;

use calendar::CalendarWidget;
use gloo::events::EventListener;
use services::api::ApiClient;
use services::config::{load_config, resolve_project_id};
use services::logging::Logger;
use shared::WidgetConfig;
use std::cell::RefCell;
use std::rc::Rc;
use validator::PriceValidator;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, Window};

const COMPONENT: &str = "widgets";

/// Widgets mounted on the current page, detached when dropped
struct Widgets {
    config: WidgetConfig,
    _calendar: Option<CalendarWidget>,
    _validator: PriceValidator,
}

impl Widgets {
    fn mount(window: &Window, document: &Document) -> Self {
        let config = load_config(document);
        Logger::set_level(config.log_level);

        let project_id = resolve_project_id(window, &config);
        let api = ApiClient::with_base_url(config.api_base_url.clone());

        let calendar = match CalendarWidget::mount(document, &config.calendar, api, project_id) {
            Ok(calendar) => calendar,
            Err(e) => {
                Logger::error_with_component(COMPONENT, &format!("❌ Calendar not mounted: {:#}", e));
                None
            }
        };

        let validator = PriceValidator::attach(document, Rc::new(config.validator.clone()));

        Self {
            config,
            _calendar: calendar,
            _validator: validator,
        }
    }
}

thread_local! {
    static WIDGETS: RefCell<Option<Widgets>> = RefCell::new(None);
}

fn install() {
    let window = match web_sys::window() {
        Some(window) => window,
        None => return,
    };
    let document = match window.document() {
        Some(document) => document,
        None => return,
    };

    let widgets = Widgets::mount(&window, &document);
    WIDGETS.with(|slot| *slot.borrow_mut() = Some(widgets));
}

#[wasm_bindgen(start)]
pub fn start() {
    let document = match web_sys::window().and_then(|window| window.document()) {
        Some(document) => document,
        None => return,
    };

    // The module may be instantiated before the page has been parsed
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| install()).forget();
    } else {
        install();
    }
}

/// Re-run blur validation on the field with id `field_id`
#[wasm_bindgen(js_name = validatePriceField)]
pub fn validate_price_field(field_id: &str) {
    let field = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(field_id));

    if let (Some(field), Ok(event)) = (field, Event::new("blur")) {
        let _ = field.dispatch_event(&event);
    }
}

/// Remove validity markers, messages and the alert from the form with id `form_id`
#[wasm_bindgen(js_name = clearPriceErrors)]
pub fn clear_price_errors(form_id: &str) {
    let form = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(form_id));

    if let Some(form) = form {
        let config = WIDGETS
            .with(|slot| slot.borrow().as_ref().map(|w| w.config.validator.clone()))
            .unwrap_or_default();
        validator::clear_form_errors(&form, &config);
    }
}

/// Detach both widgets from the page
#[wasm_bindgen]
pub fn teardown() {
    let widgets = WIDGETS.with(|slot| slot.borrow_mut().take());
    if widgets.is_some() {
        Logger::info_with_component(COMPONENT, "Widgets detached");
    }
}
