//! The day-options modal: a server-rendered Bootstrap modal whose named
//! slots are filled in for the clicked day.

use crate::services::dom;
use anyhow::Result;
use js_sys::{Function, Reflect};
use shared::{CalendarDomConfig, DayOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

pub struct DayModal {
    root: Element,
    date: Option<Element>,
    status: Option<Element>,
    count: Option<Element>,
    add_link: Option<Element>,
    list_link: Option<Element>,
    preview: Option<Element>,
}

impl DayModal {
    /// Locate the modal and its slots. Missing slots are simply left alone.
    pub fn find(document: &web_sys::Document, config: &CalendarDomConfig) -> Option<Self> {
        let root = document.get_element_by_id(&config.modal_id)?;
        let slot = |selector: &str| dom::query(&root, selector);

        Some(Self {
            date: slot(&config.modal_date_selector),
            status: slot(&config.modal_status_selector),
            count: slot(&config.modal_count_selector),
            add_link: slot(&config.modal_add_selector),
            list_link: slot(&config.modal_list_selector),
            preview: slot(&config.modal_preview_selector),
            root,
        })
    }

    pub fn open(&self, options: &DayOptions) -> Result<()> {
        self.populate(options)?;
        show(&self.root);
        Ok(())
    }

    fn populate(&self, options: &DayOptions) -> Result<()> {
        if let Some(date) = &self.date {
            date.set_text_content(Some(options.heading.as_str()));
        }

        if let Some(status) = &self.status {
            dom::toggle_class(status, "bg-success", options.has_records());
            dom::toggle_class(status, "bg-secondary", !options.has_records());
            status.set_text_content(Some(options.status_text.as_str()));
        }

        if let Some(count) = &self.count {
            count.set_text_content(Some(options.count_text.as_str()));
        }

        if let Some(link) = &self.add_link {
            dom::set_link(link, options.add_url.as_deref());
        }

        if let Some(link) = &self.list_link {
            dom::set_link(link, options.list_url.as_deref());
        }

        if let Some(preview) = &self.preview {
            render_preview(preview, options)?;
        }

        Ok(())
    }
}

/// Preview list built from text nodes only, record fields never reach `innerHTML`
fn render_preview(container: &Element, options: &DayOptions) -> Result<()> {
    container.set_inner_html("");
    let document = match container.owner_document() {
        Some(document) => document,
        None => return Ok(()),
    };

    if options.preview.is_empty() {
        let empty = dom::create(&document, "p", "text-muted mb-0", Some(options.count_text.as_str()))?;
        let _ = container.append_child(&empty);
        return Ok(());
    }

    let list = dom::create(&document, "ul", "list-group list-group-flush", None)?;
    for item in &options.preview {
        let row = dom::create(&document, "li", "list-group-item", None)?;

        let header = dom::create(&document, "div", "d-flex justify-content-between", None)?;
        let material = dom::create(&document, "strong", "", Some(item.material.as_str()))?;
        let quantity = dom::create(&document, "span", "badge bg-light text-dark", Some(item.quantity.as_str()))?;
        let _ = header.append_child(&material);
        let _ = header.append_child(&quantity);

        let activity = dom::create(
            &document,
            "div",
            "small text-muted",
            Some(format!("Actividad: {}", item.activity).as_str()),
        )?;
        let responsible = dom::create(
            &document,
            "div",
            "small text-muted",
            Some(format!("Responsable: {}", item.responsible).as_str()),
        )?;

        let _ = row.append_child(&header);
        let _ = row.append_child(&activity);
        let _ = row.append_child(&responsible);
        let _ = list.append_child(&row);
    }
    let _ = container.append_child(&list);
    Ok(())
}

fn show(modal: &Element) {
    if show_with_bootstrap(modal).is_some() {
        return;
    }

    // No Bootstrap on the page
    dom::toggle_class(modal, "show", true);
    let _ = modal.set_attribute("style", "display: block;");
    let _ = modal.set_attribute("aria-modal", "true");
    let _ = modal.remove_attribute("aria-hidden");
}

/// `bootstrap.Modal.getOrCreateInstance(modal).show()`
fn show_with_bootstrap(modal: &Element) -> Option<()> {
    let window = web_sys::window()?;
    let bootstrap = Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .ok()
        .filter(|value| value.is_object())?;
    let modal_class = Reflect::get(&bootstrap, &JsValue::from_str("Modal"))
        .ok()
        .filter(|value| value.is_function())?;
    let get_or_create: Function = Reflect::get(&modal_class, &JsValue::from_str("getOrCreateInstance"))
        .ok()?
        .dyn_into()
        .ok()?;

    let instance = get_or_create.call1(&modal_class, modal).ok()?;
    let show: Function = Reflect::get(&instance, &JsValue::from_str("show"))
        .ok()?
        .dyn_into()
        .ok()?;
    show.call0(&instance).ok()?;
    Some(())
}
