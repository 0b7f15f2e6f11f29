//! Small helpers over `web-sys` for working with server-rendered markup.

use anyhow::{anyhow, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// First element under `root` matching `selector`
pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Like [`query`], but a missing element is an error
pub fn require(root: &Element, selector: &str) -> Result<Element> {
    root.query_selector(selector)
        .map_err(|e| anyhow!("invalid selector `{}`: {:?}", selector, e))?
        .ok_or_else(|| anyhow!("missing element `{}`", selector))
}

/// Every element under `root` matching `selector` that is a `T`
pub fn query_all<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// [`query_all`] over the whole document
pub fn document_query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    document
        .document_element()
        .map(|root| query_all(&root, selector))
        .unwrap_or_default()
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// Text of the element right before `element`, typically its `<label>`
pub fn previous_sibling_text(element: &Element) -> Option<String> {
    element
        .previous_element_sibling()
        .and_then(|sibling| sibling.text_content())
}

/// Point a link at `href`, or make it inert when there is nowhere to go
pub fn set_link(link: &Element, href: Option<&str>) {
    match href {
        Some(href) => {
            let _ = link.set_attribute("href", href);
            let _ = link.remove_attribute("aria-disabled");
            let _ = link.remove_attribute("tabindex");
            toggle_class(link, "disabled", false);
        }
        None => {
            let _ = link.remove_attribute("href");
            let _ = link.set_attribute("aria-disabled", "true");
            let _ = link.set_attribute("tabindex", "-1");
            toggle_class(link, "disabled", true);
        }
    }
}

/// Create an element with the given classes and optional text
pub fn create(document: &Document, tag: &str, classes: &str, text: Option<&str>) -> Result<Element> {
    let element = document
        .create_element(tag)
        .map_err(|e| anyhow!("cannot create <{}>: {:?}", tag, e))?;
    if !classes.is_empty() {
        element.set_class_name(classes);
    }
    if text.is_some() {
        element.set_text_content(text);
    }
    Ok(element)
}
