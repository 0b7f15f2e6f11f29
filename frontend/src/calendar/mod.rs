//! Consumption calendar: a month grid over the project's recorded
//! material consumptions, with a day-options modal per date.

mod day_modal;
mod grid;

pub use day_modal::DayModal;
pub use grid::{CalendarGrid, CalendarGridProps};

use crate::services::api::ApiClient;
use crate::services::date_utils::today;
use crate::services::dom;
use crate::services::logging::Logger;
use anyhow::Result;
use chrono::NaiveDate;
use gloo::events::{EventListener, EventListenerOptions};
use shared::{date_key, CalendarDomConfig, CalendarState, ConsumptionsByDate, DayCell, DayOptions, MonthRequest};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlInputElement};
use yew::{AppHandle, Callback, Renderer};

const COMPONENT: &str = "calendar";

/// Everything the calendar reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCommand {
    PreviousMonth,
    NextMonth,
    SelectDay(NaiveDate),
}

struct CalendarElements {
    title: Element,
    grid: Element,
    prev: Element,
    next: Element,
    selected_input: Option<HtmlInputElement>,
    modal: Option<DayModal>,
}

struct CalendarInner {
    elements: CalendarElements,
    state: RefCell<CalendarState>,
    api: ApiClient,
    project_id: Option<String>,
    grid_app: RefCell<Option<AppHandle<CalendarGrid>>>,
    on_select: Callback<DayCell>,
}

/// The mounted calendar widget.
///
/// Dropping it detaches the navigation listeners and unmounts the grid.
pub struct CalendarWidget {
    inner: Rc<CalendarInner>,
    _listeners: Vec<EventListener>,
}

impl CalendarWidget {
    /// Mount on the calendar container described by `config`.
    ///
    /// Returns `Ok(None)` when the page has no calendar, and an error when
    /// the container exists but lacks a required slot.
    pub fn mount(
        document: &Document,
        config: &CalendarDomConfig,
        api: ApiClient,
        project_id: Option<String>,
    ) -> Result<Option<Self>> {
        let container = match document.get_element_by_id(&config.container_id) {
            Some(container) => container,
            None => return Ok(None),
        };

        let elements = CalendarElements {
            title: dom::require(&container, &config.title_selector)?,
            grid: dom::require(&container, &config.grid_selector)?,
            prev: dom::require(&container, &config.prev_selector)?,
            next: dom::require(&container, &config.next_selector)?,
            selected_input: document
                .get_element_by_id(&config.selected_input_id)
                .and_then(|element| element.dyn_into::<HtmlInputElement>().ok()),
            modal: DayModal::find(document, config),
        };

        if project_id.is_none() {
            Logger::warn_with_component(COMPONENT, "⚠️ No project id on this page, showing an empty calendar");
        }

        // The grid is owned by the Yew app from here on
        elements.grid.set_inner_html("");

        let inner = Rc::new_cyclic(|weak: &Weak<CalendarInner>| CalendarInner {
            elements,
            state: RefCell::new(CalendarState::new(today())),
            api,
            project_id,
            grid_app: RefCell::new(None),
            on_select: select_callback(weak.clone()),
        });

        let commands = [
            (&inner.elements.prev, CalendarCommand::PreviousMonth),
            (&inner.elements.next, CalendarCommand::NextMonth),
        ];
        let listeners = commands
            .into_iter()
            .map(|(target, command)| {
                let weak = Rc::downgrade(&inner);
                EventListener::new_with_options(
                    target,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        if let Some(inner) = weak.upgrade() {
                            dispatch(&inner, command);
                        }
                    },
                )
            })
            .collect();

        Logger::info_with_component(COMPONENT, "🗓️ Calendar mounted");
        refresh(&inner);

        Ok(Some(Self {
            inner,
            _listeners: listeners,
        }))
    }

    /// Run a command as if it came from the page
    pub fn dispatch(&self, command: CalendarCommand) {
        dispatch(&self.inner, command);
    }

    /// Snapshot of the current state
    pub fn state(&self) -> CalendarState {
        self.inner.state.borrow().clone()
    }
}

fn select_callback(weak: Weak<CalendarInner>) -> Callback<DayCell> {
    Callback::from(move |cell: DayCell| {
        if let Some(inner) = weak.upgrade() {
            dispatch(&inner, CalendarCommand::SelectDay(cell.date));
        }
    })
}

fn dispatch(inner: &Rc<CalendarInner>, command: CalendarCommand) {
    match command {
        CalendarCommand::PreviousMonth => {
            inner.state.borrow_mut().previous_month();
            refresh(inner);
        }
        CalendarCommand::NextMonth => {
            inner.state.borrow_mut().next_month();
            refresh(inner);
        }
        CalendarCommand::SelectDay(date) => select_day(inner, date),
    }
}

/// Fetch the shown month, then redraw. Only the latest request is applied.
fn refresh(inner: &Rc<CalendarInner>) {
    let request = inner.state.borrow_mut().begin_fetch();
    let api = inner.api.clone();
    let project_id = inner.project_id.clone();
    let weak = Rc::downgrade(inner);

    spawn_local(async move {
        let result = load_month(&api, project_id.as_deref(), &request).await;

        let inner = match weak.upgrade() {
            Some(inner) => inner,
            None => return,
        };

        let applied = inner.state.borrow_mut().complete_fetch(&request, result);
        if applied {
            inner.render();
        } else {
            Logger::debug_with_component(
                COMPONENT,
                &format!("Discarded stale response for {}/{}", request.month, request.year),
            );
        }
    });
}

async fn load_month(
    api: &ApiClient,
    project_id: Option<&str>,
    request: &MonthRequest,
) -> Option<ConsumptionsByDate> {
    let project_id = project_id?;

    match api
        .get_month_consumptions(project_id, request.month, request.year)
        .await
    {
        Ok(response) => {
            Logger::debug_with_component(
                COMPONENT,
                &format!(
                    "Loaded {} days with consumptions for {}/{}",
                    response.consumos_por_fecha.len(),
                    request.month,
                    request.year
                ),
            );
            Some(response.consumos_por_fecha)
        }
        Err(e) => {
            Logger::warn_with_component(
                COMPONENT,
                &format!(
                    "⚠️ Could not load consumptions for {}/{}: {}",
                    request.month, request.year, e
                ),
            );
            None
        }
    }
}

fn select_day(inner: &Rc<CalendarInner>, date: NaiveDate) {
    let key = date_key(date);
    let options = {
        let mut state = inner.state.borrow_mut();
        state.select(date);
        DayOptions::new(date, &key, state.records_for(&key), inner.project_id.as_deref())
    };

    if let Some(input) = &inner.elements.selected_input {
        input.set_value(&key);
    }

    inner.render();

    match &inner.elements.modal {
        Some(modal) => {
            if let Err(e) = modal.open(&options) {
                Logger::error_with_component(COMPONENT, &format!("❌ Could not open day options: {:#}", e));
            }
        }
        None => Logger::debug_with_component(COMPONENT, "No day-options modal on this page"),
    }
}

impl CalendarInner {
    fn render(&self) {
        let props = {
            let state = self.state.borrow();
            self.elements.title.set_text_content(Some(state.title().as_str()));
            CalendarGridProps {
                grid: state.grid(),
                on_select: self.on_select.clone(),
            }
        };

        let mut app = self.grid_app.borrow_mut();
        match app.as_mut() {
            Some(handle) => handle.update(props),
            None => {
                let handle = Renderer::<CalendarGrid>::with_root_and_props(self.elements.grid.clone(), props).render();
                *app = Some(handle);
            }
        }
    }
}

impl Drop for CalendarInner {
    fn drop(&mut self) {
        if let Some(app) = self.grid_app.get_mut().take() {
            app.destroy();
        }
    }
}
