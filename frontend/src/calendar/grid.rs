use shared::calendar::WEEKDAY_HEADERS;
use shared::{DayCell, MonthGrid};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CalendarGridProps {
    pub grid: MonthGrid,
    pub on_select: Callback<DayCell>,
}

/// Weekday headers followed by the 42 day cells, rendered directly
/// into the page's grid slot
#[function_component(CalendarGrid)]
pub fn calendar_grid(props: &CalendarGridProps) -> Html {
    let headers = WEEKDAY_HEADERS.iter().map(|name| {
        html! { <div class="dow">{*name}</div> }
    });

    let days = props.grid.days.iter().map(|day| {
        let onclick = {
            let on_select = props.on_select.clone();
            let day = day.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(day.clone()))
        };

        html! {
            <div class={day.css_classes()}
                 title={day.tooltip()}
                 data-date={day.key.clone()}
                 {onclick}>
                <span class="day-number">{day.day_number}</span>
                {if let Some(count) = day.badge() {
                    html! { <span class="badge-registros">{count}</span> }
                } else {
                    html! {}
                }}
            </div>
        }
    });

    html! {
        <>
            {for headers}
            {for days}
        </>
    }
}
