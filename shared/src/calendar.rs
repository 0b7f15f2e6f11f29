//! Month calendar model: which month is shown, which day is selected,
//! and how each of the 42 grid cells is classified.
//!
//! All of this is pure date arithmetic over `chrono::NaiveDate`; the
//! frontend only turns a [`MonthGrid`] into DOM nodes.

use crate::consumption::{date_key, ConsumptionRecord, ConsumptionsByDate};
use crate::routes::{list_consumptions_url, register_consumption_url};
use chrono::{Datelike, Days, Months, NaiveDate};

/// Number of day cells in the grid (6 weeks)
pub const GRID_CELLS: usize = 42;

/// Weekday header labels, Monday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["LUN", "MAR", "MIÉ", "JUE", "VIE", "SÁB", "DOM"];

const MONTH_NAMES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo",
];

/// Placeholder shown in the preview when a record has no responsible party
pub const NO_RESPONSIBLE: &str = "Sin responsable";

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Calendar title, e.g. `Octubre 2026`
pub fn month_title(month_start: NaiveDate) -> String {
    format!("{} {}", capitalize(month_name(month_start.month())), month_start.year())
}

/// Long Spanish date, e.g. `lunes, 19 de octubre de 2026`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize],
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

/// Monday on or before the first of the month
pub fn grid_start(month_start: NaiveDate) -> NaiveDate {
    let offset = month_start.weekday().num_days_from_monday() as u64;
    month_start.checked_sub_days(Days::new(offset)).unwrap_or(month_start)
}

/// Activity classification of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// At least one consumption is recorded on this day
    HasRecords(usize),
    /// Past day with nothing recorded
    PastWithoutRecords,
    /// Today or a future day with nothing recorded yet
    Available,
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    pub day_number: u32,
    pub in_shown_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub status: DayStatus,
    pub records: Vec<ConsumptionRecord>,
}

impl DayCell {
    /// CSS classes for the cell element
    pub fn css_classes(&self) -> String {
        let mut classes = vec!["day"];
        if !self.in_shown_month {
            classes.push("muted");
        }
        if self.is_today {
            classes.push("today");
        }
        if self.is_selected {
            classes.push("selected");
        }
        classes.push(match self.status {
            DayStatus::HasRecords(_) => "has-registro",
            DayStatus::PastWithoutRecords => "sin-registro",
            DayStatus::Available => "disponible",
        });
        classes.join(" ")
    }

    /// Hover text for the cell
    pub fn tooltip(&self) -> String {
        match self.status {
            DayStatus::HasRecords(_) => self
                .records
                .iter()
                .map(ConsumptionRecord::summary_line)
                .collect::<Vec<_>>()
                .join("\n"),
            DayStatus::PastWithoutRecords => "Sin registros de consumo".to_string(),
            DayStatus::Available => "Clic para ver opciones".to_string(),
        }
    }

    /// Badge count, present only for days with records
    pub fn badge(&self) -> Option<usize> {
        match self.status {
            DayStatus::HasRecords(count) => Some(count),
            _ => None,
        }
    }
}

/// The rendered month: title plus exactly [`GRID_CELLS`] days
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub title: String,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Build the 6x7 grid for the month starting at `month_start`
    pub fn build(
        month_start: NaiveDate,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        consumptions: &ConsumptionsByDate,
    ) -> Self {
        let month_start = first_of_month(month_start);
        let start = grid_start(month_start);

        let days = (0..GRID_CELLS as u64)
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .map(|date| {
                let key = date_key(date);
                let records = consumptions
                    .get(&key)
                    .filter(|records| !records.is_empty())
                    .cloned()
                    .unwrap_or_default();

                let status = if !records.is_empty() {
                    DayStatus::HasRecords(records.len())
                } else if date < today {
                    DayStatus::PastWithoutRecords
                } else {
                    DayStatus::Available
                };

                DayCell {
                    date,
                    key,
                    day_number: date.day(),
                    in_shown_month: date.month() == month_start.month()
                        && date.year() == month_start.year(),
                    is_today: date == today,
                    is_selected: selected == Some(date),
                    status,
                    records,
                }
            })
            .collect();

        Self {
            title: month_title(month_start),
            days,
        }
    }
}

/// A month fetch in flight, tagged with the generation it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRequest {
    pub generation: u64,
    pub month: u32,
    pub year: i32,
}

/// Widget state for the consumption calendar
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    today: NaiveDate,
    /// Month the grid currently depicts, moved only when its data lands
    shown_month: NaiveDate,
    /// Month navigation points at, possibly still being fetched
    target_month: NaiveDate,
    selected_date: Option<NaiveDate>,
    consumptions_by_date: ConsumptionsByDate,
    latest_request: u64,
}

impl CalendarState {
    /// Start on the month containing `today`, nothing selected and no data
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            shown_month: first_of_month(today),
            target_month: first_of_month(today),
            selected_date: None,
            consumptions_by_date: ConsumptionsByDate::new(),
            latest_request: 0,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn shown_month(&self) -> NaiveDate {
        self.shown_month
    }

    pub fn target_month(&self) -> NaiveDate {
        self.target_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn consumptions(&self) -> &ConsumptionsByDate {
        &self.consumptions_by_date
    }

    /// Records for a date key, empty when nothing is recorded
    pub fn records_for(&self, key: &str) -> &[ConsumptionRecord] {
        self.consumptions_by_date
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Point navigation one month back. The grid keeps depicting the
    /// shown month until [`complete_fetch`](Self::complete_fetch) applies data.
    pub fn previous_month(&mut self) {
        self.target_month = self
            .target_month
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.target_month);
    }

    pub fn next_month(&mut self) {
        self.target_month = self
            .target_month
            .checked_add_months(Months::new(1))
            .unwrap_or(self.target_month);
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Register a new fetch for the target month. Any request issued
    /// earlier becomes stale.
    pub fn begin_fetch(&mut self) -> MonthRequest {
        self.latest_request += 1;
        MonthRequest {
            generation: self.latest_request,
            month: self.target_month.month(),
            year: self.target_month.year(),
        }
    }

    /// Apply the outcome of `request`: the requested month becomes the
    /// shown one together with its data. `None` means the fetch failed and
    /// the month is shown without records. Returns `false`, leaving the
    /// state untouched, when a newer request has been issued since.
    pub fn complete_fetch(&mut self, request: &MonthRequest, result: Option<ConsumptionsByDate>) -> bool {
        if request.generation != self.latest_request {
            return false;
        }
        if let Some(month_start) = NaiveDate::from_ymd_opt(request.year, request.month, 1) {
            self.shown_month = month_start;
        }
        self.consumptions_by_date = result.unwrap_or_default();
        true
    }

    pub fn title(&self) -> String {
        month_title(self.shown_month)
    }

    pub fn grid(&self) -> MonthGrid {
        MonthGrid::build(
            self.shown_month,
            self.today,
            self.selected_date,
            &self.consumptions_by_date,
        )
    }
}

/// A consumption as listed in the day-options preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewItem {
    pub material: String,
    pub quantity: String,
    pub activity: String,
    pub responsible: String,
}

/// Everything the day-options modal shows for one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOptions {
    pub heading: String,
    pub record_count: usize,
    pub status_text: String,
    pub count_text: String,
    /// Link to register a consumption; absent without a project
    pub add_url: Option<String>,
    /// Link to the list of that day's consumptions; absent without records
    pub list_url: Option<String>,
    pub preview: Vec<PreviewItem>,
}

impl DayOptions {
    pub fn new(date: NaiveDate, key: &str, records: &[ConsumptionRecord], project_id: Option<&str>) -> Self {
        let record_count = records.len();
        let (status_text, count_text) = match record_count {
            0 => (
                "Sin registros".to_string(),
                "No hay consumos registrados para este día.".to_string(),
            ),
            1 => (
                "1 registro".to_string(),
                "1 consumo registrado este día.".to_string(),
            ),
            n => (
                format!("{} registros", n),
                format!("{} consumos registrados este día.", n),
            ),
        };

        let preview = records
            .iter()
            .map(|record| PreviewItem {
                material: record.material.clone(),
                quantity: record.quantity_with_unit(),
                activity: record.activity.clone(),
                responsible: record
                    .responsible_name()
                    .unwrap_or(NO_RESPONSIBLE)
                    .to_string(),
            })
            .collect();

        Self {
            heading: capitalize(&long_date(date)),
            record_count,
            status_text,
            count_text,
            add_url: project_id.map(|project| register_consumption_url(project, key)),
            list_url: project_id
                .filter(|_| record_count > 0)
                .map(|project| list_consumptions_url(project, key)),
            preview,
        }
    }

    pub fn has_records(&self) -> bool {
        self.record_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumption::Quantity;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(material: &str) -> ConsumptionRecord {
        ConsumptionRecord {
            material: material.to_string(),
            quantity: Quantity::Number(2.5),
            unit: "kg".to_string(),
            activity: "Mampostería".to_string(),
            responsible: None,
        }
    }

    #[test]
    fn test_grid_shape_for_every_month() {
        let today = date(2026, 10, 19);
        let empty = ConsumptionsByDate::new();

        for year in [2024, 2025, 2026] {
            for month in 1..=12 {
                let month_start = date(year, month, 1);
                let grid = MonthGrid::build(month_start, today, None, &empty);

                assert_eq!(grid.days.len(), GRID_CELLS);
                assert_eq!(grid.days[0].date.weekday(), Weekday::Mon);
                assert!(grid.days[0].date <= month_start);

                // Every day of the target month is present
                let in_month = grid.days.iter().filter(|d| d.in_shown_month).count() as u32;
                let last = month_start.checked_add_months(Months::new(1)).unwrap().pred_opt().unwrap();
                assert_eq!(in_month, last.day(), "{}-{}", year, month);

                // Consecutive days
                for pair in grid.days.windows(2) {
                    assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
                }
            }
        }
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_days() {
        // June 2026 starts on a Monday
        let grid = MonthGrid::build(date(2026, 6, 1), date(2026, 6, 10), None, &ConsumptionsByDate::new());
        assert_eq!(grid.days[0].date, date(2026, 6, 1));
        assert!(grid.days[0].in_shown_month);
    }

    #[test]
    fn test_today_marked_once() {
        let today = date(2026, 10, 19);
        let grid = MonthGrid::build(date(2026, 10, 1), today, None, &ConsumptionsByDate::new());

        let todays: Vec<_> = grid.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, today);
        assert!(todays[0].css_classes().contains("today"));
    }

    #[test]
    fn test_day_classification() {
        let today = date(2026, 10, 19);
        let mut consumptions = ConsumptionsByDate::new();
        consumptions.insert("2026-10-05".to_string(), vec![record("Cemento"), record("Arena")]);
        consumptions.insert("2026-10-06".to_string(), vec![]);
        consumptions.insert("2026-10-25".to_string(), vec![record("Ladrillo")]);

        let grid = MonthGrid::build(date(2026, 10, 1), today, Some(date(2026, 10, 6)), &consumptions);
        let cell = |d: u32| grid.days.iter().find(|c| c.date == date(2026, 10, d)).unwrap();

        let with_records = cell(5);
        assert_eq!(with_records.status, DayStatus::HasRecords(2));
        assert_eq!(with_records.badge(), Some(2));
        assert!(with_records.css_classes().contains("has-registro"));
        assert_eq!(
            with_records.tooltip(),
            "Cemento: 2.5 kg (Mampostería)\nArena: 2.5 kg (Mampostería)"
        );

        // An empty list counts as no records
        let empty_list = cell(6);
        assert_eq!(empty_list.status, DayStatus::PastWithoutRecords);
        assert!(empty_list.css_classes().contains("sin-registro"));
        assert!(empty_list.is_selected);
        assert!(empty_list.css_classes().contains("selected"));

        // Future day with records is still green
        assert_eq!(cell(25).status, DayStatus::HasRecords(1));

        assert_eq!(cell(18).status, DayStatus::PastWithoutRecords);
        assert_eq!(cell(19).status, DayStatus::Available);
        assert_eq!(cell(20).status, DayStatus::Available);
        assert_eq!(cell(20).badge(), None);
    }

    #[test]
    fn test_leading_days_are_muted() {
        // October 2026 starts on a Thursday: Sep 28-30 lead the grid
        let grid = MonthGrid::build(date(2026, 10, 1), date(2026, 10, 19), None, &ConsumptionsByDate::new());
        assert_eq!(grid.days[0].date, date(2026, 9, 28));
        assert_eq!(grid.days[0].css_classes(), "day muted sin-registro");
        assert!(!grid.days[3].css_classes().contains("muted"));
    }

    #[test]
    fn test_titles_and_long_dates() {
        assert_eq!(month_title(date(2026, 10, 1)), "Octubre 2026");
        assert_eq!(month_title(date(2025, 1, 1)), "Enero 2025");
        assert_eq!(long_date(date(2026, 10, 19)), "lunes, 19 de octubre de 2026");
        assert_eq!(long_date(date(2026, 3, 1)), "domingo, 1 de marzo de 2026");
    }

    #[test]
    fn test_navigation_crosses_years() {
        let mut state = CalendarState::new(date(2026, 1, 31));
        assert_eq!(state.shown_month(), date(2026, 1, 1));

        state.previous_month();
        assert_eq!(state.target_month(), date(2025, 12, 1));
        let request = state.begin_fetch();
        assert_eq!((request.month, request.year), (12, 2025));
        assert!(state.complete_fetch(&request, None));
        assert_eq!(state.shown_month(), date(2025, 12, 1));
        assert_eq!(state.title(), "Diciembre 2025");

        state.next_month();
        state.next_month();
        assert_eq!(state.target_month(), date(2026, 2, 1));
        // today stays fixed
        assert_eq!(state.today(), date(2026, 1, 31));
    }

    #[test]
    fn test_fetch_replaces_data_wholesale() {
        let mut state = CalendarState::new(date(2026, 10, 19));

        let mut first = ConsumptionsByDate::new();
        first.insert("2026-10-01".to_string(), vec![record("Cemento")]);
        let request = state.begin_fetch();
        assert_eq!((request.month, request.year), (10, 2026));
        assert!(state.complete_fetch(&request, Some(first)));
        assert_eq!(state.records_for("2026-10-01").len(), 1);

        let mut second = ConsumptionsByDate::new();
        second.insert("2026-10-02".to_string(), vec![record("Arena")]);
        let request = state.begin_fetch();
        assert!(state.complete_fetch(&request, Some(second)));
        assert!(state.records_for("2026-10-01").is_empty());
        assert_eq!(state.records_for("2026-10-02").len(), 1);
    }

    #[test]
    fn test_failed_fetch_resets_to_empty() {
        let mut state = CalendarState::new(date(2026, 10, 19));
        let mut data = ConsumptionsByDate::new();
        data.insert("2026-10-01".to_string(), vec![record("Cemento")]);
        let request = state.begin_fetch();
        state.complete_fetch(&request, Some(data));

        state.next_month();
        let request = state.begin_fetch();
        assert_eq!(request.month, 11);
        assert!(state.complete_fetch(&request, None));
        assert!(state.consumptions().is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = CalendarState::new(date(2026, 10, 19));

        let slow = state.begin_fetch();
        state.next_month();
        let fast = state.begin_fetch();

        let mut november = ConsumptionsByDate::new();
        november.insert("2026-11-03".to_string(), vec![record("Varilla")]);
        assert!(state.complete_fetch(&fast, Some(november)));

        let mut october = ConsumptionsByDate::new();
        october.insert("2026-10-03".to_string(), vec![record("Cemento")]);
        assert!(!state.complete_fetch(&slow, Some(october)));

        assert_eq!(state.records_for("2026-11-03").len(), 1);
        assert!(state.records_for("2026-10-03").is_empty());
        assert_eq!(state.shown_month(), date(2026, 11, 1));
    }

    #[test]
    fn test_grid_waits_for_navigation_fetch() {
        let mut state = CalendarState::new(date(2026, 10, 19));
        let mut october = ConsumptionsByDate::new();
        october.insert("2026-10-15".to_string(), vec![record("Cemento")]);
        let request = state.begin_fetch();
        assert!(state.complete_fetch(&request, Some(october)));

        state.next_month();
        let pending = state.begin_fetch();
        assert_eq!((pending.month, pending.year), (11, 2026));

        // A day click while November is loading still redraws October
        state.select(date(2026, 10, 15));
        assert_eq!(state.shown_month(), date(2026, 10, 1));
        assert_eq!(state.title(), "Octubre 2026");
        let grid = state.grid();
        let cell = grid.days.iter().find(|c| c.date == date(2026, 10, 15)).unwrap();
        assert!(cell.in_shown_month);
        assert_eq!(cell.status, DayStatus::HasRecords(1));

        let mut november = ConsumptionsByDate::new();
        november.insert("2026-11-03".to_string(), vec![record("Varilla")]);
        assert!(state.complete_fetch(&pending, Some(november)));
        assert_eq!(state.title(), "Noviembre 2026");
        let grid = state.grid();
        let cell = grid.days.iter().find(|c| c.date == date(2026, 11, 3)).unwrap();
        assert_eq!(cell.status, DayStatus::HasRecords(1));
    }

    #[test]
    fn test_stale_response_keeps_shown_month() {
        let mut state = CalendarState::new(date(2026, 10, 19));
        let initial = state.begin_fetch();
        state.next_month();
        let _pending = state.begin_fetch();

        assert!(!state.complete_fetch(&initial, None));
        assert_eq!(state.shown_month(), date(2026, 10, 1));
        assert_eq!(state.target_month(), date(2026, 11, 1));
    }

    #[test]
    fn test_day_options_with_records() {
        let mut with_person = record("Cemento");
        with_person.responsible = Some("Luisa".to_string());
        let records = vec![with_person, record("Arena")];

        let options = DayOptions::new(date(2026, 10, 5), "2026-10-05", &records, Some("12"));
        assert_eq!(options.heading, "Lunes, 5 de octubre de 2026");
        assert!(options.has_records());
        assert_eq!(options.status_text, "2 registros");
        assert_eq!(options.add_url.as_deref(), Some("/projects/12/consumo/registrar/?fecha=2026-10-05"));
        assert_eq!(
            options.list_url.as_deref(),
            Some("/projects/12/consumo/listar/?fecha_desde=2026-10-05&fecha_hasta=2026-10-05")
        );
        assert_eq!(options.preview[0].responsible, "Luisa");
        assert_eq!(options.preview[1].responsible, NO_RESPONSIBLE);
        assert_eq!(options.preview[1].quantity, "2.5 kg");
    }

    #[test]
    fn test_day_options_without_records() {
        let options = DayOptions::new(date(2026, 10, 20), "2026-10-20", &[], Some("12"));
        assert!(!options.has_records());
        assert_eq!(options.status_text, "Sin registros");
        assert!(options.add_url.is_some());
        assert_eq!(options.list_url, None);
        assert!(options.preview.is_empty());

        let no_project = DayOptions::new(date(2026, 10, 20), "2026-10-20", &[], None);
        assert_eq!(no_project.add_url, None);
    }
}
