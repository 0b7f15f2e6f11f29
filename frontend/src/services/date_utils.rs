use chrono::NaiveDate;
use js_sys::Date;

/// Today in the browser's local time zone, time of day dropped
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}
