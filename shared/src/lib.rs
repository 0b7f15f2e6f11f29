//! Target-independent logic behind the project calendar and the
//! price/quantity field validator. Nothing in here touches the DOM.

pub mod calendar;
pub mod config;
pub mod consumption;
pub mod number;
pub mod routes;
pub mod validation;

pub use calendar::{CalendarState, DayCell, DayOptions, DayStatus, MonthGrid, MonthRequest, PreviewItem};
pub use config::{CalendarDomConfig, ConfigError, LogLevel, ValidatorConfig, WidgetConfig};
pub use consumption::{date_key, ConsumptionRecord, ConsumptionsByDate, MonthConsumptionsResponse, Quantity};
pub use number::NumberStyle;
pub use validation::{FieldError, FieldKind, KeyDecision};
