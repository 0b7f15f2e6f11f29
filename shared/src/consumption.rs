use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Consumption records keyed by calendar date (`YYYY-MM-DD`)
pub type ConsumptionsByDate = BTreeMap<String, Vec<ConsumptionRecord>>;

/// A logged usage of a material on a given day, as summarized by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub material: String,
    #[serde(rename = "cantidad", default)]
    pub quantity: Quantity,
    #[serde(rename = "unidad", default, deserialize_with = "null_as_empty")]
    pub unit: String,
    #[serde(rename = "actividad", default, deserialize_with = "null_as_empty")]
    pub activity: String,
    /// Person responsible for the consumption, when the server knows one
    #[serde(rename = "responsable", default)]
    pub responsible: Option<String>,
}

/// Quantity as sent by the backend.
///
/// Decimal fields may arrive either as JSON numbers or as strings
/// (e.g. `"12.50"`), so both shapes are accepted and shown verbatim.
/// A `null` or absent quantity is kept as `Missing` and shown blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(value) => write!(f, "{}", value),
            Quantity::Text(text) => f.write_str(text),
            Quantity::Missing => Ok(()),
        }
    }
}

impl ConsumptionRecord {
    /// One-line summary used in day tooltips: `material: quantity unit (activity)`
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} {} ({})",
            self.material, self.quantity, self.unit, self.activity
        )
    }

    /// `quantity unit`, trimmed when the unit is missing
    pub fn quantity_with_unit(&self) -> String {
        format!("{} {}", self.quantity, self.unit).trim().to_string()
    }

    /// Responsible party, or `None` when absent or blank
    pub fn responsible_name(&self) -> Option<&str> {
        self.responsible
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Response of `GET /projects/{id}/consumo/api/mes/`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthConsumptionsResponse {
    #[serde(default)]
    pub consumos_por_fecha: ConsumptionsByDate,
}

/// Calendar key for a date, `YYYY-MM-DD`
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_response() {
        let body = r#"{
            "consumos_por_fecha": {
                "2026-10-05": [
                    {"material": "Cemento", "cantidad": 12.5, "unidad": "bultos", "actividad": "Losa", "responsable": "Ana"},
                    {"material": "Arena", "cantidad": "3.00", "unidad": "m3", "actividad": "Losa"}
                ]
            }
        }"#;

        let response: MonthConsumptionsResponse = serde_json::from_str(body).unwrap();
        let records = &response.consumos_por_fecha["2026-10-05"];
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].quantity, Quantity::Number(12.5));
        assert_eq!(records[1].quantity, Quantity::Text("3.00".to_string()));
        assert_eq!(records[1].responsible, None);
    }

    #[test]
    fn test_incomplete_record_keeps_the_month() {
        let body = r#"{
            "consumos_por_fecha": {
                "2026-10-05": [
                    {"material": null, "cantidad": null, "unidad": "kg", "actividad": null},
                    {"cantidad": 2}
                ],
                "2026-10-06": [
                    {"material": "Arena", "cantidad": 1, "unidad": "m3", "actividad": "Losa"}
                ]
            }
        }"#;

        let response: MonthConsumptionsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.consumos_por_fecha.len(), 2);

        let records = &response.consumos_por_fecha["2026-10-05"];
        assert_eq!(records[0].material, "");
        assert_eq!(records[0].quantity, Quantity::Missing);
        assert_eq!(records[0].quantity_with_unit(), "kg");
        assert_eq!(records[1].material, "");
        assert_eq!(records[1].quantity, Quantity::Number(2.0));
        assert_eq!(response.consumos_por_fecha["2026-10-06"][0].material, "Arena");
    }

    #[test]
    fn test_missing_map_is_empty() {
        let response: MonthConsumptionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.consumos_por_fecha.is_empty());
    }

    #[test]
    fn test_summary_line() {
        let record = ConsumptionRecord {
            material: "Cemento".to_string(),
            quantity: Quantity::Number(10.0),
            unit: "bultos".to_string(),
            activity: "Cimentación".to_string(),
            responsible: None,
        };
        // Whole numbers render without a trailing ".0"
        assert_eq!(record.summary_line(), "Cemento: 10 bultos (Cimentación)");
        assert_eq!(record.quantity_with_unit(), "10 bultos");
    }

    #[test]
    fn test_blank_responsible_is_absent() {
        let record = ConsumptionRecord {
            material: "Varilla".to_string(),
            quantity: Quantity::Text("4".to_string()),
            unit: String::new(),
            activity: "Columnas".to_string(),
            responsible: Some("   ".to_string()),
        };
        assert_eq!(record.responsible_name(), None);
        assert_eq!(record.quantity_with_unit(), "4");
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(date_key(date), "2026-03-07");
    }
}
