use gloo::net::http::Request;
use shared::routes::month_consumptions_url;
use shared::MonthConsumptionsResponse;
use thiserror::Error;

/// Why a request to the backend failed
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// API client for the project consumption endpoints
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client; an empty base URL means the page's own origin
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Consumption summaries of one month, keyed by date
    pub async fn get_month_consumptions(
        &self,
        project_id: &str,
        month: u32,
        year: i32,
    ) -> Result<MonthConsumptionsResponse, ApiError> {
        let url = month_consumptions_url(&self.base_url, project_id, month, year);

        let response = Request::get(&url)
            .header("Accept", "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status { status, body });
        }

        response
            .json::<MonthConsumptionsResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
