// --- File: crates/turnero_client/src/error.rs ---
use thiserror::Error;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum TurnosApiError {
    #[error("Turnos API request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Turnos API returned an error: Status={status}, Message='{message}'")]
    Api { status: u16, message: String },
    #[error("Failed to parse Turnos API response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TurnosApiError {
    /// Backend-provided detail for a rejected request, if the response body
    /// carried one. Transport and parse failures have none.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            TurnosApiError::Api { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}
