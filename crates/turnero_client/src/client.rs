// --- File: crates/turnero_client/src/client.rs ---
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};
use turnero_config::BackendConfig;

use crate::error::TurnosApiError;
use crate::models::{ReservationConfirmed, ReservationRequest};
use crate::service::{BoxFuture, SchedulingApi};

/// HTTP client for the turnos scheduling backend.
///
/// One blocking round trip per call: no retries, no caching, no backoff.
/// The reqwest timeout from [`BackendConfig`] is the only bound.
#[derive(Debug, Clone)]
pub struct TurnosApi {
    client: Client,
    base_url: String,
}

impl TurnosApi {
    /// Create a client for the configured backend origin.
    pub fn new(config: &BackendConfig) -> Result<Self, TurnosApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /api/turnos/disponibilidad?fecha=YYYY-MM-DD`
    ///
    /// Returns the bookable start times for `date` in backend order.
    pub async fn availability(&self, date: NaiveDate) -> Result<Vec<String>, TurnosApiError> {
        let url = format!("{}/api/turnos/disponibilidad", self.base_url);
        let fecha = date.format("%Y-%m-%d").to_string();
        debug!(%fecha, "Fetching availability");

        let response = self
            .client
            .get(&url)
            .query(&[("fecha", fecha.as_str())])
            .send()
            .await?;
        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!(%fecha, %err, "Availability request rejected");
            return Err(err);
        }

        let body = response.text().await?;
        let slots: Vec<String> = serde_json::from_str(&body)?;
        debug!(%fecha, count = slots.len(), "Availability fetched");
        Ok(slots)
    }

    /// `POST /api/turnos/reservar`
    ///
    /// Creates a reservation; a non-2xx response surfaces the backend's error
    /// body (conflict, validation failure) as the error detail.
    pub async fn reserve(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationConfirmed, TurnosApiError> {
        let url = format!("{}/api/turnos/reservar", self.base_url);
        debug!(fecha = %request.fecha, hora = %request.hora_inicio, "Creating reservation");

        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            let err = error_from_response(response).await;
            error!(%err, "Reservation rejected");
            return Err(err);
        }

        let body = response.text().await?;
        let confirmed: ReservationConfirmed = serde_json::from_str(&body)?;
        debug!(id = %confirmed.id, "Reservation created");
        Ok(confirmed)
    }
}

impl SchedulingApi for TurnosApi {
    fn availability(&self, date: NaiveDate) -> BoxFuture<'static, Vec<String>, TurnosApiError> {
        let api = self.clone();
        Box::pin(async move { api.availability(date).await })
    }

    fn reserve(
        &self,
        request: ReservationRequest,
    ) -> BoxFuture<'static, ReservationConfirmed, TurnosApiError> {
        let api = self.clone();
        Box::pin(async move { api.reserve(&request).await })
    }
}

/// Structured error body shape. Spring-style error bodies carry a `message`
/// (plus fields like `timestamp` and `path`, which are ignored); some
/// endpoints use `error` instead.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Normalizes a non-2xx response into [`TurnosApiError::Api`], carrying the
/// most useful human-readable detail the body provides: a structured
/// `message`/`error` field, else the raw body text, else the status reason.
async fn error_from_response(response: Response) -> TurnosApiError {
    let status = response.status();
    let fallback = status
        .canonical_reason()
        .unwrap_or("HTTP error")
        .to_string();
    let body = response.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.message.or(parsed.error).unwrap_or_else(|| body.clone()),
        Err(_) => body,
    };
    let message = if message.trim().is_empty() {
        fallback
    } else {
        message
    };

    TurnosApiError::Api {
        status: status.as_u16(),
        message,
    }
}
