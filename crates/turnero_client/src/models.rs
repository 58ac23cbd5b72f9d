// --- File: crates/turnero_client/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

// --- Data Structures ---

/// Reservation payload for `POST /api/turnos/reservar`.
///
/// Field names on the wire are the backend's contract; Rust names are the
/// snake_cased equivalents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservationRequest {
    pub fecha: String,
    #[serde(rename = "horaInicio")]
    pub hora_inicio: String,
    #[serde(rename = "nombreCliente")]
    pub nombre_cliente: String,
    #[serde(rename = "emailCliente")]
    pub email_cliente: String,
}

/// Successful reservation response.
///
/// The backend is authoritative for the confirmed id and email; the echoed
/// slot fields are optional because older backend versions omit them.
#[derive(Deserialize, Debug, Clone)]
pub struct ReservationConfirmed {
    pub id: ReservationId,
    #[serde(rename = "emailCliente")]
    pub email_cliente: String,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(rename = "horaInicio", default)]
    pub hora_inicio: Option<String>,
    #[serde(rename = "nombreCliente", default)]
    pub nombre_cliente: Option<String>,
}

/// Reservation ids arrive as JSON numbers or strings depending on the
/// backend version; both display identically.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReservationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationId::Number(n) => write!(f, "{n}"),
            ReservationId::Text(s) => f.write_str(s),
        }
    }
}
