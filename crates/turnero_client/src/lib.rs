// --- File: crates/turnero_client/src/lib.rs ---
// Declare modules within this crate
pub mod client;
pub mod error;
pub mod models;
pub mod service;

// Re-export the types the UI crate works with
pub use client::TurnosApi;
pub use error::TurnosApiError;
pub use models::{ReservationConfirmed, ReservationId, ReservationRequest};
pub use service::{BoxFuture, SchedulingApi};
