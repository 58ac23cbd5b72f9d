// --- File: crates/turnero_client/src/service.rs ---
//! Service abstraction for the scheduling backend.
//!
//! The booking UI depends on this trait rather than on the concrete HTTP
//! client, so controller tests can inject a mock without a network.

use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

use crate::error::TurnosApiError;
use crate::models::{ReservationConfirmed, ReservationRequest};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations the booking UI needs from the scheduling backend.
pub trait SchedulingApi: Send + Sync {
    /// Bookable start times for one calendar date, in backend order.
    fn availability(&self, date: NaiveDate) -> BoxFuture<'static, Vec<String>, TurnosApiError>;

    /// Create a reservation from a completed draft.
    fn reserve(
        &self,
        request: ReservationRequest,
    ) -> BoxFuture<'static, ReservationConfirmed, TurnosApiError>;
}
