// --- File: crates/services/turnero_tui/src/app.rs ---
//! Booking screen state and transitions.
//!
//! All UI state lives in [`App`] and is mutated only through the named
//! transitions below, on the single UI task. Network calls run in spawned
//! tasks and come back as [`ApiEvent`]s; rendering (see `view`) never
//! mutates.

use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;
use turnero_client::{ReservationConfirmed, ReservationRequest, SchedulingApi, TurnosApiError};

/// Shown when the availability fetch fails for any reason; the cause goes to
/// the log, not the UI.
pub const AVAILABILITY_ERROR_TEXT: &str =
    "Could not load availability. Check that the backend is running.";
/// Shown when the date field does not parse.
pub const INVALID_DATE_TEXT: &str = "Enter the date as YYYY-MM-DD.";
/// Shown when submitting with an empty name or email.
pub const MISSING_FIELDS_TEXT: &str = "Please complete all fields before booking.";
/// Shown when a reservation fails without a backend-provided message.
pub const RESERVATION_ERROR_TEXT: &str = "Could not process the reservation. Please try again.";

/// Completion of a spawned backend call, applied by the UI task.
#[derive(Debug)]
pub enum ApiEvent {
    Availability {
        /// Generation the request was issued under; stale completions are
        /// discarded against the current generation.
        seq: u64,
        date: NaiveDate,
        result: Result<Vec<String>, TurnosApiError>,
    },
    Reservation {
        result: Result<ReservationConfirmed, TurnosApiError>,
    },
}

/// Result banner for the last reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Error(String),
}

/// Which widget currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Date,
    Slots,
    Name,
    Email,
}

/// Reservation form. Exists exactly while a slot is selected, so the draft's
/// date and start time cannot drift from the selection.
#[derive(Debug)]
pub struct DraftForm {
    pub date: NaiveDate,
    pub start_time: String,
    pub name: Input,
    pub email: Input,
}

impl DraftForm {
    fn new(date: NaiveDate, start_time: String) -> Self {
        Self {
            date,
            start_time,
            name: Input::default(),
            email: Input::default(),
        }
    }

    fn to_request(&self) -> ReservationRequest {
        ReservationRequest {
            fecha: self.date.format("%Y-%m-%d").to_string(),
            hora_inicio: self.start_time.clone(),
            nombre_cliente: self.name.value().trim().to_string(),
            email_cliente: self.email.value().trim().to_string(),
        }
    }
}

pub struct App {
    pub date_input: Input,
    pub selected_date: NaiveDate,
    pub slots: Vec<String>,
    pub slot_cursor: usize,
    pub availability_error: Option<String>,
    pub pending_availability: bool,
    pub pending_reservation: bool,
    pub form: Option<DraftForm>,
    pub outcome: Option<Outcome>,
    pub focus: Focus,
    pub should_quit: bool,
    fetch_seq: u64,
    api: Arc<dyn SchedulingApi>,
    events: mpsc::UnboundedSender<ApiEvent>,
}

impl App {
    /// Starts on tomorrow's date and immediately requests its availability.
    pub fn new(api: Arc<dyn SchedulingApi>, events: mpsc::UnboundedSender<ApiEvent>) -> Self {
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        let mut app = Self {
            date_input: Input::new(tomorrow.format("%Y-%m-%d").to_string()),
            selected_date: tomorrow,
            slots: Vec::new(),
            slot_cursor: 0,
            availability_error: None,
            pending_availability: false,
            pending_reservation: false,
            form: None,
            outcome: None,
            focus: Focus::Date,
            should_quit: false,
            fetch_seq: 0,
            api,
            events,
        };
        app.request_availability();
        app
    }

    /// The selected slot, if any; always the form's start time.
    pub fn selected_slot(&self) -> Option<&str> {
        self.form.as_ref().map(|f| f.start_time.as_str())
    }

    /// Issues the availability fetch for the current date under a fresh
    /// generation; older in-flight requests are superseded, not cancelled.
    pub fn request_availability(&mut self) {
        self.fetch_seq += 1;
        let seq = self.fetch_seq;
        let date = self.selected_date;
        self.pending_availability = true;
        self.availability_error = None;
        self.slots.clear();
        self.slot_cursor = 0;
        debug!(%date, seq, "Requesting availability");

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.availability(date).await;
            let _ = events.send(ApiEvent::Availability { seq, date, result });
        });
    }

    /// Confirms the date field: a parsable date becomes the selection and is
    /// fetched; anything else is reported without a network call.
    pub fn commit_date(&mut self) {
        match NaiveDate::parse_from_str(self.date_input.value().trim(), "%Y-%m-%d") {
            Ok(date) => {
                info!(%date, "Date selected");
                self.selected_date = date;
                self.form = None;
                self.outcome = None;
                self.focus = Focus::Slots;
                self.request_availability();
            }
            Err(_) => {
                self.slots.clear();
                self.slot_cursor = 0;
                self.availability_error = Some(INVALID_DATE_TEXT.to_string());
            }
        }
    }

    /// Selects the slot under the cursor and opens a fresh draft for it.
    pub fn select_slot(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        let slot = self.slots[self.slot_cursor.min(self.slots.len() - 1)].clone();
        info!(%slot, date = %self.selected_date, "Slot selected");
        self.outcome = None;
        self.form = Some(DraftForm::new(self.selected_date, slot));
        self.focus = Focus::Name;
    }

    /// Hides the form and discards the draft.
    pub fn cancel_form(&mut self) {
        self.form = None;
        self.focus = Focus::Slots;
    }

    /// Submits the reservation form. Empty fields never reach the network;
    /// while a reservation is in flight further submits are ignored.
    pub fn submit(&mut self) {
        let Some(form) = &self.form else {
            return;
        };
        if self.pending_reservation {
            return;
        }
        self.outcome = None;

        let request = form.to_request();
        if request.nombre_cliente.is_empty() || request.email_cliente.is_empty() {
            self.outcome = Some(Outcome::Error(MISSING_FIELDS_TEXT.to_string()));
            return;
        }

        self.pending_reservation = true;
        info!(fecha = %request.fecha, hora = %request.hora_inicio, "Submitting reservation");
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.reserve(request).await;
            let _ = events.send(ApiEvent::Reservation { result });
        });
    }

    /// Applies a completed backend call. An availability completion from a
    /// superseded generation leaves state untouched.
    pub fn handle_api_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::Availability { seq, date, result } => {
                if seq != self.fetch_seq {
                    debug!(seq, current = self.fetch_seq, %date, "Discarding stale availability response");
                    return;
                }
                self.pending_availability = false;
                match result {
                    Ok(slots) => {
                        debug!(%date, count = slots.len(), "Availability loaded");
                        self.slots = slots;
                        self.slot_cursor = 0;
                    }
                    Err(err) => {
                        warn!(%date, error = %err, "Availability fetch failed");
                        self.slots.clear();
                        self.availability_error = Some(AVAILABILITY_ERROR_TEXT.to_string());
                    }
                }
            }
            ApiEvent::Reservation { result } => {
                self.pending_reservation = false;
                match result {
                    Ok(confirmed) => {
                        info!(id = %confirmed.id, "Reservation confirmed");
                        self.outcome = Some(Outcome::Success(format!(
                            "Reservation confirmed! ID: {}. A confirmation will be sent to {}.",
                            confirmed.id, confirmed.email_cliente
                        )));
                        self.form = None;
                        self.focus = Focus::Slots;
                        // Reload so the booked slot disappears from the list.
                        self.request_availability();
                    }
                    Err(err) => {
                        warn!(error = %err, "Reservation failed");
                        let text = err
                            .backend_message()
                            .map(str::to_string)
                            .unwrap_or_else(|| RESERVATION_ERROR_TEXT.to_string());
                        self.outcome = Some(Outcome::Error(text));
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.focus {
            Focus::Date => match key.code {
                KeyCode::Enter => self.commit_date(),
                KeyCode::Tab | KeyCode::Down => self.focus = Focus::Slots,
                KeyCode::Esc => self.should_quit = true,
                _ => {
                    self.date_input.handle_event(&Event::Key(key));
                }
            },
            Focus::Slots => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('d') | KeyCode::BackTab => self.focus = Focus::Date,
                KeyCode::Tab => {
                    self.focus = if self.form.is_some() {
                        Focus::Name
                    } else {
                        Focus::Date
                    };
                }
                KeyCode::Up => self.slot_cursor = self.slot_cursor.saturating_sub(1),
                KeyCode::Down => {
                    if self.slot_cursor + 1 < self.slots.len() {
                        self.slot_cursor += 1;
                    }
                }
                KeyCode::Enter => self.select_slot(),
                _ => {}
            },
            Focus::Name => match key.code {
                KeyCode::Esc => self.cancel_form(),
                KeyCode::Enter => self.submit(),
                KeyCode::Tab | KeyCode::Down => self.focus = Focus::Email,
                _ => {
                    if let Some(form) = &mut self.form {
                        form.name.handle_event(&Event::Key(key));
                    }
                }
            },
            Focus::Email => match key.code {
                KeyCode::Esc => self.cancel_form(),
                KeyCode::Enter => self.submit(),
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up => self.focus = Focus::Name,
                _ => {
                    if let Some(form) = &mut self.form {
                        form.email.handle_event(&Event::Key(key));
                    }
                }
            },
        }
    }
}
