// --- File: crates/services/turnero_tui/src/app_test.rs ---
#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate};
    use mockall::mock;
    use mockall::predicate::eq;
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tui_input::Input;
    use turnero_client::{
        BoxFuture, ReservationConfirmed, ReservationId, ReservationRequest, SchedulingApi,
        TurnosApiError,
    };

    use crate::app::{
        ApiEvent, App, Outcome, AVAILABILITY_ERROR_TEXT, MISSING_FIELDS_TEXT,
        RESERVATION_ERROR_TEXT,
    };

    mock! {
        Api {}
        impl SchedulingApi for Api {
            fn availability(&self, date: NaiveDate) -> BoxFuture<'static, Vec<String>, TurnosApiError>;
            fn reserve(
                &self,
                request: ReservationRequest,
            ) -> BoxFuture<'static, ReservationConfirmed, TurnosApiError>;
        }
    }

    fn tomorrow() -> NaiveDate {
        Local::now().date_naive() + Duration::days(1)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ok_slots(slots: &[&str]) -> BoxFuture<'static, Vec<String>, TurnosApiError> {
        let slots: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        Box::pin(async move { Ok(slots) })
    }

    fn slots_err(status: u16, message: &str) -> BoxFuture<'static, Vec<String>, TurnosApiError> {
        let err = TurnosApiError::Api {
            status,
            message: message.to_string(),
        };
        Box::pin(async move { Err(err) })
    }

    fn reserve_ok(
        id: ReservationId,
        email: &str,
    ) -> BoxFuture<'static, ReservationConfirmed, TurnosApiError> {
        let confirmed = ReservationConfirmed {
            id,
            email_cliente: email.to_string(),
            fecha: None,
            hora_inicio: None,
            nombre_cliente: None,
        };
        Box::pin(async move { Ok(confirmed) })
    }

    fn reserve_err(
        status: u16,
        message: &str,
    ) -> BoxFuture<'static, ReservationConfirmed, TurnosApiError> {
        let err = TurnosApiError::Api {
            status,
            message: message.to_string(),
        };
        Box::pin(async move { Err(err) })
    }

    /// Builds the app and applies the initial availability fetch.
    async fn started_app(
        api: MockApi,
    ) -> (App, mpsc::UnboundedReceiver<ApiEvent>) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(Arc::new(api), tx);
        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);
        (app, rx)
    }

    fn fill_form(app: &mut App, name: &str, email: &str) {
        let form = app.form.as_mut().unwrap();
        form.name = Input::new(name.to_string());
        form.email = Input::new(email.to_string());
    }

    #[tokio::test]
    async fn starts_on_tomorrow_and_fetches_it() {
        let mut api = MockApi::new();
        api.expect_availability()
            .with(eq(tomorrow()))
            .times(1)
            .returning(|_| ok_slots(&["08:00"]));

        let (app, _rx) = started_app(api).await;
        assert_eq!(app.selected_date, tomorrow());
        assert_eq!(app.date_input.value(), tomorrow().format("%Y-%m-%d").to_string());
        assert_eq!(app.slots, ["08:00"]);
        assert!(!app.pending_availability);
    }

    #[tokio::test]
    async fn date_change_issues_one_request_and_replaces_slots() {
        let mut api = MockApi::new();
        api.expect_availability()
            .with(eq(tomorrow()))
            .times(1)
            .returning(|_| ok_slots(&["08:00"]));
        api.expect_availability()
            .with(eq(date("2025-01-02")))
            .times(1)
            .returning(|_| ok_slots(&["09:00", "10:00"]));

        let (mut app, mut rx) = started_app(api).await;

        app.date_input = Input::new("2025-01-02".to_string());
        app.commit_date();
        assert!(app.pending_availability);
        assert!(app.slots.is_empty(), "prior list is discarded on date change");

        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);
        assert_eq!(app.slots, ["09:00", "10:00"]);
        assert!(app.availability_error.is_none());
        assert!(rx.try_recv().is_err(), "exactly one request per date change");
    }

    #[tokio::test]
    async fn unparsable_date_reports_without_fetching() {
        let mut api = MockApi::new();
        api.expect_availability()
            .times(1)
            .returning(|_| ok_slots(&["08:00"]));

        let (mut app, mut rx) = started_app(api).await;

        app.date_input = Input::new("02/01/2025".to_string());
        app.commit_date();
        assert_eq!(app.availability_error.as_deref(), Some(crate::app::INVALID_DATE_TEXT));
        assert!(app.slots.is_empty());
        assert!(rx.try_recv().is_err(), "no request for an unparsable date");
    }

    #[tokio::test]
    async fn availability_failure_sets_fixed_message() {
        let mut api = MockApi::new();
        api.expect_availability()
            .times(1)
            .returning(|_| slots_err(500, "connection reset"));

        let (app, _rx) = started_app(api).await;
        assert!(app.slots.is_empty());
        assert_eq!(app.availability_error.as_deref(), Some(AVAILABILITY_ERROR_TEXT));
    }

    #[tokio::test]
    async fn stale_availability_response_is_discarded() {
        let mut api = MockApi::new();
        api.expect_availability()
            .with(eq(tomorrow()))
            .times(1)
            .returning(|_| ok_slots(&["08:00"]));
        api.expect_availability()
            .with(eq(date("2025-01-02")))
            .times(1)
            .returning(|_| ok_slots(&["09:00"]));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(Arc::new(api), tx);

        // Supersede the initial request before applying its completion.
        app.date_input = Input::new("2025-01-02".to_string());
        app.commit_date();

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let first_is_stale = matches!(first, ApiEvent::Availability { seq: 1, .. });
        let (stale, fresh) = if first_is_stale {
            (first, second)
        } else {
            (second, first)
        };

        app.handle_api_event(fresh);
        assert_eq!(app.slots, ["09:00"]);
        assert!(!app.pending_availability);

        app.handle_api_event(stale);
        assert_eq!(app.slots, ["09:00"], "stale completion must not overwrite state");
        assert!(!app.pending_availability);
    }

    #[tokio::test]
    async fn selecting_a_slot_prefills_a_fresh_draft() {
        let mut api = MockApi::new();
        api.expect_availability()
            .with(eq(tomorrow()))
            .times(1)
            .returning(|_| ok_slots(&["08:00"]));
        api.expect_availability()
            .with(eq(date("2025-01-02")))
            .times(1)
            .returning(|_| ok_slots(&["09:00", "10:00"]));

        let (mut app, mut rx) = started_app(api).await;
        app.date_input = Input::new("2025-01-02".to_string());
        app.commit_date();
        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);

        app.slot_cursor = 1;
        app.select_slot();
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.date, date("2025-01-02"));
        assert_eq!(form.start_time, "10:00");
        assert_eq!(form.name.value(), "");
        assert_eq!(form.email.value(), "");
        assert_eq!(app.selected_slot(), Some("10:00"));

        // Reselecting resets the draft regardless of prior contents.
        fill_form(&mut app, "Jane Doe", "jane@example.com");
        app.slot_cursor = 0;
        app.select_slot();
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.start_time, "09:00");
        assert_eq!(form.name.value(), "");
    }

    #[tokio::test]
    async fn empty_fields_block_submission() {
        let mut api = MockApi::new();
        api.expect_availability()
            .times(1)
            .returning(|_| ok_slots(&["10:00"]));
        api.expect_reserve().never();

        let (mut app, mut rx) = started_app(api).await;
        app.select_slot();

        app.submit();
        assert_eq!(
            app.outcome,
            Some(Outcome::Error(MISSING_FIELDS_TEXT.to_string()))
        );

        // A name alone is not enough either.
        fill_form(&mut app, "Jane Doe", "");
        app.submit();
        assert_eq!(
            app.outcome,
            Some(Outcome::Error(MISSING_FIELDS_TEXT.to_string()))
        );
        assert!(!app.pending_reservation);
        assert!(rx.try_recv().is_err(), "no network call was made");
    }

    #[tokio::test]
    async fn successful_reservation_resets_and_refetches_once() {
        let mut api = MockApi::new();
        api.expect_availability()
            .with(eq(tomorrow()))
            .times(1)
            .returning(|_| ok_slots(&[]));
        api.expect_availability()
            .with(eq(date("2025-01-02")))
            .times(1)
            .returning(|_| ok_slots(&["10:00"]));
        api.expect_reserve()
            .withf(|request| {
                request.fecha == "2025-01-02"
                    && request.hora_inicio == "10:00"
                    && request.nombre_cliente == "Jane Doe"
                    && request.email_cliente == "jane@example.com"
            })
            .times(1)
            .returning(|_| reserve_ok(ReservationId::Text("123".into()), "a@b.com"));
        api.expect_availability()
            .with(eq(date("2025-01-02")))
            .times(1)
            .returning(|_| ok_slots(&["09:00"]));

        let (mut app, mut rx) = started_app(api).await;
        app.date_input = Input::new("2025-01-02".to_string());
        app.commit_date();
        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);

        app.select_slot();
        fill_form(&mut app, "Jane Doe", "jane@example.com");
        app.submit();
        assert!(app.pending_reservation);

        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);
        match &app.outcome {
            Some(Outcome::Success(text)) => {
                assert!(text.contains("123"), "message must carry the server id: {text}");
                assert!(text.contains("a@b.com"), "message must carry the server email: {text}");
            }
            other => panic!("expected success outcome, got {other:?}"),
        }
        assert!(app.form.is_none(), "form is cleared after booking");
        assert!(!app.pending_reservation);
        assert!(app.pending_availability, "booked slot triggers a re-fetch");

        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);
        assert_eq!(app.slots, ["09:00"], "booked slot no longer listed");
        assert!(rx.try_recv().is_err(), "exactly one re-fetch after booking");
    }

    #[tokio::test]
    async fn rejected_reservation_shows_backend_text_and_keeps_form() {
        let mut api = MockApi::new();
        api.expect_availability()
            .times(1)
            .returning(|_| ok_slots(&["10:00"]));
        api.expect_reserve()
            .times(1)
            .returning(|_| reserve_err(409, "Turno no disponible"));

        let (mut app, mut rx) = started_app(api).await;
        app.select_slot();
        fill_form(&mut app, "Jane Doe", "jane@example.com");
        app.submit();

        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);
        assert_eq!(
            app.outcome,
            Some(Outcome::Error("Turno no disponible".to_string()))
        );
        let form = app.form.as_ref().unwrap();
        assert_eq!(form.start_time, "10:00", "selection survives a rejection");
        assert_eq!(form.name.value(), "Jane Doe", "fields survive a rejection");
        assert!(rx.try_recv().is_err(), "no availability re-fetch on failure");
    }

    #[tokio::test]
    async fn reservation_failure_without_detail_uses_generic_message() {
        let mut api = MockApi::new();
        api.expect_availability()
            .times(1)
            .returning(|_| ok_slots(&["10:00"]));
        api.expect_reserve()
            .times(1)
            .returning(|_| reserve_err(503, "  "));

        let (mut app, mut rx) = started_app(api).await;
        app.select_slot();
        fill_form(&mut app, "Jane Doe", "jane@example.com");
        app.submit();

        let event = rx.recv().await.unwrap();
        app.handle_api_event(event);
        assert_eq!(
            app.outcome,
            Some(Outcome::Error(RESERVATION_ERROR_TEXT.to_string()))
        );
    }

    #[tokio::test]
    async fn cancel_discards_the_draft() {
        let mut api = MockApi::new();
        api.expect_availability()
            .times(1)
            .returning(|_| ok_slots(&["10:00"]));
        api.expect_reserve().never();

        let (mut app, _rx) = started_app(api).await;
        app.select_slot();
        fill_form(&mut app, "Jane Doe", "jane@example.com");

        app.cancel_form();
        assert!(app.form.is_none());
        assert_eq!(app.selected_slot(), None);
    }
}
