// --- File: crates/services/turnero_tui/src/view.rs ---
//! Rendering. A pure function of [`App`]: repeated calls with unchanged state
//! draw the same frame and perform no I/O beyond the terminal buffer.

use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::Input;

use crate::app::{App, Focus, Outcome};

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Date input
            Constraint::Length(3), // Messages
            Constraint::Min(7),    // Slots + form
            Constraint::Length(1), // Help
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(
        f,
        chunks[1],
        " Date (YYYY-MM-DD) ",
        &app.date_input,
        app.focus == Focus::Date,
    );
    render_messages(f, chunks[2], app);

    if app.form.is_some() {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        render_slots(f, main[0], app);
        render_form(f, main[1], app);
    } else {
        render_slots(f, chunks[3], app);
    }

    render_help(f, chunks[4], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" Turnero "),
        Span::styled(
            " Appointment Booking ",
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_messages(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(err) = &app.availability_error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    match &app.outcome {
        Some(Outcome::Success(text)) => lines.push(Line::from(Span::styled(
            text.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))),
        Some(Outcome::Error(text)) => lines.push(Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => {}
    }
    let messages = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(messages, area);
}

fn render_slots(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" Slots for {} ", app.selected_date))
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::Slots {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        });

    if app.pending_availability {
        let loading = Paragraph::new(Span::styled(
            "Loading availability…",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(loading, area);
        return;
    }

    if app.slots.is_empty() {
        let empty = Paragraph::new("No slots available for the selected date.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .slots
        .iter()
        .map(|slot| {
            let chosen = app.selected_slot() == Some(slot.as_str());
            let style = if chosen {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(format!(" {slot} "), style)))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.slot_cursor.min(app.slots.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.form else { return };

    let block = Block::default()
        .title(format!(" Book {} on {} ", form.start_time, form.date))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    render_input(f, rows[0], " Full name ", &form.name, app.focus == Focus::Name);
    render_input(f, rows[1], " Email ", &form.email, app.focus == Focus::Email);

    let hint = if app.pending_reservation {
        Span::styled("Booking…", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            "Enter to confirm, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(Paragraph::new(Line::from(hint)), rows[2]);
}

fn render_input(f: &mut Frame, area: Rect, title: &str, input: &Input, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let widget = Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string()),
        );
    f.render_widget(widget, area);

    if focused {
        f.set_cursor_position((
            area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.focus {
        Focus::Date => "Enter: load slots | Tab: slot list | Esc: quit",
        Focus::Slots => "Enter: book slot | Up/Down: move | d: edit date | q: quit",
        Focus::Name | Focus::Email => "Enter: confirm | Tab: next field | Esc: cancel",
    };
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
