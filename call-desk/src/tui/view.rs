//! Drawing
//!
//! Header with the page tabs, the page body, the error banner, a key hint
//! line and the log panel. Dialogs are drawn last, over everything else.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{PageState, View};
use crate::modal::Modal;
use crate::pages::{AdminState, UserDialog, UserState};
use crate::status::{StatusTone, tone};

use super::{Focus, Ui};

const HIGHLIGHT: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Attention => Color::Red,
        StatusTone::Caution => Color::Yellow,
        StatusTone::Success => Color::Green,
        StatusTone::Neutral => Color::Gray,
    }
}

pub fn render(frame: &mut Frame, ui: &Ui) {
    let [header, body, banner, hints, logs] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(8),
    ])
    .areas(frame.area());

    render_header(frame, header, ui);

    match ui.app.page() {
        PageState::User(user) => {
            render_user(frame, body, ui, user);
            render_banner(frame, banner, user.error.as_deref(), user.loading);
        }
        PageState::Admin(admin) => {
            render_admin(frame, body, ui, admin);
            render_banner(frame, banner, admin.error.as_deref(), admin.loading);
        }
    }

    frame.render_widget(
        Paragraph::new(hint_line(ui)).style(Style::default().fg(Color::DarkGray)),
        hints,
    );

    let logger = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&ui.logger_state);
    frame.render_widget(logger, logs);

    match ui.app.page() {
        PageState::User(user) => render_user_dialog(frame, ui, user),
        PageState::Admin(admin) => render_admin_dialog(frame, ui, admin),
    }
}

fn render_header(frame: &mut Frame, area: Rect, ui: &Ui) {
    let tab = |view: View| {
        let style = if ui.app.view() == view {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", view.label()), style)
    };

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" Call Desk "),
        Span::raw("|"),
        tab(View::User),
        tab(View::Admin),
        Span::raw("| "),
        Span::styled(ui.backend.as_str(), Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(title, area);
}

fn render_banner(frame: &mut Frame, area: Rect, error: Option<&str>, loading: bool) {
    let line = match (error, loading) {
        (Some(error), _) => Line::styled(
            format!(" {} ", error),
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        (None, true) => Line::styled(" Working... ", Style::default().fg(Color::Yellow)),
        (None, false) => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn hint_line(ui: &Ui) -> &'static str {
    match ui.app.page() {
        PageState::User(user) => match user.dialog {
            Some(UserDialog::AssignTags { .. }) => {
                " Up/Down move  Space toggle  Enter save  Esc cancel"
            }
            Some(_) => " Enter create  Esc cancel",
            None => {
                " Enter select  Left/Right focus  n call  t task  g tags  s/1-3 status  r reload  Tab admin  q quit"
            }
        },
        PageState::Admin(admin) => {
            if admin.editing.is_some() {
                " Enter save  Esc cancel"
            } else if ui.controls.editing_new_tag {
                " Enter create  Esc done"
            } else {
                " n new tag  e rename  r reload  Tab user  q quit"
            }
        }
    }
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

// ========== User page ==========

fn render_user(frame: &mut Frame, area: Rect, ui: &Ui, user: &UserState) {
    if user.calls.is_empty() {
        render_no_calls(frame, area, user);
        return;
    }

    let [calls_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(area);

    let calls: Vec<ListItem> = user
        .calls
        .iter()
        .map(|call| {
            let marker = if user.selected_call == Some(call.id) {
                "* "
            } else {
                "  "
            };
            ListItem::new(format!("{}{} (#{})", marker, call.title, call.id))
        })
        .collect();
    let focused = ui.controls.focus == Focus::Calls && user.dialog.is_none();
    let mut state = ListState::default().with_selected(
        (!user.calls.is_empty()).then_some(ui.controls.call_cursor),
    );
    frame.render_stateful_widget(
        List::new(calls)
            .block(panel("Calls", focused))
            .highlight_style(HIGHLIGHT),
        calls_area,
        &mut state,
    );

    let [summary_area, tasks_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).areas(detail_area);

    let summary = match &user.selected_call_details {
        Some(call) => {
            let tags = if call.tags.is_empty() {
                Span::styled("no tags", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(
                    call.tags
                        .iter()
                        .map(|t| t.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    Style::default().fg(Color::Magenta),
                )
            };
            vec![
                Line::from(Span::styled(
                    call.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![Span::raw("Tags: "), tags]),
            ]
        }
        None if user.selected_call.is_some() => vec![Line::from("Loading call...")],
        None => vec![Line::from("Select a call to see its tasks")],
    };
    frame.render_widget(
        Paragraph::new(summary)
            .block(panel("Call", false))
            .wrap(Wrap { trim: true }),
        summary_area,
    );

    let tasks: Vec<ListItem> = user
        .tasks
        .iter()
        .map(|task| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<12}", task.status.as_str()),
                    Style::default().fg(tone_color(tone(&task.status))),
                ),
                Span::raw(task.name.as_str()),
            ]))
        })
        .collect();
    let focused = ui.controls.focus == Focus::Tasks && user.dialog.is_none();
    let mut state = ListState::default()
        .with_selected((!user.tasks.is_empty()).then_some(ui.controls.task_cursor));
    frame.render_stateful_widget(
        List::new(tasks)
            .block(panel("Tasks", focused))
            .highlight_style(HIGHLIGHT),
        tasks_area,
        &mut state,
    );
}

fn render_no_calls(frame: &mut Frame, area: Rect, user: &UserState) {
    let prompt = Paragraph::new(vec![
        Line::default(),
        Line::from("No calls yet. Create your first call!"),
        Line::default(),
        Line::styled("Press n to create one", Style::default().fg(Color::Cyan)),
    ])
    .alignment(Alignment::Center)
    .block(panel("Calls", user.dialog.is_none()));
    frame.render_widget(prompt, area);
}

fn render_user_dialog(frame: &mut Frame, ui: &Ui, user: &UserState) {
    let Some(dialog) = &user.dialog else {
        return;
    };
    match dialog {
        UserDialog::CreateCall => render_text_dialog(frame, ui, "New Call", "Title"),
        UserDialog::CreateTask => render_text_dialog(frame, ui, "New Task", "Name"),
        UserDialog::AssignTags { draft } => {
            let items: Vec<ListItem> = user
                .tags
                .iter()
                .map(|tag| {
                    let mark = if draft.contains(&tag.id) { "[x]" } else { "[ ]" };
                    ListItem::new(format!("{} {}", mark, tag.name))
                })
                .collect();
            let height = (user.tags.len() as u16).clamp(1, 12) + 2;
            let modal = Modal::new("Assign Tags", true).size(50, height);
            if let Some(inner) = modal.render_frame(frame) {
                let mut state = ListState::default()
                    .with_selected((!user.tags.is_empty()).then_some(ui.controls.tag_cursor));
                if user.tags.is_empty() {
                    frame.render_widget(Paragraph::new("No tags defined yet"), inner);
                } else {
                    frame.render_stateful_widget(
                        List::new(items).highlight_style(HIGHLIGHT),
                        inner,
                        &mut state,
                    );
                }
            }
        }
    }
}

// ========== Admin page ==========

fn render_admin(frame: &mut Frame, area: Rect, ui: &Ui, admin: &AdminState) {
    let [list_area, form_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

    let items: Vec<ListItem> = admin
        .tags
        .iter()
        .map(|tag| ListItem::new(format!("{:>4}  {}", tag.id, tag.name)))
        .collect();
    let mut state = ListState::default()
        .with_selected((!admin.tags.is_empty()).then_some(ui.controls.tag_cursor));
    frame.render_stateful_widget(
        List::new(items)
            .block(panel("Tags", !ui.controls.editing_new_tag && admin.editing.is_none()))
            .highlight_style(HIGHLIGHT),
        list_area,
        &mut state,
    );

    let editing = ui.controls.editing_new_tag && admin.editing.is_none();
    let value = if editing {
        ui.controls.input.value()
    } else {
        admin.new_tag_name.as_str()
    };
    let style = if admin.loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(value).style(style).block(panel("New tag", editing)),
        form_area,
    );
    if editing {
        place_cursor(frame, form_area.inner(Margin::new(1, 1)), ui);
    }
}

fn render_admin_dialog(frame: &mut Frame, ui: &Ui, admin: &AdminState) {
    if let Some(edit) = &admin.editing {
        let title = format!("Rename \"{}\"", edit.tag.name);
        render_text_dialog(frame, ui, &title, "Name");
    }
}

// ========== Shared ==========

fn render_text_dialog(frame: &mut Frame, ui: &Ui, title: &str, label: &str) {
    let modal = Modal::new(title, true).size(50, 5);
    let body = Paragraph::new(vec![
        Line::styled(label, Style::default().fg(Color::DarkGray)),
        Line::from(ui.controls.input.value()),
    ]);
    if let Some(inner) = modal.render(frame, body) {
        let field = Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        };
        place_cursor(frame, field, ui);
    }
}

fn place_cursor(frame: &mut Frame, field: Rect, ui: &Ui) {
    let offset = (ui.controls.input.visual_cursor() as u16).min(field.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(field.x + offset, field.y));
}
