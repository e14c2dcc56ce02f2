//! Key bindings
//!
//! Normal mode, any page:
//!   Tab switch page, r reload, q quit, PgUp/PgDn scroll logs
//! User page:
//!   Up/Down move, Left/Right switch between calls and tasks, Enter select
//!   call, n new call, t new task, g assign tags, s next status,
//!   1/2/3 set status
//! Admin page:
//!   Up/Down move, n new tag, e or Enter rename
//!
//! While a text field or dialog is open it takes the keyboard: Enter
//! submits and Esc closes.

use crossterm::event::{Event, KeyCode, KeyEvent};
use shared::models::TaskStatus;
use tui_input::{Input, backend::crossterm::EventHandler};
use tui_logger::TuiWidgetEvent;

use crate::app::{AppMsg, PageMsg, PageState};
use crate::modal::Modal;
use crate::pages::{AdminMsg, AdminState, UserDialog, UserMsg, UserState};

use super::{Controls, Focus, Ui};

/// Draft the text field is bound to right now, if any
pub fn active_draft(ui: &Ui) -> Option<&str> {
    match ui.app.page() {
        PageState::Admin(admin) => match &admin.editing {
            Some(edit) => Some(&edit.name),
            None if ui.controls.editing_new_tag => Some(&admin.new_tag_name),
            None => None,
        },
        PageState::User(user) => match user.dialog {
            Some(UserDialog::CreateCall) => Some(&user.new_call_name),
            Some(UserDialog::CreateTask) => Some(&user.new_task_name),
            _ => None,
        },
    }
}

/// Whether keys currently belong to a text field or dialog
fn captured(ui: &Ui) -> bool {
    active_draft(ui).is_some() || ui.app.user().is_some_and(|user| user.dialog.is_some())
}

/// Translate one key press into messages for the app
pub fn handle_key(ui: &mut Ui, key: KeyEvent) -> Vec<AppMsg> {
    ui.sync();
    let page_msg = match ui.app.page() {
        PageState::Admin(admin) => admin_key(&mut ui.controls, admin, key).map(PageMsg::from),
        PageState::User(user) => user_key(&mut ui.controls, user, key).map(PageMsg::from),
    };
    if let Some(msg) = page_msg {
        return vec![ui.app.to_page(msg)];
    }
    if captured(ui) {
        return vec![];
    }
    global_key(ui, key).into_iter().collect()
}

fn global_key(ui: &mut Ui, key: KeyEvent) -> Option<AppMsg> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => Some(AppMsg::SwitchView(ui.app.view().other())),
        KeyCode::Char('q') => {
            ui.quit = true;
            None
        }
        KeyCode::Char('r') => Some(match ui.app.page() {
            PageState::Admin(_) => ui.app.to_page(AdminMsg::Reload),
            PageState::User(_) => ui.app.to_page(UserMsg::Reload),
        }),
        KeyCode::PageUp => {
            ui.logger_state.transition(TuiWidgetEvent::PrevPageKey);
            None
        }
        KeyCode::PageDown => {
            ui.logger_state.transition(TuiWidgetEvent::NextPageKey);
            None
        }
        _ => None,
    }
}

/// Feed the key to the text field and report the new value
fn edit_text(input: &mut Input, key: KeyEvent) -> Option<String> {
    input
        .handle_event(&Event::Key(key))
        .map(|_| input.value().to_string())
}

fn step(cursor: &mut usize, len: usize, code: KeyCode) -> bool {
    match code {
        KeyCode::Up => {
            *cursor = cursor.saturating_sub(1);
            true
        }
        KeyCode::Down => {
            *cursor = (*cursor + 1).min(len.saturating_sub(1));
            true
        }
        _ => false,
    }
}

fn admin_key(controls: &mut Controls, admin: &AdminState, key: KeyEvent) -> Option<AdminMsg> {
    if admin.editing.is_some() {
        let modal = Modal::new("Rename tag", true);
        if let Some(msg) = modal.handle_key(&key, || AdminMsg::CancelEdit) {
            return Some(msg);
        }
        return match key.code {
            KeyCode::Enter => Some(AdminMsg::SaveEdit),
            _ => edit_text(&mut controls.input, key).map(AdminMsg::EditNameChanged),
        };
    }

    if controls.editing_new_tag {
        return match key.code {
            KeyCode::Esc => {
                controls.editing_new_tag = false;
                None
            }
            KeyCode::Enter => Some(AdminMsg::SubmitNewTag),
            _ => edit_text(&mut controls.input, key).map(AdminMsg::NewTagNameChanged),
        };
    }

    if step(&mut controls.tag_cursor, admin.tags.len(), key.code) {
        return None;
    }
    match key.code {
        KeyCode::Char('n') => {
            controls.editing_new_tag = true;
            controls.input = Input::new(admin.new_tag_name.clone());
            None
        }
        KeyCode::Char('e') | KeyCode::Enter => admin
            .tags
            .get(controls.tag_cursor)
            .map(|tag| AdminMsg::BeginEdit(tag.id)),
        _ => None,
    }
}

fn user_key(controls: &mut Controls, user: &UserState, key: KeyEvent) -> Option<UserMsg> {
    if let Some(dialog) = &user.dialog {
        if let Some(msg) = Modal::new("", true).handle_key(&key, || UserMsg::CloseDialog) {
            return Some(msg);
        }
        return match dialog {
            UserDialog::CreateCall => match key.code {
                KeyCode::Enter => Some(UserMsg::SubmitNewCall),
                _ => edit_text(&mut controls.input, key).map(UserMsg::NewCallNameChanged),
            },
            UserDialog::CreateTask => match key.code {
                KeyCode::Enter => Some(UserMsg::SubmitNewTask),
                _ => edit_text(&mut controls.input, key).map(UserMsg::NewTaskNameChanged),
            },
            UserDialog::AssignTags { .. } => {
                if step(&mut controls.tag_cursor, user.tags.len(), key.code) {
                    return None;
                }
                match key.code {
                    KeyCode::Char(' ') => user
                        .tags
                        .get(controls.tag_cursor)
                        .map(|tag| UserMsg::ToggleTag(tag.id)),
                    KeyCode::Enter => Some(UserMsg::SaveTagAssignment),
                    _ => None,
                }
            }
        };
    }

    let moved = match controls.focus {
        Focus::Calls => step(&mut controls.call_cursor, user.calls.len(), key.code),
        Focus::Tasks => step(&mut controls.task_cursor, user.tasks.len(), key.code),
    };
    if moved {
        return None;
    }

    match key.code {
        KeyCode::Left => {
            controls.focus = Focus::Calls;
            None
        }
        KeyCode::Right => {
            controls.focus = Focus::Tasks;
            None
        }
        KeyCode::Enter if controls.focus == Focus::Calls => user
            .calls
            .get(controls.call_cursor)
            .map(|call| UserMsg::SelectCall(call.id)),
        KeyCode::Char('n') => Some(UserMsg::OpenCreateCall),
        KeyCode::Char('t') => Some(UserMsg::OpenCreateTask),
        KeyCode::Char('g') => {
            controls.tag_cursor = 0;
            Some(UserMsg::OpenTagAssignment)
        }
        KeyCode::Char('s') => {
            let task = user.tasks.get(controls.task_cursor)?;
            Some(UserMsg::ChangeTaskStatus {
                task_id: task.id,
                status: task.status.next(),
            })
        }
        KeyCode::Char(c @ '1'..='3') => {
            let task = user.tasks.get(controls.task_cursor)?;
            let status = &TaskStatus::SELECTABLE[c as usize - '1' as usize];
            Some(UserMsg::ChangeTaskStatus {
                task_id: task.id,
                status: status.clone(),
            })
        }
        _ => None,
    }
}
