//! User page: calls, their tasks and their tags
//!
//! Holds the call list, the selected call with its details and tasks, the
//! tag catalogue for the assignment picker, and the drafts of the three
//! dialogs. Every mutation is followed by a reload of what it touched.
//!
//! Detail loads carry a generation number. Only the response to the most
//! recently issued load is applied, so a slow answer for a previously
//! selected call cannot overwrite the current one.

use std::collections::BTreeSet;

use async_trait::async_trait;
use call_client::{
    Call, CallCenterApi, CallId, CallUpdate, ClientResult, HttpClient, Tag, TagId, Task, TaskId,
    TaskStatus, TaskUpdate,
};
use shared::models::tasks_for_call;

use super::{Effect, Page, committed_text, failure_message};

/// A call together with its tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDetails {
    pub call: Call,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDialog {
    CreateCall,
    CreateTask,
    /// Tag picker; `draft` is the working set, committed only on save
    AssignTags { draft: BTreeSet<TagId> },
}

#[derive(Debug, Default)]
pub struct UserState {
    pub calls: Vec<Call>,
    pub selected_call: Option<CallId>,
    pub selected_call_details: Option<Call>,
    /// Every tag, for the assignment picker
    pub tags: Vec<Tag>,
    /// Tasks of the selected call
    pub tasks: Vec<Task>,
    pub new_call_name: String,
    pub new_task_name: String,
    pub dialog: Option<UserDialog>,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

#[derive(Debug)]
pub enum UserMsg {
    /// Page became visible
    Mounted,
    /// Manual refresh of everything on screen
    Reload,
    SelectCall(CallId),

    OpenCreateCall,
    NewCallNameChanged(String),
    SubmitNewCall,

    OpenCreateTask,
    NewTaskNameChanged(String),
    SubmitNewTask,

    ChangeTaskStatus { task_id: TaskId, status: TaskStatus },

    OpenTagAssignment,
    ToggleTag(TagId),
    SaveTagAssignment,

    /// Close whichever dialog is open, discarding the tag draft
    CloseDialog,

    CallsLoaded(ClientResult<Vec<Call>>),
    TagsLoaded(ClientResult<Vec<Tag>>),
    DetailsLoaded {
        generation: u64,
        result: ClientResult<CallDetails>,
    },
    CallCreated(ClientResult<Call>),
    TaskCreated(ClientResult<Task>),
    TaskStatusUpdated(ClientResult<Task>),
    TagsAssigned(ClientResult<Call>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    LoadCalls,
    LoadTags,
    LoadDetails { call_id: CallId, generation: u64 },
    CreateCall { title: String },
    CreateTask { name: String, call_id: CallId },
    UpdateTaskStatus { task_id: TaskId, status: TaskStatus },
    AssignTags { call_id: CallId, update: CallUpdate },
}

impl UserState {
    /// Selected call as listed in `calls`
    pub fn selected(&self) -> Option<&Call> {
        let id = self.selected_call?;
        self.calls.iter().find(|c| c.id == id)
    }

    /// Generation of the most recently issued detail load
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_submit_new_call(&self) -> bool {
        !self.loading && committed_text(&self.new_call_name).is_some()
    }

    pub fn can_submit_new_task(&self) -> bool {
        !self.loading
            && self.selected_call.is_some()
            && committed_text(&self.new_task_name).is_some()
    }

    /// Draft of the open tag picker
    pub fn tag_draft(&self) -> Option<&BTreeSet<TagId>> {
        match &self.dialog {
            Some(UserDialog::AssignTags { draft }) => Some(draft),
            _ => None,
        }
    }

    fn select(&mut self, call_id: CallId) -> UserCommand {
        if self.selected_call != Some(call_id) {
            self.selected_call_details = None;
            self.tasks.clear();
            // The draft belongs to the call it was seeded from
            self.close_dialog(|d| matches!(d, UserDialog::AssignTags { .. }));
        }
        self.selected_call = Some(call_id);
        self.load_details(call_id)
    }

    fn load_details(&mut self, call_id: CallId) -> UserCommand {
        self.generation += 1;
        UserCommand::LoadDetails {
            call_id,
            generation: self.generation,
        }
    }

    fn reload_selected(&mut self) -> Vec<UserCommand> {
        match self.selected_call {
            Some(id) => vec![self.load_details(id)],
            None => vec![],
        }
    }

    fn close_dialog(&mut self, which: fn(&UserDialog) -> bool) {
        if self.dialog.as_ref().is_some_and(which) {
            self.dialog = None;
        }
    }
}

impl Page for UserState {
    type Msg = UserMsg;
    type Command = UserCommand;

    fn update(&mut self, msg: UserMsg) -> Vec<UserCommand> {
        match msg {
            UserMsg::Mounted => {
                self.error = None;
                vec![UserCommand::LoadCalls, UserCommand::LoadTags]
            }
            UserMsg::Reload => {
                self.error = None;
                let mut commands = vec![UserCommand::LoadCalls, UserCommand::LoadTags];
                commands.extend(self.reload_selected());
                commands
            }

            UserMsg::SelectCall(call_id) => vec![self.select(call_id)],

            // ========== Create call ==========
            UserMsg::OpenCreateCall => {
                self.dialog = Some(UserDialog::CreateCall);
                vec![]
            }
            UserMsg::NewCallNameChanged(name) => {
                if !self.loading {
                    self.new_call_name = name;
                }
                vec![]
            }
            UserMsg::SubmitNewCall => {
                if self.loading {
                    return vec![];
                }
                let Some(title) = committed_text(&self.new_call_name) else {
                    return vec![];
                };
                self.loading = true;
                self.error = None;
                vec![UserCommand::CreateCall { title }]
            }

            // ========== Create task ==========
            UserMsg::OpenCreateTask => {
                if self.selected_call.is_some() {
                    self.dialog = Some(UserDialog::CreateTask);
                }
                vec![]
            }
            UserMsg::NewTaskNameChanged(name) => {
                if !self.loading {
                    self.new_task_name = name;
                }
                vec![]
            }
            UserMsg::SubmitNewTask => {
                if self.loading {
                    return vec![];
                }
                let Some(call_id) = self.selected_call else {
                    return vec![];
                };
                let Some(name) = committed_text(&self.new_task_name) else {
                    return vec![];
                };
                self.loading = true;
                self.error = None;
                vec![UserCommand::CreateTask { name, call_id }]
            }

            // ========== Task status ==========
            UserMsg::ChangeTaskStatus { task_id, status } => {
                if self.loading {
                    return vec![];
                }
                let Some(task) = self.tasks.iter().find(|t| t.id == task_id) else {
                    return vec![];
                };
                if task.status == status {
                    return vec![];
                }
                self.loading = true;
                self.error = None;
                vec![UserCommand::UpdateTaskStatus { task_id, status }]
            }

            // ========== Tag assignment ==========
            UserMsg::OpenTagAssignment => {
                if let Some(details) = &self.selected_call_details {
                    self.dialog = Some(UserDialog::AssignTags {
                        draft: details.tag_ids().into_iter().collect(),
                    });
                }
                vec![]
            }
            UserMsg::ToggleTag(tag_id) => {
                if let Some(UserDialog::AssignTags { draft }) = self.dialog.as_mut() {
                    if !draft.remove(&tag_id) {
                        draft.insert(tag_id);
                    }
                }
                vec![]
            }
            UserMsg::SaveTagAssignment => {
                if self.loading {
                    return vec![];
                }
                let (Some(details), Some(draft)) = (&self.selected_call_details, self.tag_draft())
                else {
                    return vec![];
                };
                let command = UserCommand::AssignTags {
                    call_id: details.id,
                    update: CallUpdate {
                        title: details.title.clone(),
                        tag_ids: draft.iter().copied().collect(),
                    },
                };
                self.loading = true;
                self.error = None;
                vec![command]
            }

            UserMsg::CloseDialog => {
                self.dialog = None;
                vec![]
            }

            // ========== Server responses ==========
            UserMsg::CallsLoaded(Ok(calls)) => {
                self.calls = calls;
                vec![]
            }
            UserMsg::CallsLoaded(Err(err)) => {
                tracing::error!("Error loading calls: {}", err);
                self.error = Some(failure_message("load calls", &err));
                vec![]
            }

            UserMsg::TagsLoaded(Ok(tags)) => {
                self.tags = tags;
                vec![]
            }
            UserMsg::TagsLoaded(Err(err)) => {
                tracing::error!("Error loading tags: {}", err);
                self.error = Some(failure_message("load tags", &err));
                vec![]
            }

            UserMsg::DetailsLoaded { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Dropping call details of load #{} (latest is #{})",
                        generation,
                        self.generation
                    );
                    return vec![];
                }
                match result {
                    Ok(details) => {
                        self.selected_call_details = Some(details.call);
                        self.tasks = details.tasks;
                    }
                    Err(err) => {
                        tracing::error!("Error loading call details: {}", err);
                        self.error = Some(failure_message("load call details", &err));
                    }
                }
                vec![]
            }

            UserMsg::CallCreated(Ok(call)) => {
                tracing::info!("Created call {} ({})", call.id, call.title);
                self.loading = false;
                self.new_call_name.clear();
                self.close_dialog(|d| matches!(d, UserDialog::CreateCall));
                vec![UserCommand::LoadCalls, self.select(call.id)]
            }
            UserMsg::CallCreated(Err(err)) => {
                tracing::error!("Error creating call: {}", err);
                self.loading = false;
                self.error = Some(failure_message("create call", &err));
                vec![]
            }

            UserMsg::TaskCreated(Ok(task)) => {
                tracing::info!("Created task {} ({})", task.id, task.name);
                self.loading = false;
                self.new_task_name.clear();
                self.close_dialog(|d| matches!(d, UserDialog::CreateTask));
                self.reload_selected()
            }
            UserMsg::TaskCreated(Err(err)) => {
                tracing::error!("Error creating task: {}", err);
                self.loading = false;
                self.error = Some(failure_message("create task", &err));
                vec![]
            }

            UserMsg::TaskStatusUpdated(Ok(task)) => {
                tracing::info!("Task {} is now {}", task.id, task.status);
                self.loading = false;
                self.reload_selected()
            }
            UserMsg::TaskStatusUpdated(Err(err)) => {
                tracing::error!("Error updating task status: {}", err);
                self.loading = false;
                self.error = Some(failure_message("update task status", &err));
                vec![]
            }

            UserMsg::TagsAssigned(Ok(call)) => {
                tracing::info!("Call {} now has tags {:?}", call.id, call.tag_ids());
                self.loading = false;
                self.close_dialog(|d| matches!(d, UserDialog::AssignTags { .. }));
                self.reload_selected()
            }
            UserMsg::TagsAssigned(Err(err)) => {
                tracing::error!("Error assigning tags: {}", err);
                self.loading = false;
                self.error = Some(failure_message("assign tags", &err));
                vec![]
            }
        }
    }
}

#[async_trait]
impl Effect for UserCommand {
    type Msg = UserMsg;

    async fn perform<C: HttpClient>(self, api: &CallCenterApi<C>) -> UserMsg {
        match self {
            UserCommand::LoadCalls => UserMsg::CallsLoaded(api.get_calls().await),
            UserCommand::LoadTags => UserMsg::TagsLoaded(api.get_tags().await),
            UserCommand::LoadDetails {
                call_id,
                generation,
            } => {
                let result = tokio::try_join!(api.get_call(call_id), api.get_tasks()).map(
                    |(call, all_tasks)| CallDetails {
                        tasks: tasks_for_call(&all_tasks, call_id),
                        call,
                    },
                );
                UserMsg::DetailsLoaded { generation, result }
            }
            UserCommand::CreateCall { title } => UserMsg::CallCreated(api.create_call(&title).await),
            UserCommand::CreateTask { name, call_id } => {
                UserMsg::TaskCreated(api.create_task(&name, call_id).await)
            }
            UserCommand::UpdateTaskStatus { task_id, status } => UserMsg::TaskStatusUpdated(
                api.update_task(task_id, &TaskUpdate::status(status)).await,
            ),
            UserCommand::AssignTags { call_id, update } => {
                UserMsg::TagsAssigned(api.update_call(call_id, &update).await)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_client::ClientError;

    fn call(id: CallId, title: &str, tags: &[(TagId, &str)]) -> Call {
        Call {
            id,
            title: title.into(),
            tags: tags
                .iter()
                .map(|(id, name)| Tag {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
            tasks: vec![],
        }
    }

    fn task(id: TaskId, call_id: CallId, status: TaskStatus) -> Task {
        Task {
            id,
            name: format!("task-{id}"),
            status,
            call_id: Some(call_id),
        }
    }

    /// State with call 10 selected and its details applied
    fn selected(details: Call, tasks: Vec<Task>) -> UserState {
        let mut state = UserState::default();
        state.update(UserMsg::CallsLoaded(Ok(vec![details.clone()])));
        let command = state.update(UserMsg::SelectCall(details.id)).remove(0);
        let UserCommand::LoadDetails { generation, .. } = command else {
            panic!("expected a detail load, got {:?}", command);
        };
        state.update(UserMsg::DetailsLoaded {
            generation,
            result: Ok(CallDetails {
                call: details,
                tasks,
            }),
        });
        state
    }

    #[test]
    fn test_mount_loads_calls_and_tags() {
        let mut state = UserState::default();
        assert_eq!(
            state.update(UserMsg::Mounted),
            vec![UserCommand::LoadCalls, UserCommand::LoadTags]
        );
    }

    #[test]
    fn test_stale_details_are_dropped() {
        let mut state = UserState::default();
        let first = state.update(UserMsg::SelectCall(1)).remove(0);
        let second = state.update(UserMsg::SelectCall(2)).remove(0);
        let (
            UserCommand::LoadDetails {
                generation: stale, ..
            },
            UserCommand::LoadDetails {
                generation: latest,
                ..
            },
        ) = (first, second)
        else {
            panic!("expected two detail loads");
        };
        assert!(latest > stale);

        // Newer answer arrives first, the older one afterwards
        state.update(UserMsg::DetailsLoaded {
            generation: latest,
            result: Ok(CallDetails {
                call: call(2, "Second", &[]),
                tasks: vec![],
            }),
        });
        state.update(UserMsg::DetailsLoaded {
            generation: stale,
            result: Ok(CallDetails {
                call: call(1, "First", &[]),
                tasks: vec![task(1, 1, TaskStatus::Open)],
            }),
        });

        assert_eq!(state.selected_call, Some(2));
        assert_eq!(state.selected_call_details.as_ref().map(|c| c.id), Some(2));
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_switching_selection_clears_previous_details() {
        let mut state = selected(call(10, "Order #9", &[]), vec![task(1, 10, TaskStatus::Open)]);
        state.update(UserMsg::SelectCall(11));
        assert!(state.selected_call_details.is_none());
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_create_call_selects_new_call() {
        let mut state = UserState::default();
        state.update(UserMsg::OpenCreateCall);
        state.update(UserMsg::NewCallNameChanged(" Order #9 ".into()));
        assert_eq!(
            state.update(UserMsg::SubmitNewCall),
            vec![UserCommand::CreateCall {
                title: "Order #9".into()
            }]
        );

        let next = state.update(UserMsg::CallCreated(Ok(call(10, "Order #9", &[]))));
        assert_eq!(next[0], UserCommand::LoadCalls);
        assert!(matches!(
            next[1],
            UserCommand::LoadDetails { call_id: 10, .. }
        ));
        assert_eq!(state.selected_call, Some(10));
        assert!(state.dialog.is_none());
        assert!(state.new_call_name.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_create_task_requires_selection() {
        let mut state = UserState::default();
        state.update(UserMsg::OpenCreateTask);
        assert!(state.dialog.is_none());
        state.update(UserMsg::NewTaskNameChanged("Call back".into()));
        assert!(state.update(UserMsg::SubmitNewTask).is_empty());
    }

    #[test]
    fn test_create_task_reloads_details() {
        let mut state = selected(call(10, "Order #9", &[]), vec![]);
        state.update(UserMsg::OpenCreateTask);
        state.update(UserMsg::NewTaskNameChanged("Call back".into()));
        assert_eq!(
            state.update(UserMsg::SubmitNewTask),
            vec![UserCommand::CreateTask {
                name: "Call back".into(),
                call_id: 10
            }]
        );

        let next = state.update(UserMsg::TaskCreated(Ok(task(1, 10, TaskStatus::Open))));
        assert!(matches!(
            next.as_slice(),
            [UserCommand::LoadDetails { call_id: 10, .. }]
        ));
        assert!(state.dialog.is_none());
        assert!(state.new_task_name.is_empty());
    }

    #[test]
    fn test_status_change_is_immediate_and_failure_keeps_loaded_status() {
        let mut state = selected(
            call(10, "Order #9", &[]),
            vec![task(1, 10, TaskStatus::Open)],
        );
        assert_eq!(
            state.update(UserMsg::ChangeTaskStatus {
                task_id: 1,
                status: TaskStatus::Completed
            }),
            vec![UserCommand::UpdateTaskStatus {
                task_id: 1,
                status: TaskStatus::Completed
            }]
        );

        state.update(UserMsg::TaskStatusUpdated(Err(ClientError::Internal(
            "down".into(),
        ))));
        assert_eq!(state.tasks[0].status, TaskStatus::Open);
        assert!(state.error.as_deref().unwrap().starts_with("Failed to update task status"));
        assert!(!state.loading);
    }

    #[test]
    fn test_unchanged_status_sends_nothing() {
        let mut state = selected(
            call(10, "Order #9", &[]),
            vec![task(1, 10, TaskStatus::InProgress)],
        );
        assert!(state
            .update(UserMsg::ChangeTaskStatus {
                task_id: 1,
                status: TaskStatus::InProgress
            })
            .is_empty());
    }

    #[test]
    fn test_tag_assignment_sends_whole_set_with_unchanged_title() {
        let mut state = selected(call(10, "Order #9", &[]), vec![]);
        state.update(UserMsg::OpenTagAssignment);
        assert_eq!(state.tag_draft().map(|d| d.len()), Some(0));

        state.update(UserMsg::ToggleTag(2));
        assert_eq!(
            state.update(UserMsg::SaveTagAssignment),
            vec![UserCommand::AssignTags {
                call_id: 10,
                update: CallUpdate {
                    title: "Order #9".into(),
                    tag_ids: vec![2],
                },
            }]
        );
    }

    #[test]
    fn test_tag_draft_is_seeded_and_order_independent() {
        let mut state = selected(call(10, "Order #9", &[(5, "VIP")]), vec![]);
        state.update(UserMsg::OpenTagAssignment);
        state.update(UserMsg::ToggleTag(2));
        state.update(UserMsg::ToggleTag(7));
        state.update(UserMsg::ToggleTag(7));

        let commands = state.update(UserMsg::SaveTagAssignment);
        let [UserCommand::AssignTags { update, .. }] = commands.as_slice() else {
            panic!("expected a single tag assignment");
        };
        assert_eq!(update.tag_ids, vec![2, 5]);
    }

    #[test]
    fn test_cancel_tag_assignment_discards_draft() {
        let mut state = selected(call(10, "Order #9", &[(1, "Billing")]), vec![]);
        state.update(UserMsg::OpenTagAssignment);
        state.update(UserMsg::ToggleTag(1));
        assert!(state.update(UserMsg::CloseDialog).is_empty());

        // Reopening starts again from the call's tags
        state.update(UserMsg::OpenTagAssignment);
        assert!(state.tag_draft().unwrap().contains(&1));
    }

    #[test]
    fn test_selecting_another_call_discards_tag_draft() {
        let mut state = selected(call(10, "Order #9", &[(1, "Billing")]), vec![]);
        state.update(UserMsg::OpenTagAssignment);
        state.update(UserMsg::ToggleTag(2));

        let command = state.update(UserMsg::SelectCall(11)).remove(0);
        assert!(state.dialog.is_none());
        let UserCommand::LoadDetails { generation, .. } = command else {
            panic!("expected a detail load, got {:?}", command);
        };
        state.update(UserMsg::DetailsLoaded {
            generation,
            result: Ok(CallDetails {
                call: call(11, "c11", &[]),
                tasks: vec![],
            }),
        });

        // Nothing left to save for call 11
        assert!(state.update(UserMsg::SaveTagAssignment).is_empty());
        state.update(UserMsg::OpenTagAssignment);
        assert_eq!(state.tag_draft().map(|d| d.len()), Some(0));
    }

    #[test]
    fn test_reselecting_same_call_keeps_tag_draft() {
        let mut state = selected(call(10, "Order #9", &[]), vec![]);
        state.update(UserMsg::OpenTagAssignment);
        state.update(UserMsg::ToggleTag(2));
        state.update(UserMsg::SelectCall(10));
        assert!(state.tag_draft().unwrap().contains(&2));
    }

    #[test]
    fn test_failed_tag_save_keeps_dialog_and_draft() {
        let mut state = selected(call(10, "Order #9", &[]), vec![]);
        state.update(UserMsg::OpenTagAssignment);
        state.update(UserMsg::ToggleTag(3));
        state.update(UserMsg::SaveTagAssignment);
        state.update(UserMsg::TagsAssigned(Err(ClientError::Internal("down".into()))));

        assert!(state.tag_draft().unwrap().contains(&3));
        assert!(state.error.is_some());
        assert!(!state.loading);
    }

    #[test]
    fn test_reload_includes_selected_details() {
        let mut state = selected(call(10, "Order #9", &[]), vec![]);
        let commands = state.update(UserMsg::Reload);
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[2],
            UserCommand::LoadDetails { call_id: 10, .. }
        ));
    }
}
