//! Admin page: tag management
//!
//! Lists every tag, creates new ones and renames existing ones. Creation
//! and renaming share one `loading` flag, so only one of them can be in
//! flight at a time.

use async_trait::async_trait;
use call_client::{CallCenterApi, ClientResult, HttpClient, Tag, TagId};

use super::{Effect, Page, committed_text, failure_message};

/// Edit draft for an existing tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEdit {
    pub tag: Tag,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct AdminState {
    pub tags: Vec<Tag>,
    pub new_tag_name: String,
    pub editing: Option<TagEdit>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum AdminMsg {
    /// Page became visible
    Mounted,
    /// Manual refresh
    Reload,
    NewTagNameChanged(String),
    SubmitNewTag,
    BeginEdit(TagId),
    EditNameChanged(String),
    SaveEdit,
    CancelEdit,
    TagsLoaded(ClientResult<Vec<Tag>>),
    TagCreated(ClientResult<Tag>),
    TagUpdated(ClientResult<Tag>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    LoadTags,
    CreateTag { name: String },
    UpdateTag { id: TagId, name: String },
}

impl AdminState {
    /// Whether submit is enabled for the create form
    pub fn can_submit_new_tag(&self) -> bool {
        !self.loading && committed_text(&self.new_tag_name).is_some()
    }

    /// Whether save is enabled for the edit dialog
    pub fn can_save_edit(&self) -> bool {
        !self.loading
            && self
                .editing
                .as_ref()
                .is_some_and(|edit| committed_text(&edit.name).is_some())
    }

    fn reload(&mut self) -> Vec<AdminCommand> {
        self.error = None;
        vec![AdminCommand::LoadTags]
    }
}

impl Page for AdminState {
    type Msg = AdminMsg;
    type Command = AdminCommand;

    fn update(&mut self, msg: AdminMsg) -> Vec<AdminCommand> {
        match msg {
            AdminMsg::Mounted | AdminMsg::Reload => self.reload(),

            AdminMsg::NewTagNameChanged(name) => {
                // Input is disabled while a request is in flight
                if !self.loading {
                    self.new_tag_name = name;
                }
                vec![]
            }

            AdminMsg::SubmitNewTag => {
                if self.loading {
                    return vec![];
                }
                let Some(name) = committed_text(&self.new_tag_name) else {
                    return vec![];
                };
                self.loading = true;
                self.error = None;
                vec![AdminCommand::CreateTag { name }]
            }

            AdminMsg::BeginEdit(id) => {
                if self.loading {
                    return vec![];
                }
                if let Some(tag) = self.tags.iter().find(|t| t.id == id) {
                    self.editing = Some(TagEdit {
                        name: tag.name.clone(),
                        tag: tag.clone(),
                    });
                }
                vec![]
            }

            AdminMsg::EditNameChanged(name) => {
                if !self.loading
                    && let Some(edit) = self.editing.as_mut()
                {
                    edit.name = name;
                }
                vec![]
            }

            AdminMsg::SaveEdit => {
                if self.loading {
                    return vec![];
                }
                let Some(edit) = self.editing.as_ref() else {
                    return vec![];
                };
                let Some(name) = committed_text(&edit.name) else {
                    return vec![];
                };
                let id = edit.tag.id;
                self.loading = true;
                self.error = None;
                vec![AdminCommand::UpdateTag { id, name }]
            }

            AdminMsg::CancelEdit => {
                self.editing = None;
                vec![]
            }

            AdminMsg::TagsLoaded(Ok(tags)) => {
                self.tags = tags;
                vec![]
            }
            AdminMsg::TagsLoaded(Err(err)) => {
                tracing::error!("Error loading tags: {}", err);
                self.error = Some(failure_message("load tags", &err));
                vec![]
            }

            AdminMsg::TagCreated(Ok(tag)) => {
                tracing::info!("Created tag {} ({})", tag.id, tag.name);
                self.loading = false;
                self.new_tag_name.clear();
                self.reload()
            }
            AdminMsg::TagCreated(Err(err)) => {
                tracing::error!("Error creating tag: {}", err);
                self.loading = false;
                self.error = Some(failure_message("create tag", &err));
                vec![]
            }

            AdminMsg::TagUpdated(Ok(tag)) => {
                tracing::info!("Renamed tag {} to {}", tag.id, tag.name);
                self.loading = false;
                self.editing = None;
                self.reload()
            }
            AdminMsg::TagUpdated(Err(err)) => {
                tracing::error!("Error updating tag: {}", err);
                self.loading = false;
                self.error = Some(failure_message("update tag", &err));
                vec![]
            }
        }
    }
}

#[async_trait]
impl Effect for AdminCommand {
    type Msg = AdminMsg;

    async fn perform<C: HttpClient>(self, api: &CallCenterApi<C>) -> AdminMsg {
        match self {
            AdminCommand::LoadTags => AdminMsg::TagsLoaded(api.get_tags().await),
            AdminCommand::CreateTag { name } => AdminMsg::TagCreated(api.create_tag(&name).await),
            AdminCommand::UpdateTag { id, name } => {
                AdminMsg::TagUpdated(api.update_tag(id, &name).await)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_client::{ClientError, StatusCode};

    fn tag(id: TagId, name: &str) -> Tag {
        Tag {
            id,
            name: name.into(),
        }
    }

    fn loaded() -> AdminState {
        let mut state = AdminState::default();
        state.update(AdminMsg::TagsLoaded(Ok(vec![tag(1, "Billing"), tag(2, "Urgent")])));
        state
    }

    fn rejected(detail: &str) -> ClientError {
        ClientError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    #[test]
    fn test_mount_loads_tags() {
        let mut state = AdminState::default();
        assert_eq!(state.update(AdminMsg::Mounted), vec![AdminCommand::LoadTags]);
    }

    #[test]
    fn test_blank_name_issues_nothing() {
        let mut state = loaded();
        state.update(AdminMsg::NewTagNameChanged("   ".into()));
        assert!(!state.can_submit_new_tag());
        assert!(state.update(AdminMsg::SubmitNewTag).is_empty());
        assert!(!state.loading);
        assert_eq!(state.tags.len(), 2);
    }

    #[test]
    fn test_create_sends_trimmed_name_and_reloads() {
        let mut state = loaded();
        state.update(AdminMsg::NewTagNameChanged("  VIP ".into()));
        assert_eq!(
            state.update(AdminMsg::SubmitNewTag),
            vec![AdminCommand::CreateTag { name: "VIP".into() }]
        );
        assert!(state.loading);

        // Draft is frozen while in flight, and a second submit is ignored
        state.update(AdminMsg::NewTagNameChanged("other".into()));
        assert_eq!(state.new_tag_name, "  VIP ");
        assert!(state.update(AdminMsg::SubmitNewTag).is_empty());

        let next = state.update(AdminMsg::TagCreated(Ok(tag(3, "VIP"))));
        assert_eq!(next, vec![AdminCommand::LoadTags]);
        assert!(!state.loading);
        assert!(state.new_tag_name.is_empty());
    }

    #[test]
    fn test_create_failure_keeps_draft() {
        let mut state = loaded();
        state.update(AdminMsg::NewTagNameChanged("Billing".into()));
        state.update(AdminMsg::SubmitNewTag);

        let next = state.update(AdminMsg::TagCreated(Err(rejected(
            "Tag with this name already exists",
        ))));
        assert!(next.is_empty());
        assert!(!state.loading);
        assert_eq!(state.new_tag_name, "Billing");
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to create tag: Tag with this name already exists")
        );
    }

    #[test]
    fn test_edit_flow() {
        let mut state = loaded();
        state.update(AdminMsg::BeginEdit(2));
        assert_eq!(state.editing.as_ref().map(|e| e.name.as_str()), Some("Urgent"));

        state.update(AdminMsg::EditNameChanged(" Critical ".into()));
        assert_eq!(
            state.update(AdminMsg::SaveEdit),
            vec![AdminCommand::UpdateTag {
                id: 2,
                name: "Critical".into()
            }]
        );

        assert!(state.loading);

        // Rename draft is frozen while the update is in flight
        state.update(AdminMsg::EditNameChanged("Other".into()));
        assert_eq!(state.editing.as_ref().map(|e| e.name.as_str()), Some(" Critical "));

        let next = state.update(AdminMsg::TagUpdated(Ok(tag(2, "Critical"))));
        assert_eq!(next, vec![AdminCommand::LoadTags]);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_edit_failure_keeps_dialog_open() {
        let mut state = loaded();
        state.update(AdminMsg::BeginEdit(1));
        state.update(AdminMsg::EditNameChanged("Urgent".into()));
        state.update(AdminMsg::SaveEdit);
        state.update(AdminMsg::TagUpdated(Err(rejected("Tag with this name already exists"))));

        assert!(state.editing.is_some());
        assert!(state.error.is_some());
        assert!(!state.loading);
    }

    #[test]
    fn test_cancel_edit_sends_nothing() {
        let mut state = loaded();
        state.update(AdminMsg::BeginEdit(1));
        assert!(state.update(AdminMsg::CancelEdit).is_empty());
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_blank_edit_is_not_saved() {
        let mut state = loaded();
        state.update(AdminMsg::BeginEdit(1));
        state.update(AdminMsg::EditNameChanged("  ".into()));
        assert!(!state.can_save_edit());
        assert!(state.update(AdminMsg::SaveEdit).is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_tags() {
        let mut state = loaded();
        state.update(AdminMsg::TagsLoaded(Err(ClientError::Internal("down".into()))));
        assert_eq!(state.tags.len(), 2);
        assert!(state.error.as_deref().unwrap().starts_with("Failed to load tags"));

        // The next reload clears the banner
        state.update(AdminMsg::Reload);
        assert!(state.error.is_none());
    }
}
