//! Top-level view switch
//!
//! Exactly one page is mounted at a time. Switching views throws the old
//! page away and mounts a fresh one, which loads its data again. Every
//! mount gets a new number; page messages carry the number of the mount
//! that issued them, and messages for an older mount are dropped.

use async_trait::async_trait;
use call_client::{CallCenterApi, HttpClient};

use crate::pages::{
    AdminCommand, AdminMsg, AdminState, Effect, Page, UserCommand, UserMsg, UserState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    User,
    Admin,
}

impl View {
    pub fn other(self) -> View {
        match self {
            View::User => View::Admin,
            View::Admin => View::User,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::User => "User",
            View::Admin => "Admin",
        }
    }
}

#[derive(Debug)]
pub enum PageState {
    User(UserState),
    Admin(AdminState),
}

impl PageState {
    fn fresh(view: View) -> Self {
        match view {
            View::User => PageState::User(UserState::default()),
            View::Admin => PageState::Admin(AdminState::default()),
        }
    }
}

#[derive(Debug)]
pub enum PageMsg {
    User(UserMsg),
    Admin(AdminMsg),
}

impl From<UserMsg> for PageMsg {
    fn from(msg: UserMsg) -> Self {
        PageMsg::User(msg)
    }
}

impl From<AdminMsg> for PageMsg {
    fn from(msg: AdminMsg) -> Self {
        PageMsg::Admin(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    User(UserCommand),
    Admin(AdminCommand),
}

#[derive(Debug)]
pub enum AppMsg {
    /// Mount `view`; remounts when it is already current
    SwitchView(View),
    Page { mount: u64, msg: PageMsg },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCommand {
    pub mount: u64,
    pub command: PageCommand,
}

#[derive(Debug)]
pub struct App {
    view: View,
    page: PageState,
    mount: u64,
}

impl Default for App {
    fn default() -> Self {
        Self {
            view: View::default(),
            page: PageState::fresh(View::default()),
            mount: 0,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Number of the current mount
    pub fn mount(&self) -> u64 {
        self.mount
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn user(&self) -> Option<&UserState> {
        match &self.page {
            PageState::User(state) => Some(state),
            PageState::Admin(_) => None,
        }
    }

    pub fn admin(&self) -> Option<&AdminState> {
        match &self.page {
            PageState::Admin(state) => Some(state),
            PageState::User(_) => None,
        }
    }

    /// Address `msg` to the page mounted right now
    pub fn to_page(&self, msg: impl Into<PageMsg>) -> AppMsg {
        AppMsg::Page {
            mount: self.mount,
            msg: msg.into(),
        }
    }

    fn dispatch(&mut self, msg: PageMsg) -> Vec<AppCommand> {
        let mount = self.mount;
        match (&mut self.page, msg) {
            (PageState::User(state), PageMsg::User(msg)) => {
                stamp(mount, state.update(msg), PageCommand::User)
            }
            (PageState::Admin(state), PageMsg::Admin(msg)) => {
                stamp(mount, state.update(msg), PageCommand::Admin)
            }
            (_, msg) => {
                tracing::debug!("Dropping message for another page: {:?}", msg);
                vec![]
            }
        }
    }
}

fn stamp<C>(mount: u64, commands: Vec<C>, kind: fn(C) -> PageCommand) -> Vec<AppCommand> {
    commands
        .into_iter()
        .map(|command| AppCommand {
            mount,
            command: kind(command),
        })
        .collect()
}

impl Page for App {
    type Msg = AppMsg;
    type Command = AppCommand;

    fn update(&mut self, msg: AppMsg) -> Vec<AppCommand> {
        match msg {
            AppMsg::SwitchView(view) => {
                self.view = view;
                self.page = PageState::fresh(view);
                self.mount += 1;
                tracing::debug!("Mounted {} page (#{})", view.label(), self.mount);
                let mounted = match view {
                    View::User => PageMsg::User(UserMsg::Mounted),
                    View::Admin => PageMsg::Admin(AdminMsg::Mounted),
                };
                self.dispatch(mounted)
            }
            AppMsg::Page { mount, msg } => {
                if mount != self.mount {
                    tracing::debug!(
                        "Dropping message for unmounted page #{} (current #{})",
                        mount,
                        self.mount
                    );
                    return vec![];
                }
                self.dispatch(msg)
            }
        }
    }
}

#[async_trait]
impl Effect for AppCommand {
    type Msg = AppMsg;

    async fn perform<C: HttpClient>(self, api: &CallCenterApi<C>) -> AppMsg {
        let msg = match self.command {
            PageCommand::User(command) => PageMsg::User(command.perform(api).await),
            PageCommand::Admin(command) => PageMsg::Admin(command.perform(api).await),
        };
        AppMsg::Page {
            mount: self.mount,
            msg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use call_client::Tag;

    #[test]
    fn test_default_view_is_user() {
        let mut app = App::new();
        assert_eq!(app.view(), View::User);

        let commands = app.update(AppMsg::SwitchView(View::User));
        assert_eq!(
            commands,
            vec![
                AppCommand {
                    mount: 1,
                    command: PageCommand::User(UserCommand::LoadCalls)
                },
                AppCommand {
                    mount: 1,
                    command: PageCommand::User(UserCommand::LoadTags)
                },
            ]
        );
    }

    #[test]
    fn test_switch_remounts_with_fresh_state() {
        let mut app = App::new();
        app.update(AppMsg::SwitchView(View::Admin));
        let msg = app.to_page(AdminMsg::NewTagNameChanged("VIP".into()));
        app.update(msg);
        assert_eq!(app.admin().unwrap().new_tag_name, "VIP");

        app.update(AppMsg::SwitchView(View::User));
        app.update(AppMsg::SwitchView(View::Admin));
        assert!(app.admin().unwrap().new_tag_name.is_empty());
        assert_eq!(app.mount(), 3);
    }

    #[test]
    fn test_response_for_unmounted_page_is_dropped() {
        let mut app = App::new();
        app.update(AppMsg::SwitchView(View::Admin));
        let stale_mount = app.mount();
        app.update(AppMsg::SwitchView(View::Admin));

        let commands = app.update(AppMsg::Page {
            mount: stale_mount,
            msg: PageMsg::Admin(AdminMsg::TagsLoaded(Ok(vec![Tag {
                id: 1,
                name: "Billing".into(),
            }]))),
        });
        assert!(commands.is_empty());
        assert!(app.admin().unwrap().tags.is_empty());
    }

    #[test]
    fn test_message_for_other_page_kind_is_dropped() {
        let mut app = App::new();
        app.update(AppMsg::SwitchView(View::User));
        let msg = app.to_page(AdminMsg::Reload);
        assert!(app.update(msg).is_empty());
    }
}
