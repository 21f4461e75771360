use async_trait::async_trait;
use shared::domain::{Home, HomeId};

use super::{
    events::{required, ActionOutcome, UiErrorContext},
    list::{ListController, ListState},
    ListView,
};
use crate::{error::ClientResult, Hub};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeRow {
    pub home: Home,
    pub can_delete: bool,
}

pub struct HomesPage {
    hub: Hub,
    state: ListState<Home>,
}

impl HomesPage {
    pub fn new(hub: Hub) -> Self {
        Self {
            hub,
            state: ListState::default(),
        }
    }

    /// Builds the page and issues its initial fetch.
    pub async fn mount(hub: Hub) -> Self {
        let mut page = Self::new(hub);
        page.refresh().await;
        page
    }

    pub async fn create_home(&mut self, name: &str) -> ActionOutcome {
        let name = match required(name, "Home name is required") {
            Ok(name) => name.to_string(),
            Err(err) => {
                self.state.record_failure(&err, UiErrorContext::CreateHome);
                return ActionOutcome::Failed;
            }
        };
        let result = self.hub.homes.create_home(&name).await;
        self.settle(result, UiErrorContext::CreateHome).await
    }

    pub async fn delete_home(&mut self, id: HomeId) -> ActionOutcome {
        let result = self.hub.homes.delete_home(id).await;
        self.settle(result, UiErrorContext::DeleteHome).await
    }

    /// Delete controls are offered to admins only.
    pub fn can_delete(&self) -> bool {
        self.hub.session.is_admin()
    }

    pub fn view(&self) -> ListView<HomeRow> {
        let can_delete = self.can_delete();
        ListView::from_state(
            &self.state,
            |home| HomeRow {
                home: home.clone(),
                can_delete,
            },
            "You haven't created any homes yet.",
        )
    }
}

#[async_trait]
impl ListController for HomesPage {
    type Item = Home;

    const FETCH_CONTEXT: UiErrorContext = UiErrorContext::LoadHomes;

    fn state(&self) -> &ListState<Home> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ListState<Home> {
        &mut self.state
    }

    async fn fetch(&self) -> ClientResult<Vec<Home>> {
        self.hub.homes.list_homes().await
    }
}
