//! Route-to-page mapping and the actions the CLI dispatches to pages.

mod render;
mod route;

pub use render::account_header;
pub use route::{nav_items, Route};

use client_core::{
    pages::{
        ActionOutcome, HomesPage, LoginForm, ObjectsPage, RoomsPage, SignupForm, UiError,
    },
    ClientError, Hub,
};
use shared::domain::{HomeId, ObjectId, ObjectKind, RoomId, UserId};

/// What the shell shows after handling a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub route: Route,
    pub body: String,
    pub ok: bool,
}

impl Screen {
    fn new(route: Route, body: String, ok: bool) -> Self {
        Self { route, body, ok }
    }
}

pub struct Shell {
    hub: Hub,
}

impl Shell {
    pub fn new(hub: Hub) -> Self {
        Self { hub }
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    /// Header, sidebar and the page body for `route`.
    pub fn frame(&self, screen: &Screen) -> String {
        format!(
            "{}\n{}\n\n{}",
            account_header(&self.hub.session),
            render::sidebar(&screen.route),
            screen.body.trim_end()
        )
    }

    pub async fn open(&self, route: Route) -> Screen {
        if route.requires_session() && !self.hub.session.is_authenticated() {
            return self.login_required();
        }
        match route {
            Route::Dashboard => self.dashboard(),
            Route::Login => Screen::new(
                Route::Login,
                "Sign in with `meublehub login --email <email> --password <password>`.".into(),
                true,
            ),
            Route::Signup => Screen::new(
                Route::Signup,
                "Create an account with `meublehub signup --username <name> --email <email>`."
                    .into(),
                true,
            ),
            Route::Homes => {
                let page = HomesPage::mount(self.hub.clone()).await;
                homes_screen(&page, true)
            }
            Route::HomeRooms(home_id) => {
                let page = RoomsPage::mount(self.hub.clone(), home_id).await;
                rooms_screen(&page, true)
            }
            Route::Room(room_id) => {
                let page = ObjectsPage::mount(self.hub.clone(), Some(room_id)).await;
                objects_screen(&page, true)
            }
            Route::Objects => {
                let page = ObjectsPage::mount(self.hub.clone(), None).await;
                objects_screen(&page, true)
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Screen {
        let mut form = LoginForm::new(email, password);
        match form.submit(&self.hub).await {
            ActionOutcome::Done => self.dashboard(),
            _ => failed(Route::Login, form.error()),
        }
    }

    pub async fn signup(&self, mut form: SignupForm) -> Screen {
        match form.submit(&self.hub).await {
            ActionOutcome::Done => {
                let name = form
                    .created()
                    .map(|user| user.username.clone())
                    .unwrap_or_default();
                Screen::new(
                    Route::Login,
                    format!("Account '{name}' created. Please log in."),
                    true,
                )
            }
            _ => failed(Route::Signup, form.error()),
        }
    }

    pub fn logout(&self) -> Screen {
        self.hub.session.logout();
        Screen::new(Route::Login, "Signed out.".into(), true)
    }

    pub fn whoami(&self) -> Screen {
        match self.hub.session.current_user() {
            Some(user) => Screen::new(Route::Dashboard, render::user(&user), true),
            None => self.login_required(),
        }
    }

    pub async fn create_home(&self, name: &str) -> Screen {
        let mut page = HomesPage::mount(self.hub.clone()).await;
        let outcome = page.create_home(name).await;
        self.after(outcome, |ok| homes_screen(&page, ok))
    }

    /// Refuses before sending when the delete control would be hidden.
    pub async fn delete_home(&self, id: HomeId) -> Screen {
        let mut page = HomesPage::mount(self.hub.clone()).await;
        if !page.can_delete() {
            return admin_only(Route::Homes, "homes");
        }
        let outcome = page.delete_home(id).await;
        self.after(outcome, |ok| homes_screen(&page, ok))
    }

    pub async fn create_room(&self, home_id: HomeId, name: &str) -> Screen {
        let mut page = RoomsPage::mount(self.hub.clone(), home_id).await;
        let outcome = page.create_room(name).await;
        self.after(outcome, |ok| rooms_screen(&page, ok))
    }

    pub async fn delete_room(&self, home_id: HomeId, id: RoomId) -> Screen {
        let mut page = RoomsPage::mount(self.hub.clone(), home_id).await;
        if !page.can_delete() {
            return admin_only(Route::HomeRooms(home_id), "rooms");
        }
        let outcome = page.delete_room(id).await;
        self.after(outcome, |ok| rooms_screen(&page, ok))
    }

    pub async fn objects(&self, room_id: Option<String>, only_available: bool) -> Screen {
        if !self.hub.session.is_authenticated() {
            return self.login_required();
        }
        let mut page = ObjectsPage::mount(self.hub.clone(), room_id).await;
        page.set_show_only_available(only_available);
        objects_screen(&page, true)
    }

    pub async fn create_object(
        &self,
        room_id: Option<String>,
        name: &str,
        kind: ObjectKind,
    ) -> Screen {
        let mut page = ObjectsPage::mount(self.hub.clone(), room_id).await;
        let outcome = page.create_object(name, kind).await;
        self.after(outcome, |ok| objects_screen(&page, ok))
    }

    pub async fn reserve(&self, room_id: Option<String>, id: &ObjectId) -> Screen {
        let mut page = ObjectsPage::mount(self.hub.clone(), room_id).await;
        let outcome = page.reserve(id).await;
        self.after(outcome, |ok| objects_screen(&page, ok))
    }

    pub async fn unreserve(&self, room_id: Option<String>, id: &ObjectId) -> Screen {
        let mut page = ObjectsPage::mount(self.hub.clone(), room_id).await;
        let outcome = page.unreserve(id).await;
        self.after(outcome, |ok| objects_screen(&page, ok))
    }

    pub async fn delete_object(&self, room_id: Option<String>, id: &ObjectId) -> Screen {
        let mut page = ObjectsPage::mount(self.hub.clone(), room_id.clone()).await;
        if !page.can_delete() {
            return admin_only(objects_route(room_id), "objects");
        }
        let outcome = page.delete_object(id).await;
        self.after(outcome, |ok| objects_screen(&page, ok))
    }

    pub async fn reserved_objects(&self) -> Screen {
        match self.hub.objects.list_reserved().await {
            Ok(objects) => Screen::new(Route::Objects, render::reserved_objects(&objects), true),
            Err(err) => client_failure(Route::Objects, &err),
        }
    }

    pub async fn users(&self) -> Screen {
        match self.hub.users.list_users().await {
            Ok(users) => Screen::new(Route::Dashboard, render::users(&users), true),
            Err(err) => client_failure(Route::Dashboard, &err),
        }
    }

    pub async fn user(&self, id: UserId) -> Screen {
        match self.hub.users.get_user(id).await {
            Ok(user) => Screen::new(Route::Dashboard, render::user(&user), true),
            Err(err) => client_failure(Route::Dashboard, &err),
        }
    }

    fn dashboard(&self) -> Screen {
        let body = match self.hub.session.current_user() {
            Some(user) => format!(
                "Welcome back, {}. Browse your homes, rooms and objects from the sidebar.",
                user.username
            ),
            None => "Welcome to MeubleHub. Log in to manage your furniture.".to_string(),
        };
        Screen::new(Route::Dashboard, body, true)
    }

    fn login_required(&self) -> Screen {
        Screen::new(Route::Login, "Login required.".into(), false)
    }

    fn after(&self, outcome: ActionOutcome, render: impl FnOnce(bool) -> Screen) -> Screen {
        match outcome {
            ActionOutcome::Done => render(true),
            ActionOutcome::Failed => render(false),
            ActionOutcome::LoginRequired => self.login_required(),
        }
    }
}

fn objects_route(room_id: Option<String>) -> Route {
    room_id.map_or(Route::Objects, Route::Room)
}

// A list screen only succeeds when the page holds no error.
fn homes_screen(page: &HomesPage, ok: bool) -> Screen {
    let view = page.view();
    let ok = ok && view.error.is_none();
    Screen::new(Route::Homes, render::homes(&view), ok)
}

fn rooms_screen(page: &RoomsPage, ok: bool) -> Screen {
    let title = format!("Rooms of home {}", page.home_id());
    let view = page.view();
    let ok = ok && view.error.is_none();
    Screen::new(Route::HomeRooms(page.home_id()), render::rooms(&title, &view), ok)
}

fn objects_screen(page: &ObjectsPage, ok: bool) -> Screen {
    let (route, title) = match page.room_id() {
        Some(room_id) => (
            Route::Room(room_id.to_string()),
            format!("Objects in room {room_id}"),
        ),
        None => (Route::Objects, "All objects".to_string()),
    };
    let view = page.view();
    let ok = ok && view.error.is_none();
    let mut body = render::objects(&title, &view);
    if page.show_only_available() {
        body.push_str("(showing available objects only)\n");
    }
    Screen::new(route, body, ok)
}

fn failed(route: Route, error: Option<&UiError>) -> Screen {
    let body = error.map(render::error_banner).unwrap_or_default();
    Screen::new(route, body, false)
}

fn client_failure(route: Route, err: &ClientError) -> Screen {
    Screen::new(route, format!("error: {err}"), false)
}

fn admin_only(route: Route, what: &str) -> Screen {
    Screen::new(route, format!("Only admins can delete {what}."), false)
}

#[cfg(test)]
#[path = "../tests/shell_tests.rs"]
mod tests;
