use std::{fmt, str::FromStr};

use anyhow::bail;
use shared::domain::HomeId;

/// Every screen the shell can show, addressed by a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
    Signup,
    Homes,
    HomeRooms(HomeId),
    /// Objects of one room.
    Room(String),
    /// Objects across all rooms.
    Objects,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Homes => "/homes".to_string(),
            Self::HomeRooms(id) => format!("/homes/{id}/rooms"),
            Self::Room(id) => format!("/room/{id}"),
            Self::Objects => "/objects".to_string(),
        }
    }

    /// Pages that act on behalf of a user; the shell sends signed-out
    /// visitors to `/login` instead.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Dashboard | Self::Login | Self::Signup)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["homes"] => Self::Homes,
            ["homes", id, "rooms"] => match id.parse::<u64>() {
                Ok(id) => Self::HomeRooms(HomeId(id)),
                Err(_) => bail!("invalid home id '{id}' in route '{trimmed}'"),
            },
            ["room", id] => Self::Room((*id).to_string()),
            ["objects"] => Self::Objects,
            _ => bail!("unknown route '{trimmed}'"),
        };
        Ok(route)
    }
}

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
    pub selected: bool,
}

pub fn nav_items(current: &Route) -> Vec<NavItem> {
    [
        ("Dashboard", Route::Dashboard),
        ("Homes", Route::Homes),
        ("Objects", Route::Objects),
    ]
    .into_iter()
    .map(|(label, route)| NavItem {
        label,
        selected: route_section(current) == route,
        route,
    })
    .collect()
}

/// The sidebar entry a nested page lives under.
fn route_section(route: &Route) -> Route {
    match route {
        Route::HomeRooms(_) => Route::Homes,
        Route::Room(_) => Route::Objects,
        other => other.clone(),
    }
}
