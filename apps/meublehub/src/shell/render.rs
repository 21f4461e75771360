//! Plain-text rendering of page views.

use std::fmt::Write as _;

use client_core::{
    pages::{HomeRow, ListView, LoadPhase, ObjectRow, RoomRow, UiError},
    SessionStore,
};
use shared::domain::{Object, User};

use super::route::{nav_items, Route};

const APP_TITLE: &str = "MeubleHub";

/// Title bar: the signed-in account, or a prompt to log in.
pub fn account_header(session: &SessionStore) -> String {
    match session.current_user() {
        Some(user) => {
            let role = if user.is_admin { " (admin)" } else { "" };
            format!("{APP_TITLE} | {}{role} <{}>", user.username, user.email)
        }
        None => format!("{APP_TITLE} | Login"),
    }
}

pub fn sidebar(current: &Route) -> String {
    nav_items(current)
        .iter()
        .map(|item| {
            let marker = if item.selected { '>' } else { ' ' };
            format!("{marker} {:<10} {}", item.label, item.route)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn error_banner(error: &UiError) -> String {
    format!("error: {}", error.message())
}

fn render_list<R>(title: &str, view: &ListView<R>, line: impl Fn(&R) -> String) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");
    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }
    if view.phase == LoadPhase::Loading {
        let _ = writeln!(out, "Loading...");
    } else if let Some(empty) = view.empty_message() {
        let _ = writeln!(out, "{empty}");
    }
    for row in &view.rows {
        let _ = writeln!(out, "{}", line(row));
    }
    out
}

pub fn homes(view: &ListView<HomeRow>) -> String {
    render_list("Homes", view, |row| {
        let actions = if row.can_delete { "  [delete]" } else { "" };
        format!("{:>6}  {}{actions}", row.home.id, row.home.name)
    })
}

pub fn rooms(title: &str, view: &ListView<RoomRow>) -> String {
    render_list(title, view, |row| {
        let actions = if row.can_delete { "  [delete]" } else { "" };
        format!("{:>6}  {}{actions}", row.room.id, row.room.name)
    })
}

pub fn objects(title: &str, view: &ListView<ObjectRow>) -> String {
    render_list(title, view, |row| {
        let mut actions = Vec::new();
        if row.can_reserve {
            actions.push("reserve");
        }
        if row.can_cancel {
            actions.push("cancel");
        }
        if row.can_delete {
            actions.push("delete");
        }
        let actions = if actions.is_empty() {
            String::new()
        } else {
            format!("  [{}]", actions.join(", "))
        };
        format!(
            "{}  {} ({}, room {})  {}{actions}",
            row.object.id,
            row.object.name,
            row.object.kind,
            row.object.room_id,
            availability(&row.object, row.reserved_by_name.as_deref()),
        )
    })
}

fn availability(object: &Object, reserved_by_name: Option<&str>) -> String {
    match (object.reserved_by(), reserved_by_name) {
        (None, _) => "available".to_string(),
        (Some(_), Some(name)) => format!("reserved by {name}"),
        (Some(raw), None) => format!("reserved by user {raw}"),
    }
}

pub fn reserved_objects(objects: &[Object]) -> String {
    let mut out = String::from("== Reserved objects ==\n");
    if objects.is_empty() {
        out.push_str("Nothing is reserved.\n");
    }
    for object in objects {
        let _ = writeln!(
            out,
            "{}  {} ({}, room {})  {}",
            object.id,
            object.name,
            object.kind,
            object.room_id,
            availability(object, None)
        );
    }
    out
}

pub fn user(user: &User) -> String {
    let role = if user.is_admin { "admin" } else { "member" };
    format!("{:>6}  {}  <{}>  {role}", user.id, user.username, user.email)
}

pub fn users(users: &[User]) -> String {
    let mut out = String::from("== Users ==\n");
    for entry in users {
        let _ = writeln!(out, "{}", user(entry));
    }
    out
}
