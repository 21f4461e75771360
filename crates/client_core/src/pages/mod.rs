//! Page controllers: per-entity list state, the refetch-after-mutation
//! actions, and the login/signup forms.
//!
//! Controllers never return errors. A failure is stored on the page as a
//! [`UiError`] and the action reports an [`ActionOutcome`].

mod auth;
mod events;
mod homes;
mod list;
mod objects;
mod rooms;

pub use auth::{LoginForm, SignupForm};
pub use events::{ActionOutcome, UiError, UiErrorCategory, UiErrorContext};
pub use homes::{HomeRow, HomesPage};
pub use list::{ListController, ListState, LoadPhase};
pub use objects::{ObjectRow, ObjectsPage};
pub use rooms::{RoomRow, RoomsPage};

/// Render-ready snapshot of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<R> {
    pub phase: LoadPhase,
    pub rows: Vec<R>,
    pub error: Option<String>,
    empty_message: &'static str,
}

impl<R> ListView<R> {
    pub fn from_state<T>(
        state: &ListState<T>,
        row: impl Fn(&T) -> R,
        empty_message: &'static str,
    ) -> Self {
        Self {
            phase: state.phase(),
            rows: state.items().iter().map(row).collect(),
            error: state.error().map(|err| err.message().to_string()),
            empty_message,
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&R) -> bool) {
        self.rows.retain(keep);
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Placeholder text, shown once loaded with nothing to list and no error.
    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.is_loading() && self.rows.is_empty() && self.error.is_none())
            .then_some(self.empty_message)
    }
}

#[cfg(test)]
#[path = "../tests/pages_tests.rs"]
mod tests;
