//! Typed wrappers, one per backend service.

mod homes;
mod objects;
mod rooms;
mod users;

pub use homes::HomesClient;
pub use objects::ObjectsClient;
pub use rooms::RoomsClient;
pub use users::UsersClient;

#[cfg(test)]
#[path = "../tests/resources_tests.rs"]
mod tests;
