//! Session, typed service clients and page controllers for MeubleHub.

pub mod config;
pub mod error;
mod hub;
pub mod pages;
pub mod resources;
pub mod session;
pub mod transport;

pub use config::{ClientConfig, ReservationOwnership};
pub use error::{ClientError, ClientResult};
pub use hub::Hub;
pub use session::{Session, SessionStore};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
