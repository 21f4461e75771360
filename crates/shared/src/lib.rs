//! Wire and domain types shared by the MeubleHub client crates.

pub mod domain;
pub mod error;
pub mod protocol;
