//! Feature slices: hero management and login.

pub mod heroes;
pub mod login;
