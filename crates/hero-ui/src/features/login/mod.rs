//! Login feature: form rules, login-or-register flow and logout.

pub mod flow;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
