//! Hero management feature wiring.
//!
//! # Design
//! - Controllers own every state transition; views only render slices and forward events.
//! - All catalog calls go through this feature layer.
//! - Pure rules live in `logic` so they are testable without a backend.

pub mod actions;
pub mod form;
pub mod list;
pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
