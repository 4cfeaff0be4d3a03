//! Core, DOM-free primitives and helpers for the console.
pub mod auth;
pub mod config;
pub mod store;
pub mod telemetry;
pub mod ui;
