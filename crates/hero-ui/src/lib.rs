#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::future_not_send)]
//! Hero Console web UI.
//! The DOM-free core (session, request layer, controllers) builds natively; the Yew
//! shell that renders it is compiled for wasm32 only.

pub mod core;
pub mod features;
pub mod models;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
