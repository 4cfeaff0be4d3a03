//! Shared Yew components.

pub(crate) mod modal;
pub(crate) mod pagination;
pub(crate) mod reauth_modal;
pub(crate) mod toast;
