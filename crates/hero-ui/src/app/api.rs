//! Service context for sharing one request layer per app boot.
//!
//! # Design
//! - Create exactly one [`Services`] registry per app boot.
//! - Components read it from context instead of rebuilding clients.

use crate::app::shell::ModalPrompt;
use crate::services::Services;
use std::rc::Rc;

/// Shared services context for UI components.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton service registry.
    pub services: Rc<Services>,
    /// Prompt answered by the session-expired modal.
    pub prompt: Rc<ModalPrompt>,
}

impl ApiCtx {
    pub(crate) fn new(services: Services, prompt: Rc<ModalPrompt>) -> Self {
        Self {
            services: Rc::new(services),
            prompt,
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.services, &other.services)
    }
}
