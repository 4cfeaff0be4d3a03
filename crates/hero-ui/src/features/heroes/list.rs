//! Search and pagination controller for the hero table.

use crate::core::store::SliceHandle;
use crate::features::heroes::logic::{ListPolicy, apply_resolution, validate_filter};
use crate::features::heroes::state::{HeroListState, PAGE_SIZES, SearchFilter};
use crate::services::catalog::CatalogService;

/// Drives the list slice: filter edits, paging and fetches.
#[derive(Clone)]
pub struct HeroListController<S> {
    catalog: CatalogService,
    slice: S,
    policy: ListPolicy,
}

impl<S: SliceHandle<HeroListState>> HeroListController<S> {
    /// Controller with the default [`ListPolicy`].
    pub fn new(catalog: CatalogService, slice: S) -> Self {
        Self {
            catalog,
            slice,
            policy: ListPolicy::default(),
        }
    }

    /// Replace the outcome policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ListPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current slice value.
    pub fn state(&self) -> HeroListState {
        self.slice.snapshot()
    }

    /// Edit the search form without fetching.
    pub fn update_filter(&self, edit: impl FnOnce(&mut SearchFilter)) {
        self.slice.update(|state| {
            edit(&mut state.filter);
            state.filter_errors.clear();
        });
    }

    /// Clear the search form without fetching.
    pub fn reset_filter(&self) {
        self.slice.update(|state| {
            state.filter = SearchFilter::default();
            state.filter_errors.clear();
        });
    }

    /// Explicit search from page 1. Returns `false` when the filter is invalid.
    pub async fn search(&self) -> bool {
        let valid = self.slice.update(|state| {
            state.filter_errors = validate_filter(&state.filter);
            let valid = state.filter_errors.is_empty();
            if valid {
                state.pagination.current = 1;
            }
            valid
        });
        valid && self.fetch().await
    }

    /// Move to `page`; fetches only when the page actually changes.
    pub async fn change_page(&self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.slice.update(|state| {
            let changed = state.pagination.current != page;
            state.pagination.current = page;
            changed
        });
        changed && self.fetch().await
    }

    /// Change rows per page, returning to page 1. Unsupported sizes are ignored.
    pub async fn change_page_size(&self, page_size: u32) -> bool {
        if !PAGE_SIZES.contains(&page_size) {
            return false;
        }
        let changed = self.slice.update(|state| {
            let changed = state.pagination.page_size != page_size;
            if changed {
                state.pagination.page_size = page_size;
                state.pagination.current = 1;
            }
            changed
        });
        changed && self.fetch().await
    }

    /// Jump to page 1 and fetch, used after a save.
    pub async fn reload_first_page(&self) -> bool {
        self.slice.update(|state| state.pagination.current = 1);
        self.fetch().await
    }

    /// Fetch the current page again.
    pub async fn refresh(&self) -> bool {
        self.fetch().await
    }

    /// Delete a hero by name, then refresh in place.
    pub async fn delete(&self, hero_name: &str) -> bool {
        self.slice.update(|state| state.loading = true);
        match self.catalog.delete_hero(hero_name).await {
            Ok(()) => {
                tracing::debug!(%hero_name, "hero deleted");
                self.refresh().await;
                true
            }
            Err(err) => {
                tracing::debug!(%hero_name, error = %err, "hero delete failed");
                self.slice.update(|state| state.loading = false);
                false
            }
        }
    }

    /// Fetch with the filter as it stands; only [`Self::search`] validates it.
    async fn fetch(&self) -> bool {
        let (seq, query) = self.slice.update(|state| {
            state.issued += 1;
            state.loading = true;
            (state.issued, state.filter.to_query(&state.pagination))
        });

        let page = match self.catalog.list_heroes(&query).await {
            Ok(page) => Some(page),
            Err(err) => {
                tracing::debug!(error = %err, "hero list fetch failed");
                None
            }
        };
        let policy = self.policy;
        self.slice.update(|state| {
            if !policy.accepts(state.issued, seq) {
                tracing::debug!(seq, issued = state.issued, "stale hero list result dropped");
                return;
            }
            apply_resolution(state, page, policy);
            if seq == state.issued {
                state.loading = false;
            }
        });
        true
    }
}
