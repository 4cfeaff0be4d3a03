//! Add/edit modal controller: draft, poster uploads and save.

use crate::core::store::SliceHandle;
use crate::core::ui::Notifier;
use crate::features::heroes::actions::success_message;
use crate::features::heroes::list::HeroListController;
use crate::features::heroes::logic::{self, LIMIT_WARNING, UPLOAD_SUCCESS};
use crate::features::heroes::state::{FormMode, HeroDraft, HeroFormState, HeroListState};
use crate::services::catalog::CatalogService;
use crate::services::http::UploadFile;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::rc::Rc;

/// Drives the editor slice.
#[derive(Clone)]
pub struct HeroFormController<S> {
    catalog: CatalogService,
    notifier: Rc<dyn Notifier>,
    slice: S,
}

impl<S: SliceHandle<HeroFormState>> HeroFormController<S> {
    /// Build a controller over an editor slice.
    pub fn new(catalog: CatalogService, notifier: Rc<dyn Notifier>, slice: S) -> Self {
        Self {
            catalog,
            notifier,
            slice,
        }
    }

    /// Current slice value.
    pub fn state(&self) -> HeroFormState {
        self.slice.snapshot()
    }

    /// Open an empty editor.
    pub fn open_add(&self) {
        self.slice.update(logic::open_add);
    }

    /// Fetch the full record and open it for editing. The modal stays closed on failure.
    pub async fn open_update(&self, hero_id: &str, img_ids: &str) -> bool {
        match self.catalog.get_hero(hero_id, img_ids).await {
            Ok(detail) => {
                self.slice.update(|state| logic::open_update(state, detail));
                true
            }
            Err(err) => {
                tracing::debug!(%hero_id, error = %err, "hero detail fetch failed");
                false
            }
        }
    }

    /// Edit draft fields.
    pub fn edit(&self, change: impl FnOnce(&mut HeroDraft)) {
        self.slice.update(|state| {
            change(&mut state.draft);
            state.errors.clear();
        });
    }

    /// Drop a stored poster from the draft. Nothing is sent until save.
    pub fn remove_poster(&self, img_id: &str) -> bool {
        self.slice
            .update(|state| logic::remove_poster(state, img_id))
    }

    /// Forget a picked file.
    pub fn discard_upload(&self, local_id: u64) -> bool {
        self.slice
            .update(|state| logic::discard_upload(state, local_id))
    }

    /// Upload picked files concurrently, up to the poster limit.
    ///
    /// Each file over the limit is rejected with one warning. Completions are
    /// applied as they arrive and only to their own item; results for a closed
    /// editor session are dropped.
    pub async fn select_files(&self, files: Vec<UploadFile>) {
        let names: Vec<String> = files.iter().map(|file| file.name.clone()).collect();
        let (session, admitted) = self
            .slice
            .update(|state| (state.session, logic::admit_files(state, &names)));

        let mut uploads = FuturesUnordered::new();
        for (file, slot) in files.into_iter().zip(admitted) {
            let Some(local_id) = slot else {
                self.notifier.warning(LIMIT_WARNING);
                continue;
            };
            let catalog = self.catalog.clone();
            uploads.push(async move { (local_id, catalog.upload_poster(file).await) });
        }

        while let Some((local_id, outcome)) = uploads.next().await {
            let image_id = match outcome {
                Ok(image_id) => Some(image_id),
                Err(err) => {
                    tracing::debug!(local_id, error = %err, "poster upload failed");
                    None
                }
            };
            let uploaded = image_id.is_some();
            let applied = self
                .slice
                .update(|state| logic::complete_upload(state, session, local_id, image_id));
            if applied && uploaded {
                self.notifier.success(UPLOAD_SUCCESS);
            }
        }
    }

    /// Validate and submit the draft, then reload the list from page 1.
    ///
    /// Validation failures are recorded on the slice and nothing is sent. A
    /// completion that arrives after the editor was closed changes nothing.
    pub async fn save<L: SliceHandle<HeroListState>>(&self, list: &HeroListController<L>) -> bool {
        let prepared = self.slice.update(|state| {
            if state.saving {
                return None;
            }
            match logic::validate_draft(state) {
                Ok(body) => {
                    state.errors.clear();
                    state.saving = true;
                    Some((state.session, state.mode, body))
                }
                Err(errors) => {
                    state.errors = errors;
                    None
                }
            }
        });
        let Some((session, mode, body)) = prepared else {
            return false;
        };

        let outcome = match mode {
            FormMode::Add => self.catalog.create_hero(&body).await,
            FormMode::Update => self.catalog.update_hero(&body).await,
        };
        let current = self.slice.update(|state| {
            let current = state.session == session;
            if current {
                state.saving = false;
            }
            current
        });
        if !current {
            tracing::debug!(hero_name = %body.hero_name, "save completed after the editor closed");
            return false;
        }

        match outcome {
            Ok(()) => {
                self.notifier.success(&success_message(mode));
                self.slice.update(logic::close);
                list.reload_first_page().await;
                true
            }
            Err(err) => {
                tracing::debug!(hero_name = %body.hero_name, error = %err, "hero save failed");
                false
            }
        }
    }

    /// Close the editor, discarding the draft and uploads.
    pub fn cancel(&self) {
        self.slice.update(logic::close);
    }
}
