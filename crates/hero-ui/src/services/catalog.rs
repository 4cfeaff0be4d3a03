//! Typed facade over the hero endpoints.

use crate::models::{
    Envelope, HeroDeleteRequest, HeroDetail, HeroListQuery, HeroLookup, HeroPage, HeroUpsert,
};
use crate::services::http::{HttpClient, RequestFailure, RequestOptions, UploadFile};
use serde::de::DeserializeOwned;
use std::rc::Rc;

const LIST_PATH: &str = "/hero/getHeroList";
const DETAIL_PATH: &str = "/hero/getHero";
const CREATE_PATH: &str = "/hero/create";
const UPDATE_PATH: &str = "/hero/update";
const DELETE_PATH: &str = "/hero/delete";
const UPLOAD_PATH: &str = "/hero/upload";

/// Hero catalog operations. Every call requires a session.
#[derive(Clone)]
pub struct CatalogService {
    http: Rc<HttpClient>,
}

impl CatalogService {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    /// One page of heroes matching the filter.
    ///
    /// # Errors
    /// Returns the request layer's failure, or `Decode` for an unexpected payload.
    pub async fn list_heroes(&self, query: &HeroListQuery) -> Result<HeroPage, RequestFailure> {
        let envelope = self
            .http
            .post(LIST_PATH, query, RequestOptions::protected())
            .await?;
        decode(LIST_PATH, &envelope)
    }

    /// Full record, including its poster list.
    ///
    /// # Errors
    /// Returns the request layer's failure, or `Decode` for an unexpected payload.
    pub async fn get_hero(&self, hero_id: &str, img_ids: &str) -> Result<HeroDetail, RequestFailure> {
        let lookup = HeroLookup {
            hero_id: hero_id.to_string(),
            img_ids: img_ids.to_string(),
        };
        let envelope = self
            .http
            .post(DETAIL_PATH, &lookup, RequestOptions::protected())
            .await?;
        decode(DETAIL_PATH, &envelope)
    }

    /// Create a hero from the draft fields.
    ///
    /// # Errors
    /// Returns the request layer's failure.
    pub async fn create_hero(&self, hero: &HeroUpsert) -> Result<(), RequestFailure> {
        self.http
            .post(CREATE_PATH, hero, RequestOptions::protected())
            .await
            .map(drop)
    }

    /// Overwrite an existing hero, keyed by `heroId`.
    ///
    /// # Errors
    /// Returns the request layer's failure.
    pub async fn update_hero(&self, hero: &HeroUpsert) -> Result<(), RequestFailure> {
        self.http
            .post(UPDATE_PATH, hero, RequestOptions::protected())
            .await
            .map(drop)
    }

    /// Delete a hero. The backend keys deletion by name.
    ///
    /// # Errors
    /// Returns the request layer's failure.
    pub async fn delete_hero(&self, hero_name: &str) -> Result<(), RequestFailure> {
        let body = HeroDeleteRequest {
            hero_name: hero_name.to_string(),
        };
        self.http
            .post(DELETE_PATH, &body, RequestOptions::protected())
            .await
            .map(drop)
    }

    /// Upload a poster and return the stored image id.
    ///
    /// # Errors
    /// Returns the request layer's failure, or `Decode` when no id comes back.
    pub async fn upload_poster(&self, file: UploadFile) -> Result<String, RequestFailure> {
        let envelope = self
            .http
            .upload(UPLOAD_PATH, file, RequestOptions::protected())
            .await?;
        envelope.result_id().ok_or_else(|| {
            tracing::error!(path = UPLOAD_PATH, result = %envelope.result, "upload returned no image id");
            RequestFailure::Decode("upload result carried no image id".to_string())
        })
    }
}

fn decode<T: DeserializeOwned>(path: &str, envelope: &Envelope) -> Result<T, RequestFailure> {
    envelope.decode().map_err(|err| {
        tracing::error!(%path, error = %err, "unexpected response payload");
        RequestFailure::Decode(err.to_string())
    })
}
