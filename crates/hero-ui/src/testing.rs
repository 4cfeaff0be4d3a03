//! Test doubles: scripted wire, in-memory backend and recording UI seams.

use crate::core::auth::{MemorySession, SessionStore};
use crate::core::config::{DEFAULT_API_BASE_URL, UiConfig};
use crate::core::store::LocalSlice;
use crate::core::ui::{Navigator, Notifier, ReauthPrompt, View};
use crate::features::heroes::form::HeroFormController;
use crate::features::heroes::list::HeroListController;
use crate::features::heroes::state::{HeroFormState, HeroListState};
use crate::features::login::flow::LoginFlow;
use crate::models::{
    Credentials, HeroDeleteRequest, HeroDetail, HeroImage, HeroListQuery, HeroLookup, HeroPage,
    HeroSummary, HeroUpsert, Position, StrongLevel, ToastKind,
};
use crate::services::Services;
use crate::services::http::{
    OutboundRequest, RequestBody, Transport, TransportError, TransportResponse,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

pub(crate) fn envelope_response(
    code: i64,
    message: &str,
    result: Value,
) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status: 200,
        body: json!({ "code": code, "message": message, "result": result }).to_string(),
    })
}

struct Scripted {
    yields: usize,
    response: Result<TransportResponse, TransportError>,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn push(&self, response: Result<TransportResponse, TransportError>) {
        self.push_delayed(response, 0);
    }

    /// Queue a response that yields to the executor `yields` times first.
    pub(crate) fn push_delayed(
        &self,
        response: Result<TransportResponse, TransportError>,
        yields: usize,
    ) {
        self.responses
            .borrow_mut()
            .push_back(Scripted { yields, response });
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        let next = self.responses.borrow_mut().pop_front();
        let Some(next) = next else {
            return Err(TransportError::Network("no scripted response".to_string()));
        };
        for _ in 0..next.yields {
            tokio::task::yield_now().await;
        }
        next.response
    }
}

/// Prompt that answers with a preset choice.
#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    answer: Cell<bool>,
    shown: Cell<usize>,
    yields: bool,
}

impl ScriptedPrompt {
    /// Prompt that yields once before answering, so concurrent callers can pile up.
    pub(crate) fn yielding() -> Self {
        Self {
            yields: true,
            ..Self::default()
        }
    }

    pub(crate) fn answer(&self, confirm: bool) {
        self.answer.set(confirm);
    }

    pub(crate) fn shown(&self) -> usize {
        self.shown.get()
    }
}

#[async_trait(?Send)]
impl ReauthPrompt for ScriptedPrompt {
    async fn confirm_relogin(&self) -> bool {
        self.shown.set(self.shown.get() + 1);
        if self.yields {
            tokio::task::yield_now().await;
        }
        self.answer.get()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    views: RefCell<Vec<View>>,
    reloads: Cell<usize>,
}

impl RecordingNavigator {
    pub(crate) fn views(&self) -> Vec<View> {
        self.views.borrow().clone()
    }

    pub(crate) fn logins(&self) -> usize {
        self.count(View::Login)
    }

    pub(crate) fn reloads(&self) -> usize {
        self.reloads.get()
    }

    fn count(&self, view: View) -> usize {
        self.views.borrow().iter().filter(|seen| **seen == view).count()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, view: View) {
        self.views.borrow_mut().push(view);
    }

    fn reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

#[derive(Default)]
pub(crate) struct RecordingNotifier {
    messages: RefCell<Vec<(ToastKind, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn messages(&self) -> Vec<(ToastKind, String)> {
        self.messages.borrow().clone()
    }

    pub(crate) fn texts(&self, kind: ToastKind) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(seen, _)| *seen == kind)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: ToastKind, message: String) {
        self.messages.borrow_mut().push((kind, message));
    }
}

#[derive(Default)]
struct BackendState {
    users: BTreeMap<String, String>,
    tokens: BTreeSet<String>,
    heroes: Vec<HeroUpsert>,
    images: BTreeMap<String, String>,
    next_id: u64,
}

impl BackendState {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

type Reply = (i64, &'static str, Value);

/// In-memory hero backend speaking the envelope protocol.
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: RefCell<BackendState>,
    requests: RefCell<Vec<OutboundRequest>>,
    upload_yields: Cell<usize>,
}

impl FakeBackend {
    pub(crate) fn add_user(&self, user_name: &str, password: &str) {
        self.state
            .borrow_mut()
            .users
            .insert(user_name.to_string(), password.to_string());
    }

    pub(crate) fn accept_token(&self, token: &str) {
        self.state.borrow_mut().tokens.insert(token.to_string());
    }

    pub(crate) fn set_upload_yields(&self, yields: usize) {
        self.upload_yields.set(yields);
    }

    pub(crate) fn seed_hero(
        &self,
        hero_name: &str,
        date: &str,
        strong_level: StrongLevel,
        position: Position,
        posters: &[&str],
    ) -> String {
        let mut state = self.state.borrow_mut();
        let ids: Vec<String> = posters
            .iter()
            .map(|poster| {
                let id = state.next("img");
                state.images.insert(id.clone(), (*poster).to_string());
                id
            })
            .collect();
        let hero_id = state.next("hero");
        state.heroes.push(HeroUpsert {
            hero_id: hero_id.clone(),
            hero_name: hero_name.to_string(),
            date: date.to_string(),
            strong_level,
            position,
            img_ids: ids.join(","),
        });
        hero_id
    }

    pub(crate) fn hero(&self, hero_id: &str) -> Option<HeroUpsert> {
        self.state
            .borrow()
            .heroes
            .iter()
            .find(|hero| hero.hero_id == hero_id)
            .cloned()
    }

    pub(crate) fn hero_by_name(&self, hero_name: &str) -> Option<HeroUpsert> {
        self.state
            .borrow()
            .heroes
            .iter()
            .find(|hero| hero.hero_name == hero_name)
            .cloned()
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn calls(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request_path(request) == path)
            .count()
    }

    fn route(&self, request: &OutboundRequest) -> Reply {
        let path = request_path(request);
        if path.starts_with("/hero/") && !self.authorized(request) {
            return (401, "登录已过期", Value::Null);
        }
        let mut state = self.state.borrow_mut();
        match path {
            "/users/login" => {
                let Some(credentials) = json_body::<Credentials>(request) else {
                    return bad_request();
                };
                if state.users.get(&credentials.user_name) != Some(&credentials.password) {
                    return (500, "用户不存在", Value::Null);
                }
                let token = format!("token-{}", credentials.user_name);
                state.tokens.insert(token.clone());
                (200, "", json!({ "token": token }))
            }
            "/users/register" => {
                let Some(credentials) = json_body::<Credentials>(request) else {
                    return bad_request();
                };
                if state.users.contains_key(&credentials.user_name) {
                    return (500, "用户已存在", Value::Null);
                }
                state
                    .users
                    .insert(credentials.user_name, credentials.password);
                (200, "", Value::Null)
            }
            "/hero/getHeroList" => {
                let Some(query) = json_body::<HeroListQuery>(request) else {
                    return bad_request();
                };
                (200, "", list(&state, &query))
            }
            "/hero/getHero" => {
                let Some(lookup) = json_body::<HeroLookup>(request) else {
                    return bad_request();
                };
                let Some(hero) = state.heroes.iter().find(|hero| hero.hero_id == lookup.hero_id)
                else {
                    return (500, "英雄不存在", Value::Null);
                };
                let detail = HeroDetail {
                    hero_id: hero.hero_id.clone(),
                    hero_name: hero.hero_name.clone(),
                    date: hero.date.clone(),
                    strong_level: hero.strong_level,
                    position: hero.position,
                    hero_image: hero
                        .img_ids
                        .split(',')
                        .filter_map(|id| {
                            state.images.get(id).map(|name| HeroImage {
                                img_id: id.to_string(),
                                img_name: name.clone(),
                            })
                        })
                        .collect(),
                };
                let mut value = serde_json::to_value(detail).unwrap_or(Value::Null);
                value["imgIds"] = Value::String(hero.img_ids.clone());
                (200, "", value)
            }
            "/hero/create" => {
                let Some(mut hero) = json_body::<HeroUpsert>(request) else {
                    return bad_request();
                };
                if state.heroes.iter().any(|stored| stored.hero_name == hero.hero_name) {
                    return (500, "英雄已存在", Value::Null);
                }
                hero.hero_id = state.next("hero");
                state.heroes.push(hero);
                (200, "", Value::Null)
            }
            "/hero/update" => {
                let Some(hero) = json_body::<HeroUpsert>(request) else {
                    return bad_request();
                };
                let Some(stored) = state
                    .heroes
                    .iter_mut()
                    .find(|stored| stored.hero_id == hero.hero_id)
                else {
                    return (500, "英雄不存在", Value::Null);
                };
                *stored = hero;
                (200, "", Value::Null)
            }
            "/hero/delete" => {
                let Some(body) = json_body::<HeroDeleteRequest>(request) else {
                    return bad_request();
                };
                let before = state.heroes.len();
                state.heroes.retain(|hero| hero.hero_name != body.hero_name);
                if before == state.heroes.len() {
                    return (500, "英雄不存在", Value::Null);
                }
                (200, "", Value::Null)
            }
            "/hero/upload" => {
                let RequestBody::Multipart { file, .. } = &request.body else {
                    return bad_request();
                };
                if file.name.contains("broken") {
                    return (500, "上传失败", Value::Null);
                }
                let id = state.next("img");
                state.images.insert(id.clone(), file.name.clone());
                (200, "", Value::String(id))
            }
            _ => (404, "not found", Value::Null),
        }
    }

    fn authorized(&self, request: &OutboundRequest) -> bool {
        request
            .header("authorization")
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|token| self.state.borrow().tokens.contains(token))
    }
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        if request_path(&request) == "/hero/upload" {
            for _ in 0..self.upload_yields.get() {
                tokio::task::yield_now().await;
            }
        }
        let (code, message, result) = self.route(&request);
        envelope_response(code, message, result)
    }
}

fn list(state: &BackendState, query: &HeroListQuery) -> Value {
    let matching: Vec<&HeroUpsert> = state
        .heroes
        .iter()
        .filter(|hero| {
            query
                .hero_name
                .as_ref()
                .is_none_or(|name| hero.hero_name.contains(name.as_str()))
                && query.date.as_ref().is_none_or(|date| &hero.date == date)
                && query
                    .strong_level
                    .is_none_or(|level| hero.strong_level == level)
                && query.position.is_none_or(|position| hero.position == position)
        })
        .collect();
    let skip = (query.page_num.max(1) as usize - 1) * query.page_size as usize;
    let data = matching
        .iter()
        .skip(skip)
        .take(query.page_size as usize)
        .map(|hero| HeroSummary {
            hero_id: hero.hero_id.clone(),
            hero_name: hero.hero_name.clone(),
            date: hero.date.clone(),
            strong_level: hero.strong_level,
            position: hero.position,
            img_ids: hero.img_ids.clone(),
            created_at: None,
            updated_at: None,
        })
        .collect();
    serde_json::to_value(HeroPage {
        data,
        total: matching.len() as u64,
    })
    .unwrap_or(Value::Null)
}

fn request_path(request: &OutboundRequest) -> &str {
    request
        .url
        .strip_prefix(DEFAULT_API_BASE_URL)
        .unwrap_or(&request.url)
}

fn json_body<T: DeserializeOwned>(request: &OutboundRequest) -> Option<T> {
    match &request.body {
        RequestBody::Json(text) => serde_json::from_str(text).ok(),
        _ => None,
    }
}

const fn bad_request() -> Reply {
    (400, "bad request", Value::Null)
}

/// Request layer wired over test doubles with the default configuration.
pub(crate) struct Harness {
    pub(crate) services: Services,
    pub(crate) session: Rc<MemorySession>,
    pub(crate) prompt: Rc<ScriptedPrompt>,
    pub(crate) navigator: Rc<RecordingNavigator>,
    pub(crate) notifier: Rc<RecordingNotifier>,
}

impl Harness {
    pub(crate) fn with_transport(transport: Rc<dyn Transport>, token: Option<&str>) -> Self {
        let session = Rc::new(token.map_or_else(MemorySession::default, MemorySession::with_token));
        let prompt = Rc::new(ScriptedPrompt::yielding());
        let navigator = Rc::new(RecordingNavigator::default());
        let notifier = Rc::new(RecordingNotifier::default());
        let services = Services::new(
            &UiConfig::default(),
            transport,
            session.clone(),
            prompt.clone(),
            navigator.clone(),
            notifier.clone(),
        );
        Self {
            services,
            session,
            prompt,
            navigator,
            notifier,
        }
    }

    /// Harness over a fake backend that accepts `token`.
    pub(crate) fn with_backend(backend: &Rc<FakeBackend>, token: &str) -> Self {
        backend.accept_token(token);
        Self::with_transport(backend.clone(), Some(token))
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub(crate) fn list(&self) -> HeroListController<LocalSlice<HeroListState>> {
        HeroListController::new(
            self.services.catalog.clone(),
            LocalSlice::new(HeroListState::default()),
        )
    }

    pub(crate) fn form(&self) -> HeroFormController<LocalSlice<HeroFormState>> {
        HeroFormController::new(
            self.services.catalog.clone(),
            self.services.notifier.clone(),
            LocalSlice::new(HeroFormState::default()),
        )
    }

    pub(crate) fn login_flow(&self) -> LoginFlow {
        LoginFlow::new(&self.services)
    }
}
