//! HTTP request layer.
//!
//! # Design
//! - Attach the bearer token to every call; gate on the re-auth controller when asked.
//! - Normalize every response into an [`Envelope`] or a [`RequestFailure`] value.
//! - Keep the wire pluggable so the layer runs natively under test.

use crate::core::auth::SessionStore;
use crate::core::ui::Notifier;
use crate::services::reauth::ReauthGate;
use async_trait::async_trait;
use hero_api_models::Envelope;
use serde::Serialize;
use std::fmt::Write as _;
use std::rc::Rc;
use thiserror::Error;

pub(crate) const HEADER_AUTHORIZATION: &str = "Authorization";
pub(crate) const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";
/// Multipart field carrying uploaded files.
pub const UPLOAD_FIELD: &str = "file";
/// Message shown when a failed envelope carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "请求失败";

/// HTTP verbs used by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// File selected for upload, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name.
    pub name: String,
    /// MIME type reported by the browser, when known.
    pub mime: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Outbound request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    Empty,
    /// Serialized JSON text.
    Json(String),
    /// Multipart form with a single file field.
    Multipart {
        /// Form field name.
        field: &'static str,
        /// File to attach.
        file: UploadFile,
    },
}

/// Fully prepared request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Request verb.
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    /// Header pairs in send order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl OutboundRequest {
    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw response returned by a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

/// Failures below the envelope: the request never produced a readable body.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be assembled.
    #[error("request could not be built: {0}")]
    Build(String),
    /// The network call failed.
    #[error("network request failed: {0}")]
    Network(String),
    /// The response body could not be read.
    #[error("response body unreadable: {0}")]
    Body(String),
}

/// Wire used to send prepared requests.
#[async_trait(?Send)]
pub trait Transport {
    /// Send a request and return the raw response.
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError>;
}

/// Failure value returned by the request layer. Callers match on it; nothing
/// escapes the layer as a panic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RequestFailure {
    /// The user declined to sign in again, so the request was never sent.
    #[error("request aborted: sign-in declined")]
    Declined,
    /// The request failed below the envelope (network or unreadable body).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The backend reported an expired session.
    #[error("session expired")]
    AuthExpired,
    /// The backend reported a non-success envelope.
    #[error("request failed with code {code}: {message}")]
    Domain {
        /// Envelope code.
        code: i64,
        /// Envelope message.
        message: String,
    },
    /// The envelope succeeded but `result` had an unexpected shape.
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

/// Per-call request options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOptions {
    /// Require a session before sending.
    pub check_token: bool,
    /// Show failed envelope messages as error toasts.
    pub intercept_error: bool,
    /// Extra headers; they replace defaults of the same name.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            check_token: false,
            intercept_error: true,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    /// Options for endpoints that need a session.
    #[must_use]
    pub fn protected() -> Self {
        Self {
            check_token: true,
            ..Self::default()
        }
    }

    /// Suppress error toasts for this call.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.intercept_error = false;
        self
    }

    /// Add or replace a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Token-aware client over a [`Transport`].
pub struct HttpClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: Rc<dyn SessionStore>,
    gate: Rc<ReauthGate>,
    notifier: Rc<dyn Notifier>,
}

impl HttpClient {
    /// Build a client rooted at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        session: Rc<dyn SessionStore>,
        gate: Rc<ReauthGate>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            gate,
            notifier,
        }
    }

    /// `GET path?query`.
    ///
    /// # Errors
    /// Returns a [`RequestFailure`] for declined, transport and non-success outcomes.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        options: RequestOptions,
    ) -> Result<Envelope, RequestFailure> {
        let mut url = self.url(path);
        let query = build_query_string(query);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        self.dispatch(Method::Get, url, || Ok(RequestBody::Empty), options)
            .await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    /// Returns a [`RequestFailure`] for declined, transport and non-success outcomes.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Envelope, RequestFailure> {
        let url = self.url(path);
        self.dispatch(
            Method::Post,
            url,
            || {
                serde_json::to_string(body)
                    .map(RequestBody::Json)
                    .map_err(|err| TransportError::Build(err.to_string()))
            },
            options,
        )
        .await
    }

    /// `POST path` with the file as a multipart body.
    ///
    /// # Errors
    /// Returns a [`RequestFailure`] for declined, transport and non-success outcomes.
    pub async fn upload(
        &self,
        path: &str,
        file: UploadFile,
        options: RequestOptions,
    ) -> Result<Envelope, RequestFailure> {
        let url = self.url(path);
        self.dispatch(
            Method::Post,
            url,
            move || {
                Ok(RequestBody::Multipart {
                    field: UPLOAD_FIELD,
                    file,
                })
            },
            options,
        )
        .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn dispatch<F>(
        &self,
        method: Method,
        url: String,
        body: F,
        options: RequestOptions,
    ) -> Result<Envelope, RequestFailure>
    where
        F: FnOnce() -> Result<RequestBody, TransportError>,
    {
        if options.check_token && !self.gate.verify(false).await {
            tracing::debug!(%url, "request aborted after sign-in was declined");
            return Err(RequestFailure::Declined);
        }

        let body = body().map_err(|err| transport_failure(&url, &err))?;
        let headers = self.build_headers(&body, &options.headers);
        let request = OutboundRequest {
            method,
            url,
            headers,
            body,
        };
        let url = request.url.clone();
        tracing::debug!(?method, %url, "dispatching request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|err| transport_failure(&url, &err))?;
        let envelope: Envelope = serde_json::from_str(&response.body).map_err(|err| {
            transport_failure(
                &url,
                &TransportError::Body(format!("status {}: {err}", response.status)),
            )
        })?;

        if envelope.is_success() {
            return Ok(envelope);
        }
        Err(self.handle_failure(&url, envelope, options.intercept_error).await)
    }

    async fn handle_failure(
        &self,
        url: &str,
        envelope: Envelope,
        intercept_error: bool,
    ) -> RequestFailure {
        tracing::debug!(%url, code = envelope.code, message = %envelope.message, "request rejected");
        if envelope.is_unauthorized() {
            self.gate.verify(true).await;
        }
        if intercept_error {
            self.notifier.error(display_message(&envelope.message));
        }
        if envelope.is_unauthorized() {
            RequestFailure::AuthExpired
        } else {
            RequestFailure::Domain {
                code: envelope.code,
                message: envelope.message,
            }
        }
    }

    fn build_headers(
        &self,
        body: &RequestBody,
        overrides: &[(String, String)],
    ) -> Vec<(String, String)> {
        let token = self.session.token().unwrap_or_default();
        let mut headers = vec![(
            HEADER_AUTHORIZATION.to_string(),
            format!("Bearer {token}"),
        )];
        let multipart = matches!(body, RequestBody::Multipart { .. });
        if !multipart {
            headers.push((
                HEADER_CONTENT_TYPE.to_string(),
                JSON_CONTENT_TYPE.to_string(),
            ));
        }
        for (name, value) in overrides {
            headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
            if multipart && name.eq_ignore_ascii_case(HEADER_CONTENT_TYPE) {
                continue;
            }
            headers.push((name.clone(), value.clone()));
        }
        headers
    }
}

fn transport_failure(url: &str, err: &TransportError) -> RequestFailure {
    tracing::error!(%url, error = %err, "request failed before an envelope was read");
    RequestFailure::Transport(err.to_string())
}

fn display_message(message: &str) -> &str {
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE
    } else {
        message
    }
}

/// Percent-encode `key=value` pairs joined with `&`.
#[must_use]
pub fn build_query_string(query: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (index, (key, value)) in query.iter().enumerate() {
        if index > 0 {
            out.push('&');
        }
        let _ = write!(
            out,
            "{}={}",
            urlencoding::encode(key),
            urlencoding::encode(value)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ToastKind;
    use crate::testing::{Harness, ScriptedTransport, envelope_response};
    use serde_json::json;

    fn scripted(token: Option<&str>) -> (Harness, Rc<ScriptedTransport>) {
        let transport = Rc::new(ScriptedTransport::default());
        let harness = Harness::with_transport(transport.clone(), token);
        (harness, transport)
    }

    #[test]
    fn query_strings_are_encoded() {
        assert_eq!(build_query_string(&[]), "");
        assert_eq!(
            build_query_string(&[("heroName", "程 咬金"), ("page", "1")]),
            "heroName=%E7%A8%8B%20%E5%92%AC%E9%87%91&page=1"
        );
    }

    #[test]
    fn header_overrides_replace_defaults_case_insensitively() {
        let (harness, _) = scripted(Some("tok"));
        let client = &harness.services.http;
        let headers = client.build_headers(
            &RequestBody::Json("{}".to_string()),
            &[("content-type".to_string(), "text/plain".to_string())],
        );
        assert_eq!(
            headers,
            vec![
                ("Authorization".to_string(), "Bearer tok".to_string()),
                ("content-type".to_string(), "text/plain".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn success_envelope_is_returned_verbatim_with_bearer() {
        let (harness, transport) = scripted(Some("tok"));
        transport.push(envelope_response(200, "ok", json!({"a": 1})));
        let envelope = harness
            .services
            .http
            .post("/hero/create", &json!({"x": 1}), RequestOptions::protected())
            .await
            .expect("success");
        assert_eq!(envelope.result, json!({"a": 1}));
        assert_eq!(envelope.message, "ok");

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://localhost:8000/hero/create");
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(
            sent[0].header("content-type"),
            Some("application/json;charset=utf-8")
        );
        assert_eq!(sent[0].body, RequestBody::Json("{\"x\":1}".to_string()));
        assert_eq!(harness.prompt.shown(), 0);
    }

    #[tokio::test]
    async fn missing_token_still_sends_empty_bearer() {
        let (harness, transport) = scripted(None);
        transport.push(envelope_response(200, "", json!(null)));
        harness
            .services
            .http
            .get("/ping", &[("a", "b")], RequestOptions::default())
            .await
            .expect("success");
        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://localhost:8000/ping?a=b");
        assert_eq!(sent[0].header("Authorization"), Some("Bearer "));
        assert_eq!(sent[0].body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn declined_gate_skips_the_network() {
        let (harness, transport) = scripted(None);
        harness.prompt.answer(false);
        let outcome = harness
            .services
            .http
            .post("/hero/delete", &json!({}), RequestOptions::protected())
            .await;
        assert_eq!(outcome, Err(RequestFailure::Declined));
        assert!(transport.requests().is_empty());
        assert_eq!(harness.prompt.shown(), 1);
        assert_eq!(harness.navigator.reloads(), 1);
    }

    #[tokio::test]
    async fn domain_failure_shows_message_when_intercepting() {
        let (harness, transport) = scripted(Some("tok"));
        transport.push(envelope_response(500, "名称重复", json!(null)));
        transport.push(envelope_response(500, "", json!(null)));
        transport.push(envelope_response(500, "hidden", json!(null)));

        let http = &harness.services.http;
        let first = http.post("/a", &json!({}), RequestOptions::default()).await;
        let second = http.post("/a", &json!({}), RequestOptions::default()).await;
        let third = http
            .post("/a", &json!({}), RequestOptions::default().quiet())
            .await;

        assert_eq!(
            first,
            Err(RequestFailure::Domain {
                code: 500,
                message: "名称重复".to_string()
            })
        );
        assert!(second.is_err());
        assert!(third.is_err());
        assert_eq!(
            harness.notifier.messages(),
            vec![
                (ToastKind::Error, "名称重复".to_string()),
                (ToastKind::Error, FALLBACK_ERROR_MESSAGE.to_string()),
            ]
        );
        assert_eq!(harness.prompt.shown(), 0);
    }

    #[tokio::test]
    async fn unauthorized_forces_prompt_even_with_token() {
        let (harness, transport) = scripted(Some("stale"));
        harness.prompt.answer(true);
        transport.push(envelope_response(401, "登录已过期", json!(null)));
        let outcome = harness
            .services
            .http
            .post("/hero/getHeroList", &json!({}), RequestOptions::protected())
            .await;
        assert_eq!(outcome, Err(RequestFailure::AuthExpired));
        assert_eq!(harness.prompt.shown(), 1);
        assert_eq!(harness.navigator.logins(), 1);
        assert_eq!(
            harness.notifier.messages(),
            vec![(ToastKind::Error, "登录已过期".to_string())]
        );
    }

    #[tokio::test]
    async fn concurrent_unauthorized_calls_share_one_prompt() {
        let (harness, transport) = scripted(Some("stale"));
        harness.prompt.answer(true);
        transport.push_delayed(envelope_response(401, "登录已过期", json!(null)), 1);
        transport.push_delayed(envelope_response(401, "登录已过期", json!(null)), 1);

        let http = &harness.services.http;
        let body = json!({});
        let (first, second) = futures::join!(
            http.post("/hero/create", &body, RequestOptions::protected()),
            http.post("/hero/update", &body, RequestOptions::protected()),
        );

        assert_eq!(first, Err(RequestFailure::AuthExpired));
        assert_eq!(second, Err(RequestFailure::AuthExpired));
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(harness.prompt.shown(), 1);
        assert_eq!(harness.navigator.logins(), 1);
        assert!(harness.token().is_none());
    }

    #[tokio::test]
    async fn transport_and_parse_failures_become_values() {
        let (harness, transport) = scripted(Some("tok"));
        transport.push(Err(TransportError::Network("offline".to_string())));
        transport.push(Ok(TransportResponse {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        }));
        let http = &harness.services.http;
        let offline = http.get("/a", &[], RequestOptions::default()).await;
        let garbled = http.get("/a", &[], RequestOptions::default()).await;
        assert!(matches!(offline, Err(RequestFailure::Transport(_))));
        assert!(matches!(garbled, Err(RequestFailure::Transport(_))));
        assert!(harness.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn upload_sends_multipart_without_content_type() {
        let (harness, transport) = scripted(Some("tok"));
        transport.push(envelope_response(200, "", json!("img-1")));
        let file = UploadFile {
            name: "poster.png".to_string(),
            mime: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        };
        let envelope = harness
            .services
            .http
            .upload(
                "/hero/upload",
                file.clone(),
                RequestOptions::protected().with_header("Content-Type", "multipart/form-data"),
            )
            .await
            .expect("upload");
        assert_eq!(envelope.result_id().as_deref(), Some("img-1"));
        let sent = transport.requests();
        assert_eq!(sent[0].header("content-type"), None);
        assert_eq!(sent[0].header("authorization"), Some("Bearer tok"));
        assert_eq!(
            sent[0].body,
            RequestBody::Multipart {
                field: "file",
                file
            }
        );
    }
}
