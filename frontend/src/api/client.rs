use std::{cell::RefCell, rc::Rc};

use chrono::Utc;
use reqwest::{header::AUTHORIZATION, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{
    events::{AuthChangeEvent, AuthEvents},
    types::{ApiError, Session},
};
use crate::{config::BackendConfig, utils::storage as storage_utils};

/// PostgREST media type asking for a single JSON object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Handle to the hosted backend. Cheap to clone; clones share the session
/// and the session-change listeners.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Rc<BackendConfig>,
    storage_key: Rc<str>,
    session: Rc<RefCell<Option<Session>>>,
    events: AuthEvents,
}

impl ApiClient {
    pub fn new(config: BackendConfig) -> Self {
        let storage_key: Rc<str> = config.session_storage_key().into();
        let session = storage_utils::load_json::<Session>(&storage_key);
        if session.is_some() {
            log::debug!("restored persisted session from {}", storage_key);
        }
        Self {
            client: Client::new(),
            config: Rc::new(config),
            storage_key,
            session: Rc::new(RefCell::new(session)),
            events: AuthEvents::new(),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let url: String = base_url.into();
        Self::new(BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key: "test-anon-key".to_string(),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub(crate) fn events(&self) -> &AuthEvents {
        &self.events
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        self.endpoint(&format!("/rest/v1/{}", table))
    }

    pub(crate) fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub(crate) fn store_session(&self, session: Option<Session>) {
        match &session {
            Some(value) => storage_utils::save_json(&self.storage_key, value),
            None => storage_utils::remove(&self.storage_key),
        }
        *self.session.borrow_mut() = session;
    }

    fn bearer_token(&self) -> String {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| self.config.anon_key.clone())
    }

    /// Request builder carrying the anon key and the current bearer token.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", self.config.anon_key.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token()))
    }

    pub(crate) async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::request_failed(format!("Request failed: {}", e)))?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub(crate) async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ApiError::from_response_body(status, &body)
    }

    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))
    }

    /// Fetches at most one row where `column` equals `value`. Zero rows is
    /// `Ok(None)`; any other failure is an error.
    pub async fn select_single<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<T>, ApiError> {
        let filter = format!("eq.{}", value);
        let builder = self
            .request(Method::GET, &self.rest_url(table))
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
            .query(&[("select", select), (column, filter.as_str())]);

        match Self::send(builder).await {
            Ok(response) => Self::decode(response).await.map(Some),
            Err(err) if err.is_no_rows() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Applies a session written by another tab and tells listeners about it.
    pub(crate) fn apply_external_session(&self, next: Option<Session>) {
        let previous = self.session.replace(next.clone());
        let event = match (&previous, &next) {
            (None, None) => return,
            (_, None) => AuthChangeEvent::SignedOut,
            (Some(prev), Some(curr)) if prev.user.id == curr.user.id => {
                AuthChangeEvent::TokenRefreshed
            }
            _ => AuthChangeEvent::SignedIn,
        };
        log::info!("session changed in another tab: {:?}", event);
        self.events.emit(event, next.as_ref());
    }

    #[cfg(target_arch = "wasm32")]
    pub fn watch_storage_events(&self) {
        use wasm_bindgen::{closure::Closure, JsCast};

        let window = match storage_utils::window() {
            Ok(window) => window,
            Err(err) => {
                log::warn!("cannot watch session storage: {}", err);
                return;
            }
        };
        let client = self.clone();
        let handler = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(
            move |event: web_sys::StorageEvent| {
                if event.key().as_deref() != Some(client.storage_key.as_ref()) {
                    return;
                }
                let next = event
                    .new_value()
                    .and_then(|raw| serde_json::from_str::<Session>(&raw).ok());
                client.apply_external_session(next);
            },
        );
        if window
            .add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("failed to register storage listener");
        }
        handler.forget();
    }
}

pub(crate) fn now_secs() -> i64 {
    Utc::now().timestamp()
}
