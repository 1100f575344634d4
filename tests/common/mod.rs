//! In-process mock of the CMS backend used by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::task::JoinHandle;

use eali_portal::api::ApiClient;
use eali_portal::config::ApiConfig;
use eali_portal::models::SessionUser;
use eali_portal::services::Notifier;
use eali_portal::session::SessionStore;

pub const ADMIN_EMAIL: &str = "admin@eali.bi";
pub const ADMIN_PASSWORD: &str = "secret";
pub const VALID_TOKEN: &str = "tok-123";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub collection: String,
    pub part: String,
    pub file_name: String,
    pub size: usize,
}

#[derive(Default)]
pub struct MockState {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
    requests: Mutex<Vec<RecordedRequest>>,
    uploads: Mutex<Vec<RecordedUpload>>,
    messages: Mutex<Vec<Value>>,
    failing: Mutex<Vec<String>>,
    fail_writes: AtomicBool,
    blank_token: AtomicBool,
}

impl MockState {
    fn seeded() -> Self {
        let state = Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        };
        {
            let mut collections = state.collections.lock().unwrap();
            collections.insert(
                "news".to_string(),
                vec![json!({
                    "id": 1,
                    "title_en": "Graduation Day",
                    "title_fr": "Remise des diplômes",
                    "description_en": "Class of 2023",
                    "description_fr": "Promotion 2023",
                    "date": "2023-12-15",
                    "category": "Event",
                    "imageUrl": "/uploads/news/graduation.jpg"
                })],
            );
            collections.insert(
                "tenders".to_string(),
                vec![json!({
                    "id": 1,
                    "title_en": "Supply of laptops",
                    "title_fr": "Fourniture d'ordinateurs portables",
                    "description_en": "Lot 1",
                    "description_fr": "Lot 1",
                    "deadline": "2024-06-30",
                    "date_posted": "2024-05-01",
                    "fileUrl": "/uploads/tenders/dao.pdf"
                })],
            );
            collections.insert(
                "partners".to_string(),
                vec![
                    json!({
                        "id": 3,
                        "name_en": "University of Burundi",
                        "name_fr": "Université du Burundi",
                        "country_en": "Burundi",
                        "country_fr": "Burundi",
                        "type": "national"
                    }),
                    json!({
                        "id": 7,
                        "name_en": "Ghent University",
                        "name_fr": "Université de Gand",
                        "country_en": "Belgium",
                        "country_fr": "Belgique",
                        "type": "international"
                    }),
                ],
            );
            collections.insert(
                "programs".to_string(),
                vec![
                    json!({
                        "id": 1,
                        "name_en": "Law",
                        "name_fr": "Droit",
                        "type": "faculty",
                        "icon": "BookOpen",
                        "options_en": ["Public Law", "Private Law"],
                        "options_fr": ["Droit public", "Droit privé"],
                        "description_en": "Four-year degree",
                        "description_fr": "Licence en quatre ans",
                        "duration": "4 years"
                    }),
                    json!({
                        "id": 2,
                        "name_en": "Networking",
                        "name_fr": "Réseaux",
                        "type": "professional_course",
                        "icon": "Wifi",
                        "options_en": [],
                        "options_fr": []
                    }),
                ],
            );
        }
        state
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests matching `method` and `path`
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<Value> {
        self.messages.lock().unwrap().clone()
    }

    pub fn collection(&self, name: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Make GET requests for `collection` answer 500
    pub fn fail_collection(&self, collection: &str) {
        self.failing.lock().unwrap().push(collection.to_string());
    }

    /// Make every create, update and delete answer 500
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make a successful login answer with an empty token
    pub fn issue_blank_token(&self, blank: bool) {
        self.blank_token.store(blank, Ordering::SeqCst);
    }

    fn is_failing(&self, collection: &str) -> bool {
        self.failing.lock().unwrap().iter().any(|c| c == collection)
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::seeded());

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/dashboard/stats", get(stats))
            .route("/messages", post(messages))
            .route("/{collection}", get(list).post(create))
            .route("/{collection}/{id}", get(show).put(update).delete(remove))
            .layer(middleware::from_fn_with_state(state.clone(), record));
        let app = Router::new().nest("/api", api).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            asset_origin: None,
            timeout_seconds: Some(5),
        }
    }

    pub fn client(&self, session: SessionStore) -> ApiClient {
        ApiClient::new(&self.config(), session).unwrap()
    }

    /// Client whose session already holds the valid token
    pub fn admin_client(&self) -> ApiClient {
        let session = SessionStore::in_memory();
        session.login(VALID_TOKEN, admin()).unwrap();
        self.client(session)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn admin() -> SessionUser {
    SessionUser {
        id: 1,
        username: "admin".to_string(),
        email: ADMIN_EMAIL.to_string(),
    }
}

/// Notifier that answers confirmations with a fixed value and records everything
pub struct RecordingNotifier {
    answer: bool,
    prompts: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

type Shared = State<Arc<MockState>>;

async fn record(State(state): Shared, request: Request, next: Next) -> Response {
    let recorded = {
        let header_value = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RecordedRequest {
            method: request.method().clone(),
            path: format!("/api{}", request.uri().path()),
            query: request.uri().query().map(str::to_string),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
        }
    };
    state.requests.lock().unwrap().push(recorded);
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", VALID_TOKEN))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid or expired token" })),
    )
        .into_response()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Database unavailable" })),
    )
        .into_response()
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        let token = if state.blank_token.load(Ordering::SeqCst) {
            ""
        } else {
            VALID_TOKEN
        };
        Json(json!({
            "token": token,
            "user": { "id": 1, "username": "admin", "email": ADMIN_EMAIL }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body.get("confirm_password").is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "unexpected field" })),
        )
            .into_response();
    }
    if body["username"] == "taken" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "username": ["A user with that username already exists."] })),
        )
            .into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn stats(State(state): Shared, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let count = |name: &str| state.collection(name).len();
    Json(json!({
        "totalNews": count("news"),
        "activeTenders": count("tenders"),
        "partners": count("partners"),
        "programs": count("programs"),
    }))
    .into_response()
}

async fn messages(State(state): Shared, Json(body): Json<Value>) -> Response {
    state.messages.lock().unwrap().push(body);
    StatusCode::NO_CONTENT.into_response()
}

async fn list(
    State(state): Shared,
    Path(collection): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if state.is_failing(&collection) {
        return server_error();
    }
    let items = state
        .collection(&collection)
        .into_iter()
        .filter(|item| match query.get("type") {
            Some(kind) => item["type"] == kind.as_str(),
            None => true,
        })
        .collect::<Vec<_>>();
    Json(items).into_response()
}

async fn show(State(state): Shared, Path((collection, id)): Path<(String, i64)>) -> Response {
    match state
        .collection(&collection)
        .into_iter()
        .find(|item| item["id"] == id)
    {
        Some(item) => Json(item).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Read a JSON or multipart body into a flat object
async fn read_fields(
    state: &Arc<MockState>,
    collection: &str,
    request: Request,
) -> Result<Map<String, Value>, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false);

    if !is_multipart {
        let bytes = Bytes::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            _ => Err(StatusCode::BAD_REQUEST.into_response()),
        };
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;
    let mut fields = Map::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap_or_default();
                state.uploads.lock().unwrap().push(RecordedUpload {
                    collection: collection.to_string(),
                    part: name.clone(),
                    file_name: file_name.clone(),
                    size: bytes.len(),
                });
                let key = format!("{}Url", name);
                fields.insert(
                    key,
                    Value::String(format!("/uploads/{}/{}", collection, file_name)),
                );
            }
            None => {
                let text = field.text().await.unwrap_or_default();
                fields.insert(name, Value::String(text));
            }
        }
    }
    Ok(fields)
}

async fn create(
    State(state): Shared,
    Path(collection): Path<String>,
    request: Request,
) -> Response {
    if !authorized(request.headers()) {
        return unauthorized();
    }
    if state.fail_writes.load(Ordering::SeqCst) {
        return server_error();
    }

    let mut fields = match read_fields(&state, &collection, request).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    fields.insert("id".to_string(), json!(id));
    let item = Value::Object(fields);

    state
        .collections
        .lock()
        .unwrap()
        .entry(collection)
        .or_default()
        .push(item.clone());
    (StatusCode::CREATED, Json(item)).into_response()
}

async fn update(
    State(state): Shared,
    Path((collection, id)): Path<(String, i64)>,
    request: Request,
) -> Response {
    if !authorized(request.headers()) {
        return unauthorized();
    }
    if state.fail_writes.load(Ordering::SeqCst) {
        return server_error();
    }

    let fields = match read_fields(&state, &collection, request).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };

    let mut collections = state.collections.lock().unwrap();
    let Some(item) = collections
        .get_mut(&collection)
        .and_then(|items| items.iter_mut().find(|item| item["id"] == id))
    else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Value::Object(existing) = item {
        for (key, value) in fields {
            existing.insert(key, value);
        }
    }
    Json(item.clone()).into_response()
}

async fn remove(
    State(state): Shared,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, i64)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    if state.fail_writes.load(Ordering::SeqCst) {
        return server_error();
    }

    let mut collections = state.collections.lock().unwrap();
    let Some(items) = collections.get_mut(&collection) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let before = items.len();
    items.retain(|item| item["id"] != id);
    if items.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}
