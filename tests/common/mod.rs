#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use usuarios::api::{set_silent, UsuariosBackend, UsuariosClient};
use usuarios::error::ApiError;
use usuarios::models::{UserId, UserPayload, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(UserPayload),
    Update(UserId, UserPayload),
    Delete(UserId),
}

/// How the fake backend answers a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Status(u16),
    Unreachable,
}

#[derive(Debug, Clone)]
pub enum ListReply {
    Records(Vec<UserRecord>),
    Malformed,
    Unreachable,
}

struct Script {
    calls: Vec<Call>,
    list: ListReply,
    save: Reply,
    delete: Reply,
}

/// Scripted backend that records every call it receives.
#[derive(Clone)]
pub struct MockBackend {
    script: Arc<Mutex<Script>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                calls: Vec::new(),
                list: ListReply::Records(Vec::new()),
                save: Reply::Ok,
                delete: Reply::Ok,
            })),
        }
    }

    pub fn with_records(records: Vec<UserRecord>) -> Self {
        let backend = Self::new();
        backend.set_list(ListReply::Records(records));
        backend
    }

    pub fn set_list(&self, reply: ListReply) {
        self.script.lock().unwrap().list = reply;
    }

    pub fn set_save(&self, reply: Reply) {
        self.script.lock().unwrap().save = reply;
    }

    pub fn set_delete(&self, reply: Reply) {
        self.script.lock().unwrap().delete = reply;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.script.lock().unwrap().calls.clear();
    }

    fn answer(&self, call: Call, reply: fn(&Script) -> Reply) -> Result<(), ApiError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(call);
        match reply(&script) {
            Reply::Ok => Ok(()),
            Reply::Status(code) => Err(ApiError::Status(code)),
            Reply::Unreachable => Err(ApiError::Network("connection refused".into())),
        }
    }
}

#[async_trait]
impl UsuariosBackend for MockBackend {
    async fn list(&self) -> Result<Vec<UserRecord>, ApiError> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(Call::List);
        match &script.list {
            ListReply::Records(records) => Ok(records.clone()),
            ListReply::Malformed => Err(serde_json::from_str::<Vec<UserRecord>>("{\"error\":1}").unwrap_err().into()),
            ListReply::Unreachable => Err(ApiError::Network("connection refused".into())),
        }
    }

    async fn create(&self, payload: &UserPayload) -> Result<(), ApiError> {
        self.answer(Call::Create(payload.clone()), |s| s.save.clone())
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<(), ApiError> {
        self.answer(Call::Update(id, payload.clone()), |s| s.save.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        self.answer(Call::Delete(id), |s| s.delete.clone())
    }
}

pub fn record(id: i64, full_name: &str, email: &str, phone_number: &str) -> UserRecord {
    UserRecord {
        id: UserId(id),
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
    }
}

pub fn ana() -> UserRecord {
    record(1, "Ana Gomez", "ana@x.com", "5551234")
}

pub fn luis() -> UserRecord {
    record(2, "Luis Perez", "luis@x.com", "5559876")
}

/// In-process stand-in for the backend: stores raw JSON rows.
#[derive(Clone, Default)]
pub struct FakeServer {
    pub rows: Arc<Mutex<Vec<Value>>>,
    pub bodies: Arc<Mutex<Vec<Value>>>,
    pub next_id: Arc<Mutex<i64>>,
    pub list_hits: Arc<AtomicUsize>,
}

impl FakeServer {
    pub fn list_hits(&self) -> usize {
        self.list_hits.load(Ordering::SeqCst)
    }
}

async fn list_rows(State(s): State<FakeServer>) -> Json<Value> {
    s.list_hits.fetch_add(1, Ordering::SeqCst);
    Json(Value::Array(s.rows.lock().unwrap().clone()))
}

async fn create_row(State(s): State<FakeServer>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    s.bodies.lock().unwrap().push(body.clone());
    let mut next_id = s.next_id.lock().unwrap();
    *next_id += 1;
    let mut row = body;
    row["id"] = json!(*next_id);
    s.rows.lock().unwrap().push(row.clone());
    (StatusCode::CREATED, Json(row))
}

async fn update_row(State(s): State<FakeServer>, Path(id): Path<i64>, Json(body): Json<Value>) -> StatusCode {
    s.bodies.lock().unwrap().push(body.clone());
    let mut rows = s.rows.lock().unwrap();
    match rows.iter_mut().find(|r| r["id"] == json!(id)) {
        Some(row) => {
            let mut updated = body;
            updated["id"] = json!(id);
            *row = updated;
            StatusCode::OK
        }
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn delete_row(State(s): State<FakeServer>, Path(id): Path<i64>) -> StatusCode {
    s.rows.lock().unwrap().retain(|r| r["id"] != json!(id));
    StatusCode::NO_CONTENT
}

pub async fn spawn_backend(server: FakeServer) -> String {
    set_silent(true);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/api/usuarios", get(list_rows).post(create_row))
        .route("/api/usuarios/:id", put(update_row).delete(delete_row))
        .with_state(server);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

/// Backend whose list endpoint answers only after `delay`.
pub async fn spawn_slow_backend(delay: Duration) -> String {
    set_silent(true);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/api/usuarios",
        get(move || async move {
            tokio::time::sleep(delay).await;
            Json(json!([]))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

pub fn client_for(base_url: &str) -> UsuariosClient {
    let http = reqwest::Client::builder().no_proxy().build().expect("client");
    UsuariosClient::new(http, base_url)
}

pub fn client_with_timeout(base_url: &str, timeout: Duration) -> UsuariosClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("client");
    UsuariosClient::new(http, base_url)
}
