//! Server-rendered user screen. Every browser session gets its own
//! controller, so drafts and edit state never leak between visitors.
//! Sessions are only stored once a visitor changes something.

pub mod handlers;
pub mod session;
pub mod templates;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::UsuariosClient;
use crate::directory::{ErrorPolicy, UserDirectoryController};
use crate::notify::NoticeLog;

use session::SharedSession;

pub type SessionController = UserDirectoryController<UsuariosClient, NoticeLog>;

#[derive(Clone)]
pub struct AppState {
    pub backend: UsuariosClient,
    pub policy: ErrorPolicy,
    pub sessions: Arc<Mutex<HashMap<String, SharedSession>>>,
}

impl AppState {
    pub fn new(backend: UsuariosClient, policy: ErrorPolicy) -> Self {
        Self {
            backend,
            policy,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn new_controller(&self) -> SessionController {
        UserDirectoryController::new(self.backend.clone(), NoticeLog::default())
            .with_policy(self.policy)
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_get))
        .route("/users", get(handlers::users_get).post(handlers::users_post))
        .route("/users/cancel", post(handlers::cancel_post))
        .route("/users/:id/edit", post(handlers::edit_post))
        .route("/users/:id/delete", get(handlers::delete_confirm_get).post(handlers::delete_post))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
