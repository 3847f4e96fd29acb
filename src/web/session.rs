use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::RngCore;

use super::{AppState, SessionController};

pub const SESSION_COOKIE: &str = "session_id";

/// One browser's controller plus whether its snapshot was just re-fetched
/// by a mutation, so the page load after the redirect can reuse it.
pub struct Session {
    pub controller: SessionController,
    pub snapshot_fresh: bool,
}

impl Session {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            snapshot_fresh: false,
        }
    }

    /// Reports and clears the freshness flag.
    pub fn take_fresh(&mut self) -> bool {
        std::mem::take(&mut self.snapshot_fresh)
    }
}

pub type SharedSession = Arc<tokio::sync::Mutex<Session>>;

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex::encode(b)
}

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

fn new_session(state: &AppState) -> SharedSession {
    Arc::new(tokio::sync::Mutex::new(Session::new(state.new_controller())))
}

/// The session named by the cookie, if the server knows it.
pub fn find_session(state: &AppState, jar: &CookieJar) -> Option<SharedSession> {
    let sid = session_id_from_jar(jar)?;
    let sessions = state.sessions.lock().unwrap_or_else(|e| e.into_inner());
    sessions.get(&sid).cloned()
}

/// Session for read-only pages. Unknown visitors get a throwaway session
/// that is never stored and sets no cookie.
pub fn view_session(state: &AppState, jar: &CookieJar) -> SharedSession {
    find_session(state, jar).unwrap_or_else(|| new_session(state))
}

/// Session for routes that change state, creating and storing one (and
/// its cookie) when the browser has none or presents an unknown id.
pub fn session_for(state: &AppState, jar: CookieJar) -> (CookieJar, SharedSession) {
    if let Some(existing) = find_session(state, &jar) {
        return (jar, existing);
    }
    let sid = random_session_id();
    let session = new_session(state);
    state
        .sessions
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .insert(sid.clone(), session.clone());
    tracing::debug!(session = %sid, "Started directory session");

    let mut cookie = Cookie::new(SESSION_COOKIE, sid);
    cookie.set_path("/");
    cookie.set_http_only(true);
    (jar.add(cookie), session)
}
