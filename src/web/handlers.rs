use askama::Template;
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::directory::{DeleteOutcome, SubmitOutcome, DELETE_PROMPT};
use crate::models::{DraftField, UserId};
use crate::notify::AutoConfirm;
use crate::util::hostname_from_url;

use super::session::{find_session, session_for, view_session};
use super::templates::{ConfirmationTemplate, FlashMessage, UsersTemplate};
use super::AppState;

pub fn render_template<T: Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn root_get() -> Redirect {
    Redirect::to("/users")
}

/// Loading the page is the screen's startup event, so it re-fetches the
/// list unless the mutation that redirected here just did.
pub async fn users_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = view_session(&state, &jar);
    let mut session = session.lock().await;
    if !session.take_fresh() {
        session.controller.refresh().await;
    }
    let controller = &mut session.controller;

    let flash_messages: Vec<FlashMessage> = controller
        .notifier_mut()
        .drain()
        .into_iter()
        .map(FlashMessage::from)
        .collect();
    let has_flash_messages = !flash_messages.is_empty();
    render_template(UsersTemplate {
        api_hostname: hostname_from_url(state.backend.base_url()),
        flash_messages,
        has_flash_messages,
        records: controller.records(),
        draft: controller.draft(),
        is_editing: controller.is_editing(),
    })
}

#[derive(Deserialize)]
pub struct DraftForm {
    #[serde(rename = "nombreCompleto", default)]
    pub full_name: String,
    #[serde(rename = "correoElectronico", default)]
    pub email: String,
    #[serde(rename = "numeroTelefono", default)]
    pub phone_number: String,
}

pub async fn users_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<DraftForm>,
) -> Response {
    let (jar, session) = session_for(&state, jar);
    let mut session = session.lock().await;
    let controller = &mut session.controller;
    controller.update_draft_field(DraftField::FullName, form.full_name);
    controller.update_draft_field(DraftField::Email, form.email);
    controller.update_draft_field(DraftField::PhoneNumber, form.phone_number);
    let outcome = controller.submit_draft().await;
    tracing::info!(?outcome, "Submitted user form");
    session.snapshot_fresh = outcome != SubmitOutcome::Rejected;
    (jar, Redirect::to("/users")).into_response()
}

pub async fn edit_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let (jar, session) = session_for(&state, jar);
    let mut session = session.lock().await;
    let id = UserId(id);
    if session.controller.find(id).is_none() {
        let refreshed = session.controller.refresh().await;
        session.snapshot_fresh = refreshed;
    }
    if let Err(e) = session.controller.begin_edit_by_id(id) {
        tracing::warn!(%e, "Cannot edit user");
    }
    (jar, Redirect::to("/users")).into_response()
}

pub async fn cancel_post(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if let Some(session) = find_session(&state, &jar) {
        session.lock().await.controller.cancel_edit();
    }
    Redirect::to("/users")
}

/// The browser's stand-in for a confirm dialog.
pub async fn delete_confirm_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let session = view_session(&state, &jar);
    let mut session = session.lock().await;
    let id = UserId(id);
    if session.controller.find(id).is_none() {
        session.controller.refresh().await;
    }
    let message = match session.controller.find(id) {
        Some(record) => format!("{} ({})", DELETE_PROMPT, record.full_name),
        None => DELETE_PROMPT.to_string(),
    };
    render_template(ConfirmationTemplate {
        api_hostname: hostname_from_url(state.backend.base_url()),
        flash_messages: Vec::new(),
        has_flash_messages: false,
        title: format!("Delete user {}", id),
        message,
        target_url: format!("/users/{}/delete", id),
        confirm_label: "Delete".to_string(),
        cancel_url: "/users".to_string(),
    })
}

/// Only reachable by submitting the confirmation page.
pub async fn delete_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Response {
    let (jar, session) = session_for(&state, jar);
    let mut session = session.lock().await;
    let outcome = session
        .controller
        .request_delete(UserId(id), &mut AutoConfirm(true))
        .await;
    tracing::info!(?outcome, id, "Delete requested");
    session.snapshot_fresh = outcome == DeleteOutcome::Sent;
    (jar, Redirect::to("/users")).into_response()
}
