use askama::Template;

use crate::models::{FormDraft, Notice, Severity, UserRecord};

/// A notice as shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub text: String,
    pub class: &'static str,
}

impl From<Notice> for FlashMessage {
    fn from(notice: Notice) -> Self {
        let class = match notice.severity() {
            Severity::Success => "flash-success",
            Severity::Error => "flash-error",
        };
        FlashMessage {
            text: notice.message(),
            class,
        }
    }
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate<'a> {
    pub api_hostname: String,
    pub flash_messages: Vec<FlashMessage>,
    pub has_flash_messages: bool,
    pub records: &'a [UserRecord],
    pub draft: &'a FormDraft,
    pub is_editing: bool,
}

#[derive(Template)]
#[template(path = "confirm.html")]
pub struct ConfirmationTemplate {
    pub api_hostname: String,
    pub flash_messages: Vec<FlashMessage>,
    pub has_flash_messages: bool,

    pub title: String,
    pub message: String,
    pub target_url: String,
    pub confirm_label: String,
    pub cancel_url: String,
}
