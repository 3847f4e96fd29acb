pub mod form_draft;
pub mod notice;
pub mod user_record;

pub use form_draft::{DraftField, FormDraft};
pub use notice::{Notice, Severity};
pub use user_record::{UserId, UserPayload, UserRecord};
