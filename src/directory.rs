//! Client-side state of the user screen: the last snapshot of the
//! collection plus the form draft, kept in step with the backend.

use crate::api::UsuariosBackend;
use crate::error::{ApiError, DirectoryError};
use crate::models::{DraftField, FormDraft, Notice, UserId, UserRecord};
use crate::notify::{Confirm, Notifier};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

/// How submit failures are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Draft is cleared after every submit that reached the network, and
    /// transport errors are only logged.
    #[default]
    Parity,
    /// Draft and edit state survive a failed save; transport errors are
    /// reported like any other failure.
    Unified,
}

impl ErrorPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "parity" | "legacy" => Some(Self::Parity),
            "unified" | "strict" => Some(Self::Unified),
            _ => None,
        }
    }
}

/// Which branch a submit took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field was empty; nothing was sent.
    Rejected,
    Saved,
    /// The backend answered with a non-success status.
    Failed,
    /// The request never got a response.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Sent,
    Unreachable,
}

pub struct UserDirectoryController<B, N> {
    backend: B,
    notifier: N,
    policy: ErrorPolicy,
    records: Vec<UserRecord>,
    draft: FormDraft,
}

impl<B, N> UserDirectoryController<B, N>
where
    B: UsuariosBackend,
    N: Notifier,
{
    pub fn new(backend: B, notifier: N) -> Self {
        Self {
            backend,
            notifier,
            policy: ErrorPolicy::default(),
            records: Vec::new(),
            draft: FormDraft::default(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.edit_target_id.is_some()
    }

    pub fn edit_target_id(&self) -> Option<UserId> {
        self.draft.edit_target_id
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Replaces the snapshot with the backend's list, propagating failures.
    pub async fn try_refresh(&mut self) -> Result<usize, DirectoryError> {
        let records = self.backend.list().await?;
        tracing::debug!(count = records.len(), "Loaded user list");
        self.records = records;
        Ok(self.records.len())
    }

    /// Like [`try_refresh`](Self::try_refresh), but a failure keeps the
    /// previous snapshot and is only logged. Returns whether it was replaced.
    pub async fn refresh(&mut self) -> bool {
        match self.try_refresh().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(%e, "Failed to fetch users");
                false
            }
        }
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    /// Same as [`update_draft_field`](Self::update_draft_field) with the
    /// field given by name, as posted by a form.
    pub fn update_draft_field_named(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DirectoryError> {
        let field = DraftField::parse(name)
            .ok_or_else(|| DirectoryError::InvalidField(name.to_string()))?;
        self.update_draft_field(field, value);
        Ok(())
    }

    /// Creates or updates depending on the edit target, then re-fetches.
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        if !self.draft.is_complete() {
            self.notifier.notify(Notice::MissingFields);
            return SubmitOutcome::Rejected;
        }

        let payload = self.draft.to_payload();
        let target = self.draft.edit_target_id;
        let result = match target {
            Some(id) => self.backend.update(id, &payload).await,
            None => self.backend.create(&payload).await,
        };

        let outcome = match result {
            Ok(()) => {
                let notice = if target.is_some() { Notice::Updated } else { Notice::Created };
                self.notifier.notify(notice);
                self.draft.edit_target_id = None;
                SubmitOutcome::Saved
            }
            Err(ApiError::Network(reason)) => {
                tracing::error!(%reason, "Failed to save user");
                if self.policy == ErrorPolicy::Unified {
                    self.notifier.notify(Notice::RequestFailed(reason));
                }
                SubmitOutcome::Unreachable
            }
            Err(e) => {
                tracing::warn!(%e, ?target, "Backend rejected user");
                let notice = match target {
                    Some(_) => Notice::UpdateFailed,
                    None => Notice::CreateFailed,
                };
                self.notifier.notify(notice);
                SubmitOutcome::Failed
            }
        };

        if outcome == SubmitOutcome::Saved || self.policy == ErrorPolicy::Parity {
            self.draft.clear_fields();
        }
        self.refresh().await;
        outcome
    }

    /// Deletes `id` once `confirm` agrees. The DELETE status is not checked.
    pub async fn request_delete<C>(&mut self, id: UserId, confirm: &mut C) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            return DeleteOutcome::Declined;
        }
        if let Err(e) = self.backend.delete(id).await {
            tracing::error!(%e, %id, "Failed to delete user");
            return DeleteOutcome::Unreachable;
        }
        self.refresh().await;
        DeleteOutcome::Sent
    }

    pub fn begin_edit(&mut self, record: &UserRecord) {
        self.draft = FormDraft::from_record(record);
    }

    /// Begins editing a record from the current snapshot.
    pub fn begin_edit_by_id(&mut self, id: UserId) -> Result<(), DirectoryError> {
        let record = self.find(id).cloned().ok_or(DirectoryError::UnknownRecord(id))?;
        self.begin_edit(&record);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.draft = FormDraft::default();
    }
}
