//! Create / edit / delete of schedule entries (administrator and teacher).
//!
//! Each mutation is: capability check, local validation, one network write,
//! and on success exactly one reload of the loader.  Failures leave the
//! loaded events untouched.  Concurrent edits by other users are not
//! reconciled; the backend keeps whichever write lands last.

use std::fmt;

use chrono::TimeZone;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::ScheduleApi;
use crate::error::ScheduleError;
use crate::form::{EventForm, FormErrors};
use crate::loader::{FetchOutcome, ScheduleLoader};
use crate::permissions::Capabilities;
use crate::protocol::ScheduleRequest;
use crate::session::Session;

pub const CREATE_FAILED: &str = "Failed to create schedule entry";
pub const UPDATE_FAILED: &str = "Failed to update schedule entry";
pub const DELETE_FAILED: &str = "Failed to delete schedule entry";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Field errors; nothing was sent.
    #[error("{0}")]
    Invalid(FormErrors),
    /// Refused locally or by the backend; text is ready for the banner.
    #[error("{0}")]
    Rejected(String),
}

impl MutationError {
    fn from_api(e: &ScheduleError, fallback: &str) -> Self {
        MutationError::Rejected(e.user_message(fallback))
    }
}

/// Result of a successful write: how the follow-up reload went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub refresh: FetchOutcome,
}

#[derive(Debug, Clone, Copy)]
pub struct MutationFlow {
    capabilities: Capabilities,
}

impl MutationFlow {
    pub fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Check permission and validate a new entry for `class_id`.
    pub fn prepare_create<Tz: TimeZone>(
        &self,
        form: &EventForm,
        class_id: &str,
        tz: &Tz,
    ) -> Result<ScheduleRequest, MutationError> {
        if !self.capabilities.can_create {
            return Err(MutationError::from_api(
                &ScheduleError::Forbidden("creating schedule entries"),
                CREATE_FAILED,
            ));
        }
        form.to_request(class_id, tz).map_err(MutationError::Invalid)
    }

    /// Check permission and validate an edit of entry `id`.
    pub fn prepare_update<Tz: TimeZone>(
        &self,
        id: &str,
        form: &EventForm,
        class_id: &str,
        tz: &Tz,
    ) -> Result<ScheduleRequest, MutationError> {
        if !self.capabilities.can_edit {
            return Err(MutationError::from_api(
                &ScheduleError::Forbidden("editing schedule entries"),
                UPDATE_FAILED,
            ));
        }
        if id.trim().is_empty() {
            return Err(MutationError::Rejected("No entry selected".into()));
        }
        form.to_request(class_id, tz).map_err(MutationError::Invalid)
    }

    pub fn check_delete(&self, id: &str) -> Result<(), MutationError> {
        if !self.capabilities.can_delete {
            return Err(MutationError::from_api(
                &ScheduleError::Forbidden("deleting schedule entries"),
                DELETE_FAILED,
            ));
        }
        if id.trim().is_empty() {
            return Err(MutationError::Rejected("No entry selected".into()));
        }
        Ok(())
    }

    /// Send one prepared write.  Does not reload; callers refresh the
    /// newest selection once this succeeds.
    pub async fn send<A: ScheduleApi>(
        &self,
        api: &A,
        session: &Session,
        write: &Write,
    ) -> Result<(), MutationError> {
        let result = match write {
            Write::Create(request) => api.create_entry(session, request).await,
            Write::Update { id, request } => api.update_entry(session, id, request).await,
            Write::Delete { id } => api.delete_entry(session, id).await,
        };
        match result {
            Ok(()) => {
                info!("{write}");
                Ok(())
            }
            Err(e) => {
                warn!("{write} failed: {e}");
                Err(MutationError::from_api(&e, write.fallback()))
            }
        }
    }

    /// Create an entry in the loader's current class, then reload it.
    pub async fn create<A: ScheduleApi, Tz: TimeZone>(
        &self,
        loader: &mut ScheduleLoader<A>,
        form: &EventForm,
        tz: &Tz,
    ) -> Result<MutationOutcome, MutationError> {
        let class_id = loader.state().class_id().unwrap_or_default().to_string();
        let write = Write::Create(self.prepare_create(form, &class_id, tz)?);
        self.apply(loader, write).await
    }

    /// Replace entry `id`, then reload.
    pub async fn update<A: ScheduleApi, Tz: TimeZone>(
        &self,
        loader: &mut ScheduleLoader<A>,
        id: &str,
        form: &EventForm,
        tz: &Tz,
    ) -> Result<MutationOutcome, MutationError> {
        let class_id = loader.state().class_id().unwrap_or_default().to_string();
        let request = self.prepare_update(id, form, &class_id, tz)?;
        let write = Write::Update {
            id: id.to_string(),
            request,
        };
        self.apply(loader, write).await
    }

    /// Delete entry `id`, then reload.
    pub async fn delete<A: ScheduleApi>(
        &self,
        loader: &mut ScheduleLoader<A>,
        id: &str,
    ) -> Result<MutationOutcome, MutationError> {
        self.check_delete(id)?;
        let write = Write::Delete { id: id.to_string() };
        self.apply(loader, write).await
    }

    async fn apply<A: ScheduleApi>(
        &self,
        loader: &mut ScheduleLoader<A>,
        write: Write,
    ) -> Result<MutationOutcome, MutationError> {
        self.send(loader.api(), loader.session(), &write).await?;
        Ok(MutationOutcome {
            refresh: loader.refresh().await,
        })
    }
}

/// A validated write, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Create(ScheduleRequest),
    Update { id: String, request: ScheduleRequest },
    Delete { id: String },
}

impl Write {
    /// Banner text when the write fails without a backend message.
    pub fn fallback(&self) -> &'static str {
        match self {
            Write::Create(_) => CREATE_FAILED,
            Write::Update { .. } => UPDATE_FAILED,
            Write::Delete { .. } => DELETE_FAILED,
        }
    }

    /// Banner text after the write succeeded.
    pub fn done_message(&self) -> &'static str {
        match self {
            Write::Create(_) => "Lesson created",
            Write::Update { .. } => "Lesson updated",
            Write::Delete { .. } => "Lesson deleted",
        }
    }
}

impl fmt::Display for Write {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Write::Create(r) => write!(
                f,
                "Create schedule entry {} {} in class {}",
                r.date, r.start_time, r.class
            ),
            Write::Update { id, .. } => write!(f, "Update of schedule entry {id}"),
            Write::Delete { id } => write!(f, "Delete of schedule entry {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::form::FormField;
    use crate::permissions::Role;

    #[test]
    fn test_student_cannot_mutate() {
        let flow = MutationFlow::new(Role::Student.capabilities());
        let form = EventForm::default();
        let err = flow.prepare_create(&form, "c5a", &Utc).unwrap_err();
        assert!(matches!(err, MutationError::Rejected(ref m) if m.contains("not permitted")));
        assert!(flow.check_delete("e1").is_err());
    }

    #[test]
    fn test_teacher_gets_field_errors() {
        let flow = MutationFlow::new(Role::Teacher.capabilities());
        let err = flow.prepare_create(&EventForm::default(), "", &Utc).unwrap_err();
        let MutationError::Invalid(fields) = err else {
            panic!("expected field errors");
        };
        assert!(fields.get(FormField::Class).is_some());
        assert!(fields.get(FormField::Teacher).is_some());
    }

    #[test]
    fn test_update_needs_an_id() {
        let flow = MutationFlow::new(Role::Administrator.capabilities());
        let err = flow
            .prepare_update("", &EventForm::default(), "c5a", &Utc)
            .unwrap_err();
        assert_eq!(err, MutationError::Rejected("No entry selected".into()));
    }
}
