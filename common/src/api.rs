//! REST collaborator: the endpoints the schedule calendar reads and writes.
//!
//! [`ScheduleApi`] is the seam the loader and mutation flow are written
//! against; [`HttpScheduleApi`] is the real implementation on top of
//! `reqwest` (native and WASM).
//!
//! Routes:
//!   GET    /api/class/all
//!   GET    /api/subject/all
//!   GET    /api/teacher/all
//!   GET    /api/schedule/fetch-with-class/:classId
//!   POST   /api/schedule/create
//!   PATCH  /api/schedule/update/:id
//!   DELETE /api/schedule/:id

use serde::de::DeserializeOwned;
use tracing::debug;
use urlencoding::encode;

use crate::error::ScheduleError;
use crate::protocol::{
    ApiEnvelope, ApiErrorBody, ClassOption, ClassRecord, ScheduleEntry, ScheduleRequest,
    SelectOption, SubjectRecord, TeacherRecord,
};
use crate::session::Session;

/// Backend operations used by the calendar.
///
/// Every method fails with [`ScheduleError::MissingCredentials`] before
/// touching the network when `session` has no token.
#[allow(async_fn_in_trait)]
pub trait ScheduleApi {
    async fn list_classes(&self, session: &Session) -> Result<Vec<ClassOption>, ScheduleError>;

    async fn list_subjects(&self, session: &Session) -> Result<Vec<SelectOption>, ScheduleError>;

    async fn list_teachers(&self, session: &Session) -> Result<Vec<SelectOption>, ScheduleError>;

    async fn list_schedule(
        &self,
        session: &Session,
        class_id: &str,
    ) -> Result<Vec<ScheduleEntry>, ScheduleError>;

    async fn create_entry(
        &self,
        session: &Session,
        request: &ScheduleRequest,
    ) -> Result<(), ScheduleError>;

    async fn update_entry(
        &self,
        session: &Session,
        id: &str,
        request: &ScheduleRequest,
    ) -> Result<(), ScheduleError>;

    async fn delete_entry(&self, session: &Session, id: &str) -> Result<(), ScheduleError>;
}

/// `reqwest`-backed client for the school backend.
#[derive(Debug, Clone)]
pub struct HttpScheduleApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScheduleApi {
    /// Client for `base_url` (scheme + host, no trailing `/api`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ScheduleError> {
        Self::with_client(base_url, reqwest::Client::builder())
    }

    /// Native-only: client with a whole-request timeout.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, ScheduleError> {
        Self::with_client(base_url, reqwest::Client::builder().timeout(timeout))
    }

    fn with_client(
        base_url: impl Into<String>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, ScheduleError> {
        let client = builder
            .build()
            .map_err(|e| ScheduleError::Transport(format!("cannot create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
    ) -> Result<T, ScheduleError> {
        let token = session.bearer()?;
        let url = self.url(path);
        debug!("GET {url}");
        let resp = self.client.get(&url).bearer_auth(token).send().await?;
        let envelope: ApiEnvelope<T> = read_envelope(resp).await?;
        envelope
            .data
            .ok_or_else(|| ScheduleError::Decode(format!("GET {path}: response has no data")))
    }

    async fn write(&self, request: reqwest::RequestBuilder) -> Result<(), ScheduleError> {
        let resp = request.send().await?;
        let _: ApiEnvelope<serde_json::Value> = read_envelope(resp).await?;
        Ok(())
    }
}

impl ScheduleApi for HttpScheduleApi {
    async fn list_classes(&self, session: &Session) -> Result<Vec<ClassOption>, ScheduleError> {
        let rows: Vec<ClassRecord> = self.get_data(session, "/api/class/all").await?;
        Ok(rows.into_iter().map(ClassOption::from).collect())
    }

    async fn list_subjects(&self, session: &Session) -> Result<Vec<SelectOption>, ScheduleError> {
        let rows: Vec<SubjectRecord> = self.get_data(session, "/api/subject/all").await?;
        Ok(rows.into_iter().map(SelectOption::from).collect())
    }

    async fn list_teachers(&self, session: &Session) -> Result<Vec<SelectOption>, ScheduleError> {
        let rows: Vec<TeacherRecord> = self.get_data(session, "/api/teacher/all").await?;
        Ok(rows.into_iter().map(SelectOption::from).collect())
    }

    async fn list_schedule(
        &self,
        session: &Session,
        class_id: &str,
    ) -> Result<Vec<ScheduleEntry>, ScheduleError> {
        let path = format!("/api/schedule/fetch-with-class/{}", encode(class_id));
        self.get_data(session, &path).await
    }

    async fn create_entry(
        &self,
        session: &Session,
        request: &ScheduleRequest,
    ) -> Result<(), ScheduleError> {
        let token = session.bearer()?;
        let url = self.url("/api/schedule/create");
        debug!("POST {url}");
        self.write(self.client.post(&url).bearer_auth(token).json(request))
            .await
    }

    async fn update_entry(
        &self,
        session: &Session,
        id: &str,
        request: &ScheduleRequest,
    ) -> Result<(), ScheduleError> {
        let token = session.bearer()?;
        let url = self.url(&format!("/api/schedule/update/{}", encode(id)));
        debug!("PATCH {url}");
        self.write(self.client.patch(&url).bearer_auth(token).json(request))
            .await
    }

    async fn delete_entry(&self, session: &Session, id: &str) -> Result<(), ScheduleError> {
        let token = session.bearer()?;
        let url = self.url(&format!("/api/schedule/{}", encode(id)));
        debug!("DELETE {url}");
        self.write(self.client.delete(&url).bearer_auth(token)).await
    }
}

/// Map a response onto the envelope, turning non-2xx statuses and
/// `success: false` bodies into [`ScheduleError::Api`].
async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<ApiEnvelope<T>, ScheduleError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        return Err(ScheduleError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(text).map_err(|e| ScheduleError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ScheduleError::Api {
            status: status.as_u16(),
            message: envelope.message,
        });
    }
    Ok(envelope)
}
