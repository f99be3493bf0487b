//! Content API client.
//!
//! The church's content lives in an external REST service. Pages talk to it
//! through the [`ChurchApi`] trait so the loaders and the contact flow can be
//! exercised against [`MemoryApi`] in tests, and so the site can run fully
//! offline on fallback content.
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | church info | `GET {base}/church-info/` |
//! | staff | `GET {base}/staff/` |
//! | services | `GET {base}/services/` |
//! | events | `GET {base}/events/` |
//! | featured events | `GET {base}/events/featured/` |
//! | contact | `POST {base}/contact/` (JSON) |
//!
//! List endpoints answer with a bare JSON array. The contact endpoint only has
//! to answer with a 2xx status; its body is ignored.

use crate::types::{ChurchInfo, ContactForm, Event, Service, StaffMember};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("church-site/", env!("CARGO_PKG_VERSION"));
/// Longest error body kept in [`ApiError::Status`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{endpoint} answered HTTP {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0} unavailable")]
    Unavailable(Endpoint),
}

/// One operation of the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ChurchInfo,
    Staff,
    Services,
    Events,
    FeaturedEvents,
    Contact,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::ChurchInfo => "church-info/",
            Endpoint::Staff => "staff/",
            Endpoint::Services => "services/",
            Endpoint::Events => "events/",
            Endpoint::FeaturedEvents => "events/featured/",
            Endpoint::Contact => "contact/",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::ChurchInfo => "church info",
            Endpoint::Staff => "staff",
            Endpoint::Services => "services",
            Endpoint::Events => "events",
            Endpoint::FeaturedEvents => "featured events",
            Endpoint::Contact => "contact",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read and submit operations against the church content service.
#[async_trait]
pub trait ChurchApi: Send + Sync {
    async fn church_info(&self) -> Result<Vec<ChurchInfo>, ApiError>;
    async fn staff(&self) -> Result<Vec<StaffMember>, ApiError>;
    async fn services(&self) -> Result<Vec<Service>, ApiError>;
    async fn events(&self) -> Result<Vec<Event>, ApiError>;
    /// Events the server has already filtered to `is_featured`.
    async fn featured_events(&self) -> Result<Vec<Event>, ApiError>;
    async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError>;
}

/// [`ChurchApi`] over HTTP+JSON.
#[derive(Debug, Clone)]
pub struct HttpChurchApi {
    client: Client,
    base: Url,
}

impl HttpChurchApi {
    /// Build a client for `base_url` with a per-request timeout.
    ///
    /// A missing trailing slash on the base path is added so endpoint paths
    /// resolve beneath it (`/api` + `staff/` → `/api/staff/`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        Ok(self.base.join(endpoint.path())?)
    }

    async fn get_list<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "fetching {endpoint}");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(status_error(endpoint, status.as_u16(), &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

fn status_error(endpoint: Endpoint, status: u16, body: &[u8]) -> ApiError {
    let body: String = String::from_utf8_lossy(body)
        .chars()
        .take(MAX_ERROR_BODY)
        .collect();
    ApiError::Status {
        endpoint,
        status,
        body,
    }
}

#[async_trait]
impl ChurchApi for HttpChurchApi {
    async fn church_info(&self) -> Result<Vec<ChurchInfo>, ApiError> {
        self.get_list(Endpoint::ChurchInfo).await
    }

    async fn staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get_list(Endpoint::Staff).await
    }

    async fn services(&self) -> Result<Vec<Service>, ApiError> {
        self.get_list(Endpoint::Services).await
    }

    async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_list(Endpoint::Events).await
    }

    async fn featured_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get_list(Endpoint::FeaturedEvents).await
    }

    async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        let url = self.endpoint_url(Endpoint::Contact)?;
        debug!(%url, "submitting contact form");
        let response = self.client.post(url).json(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(status_error(Endpoint::Contact, status.as_u16(), &body));
        }
        Ok(())
    }
}

/// In-process [`ChurchApi`] holding fixed content.
///
/// An empty `MemoryApi` answers every list with `[]`, so every page renders
/// its fallback content; the binary uses it for `--offline`. Endpoints marked
/// with [`MemoryApi::failing`] answer with [`ApiError::Unavailable`].
/// Accepted contact submissions are recorded and can be read back with
/// [`MemoryApi::submissions`].
#[derive(Debug, Clone, Default)]
pub struct MemoryApi {
    church_info: Vec<ChurchInfo>,
    staff: Vec<StaffMember>,
    services: Vec<Service>,
    events: Vec<Event>,
    featured_events: Vec<Event>,
    failing: Vec<Endpoint>,
    submissions: Arc<Mutex<Vec<ContactForm>>>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every endpoint as failing.
    pub fn unreachable() -> Self {
        Self {
            failing: vec![
                Endpoint::ChurchInfo,
                Endpoint::Staff,
                Endpoint::Services,
                Endpoint::Events,
                Endpoint::FeaturedEvents,
                Endpoint::Contact,
            ],
            ..Self::default()
        }
    }

    pub fn with_church_info(mut self, info: Vec<ChurchInfo>) -> Self {
        self.church_info = info;
        self
    }

    pub fn with_staff(mut self, staff: Vec<StaffMember>) -> Self {
        self.staff = staff;
        self
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    pub fn with_featured_events(mut self, events: Vec<Event>) -> Self {
        self.featured_events = events;
        self
    }

    pub fn failing(mut self, endpoint: Endpoint) -> Self {
        self.failing.push(endpoint);
        self
    }

    /// Contact forms accepted so far, oldest first.
    pub fn submissions(&self) -> Vec<ContactForm> {
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn answer<T: Clone>(&self, endpoint: Endpoint, items: &[T]) -> Result<Vec<T>, ApiError> {
        if self.failing.contains(&endpoint) {
            return Err(ApiError::Unavailable(endpoint));
        }
        Ok(items.to_vec())
    }
}

#[async_trait]
impl ChurchApi for MemoryApi {
    async fn church_info(&self) -> Result<Vec<ChurchInfo>, ApiError> {
        self.answer(Endpoint::ChurchInfo, &self.church_info)
    }

    async fn staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.answer(Endpoint::Staff, &self.staff)
    }

    async fn services(&self) -> Result<Vec<Service>, ApiError> {
        self.answer(Endpoint::Services, &self.services)
    }

    async fn events(&self) -> Result<Vec<Event>, ApiError> {
        self.answer(Endpoint::Events, &self.events)
    }

    async fn featured_events(&self) -> Result<Vec<Event>, ApiError> {
        self.answer(Endpoint::FeaturedEvents, &self.featured_events)
    }

    async fn submit_contact(&self, form: &ContactForm) -> Result<(), ApiError> {
        if self.failing.contains(&Endpoint::Contact) {
            return Err(ApiError::Unavailable(Endpoint::Contact));
        }
        self.submissions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(form.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_resolve_under_base_path() {
        let api = HttpChurchApi::new("http://localhost:8000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.endpoint_url(Endpoint::Staff).unwrap().as_str(),
            "http://localhost:8000/api/staff/"
        );
        assert_eq!(
            api.endpoint_url(Endpoint::FeaturedEvents).unwrap().as_str(),
            "http://localhost:8000/api/events/featured/"
        );
    }

    #[test]
    fn base_with_trailing_slash_is_kept() {
        let api = HttpChurchApi::new("https://example.org/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.endpoint_url(Endpoint::ChurchInfo).unwrap().as_str(),
            "https://example.org/api/church-info/"
        );
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let result = HttpChurchApi::new("/api", Duration::from_secs(1));
        assert!(matches!(result, Err(ApiError::Url(_))));
    }

    #[test]
    fn status_error_truncates_body() {
        let body = "x".repeat(MAX_ERROR_BODY * 2);
        match status_error(Endpoint::Events, 502, body.as_bytes()) {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), MAX_ERROR_BODY);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn memory_api_empty_answers_empty_lists() {
        let api = MemoryApi::new();
        assert!(api.church_info().await.unwrap().is_empty());
        assert!(api.services().await.unwrap().is_empty());
        assert!(api.featured_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_api_serves_configured_content() {
        let staff = StaffMember {
            id: 1,
            name: "Ruth".into(),
            position: "Pastor".into(),
            bio: String::new(),
            photo: None,
            email: None,
        };
        let api = MemoryApi::new().with_staff(vec![staff.clone()]);
        assert_eq!(api.staff().await.unwrap(), vec![staff]);
        assert!(api.events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_api_failing_endpoint() {
        let api = MemoryApi::new().failing(Endpoint::Staff);
        assert!(matches!(
            api.staff().await,
            Err(ApiError::Unavailable(Endpoint::Staff))
        ));
        assert!(api.church_info().await.is_ok());
    }

    #[tokio::test]
    async fn memory_api_records_submissions() {
        let api = MemoryApi::new();
        let form = ContactForm {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            subject: "Other".into(),
            message: "Hello".into(),
        };
        api.submit_contact(&form).await.unwrap();
        assert_eq!(api.submissions(), vec![form]);
    }

    #[tokio::test]
    async fn unreachable_memory_api_rejects_contact() {
        let api = MemoryApi::unreachable();
        let result = api.submit_contact(&ContactForm::default()).await;
        assert!(result.is_err());
        assert!(api.submissions().is_empty());
    }
}
