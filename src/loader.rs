//! Page data loading.
//!
//! Every page follows the same acquisition contract:
//!
//! 1. On activation the page is [`PageState::Loading`] and renders nothing but
//!    a loading indicator.
//! 2. One acquisition attempt runs: all of the page's API calls are issued
//!    concurrently and joined ("wait for all").
//! 3. Each call is wrapped so that a failure or an empty answer leaves its
//!    slot empty. Failures are logged, never retried and never shown.
//! 4. Once every call has settled the page becomes [`PageState::Ready`].
//! 5. The renderer substitutes the page's static fallback for every empty
//!    slot, wholesale ([`or_fallback`]).
//!
//! ## Teardown
//!
//! A [`PageInstance`] owns its state. The background load task only holds a
//! weak reference to it, and dropping the instance aborts the task, so a
//! response that arrives after the page is gone never touches page state.

use crate::api::{ApiError, ChurchApi, Endpoint};
use crate::types::{ChurchInfo, Event, Page, Service, StaffMember};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where a rendered slot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Fallback,
}

impl Source {
    pub fn of<T>(slot: &Option<T>) -> Self {
        if slot.is_some() {
            Source::Remote
        } else {
            Source::Fallback
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Source::Remote => "remote",
            Source::Fallback => "fallback",
        }
    }
}

/// Provenance of one slot after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotReport {
    pub endpoint: Endpoint,
    pub source: Source,
}

impl SlotReport {
    fn of<T>(endpoint: Endpoint, slot: &Option<T>) -> Self {
        Self {
            endpoint,
            source: Source::of(slot),
        }
    }
}

/// Use a loaded slot if present, the fallback otherwise.
pub fn or_fallback<'a, T>(slot: &'a Option<T>, fallback: &'a T) -> &'a T {
    slot.as_ref().unwrap_or(fallback)
}

/// Await one list request, mapping failures and empty answers to `None`.
pub async fn fetch_list<T>(
    endpoint: Endpoint,
    request: impl Future<Output = Result<Vec<T>, ApiError>>,
) -> Option<Vec<T>> {
    match request.await {
        Ok(items) if items.is_empty() => {
            debug!(slot = %endpoint, "empty answer, slot falls back");
            None
        }
        Ok(items) => Some(items),
        Err(err) => {
            warn!(slot = %endpoint, error = %err, "data acquisition failed, slot falls back");
            None
        }
    }
}

/// Like [`fetch_list`], keeping only the first record.
pub async fn fetch_first<T>(
    endpoint: Endpoint,
    request: impl Future<Output = Result<Vec<T>, ApiError>>,
) -> Option<T> {
    fetch_list(endpoint, request)
        .await
        .and_then(|items| items.into_iter().next())
}

/// The slots one page needs, and how to acquire them.
pub trait PageData: Sized + Send + 'static {
    const PAGE: Page;

    /// Run the page's single acquisition attempt.
    fn load(api: Arc<dyn ChurchApi>) -> impl Future<Output = Self> + Send + 'static;

    /// Provenance of each slot, in display order.
    fn slots(&self) -> Vec<SlotReport>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeData {
    pub church_info: Option<ChurchInfo>,
    pub services: Option<Vec<Service>>,
    pub featured_events: Option<Vec<Event>>,
}

impl PageData for HomeData {
    const PAGE: Page = Page::Home;

    fn load(api: Arc<dyn ChurchApi>) -> impl Future<Output = Self> + Send + 'static {
        async move {
            let (church_info, services, featured_events) = tokio::join!(
                fetch_first(Endpoint::ChurchInfo, api.church_info()),
                fetch_list(Endpoint::Services, api.services()),
                fetch_list(Endpoint::FeaturedEvents, api.featured_events()),
            );
            Self {
                church_info,
                services,
                featured_events,
            }
        }
    }

    fn slots(&self) -> Vec<SlotReport> {
        vec![
            SlotReport::of(Endpoint::ChurchInfo, &self.church_info),
            SlotReport::of(Endpoint::Services, &self.services),
            SlotReport::of(Endpoint::FeaturedEvents, &self.featured_events),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutData {
    pub church_info: Option<ChurchInfo>,
    pub staff: Option<Vec<StaffMember>>,
}

impl PageData for AboutData {
    const PAGE: Page = Page::About;

    fn load(api: Arc<dyn ChurchApi>) -> impl Future<Output = Self> + Send + 'static {
        async move {
            let (church_info, staff) = tokio::join!(
                fetch_first(Endpoint::ChurchInfo, api.church_info()),
                fetch_list(Endpoint::Staff, api.staff()),
            );
            Self { church_info, staff }
        }
    }

    fn slots(&self) -> Vec<SlotReport> {
        vec![
            SlotReport::of(Endpoint::ChurchInfo, &self.church_info),
            SlotReport::of(Endpoint::Staff, &self.staff),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicesData {
    pub services: Option<Vec<Service>>,
}

impl PageData for ServicesData {
    const PAGE: Page = Page::Services;

    fn load(api: Arc<dyn ChurchApi>) -> impl Future<Output = Self> + Send + 'static {
        async move {
            let services = fetch_list(Endpoint::Services, api.services()).await;
            Self { services }
        }
    }

    fn slots(&self) -> Vec<SlotReport> {
        vec![SlotReport::of(Endpoint::Services, &self.services)]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsData {
    pub events: Option<Vec<Event>>,
}

impl PageData for EventsData {
    const PAGE: Page = Page::Events;

    fn load(api: Arc<dyn ChurchApi>) -> impl Future<Output = Self> + Send + 'static {
        async move {
            let events = fetch_list(Endpoint::Events, api.events()).await;
            Self { events }
        }
    }

    fn slots(&self) -> Vec<SlotReport> {
        vec![SlotReport::of(Endpoint::Events, &self.events)]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactData {
    pub church_info: Option<ChurchInfo>,
}

impl PageData for ContactData {
    const PAGE: Page = Page::Contact;

    fn load(api: Arc<dyn ChurchApi>) -> impl Future<Output = Self> + Send + 'static {
        async move {
            let church_info = fetch_first(Endpoint::ChurchInfo, api.church_info()).await;
            Self { church_info }
        }
    }

    fn slots(&self) -> Vec<SlotReport> {
        vec![SlotReport::of(Endpoint::ChurchInfo, &self.church_info)]
    }
}

/// Lifecycle of one page activation.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<D> {
    Loading,
    Ready(D),
}

impl<D> PageState<D> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready(_))
    }
}

/// One activation of a page: its state plus the task filling it.
#[derive(Debug)]
pub struct PageInstance<D> {
    state: Arc<Mutex<PageState<D>>>,
    settled: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl<D: PageData> PageInstance<D> {
    /// Enter `loading` and start the page's acquisition attempt.
    ///
    /// Must be called inside a tokio runtime.
    pub fn activate(api: Arc<dyn ChurchApi>) -> Self {
        let state = Arc::new(Mutex::new(PageState::Loading));
        let (tx, settled) = watch::channel(false);
        let page = Arc::downgrade(&state);

        let task = tokio::spawn(async move {
            let data = D::load(api).await;
            let Some(state) = page.upgrade() else {
                debug!(page = %D::PAGE, "page torn down before data settled, discarding");
                return;
            };
            *lock(&state) = PageState::Ready(data);
            // Nobody waiting is fine.
            let _ = tx.send(true);
        });

        Self {
            state,
            settled,
            task,
        }
    }

    /// Wait until the page is ready. Returns `false` if the load task died
    /// without settling.
    pub async fn ready(&mut self) -> bool {
        self.settled.wait_for(|settled| *settled).await.is_ok()
    }

    /// Wait at most `limit` for the page to become ready.
    pub async fn ready_within(&mut self, limit: Duration) -> bool {
        match tokio::time::timeout(limit, self.ready()).await {
            Ok(settled) => settled,
            Err(_) => {
                debug!(page = %D::PAGE, ?limit, "page still loading");
                false
            }
        }
    }

    /// Run `f` against the current state.
    pub fn with_state<R>(&self, f: impl FnOnce(&PageState<D>) -> R) -> R {
        f(&lock(&self.state))
    }

    pub fn is_ready(&self) -> bool {
        self.with_state(PageState::is_ready)
    }
}

impl<D: PageData + Clone> PageInstance<D> {
    pub fn snapshot(&self) -> PageState<D> {
        self.with_state(PageState::clone)
    }
}

impl<D> Drop for PageInstance<D> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Activate a page and wait for it to settle, returning its data.
///
/// Used where there is no one to show a loading indicator to (static
/// rendering, `check`).
pub async fn load_settled<D: PageData + Clone>(api: Arc<dyn ChurchApi>) -> Option<D> {
    let mut page = PageInstance::<D>::activate(api);
    if !page.ready().await {
        return None;
    }
    match page.snapshot() {
        PageState::Ready(data) => Some(data),
        PageState::Loading => None,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryApi;
    use crate::types::ContactForm;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// An API whose reads never complete.
    #[derive(Default)]
    struct HungApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChurchApi for HungApi {
        async fn church_info(&self) -> Result<Vec<ChurchInfo>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
        async fn staff(&self) -> Result<Vec<StaffMember>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
        async fn services(&self) -> Result<Vec<Service>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
        async fn events(&self) -> Result<Vec<Event>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
        async fn featured_events(&self) -> Result<Vec<Event>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
        async fn submit_contact(&self, _form: &ContactForm) -> Result<(), ApiError> {
            std::future::pending().await
        }
    }

    fn info(mission: &str) -> ChurchInfo {
        ChurchInfo {
            mission_statement: mission.into(),
            ..ChurchInfo::default()
        }
    }

    fn api(api: MemoryApi) -> Arc<dyn ChurchApi> {
        Arc::new(api)
    }

    #[test]
    fn or_fallback_prefers_loaded_slot() {
        let fallback = vec![1, 2, 3];
        assert_eq!(or_fallback(&Some(vec![9]), &fallback), &vec![9]);
        assert_eq!(or_fallback(&None, &fallback), &fallback);
    }

    #[tokio::test]
    async fn fetch_list_maps_empty_and_errors_to_none() {
        let empty: Option<Vec<u8>> =
            fetch_list(Endpoint::Staff, async { Ok::<_, ApiError>(vec![]) }).await;
        assert_eq!(empty, None);

        let failed: Option<Vec<u8>> = fetch_list(Endpoint::Staff, async {
            Err(ApiError::Unavailable(Endpoint::Staff))
        })
        .await;
        assert_eq!(failed, None);

        let present =
            fetch_list(Endpoint::Staff, async { Ok::<_, ApiError>(vec![1, 2]) }).await;
        assert_eq!(present, Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn fetch_first_keeps_only_first_record() {
        let first = fetch_first(Endpoint::ChurchInfo, async {
            Ok::<_, ApiError>(vec![info("first"), info("second"), info("third")])
        })
        .await;
        assert_eq!(first, Some(info("first")));
    }

    #[tokio::test]
    async fn all_empty_answers_leave_every_slot_empty() {
        let data = load_settled::<HomeData>(api(MemoryApi::new())).await.unwrap();
        assert_eq!(data, HomeData::default());
        assert!(data.slots().iter().all(|s| s.source == Source::Fallback));
    }

    #[tokio::test]
    async fn failures_still_reach_ready() {
        let mut page = PageInstance::<AboutData>::activate(api(MemoryApi::unreachable()));
        assert!(page.ready().await);
        assert_eq!(page.snapshot(), PageState::Ready(AboutData::default()));
    }

    #[tokio::test]
    async fn slots_fall_back_independently() {
        let memory = MemoryApi::new()
            .with_church_info(vec![info("from api")])
            .failing(Endpoint::Staff);
        let data = load_settled::<AboutData>(api(memory)).await.unwrap();

        assert_eq!(data.church_info, Some(info("from api")));
        assert_eq!(data.staff, None);
        assert_eq!(
            data.slots(),
            vec![
                SlotReport {
                    endpoint: Endpoint::ChurchInfo,
                    source: Source::Remote
                },
                SlotReport {
                    endpoint: Endpoint::Staff,
                    source: Source::Fallback
                },
            ]
        );
    }

    #[tokio::test]
    async fn church_info_reduced_to_first_element() {
        let memory = MemoryApi::new().with_church_info(vec![info("one"), info("two")]);
        let data = load_settled::<ContactData>(api(memory)).await.unwrap();
        assert_eq!(data.church_info, Some(info("one")));
    }

    #[tokio::test]
    async fn home_issues_all_three_requests() {
        let hung = Arc::new(HungApi::default());
        let mut page = PageInstance::<HomeData>::activate(hung.clone());
        assert!(!page.ready_within(Duration::from_millis(50)).await);
        assert_eq!(hung.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn hung_request_keeps_page_loading() {
        let mut page = PageInstance::<ServicesData>::activate(Arc::new(HungApi::default()));
        assert!(!page.ready_within(Duration::from_millis(20)).await);
        assert!(!page.is_ready());
        assert_eq!(page.snapshot(), PageState::Loading);
    }

    #[tokio::test]
    async fn dropped_page_state_is_released() {
        let page = PageInstance::<EventsData>::activate(Arc::new(HungApi::default()));
        let state = Arc::downgrade(&page.state);
        drop(page);
        // The load task only ever held a weak reference.
        assert!(state.upgrade().is_none());
    }

    #[tokio::test]
    async fn dropped_page_aborts_load_task() {
        let page = PageInstance::<EventsData>::activate(Arc::new(HungApi::default()));
        let mut settled = page.settled.clone();
        drop(page);
        // The aborted task drops its sender without ever sending.
        assert!(settled.wait_for(|s| *s).await.is_err());
    }
}
