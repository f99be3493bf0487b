//! HTTP server.
//!
//! Each page request is one activation: a fresh [`PageInstance`] starts
//! loading, and the handler waits up to `server.ready_wait_ms` for it. A page
//! that settles in time is answered with its ready view; otherwise the answer
//! is the loading view, which refreshes itself, and the abandoned instance is
//! dropped (its late responses are discarded).
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /`, `/about`, `/services`, `/events`, `/contact` | page views |
//! | `POST /contact` | contact submission, re-renders the contact page |
//! | `GET /health` | JSON liveness probe |

use crate::api::ChurchApi;
use crate::contact::{ContactFlow, PendingSubmissions};
use crate::layout::{self, SiteContext};
use crate::loader::{
    AboutData, ContactData, EventsData, HomeData, PageInstance, PageState, ServicesData,
};
use crate::pages::{self, RenderPage};
use crate::types::{ContactForm, Page};
use axum::extract::{Form, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Seconds the loading view waits before asking for the page again.
const LOADING_REFRESH_SECS: u32 = 2;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ChurchApi>,
    pub ctx: Arc<SiteContext>,
    /// Longest a request waits for its page to become ready.
    pub ready_wait: Duration,
    /// Contact forms being delivered by some request right now.
    pub pending: PendingSubmissions,
}

impl AppState {
    pub fn new(api: Arc<dyn ChurchApi>, ctx: SiteContext, ready_wait: Duration) -> Self {
        Self {
            api,
            ctx: Arc::new(ctx),
            ready_wait,
            pending: PendingSubmissions::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    LazyLock::force(&START_TIME);
    Router::new()
        .route(Page::Home.path(), get(show::<HomeData>))
        .route(Page::About.path(), get(show::<AboutData>))
        .route(Page::Services.path(), get(show::<ServicesData>))
        .route(Page::Events.path(), get(show::<EventsData>))
        .route(
            Page::Contact.path(),
            get(show::<ContactData>).post(submit_contact),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn show<D: RenderPage + Clone>(State(state): State<AppState>) -> Html<String> {
    let mut page = PageInstance::<D>::activate(state.api.clone());
    if !page.ready_within(state.ready_wait).await {
        info!(page = %D::PAGE, "answering with loading view");
        return Html(
            layout::loading_document(&state.ctx, D::PAGE, Some(LOADING_REFRESH_SECS))
                .into_string(),
        );
    }
    Html(page.with_state(|current| pages::render(&state.ctx, current).into_string()))
}

/// Runs the submission while the contact page's own data loads. A repost of
/// a form that is still being delivered is answered without a second API call.
async fn submit_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Html<String> {
    let mut page = PageInstance::<ContactData>::activate(state.api.clone());

    let mut flow = ContactFlow::new(form);
    let rejected = flow
        .submit_once(state.api.as_ref(), &state.pending)
        .await
        .err();
    if let Some(reason) = &rejected {
        info!(%reason, "contact submission rejected");
    }

    // The outcome must be shown even if church info is slow; render the
    // fallback contact details in that case.
    let data = if page.ready_within(state.ready_wait).await {
        match page.snapshot() {
            PageState::Ready(data) => data,
            PageState::Loading => ContactData::default(),
        }
    } else {
        ContactData::default()
    };
    Html(pages::contact(&state.ctx, &data, &flow, rejected.as_ref()).into_string())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Seconds since the router was built.
    uptime: u64,
}

async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: "up",
        version: env!("CARGO_PKG_VERSION"),
        uptime: START_TIME.elapsed().as_secs(),
    };
    (
        [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")],
        Json(body),
    )
}

/// Bind `address` and serve until Ctrl-C or SIGTERM, then drain in-flight
/// requests.
pub async fn serve(state: AppState, address: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;
    info!(address = %address, "Starting HTTP server on http://{address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received, starting graceful shutdown...");
}
