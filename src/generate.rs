//! Static site rendering.
//!
//! Activates every page once against the content API, waits for each to
//! settle, and writes the ready views to disk. The result is the same HTML
//! the server would answer with at that moment, so it can be hosted by any
//! static file server; the contact form still posts to the running site
//! (`server.public_url`).
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html              # Home
//! ├── about/index.html
//! ├── services/index.html
//! ├── events/index.html
//! └── contact/index.html
//! ```
//!
//! [`check`] runs the same acquisition without writing anything, which is a
//! quick way to see which slots the API currently fills.

use crate::api::ChurchApi;
use crate::layout::SiteContext;
use crate::loader::{
    AboutData, ContactData, EventsData, HomeData, PageData, ServicesData, SlotReport,
    load_settled,
};
use crate::pages::RenderPage;
use crate::types::Page;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} page never settled")]
    Unsettled(Page),
}

/// Outcome for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub page: Page,
    /// Written file, relative to the output directory. `None` for [`check`].
    pub file: Option<PathBuf>,
    pub slots: Vec<SlotReport>,
}

/// Every page's data, acquired concurrently.
struct SiteData {
    home: HomeData,
    about: AboutData,
    services: ServicesData,
    events: EventsData,
    contact: ContactData,
}

async fn settle<D: PageData + Clone>(api: Arc<dyn ChurchApi>) -> Result<D, GenerateError> {
    load_settled::<D>(api)
        .await
        .ok_or(GenerateError::Unsettled(D::PAGE))
}

async fn load_all(api: Arc<dyn ChurchApi>) -> Result<SiteData, GenerateError> {
    let (home, about, services, events, contact) = tokio::join!(
        settle::<HomeData>(api.clone()),
        settle::<AboutData>(api.clone()),
        settle::<ServicesData>(api.clone()),
        settle::<EventsData>(api.clone()),
        settle::<ContactData>(api),
    );
    Ok(SiteData {
        home: home?,
        about: about?,
        services: services?,
        events: events?,
        contact: contact?,
    })
}

fn report<D: PageData>(data: &D, file: Option<PathBuf>) -> PageReport {
    PageReport {
        page: D::PAGE,
        file,
        slots: data.slots(),
    }
}

fn write_page<D: RenderPage>(
    ctx: &SiteContext,
    data: &D,
    output_dir: &Path,
) -> Result<PageReport, GenerateError> {
    let relative = PathBuf::from(D::PAGE.output_file());
    let path = output_dir.join(&relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, data.render(ctx).into_string())?;
    debug!(page = %D::PAGE, path = %path.display(), "wrote page");
    Ok(report(data, Some(relative)))
}

/// Render every page into `output_dir`. Reports come back in navigation order.
pub async fn generate(
    api: Arc<dyn ChurchApi>,
    ctx: &SiteContext,
    output_dir: &Path,
) -> Result<Vec<PageReport>, GenerateError> {
    let site = load_all(api).await?;
    fs::create_dir_all(output_dir)?;

    Ok(vec![
        write_page(ctx, &site.home, output_dir)?,
        write_page(ctx, &site.about, output_dir)?,
        write_page(ctx, &site.services, output_dir)?,
        write_page(ctx, &site.events, output_dir)?,
        write_page(ctx, &site.contact, output_dir)?,
    ])
}

/// Acquire every page's data and report slot provenance without rendering.
pub async fn check(api: Arc<dyn ChurchApi>) -> Result<Vec<PageReport>, GenerateError> {
    let site = load_all(api).await?;
    Ok(vec![
        report(&site.home, None),
        report(&site.about, None),
        report(&site.services, None),
        report(&site.events, None),
        report(&site.contact, None),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, MemoryApi};
    use crate::loader::Source;
    use crate::types::ChurchInfo;
    use tempfile::TempDir;

    fn memory(api: MemoryApi) -> Arc<dyn ChurchApi> {
        Arc::new(api)
    }

    #[tokio::test]
    async fn writes_every_page() {
        let tmp = TempDir::new().unwrap();
        let reports = generate(memory(MemoryApi::new()), &SiteContext::default(), tmp.path())
            .await
            .unwrap();

        let pages: Vec<Page> = reports.iter().map(|r| r.page).collect();
        assert_eq!(pages, Page::ALL.to_vec());
        for page in Page::ALL {
            let html = fs::read_to_string(tmp.path().join(page.output_file())).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{page}");
            assert!(!html.contains("Loading..."), "{page}");
        }
    }

    #[tokio::test]
    async fn offline_render_uses_fallback_content() {
        let tmp = TempDir::new().unwrap();
        generate(memory(MemoryApi::unreachable()), &SiteContext::default(), tmp.path())
            .await
            .unwrap();

        let services = fs::read_to_string(tmp.path().join("services/index.html")).unwrap();
        assert!(services.contains("Sunday Worship Service"));
        let events = fs::read_to_string(tmp.path().join("events/index.html")).unwrap();
        assert!(events.contains("Women's Bible Study Retreat"));
    }

    #[tokio::test]
    async fn check_reports_provenance_without_files() {
        let api = MemoryApi::new()
            .with_church_info(vec![ChurchInfo::default()])
            .failing(Endpoint::Events);
        let reports = check(memory(api)).await.unwrap();

        assert!(reports.iter().all(|r| r.file.is_none()));
        let home = &reports[0];
        assert_eq!(home.slots[0].endpoint, Endpoint::ChurchInfo);
        assert_eq!(home.slots[0].source, Source::Remote);
        let events = reports.iter().find(|r| r.page == Page::Events).unwrap();
        assert_eq!(events.slots[0].source, Source::Fallback);
    }
}
