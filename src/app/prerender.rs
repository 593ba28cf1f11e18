use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::dto::page_dto::{CitySubpage, PagePath};
use crate::service::location_service::LocationService;
use crate::util::error::ServiceError;
use crate::view::{layout::SiteInfo, pages, sitemap};

#[derive(Debug, thiserror::Error)]
pub enum PrerenderError {
    #[error("Failed to render {path}: {message}")]
    Render { path: String, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn render_error(path: &str, err: ServiceError) -> PrerenderError {
    PrerenderError::Render { path: path.to_string(), message: err.to_string() }
}

/// Renders one enumerated page to HTML.
pub async fn render_path(service: &dyn LocationService, site: &SiteInfo, page: &PagePath) -> Result<String, ServiceError> {
    match page {
        PagePath::State { state } => Ok(pages::state(site, &service.state_page(state).await?)),
        PagePath::City { state, city } => Ok(pages::city(site, &service.city_page(state, city).await?)),
        PagePath::CityService { state, city, service: slug } | PagePath::CitySize { state, city, size: slug } => {
            match service.city_subpage(state, city, slug).await? {
                CitySubpage::Size(page) => Ok(pages::city_size(site, &page)),
                CitySubpage::Service(page) => Ok(pages::city_service(site, &page)),
            }
        }
    }
}

async fn write_page(out: &Path, site_path: &str, html: &str) -> Result<(), PrerenderError> {
    let dir = out.join(site_path.trim_start_matches('/'));
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| PrerenderError::Io { path: dir.clone(), source })?;
    let file = dir.join("index.html");
    tokio::fs::write(&file, html)
        .await
        .map_err(|source| PrerenderError::Io { path: file.clone(), source })?;
    debug!("Wrote {}", file.display());
    Ok(())
}

/// Writes home, the quote, contact and service-area pages, every
/// enumerated page and the sitemap
/// under `out`. Returns the number of HTML pages written.
#[instrument(skip(service, site))]
pub async fn prerender(service: &dyn LocationService, site: &SiteInfo, out: &Path) -> Result<usize, PrerenderError> {
    let home = service.home_page().await.map_err(|e| render_error("/", e))?;
    write_page(out, "/", &pages::home(site, &home)).await?;
    write_page(out, "/quote", &pages::quote_form(site)).await?;
    write_page(out, "/contact", &pages::contact_form(site)).await?;
    write_page(out, "/service-areas", &pages::service_areas(site, &home.states)).await?;

    let paths = service.static_params().await.map_err(|e| render_error("/sitemap.xml", e))?;
    for page in &paths {
        let site_path = page.path();
        let html = render_path(service, site, page).await.map_err(|e| render_error(&site_path, e))?;
        write_page(out, &site_path, &html).await?;
    }

    let sitemap_file = out.join("sitemap.xml");
    tokio::fs::write(&sitemap_file, sitemap::render(&site.url, &paths))
        .await
        .map_err(|source| PrerenderError::Io { path: sitemap_file.clone(), source })?;

    let written = paths.len() + 4;
    info!("Prerendered {} pages into {}", written, out.display());
    Ok(written)
}
