use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::dto::page_dto::CitySubpage;
use crate::service::location_service::{LocationService, LocationServiceImpl};
use crate::util::error::ServiceError;
use crate::view::{layout::SiteInfo, pages, sitemap};

pub struct PageState {
    pub service: Arc<LocationServiceImpl>,
    pub site: SiteInfo,
}

fn page_error(site: &SiteInfo, path: &str, err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, Html(pages::not_found(site, path))).into_response(),
        other => {
            error!("Failed to render {}: {}", path, other);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error(site, path))).into_response()
        }
    }
}

pub async fn home_handler(State(state): State<Arc<PageState>>) -> Response {
    match state.service.home_page().await {
        Ok(page) => Html(pages::home(&state.site, &page)).into_response(),
        Err(e) => page_error(&state.site, "/", e),
    }
}

pub async fn quote_page_handler(State(state): State<Arc<PageState>>) -> Html<String> {
    Html(pages::quote_form(&state.site))
}

pub async fn contact_page_handler(State(state): State<Arc<PageState>>) -> Html<String> {
    Html(pages::contact_form(&state.site))
}

pub async fn service_areas_handler(State(state): State<Arc<PageState>>) -> Response {
    match state.service.home_page().await {
        Ok(page) => Html(pages::service_areas(&state.site, &page.states)).into_response(),
        Err(e) => page_error(&state.site, "/service-areas", e),
    }
}

pub async fn state_handler(State(state): State<Arc<PageState>>, Path(state_slug): Path<String>, uri: Uri) -> Response {
    match state.service.state_page(&state_slug).await {
        Ok(page) => Html(pages::state(&state.site, &page)).into_response(),
        Err(e) => page_error(&state.site, uri.path(), e),
    }
}

pub async fn city_handler(
    State(state): State<Arc<PageState>>,
    Path((state_slug, city_slug)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    match state.service.city_page(&state_slug, &city_slug).await {
        Ok(page) => Html(pages::city(&state.site, &page)).into_response(),
        Err(e) => page_error(&state.site, uri.path(), e),
    }
}

pub async fn city_subpage_handler(
    State(state): State<Arc<PageState>>,
    Path((state_slug, city_slug, slug)): Path<(String, String, String)>,
    uri: Uri,
) -> Response {
    match state.service.city_subpage(&state_slug, &city_slug, &slug).await {
        Ok(CitySubpage::Size(page)) => Html(pages::city_size(&state.site, &page)).into_response(),
        Ok(CitySubpage::Service(page)) => Html(pages::city_service(&state.site, &page)).into_response(),
        Err(e) => page_error(&state.site, uri.path(), e),
    }
}

pub async fn sitemap_handler(State(state): State<Arc<PageState>>) -> Response {
    match state.service.static_params().await {
        Ok(paths) => (
            [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
            sitemap::render(&state.site.url, &paths),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build sitemap: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn not_found_handler(State(state): State<Arc<PageState>>, uri: Uri) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found(&state.site, uri.path()))).into_response()
}

pub async fn health_handler() -> &'static str {
    "OK"
}
