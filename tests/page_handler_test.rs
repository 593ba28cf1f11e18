mod common;

use axum::http::{header, StatusCode};

use common::*;

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/health")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "OK");
}

#[tokio::test]
async fn test_home_lists_states_and_sizes() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("href=\"/california\""));
    assert!(html.contains("20 Yard Dumpster"));
}

#[tokio::test]
async fn test_quote_page_renders_form() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/quote")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("id=\"quote-form\""));
    assert!(html.contains("name=\"zipCode\""));
}

#[tokio::test]
async fn test_contact_page_posts_to_contact_api() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/contact")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("id=\"contact-form\" method=\"post\" action=\"/api/contact\""));
    for field in ["name", "email", "phone", "message"] {
        assert!(html.contains(&format!("name=\"{}\"", field)), "missing field {}", field);
    }
}

#[tokio::test]
async fn test_service_areas_page_lists_states() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/service-areas")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("href=\"/california\""));
    assert!(html.contains("Wyoming (WY)"));
}

#[tokio::test]
async fn test_header_links_to_html_pages() {
    let app = setup_app().await;
    let html = body_text(send(&app.router, get_request("/")).await).await;
    assert!(html.contains("<a href=\"/service-areas\">Service Areas</a>"));
    assert!(html.contains("<a href=\"/contact\">Contact</a>"));
    assert!(!html.contains("<a href=\"/sitemap.xml\">Service Areas</a>"));
}

#[tokio::test]
async fn test_state_page() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/texas")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Texas"));
    // Most populous city first
    let houston = html.find("Houston").unwrap();
    let el_paso = html.find("El Paso").unwrap();
    assert!(houston < el_paso);
}

#[tokio::test]
async fn test_unknown_state_is_not_found() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/atlantis")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_text(resp).await.contains("Page Not Found"));
}

#[tokio::test]
async fn test_city_page() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/california/los-angeles")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Los Angeles"));
    assert!(html.contains("California"));
    // 399 x 1.15 for California
    assert!(html.contains("$459"));
    assert!(html.contains("href=\"/california/los-angeles/20-yard-dumpster\""));
    assert!(html.contains("href=\"/california/los-angeles/residential-dumpster-rental\""));
    // Nearest neighbour in the same state
    assert!(html.contains("href=\"/california/long-beach\""));
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/california/not-a-real-city")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // City exists, but in another state
    let resp = send(&app.router, get_request("/texas/los-angeles")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_city_size_page() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/california/los-angeles/20-yard-dumpster")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("20 Yard Dumpster"));
    assert!(html.contains("Los Angeles"));
    assert!(html.contains("Starting at $459"));
}

#[tokio::test]
async fn test_city_service_page() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/california/los-angeles/residential-dumpster-rental")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Residential Dumpster Rental"));
    assert!(html.contains("Los Angeles"));
}

#[tokio::test]
async fn test_unknown_leaf_is_not_found() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/california/los-angeles/hot-tub-rental")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app.router, get_request("/california/los-angeles/20-yard-dumpster/extra")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sitemap_lists_enumerated_pages() {
    let app = setup_app().await;
    let resp = send(&app.router, get_request("/sitemap.xml")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("application/xml"));

    let xml = body_text(resp).await;
    assert!(xml.contains("<loc>http://localhost:8080/</loc><changefreq>weekly</changefreq><priority>1.0</priority>"));
    assert!(xml.contains("<loc>http://localhost:8080/wyoming</loc>"));
    assert!(xml.contains("<loc>http://localhost:8080/california/los-angeles</loc><changefreq>weekly</changefreq><priority>0.7</priority>"));
    assert!(xml.contains("<loc>http://localhost:8080/california/los-angeles/40-yard-dumpster</loc>"));
    assert!(xml.contains("<loc>http://localhost:8080/california/los-angeles/special-waste-disposal</loc>"));

    // 50 states, then every city with its 5 services and 4 sizes
    let cities = app.locations.cities.lock().unwrap().len();
    assert_eq!(xml.matches("<url>").count(), 1 + 50 + cities * 10);
}
