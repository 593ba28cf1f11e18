mod common;

use dumpster_site::app::prerender::prerender;
use dumpster_site::service::location_service::LocationServiceImpl;
use dumpster_site::view::layout::SiteInfo;

use common::*;

#[tokio::test]
async fn test_prerender_writes_every_page_and_sitemap() {
    init_tracing();
    let (locations, catalog) = seeded_repositories().await;
    let city_count = locations.cities.lock().unwrap().len();
    let service = LocationServiceImpl::new(locations, catalog);
    let site = SiteInfo { name: "DumpsterRentalPro".to_string(), url: "https://example.com".to_string() };
    let out = tempfile::tempdir().unwrap();

    let written = prerender(&service, &site, out.path()).await.unwrap();
    assert_eq!(written, 4 + 50 + city_count * 10);

    let home = std::fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(home.contains("<link rel=\"canonical\" href=\"https://example.com/\">"));
    assert!(out.path().join("quote/index.html").is_file());
    let contact = std::fs::read_to_string(out.path().join("contact/index.html")).unwrap();
    assert!(contact.contains("action=\"/api/contact\""));
    let areas = std::fs::read_to_string(out.path().join("service-areas/index.html")).unwrap();
    assert!(areas.contains("href=\"/wyoming\""));

    let city = std::fs::read_to_string(out.path().join("california/los-angeles/index.html")).unwrap();
    assert!(city.contains("Los Angeles"));
    assert!(out.path().join("california/los-angeles/30-yard-dumpster/index.html").is_file());
    assert!(out.path().join("texas/houston/commercial-dumpster-rental/index.html").is_file());

    let sitemap = std::fs::read_to_string(out.path().join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://example.com/california/los-angeles</loc>"));
}
