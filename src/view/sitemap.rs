use html_escape::encode_text;

use crate::dto::page_dto::PagePath;

/// Home page first, then every enumerated path with its priority.
pub fn render(site_url: &str, paths: &[PagePath]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    xml.push_str(&url_entry(site_url, "/", "1.0"));
    for path in paths {
        xml.push_str(&url_entry(site_url, &path.path(), path.priority()));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn url_entry(site_url: &str, path: &str, priority: &str) -> String {
    let loc = if path == "/" { format!("{}/", site_url) } else { format!("{}{}", site_url, path) };
    format!(
        "  <url><loc>{}</loc><changefreq>weekly</changefreq><priority>{}</priority></url>\n",
        encode_text(&loc),
        priority
    )
}
