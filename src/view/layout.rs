use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::config::AppConfig;

/// Brand and base URL every page is rendered with.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub name: String,
    pub url: String,
}

impl From<&AppConfig> for SiteInfo {
    fn from(config: &AppConfig) -> Self {
        SiteInfo { name: config.site_name.clone(), url: config.site_url.clone() }
    }
}

pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Site-relative path used for the canonical link
    pub path: String,
}

fn header(site: &SiteInfo) -> String {
    format!(
        r#"<header class="site-header"><nav class="container">
<a class="brand" href="/">{name}</a>
<ul class="nav-links"><li><a href="/">Home</a></li><li><a href="/service-areas">Service Areas</a></li><li><a href="/contact">Contact</a></li><li><a class="button" href="/quote">Get a Free Quote</a></li></ul>
</nav></header>"#,
        name = encode_text(&site.name)
    )
}

fn footer(site: &SiteInfo) -> String {
    format!(
        r#"<footer class="site-footer"><div class="container">
<p>{name} offers fast, affordable dumpster rentals for residential, commercial and construction projects.</p>
<p><a href="/quote">Request a quote</a> &middot; <a href="/contact">Contact us</a> &middot; <a href="/sitemap.xml">Sitemap</a></p>
<p>&copy; {name}. All rights reserved.</p>
</div></footer>"#,
        name = encode_text(&site.name)
    )
}

/// Wraps a rendered body in the document shell with header and footer.
pub fn render_page(site: &SiteInfo, meta: &PageMeta, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
</head>
<body>
{header}
<main>
{body}
</main>
{footer}
</body>
</html>
"#,
        title = encode_text(&meta.title),
        description = encode_double_quoted_attribute(&meta.description),
        canonical = encode_double_quoted_attribute(&format!("{}{}", site.url, meta.path)),
        header = header(site),
        body = body,
        footer = footer(site),
    )
}
