use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::dto::page_dto::PricedSize;
use crate::form::options::FormOption;

pub fn hero(title: &str, subtitle: &str, cta_href: &str, cta_label: &str) -> String {
    format!(
        r#"<section class="hero"><div class="container"><h1>{}</h1><p>{}</p><a class="button" href="{}">{}</a></div></section>"#,
        text(title),
        text(subtitle),
        attr(cta_href),
        text(cta_label)
    )
}

pub fn section(heading: &str, inner: &str) -> String {
    format!(r#"<section class="container"><h2>{}</h2>{}</section>"#, text(heading), inner)
}

pub fn paragraphs(items: &[String]) -> String {
    items.iter().map(|p| format!("<p>{}</p>", text(p))).collect()
}

pub fn card(title: &str, body: &str, href: &str) -> String {
    format!(
        r#"<article class="card"><h3><a href="{}">{}</a></h3><p>{}</p></article>"#,
        attr(href),
        text(title),
        text(body)
    )
}

pub fn link_list(links: &[(String, String)]) -> String {
    let items: String = links
        .iter()
        .map(|(href, label)| format!(r#"<li><a href="{}">{}</a></li>"#, attr(href), text(label)))
        .collect();
    format!(r#"<ul class="link-list">{}</ul>"#, items)
}

/// Accordion built on `<details>` so it works without scripts.
pub fn faq(items: &[(String, String)]) -> String {
    let entries: String = items
        .iter()
        .enumerate()
        .map(|(i, (q, a))| {
            format!(
                r#"<details id="faq-{}"><summary>{}</summary><p>{}</p></details>"#,
                i,
                text(q),
                text(a)
            )
        })
        .collect();
    format!(
        r#"<section class="faq container"><h2>Frequently Asked Questions</h2>{}<p>Still have questions? We're here to help!</p></section>"#,
        entries
    )
}

pub fn cta_banner(message: &str) -> String {
    format!(
        r#"<section class="cta"><div class="container"><h2>Ready to Get Started?</h2><p>{}</p><a class="button" href="/quote">Request Your Quote</a></div></section>"#,
        text(message)
    )
}

pub fn pricing_table(caption: &str, sizes: &[PricedSize]) -> String {
    let rows: String = sizes
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>${}</td></tr>",
                text(&p.size.name),
                text(&p.size.dimensions),
                text(&p.size.weight),
                p.local_price
            )
        })
        .collect();
    format!(
        r#"<table class="pricing"><caption>{}</caption><thead><tr><th>Size</th><th>Dimensions</th><th>Weight Allowance</th><th>Starting At</th></tr></thead><tbody>{}</tbody></table>"#,
        text(caption),
        rows
    )
}

pub fn select(name: &str, label: &str, placeholder: &str, options: &[FormOption]) -> String {
    let choices: String = options
        .iter()
        .map(|o| format!(r#"<option value="{}">{}</option>"#, attr(o.value), text(o.label)))
        .collect();
    format!(
        r#"<label for="{name}">{label}</label><select id="{name}" name="{name}" required><option value="">{placeholder}</option>{choices}</select>"#,
        name = attr(name),
        label = text(label),
        placeholder = text(placeholder),
        choices = choices
    )
}

pub fn input(name: &str, label: &str, kind: &str, required: bool) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input id="{name}" name="{name}" type="{kind}"{required}>"#,
        name = attr(name),
        label = text(label),
        kind = attr(kind),
        required = if required { " required" } else { "" }
    )
}
