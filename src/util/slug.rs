/// Lowercases, drops anything that is not alphanumeric and joins the
/// remaining words with single dashes: "St. Louis" -> "st-louis".
/// Letters outside ASCII are kept: "Cañon City" -> "cañon-city".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch != '\'' && ch != '.' {
            pending_dash = true;
        }
    }
    slug
}

/// "new-york" -> "New York". Used when a page needs a label for a slug
/// that has no record behind it.
pub fn title_case(slug: &str) -> String {
    slug.split(|c| c == '-' || c == ' ')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
