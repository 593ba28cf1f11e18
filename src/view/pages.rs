use html_escape::encode_text as text;

use crate::dto::page_dto::{CityPage, CityServicePage, CitySizePage, HomePage, PricedSize, StatePage};
use crate::form::options::{DUMPSTER_SIZES, PROJECT_TYPES, RENTAL_DURATIONS, SERVICE_TYPES};
use crate::form::wizard::WizardStep;
use crate::model::{city::City, service_type::ServiceType, state::State};
use crate::view::components::{
    card, cta_banner, faq, hero, input, link_list, paragraphs, pricing_table, section, select,
};
use crate::view::layout::{render_page, PageMeta, SiteInfo};

fn city_faq(city: &City, state: &State, site: &SiteInfo) -> Vec<(String, String)> {
    vec![
        (
            format!("How much does a dumpster rental cost in {}?", city.name),
            format!(
                "Prices in {}, {} depend on dumpster size and rental length. See the local pricing table above or request a free quote for an exact price.",
                city.name, state.name
            ),
        ),
        (
            format!("Do I need a permit for a dumpster in {}?", city.name),
            format!(
                "Dumpsters placed on private property usually need no permit. Placement on a street in {} may require one from the city; our team can help you check.",
                city.name
            ),
        ),
        (
            "How fast can you deliver?".to_string(),
            format!("{} offers same-day and next-day delivery in most of {}.", site.name, state.name),
        ),
        (
            "What can't go in the dumpster?".to_string(),
            "Hazardous materials, paint, chemicals, tires and batteries are not accepted.".to_string(),
        ),
    ]
}

fn size_links(state: &State, city: &City, sizes: &[PricedSize]) -> Vec<(String, String)> {
    sizes
        .iter()
        .map(|p| (format!("/{}/{}/{}", state.slug, city.slug, p.size.slug), format!("{} Rental", p.size.name)))
        .collect()
}

fn service_links(state: &State, city: &City, services: &[ServiceType]) -> Vec<(String, String)> {
    services
        .iter()
        .map(|s| (format!("/{}/{}/{}", state.slug, city.slug, s.slug), s.name.clone()))
        .collect()
}

pub fn home(site: &SiteInfo, page: &HomePage) -> String {
    let sizes: String = page
        .sizes
        .iter()
        .map(|s| card(&s.name, &format!("{} Starting at ${:.0}.", s.description, s.base_price), "/quote"))
        .collect();
    let services: String = page.services.iter().map(|s| card(&s.name, &s.description, "/quote")).collect();
    let states: Vec<(String, String)> = page
        .states
        .iter()
        .map(|s| (format!("/{}", s.slug), s.name.clone()))
        .collect();

    let body = [
        hero(
            "Fast, Affordable Dumpster Rentals",
            "Same-day delivery available. 10, 20, 30 and 40 yard dumpsters for every project.",
            "/quote",
            "Get a Free Quote",
        ),
        section("Dumpster Sizes", &sizes),
        section("Our Services", &services),
        section("Service Areas", &link_list(&states)),
        cta_banner("Tell us about your project and get a free, no-obligation quote today."),
    ]
    .concat();

    render_page(
        site,
        &PageMeta {
            title: format!("Dumpster Rental Near You | {}", site.name),
            description: "Affordable dumpster rentals with same-day delivery. All sizes: 10, 20, 30, 40 yard dumpsters. Free quotes.".to_string(),
            path: "/".to_string(),
        },
        &body,
    )
}

/// The quote form, one fieldset per wizard step.
pub fn quote_form(site: &SiteInfo) -> String {
    let fieldset = |step: WizardStep, fields: String| {
        format!(
            r#"<fieldset data-step="{}"><legend>{}</legend><p>{}</p>{}</fieldset>"#,
            step.number(),
            step.name(),
            step.description(),
            fields
        )
    };
    let form = format!(
        r#"<form id="quote-form" method="post" action="/api/quote">{}{}{}<button type="submit">Submit Quote Request</button></form>"#,
        fieldset(WizardStep::Location, input("zipCode", "Zip Code", "text", true)),
        fieldset(
            WizardStep::ProjectDetails,
            [
                select("dumpsterSize", "Dumpster Size", "Select a dumpster size", DUMPSTER_SIZES),
                select("projectType", "Project Type", "Select a project type", PROJECT_TYPES),
                select("serviceType", "Service Type", "Select a service type", SERVICE_TYPES),
                select("rentalDuration", "Rental Duration", "Select rental duration", RENTAL_DURATIONS),
            ]
            .concat()
        ),
        fieldset(
            WizardStep::ContactInfo,
            [
                input("name", "Full Name", "text", true),
                input("email", "Email", "email", true),
                input("phone", "Phone", "tel", true),
                input("deliveryDate", "Delivery Date", "date", true),
                input("address", "Delivery Address", "text", true),
                r#"<label for="message">Additional Details</label><textarea id="message" name="message" maxlength="1000"></textarea>"#.to_string(),
            ]
            .concat()
        ),
    );

    let body = [
        hero("Get Your Free Quote", "Tell us about your project and we will contact you within 24 hours.", "#quote-form", "Start"),
        section("Request a Dumpster", &form),
    ]
    .concat();

    render_page(
        site,
        &PageMeta {
            title: format!("Get a Free Dumpster Rental Quote | {}", site.name),
            description: "Request a free dumpster rental quote in minutes.".to_string(),
            path: "/quote".to_string(),
        },
        &body,
    )
}

/// Contact form posting to `/api/contact`, fields as `ContactRequest` expects.
pub fn contact_form(site: &SiteInfo) -> String {
    let form = format!(
        r#"<form id="contact-form" method="post" action="/api/contact">{}{}{}{}<button type="submit">Send Message</button></form>"#,
        input("name", "Full Name", "text", true),
        input("email", "Email", "email", true),
        input("phone", "Phone", "tel", true),
        r#"<label for="message">Message</label><textarea id="message" name="message" minlength="10" maxlength="1000" required></textarea>"#,
    );
    let hours = plain_list(&[
        "Monday - Friday: 7:00 AM - 7:00 PM",
        "Saturday: 8:00 AM - 5:00 PM",
        "Sunday: Closed",
    ]);

    let body = [
        hero(
            "Contact Us",
            "Questions about sizes, pricing or delivery? Send us a message and we will get back to you within 24 hours.",
            "#contact-form",
            "Send a Message",
        ),
        section("Send Us a Message", &form),
        section("Business Hours", &hours),
        cta_banner("Ready to book? Request a free quote instead."),
    ]
    .concat();

    render_page(
        site,
        &PageMeta {
            title: format!("Contact Us | {}", site.name),
            description: format!("Get in touch with {} about dumpster rentals, pricing and delivery.", site.name),
            path: "/contact".to_string(),
        },
        &body,
    )
}

fn plain_list(items: &[&str]) -> String {
    let rows: String = items.iter().map(|i| format!("<li>{}</li>", text(i))).collect();
    format!("<ul>{}</ul>", rows)
}

/// Every state we deliver in, linking to its state page.
pub fn service_areas(site: &SiteInfo, states: &[State]) -> String {
    let links: Vec<(String, String)> = states
        .iter()
        .map(|s| (format!("/{}", s.slug), format!("{} ({})", s.name, s.abbreviation)))
        .collect();

    let body = [
        hero(
            "Service Areas",
            "Dumpster rentals with same-day delivery across the United States.",
            "/quote",
            "Get a Free Quote",
        ),
        section("Choose Your State", &link_list(&links)),
    ]
    .concat();

    render_page(
        site,
        &PageMeta {
            title: format!("Dumpster Rental Service Areas | {}", site.name),
            description: "Find dumpster rental service in your state and city.".to_string(),
            path: "/service-areas".to_string(),
        },
        &body,
    )
}

pub fn state(site: &SiteInfo, page: &StatePage) -> String {
    let state = &page.state;
    let cities: Vec<(String, String)> = page
        .top_cities
        .iter()
        .map(|c| (format!("/{}/{}", state.slug, c.slug), c.name.clone()))
        .collect();

    let body = [
        hero(
            &format!("Dumpster Rental in {}", state.name),
            &format!("Fast, affordable dumpster rentals across {}. Same-day delivery available.", state.name),
            "/quote",
            "Get a Free Quote",
        ),
        section(
            &format!("Dumpster Rental Services in {}", state.name),
            &paragraphs(&[
                format!(
                    "{} provides roll-off dumpster rentals throughout {} for home cleanouts, renovations, roofing and construction projects.",
                    site.name, state.name
                ),
                format!("Choose from 10, 20, 30 and 40 yard dumpsters with transparent pricing anywhere in {}.", state.name),
            ]),
        ),
        section(&format!("Major Cities We Serve in {}", state.name), &link_list(&cities)),
        cta_banner(&format!("Get your free quote for dumpster rental in {} today.", state.name)),
    ]
    .concat();

    render_page(
        site,
        &PageMeta {
            title: format!("Dumpster Rental in {} | {}", state.name, site.name),
            description: format!(
                "Affordable dumpster rentals in {}. Same-day delivery available. All sizes: 10, 20, 30, 40 yard dumpsters. Free quotes.",
                state.name
            ),
            path: format!("/{}", state.slug),
        },
        &body,
    )
}

pub fn city(site: &SiteInfo, page: &CityPage) -> String {
    let (state, city) = (&page.state, &page.city);
    let nearby: Vec<(String, String)> = page
        .nearby
        .iter()
        .map(|n| (format!("/{}/{}", state.slug, n.city.slug), format!("{} ({:.0} mi)", n.city.name, n.distance_miles)))
        .collect();

    let mut sections = vec![
        hero(
            &format!("Dumpster Rental in {}, {}", city.name, state.name),
            &format!("Fast, affordable dumpster rentals in {}. Same-day delivery available.", city.name),
            "/quote",
            "Get a Free Quote",
        ),
        section(
            &format!("Professional Dumpster Rental Services in {}", city.name),
            &paragraphs(&[
                format!(
                    "Looking for reliable dumpster rental services in {}, {}? {} offers comprehensive waste management solutions for residential, commercial, and construction projects throughout the {} area.",
                    city.name, state.name, site.name, city.name
                ),
                format!(
                    "Whether you're tackling a home renovation, managing a construction site, or handling a commercial cleanout, we have dumpster sizes to fit your needs. Our team understands local regulations in {} and can help keep your project compliant.",
                    city.name
                ),
            ]),
        ),
        section("Dumpster Sizes", &link_list(&size_links(state, city, &page.sizes))),
        section("Services", &link_list(&service_links(state, city, &page.services))),
        section(
            &format!("Local Pricing in {}", city.name),
            &pricing_table(&format!("Dumpster rental prices in {}, {}", city.name, state.abbreviation), &page.sizes),
        ),
        faq(&city_faq(city, state, site)),
    ];
    if !nearby.is_empty() {
        sections.push(section(&format!("Nearby Cities in {}", state.name), &link_list(&nearby)));
    }
    sections.push(cta_banner(&format!(
        "Get your free quote for dumpster rental in {}, {} today.",
        city.name, state.name
    )));

    render_page(
        site,
        &PageMeta {
            title: format!("Dumpster Rental in {}, {} | {}", city.name, state.name, site.name),
            description: format!(
                "Rent a dumpster in {}, {}. Same-day delivery available. All sizes: 10, 20, 30, 40 yard dumpsters. Free quotes. Call now!",
                city.name, state.name
            ),
            path: format!("/{}/{}", state.slug, city.slug),
        },
        &sections.concat(),
    )
}

pub fn city_size(site: &SiteInfo, page: &CitySizePage) -> String {
    let (state, city, priced) = (&page.state, &page.city, &page.size);
    let size = &priced.size;
    let ideal_for: Vec<String> = size.ideal_for.iter().map(|i| format!("<li>{}</li>", text(i))).collect();
    let specs = format!(
        "<ul class=\"specs\"><li>Dimensions: {}</li><li>Capacity: {}</li><li>Weight allowance: {}</li><li>Starting at ${} in {}</li></ul><h3>Ideal For</h3><ul>{}</ul>",
        text(&size.dimensions),
        text(&size.capacity),
        text(&size.weight),
        priced.local_price,
        text(&city.name),
        ideal_for.concat()
    );

    let body = [
        hero(
            &format!("{} Rental in {}, {}", size.name, city.name, state.name),
            &size.description,
            "/quote",
            "Get a Free Quote",
        ),
        section(&format!("{} Specifications", size.name), &specs),
        section(
            &format!("Services in {}", city.name),
            &link_list(&service_links(state, city, &page.services)),
        ),
        section("Other Sizes", &link_list(&size_links(state, city, &page.other_sizes))),
        cta_banner(&format!("Book a {} in {} today.", size.name.to_lowercase(), city.name)),
    ]
    .concat();

    render_page(
        site,
        &PageMeta {
            title: format!("{} Rental in {}, {} | {}", size.name, city.name, state.name, site.name),
            description: format!(
                "Rent a {} in {}, {}. Same-day delivery available. Free quotes.",
                size.name.to_lowercase(),
                city.name,
                state.name
            ),
            path: format!("/{}/{}/{}", state.slug, city.slug, size.slug),
        },
        &body,
    )
}

pub fn city_service(site: &SiteInfo, page: &CityServicePage) -> String {
    let (state, city, service) = (&page.state, &page.city, &page.service);

    let body = [
        hero(
            &format!("{} in {}, {}", service.name, city.name, state.name),
            &service.description,
            "/quote",
            "Get a Free Quote",
        ),
        section(
            &format!("{} for {} Projects", service.name, city.name),
            &paragraphs(&[format!(
                "{} delivers {} across {} with flexible rental periods and upfront pricing.",
                site.name,
                service.name.to_lowercase(),
                city.name
            )]),
        ),
        section("Available Sizes", &link_list(&size_links(state, city, &page.sizes))),
        section(
            &format!("Local Pricing in {}", city.name),
            &pricing_table(&format!("{} prices in {}", service.name, city.name), &page.sizes),
        ),
        section("Other Services", &link_list(&service_links(state, city, &page.other_services))),
        cta_banner(&format!("Get your free {} quote in {} today.", service.name.to_lowercase(), city.name)),
    ]
    .concat();

    let title = service
        .meta_title
        .clone()
        .map(|t| format!("{} in {}, {} | {}", t, city.name, state.name, site.name))
        .unwrap_or_else(|| format!("{} in {}, {} | {}", service.name, city.name, state.name, site.name));
    let description = service
        .meta_description
        .clone()
        .unwrap_or_else(|| format!("{} services in {}, {}. Same-day delivery available. Free quotes.", service.name, city.name, state.name));

    render_page(
        site,
        &PageMeta { title, description, path: format!("/{}/{}/{}", state.slug, city.slug, service.slug) },
        &body,
    )
}

pub fn not_found(site: &SiteInfo, path: &str) -> String {
    let body = [
        hero("Page Not Found", "We couldn't find the page you were looking for.", "/", "Back to Home"),
        section("Looking for a dumpster?", &paragraphs(&["Browse our service areas or request a free quote.".to_string()])),
    ]
    .concat();
    render_page(
        site,
        &PageMeta { title: format!("Page Not Found | {}", site.name), description: String::new(), path: path.to_string() },
        &body,
    )
}

pub fn server_error(site: &SiteInfo, path: &str) -> String {
    let body = hero(
        "Something Went Wrong",
        "An unexpected error occurred. Please try again later.",
        "/",
        "Back to Home",
    );
    render_page(
        site,
        &PageMeta { title: format!("Error | {}", site.name), description: String::new(), path: path.to_string() },
        &body,
    )
}
