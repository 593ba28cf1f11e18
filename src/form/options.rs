/// A `<select>` choice shared by the wizard and the rendered quote page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
}

const fn opt(value: &'static str, label: &'static str) -> FormOption {
    FormOption { value, label, description: None }
}

const fn described(value: &'static str, label: &'static str, description: &'static str) -> FormOption {
    FormOption { value, label, description: Some(description) }
}

pub const DUMPSTER_SIZES: &[FormOption] = &[
    described("10", "10 Yard Dumpster", "Small projects, 3-4 pickup loads"),
    described("20", "20 Yard Dumpster", "Medium projects, 6-8 pickup loads"),
    described("30", "30 Yard Dumpster", "Large projects, 9-12 pickup loads"),
    described("40", "40 Yard Dumpster", "Extra large projects, 12-16 pickup loads"),
];

pub const PROJECT_TYPES: &[FormOption] = &[
    opt("Home Renovation", "Home Renovation"),
    opt("Construction", "Construction"),
    opt("Demolition", "Demolition"),
    opt("Roofing", "Roofing"),
    opt("Landscaping", "Landscaping"),
    opt("Spring Cleaning", "Spring Cleaning"),
    opt("Estate Cleanout", "Estate Cleanout"),
    opt("Other", "Other"),
];

pub const SERVICE_TYPES: &[FormOption] = &[
    opt("Residential", "Residential"),
    opt("Commercial", "Commercial"),
    opt("Industrial", "Industrial"),
    opt("Roll-off", "Roll-off"),
];

pub const RENTAL_DURATIONS: &[FormOption] = &[
    opt("3", "3 Days"),
    opt("7", "7 Days"),
    opt("14", "14 Days"),
    opt("30", "30 Days"),
    opt("custom", "Custom Duration"),
];
