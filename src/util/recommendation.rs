use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Residential,
    Construction,
    Landscaping,
    Renovation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebrisAmount {
    Small,
    Medium,
    Large,
    XLarge,
}

impl FromStr for ProjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "residential" => Ok(ProjectKind::Residential),
            "construction" => Ok(ProjectKind::Construction),
            "landscaping" => Ok(ProjectKind::Landscaping),
            "renovation" => Ok(ProjectKind::Renovation),
            other => Err(format!("Unknown project type: {}", other)),
        }
    }
}

impl FromStr for DebrisAmount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(DebrisAmount::Small),
            "medium" => Ok(DebrisAmount::Medium),
            "large" => Ok(DebrisAmount::Large),
            "xlarge" => Ok(DebrisAmount::XLarge),
            other => Err(format!("Unknown debris amount: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecommendation {
    pub size: u32,
    pub slug: String,
    pub reason: String,
}

/// Quiz lookup. Combinations outside the table get the 20 yard default.
pub fn recommend_size(project: ProjectKind, amount: DebrisAmount) -> SizeRecommendation {
    use DebrisAmount::*;
    use ProjectKind::*;

    let matched = match (project, amount) {
        (Residential, Small) | (Landscaping, Small) => Some(10),
        (Residential, Medium) | (Construction, Small) | (Renovation, Medium) => Some(20),
        (Residential, Large) | (Construction, Medium) => Some(30),
        (Construction, Large) => Some(40),
        _ => None,
    };

    match matched {
        Some(size) => SizeRecommendation {
            size,
            slug: format!("{}-yard-dumpster", size),
            reason: format!("A {} yard dumpster fits this project best", size),
        },
        None => SizeRecommendation {
            size: 20,
            slug: "20-yard-dumpster".to_string(),
            reason: "Our most popular size".to_string(),
        },
    }
}
