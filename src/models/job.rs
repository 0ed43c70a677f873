use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCATION: &str = "Remote";
pub const MISSING_DATE: &str = "N/A";

/// One normalized posting. Only built through [`JobListing::normalize`], so
/// `title`, `company`, and `link` are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) date_posted: String,
    pub(crate) link: String,
    pub(crate) location: String,
    pub(crate) skills: Option<String>,
}

/// Field tuple as extracted from one posting block or one snapshot row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawPosting {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(skip)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Option<String>,
}

impl JobListing {
    /// Apply field defaults and the required-field check.
    /// Returns `None` when `title`, `company`, or `link` is empty.
    pub fn normalize(raw: RawPosting) -> Option<JobListing> {
        let title = raw.title.trim();
        let company = raw.company.trim();
        let link = raw.link.trim();
        if title.is_empty() || company.is_empty() || link.is_empty() {
            return None;
        }

        let location = raw
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let date_posted = raw
            .date_posted
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| MISSING_DATE.to_string());

        // Tags from live markup win; snapshot rows carry skills as text already.
        let skills = if raw.tags.is_empty() {
            raw.skills.filter(|s| !s.trim().is_empty())
        } else {
            Some(raw.tags.join(", "))
        };

        Some(JobListing {
            title: title.to_string(),
            company: company.to_string(),
            date_posted,
            link: link.to_string(),
            location,
            skills,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    /// Raw timestamp, or "N/A" when the posting had none.
    pub fn date_posted(&self) -> &str {
        &self.date_posted
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn skills(&self) -> Option<&str> {
        self.skills.as_deref()
    }

    pub fn has_date(&self) -> bool {
        self.date_posted != MISSING_DATE
    }
}
