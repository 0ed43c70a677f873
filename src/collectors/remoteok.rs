use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;
use crate::models::job::{DEFAULT_LOCATION, MISSING_DATE, RawPosting};

pub const BASE_URL: &str = "https://remoteok.com/";

pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "remote-dev-jobs",
    "remote-design-jobs",
    "remote-data-jobs",
    "remote-customer-support-jobs",
    "remote-marketing-jobs",
];

struct Selectors {
    block: Selector,
    title: Selector,
    company: Selector,
    tag: Selector,
    time: Selector,
    location: Selector,
}

impl Selectors {
    fn new() -> Result<Self, AppError> {
        let parse = |css: &str| {
            Selector::parse(css)
                .map_err(|e| AppError::Internal(format!("Invalid selector '{css}': {e:?}")))
        };
        Ok(Self {
            block: parse("tr.job")?,
            title: parse("h2")?,
            company: parse("h3")?,
            tag: parse("span.tag")?,
            time: parse("time")?,
            location: parse("div.location")?,
        })
    }
}

/// Parses RemoteOK category pages into raw posting tuples.
pub struct PostingExtractor {
    link_base: String,
    selectors: Selectors,
}

impl PostingExtractor {
    /// `base_url` is the site root; posting links are resolved against it.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            link_base: base_url.trim_end_matches('/').to_string(),
            selectors: Selectors::new()?,
        })
    }

    /// One item per `tr.job` block, in document order. A malformed block
    /// yields an error item and does not stop the iteration.
    pub fn postings<'a>(
        &'a self,
        document: &'a Html,
    ) -> impl Iterator<Item = Result<RawPosting, AppError>> + 'a {
        document
            .select(&self.selectors.block)
            .map(move |block| self.extract_block(block))
    }

    /// Parse `markup` and keep every well-formed posting.
    pub fn extract_page(&self, markup: &str) -> Vec<RawPosting> {
        let document = Html::parse_document(markup);
        self.postings(&document)
            .filter_map(|result| match result {
                Ok(posting) => Some(posting),
                Err(e) => {
                    tracing::debug!("Skipping posting block: {e}");
                    None
                }
            })
            .collect()
    }

    fn extract_block(&self, block: ElementRef<'_>) -> Result<RawPosting, AppError> {
        let title = first_text(block, &self.selectors.title)
            .ok_or_else(|| AppError::MalformedPosting("no h2 title".to_string()))?;

        let company = first_text(block, &self.selectors.company)
            .ok_or_else(|| AppError::MalformedPosting(format!("no h3 company for '{title}'")))?;

        let href = block.value().attr("data-href").ok_or_else(|| {
            AppError::MalformedPosting(format!("no data-href for '{title}'"))
        })?;

        let tags = block
            .select(&self.selectors.tag)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .collect();

        // A time element without its machine-readable stamp makes the block malformed.
        let date_posted = match block.select(&self.selectors.time).next() {
            Some(time) => time
                .value()
                .attr("datetime")
                .map(|d| d.trim().to_string())
                .ok_or_else(|| {
                    AppError::MalformedPosting(format!("time without datetime for '{title}'"))
                })?,
            None => MISSING_DATE.to_string(),
        };

        let location = first_text(block, &self.selectors.location)
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        Ok(RawPosting {
            title,
            company,
            date_posted: Some(date_posted),
            link: format!("{}{href}", self.link_base),
            location: Some(location),
            tags,
            skills: None,
        })
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, `None` if absent or blank.
fn first_text(block: ElementRef<'_>, selector: &Selector) -> Option<String> {
    block
        .select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}
