use crate::collectors::PageFetcher;
use crate::collectors::remoteok::PostingExtractor;
use crate::error::AppError;
use crate::models::catalog::Catalog;
use crate::models::job::JobListing;
use crate::snapshot::Snapshot;

/// Outcome of one live build.
#[derive(Debug)]
pub struct ScrapeReport {
    pub catalog: Catalog,
    pub written: usize,
    pub categories_scraped: usize,
    pub categories_failed: Vec<String>,
}

/// Drives fetch -> extract -> normalize across categories.
pub struct CatalogBuilder<F> {
    fetcher: F,
    extractor: PostingExtractor,
}

impl<F: PageFetcher> CatalogBuilder<F> {
    pub fn new(fetcher: F, extractor: PostingExtractor) -> Self {
        Self { fetcher, extractor }
    }

    /// Scrape one category. Fetch failures propagate to the caller.
    pub async fn fetch_category(&self, category: &str) -> Result<Vec<JobListing>, AppError> {
        let markup = self.fetcher.fetch(category).await?;
        let listings: Vec<JobListing> = self
            .extractor
            .extract_page(&markup)
            .into_iter()
            .filter_map(JobListing::normalize)
            .collect();
        tracing::info!("Extracted {} listings from '{category}'", listings.len());
        Ok(listings)
    }

    /// Scrape every category in order, skipping the ones that fail to fetch,
    /// and overwrite `snapshot` with the result.
    pub async fn build_from_live(
        &self,
        categories: &[String],
        snapshot: &Snapshot,
    ) -> Result<ScrapeReport, AppError> {
        let mut catalog = Catalog::new();
        let mut categories_scraped = 0;
        let mut categories_failed = Vec::new();

        for category in categories {
            match self.fetch_category(category).await {
                Ok(listings) => {
                    categories_scraped += 1;
                    catalog.extend(listings);
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("Skipping category '{category}': {e}");
                    categories_failed.push(category.clone());
                }
                Err(e) => return Err(e),
            }
        }

        let written = snapshot.write(&catalog)?;
        tracing::info!(
            "Scraped {written} jobs from {categories_scraped}/{} categories into '{}'",
            categories.len(),
            snapshot.name
        );

        Ok(ScrapeReport {
            catalog,
            written,
            categories_scraped,
            categories_failed,
        })
    }
}

/// Concatenate every readable snapshot in order. Unreadable sources are
/// logged and skipped; if none are readable the catalog is empty.
pub fn load_merged(sources: &[Snapshot]) -> Catalog {
    let mut merged = Catalog::new();
    for source in sources {
        match load_snapshot(source) {
            Ok(catalog) => merged.append(catalog),
            Err(e) => tracing::warn!("Skipping source '{}': {e}", source.name),
        }
    }

    if merged.is_empty() {
        tracing::warn!("No valid data found in {} sources", sources.len());
    }
    merged
}

/// Load a single snapshot, propagating `SourceUnreadable`.
pub fn load_snapshot(source: &Snapshot) -> Result<Catalog, AppError> {
    let catalog = source.read()?;
    tracing::debug!("Loaded {} listings from '{}'", catalog.len(), source.name);
    Ok(catalog)
}
