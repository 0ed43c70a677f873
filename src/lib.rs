//! Scrapes remote job postings from RemoteOK category pages, keeps the
//! latest catalog as a CSV snapshot, and ranks titles, locations, and skills.

pub mod analytics;
pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod snapshot;

pub use analytics::{ReportLimits, TrendReport};
pub use collectors::runner::{CatalogBuilder, ScrapeReport, load_merged, load_snapshot};
pub use collectors::{HttpFetcher, PageFetcher};
pub use error::AppError;
pub use models::catalog::Catalog;
pub use models::job::JobListing;
pub use snapshot::Snapshot;
