// tests/pipeline.rs
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;

use remote_job_trends::analytics::rank_by_title;
use remote_job_trends::collectors::remoteok::{BASE_URL, PostingExtractor};
use remote_job_trends::models::job::RawPosting;
use remote_job_trends::{
    AppError, Catalog, CatalogBuilder, JobListing, PageFetcher, ReportLimits, Snapshot,
    TrendReport, load_merged, load_snapshot,
};

/// Serves canned markup per category; unknown categories fail like a dead host.
struct FakeFetcher {
    pages: HashMap<String, String>,
}

impl FakeFetcher {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(c, m)| (c.to_string(), m.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, category: &str) -> Result<String, AppError> {
        self.pages
            .get(category)
            .cloned()
            .ok_or_else(|| AppError::Fetch {
                category: category.to_string(),
                reason: "connection refused".to_string(),
            })
    }
}

fn block(id: u32, title: &str, company: &str, extra: &str) -> String {
    format!(
        r#"<tr class="job" data-href="/remote-jobs/{id}"><td><h2>{title}</h2><h3>{company}</h3>{extra}</td></tr>"#
    )
}

fn page(blocks: &[String]) -> String {
    format!("<html><body><table>{}</table></body></html>", blocks.concat())
}

fn builder(fetcher: FakeFetcher) -> CatalogBuilder<FakeFetcher> {
    CatalogBuilder::new(fetcher, PostingExtractor::new(BASE_URL).unwrap())
}

fn categories(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn write_csv(dir: &Path, name: &str, body: &str) -> Snapshot {
    let snapshot = Snapshot::in_dir(dir, name);
    fs::write(&snapshot.path, body).unwrap();
    snapshot
}

#[tokio::test]
async fn live_build_skips_failed_categories_and_keeps_order() {
    let dev = page(&[
        block(1, "Rust Engineer", "Acme", r#"<span class="tag">Rust</span>"#),
        block(2, "Designer", "Studio", ""),
    ]);
    let data = page(&[block(3, "Analyst", "Numbers", r#"<div class="location">USA</div>"#)]);
    let fetcher = FakeFetcher::new(&[("remote-dev-jobs", dev), ("remote-data-jobs", data)]);

    let dir = tempfile::tempdir().unwrap();
    let snapshot = Snapshot::in_dir(dir.path(), "remoteok");
    let report = builder(fetcher)
        .build_from_live(
            &categories(&["remote-dev-jobs", "remote-design-jobs", "remote-data-jobs"]),
            &snapshot,
        )
        .await
        .unwrap();

    let titles: Vec<&str> = report.catalog.iter().map(|j| j.title()).collect();
    assert_eq!(titles, vec!["Rust Engineer", "Designer", "Analyst"]);
    assert_eq!(report.written, 3);
    assert_eq!(report.categories_scraped, 2);
    assert_eq!(report.categories_failed, vec!["remote-design-jobs"]);

    assert_eq!(load_snapshot(&snapshot).unwrap(), report.catalog);
}

#[tokio::test]
async fn malformed_block_does_not_lose_the_page() {
    let markup = page(&[
        block(1, "Engineer", "Acme", ""),
        r#"<tr class="job" data-href="/remote-jobs/2"><td><h3>No Title Co</h3></td></tr>"#.to_string(),
        block(3, "Analyst", "Numbers", ""),
    ]);
    let fetcher = FakeFetcher::new(&[("remote-dev-jobs", markup)]);

    let listings = builder(fetcher).fetch_category("remote-dev-jobs").await.unwrap();
    assert_eq!(listings.len(), 2);
    assert!(
        listings
            .iter()
            .all(|j| !j.title().is_empty() && !j.company().is_empty() && !j.link().is_empty())
    );
}

#[tokio::test]
async fn single_category_propagates_fetch_error() {
    let fetcher = FakeFetcher::new(&[]);
    let err = builder(fetcher)
        .fetch_category("remote-marketing-jobs")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Fetch { ref category, .. } if category == "remote-marketing-jobs"));
}

#[tokio::test]
async fn all_categories_failing_yields_empty_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = Snapshot::in_dir(dir.path(), "remoteok");
    let report = builder(FakeFetcher::new(&[]))
        .build_from_live(&categories(&["remote-dev-jobs"]), &snapshot)
        .await
        .unwrap();

    assert!(report.catalog.is_empty());
    assert_eq!(report.written, 0);
    assert!(load_merged(&[snapshot]).is_empty());
}

#[tokio::test]
async fn duplicates_across_categories_are_kept() {
    let same = page(&[block(7, "Product Designer", "Acme", "")]);
    let fetcher = FakeFetcher::new(&[
        ("remote-dev-jobs", same.clone()),
        ("remote-design-jobs", same),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let report = builder(fetcher)
        .build_from_live(
            &categories(&["remote-dev-jobs", "remote-design-jobs"]),
            &Snapshot::in_dir(dir.path(), "remoteok"),
        )
        .await
        .unwrap();

    assert_eq!(report.catalog.len(), 2);
    assert_eq!(rank_by_title(&report.catalog, 5).pairs(), vec![("Product Designer", 2)]);
}

const THREE_ROWS: &str = "title,company,date_posted,link,location,skills\n\
    Engineer,Acme,2024-05-01T10:00:00+00:00,https://remoteok.com/remote-jobs/1,Remote,\"Python, SQL ,Python\"\n\
    Engineer,Beta,2024-05-02T10:00:00+00:00,https://remoteok.com/remote-jobs/2,Europe,\n\
    Analyst,Gamma,N/A,https://remoteok.com/remote-jobs/3,Remote,SQL\n";

#[test]
fn merge_with_missing_source_keeps_the_readable_one() {
    let dir = tempfile::tempdir().unwrap();
    let remoteok = write_csv(dir.path(), "remoteok", THREE_ROWS);
    let indeed = Snapshot::in_dir(dir.path(), "indeed");

    let catalog = load_merged(&[remoteok, indeed]);
    assert_eq!(catalog.len(), 3);
}

#[test]
fn merge_concatenates_in_source_order() {
    let dir = tempfile::tempdir().unwrap();
    let remoteok = write_csv(dir.path(), "remoteok", THREE_ROWS);
    let indeed = write_csv(
        dir.path(),
        "indeed",
        "title,company,date_posted,link,location\nWriter,Words,N/A,https://example.com/9,Canada\n",
    );

    let catalog = load_merged(&[remoteok.clone(), indeed.clone()]);
    assert_eq!(
        catalog.len(),
        load_snapshot(&remoteok).unwrap().len() + load_snapshot(&indeed).unwrap().len()
    );
    assert_eq!(catalog.listings().last().unwrap().title(), "Writer");
}

#[test]
fn merge_skips_empty_and_corrupt_sources() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write_csv(dir.path(), "empty", "");
    let corrupt = write_csv(dir.path(), "corrupt", "title,company\nA,B,C,D\n");
    let good = write_csv(dir.path(), "remoteok", THREE_ROWS);

    assert!(matches!(
        load_snapshot(&corrupt),
        Err(AppError::SourceUnreadable { .. })
    ));
    assert_eq!(load_merged(&[empty, corrupt, good]).len(), 3);
}

#[test]
fn nothing_readable_is_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_merged(&[
        Snapshot::in_dir(dir.path(), "remoteok"),
        Snapshot::in_dir(dir.path(), "indeed"),
    ]);
    assert!(catalog.is_empty());

    let report = TrendReport::build(&catalog, ReportLimits::default());
    assert!(report.top_titles.is_empty());
    assert!(report.postings_over_time.is_empty());
}

#[test]
fn report_over_merged_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_merged(&[write_csv(dir.path(), "remoteok", THREE_ROWS)]);
    let report = TrendReport::build(&catalog, ReportLimits::default());

    assert_eq!(report.total, 3);
    assert_eq!(report.top_titles.pairs(), vec![("Engineer", 2), ("Analyst", 1)]);
    assert_eq!(report.top_locations.pairs(), vec![("Remote", 2), ("Europe", 1)]);
    assert_eq!(report.top_skills.pairs(), vec![("Python", 2), ("SQL", 2)]);
    assert_eq!(report.postings_over_time.len(), 2);
    assert_eq!(report.undated, 1);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["top_titles"][0]["key"], "Engineer");
    assert_eq!(json["postings_over_time"][0]["day"], "2024-05-01");
}

fn raw(title: &str, company: &str, link: &str) -> RawPosting {
    RawPosting {
        title: title.to_string(),
        company: company.to_string(),
        link: link.to_string(),
        ..Default::default()
    }
}

#[test]
fn collected_catalog_only_holds_complete_listings() {
    let dir = tempfile::tempdir().unwrap();
    let catalog: Catalog = vec![
        raw("Engineer", "Acme", "https://remoteok.com/remote-jobs/1"),
        raw("", "", ""),
        raw("Analyst", "", "https://remoteok.com/remote-jobs/2"),
        raw("Writer", "Words", "  "),
    ]
    .into_iter()
    .filter_map(JobListing::normalize)
    .collect();
    assert_eq!(catalog.len(), 1);

    let snapshot = Snapshot::in_dir(dir.path(), "remoteok");
    let written = snapshot.write(&catalog).unwrap();
    let read_back = load_snapshot(&snapshot).unwrap();

    assert_eq!(written, catalog.len());
    assert_eq!(read_back, catalog);
}
