use clap::Parser;
use tracing_subscriber::EnvFilter;

use remote_job_trends::collectors::remoteok::PostingExtractor;
use remote_job_trends::config::{Command, Config};
use remote_job_trends::{
    Catalog, CatalogBuilder, HttpFetcher, Snapshot, TrendReport, load_merged,
};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("remote_job_trends=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_json);

    let command = config.resolved_command();
    match &command {
        Command::Scrape { snapshot, category } => {
            let builder = catalog_builder(&config)?;
            let snapshot = config.snapshot(snapshot);
            match category {
                Some(category) => {
                    let listings = builder.fetch_category(category).await?;
                    let catalog: Catalog = listings.into_iter().collect();
                    let written = snapshot.write(&catalog)?;
                    println!(
                        "Scraped {written} jobs from '{category}' and saved to '{}'.",
                        snapshot.path.display()
                    );
                }
                None => scrape_all(&config, &builder, &snapshot).await?,
            }
        }
        Command::Analyze {
            sources,
            json,
            refresh,
            ..
        } => {
            let sources: Vec<Snapshot> = sources.iter().map(|s| config.snapshot(s)).collect();

            if *refresh {
                let target = sources
                    .first()
                    .ok_or_else(|| anyhow::anyhow!("--refresh needs at least one source"))?;
                let builder = catalog_builder(&config)?;
                scrape_all(&config, &builder, target).await?;
            }

            let catalog = load_merged(&sources);
            if catalog.is_empty() {
                tracing::warn!("No data to analyze");
                println!("No valid data files found.");
                return Ok(());
            }

            let report = TrendReport::build(&catalog, command.limits());
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
    }

    Ok(())
}

fn catalog_builder(config: &Config) -> anyhow::Result<CatalogBuilder<HttpFetcher>> {
    let fetcher = HttpFetcher::new(&config.base_url, &config.user_agent, config.timeout())?;
    let extractor = PostingExtractor::new(&config.base_url)?;
    Ok(CatalogBuilder::new(fetcher, extractor))
}

async fn scrape_all(
    config: &Config,
    builder: &CatalogBuilder<HttpFetcher>,
    snapshot: &Snapshot,
) -> anyhow::Result<()> {
    let report = builder.build_from_live(&config.categories, snapshot).await?;
    if !report.categories_failed.is_empty() {
        tracing::warn!(
            "Categories skipped: {}",
            report.categories_failed.join(", ")
        );
    }
    if report.catalog.is_empty() {
        println!("No postings found; '{}' now holds an empty catalog.", snapshot.path.display());
    } else {
        println!(
            "Scraped {} jobs and saved to '{}'.",
            report.written,
            snapshot.path.display()
        );
    }
    Ok(())
}
