//! CSV snapshots of a catalog.
//!
//! One file per source, `{data_dir}/{name}_jobs.csv`, header row first with
//! columns `title, company, date_posted, link, location, skills`. Writes go
//! to a temporary file in the same directory that is renamed over the
//! target, so a reader sees either the previous snapshot or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::AppError;
use crate::models::catalog::Catalog;
use crate::models::job::{JobListing, RawPosting};

/// Named location of a persisted catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Serialize)]
struct SnapshotRow<'a> {
    title: &'a str,
    company: &'a str,
    date_posted: &'a str,
    link: &'a str,
    location: &'a str,
    skills: Option<&'a str>,
}

impl<'a> From<&'a JobListing> for SnapshotRow<'a> {
    fn from(job: &'a JobListing) -> Self {
        Self {
            title: &job.title,
            company: &job.company,
            date_posted: &job.date_posted,
            link: &job.link,
            location: &job.location,
            skills: job.skills.as_deref(),
        }
    }
}

impl Snapshot {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Snapshot for `name` under the data directory.
    pub fn in_dir(data_dir: &Path, name: &str) -> Self {
        Self::new(name, data_dir.join(format!("{name}_jobs.csv")))
    }

    /// Overwrite the snapshot with `catalog`. Returns the number of rows written.
    pub fn write(&self, catalog: &Catalog) -> Result<usize, AppError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        // Dropped on any error path, which removes it from disk.
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            if catalog.is_empty() {
                // serde only emits headers alongside the first record
                writer.write_record([
                    "title",
                    "company",
                    "date_posted",
                    "link",
                    "location",
                    "skills",
                ])?;
            }
            for job in catalog {
                writer.serialize(SnapshotRow::from(job))?;
            }
            writer.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| AppError::Io(e.error))?;

        tracing::info!(
            "Wrote {} listings to snapshot '{}' ({})",
            catalog.len(),
            self.name,
            self.path.display()
        );
        Ok(catalog.len())
    }

    /// Read the snapshot back. Missing, zero-length, and malformed files are
    /// all `SourceUnreadable`. Rows failing the required-field check are dropped.
    pub fn read(&self) -> Result<Catalog, AppError> {
        let unreadable = |reason: String| AppError::SourceUnreadable {
            path: self.path.clone(),
            reason,
        };

        let meta = fs::metadata(&self.path).map_err(|e| unreadable(e.to_string()))?;
        if meta.len() == 0 {
            return Err(unreadable("file is empty".to_string()));
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| unreadable(e.to_string()))?;
        let mut catalog = Catalog::new();
        let mut dropped = 0usize;
        for row in reader.deserialize::<RawPosting>() {
            let raw = row.map_err(|e| unreadable(e.to_string()))?;
            match JobListing::normalize(raw) {
                Some(job) => catalog.push(job),
                None => dropped += 1,
            }
        }

        if dropped > 0 {
            tracing::debug!(
                "Dropped {dropped} rows without title/company/link from '{}'",
                self.name
            );
        }
        Ok(catalog)
    }
}
