use serde::Serialize;

use crate::models::job::JobListing;

/// Ordered collection of listings from one live build or one merge-load.
/// Order is fetch order; duplicates across categories are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    listings: Vec<JobListing>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// No source yielded any data. Callers check this before aggregating.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobListing> {
        self.listings.iter()
    }

    pub fn listings(&self) -> &[JobListing] {
        &self.listings
    }

    pub(crate) fn push(&mut self, listing: JobListing) {
        self.listings.push(listing);
    }

    /// Append another catalog, keeping source order.
    pub(crate) fn append(&mut self, mut other: Catalog) {
        self.listings.append(&mut other.listings);
    }
}

impl FromIterator<JobListing> for Catalog {
    fn from_iter<I: IntoIterator<Item = JobListing>>(iter: I) -> Self {
        Self {
            listings: iter.into_iter().collect(),
        }
    }
}

impl Extend<JobListing> for Catalog {
    fn extend<I: IntoIterator<Item = JobListing>>(&mut self, iter: I) {
        self.listings.extend(iter);
    }
}

impl IntoIterator for Catalog {
    type Item = JobListing;
    type IntoIter = std::vec::IntoIter<JobListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a JobListing;
    type IntoIter = std::slice::Iter<'a, JobListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}
