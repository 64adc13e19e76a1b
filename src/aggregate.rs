use crate::model::{AuthorStats, CommitRecord, CommitStats};
use crate::parse::CommitAnalysis;
use std::collections::BTreeMap;

/// Running per-author totals for one aggregation pass.
///
/// Buckets are keyed by the author's email when the log carries one and by
/// name otherwise, so mixing both identity shapes splits an author in two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTotals {
    authors: BTreeMap<String, AuthorStats>,
}

impl AuthorTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(mut self, record: &CommitRecord, stats: &CommitStats) -> Self {
        self.record(record, stats);
        self
    }

    pub fn record(&mut self, record: &CommitRecord, stats: &CommitStats) {
        self.authors
            .entry(record.identity_key().to_string())
            .or_insert_with(|| {
                AuthorStats::new(
                    record.author_name().to_string(),
                    record.author_email().map(str::to_string),
                )
            })
            .add_commit(stats);
    }

    pub fn get(&self, key: &str) -> Option<&AuthorStats> {
        self.authors.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorStats)> {
        self.authors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// All buckets merged into a single total.
    pub fn overall(&self) -> AuthorStats {
        let mut total = AuthorStats::new("All authors".to_string(), None);
        for stats in self.authors.values() {
            total.merge(stats);
        }
        total
    }
}

pub fn aggregate<'a, I>(commits: I) -> AuthorTotals
where
    I: IntoIterator<Item = &'a CommitAnalysis>,
{
    commits
        .into_iter()
        .fold(AuthorTotals::new(), |totals, commit| {
            totals.fold(&commit.record, &commit.stats)
        })
}
