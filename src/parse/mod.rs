pub mod numstat;
pub mod record;
pub mod split;
pub mod tags;

pub use numstat::{is_file_change_line, parse_file_change, ExtensionFilter};
pub use record::{ParsedChunk, RecordParser};
pub use split::{is_commit_header, split_commits};
pub use tags::TagExtractor;

use crate::error::Result;
use crate::model::{CommitRecord, CommitStats, FileChange, IdentityShape};
use serde::Serialize;
use tracing::debug;

/// A file change together with the filter decision for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileVerdict {
    pub change: FileChange,
    pub counted: bool,
}

/// Everything derived from one commit chunk.
#[derive(Debug, Clone, Serialize)]
pub struct CommitAnalysis {
    pub record: CommitRecord,
    pub files: Vec<FileVerdict>,
    pub stats: CommitStats,
}

/// Turns commit chunks into [`CommitAnalysis`] values for one identity shape.
#[derive(Debug, Clone)]
pub struct CommitParser {
    records: RecordParser,
    tags: TagExtractor,
    filter: ExtensionFilter,
}

impl CommitParser {
    pub fn new(shape: IdentityShape, filter: ExtensionFilter) -> Result<Self> {
        Ok(Self {
            records: RecordParser::new(shape)?,
            tags: TagExtractor::new(shape)?,
            filter,
        })
    }

    pub fn shape(&self) -> IdentityShape {
        self.records.shape()
    }

    pub fn filter(&self) -> &ExtensionFilter {
        &self.filter
    }

    /// `None` for a chunk whose identity line has the wrong shape.
    pub fn parse(&self, chunk: &str) -> Option<CommitAnalysis> {
        let Some(parsed) = self.records.parse(chunk) else {
            debug!(
                header = chunk.lines().next().unwrap_or_default(),
                "skipping chunk with unrecognised identity line"
            );
            return None;
        };

        let mut stats = CommitStats {
            ai_ratio: self.tags.ai_ratio(parsed.record.message()),
            is_fix: self.tags.is_fix(parsed.identity_line),
            ..CommitStats::default()
        };

        let mut files = Vec::with_capacity(parsed.file_lines.len());
        for line in &parsed.file_lines {
            let Some(change) = parse_file_change(line) else {
                debug!(commit = parsed.record.id(), line, "ignoring non-numstat line");
                continue;
            };
            let counted = self.filter.accepts(&change.path);
            if counted {
                stats.added_lines += change.added.count();
                stats.deleted_lines += change.deleted.count();
            }
            files.push(FileVerdict { change, counted });
        }

        Some(CommitAnalysis {
            record: parsed.record,
            files,
            stats,
        })
    }
}
