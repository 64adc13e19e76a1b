use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Layout of the first line of every commit in the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdentityShape {
    /// `<id> '<name>' <YYYY-MM-DD HH:MM:SS> <message-head>`
    Name,
    /// `<id> '<name>' <email> <YYYY-MM-DD HH:MM:SS> <message-head>`
    Email,
}

impl IdentityShape {
    pub fn has_email(self) -> bool {
        matches!(self, IdentityShape::Email)
    }

    /// `--pretty` format that makes git emit this shape.
    pub fn pretty_format(self) -> &'static str {
        match self {
            IdentityShape::Name => "format:%H '%an' %ad %s %b",
            IdentityShape::Email => "format:%H '%an' %ae %ad %s %b",
        }
    }
}

/// Identity and message of one commit. Built once by the record parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitRecord {
    id: String,
    author_name: String,
    author_email: Option<String>,
    timestamp: NaiveDateTime,
    message: String,
}

impl CommitRecord {
    pub(crate) fn new(
        id: String,
        author_name: String,
        author_email: Option<String>,
        timestamp: NaiveDateTime,
        message: String,
    ) -> Self {
        Self {
            id,
            author_name,
            author_email,
            timestamp,
            message,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_email(&self) -> Option<&str> {
        self.author_email.as_deref()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Key of the author bucket: email when present, otherwise the name.
    pub fn identity_key(&self) -> &str {
        match self.author_email.as_deref() {
            Some(email) if !email.is_empty() => email,
            _ => &self.author_name,
        }
    }
}

/// Line count column of a numstat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCount {
    Lines(u64),
    Binary,
}

impl LineCount {
    /// `-` is git's marker for a binary file.
    pub fn parse(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(LineCount::Binary);
        }
        field.parse::<u64>().ok().map(LineCount::Lines)
    }

    pub fn count(self) -> u64 {
        match self {
            LineCount::Lines(n) => n,
            LineCount::Binary => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub added: LineCount,
    pub deleted: LineCount,
    pub path: String,
}

impl FileChange {
    pub fn is_binary(&self) -> bool {
        self.added == LineCount::Binary || self.deleted == LineCount::Binary
    }
}

/// Totals for a single commit, consumed by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CommitStats {
    pub added_lines: u64,
    pub deleted_lines: u64,
    pub ai_ratio: f64,
    pub is_fix: bool,
}

impl CommitStats {
    pub fn ai_added_lines(&self) -> u64 {
        ai_share(self.added_lines, self.ai_ratio)
    }

    pub fn ai_deleted_lines(&self) -> u64 {
        ai_share(self.deleted_lines, self.ai_ratio)
    }
}

/// `round(lines * ratio)`, rounding half away from zero. Huge ratios
/// saturate at `u64::MAX`.
pub fn ai_share(lines: u64, ratio: f64) -> u64 {
    if lines == 0 || ratio <= 0.0 {
        return 0;
    }
    (lines as f64 * ratio).round() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub name: String,
    pub email: Option<String>,
    pub total_added: u64,
    pub total_deleted: u64,
    pub total_ai_added: u64,
    pub total_ai_deleted: u64,
    pub fix_count: u32,
    pub fix_and_aig_count: u32,
}

impl AuthorStats {
    pub fn new(name: String, email: Option<String>) -> Self {
        Self {
            name,
            email,
            total_added: 0,
            total_deleted: 0,
            total_ai_added: 0,
            total_ai_deleted: 0,
            fix_count: 0,
            fix_and_aig_count: 0,
        }
    }

    pub fn add_commit(&mut self, stats: &CommitStats) {
        self.total_added = self.total_added.saturating_add(stats.added_lines);
        self.total_deleted = self.total_deleted.saturating_add(stats.deleted_lines);
        self.total_ai_added = self.total_ai_added.saturating_add(stats.ai_added_lines());
        self.total_ai_deleted = self.total_ai_deleted.saturating_add(stats.ai_deleted_lines());
        if stats.is_fix {
            self.fix_count += 1;
            if stats.ai_ratio > 0.0 {
                self.fix_and_aig_count += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &AuthorStats) {
        self.total_added = self.total_added.saturating_add(other.total_added);
        self.total_deleted = self.total_deleted.saturating_add(other.total_deleted);
        self.total_ai_added = self.total_ai_added.saturating_add(other.total_ai_added);
        self.total_ai_deleted = self.total_ai_deleted.saturating_add(other.total_ai_deleted);
        self.fix_count += other.fix_count;
        self.fix_and_aig_count += other.fix_and_aig_count;
    }

    pub fn ai_added_percent(&self) -> f64 {
        percent(self.total_ai_added, self.total_added)
    }

    pub fn ai_deleted_percent(&self) -> f64 {
        percent(self.total_ai_deleted, self.total_deleted)
    }

    pub fn ai_fix_percent(&self) -> f64 {
        percent(self.fix_and_aig_count as u64, self.fix_count as u64)
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorReport {
    #[serde(flatten)]
    pub stats: AuthorStats,
    pub ai_added_percent: f64,
    pub ai_deleted_percent: f64,
    pub ai_fix_percent: f64,
}

impl From<&AuthorStats> for AuthorReport {
    fn from(stats: &AuthorStats) -> Self {
        Self {
            stats: stats.clone(),
            ai_added_percent: stats.ai_added_percent(),
            ai_deleted_percent: stats.ai_deleted_percent(),
            ai_fix_percent: stats.ai_fix_percent(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: NaiveDate,
    pub until: NaiveDate,
    pub author_filter: Option<String>,
    pub identity: IdentityShape,
    pub commits_analyzed: usize,
    pub authors: Vec<AuthorReport>,
    pub overall: AuthorReport,
}

/// Inclusive window handed to `git log --since/--until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateWindow {
    pub fn since_arg(&self) -> String {
        self.since.format("%Y-%m-%d").to_string()
    }

    pub fn until_arg(&self) -> String {
        self.until.format("%Y-%m-%d").to_string()
    }
}
