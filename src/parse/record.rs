use super::numstat::is_file_change_line;
use super::split::is_commit_id;
use crate::error::Result;
use crate::model::{CommitRecord, IdentityShape};
use chrono::NaiveDateTime;
use regex::Regex;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAME_HEADER_PATTERN: &str =
    r"^([0-9a-f]{40}) '([^']+)' (\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}) (.+)$";

/// A commit chunk split into its record and the trailing numstat block.
#[derive(Debug, Clone)]
pub struct ParsedChunk<'a> {
    pub record: CommitRecord,
    pub identity_line: &'a str,
    pub file_lines: Vec<&'a str>,
}

struct Header<'a> {
    id: &'a str,
    name: &'a str,
    email: Option<&'a str>,
    timestamp: &'a str,
    head: &'a str,
}

#[derive(Debug, Clone)]
pub struct RecordParser {
    shape: IdentityShape,
    name_header: Regex,
}

impl RecordParser {
    pub fn new(shape: IdentityShape) -> Result<Self> {
        Ok(Self {
            shape,
            name_header: Regex::new(NAME_HEADER_PATTERN)?,
        })
    }

    pub fn shape(&self) -> IdentityShape {
        self.shape
    }

    /// Returns `None` when the identity line does not have the configured shape.
    pub fn parse<'a>(&self, chunk: &'a str) -> Option<ParsedChunk<'a>> {
        let mut lines = chunk.lines();
        let identity_line = lines.next()?;

        let header = match self.shape {
            IdentityShape::Name => self.match_name_header(identity_line)?,
            IdentityShape::Email => split_email_header(identity_line)?,
        };
        let timestamp = NaiveDateTime::parse_from_str(header.timestamp, TIMESTAMP_FORMAT).ok()?;

        let mut message_lines = vec![header.head];
        let mut file_lines = Vec::new();
        for line in lines {
            if !file_lines.is_empty() || is_file_change_line(line) {
                file_lines.push(line);
            } else if !line.is_empty() {
                message_lines.push(line);
            }
        }

        let record = CommitRecord::new(
            header.id.to_string(),
            header.name.to_string(),
            header.email.map(str::to_string),
            timestamp,
            message_lines.join("\n"),
        );

        Some(ParsedChunk {
            record,
            identity_line,
            file_lines,
        })
    }

    fn match_name_header<'a>(&self, line: &'a str) -> Option<Header<'a>> {
        let caps = self.name_header.captures(line)?;
        Some(Header {
            id: caps.get(1)?.as_str(),
            name: caps.get(2)?.as_str(),
            email: None,
            timestamp: caps.get(3)?.as_str(),
            head: caps.get(4)?.as_str(),
        })
    }
}

/// Field split of `<id> '<name>' <email> <date> <time> <head>`.
///
/// The quoted name may contain spaces, so it is cut at the closing quote
/// rather than at the next blank.
fn split_email_header(line: &str) -> Option<Header<'_>> {
    let (id, rest) = line.split_once(' ')?;
    if !is_lower_commit_id(id) {
        return None;
    }

    let (name, rest) = rest.strip_prefix('\'')?.split_once("' ")?;
    if name.is_empty() {
        return None;
    }

    let (email, stamped) = rest.split_once(' ')?;
    let (date, rest) = stamped.split_once(' ')?;
    let (time, head) = rest.split_once(' ')?;
    if head.is_empty() {
        return None;
    }
    let timestamp = stamped.get(..date.len() + 1 + time.len())?;

    Some(Header {
        id,
        name,
        email: Some(email),
        timestamp,
        head,
    })
}

fn is_lower_commit_id(token: &str) -> bool {
    is_commit_id(token) && !token.bytes().any(|b| b.is_ascii_uppercase())
}
