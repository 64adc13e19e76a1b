use crate::model::{FileChange, LineCount};
use std::path::Path;

pub const DEFAULT_INCLUDE_EXTS: &[&str] = &[
    ".html", ".vue", ".js", ".ts", ".tsx", ".css", ".scss", ".cjs", ".go", ".php", ".yaml",
    ".proto",
];

pub const DEFAULT_EXCLUDE_EXTS: &[&str] = &[".pb.go", ".pb.validate.go"];

/// Cheap shape test for a numstat line: the first two fields are counts
/// or the binary marker `-`.
pub fn is_file_change_line(line: &str) -> bool {
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next()) {
        (Some(added), Some(deleted)) => {
            LineCount::parse(added).is_some() && LineCount::parse(deleted).is_some()
        }
        _ => false,
    }
}

/// Parse `<added> <deleted> <path...>`.
///
/// Path fields are concatenated without separators, so rename notation
/// such as `src/{a.go => b.go}` becomes `src/{a.go=>b.go}`. Its extension
/// is `go}`, which keeps renamed files out of the counted set.
pub fn parse_file_change(line: &str) -> Option<FileChange> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return None;
    }

    Some(FileChange {
        added: LineCount::parse(fields[0])?,
        deleted: LineCount::parse(fields[1])?,
        path: fields[2..].concat(),
    })
}

/// Allow-list / deny-list of file extensions counted toward statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            include: include.into_iter().filter_map(normalize).collect(),
            exclude: exclude.into_iter().filter_map(normalize).collect(),
        }
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Deny-list entries match as suffixes and win over the allow-list.
    pub fn accepts(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        if self.exclude.iter().any(|suffix| path.ends_with(suffix.as_str())) {
            return false;
        }

        let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.include
            .iter()
            .any(|allowed| allowed.strip_prefix('.') == Some(ext))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_INCLUDE_EXTS, DEFAULT_EXCLUDE_EXTS)
    }
}

fn normalize(ext: impl AsRef<str>) -> Option<String> {
    let ext = ext.as_ref().trim();
    if ext.is_empty() || ext == "." {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext.to_string())
    } else {
        Some(format!(".{ext}"))
    }
}
