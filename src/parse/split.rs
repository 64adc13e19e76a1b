use tracing::debug;

/// 40 hex digits, the length of a full SHA-1 object id.
pub fn is_commit_id(token: &str) -> bool {
    token.len() == 40 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A line opens a new commit when its first token looks like a commit id.
///
/// Message lines that begin with such a token are indistinguishable from a
/// header and will start a new chunk.
pub fn is_commit_header(line: &str) -> bool {
    line.split_whitespace().next().is_some_and(is_commit_id)
}

/// Partition raw `git log` output into one newline-joined chunk per commit.
///
/// Blank lines are dropped. Text before the first header belongs to no
/// commit and is discarded, so input without any header yields no chunks.
pub fn split_commits(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if is_commit_header(line) {
            if let Some(chunk) = current.take() {
                chunks.push(chunk);
            }
            current = Some(line.to_string());
            continue;
        }

        match current.as_mut() {
            Some(chunk) => {
                chunk.push('\n');
                chunk.push_str(line);
            }
            None => debug!(line, "ignoring text before first commit header"),
        }
    }

    chunks.extend(current);
    chunks
}
