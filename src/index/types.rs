use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Posting list for one keyword.
///
/// `count` mirrors the count field of the source line until the entry is
/// merged into an index, which recomputes it as the number of distinct documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub count: usize,
    pub documents: BTreeSet<String>,
}

impl IndexEntry {
    /// Unions `other` into this entry. Merging the same documents twice is a no-op.
    pub fn merge(&mut self, other: IndexEntry) {
        self.documents.extend(other.documents);
        self.count = self.documents.len();
    }
}

/// Why an index line was not merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    /// Line does not have the `word: count doc1, doc2, ...` shape.
    Malformed,
    /// The count field does not fit an unsigned integer.
    InvalidCount,
    /// Every entry of the document list was empty.
    NoDocuments,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::Blank => "blank line",
            SkipReason::Malformed => "invalid index line",
            SkipReason::InvalidCount => "invalid count",
            SkipReason::NoDocuments => "empty document list",
        };
        f.write_str(text)
    }
}

/// Outcome of parsing a single index line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Entry { word: String, entry: IndexEntry },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    pub reason: SkipReason,
}

/// Summary of one load pass over the configured source files.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub files_loaded: usize,
    pub lines_merged: usize,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn record_skip(&mut self, file: &Path, line: usize, reason: SkipReason, text: &str) {
        log_skipped_line(file, line, reason, text);
        self.skipped.push(SkippedLine {
            file: file.to_path_buf(),
            line,
            reason,
        });
    }
}

pub(crate) fn log_skipped_line(file: &Path, line: usize, reason: SkipReason, text: &str) {
    match reason {
        SkipReason::Blank => {
            tracing::debug!("{}:{}: skipping blank line", file.display(), line);
        }
        _ => {
            tracing::warn!("{}:{}: {}: {}", file.display(), line, reason, text);
        }
    }
}

/// How a shard answers queries. Chosen once per shard at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Re-read the source files on every query.
    #[default]
    Scan,
    /// Merge the source files once, on first use, and search the in-memory map.
    Memory,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Scan => f.write_str("scan"),
            SearchStrategy::Memory => f.write_str("memory"),
        }
    }
}
