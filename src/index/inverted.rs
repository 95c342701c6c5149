use super::parser::parse_line;
use super::types::{IndexEntry, LoadReport, ParsedLine};
use crate::error::IndexError;
use crate::search::engine::{DocMatches, rank, record_match};
use crate::search::types::SearchResult;

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// The merged keyword → documents mapping built from one or more index files.
///
/// Read-only once loaded; there is no update or delete API.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    entries: HashMap<String, IndexEntry>,
    report: LoadReport,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and merges every file in order. Any unreadable file fails the load.
    pub fn load(files: &[PathBuf]) -> Result<Self, IndexError> {
        if files.is_empty() {
            return Err(IndexError::NoFiles);
        }

        let mut index = Self::new();
        for path in files {
            index.merge_file(path)?;
        }

        tracing::info!(
            "Index loaded: {} keywords from {} file(s), {} line(s) skipped",
            index.len(),
            index.report.files_loaded,
            index.report.skipped.len()
        );
        Ok(index)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), IndexError> {
        let file = File::open(path).map_err(|source| IndexError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_reader(path, BufReader::new(file))?;
        self.report.files_loaded += 1;

        tracing::info!("Loaded index file: {}", path.display());
        Ok(())
    }

    /// Merges every valid line from `reader`; `source` only labels skipped lines and errors.
    pub fn merge_reader<R: BufRead>(&mut self, source: &Path, reader: R) -> Result<(), IndexError> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| IndexError::Read {
                path: source.to_path_buf(),
                source: err,
            })?;

            match parse_line(&line) {
                ParsedLine::Entry { word, entry } => {
                    self.merge_entry(word, entry);
                    self.report.lines_merged += 1;
                }
                ParsedLine::Skipped(reason) => {
                    self.report.record_skip(source, idx + 1, reason, &line);
                }
            }
        }
        Ok(())
    }

    /// Unions `entry` into the keyword's posting list and recomputes its count.
    pub fn merge_entry(&mut self, word: String, entry: IndexEntry) {
        self.entries.entry(word).or_default().merge(entry);
    }

    pub fn get(&self, word: &str) -> Option<&IndexEntry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Matched keywords per document for every keyword present in the index.
    pub fn collect_matches(&self, keywords: &BTreeSet<String>) -> DocMatches {
        let mut doc_matches = DocMatches::new();
        for keyword in keywords {
            let Some(entry) = self.entries.get(keyword) else {
                continue;
            };
            for document in &entry.documents {
                record_match(&mut doc_matches, document, keyword);
            }
        }
        doc_matches
    }

    pub fn search(&self, keywords: &BTreeSet<String>, k: usize) -> Vec<SearchResult> {
        rank(self.collect_matches(keywords), k)
    }
}
