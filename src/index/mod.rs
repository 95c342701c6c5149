//! Index Store Module
//!
//! Loads raw inverted-index files and answers keyword lookups against them.
//!
//! ## File Format
//! Each line is `word: count doc1, doc2, ...`. Lines that do not match
//! `^\S+: \d+ .+$` are skipped and reported, never fatal. An unreadable file
//! fails the whole load.
//!
//! ## Merge Semantics
//! When several files (or lines) name the same keyword, their document lists
//! are unioned as sets and the count is recomputed as the number of distinct
//! documents. Merging the same source twice changes nothing.
//!
//! ## Execution Strategies
//! - **Scan**: every query re-streams the source files; no state is kept.
//! - **Memory**: the merged map is built once, lazily, behind a one-time
//!   initialization gate, then shared read-only.
//!
//! ## Submodules
//! - **`parser`**: Line parsing into tagged outcomes.
//! - **`inverted`**: The merged keyword → documents map.
//! - **`scan`**: The scan-on-query strategy.
//! - **`store`**: Strategy selection and lazy loading.
//! - **`types`**: Entries, parse outcomes and load reports.

pub mod inverted;
pub mod parser;
pub mod scan;
pub mod store;
pub mod types;
