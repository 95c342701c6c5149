//! Ranked Search Module
//!
//! Keyword-to-document matching and the deterministic top-K ranking rule.
//!
//! ## Overview
//! The same ranking is applied in two places: inside a shard, over the
//! documents its local index matched, and inside the coordinator, over the
//! union of every shard's partial answer. Keeping one implementation means a
//! merged answer is ranked exactly like a single-shard answer.
//!
//! ## Ranking Rule
//! - Results are ordered by **match count descending**, then **document
//!   identifier ascending**. Identifiers are unique, so the order is total.
//! - The list is truncated to the first `K` entries; `K <= 0` yields nothing.
//! - Matched keywords inside a result are sorted ascending.
//!
//! ## Submodules
//! - **`engine`**: Match collection, ranking and shard-result merging.
//! - **`tokenizer`**: Query normalization into a keyword set.
//! - **`types`**: Result and query-parameter DTOs.

pub mod engine;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
