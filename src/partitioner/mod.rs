//! Index Partitioner
//!
//! Offline stage that runs before any shard starts: splits one combined index
//! file into N partition files by scattering each keyword's documents at random.
//! Shards later load the partitions assigned to them.
//!
//! Input and output share the index line format (`word: count doc1, doc2`),
//! parsed with the same rules the shards use.

pub mod partition;
pub mod rng;
