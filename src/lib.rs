//! This crate is a small incremental TF-IDF scorer over an in-memory corpus.

pub mod config;
pub mod error;
pub mod vectorizer;

/// TF-IDF scoring engine
/// The top-level struct of this crate.
/// Documents are added as term lists under a caller-chosen key; adding to an
/// existing key merges the new terms into it. Any term list can then be scored
/// against every stored document.
///
/// Internally, it holds:
/// - The corpus (per-document term counts and totals)
/// - Corpus-wide term statistics (document frequencies, document count)
/// - The compute mode deciding when those statistics are recomputed
///
/// `TfIdf<K, E>` has the following generic parameters:
/// - `K`: Document key type (e.g., String, u64)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTfIdfEngine)
///
/// # Serialization
/// Supported, through `export` / `load` (CBOR snapshot) or any serde format.
/// Use `TfIdfData` to deserialize.
pub use vectorizer::TfIdf;

/// Snapshot data structure for deserialization
/// Mirrors what `TfIdf` serializes. Convert it with `into_tf_idf`.
pub use vectorizer::serde::TfIdfData;

/// Corpus store
/// Maps each document key to its term counts, in key insertion order.
/// Entries only grow; there is no deletion.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// Occurrence count of each term of one document, plus the running total.
pub use vectorizer::token::TermFrequency;

/// Corpus-wide term statistics and the TF-IDF calculation engine trait
/// `DefaultTfIdfEngine` uses `count / total` for TF and
/// `ln(documents / document frequency)` for IDF.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TermStatistics, TfIdfEngine};

/// Ranked scoring results
/// `(key, score)` pairs sorted by descending score.
pub use vectorizer::scoring::Hits;

pub use config::ComputeMode;
pub use error::{Error, Result};
