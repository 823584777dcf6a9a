use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::{corpus::Corpus, token::TermFrequency};

/// Corpus-wide statistics the IDF is derived from.
///
/// Only consistent with the corpus as of `generation`; the engine refreshes
/// it before scoring whenever the corpus has moved on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermStatistics {
    /// number of documents containing each term at least once
    #[serde(with = "indexmap::map::serde_seq")]
    pub document_frequency: IndexMap<String, u64>,
    /// number of documents
    pub total_documents: u64,
    /// corpus generation these numbers were computed from
    pub generation: u64,
}

impl TermStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full scan of `corpus` in key insertion order.
    pub fn from_corpus<K>(corpus: &Corpus<K>) -> Self
    where
        K: Eq + Hash,
    {
        let mut document_frequency: IndexMap<String, u64> = IndexMap::new();
        for (_, doc) in corpus.iter() {
            for term in doc.term_set() {
                if let Some(df) = document_frequency.get_mut(term) {
                    *df += 1;
                } else {
                    document_frequency.insert(term.to_string(), 1);
                }
            }
        }
        Self {
            document_frequency,
            total_documents: corpus.len() as u64,
            generation: corpus.gen_num(),
        }
    }

    #[inline]
    pub fn document_frequency(&self, term: &str) -> u64 {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_stale<K>(&self, corpus: &Corpus<K>) -> bool
    where
        K: Eq + Hash,
    {
        self.generation != corpus.gen_num()
    }
}

/// TF-IDF calculation strategy.
///
/// `TfIdf<K, E>` is generic over this trait so the weighting can be swapped
/// without touching the corpus or ranking code.
pub trait TfIdfEngine {
    /// Term frequency of `term` within one document.
    fn tf(doc: &TermFrequency, term: &str) -> f64;
    /// Inverse document frequency of `term` over the whole corpus.
    fn idf(stats: &TermStatistics, term: &str) -> f64;
}

/// デフォルトのTF-IDFエンジン
///
/// - `tf = count / term_sum` (0 for an empty document)
/// - `idf = ln(total_documents / document_frequency)` (0 for an unseen term)
///
/// A term present in every document gets `idf = ln(1) = 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl TfIdfEngine for DefaultTfIdfEngine {
    #[inline]
    fn tf(doc: &TermFrequency, term: &str) -> f64 {
        doc.tf(term)
    }

    #[inline]
    fn idf(stats: &TermStatistics, term: &str) -> f64 {
        let df = stats.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        (stats.total_documents as f64 / df as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.add_document("Article1".to_string(), &["i", "love", "cats"]);
        corpus.add_document("Article2".to_string(), &["i", "love", "cake"]);
        corpus.add_document("Article3".to_string(), &["cats", "love", "cake"]);
        corpus
    }

    #[test]
    fn document_frequency_counts_distinct_documents() {
        let mut corpus = articles();
        corpus.add_document("Article1".to_string(), &["cats", "cats"]);
        let stats = TermStatistics::from_corpus(&corpus);
        assert_eq!(stats.total_documents, 3);
        assert_eq!(stats.document_frequency("love"), 3);
        assert_eq!(stats.document_frequency("cats"), 2);
        assert_eq!(stats.document_frequency("i"), 2);
        assert_eq!(stats.document_frequency("dogs"), 0);
        assert!(!stats.is_stale(&corpus));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let corpus = articles();
        let first = TermStatistics::from_corpus(&corpus);
        let second = TermStatistics::from_corpus(&corpus);
        assert_eq!(first, second);
    }

    #[test]
    fn idf_edge_cases() {
        let stats = TermStatistics::from_corpus(&articles());
        assert_eq!(DefaultTfIdfEngine::idf(&stats, "love"), 0.0);
        assert_eq!(DefaultTfIdfEngine::idf(&stats, "unseen"), 0.0);
        let cats = DefaultTfIdfEngine::idf(&stats, "cats");
        assert!((cats - (3.0f64 / 2.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn empty_corpus_statistics() {
        let corpus: Corpus = Corpus::new();
        let stats = TermStatistics::from_corpus(&corpus);
        assert_eq!(stats, TermStatistics::new());
        assert_eq!(DefaultTfIdfEngine::idf(&stats, "x"), 0.0);
    }
}
