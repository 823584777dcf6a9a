use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::token::TermFrequency;

/// keep per-document term counts, in key insertion order
///
/// Entries are created on first use of a key and only ever grow afterwards.
/// There is no removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash",
    deserialize = "K: Deserialize<'de> + Eq + Hash"
))]
pub struct Corpus<K = String>
where
    K: Eq + Hash,
{
    /// Term counts of each document
    #[serde(with = "indexmap::map::serde_seq")]
    documents: IndexMap<K, TermFrequency>,
    /// add_num
    /// bumped on every addition, for update notify
    generation: u64,
}

impl<K> Default for Corpus<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Corpus<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            documents: IndexMap::new(),
            generation: 0,
        }
    }

    /// Merge a term list into the document stored under `key`.
    /// A new key gets an entry even when `terms` is empty.
    pub fn add_document<T>(&mut self, key: K, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.generation += 1;
        self.documents
            .entry(key)
            .or_default()
            .add_terms(terms);
    }

    /// Merge an already counted document into `key`.
    pub fn add_term_frequency(&mut self, key: K, freq: &TermFrequency) {
        self.generation += 1;
        self.documents
            .entry(key)
            .or_default()
            .merge(freq);
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&TermFrequency> {
        self.documents.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.documents.contains_key(key)
    }

    /// Total term occurrences of `key`, or `None` for an unknown key.
    #[inline]
    pub fn document_term_total(&self, key: &K) -> Option<u64> {
        self.documents.get(key).map(TermFrequency::term_sum)
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Get the generation number of the corpus
    #[inline]
    pub fn gen_num(&self) -> u64 {
        self.generation
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.documents.keys()
    }

    /// Documents in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &TermFrequency)> {
        self.documents.iter()
    }

    pub(crate) fn documents(&self) -> &IndexMap<K, TermFrequency> {
        &self.documents
    }
}
