pub mod corpus;
pub mod tfidf;
pub mod token;
pub mod serde;
pub mod scoring;

use std::hash::Hash;
use std::marker::PhantomData;

use crate::config::ComputeMode;
use crate::vectorizer::{corpus::Corpus, tfidf::{DefaultTfIdfEngine, TermStatistics, TfIdfEngine}, token::TermFrequency};

/// Incremental TF-IDF scorer over an in-memory corpus.
///
/// `TfIdf<K, E>`:
/// - `K`: document key type (e.g. `String`, `u64`)
/// - `E`: TF-IDF calculation engine (`DefaultTfIdfEngine`)
///
/// Holds the corpus, the corpus-wide term statistics and the compute mode.
/// Several engines can live side by side; none of the state is global.
///
/// Scoring fans out over documents with rayon, so `score_document` needs
/// `K: Send + Sync`. Keys such as `Rc<str>` can be stored but not scored.
#[derive(Debug, Clone)]
pub struct TfIdf<K = String, E = DefaultTfIdfEngine>
where
    K: Clone + Eq + Hash,
    E: TfIdfEngine,
{
    /// Term counts per document
    pub(crate) corpus: Corpus<K>,
    /// Document frequency cache
    pub(crate) statistics: TermStatistics,
    pub(crate) mode: ComputeMode,
    _marker: PhantomData<E>,
}

impl<K, E> Default for TfIdf<K, E>
where
    K: Clone + Eq + Hash,
    E: TfIdfEngine,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> TfIdf<K, E>
where
    K: Clone + Eq + Hash,
    E: TfIdfEngine,
{
    /// Create an empty engine in eager mode
    pub fn new() -> Self {
        Self::with_mode(ComputeMode::Eager)
    }

    pub fn with_mode(mode: ComputeMode) -> Self {
        Self::from_parts(Corpus::new(), TermStatistics::new(), mode)
    }

    pub(crate) fn from_parts(corpus: Corpus<K>, statistics: TermStatistics, mode: ComputeMode) -> Self {
        Self {
            corpus,
            statistics,
            mode,
            _marker: PhantomData,
        }
    }

    /// `true` recomputes statistics after every addition, `false` defers
    /// it to the next scoring call. Never recomputes by itself.
    pub fn set_compute_on_add(&mut self, compute_on_add: bool) {
        self.mode = ComputeMode::from(compute_on_add);
    }

    pub fn set_compute_mode(&mut self, mode: ComputeMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn compute_mode(&self) -> ComputeMode {
        self.mode
    }

    /// Add a document
    /// Terms are merged into an existing entry when `key` was seen before.
    pub fn add_document<T>(&mut self, key: K, terms: &[T])
    where
        T: AsRef<str>,
    {
        self.corpus.add_document(key, terms);
        tracing::trace!(terms = terms.len(), docs = self.corpus.len(), "document added");
        self.after_add();
    }

    /// Add a pre-counted document
    pub fn add_term_frequency(&mut self, key: K, freq: &TermFrequency) {
        self.corpus.add_term_frequency(key, freq);
        tracing::trace!(terms = freq.term_sum(), docs = self.corpus.len(), "document added");
        self.after_add();
    }

    fn after_add(&mut self) {
        if self.mode.compute_on_add() {
            self.refresh_statistics();
        }
    }

    /// Corpusから統計を再計算する
    pub fn refresh_statistics(&mut self) {
        self.statistics = TermStatistics::from_corpus(&self.corpus);
        tracing::debug!(
            docs = self.statistics.total_documents,
            vocab = self.statistics.document_frequency.len(),
            generation = self.statistics.generation,
            "term statistics refreshed"
        );
    }

    /// Corpusに変更があれば統計を再計算する
    pub fn update_statistics(&mut self) {
        if self.statistics.is_stale(&self.corpus) {
            self.refresh_statistics();
        }
        // 更新がなければ何もしない
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        self.statistics.is_stale(&self.corpus)
    }

    #[inline]
    pub fn corpus(&self) -> &Corpus<K> {
        &self.corpus
    }

    #[inline]
    pub fn statistics(&self) -> &TermStatistics {
        &self.statistics
    }

    pub fn doc_num(&self) -> usize {
        self.corpus.len()
    }

    pub fn contains_doc(&self, key: &K) -> bool {
        self.corpus.contains_key(key)
    }

    /// Term frequency of `term` in document `key` (0 for an unknown key)
    pub fn tf(&self, key: &K, term: &str) -> f64 {
        self.corpus.get(key).map_or(0.0, |doc| E::tf(doc, term))
    }

    /// IDF of `term` as of the last recomputation
    pub fn idf(&self, term: &str) -> f64 {
        E::idf(&self.statistics, term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eager_mode_refreshes_on_add() {
        let mut engine: TfIdf = TfIdf::new();
        engine.add_document("a".to_string(), &["x", "y"]);
        assert!(!engine.is_stale());
        assert_eq!(engine.statistics().total_documents, 1);
        engine.add_document("b".to_string(), &["x"]);
        assert_eq!(engine.statistics().document_frequency("x"), 2);
    }

    #[test]
    fn lazy_mode_defers_refresh() {
        let mut engine: TfIdf = TfIdf::with_mode(ComputeMode::Lazy);
        engine.add_document("a".to_string(), &["x", "y"]);
        assert!(engine.is_stale());
        assert_eq!(engine.statistics().total_documents, 0);

        engine.update_statistics();
        assert!(!engine.is_stale());
        assert_eq!(engine.statistics().total_documents, 1);
    }

    #[test]
    fn setter_does_not_refresh() {
        let mut engine: TfIdf = TfIdf::new();
        engine.set_compute_on_add(false);
        assert_eq!(engine.compute_mode(), ComputeMode::Lazy);
        engine.add_document("a".to_string(), &["x"]);
        engine.set_compute_on_add(true);
        assert_eq!(engine.compute_mode(), ComputeMode::Eager);
        assert!(engine.is_stale());
    }

    #[test]
    fn refresh_twice_is_identical() {
        let mut engine: TfIdf = TfIdf::with_mode(ComputeMode::Lazy);
        engine.add_document("a".to_string(), &["x", "y", "x"]);
        engine.add_document("b".to_string(), &["y", "z"]);
        engine.refresh_statistics();
        let first = engine.statistics().clone();
        engine.refresh_statistics();
        assert_eq!(&first, engine.statistics());
    }

    #[test]
    fn tf_and_idf_accessors() {
        let mut engine: TfIdf<u32> = TfIdf::new();
        engine.add_document(1, &["x", "y", "x", "x"]);
        engine.add_document(2, &["y"]);
        assert_eq!(engine.tf(&1, "x"), 0.75);
        assert_eq!(engine.tf(&3, "x"), 0.0);
        assert_eq!(engine.idf("y"), 0.0);
        assert!((engine.idf("x") - 2f64.ln()).abs() < 1e-12);
        assert!(engine.contains_doc(&2));
        assert_eq!(engine.doc_num(), 2);
    }
}
