use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use rayon::prelude::*;

use crate::vectorizer::{tfidf::TfIdfEngine, TfIdf};

/// Structure to store scoring results
pub struct Hits<K> {
    /// (Document key, Score)
    pub list: Vec<(K, f64)>,
}

impl<K> Hits<K> {
    /// Create a new Hits instance
    pub fn new(list: Vec<(K, f64)>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score
    /// Stable: equal scores keep their current relative order.
    pub fn sort_by_score_desc(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| b.1.total_cmp(&a.1));
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Best hit, if any
    pub fn top(&self) -> Option<&(K, f64)> {
        self.list.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, f64)> {
        self.list.iter()
    }

    /// Score of `key`, if it is part of the results
    pub fn score_of(&self, key: &K) -> Option<f64>
    where
        K: PartialEq,
    {
        self.list.iter().find(|(k, _)| k == key).map(|(_, s)| *s)
    }

    pub fn into_vec(self) -> Vec<(K, f64)> {
        self.list
    }
}

impl<K> IntoIterator for Hits<K> {
    type Item = (K, f64);
    type IntoIter = std::vec::IntoIter<(K, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Hits [")?;
            for (key, score) in &self.list {
                writeln!(f, "    {:?}: {:.6}", key, score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

impl<K> Display for Hits<K>
where
    K: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, (key, score)) in self.list.iter().enumerate() {
            writeln!(f, "{:>3}. {}: {:.6}", rank + 1, key, score)?;
        }
        Ok(())
    }
}

impl<K, E> TfIdf<K, E>
where
    K: Clone + Eq + Hash + Send + Sync,
    E: TfIdfEngine,
{
    /// Score `query` against every stored document.
    ///
    /// Lazy mode always recomputes the statistics first; eager mode
    /// recomputes only if documents were added since the last refresh.
    /// Each query term counts once per occurrence. The result is sorted by
    /// descending score; ties keep document insertion order.
    pub fn score_document<T>(&mut self, query: &[T]) -> Hits<K>
    where
        T: AsRef<str>,
    {
        if self.mode.compute_on_add() {
            self.update_statistics();
        } else {
            self.refresh_statistics();
        }
        self.score_document_unchecked(query)
    }

    /// Same as `score_document` but uses the statistics as they stand.
    /// Call `update_statistics()` first if documents were added in lazy mode.
    pub fn score_document_unchecked<T>(&self, query: &[T]) -> Hits<K>
    where
        T: AsRef<str>,
    {
        let idf: Vec<(&str, f64)> = query
            .iter()
            .map(|t| {
                let term = t.as_ref();
                (term, E::idf(&self.statistics, term))
            })
            .collect();

        // indexed par_iter collects in document order
        let list: Vec<(K, f64)> = self
            .corpus
            .documents()
            .par_iter()
            .map(|(key, doc)| {
                let score = idf
                    .iter()
                    .map(|&(term, weight)| if weight == 0.0 { 0.0 } else { E::tf(doc, term) * weight })
                    .fold(0.0, |acc, s| acc + s);
                (key.clone(), score)
            })
            .collect();

        let mut hits = Hits::new(list);
        hits.sort_by_score_desc();
        hits
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ComputeMode;
    use crate::vectorizer::TfIdf;

    fn articles(mode: ComputeMode) -> TfIdf {
        let mut engine = TfIdf::with_mode(mode);
        engine.add_document("Article1".to_string(), &["i", "love", "cats"]);
        engine.add_document("Article2".to_string(), &["i", "love", "cake"]);
        engine.add_document("Article3".to_string(), &["cats", "love", "cake"]);
        engine
    }

    fn keys(hits: &super::Hits<String>) -> Vec<&str> {
        hits.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn articles_ranking() {
        let mut engine = articles(ComputeMode::Eager);
        let hits = engine.score_document(&["you", "love", "cats", "and", "cake"]);

        assert_eq!(hits.len(), 3);
        assert_eq!(hits.top().unwrap().0, "Article3");
        let s1 = hits.score_of(&"Article1".to_string()).unwrap();
        let s2 = hits.score_of(&"Article2".to_string()).unwrap();
        let s3 = hits.score_of(&"Article3".to_string()).unwrap();
        assert_eq!(s1, s2);
        assert!(s3 > s1);

        let idf = (3.0f64 / 2.0).ln();
        assert!((s1 - idf / 3.0).abs() < 1e-12);
        assert!((s3 - 2.0 * idf / 3.0).abs() < 1e-12);
        assert_eq!(keys(&hits), vec!["Article3", "Article1", "Article2"]);
    }

    #[test]
    fn lazy_matches_eager() {
        let query = ["i", "cats", "cats", "cake"];
        let eager = articles(ComputeMode::Eager).score_document(&query).into_vec();
        let lazy = articles(ComputeMode::Lazy).score_document(&query).into_vec();
        assert_eq!(eager, lazy);
    }

    #[test]
    fn empty_query_keeps_insertion_order() {
        let mut engine = articles(ComputeMode::Eager);
        let nothing: [&str; 0] = [];
        let hits = engine.score_document(&nothing);
        assert_eq!(keys(&hits), vec!["Article1", "Article2", "Article3"]);
        assert!(hits.iter().all(|(_, s)| *s == 0.0));
        assert!(hits.iter().all(|(_, s)| s.is_sign_positive()));
        assert!(!hits.to_string().contains('-'));
    }

    #[test]
    fn empty_corpus_gives_no_hits() {
        let mut engine: TfIdf = TfIdf::new();
        assert!(engine.score_document(&["anything"]).is_empty());
    }

    #[test]
    fn repeated_query_terms_count_per_occurrence() {
        let mut engine = articles(ComputeMode::Eager);
        let once = engine.score_document(&["cats"]).score_of(&"Article1".to_string()).unwrap();
        let twice = engine.score_document(&["cats", "cats"]).score_of(&"Article1".to_string()).unwrap();
        assert!(once > 0.0);
        assert!((twice - 2.0 * once).abs() < 1e-12);
    }

    #[test]
    fn term_in_every_document_contributes_nothing() {
        let mut engine = articles(ComputeMode::Eager);
        let hits = engine.score_document(&["love", "love", "love"]);
        assert!(hits.iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn empty_document_scores_zero() {
        let mut engine = articles(ComputeMode::Eager);
        let nothing: [&str; 0] = [];
        engine.add_document("Empty".to_string(), &nothing);
        let hits = engine.score_document(&["cats", "cake", "i"]);
        assert_eq!(hits.score_of(&"Empty".to_string()), Some(0.0));
        assert_eq!(hits.list.last().unwrap().0, "Empty");
    }

    #[test]
    fn lazy_then_eager_still_fresh() {
        let mut engine: TfIdf = TfIdf::with_mode(ComputeMode::Lazy);
        engine.add_document("a".to_string(), &["x", "y"]);
        engine.add_document("b".to_string(), &["y"]);
        engine.set_compute_on_add(true);
        let hits = engine.score_document(&["x"]);
        assert_eq!(hits.top().unwrap().0, "a");
        assert!(hits.top().unwrap().1 > 0.0);
    }

    #[test]
    fn unchecked_scoring_uses_cached_statistics() {
        let mut engine: TfIdf = TfIdf::with_mode(ComputeMode::Lazy);
        engine.add_document("a".to_string(), &["x"]);
        engine.add_document("b".to_string(), &["y"]);
        let stale = engine.score_document_unchecked(&["x"]);
        assert!(stale.iter().all(|(_, s)| *s == 0.0));
        engine.update_statistics();
        let fresh = engine.score_document_unchecked(&["x"]);
        assert!(fresh.top().unwrap().1 > 0.0);
    }

    #[test]
    fn lazy_mode_rescans_even_when_generation_matches() {
        let mut engine: TfIdf = TfIdf::new();
        engine.add_document("a".to_string(), &["x"]);
        engine.add_document("b".to_string(), &["y"]);
        engine.statistics.document_frequency.insert("x".to_string(), 7);
        engine.statistics.total_documents = 1;
        engine.set_compute_on_add(false);

        let hits = engine.score_document(&["x"]).into_vec();
        assert_eq!(hits, vec![("a".to_string(), 2f64.ln()), ("b".to_string(), 0.0)]);
        assert_eq!(engine.statistics().document_frequency("x"), 1);
    }

    #[test]
    fn non_string_keys_score() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TfIdf<u64>>();

        let mut engine: TfIdf<u64> = TfIdf::new();
        engine.add_document(7, &["x"]);
        engine.add_document(9, &["y"]);
        assert_eq!(engine.score_document(&["y"]).top().unwrap().0, 9);
    }

    #[test]
    fn display_lists_ranks() {
        let mut engine = articles(ComputeMode::Eager);
        let hits = engine.score_document(&["cats"]);
        let text = hits.to_string();
        assert!(text.starts_with("  1. Article"));
        assert_eq!(text.lines().count(), 3);
    }
}
