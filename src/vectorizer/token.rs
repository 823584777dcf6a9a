use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency 構造体
/// Keeps the occurrence count of every term of one document and the total
/// number of term occurrences.
///
/// The total is maintained on every insertion and never recomputed on read,
/// so `term_sum() == Σ term_count(t)` holds at all times.
///
/// # Examples
/// ```
/// use tf_idf_corpus::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["cats", "love", "cats"]);
///
/// assert_eq!(freq.term_count("cats"), 2);
/// assert_eq!(freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Termの追加
impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// termを追加する
    ///
    /// # Arguments
    /// * `term` - 追加するterm
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// 複数のtermを追加する
    /// Every occurrence counts, repeats included.
    ///
    /// # Arguments
    /// * `terms` - 追加するtermのスライス
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Accumulate the counts of `other` into `self`.
    /// Counts are only ever added, never reset.
    pub fn merge(&mut self, other: &TermFrequency) -> &mut Self {
        for (term, &count) in other.term_count.iter() {
            if let Some(existing) = self.term_count.get_mut(term.as_str()) {
                *existing += count;
            } else {
                self.term_count.insert(term.clone(), count);
            }
        }
        self.total_term_count += other.total_term_count;
        self
    }
}

/// 参照系
impl TermFrequency {
    /// 特定のtermの出現回数 (存在しなければ0)
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// 全termの出現回数の合計
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// ユニークなtermの数
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_term_count == 0
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Terms in first-seen order.
    #[inline]
    pub fn term_set(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|t| t.as_str())
    }

    /// (term, count) pairs in first-seen order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Raw term frequency `count / term_sum`.
    /// An empty document yields 0.0 for every term.
    #[inline]
    pub fn tf(&self, term: &str) -> f64 {
        if self.total_term_count == 0 {
            return 0.0;
        }
        self.term_count(term) as f64 / self.total_term_count as f64
    }

    /// Sum of the stored counts, recomputed from the map.
    /// Used to check the snapshot invariant on load.
    pub(crate) fn recount(&self) -> u64 {
        self.term_count.values().sum()
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut freq = TermFrequency::new();
        freq.add_terms(terms);
        freq
    }
}
