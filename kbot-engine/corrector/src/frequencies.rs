use hashbrown::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("compile word pattern"));

/// Extracts every maximal run of word characters from the given text,
/// lowercased.
///
/// Anything that is not a word character (punctuation, whitespace) is
/// treated as a separator and discarded.
pub fn extract_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub trait FrequencyCounter {
    fn process_sentence(&mut self, sentence: &str);

    fn register(&mut self, k: String);

    fn get_count(&self, k: &str) -> u32;

    fn counts(&self) -> &HashMap<String, u32>;
}

/// A word -> occurrence count table built from a corpus.
///
/// The total number of registered words is tracked alongside the counts
/// so it never has to be recomputed when estimating probabilities.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    inner: HashMap<String, u32>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: HashMap::with_capacity(capacity),
            total: 0,
        }
    }

    /// Builds a table by counting every word in the given corpus text.
    pub fn from_corpus(text: &str) -> Self {
        let mut table = Self::new();
        table.process_sentence(text);
        table
    }

    /// The sum of every count in the table.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The number of unique words in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.inner.contains_key(word)
    }
}

impl FrequencyCounter for FrequencyTable {
    fn process_sentence(&mut self, sentence: &str) {
        for word in extract_words(sentence) {
            self.register(word);
        }
    }

    fn register(&mut self, k: String) {
        *self.inner.entry(k).or_insert(0) += 1;
        self.total += 1;
    }

    fn get_count(&self, k: &str) -> u32 {
        self.inner.get(k).copied().unwrap_or(0u32)
    }

    fn counts(&self) -> &HashMap<String, u32> {
        &self.inner
    }
}
