use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::path::Path;

use hashbrown::HashSet;

use crate::edits::{edits1, edits2};
use crate::error::CorrectorError;
use crate::frequencies::{FrequencyCounter, FrequencyTable};

/// A frequency based spelling corrector.
///
/// Every query picks the most frequent known word within the smallest
/// edit distance (0, 1 or 2) that produces any known word at all, falling
/// back to the input unchanged.
///
/// The model is never mutated after construction so a single instance
/// can be shared between any number of threads.
#[derive(Clone)]
pub struct Corrector {
    table: FrequencyTable,
}

impl Corrector {
    pub fn new(table: FrequencyTable) -> Self {
        Self { table }
    }

    /// Builds the model from the given corpus text.
    #[instrument(name = "corpus-ingestion", skip_all)]
    pub fn from_corpus(text: &str) -> Self {
        let table = FrequencyTable::from_corpus(text);
        info!(
            unique_words = table.len(),
            total_words = table.total(),
            "frequency table built"
        );

        Self::new(table)
    }

    /// Reads the whole source and builds the model from it.
    ///
    /// `source_name` is only used to describe the source in errors.
    pub fn from_reader<R: Read>(mut reader: R, source_name: &str) -> Result<Self, CorrectorError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| CorrectorError::CorpusUnavailable {
                source_name: source_name.to_string(),
                source: e,
            })?;

        Ok(Self::from_corpus(&text))
    }

    /// Loads the corpus file at the given path and builds the model from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorrectorError> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        debug!("reading corpus from {}", &source_name);

        let file = std::fs::File::open(path)
            .map_err(|e| CorrectorError::CorpusUnavailable {
                source_name: source_name.clone(),
                source: e,
            })?;

        Self::from_reader(file, &source_name)
    }

    #[inline]
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// The probability of the word occurring in the corpus.
    ///
    /// Unknown words, and every word of an empty model, have a probability of 0.
    pub fn probability(&self, word: &str) -> f64 {
        self.probability_with_total(word, self.table.total())
    }

    /// The probability of the word using the given total as the denominator.
    pub fn probability_with_total(&self, word: &str, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }

        self.table.get_count(word) as f64 / total as f64
    }

    /// The subset of the given words which exist in the frequency table.
    pub fn known<I, S>(&self, words: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str> + Into<String>,
    {
        words
            .into_iter()
            .filter(|w| self.table.contains(w.as_ref()))
            .map(Into::into)
            .collect()
    }

    /// The set of candidate corrections for the word.
    ///
    /// Candidates are taken from the first of these that is not empty:
    /// the word itself if known, the known words one edit away, the known
    /// words two edits away and finally the word itself.
    pub fn candidates(&self, word: &str) -> HashSet<String> {
        if self.table.contains(word) {
            return singleton(word);
        }

        let known = self.known(edits1(word));
        if !known.is_empty() {
            return known;
        }

        let known = self.known(edits2(word));
        if !known.is_empty() {
            return known;
        }

        singleton(word)
    }

    /// The most probable correction for the word.
    ///
    /// Candidates with an equal probability are resolved by picking the
    /// lexicographically smallest one.
    pub fn correct(&self, word: &str) -> String {
        self.candidates(word)
            .into_iter()
            .max_by(|a, b| self.rank(a, b))
            .unwrap_or_else(|| word.to_string())
    }

    /// Corrects each whitespace separated token of the message on its own
    /// and joins the results back together with single spaces.
    ///
    /// Tokens are corrected exactly as written, attached punctuation and
    /// casing included.
    pub fn correct_message(&self, message: &str) -> String {
        message
            .split_whitespace()
            .map(|token| self.correct(token))
            .collect::<Vec<String>>()
            .join(" ")
    }

    // Counts share a denominator so they order the same way the
    // probabilities do, without any float rounding.
    fn rank(&self, a: &str, b: &str) -> Ordering {
        self.table
            .get_count(a)
            .cmp(&self.table.get_count(b))
            .then_with(|| b.cmp(a))
    }
}

impl Debug for Corrector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corrector")
            .field("unique_words", &self.table.len())
            .field("total_words", &self.table.total())
            .finish()
    }
}

fn singleton(word: &str) -> HashSet<String> {
    let mut set = HashSet::with_capacity(1);
    set.insert(word.to_string());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU_CORPUS: &str = "ayam goreng enak sekali. \
        Ayam bakar, ayam geprek; nasi uduk nasi kuning nasi goreng!";

    #[test]
    fn test_known_words_are_left_alone() {
        let corrector = Corrector::from_corpus(MENU_CORPUS);

        for word in corrector.table().counts().keys() {
            assert_eq!(&corrector.correct(word), word);
        }
    }

    #[test]
    fn test_probabilities_are_normalised() {
        let corrector = Corrector::from_corpus(MENU_CORPUS);

        let sum: f64 = corrector
            .table()
            .counts()
            .keys()
            .map(|w| corrector.probability(w))
            .sum();

        assert!((sum - 1.0).abs() < 1e-9, "probabilities summed to {}", sum);
        assert_eq!(corrector.probability("rendang"), 0.0);
        assert!((corrector.probability("ayam") - 3.0 / 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_probability_with_custom_total() {
        let corrector = Corrector::from_corpus("nasi nasi uduk");

        assert!((corrector.probability_with_total("nasi", 4) - 0.5).abs() < 1e-12);
        assert_eq!(corrector.probability_with_total("nasi", 0), 0.0);
    }

    #[test]
    fn test_single_deletion_is_corrected() {
        let corrector = Corrector::from_corpus("ayam goreng enak sekali");

        assert_eq!(corrector.correct("goreg"), "goreng");
        assert_eq!(corrector.correct("sekli"), "sekali");
    }

    #[test]
    fn test_two_edit_corrections() {
        let corrector = Corrector::from_corpus("ayam goreng enak sekali");

        assert_eq!(corrector.correct("gorg"), "goreng");
        assert_eq!(corrector.correct("Goreg"), "goreng");
    }

    #[test]
    fn test_distance_one_beats_more_frequent_distance_two() {
        // "cat" is one edit away from "cot", "coast" is two away but far
        // more frequent.
        let corpus = "cat coast coast coast coast coast coast";
        let corrector = Corrector::from_corpus(corpus);

        assert!(!corrector.table().contains("cot"));
        assert_eq!(corrector.candidates("cot"), singleton("cat"));
        assert_eq!(corrector.correct("cot"), "cat");
    }

    #[test]
    fn test_highest_frequency_wins() {
        let corrector = Corrector::from_corpus("bat bat bat cat hat hat");

        assert_eq!(corrector.correct("zat"), "bat");
    }

    #[test]
    fn test_ties_pick_the_smallest_word() {
        let corrector = Corrector::from_corpus("hat cat bat");

        let candidates = corrector.candidates("zat");
        assert_eq!(candidates.len(), 3);
        assert_eq!(corrector.correct("zat"), "bat");
    }

    #[test]
    fn test_unknown_words_fall_through() {
        let corrector = Corrector::from_corpus("ayam goreng enak sekali");

        assert_eq!(corrector.correct("xyzzyq"), "xyzzyq");
        assert_eq!(corrector.correct("12345"), "12345");
    }

    #[test]
    fn test_empty_model() {
        let corrector = Corrector::from_corpus("");

        assert_eq!(corrector.probability("anything"), 0.0);
        assert_eq!(corrector.correct("anything"), "anything");
        assert_eq!(corrector.correct(""), "");
    }

    #[test]
    fn test_empty_word_is_returned_unchanged() {
        let corrector = Corrector::from_corpus("nasi uduk");

        assert_eq!(corrector.correct(""), "");
    }

    #[test]
    fn test_short_word_may_be_reached_from_empty() {
        let corrector = Corrector::from_corpus("a nasi");

        assert_eq!(corrector.correct(""), "a");
    }

    #[test]
    fn test_message_correction() {
        let corrector = Corrector::from_corpus("ayam goreng enak sekali");

        assert_eq!(
            corrector.correct_message("  ayam   goreg\tenk  sekali "),
            "ayam goreng enak sekali",
        );
        assert_eq!(corrector.correct_message("   "), "");
    }

    #[test]
    fn test_punctuation_on_the_query_path_is_kept() {
        let corrector = Corrector::from_corpus("nasi uduk");

        // one edit away from "uduk" by deleting the '!', which is
        // allowed as it's a delete.
        assert_eq!(corrector.correct("uduk!"), "uduk");
        assert_eq!(corrector.correct("?!?!?!"), "?!?!?!");
    }
}
