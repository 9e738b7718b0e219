use std::fmt::{Debug, Formatter};
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::corrector::Corrector;
use crate::error::CorrectorError;

pub type SharedCorrectionManager = Arc<CorrectionManager>;

/// The manager around the active spell correction model.
///
/// Queries load whichever model is current at the time, retraining
/// builds a fresh model and swaps it in so a published model is never
/// mutated.
pub struct CorrectionManager {
    model: ArcSwap<Corrector>,
}

impl CorrectionManager {
    pub fn new(corrector: Corrector) -> Self {
        Self {
            model: ArcSwap::from_pointee(corrector),
        }
    }

    /// The model currently in use.
    #[inline]
    pub fn load(&self) -> Arc<Corrector> {
        self.model.load_full()
    }

    /// Corrects a single word with the current model.
    pub fn correct(&self, word: &str) -> String {
        self.model.load().correct(word)
    }

    /// Corrects every token of the message with the current model.
    pub fn correct_message(&self, message: &str) -> String {
        self.model.load().correct_message(message)
    }

    /// Replaces the current model.
    ///
    /// Anything that already loaded the old model keeps using it until
    /// it's dropped.
    #[instrument(name = "spell-correction", skip_all, fields(unique_words = corrector.table().len()))]
    pub fn adjust_model(&self, corrector: Corrector) {
        info!("adjusting spell correction system to new frequency count");
        self.model.store(Arc::new(corrector))
    }

    /// Rebuilds the model from the corpus file at the given path and
    /// swaps it in, returning the new number of unique words.
    ///
    /// If the corpus can't be read the current model is left in place.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> Result<usize, CorrectorError> {
        let corrector = Corrector::from_path(path)?;
        let unique_words = corrector.table().len();
        self.adjust_model(corrector);

        Ok(unique_words)
    }
}

impl Debug for CorrectionManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CorrectionManager")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusting_the_model() {
        let manager = CorrectionManager::new(Corrector::from_corpus("ayam goreng"));
        let old = manager.load();

        assert_eq!(manager.correct("bakr"), "bakr");

        manager.adjust_model(Corrector::from_corpus("ayam bakar"));

        assert_eq!(manager.correct("bakr"), "bakar");
        assert_eq!(manager.correct_message("ayam bakr"), "ayam bakar");

        // the previously loaded model is untouched.
        assert_eq!(old.correct("bakr"), "bakr");
        assert!(old.table().contains("goreng"));
    }

    #[test]
    fn test_failed_reload_keeps_model() {
        let manager = CorrectionManager::new(Corrector::from_corpus("nasi uduk"));

        let res = manager.reload_from_path("./this/corpus/does/not/exist.txt");
        assert!(matches!(res, Err(CorrectorError::CorpusUnavailable { .. })));
        assert_eq!(manager.correct("udk"), "uduk");
    }
}
