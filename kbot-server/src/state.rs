use std::path::PathBuf;
use std::sync::Arc;

use chatbot::{Bot, ExactMatchResponder};
use corrector::SharedCorrectionManager;
use executor::SharedExecutorPool;

#[derive(Clone)]
pub struct State {
    pub log_chat: bool,
    pub corpus_path: Arc<PathBuf>,
    pub corrections: SharedCorrectionManager,
    pub bot: Arc<Bot<ExactMatchResponder>>,
    pub pool: SharedExecutorPool,
}

impl State {
    pub fn new(
        corpus_path: PathBuf,
        corrections: SharedCorrectionManager,
        bot: Bot<ExactMatchResponder>,
        pool: SharedExecutorPool,
        log_chat: bool,
    ) -> Self {
        Self {
            log_chat,
            corpus_path: Arc::new(corpus_path),
            corrections,
            bot: Arc::new(bot),
            pool,
        }
    }
}
