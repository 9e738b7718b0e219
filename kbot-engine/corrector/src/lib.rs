#[macro_use]
extern crate tracing;

mod corrector;
mod edits;
mod error;
mod frequencies;
mod manager;

pub use corrector::Corrector;
pub use edits::{edits1, edits2, LETTERS};
pub use error::CorrectorError;
pub use frequencies::{extract_words, FrequencyCounter, FrequencyTable};
pub use manager::{CorrectionManager, SharedCorrectionManager};
