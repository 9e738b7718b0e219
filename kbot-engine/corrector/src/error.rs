use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorrectorError {
    #[error("the corpus {source_name:?} could not be read: {source}")]
    CorpusUnavailable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
}
