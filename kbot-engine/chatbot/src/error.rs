use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("the responses file {path:?} could not be read: {source}")]
    ResponsesUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("the responses file {path:?} is not a valid JSON object of strings: {source}")]
    InvalidResponses {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
