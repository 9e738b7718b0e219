use anyhow::Error;
use hyper::StatusCode;
use serde::Serialize;

use crate::helpers::{state, KbotRequest, KbotResponse};
use crate::responders::json_response;

#[derive(Serialize)]
struct ReloadPayload {
    unique_words: usize,
}

/// Rebuilds the spell correction model from the configured corpus.
pub async fn reload(req: KbotRequest) -> KbotResponse {
    let state = state(&req)?;
    let corrections = state.corrections.clone();
    let path = state.corpus_path.clone();

    info!("reloading corpus from {}", path.display());
    let unique_words =
        tokio::task::spawn_blocking(move || corrections.reload_from_path(path.as_path()))
            .await
            .map_err(Error::from)??;

    json_response(StatusCode::OK, &ReloadPayload { unique_words })
}
