use chatbot::render_reply;
use hyper::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::helpers::{state, KbotRequest, KbotResponse};
use crate::json;
use crate::responders::json_response;
use crate::state::State;

#[derive(Deserialize)]
struct MessagePayload {
    message: String,
}

#[derive(Serialize)]
struct ReplyPayload {
    message: String,
}

#[derive(Serialize)]
struct CorrectionPayload {
    corrected: String,
}

/// Corrects the user's message and answers it.
pub async fn predict(mut req: KbotRequest) -> KbotResponse {
    let payload: MessagePayload = json!(req.body_mut());
    let state = state(&req)?;

    if state.log_chat {
        info!("user message: {}", &payload.message);
    }

    let corrected = correct_message(state, payload.message).await?;
    if state.log_chat {
        info!("corrected message: {}", &corrected);
    }

    let reply = render_reply(&state.bot.get_response(&corrected));
    if state.log_chat {
        info!("bot reply: {}", &reply);
    }

    json_response(StatusCode::OK, &ReplyPayload { message: reply })
}

/// Corrects the user's message without answering it.
pub async fn correct(mut req: KbotRequest) -> KbotResponse {
    let payload: MessagePayload = json!(req.body_mut());
    let state = state(&req)?;

    let corrected = correct_message(state, payload.message).await?;

    json_response(StatusCode::OK, &CorrectionPayload { corrected })
}

async fn correct_message(state: &State, message: String) -> Result<String> {
    let model = state.corrections.load();
    let corrected = state
        .pool
        .spawn(move || model.correct_message(&message))
        .await?;

    Ok(corrected)
}
