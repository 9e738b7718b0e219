mod chat;
mod corpus;
mod default_handlers;

use anyhow::{anyhow, Result};
use hyper::Body;
use routerify::{Middleware, Router};

use crate::error::KbotError;
use crate::state::State;

pub fn get_router(state: State) -> Result<Router<Body, KbotError>> {
    Router::builder()
        .data(state)
        .middleware(Middleware::post(default_handlers::allow_any_origin))
        .post("/predict", chat::predict)
        .post("/correct", chat::correct)
        .post("/corpus/reload", corpus::reload)
        .any(default_handlers::handle_404)
        .err_handler(default_handlers::error_handler)
        .build()
        .map_err(|e| anyhow!("failed to build router: {}", e))
}
