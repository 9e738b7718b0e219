use anyhow::anyhow;
use hyper::{Body, Request, Response};
use routerify::ext::RequestExt;

use crate::error::{KbotError, Result};
use crate::state::State;

pub type KbotRequest = Request<Body>;
pub type KbotResponse = Result<Response<Body>>;

/// The shared server state attached to the router.
pub fn state(req: &KbotRequest) -> Result<&State> {
    req.data::<State>()
        .ok_or_else(|| KbotError::Other(anyhow!("server state missing from router")))
}

#[macro_export]
macro_rules! json {
    ($body:expr) => {{
        let body = hyper::body::to_bytes($body).await?;
        serde_json::from_slice(&body)?
    }}
}
