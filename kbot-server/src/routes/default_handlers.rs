use headers::{AccessControlAllowOrigin, HeaderMapExt};
use hyper::{Body, Response, StatusCode};
use routerify::RouteError;

use crate::error::KbotError;
use crate::helpers::{KbotRequest, KbotResponse};
use crate::responders::json_response;

pub async fn handle_404(_req: KbotRequest) -> KbotResponse {
    json_response(StatusCode::NOT_FOUND, "No route matched for path.")
}

/// Lets the chat page be served from any origin.
pub async fn allow_any_origin(mut res: Response<Body>) -> KbotResponse {
    res.headers_mut().typed_insert(AccessControlAllowOrigin::ANY);
    Ok(res)
}

pub async fn error_handler(err: RouteError) -> Response<Body> {
    let (status, message) = match err.downcast::<KbotError>() {
        Ok(err) => (err.status(), err.to_string()),
        Err(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    };

    if status.is_server_error() {
        error!("failed to handle request: {}", &message);
    } else {
        warn!("rejected request: {}", &message);
    }

    match json_response(status, &message) {
        Ok(resp) => resp,
        Err(e) => {
            error!("failed to build error response: {}", e);

            let mut resp = Response::new(Body::empty());
            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            resp
        },
    }
}
