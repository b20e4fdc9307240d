use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::generator::TextGenerator;
use crate::proxy::CopilotProxy;

pub const COPILOT_ROUTE: &str = "/api/ai/copilot";

/// HTTP surface for the copilot proxy
pub fn router<G: TextGenerator + 'static>(proxy: Arc<CopilotProxy<G>>) -> Router {
    Router::new()
        .route(COPILOT_ROUTE, post(copilot_handler::<G>))
        .layer(CorsLayer::permissive())
        .with_state(proxy)
}

async fn copilot_handler<G: TextGenerator + 'static>(
    State(proxy): State<Arc<CopilotProxy<G>>>,
    body: Bytes,
) -> Response {
    // A client disconnect drops this future, and the upstream call with it.
    // The token only serves callers that cancel explicitly.
    match proxy.handle(&body, CancellationToken::new()).await {
        Ok(result) => {
            debug!(model = %result.model, chars = result.text.len(), "copilot completion served");
            Json(result).into_response()
        }
        Err(e) => e.into_response(),
    }
}
