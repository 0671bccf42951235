use std::sync::Arc;

use axum::{extract::State, response::Response};
use countdown_core::still_frame;
use countdown_render::encode_png;

use super::{IMAGE_PNG, image_response};
use crate::{context::AppContext, error::ApiError};

#[tracing::instrument(skip(ctx))]
pub async fn handler(State(ctx): State<Arc<AppContext>>) -> Result<Response, ApiError> {
    let remaining = ctx.remaining();
    tracing::info!(remaining, "rendering countdown png");

    let bytes = tokio::task::spawn_blocking(move || {
        let image = ctx.renderer.render_frame(&still_frame(remaining), 1.0);
        encode_png(&image)
    })
    .await??;

    Ok(image_response(IMAGE_PNG, bytes))
}
