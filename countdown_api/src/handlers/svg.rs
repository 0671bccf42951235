use std::sync::Arc;

use axum::{extract::State, response::Response};
use countdown_core::still_frame;
use countdown_render::render_svg;

use super::{IMAGE_SVG, image_response};
use crate::context::AppContext;

#[tracing::instrument(skip(ctx))]
pub async fn handler(State(ctx): State<Arc<AppContext>>) -> Response {
    let remaining = ctx.remaining();
    tracing::info!(remaining, "rendering countdown svg");

    let svg = render_svg(&still_frame(remaining), ctx.renderer.style());

    image_response(IMAGE_SVG, svg)
}
