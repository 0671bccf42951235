use std::sync::Arc;

use axum::{extract::State, response::Response};
use countdown_core::{AnimationMode, generate_frames};
use countdown_render::encode_gif;

use super::{IMAGE_GIF, image_response};
use crate::{context::AppContext, error::ApiError};

/// Animated countdown. While counting down, the configured policy decides
/// whether frames hold the time and only pulse, or tick down one second per
/// frame with a fixed one-second delay. Once the target has passed, an "event is live" loop is served
/// instead.
///
/// Email clients cache and replay a GIF indefinitely, so a ticking
/// animation is only accurate at the moment it was generated.
#[tracing::instrument(skip(ctx))]
pub async fn handler(State(ctx): State<Arc<AppContext>>) -> Result<Response, ApiError> {
    let remaining = ctx.remaining();
    let mode = AnimationMode::select(remaining, ctx.config.countdown_policy);

    let bytes = tokio::task::spawn_blocking(move || render(&ctx, remaining, mode)).await??;

    Ok(image_response(IMAGE_GIF, bytes))
}

fn render(
    ctx: &AppContext,
    remaining: i64,
    mode: AnimationMode,
) -> Result<Vec<u8>, countdown_render::RenderError> {
    let frame_count = if mode.is_expired() {
        ctx.config.expired_frame_count
    } else {
        ctx.config.frame_count
    };

    tracing::info!(remaining, ?mode, frame_count, "rendering countdown gif");

    let frames = generate_frames(remaining, frame_count, mode);
    let images = ctx.renderer.render_sequence(&frames);

    encode_gif(
        images,
        mode.frame_delay_ms(ctx.config.frame_delay_ms),
        ctx.config.gif_speed,
    )
}
