use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use countdown_render::RenderError;
use thiserror::Error;

/// Anything that goes wrong while producing an image. Every variant becomes
/// a plain-text 500; images are fully buffered before the response starts,
/// so the client never sees a truncated body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("failed to generate image: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Error generating image",
        )
            .into_response()
    }
}
