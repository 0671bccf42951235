pub mod gif;
pub mod health;
pub mod png;
pub mod svg;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub const IMAGE_GIF: &str = "image/gif";
pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_SVG: &str = "image/svg+xml";

/// A 200 response carrying a finished image, with caching disabled so every
/// fetch shows the current time.
pub fn image_response(content_type: &'static str, body: impl IntoResponse) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        body,
    )
        .into_response()
}
