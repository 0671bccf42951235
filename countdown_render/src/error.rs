use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("an animation needs at least one frame")]
    EmptyAnimation,
}
