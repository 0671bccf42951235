//! Turns [`countdown_core::FrameSpec`]s into pixels and bytes.
//!
//! [`Renderer`] draws one frame at a time onto an [`image::RgbaImage`];
//! the functions in [`encode`] serialize finished frames into GIF, PNG or
//! SVG. Every encoder returns a fully buffered `Vec<u8>`/`String` so callers
//! can still turn a failure into a clean error response.

mod canvas;
pub mod encode;
mod error;
mod font;
pub mod renderer;
pub mod style;

pub use encode::{encode_gif, encode_png, pad2, render_svg};
pub use error::RenderError;
pub use renderer::Renderer;
pub use style::{Color, Gradient, Labels, Pulse, RenderStyle, ShadowStyle};
