use std::fmt::Write as _;

use countdown_core::FrameSpec;
use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, ExtendedColorType, Frame, ImageEncoder, RgbaImage};

use crate::error::RenderError;
use crate::style::{Gradient, RenderStyle};

/// Zero-pads a value to at least two digits. Wider values are kept whole.
#[must_use]
pub fn pad2(value: u64) -> String {
    format!("{value:02}")
}

/// Encodes frames as a GIF that loops forever, each shown for `delay_ms`.
///
/// `speed` trades palette quality for encoding time (1 is slowest and best,
/// 30 fastest).
///
/// # Errors
/// Returns [`RenderError::EmptyAnimation`] for an empty frame list, or
/// [`RenderError::Image`] if the encoder fails.
pub fn encode_gif(
    frames: Vec<RgbaImage>,
    delay_ms: u32,
    speed: i32,
) -> Result<Vec<u8>, RenderError> {
    if frames.is_empty() {
        return Err(RenderError::EmptyAnimation);
    }

    let frame_count = frames.len();
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    let mut bytes = Vec::new();

    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, speed.clamp(1, 30));
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(
            frames
                .into_iter()
                .map(|buffer| Frame::from_parts(buffer, 0, 0, delay)),
        )?;
    }

    tracing::debug!(frame_count, size = bytes.len(), "encoded gif");
    Ok(bytes)
}

/// Encodes a single frame as PNG.
///
/// # Errors
/// Returns [`RenderError::Image`] if the encoder fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;

    tracing::debug!(size = bytes.len(), "encoded png");
    Ok(bytes)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn gradient_defs(gradient: Gradient) -> String {
    format!(
        r#"<defs><linearGradient id="bg" x1="0%" y1="0%" x2="100%" y2="0%"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient></defs>"#,
        gradient.start.css(),
        gradient.end.css()
    )
}

/// Renders a frame as SVG markup: the same boxes and labels as the raster
/// output, or the expired message.
#[must_use]
pub fn render_svg(frame: &FrameSpec, style: &RenderStyle) -> String {
    let (width, height) = (style.width, style.height);
    let text = style.text_color.css();
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );

    let Some(time) = frame.time else {
        // writing into a String cannot fail
        let _ = write!(
            svg,
            r#"{}<rect width="{width}" height="{height}" fill="url(#bg)"/><text x="{}" y="{}" fill="{text}" font-family="Arial, sans-serif" font-weight="bold" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text></svg>"#,
            gradient_defs(style.expired_background),
            width / 2,
            height / 2,
            style.message_size,
            escape_xml(&style.expired_message),
        );
        return svg;
    };

    let _ = write!(
        svg,
        r#"{}<rect width="{width}" height="{height}" fill="url(#bg)"/>"#,
        gradient_defs(style.countdown_background)
    );

    let top = i64::from(style.box_top);
    let fill = style.box_fill.css();

    for (slot, (unit, value)) in (0_i64..).zip(time.units()) {
        let left = style.boxes_left() + slot * i64::from(style.box_width + style.box_gap);
        let center_x = left + i64::from(style.box_width / 2);

        let _ = write!(
            svg,
            r#"<rect x="{left}" y="{top}" width="{}" height="{}" fill="{fill}"/><text x="{center_x}" y="{}" fill="{text}" font-family="Arial, sans-serif" font-weight="bold" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text><text x="{center_x}" y="{}" fill="{text}" font-family="Arial, sans-serif" font-weight="bold" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            style.box_width,
            style.box_height,
            top + i64::from(style.number_center),
            style.number_size,
            pad2(value),
            top + i64::from(style.label_center),
            style.label_size,
            escape_xml(style.labels.for_unit(unit)),
        );
    }

    svg.push_str("</svg>");
    svg
}
