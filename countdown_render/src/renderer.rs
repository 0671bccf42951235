use countdown_core::{DecomposedTime, FrameSpec};
use image::RgbaImage;

use crate::canvas::Canvas;
use crate::encode::pad2;
use crate::style::RenderStyle;

/// Horizontal padding kept between text and the edges of its container.
const TEXT_INSET: u32 = 8;

/// Draws countdown frames according to a [`RenderStyle`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    #[must_use]
    pub const fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub const fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Renders every frame of an animation, applying the countdown or
    /// expired pulse according to each frame's index.
    #[must_use]
    pub fn render_sequence(&self, frames: &[FrameSpec]) -> Vec<RgbaImage> {
        frames
            .iter()
            .map(|frame| {
                let pulse = if frame.time.is_some() {
                    self.style.countdown_pulse
                } else {
                    self.style.expired_pulse
                };
                self.render_frame(frame, pulse.scale(frame.index))
            })
            .collect()
    }

    /// Renders a single frame. `scale` multiplies the number size (or the
    /// message size, for expired frames).
    #[must_use]
    pub fn render_frame(&self, frame: &FrameSpec, scale: f64) -> RgbaImage {
        let mut canvas = Canvas::new(self.style.width, self.style.height);

        match &frame.time {
            Some(time) => self.draw_countdown(&mut canvas, time, scale),
            None => self.draw_expired(&mut canvas, scale),
        }

        canvas.into_image()
    }

    fn draw_countdown(&self, canvas: &mut Canvas, time: &DecomposedTime, scale: f64) {
        let style = &self.style;
        canvas.fill_horizontal_gradient(style.countdown_background);

        let top = i64::from(style.box_top);
        let number_size = (style.number_size * scale).floor();
        let text_width = style.box_width.saturating_sub(TEXT_INSET);

        for (slot, (unit, value)) in (0_i64..).zip(time.units()) {
            let left = style.boxes_left() + slot * i64::from(style.box_width + style.box_gap);
            let center_x = left + i64::from(style.box_width / 2);

            if style.box_shadow {
                canvas.drop_shadow(left, top, style.box_width, style.box_height, &style.shadow);
            }
            canvas.fill_rect(left, top, style.box_width, style.box_height, style.box_fill);

            canvas.draw_text(
                &pad2(value),
                center_x,
                top + i64::from(style.number_center),
                number_size,
                text_width,
                style.text_color,
            );
            canvas.draw_text(
                style.labels.for_unit(unit),
                center_x,
                top + i64::from(style.label_center),
                style.label_size,
                text_width,
                style.text_color,
            );
        }
    }

    fn draw_expired(&self, canvas: &mut Canvas, scale: f64) {
        let style = &self.style;
        canvas.fill_horizontal_gradient(style.expired_background);
        canvas.draw_text(
            &style.expired_message,
            i64::from(style.width / 2),
            i64::from(style.height / 2),
            (style.message_size * scale).floor(),
            style.width.saturating_sub(TEXT_INSET * 2),
            style.text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_core::{AnimationMode, generate_frames, still_frame};
    use image::Rgba;

    #[test]
    fn test_frame_has_configured_dimensions() {
        let renderer = Renderer::default();
        let image = renderer.render_frame(&still_frame(3_600), 1.0);

        assert_eq!(image.dimensions(), (600, 150));
    }

    #[test]
    fn test_expired_and_countdown_use_different_backgrounds() {
        let renderer = Renderer::default();
        let countdown = renderer.render_frame(&still_frame(10), 1.0);
        let expired = renderer.render_frame(&still_frame(0), 1.0);

        assert_eq!(countdown.get_pixel(0, 0), &Rgba([0xFF, 0x6B, 0x6B, 0xFF]));
        assert_eq!(expired.get_pixel(0, 0), &Rgba([0x4C, 0xAF, 0x50, 0xFF]));
    }

    #[test]
    fn test_different_times_render_differently() {
        let renderer = Renderer::default();
        let a = renderer.render_frame(&still_frame(1), 1.0);
        let b = renderer.render_frame(&still_frame(2), 1.0);

        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_cosmetic_pulse_changes_pixels_not_time() {
        let renderer = Renderer::default();
        let frames = generate_frames(500, 10, AnimationMode::CosmeticLoop);
        let images = renderer.render_sequence(&frames);

        assert_eq!(images.len(), 10);
        assert_ne!(images[0].as_raw(), images[8].as_raw());
    }

    #[test]
    fn test_shadow_toggle() {
        let with_shadow = Renderer::default().render_frame(&still_frame(10), 1.0);
        let without_shadow = Renderer::new(RenderStyle {
            box_shadow: false,
            ..RenderStyle::default()
        })
        .render_frame(&still_frame(10), 1.0);

        // just below the first box, where only the shadow reaches
        let probe = (100, 127);
        assert_ne!(
            with_shadow.get_pixel(probe.0, probe.1),
            without_shadow.get_pixel(probe.0, probe.1)
        );
    }
}
