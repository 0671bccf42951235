use image::{Rgba, RgbaImage};

use crate::font::{self, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::style::{Color, Gradient, ShadowStyle};

/// A thin set of drawing primitives over an opaque RGBA buffer. Every
/// operation clips to the canvas bounds.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0xFF])),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn fill_horizontal_gradient(&mut self, gradient: Gradient) {
        let span = self.image.width().saturating_sub(1).max(1) as f32;
        let lerp = |a: u8, b: u8, t: f32| {
            f32::from(b)
                .mul_add(t, f32::from(a) * (1.0 - t))
                .round()
                .clamp(0.0, 255.0) as u8
        };

        for (x, _, pixel) in self.image.enumerate_pixels_mut() {
            let t = x as f32 / span;
            *pixel = Rgba([
                lerp(gradient.start.r, gradient.end.r, t),
                lerp(gradient.start.g, gradient.end.g, t),
                lerp(gradient.start.b, gradient.end.b, t),
                0xFF,
            ]);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Color) {
        for py in y..y + i64::from(height) {
            for px in x..x + i64::from(width) {
                self.blend(px, py, color, 1.0);
            }
        }
    }

    /// Soft shadow under a `width`×`height` box at (`x`, `y`). Opacity falls
    /// off linearly over `shadow.blur` pixels outside the shifted box.
    #[allow(clippy::cast_precision_loss)]
    pub fn drop_shadow(&mut self, x: i64, y: i64, width: u32, height: u32, shadow: &ShadowStyle) {
        let blur = i64::from(shadow.blur);
        let top = y + i64::from(shadow.offset_y);
        let right = x + i64::from(width);
        let bottom = top + i64::from(height);

        for py in (top - blur)..(bottom + blur) {
            for px in (x - blur)..(right + blur) {
                let dx = (x - px).max(px - (right - 1)).max(0);
                let dy = (top - py).max(py - (bottom - 1)).max(0);
                let distance = dx.max(dy);

                let coverage = if blur == 0 {
                    1.0
                } else {
                    1.0 - distance as f32 / blur as f32
                };

                if coverage > 0.0 {
                    self.blend(px, py, shadow.color, coverage);
                }
            }
        }
    }

    /// Draws `text` centred on (`center_x`, `center_y`) with glyphs `size`
    /// pixels tall, shrinking the text if it would exceed `max_width`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn draw_text(
        &mut self,
        text: &str,
        center_x: i64,
        center_y: i64,
        size: f64,
        max_width: u32,
        color: Color,
    ) {
        let chars: Vec<char> = text.chars().collect();
        let cells = font::text_cells(text);
        if cells == 0 || size <= 0.0 {
            return;
        }

        let mut cell = size / f64::from(GLYPH_HEIGHT);
        if f64::from(cells) * cell > f64::from(max_width) {
            cell = f64::from(max_width) / f64::from(cells);
        }

        let width = (f64::from(cells) * cell).round() as i64;
        let height = (f64::from(GLYPH_HEIGHT) * cell).round() as i64;
        let left = center_x - width / 2;
        let top = center_y - height / 2;

        for dy in 0..height {
            let row = (dy as f64 / cell) as u32;
            for dx in 0..width {
                let column = (dx as f64 / cell) as u32;
                let (index, col) = (column / GLYPH_ADVANCE, column % GLYPH_ADVANCE);
                if col >= GLYPH_WIDTH {
                    continue;
                }

                let Some(&c) = chars.get(index as usize) else {
                    continue;
                };

                if font::is_set(c, col, row) {
                    self.blend(left + dx, top + dy, color, 1.0);
                }
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }

        let alpha = color.opacity() * coverage.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x, y);
        let mix = |src: u8, dst: u8| {
            f32::from(src)
                .mul_add(alpha, f32::from(dst) * (1.0 - alpha))
                .round()
                .clamp(0.0, 255.0) as u8
        };

        *pixel = Rgba([
            mix(color.r, pixel[0]),
            mix(color.g, pixel[1]),
            mix(color.b, pixel[2]),
            0xFF,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let mut canvas = Canvas::new(10, 2);
        canvas.fill_horizontal_gradient(Gradient {
            start: Color::rgb(0, 0, 0),
            end: Color::rgb(200, 100, 50),
        });
        let image = canvas.into_image();

        assert_eq!(image.get_pixel(0, 1), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(9, 0), &Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_fill_rect_blends_and_clips() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(-2, -2, 4, 4, Color::rgba(255, 255, 255, 128));
        let image = canvas.into_image();

        assert_eq!(image.get_pixel(1, 1), &Rgba([128, 128, 128, 255]));
        assert_eq!(image.get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_shadow_fades_with_distance() {
        let mut canvas = Canvas::new(40, 40);
        canvas.drop_shadow(
            10,
            10,
            10,
            10,
            &ShadowStyle {
                color: Color::rgb(255, 255, 255),
                blur: 5,
                offset_y: 0,
            },
        );
        let image = canvas.into_image();

        let inside = image.get_pixel(15, 15)[0];
        let near = image.get_pixel(21, 15)[0];
        let far = image.get_pixel(30, 15)[0];
        assert!(inside > near);
        assert!(near > far);
        assert_eq!(far, 0);
    }

    #[test]
    fn test_text_inks_pixels_inside_bounds() {
        let mut canvas = Canvas::new(60, 30);
        canvas.draw_text("07", 30, 15, 14.0, 60, Color::WHITE);
        let image = canvas.into_image();

        let inked = image.pixels().filter(|p| p[0] == 255).count();
        assert!(inked > 0);
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_text_shrinks_to_fit() {
        let mut canvas = Canvas::new(40, 40);
        canvas.draw_text("MINUTES", 20, 20, 28.0, 20, Color::WHITE);
        let image = canvas.into_image();

        for (x, _, pixel) in image.enumerate_pixels() {
            if pixel[0] == 255 {
                assert!((10..=30).contains(&x), "ink at column {x}");
            }
        }
    }
}
