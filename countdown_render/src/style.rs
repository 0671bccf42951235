use std::fmt;

use countdown_core::TimeUnit;
use serde::{Deserialize, Serialize};

/// An RGBA colour. Deserializes from `#RRGGBB`, `#RRGGBBAA`,
/// `rgb(r, g, b)` or `rgba(r, g, b, alpha)` with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// `rgba(...)` notation, as used in SVG fill attributes.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.opacity()
        )
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn parse_functional(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }

        let channel = |s: &str| s.parse::<u8>().ok();
        let alpha = if with_alpha {
            let fraction = parts[3].parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&fraction) {
                return None;
            }
            (fraction * 255.0).round() as u8
        } else {
            0xFF
        };

        Some(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();

        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            Self::parse_hex(hex)
        } else if let Some(body) = trimmed
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(body, true)
        } else if let Some(body) = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::parse_functional(body, false)
        } else {
            None
        };

        parsed.ok_or_else(|| format!("invalid colour: {value:?}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

/// Left-to-right two-stop gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowStyle {
    pub color: Color,
    pub blur: u32,
    pub offset_y: i32,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            color: Color::rgba(0, 0, 0, 51),
            blur: 10,
            offset_y: 4,
        }
    }
}

/// Periodic scale factor applied to text per frame:
/// `1 + amplitude * sin(index / divisor)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub amplitude: f64,
    pub divisor: f64,
}

impl Pulse {
    pub const NONE: Self = Self {
        amplitude: 0.0,
        divisor: 1.0,
    };

    #[must_use]
    pub fn scale(&self, index: u32) -> f64 {
        if self.divisor.abs() < f64::EPSILON {
            return 1.0;
        }

        self.amplitude.mul_add((f64::from(index) / self.divisor).sin(), 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl Labels {
    #[must_use]
    pub fn for_unit(&self, unit: TimeUnit) -> &str {
        match unit {
            TimeUnit::Days => &self.days,
            TimeUnit::Hours => &self.hours,
            TimeUnit::Minutes => &self.minutes,
            TimeUnit::Seconds => &self.seconds,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            days: "DAYS".to_string(),
            hours: "HOURS".to_string(),
            minutes: "MINUTES".to_string(),
            seconds: "SECONDS".to_string(),
        }
    }
}

/// Everything that controls how a frame looks. Sizes are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub width: u32,
    pub height: u32,
    pub countdown_background: Gradient,
    pub expired_background: Gradient,
    pub box_fill: Color,
    pub text_color: Color,
    pub box_width: u32,
    pub box_height: u32,
    pub box_gap: u32,
    pub box_top: u32,
    /// Vertical centre of the number, measured from the top of its box.
    pub number_center: u32,
    /// Vertical centre of the label, measured from the top of its box.
    pub label_center: u32,
    pub number_size: f64,
    pub label_size: f64,
    pub message_size: f64,
    pub box_shadow: bool,
    pub shadow: ShadowStyle,
    pub labels: Labels,
    pub expired_message: String,
    pub countdown_pulse: Pulse,
    pub expired_pulse: Pulse,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 600,
            height: 150,
            countdown_background: Gradient {
                start: Color::rgb(0xFF, 0x6B, 0x6B),
                end: Color::rgb(0xFF, 0x8E, 0x53),
            },
            expired_background: Gradient {
                start: Color::rgb(0x4C, 0xAF, 0x50),
                end: Color::rgb(0x45, 0xB7, 0xD1),
            },
            box_fill: Color::rgba(255, 255, 255, 64),
            text_color: Color::WHITE,
            box_width: 120,
            box_height: 100,
            box_gap: 10,
            box_top: 25,
            number_center: 42,
            label_center: 80,
            number_size: 48.0,
            label_size: 14.0,
            message_size: 42.0,
            box_shadow: true,
            shadow: ShadowStyle::default(),
            labels: Labels::default(),
            expired_message: "BLACK FRIDAY IS LIVE!".to_string(),
            countdown_pulse: Pulse {
                amplitude: 0.05,
                divisor: 5.0,
            },
            expired_pulse: Pulse {
                amplitude: 0.1,
                divisor: 3.0,
            },
        }
    }
}

impl RenderStyle {
    /// Left edge of the first box, centring all four boxes horizontally.
    #[must_use]
    pub fn boxes_left(&self) -> i64 {
        let row = i64::from(self.box_width) * 4 + i64::from(self.box_gap) * 3;
        (i64::from(self.width) - row) / 2
    }
}
