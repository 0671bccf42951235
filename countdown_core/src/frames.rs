use serde::{Deserialize, Serialize};

use crate::time::DecomposedTime;

/// Frame delay of a ticking countdown: one frame per wall-clock second.
pub const REAL_COUNTDOWN_DELAY_MS: u32 = 1_000;

/// How a still-running countdown animates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPolicy {
    /// The time stays fixed; only the presentation pulses.
    #[default]
    CosmeticLoop,
    /// Each frame is one second later than the one before it.
    RealCountdown,
}

/// Which frame sequence a request gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    CosmeticLoop,
    RealCountdown,
    ExpiredLoop,
}

impl AnimationMode {
    /// Picks the mode for one request. A target that is zero or fewer
    /// seconds away is expired regardless of the configured policy.
    #[must_use]
    pub const fn select(remaining: i64, policy: CountdownPolicy) -> Self {
        if remaining <= 0 {
            return Self::ExpiredLoop;
        }

        match policy {
            CountdownPolicy::CosmeticLoop => Self::CosmeticLoop,
            CountdownPolicy::RealCountdown => Self::RealCountdown,
        }
    }

    #[must_use]
    pub const fn is_expired(self) -> bool {
        matches!(self, Self::ExpiredLoop)
    }

    /// Delay between frames for this mode. `RealCountdown` steps one second
    /// per frame, so it always uses [`REAL_COUNTDOWN_DELAY_MS`] and ignores
    /// `configured_ms`.
    #[must_use]
    pub const fn frame_delay_ms(self, configured_ms: u32) -> u32 {
        match self {
            Self::RealCountdown => REAL_COUNTDOWN_DELAY_MS,
            Self::CosmeticLoop | Self::ExpiredLoop => configured_ms,
        }
    }
}

/// One entry of a generated sequence. `time` is `None` for expired frames,
/// which carry no numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpec {
    pub index: u32,
    pub time: Option<DecomposedTime>,
}

/// Builds the full frame sequence for an animation.
///
/// The result always has exactly `frame_count` entries. Under
/// `RealCountdown` frame `i` shows `start_seconds - i`, clamped at zero;
/// the sequence never flips to the expired state part way through, since
/// the mode is decided once per request.
#[must_use]
pub fn generate_frames(start_seconds: i64, frame_count: u32, mode: AnimationMode) -> Vec<FrameSpec> {
    (0..frame_count)
        .map(|index| {
            let time = match mode {
                AnimationMode::RealCountdown => Some(DecomposedTime::from_remaining(
                    start_seconds.saturating_sub(i64::from(index)),
                )),
                AnimationMode::CosmeticLoop => Some(DecomposedTime::from_remaining(start_seconds)),
                AnimationMode::ExpiredLoop => None,
            };

            FrameSpec { index, time }
        })
        .collect()
}

/// The single frame shown by static formats.
#[must_use]
pub fn still_frame(remaining: i64) -> FrameSpec {
    FrameSpec {
        index: 0,
        time: (remaining > 0).then(|| DecomposedTime::from_remaining(remaining)),
    }
}
