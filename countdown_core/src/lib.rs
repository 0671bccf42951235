//! Pure countdown math: how much time is left until a target instant, how
//! that time breaks down into display units, and which sequence of frames an
//! animation should show.
//!
//! Nothing in this crate performs I/O. Rendering and encoding live in
//! `countdown_render`; the HTTP surface lives in `countdown_api`.

pub mod clock;
pub mod frames;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use frames::{
    AnimationMode, CountdownPolicy, FrameSpec, REAL_COUNTDOWN_DELAY_MS, generate_frames,
    still_frame,
};
pub use time::{DecomposedTime, TimeError, TimeUnit, compute_remaining, decompose, parse_target};
