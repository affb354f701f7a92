//! Frame timing for sprite animations.
//!
//! An [`Animation`] does not own any images; it only tracks elapsed time and
//! answers which frame index should currently be shown. Drawing is up to the
//! host application.

use core::num::NonZeroUsize;

use crate::math::FreeCoordinate;

/// What happens when an [`Animation`] runs past its last frame.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[expect(clippy::exhaustive_enums)]
pub enum PlayMode {
    /// Hold the last frame; the animation reports itself finished.
    #[default]
    Normal,
    /// Wrap around to the first frame; the animation never finishes.
    Looping,
}

/// Error from [`Animation::new`] for degenerate frame schedules.
// Carries an `f64`, so `PartialEq` without `Eq`, like `Animation` itself.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum AnimationError {
    /// animation must have at least one frame
    ZeroFrames,
    /// frame time must be positive and finite, not {0}
    InvalidFrameTime(FreeCoordinate),
}

impl core::error::Error for AnimationError {}

/// Tracks elapsed playback time over a fixed sequence of equally timed frames,
/// mapping it to the frame index to display.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frame_count: NonZeroUsize,
    /// Seconds each frame is shown for. Positive and finite.
    frame_time: FreeCoordinate,
    mode: PlayMode,
    /// Seconds of playback accumulated so far. Never negative.
    elapsed: FreeCoordinate,
}

impl Animation {
    /// Constructs an [`Animation`] of `frame_count` frames, each shown for
    /// `frame_time` seconds.
    ///
    /// Returns an error if `frame_count` is zero or `frame_time` is not a
    /// positive finite number.
    pub fn new(
        frame_count: usize,
        frame_time: FreeCoordinate,
        mode: PlayMode,
    ) -> Result<Self, AnimationError> {
        let frame_count = NonZeroUsize::new(frame_count).ok_or(AnimationError::ZeroFrames)?;
        if !(frame_time.is_finite() && frame_time > 0.0) {
            return Err(AnimationError::InvalidFrameTime(frame_time));
        }
        Ok(Self {
            frame_count,
            frame_time,
            mode,
            elapsed: 0.0,
        })
    }

    /// Number of frames in the sequence.
    #[inline]
    pub fn frame_count(&self) -> NonZeroUsize {
        self.frame_count
    }

    /// Seconds each frame is shown for.
    #[inline]
    pub fn frame_time(&self) -> FreeCoordinate {
        self.frame_time
    }

    /// The playback mode chosen at construction.
    #[inline]
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Seconds the whole sequence takes to play once.
    pub fn duration(&self) -> FreeCoordinate {
        self.frame_time * self.frame_count.get() as FreeCoordinate
    }

    /// Accumulates `delta_time` seconds of playback. Negative or NaN
    /// `delta_time` is treated as zero; playback never rewinds.
    pub fn advance(&mut self, delta_time: FreeCoordinate) {
        if delta_time > 0.0 {
            self.elapsed += delta_time;
        }
    }

    /// The frame index to display now, in `0..frame_count`.
    pub fn current_frame(&self) -> usize {
        let raw = (self.elapsed / self.frame_time) as usize;
        match self.mode {
            PlayMode::Normal => raw.min(self.frame_count.get() - 1),
            PlayMode::Looping => raw % self.frame_count,
        }
    }

    /// Whether playback has reached past the last frame.
    ///
    /// Always false in [`PlayMode::Looping`].
    pub fn is_finished(&self) -> bool {
        match self.mode {
            PlayMode::Normal => self.elapsed >= self.duration(),
            PlayMode::Looping => false,
        }
    }

    /// Rewinds playback to the first frame.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}
