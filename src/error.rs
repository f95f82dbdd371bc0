//! Error types surfaced by the carving engine.

use failure::Fail;
use image::RgbImage;

/// Which axis an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// The horizontal axis.
    Width,
    /// The vertical axis.
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// Failure modes of a carving session.
#[derive(Debug, Fail)]
pub enum CarveError {
    /// The input image has zero width or height.
    #[fail(display = "image has no pixels")]
    EmptyImage,

    /// A supplied mask's dimensions don't match the image's.
    #[fail(display = "mask shape {:?} does not match image shape {:?}", found, expected)]
    MaskShapeMismatch {
        /// The image's `(width, height)`.
        expected: (u32, u32),
        /// The mask's `(width, height)`.
        found: (u32, u32),
    },

    /// The requested target for `axis` would leave it below 2 pixels.
    #[fail(display = "requested {} of {} is too small to carve", axis, requested)]
    DimensionTooSmall {
        /// The axis that failed the check.
        axis: Axis,
        /// The requested size along that axis.
        requested: u32,
    },

    /// The requested target for `axis` exceeds the session's enlargement cap.
    #[fail(
        display = "requested {} of {} exceeds the enlargement cap ({}x original)",
        axis, requested, limit
    )]
    EnlargementLimitExceeded {
        /// The axis that failed the check.
        axis: Axis,
        /// The requested size along that axis.
        requested: u32,
        /// The configured enlargement cap that was exceeded.
        limit: f64,
    },

    /// The progress hook asked the session to stop. Carries the image as
    /// it stood at the point of cancellation so the caller isn't left
    /// with nothing to show for the seams already carved.
    #[fail(display = "carving session was cancelled by the progress hook")]
    Cancelled {
        /// The partially carved image at the moment the hook cancelled.
        partial: RgbImage,
    },
}
