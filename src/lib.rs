#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing by seam carving.
//!
//! Given an image and a target width/height, this crate removes or
//! duplicates low-importance seams of pixels so the result fits the
//! target size while preserving salient content. Two optional masks
//! steer the process: a protect mask seams must avoid, and an object
//! mask seams must cut through until it is gone.
//!
//! The entry point is [`carve`]. See [`CarvingOptions`] for the
//! available knobs and [`SeamObserver`] for progress reporting.

extern crate failure;
extern crate image;

#[cfg(feature = "threaded")]
extern crate crossbeam;
#[cfg(feature = "threaded")]
extern crate num_cpus;

mod boundary;
mod canvas;
mod energy;
mod error;
mod grid;
mod options;
mod pixelpairs;
mod progress;
mod seam;
mod session;

pub use crate::error::{Axis, CarveError};
pub use crate::options::{CarvingOptions, EnergyOp, TieBreak};
pub use crate::progress::{ControlFlow, SeamObserver};
pub use crate::session::CarveSession;

use image::{GrayImage, RgbImage};

/// Resizes `image` to `out_width` x `out_height` using seam carving,
/// optionally steered by a protect mask and/or an object mask.
///
/// `out_height` / `out_width` of `0` means "keep the current dimension
/// in that axis" (after object removal, if any). If `object_mask` marks
/// any pixels, the object is eliminated first — growing or shrinking
/// the image as needed to erase it — and only then is the image resized
/// to the requested target.
///
/// If `observer` asks to cancel mid-carve, this returns
/// `Err(CarveError::Cancelled { partial })`, where `partial` is the
/// image as it stood at the last completed seam — not an empty result.
pub fn carve(
    image: &RgbImage,
    out_height: u32,
    out_width: u32,
    protect_mask: Option<&GrayImage>,
    object_mask: Option<&GrayImage>,
    options: CarvingOptions,
    mut observer: impl SeamObserver,
) -> Result<RgbImage, CarveError> {
    let mut session = CarveSession::new(image, protect_mask, object_mask, options)?;
    session.remove_object(&mut observer)?;
    session.resize(out_height, out_width, &mut observer)?;
    Ok(session.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn carve_shrinks_a_solid_image() {
        let mut img = RgbImage::new(6, 4);
        for y in 0..4 {
            for x in 0..6 {
                img.put_pixel(x, y, Rgb([30, 30, 30]));
            }
        }
        let out = carve(&img, 4, 4, None, None, CarvingOptions::default(), ()).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
    }

    #[test]
    fn cancelling_returns_the_partially_carved_image() {
        let mut img = RgbImage::new(6, 4);
        for y in 0..4 {
            for x in 0..6 {
                img.put_pixel(x, y, Rgb([30, 30, 30]));
            }
        }
        let observer = |_img: &RgbImage, _seam: &[u32]| ControlFlow::Cancel;
        let result = carve(&img, 4, 4, None, None, CarvingOptions::default(), observer);
        match result {
            Err(CarveError::Cancelled { partial }) => {
                assert_eq!(partial.dimensions(), (6, 4));
            }
            other => panic!("expected Cancelled, got {:?}", other.map(|_| ())),
        }
    }
}
