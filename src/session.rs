//! The resize driver (R) and object-removal driver (D), and the
//! `CarveSession` that owns the coupled buffers they operate on.

use image::{GrayImage, RgbImage};

use crate::boundary;
use crate::canvas::Canvas;
use crate::energy;
use crate::error::{Axis, CarveError};
use crate::options::CarvingOptions;
use crate::progress::{ControlFlow, SeamObserver};
use crate::seam;

/// Owns the image and its two masks for the duration of one `carve()`
/// call. Not exposed as a long-lived handle: the engine has no
/// cross-call state and no concurrent mutation to support.
pub struct CarveSession {
    canvas: Canvas,
    options: CarvingOptions,
    original_width: u32,
    original_height: u32,
}

impl CarveSession {
    /// Validates and wraps an image and its optional masks into a new
    /// session.
    pub fn new(
        image: &RgbImage,
        protect_mask: Option<&GrayImage>,
        object_mask: Option<&GrayImage>,
        options: CarvingOptions,
    ) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyImage);
        }

        let protect = Self::load_mask(protect_mask, width, height)?;
        let object = Self::load_mask(object_mask, width, height)?;
        let canvas = Canvas::new(boundary::rgb_image_to_grid(image), protect, object);

        Ok(CarveSession {
            canvas,
            options,
            original_width: width,
            original_height: height,
        })
    }

    fn load_mask(
        mask: Option<&GrayImage>,
        width: u32,
        height: u32,
    ) -> Result<crate::grid::Grid<bool>, CarveError> {
        match mask {
            Some(m) => {
                let found = m.dimensions();
                if found != (width, height) {
                    return Err(CarveError::MaskShapeMismatch {
                        expected: (width, height),
                        found,
                    });
                }
                Ok(boundary::mask_image_to_grid(m))
            }
            None => Ok(boundary::default_mask(width, height)),
        }
    }

    /// The session's current (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Consumes the session and encodes its image back to `RgbImage`.
    pub fn into_image(self) -> RgbImage {
        boundary::grid_to_rgb_image(&self.canvas.image)
    }

    fn find_seam(canvas: &Canvas, options: &CarvingOptions) -> Vec<u32> {
        let map = energy::compute_energy(canvas, options);
        let (m, back) = seam::cumulative_cost(&map);
        seam::extract_seam(&m, &back)
    }

    fn remove_width(&mut self, k: u32, observer: &mut impl SeamObserver) -> Result<(), CarveError> {
        for _ in 0..k {
            let seam = Self::find_seam(&self.canvas, &self.options);
            let preview = boundary::grid_to_rgb_image(&self.canvas.image);
            if observer.on_seam(&preview, &seam) == ControlFlow::Cancel {
                return Err(CarveError::Cancelled { partial: preview });
            }
            self.canvas = self.canvas.remove_seam(&seam);
        }
        Ok(())
    }

    fn insert_width(&mut self, k: u32, observer: &mut impl SeamObserver) -> Result<(), CarveError> {
        let mut scratch = self.canvas.clone();
        let mut planned: Vec<Vec<u32>> = Vec::with_capacity(k as usize);
        for _ in 0..k {
            let seam = Self::find_seam(&scratch, &self.options);
            scratch = scratch.remove_seam(&seam);
            planned.push(seam);
        }
        shift_for_replay(&mut planned);

        for seam in planned {
            let preview = boundary::grid_to_rgb_image(&self.canvas.image);
            if observer.on_seam(&preview, &seam) == ControlFlow::Cancel {
                return Err(CarveError::Cancelled { partial: preview });
            }
            self.canvas = self.canvas.insert_seam(&seam);
        }
        Ok(())
    }

    fn remove_height(&mut self, k: u32, observer: &mut impl SeamObserver) -> Result<(), CarveError> {
        self.canvas = self.canvas.transpose();
        let result = self.remove_width(k, observer);
        self.canvas = self.canvas.transpose();
        result.map_err(untranspose_cancel)
    }

    fn insert_height(&mut self, k: u32, observer: &mut impl SeamObserver) -> Result<(), CarveError> {
        self.canvas = self.canvas.transpose();
        let result = self.insert_width(k, observer);
        self.canvas = self.canvas.transpose();
        result.map_err(untranspose_cancel)
    }

    /// Resizes to `(out_width, out_height)`; `0` in either field means
    /// "keep the current size in that axis". Width is carved before
    /// height, and shrinking before growing on each axis, per the
    /// fixed driver order.
    pub fn resize(
        &mut self,
        out_height: u32,
        out_width: u32,
        observer: &mut impl SeamObserver,
    ) -> Result<(), CarveError> {
        let target_width = if out_width == 0 {
            self.canvas.width()
        } else {
            out_width
        };
        let target_height = if out_height == 0 {
            self.canvas.height()
        } else {
            out_height
        };

        if target_width < 2 {
            return Err(CarveError::DimensionTooSmall {
                axis: Axis::Width,
                requested: target_width,
            });
        }
        if target_height < 2 {
            return Err(CarveError::DimensionTooSmall {
                axis: Axis::Height,
                requested: target_height,
            });
        }

        let width_cap = (self.original_width as f64 * self.options.enlargement_cap) as u32;
        let height_cap = (self.original_height as f64 * self.options.enlargement_cap) as u32;
        if target_width > width_cap {
            return Err(CarveError::EnlargementLimitExceeded {
                axis: Axis::Width,
                requested: target_width,
                limit: self.options.enlargement_cap,
            });
        }
        if target_height > height_cap {
            return Err(CarveError::EnlargementLimitExceeded {
                axis: Axis::Height,
                requested: target_height,
                limit: self.options.enlargement_cap,
            });
        }

        let dw = target_width as i64 - self.canvas.width() as i64;
        if dw < 0 {
            self.remove_width((-dw) as u32, observer)?;
        } else if dw > 0 {
            self.insert_width(dw as u32, observer)?;
        }

        let dh = target_height as i64 - self.canvas.height() as i64;
        if dh < 0 {
            self.remove_height((-dh) as u32, observer)?;
        } else if dh > 0 {
            self.insert_height(dh as u32, observer)?;
        }

        Ok(())
    }

    /// Removes whatever the object mask marks, choosing the axis whose
    /// seams cross the mask's shorter side, and stops once the mask is
    /// empty. A no-op if nothing is marked.
    pub fn remove_object(&mut self, observer: &mut impl SeamObserver) -> Result<(), CarveError> {
        let bbox = match object_bounding_box(&self.canvas.object) {
            Some(b) => b,
            None => return Ok(()),
        };
        let (min_x, max_x, min_y, max_y) = bbox;
        let bbox_width = max_x - min_x + 1;
        let bbox_height = max_y - min_y + 1;
        let vertical = bbox_width <= bbox_height;

        if !vertical {
            self.canvas = self.canvas.transpose();
        }

        let result = (|| {
            while object_present(&self.canvas.object) {
                let seam = Self::find_seam(&self.canvas, &self.options);
                let preview = boundary::grid_to_rgb_image(&self.canvas.image);
                if observer.on_seam(&preview, &seam) == ControlFlow::Cancel {
                    return Err(CarveError::Cancelled { partial: preview });
                }
                self.canvas = self.canvas.remove_seam(&seam);
            }
            Ok(())
        })();

        if !vertical {
            self.canvas = self.canvas.transpose();
            return result.map_err(untranspose_cancel);
        }

        result
    }
}

/// Corrects a cancellation's partial image for the orientation adapter:
/// the caller that transposed the canvas before carving must transpose
/// the partial image back before handing the error up, or the returned
/// image would be sideways relative to the one the caller gave us.
fn untranspose_cancel(err: CarveError) -> CarveError {
    match err {
        CarveError::Cancelled { partial } => {
            let grid = boundary::rgb_image_to_grid(&partial).transpose();
            CarveError::Cancelled {
                partial: boundary::grid_to_rgb_image(&grid),
            }
        }
        other => other,
    }
}

/// Applies the +2-per-earlier-seam shift correction in place: once seam
/// `i` is replayed at its recorded column, any later seam whose
/// recorded column is at or to the right of it shifts two columns
/// further right, because the earlier seam's scratch-space column was
/// computed against an image that had already had it (and everything
/// before it) removed, and replaying that removal as an insertion both
/// undoes that shrink and grows the canvas by one more.
fn shift_for_replay(seams: &mut [Vec<u32>]) {
    for i in 0..seams.len() {
        let (earlier, later) = seams.split_at_mut(i + 1);
        let applied = &earlier[i];
        for seam in later.iter_mut() {
            for (row, col) in seam.iter_mut().enumerate() {
                if *col >= applied[row] {
                    *col += 2;
                }
            }
        }
    }
}

fn object_present(mask: &crate::grid::Grid<bool>) -> bool {
    (0..mask.height()).any(|y| (0..mask.width()).any(|x| mask[(x, y)]))
}

fn object_bounding_box(mask: &crate::grid::Grid<bool>) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = u32::max_value();
    let mut max_x = 0u32;
    let mut min_y = u32::max_value();
    let mut max_y = 0u32;
    let mut found = false;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask[(x, y)] {
                found = true;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }
    }
    if found {
        Some((min_x, max_x, min_y, max_y))
    } else {
        None
    }
}
