//! The three buffers a carving session keeps in lock-step: the image
//! itself, and the protect/object masks riding along beside it.
//!
//! Every operation here touches all three grids at once so they can
//! never drift out of shape relative to each other.

use crate::grid::Grid;
use crate::pixelpairs::Rgb;

/// The image grid, protect mask, and object mask of a session, bundled
/// so they move through seam removal, insertion, and transposition
/// together.
#[derive(Clone)]
pub struct Canvas {
    /// The image itself.
    pub image: Grid<Rgb>,
    /// Pixels seams must not cross.
    pub protect: Grid<bool>,
    /// Pixels seams must cross until none remain.
    pub object: Grid<bool>,
}

impl Canvas {
    /// Bundles an image and its two masks. All three must share the
    /// same dimensions.
    pub fn new(image: Grid<Rgb>, protect: Grid<bool>, object: Grid<bool>) -> Self {
        debug_assert_eq!(image.width(), protect.width());
        debug_assert_eq!(image.height(), protect.height());
        debug_assert_eq!(image.width(), object.width());
        debug_assert_eq!(image.height(), object.height());
        Canvas {
            image,
            protect,
            object,
        }
    }

    /// Current width, shared by all three grids.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current height, shared by all three grids.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Removes `seam` from all three grids.
    pub fn remove_seam(&self, seam: &[u32]) -> Canvas {
        Canvas {
            image: self.image.remove_seam(seam),
            protect: self.protect.remove_seam(seam),
            object: self.object.remove_seam(seam),
        }
    }

    /// Inserts `seam` into all three grids. The image averages its two
    /// neighbouring pixels; the protect mask keeps a cell protected if
    /// either neighbour was; the object mask only keeps a cell marked
    /// if both neighbours were, so inserted pixels never manufacture
    /// new object area.
    pub fn insert_seam(&self, seam: &[u32]) -> Canvas {
        let image = self.image.insert_seam(seam, |a, b| {
            [
                (a[0] + b[0]) / 2.0,
                (a[1] + b[1]) / 2.0,
                (a[2] + b[2]) / 2.0,
            ]
        });
        let protect = self.protect.insert_seam(seam, |a, b| *a || *b);
        let object = self.object.insert_seam(seam, |a, b| *a && *b);
        Canvas {
            image,
            protect,
            object,
        }
    }

    /// Transposes all three grids. This is the mechanism behind the
    /// orientation adapter: callers swap to horizontal mode by
    /// transposing, run the vertical-seam logic, then transpose back.
    pub fn transpose(&self) -> Canvas {
        Canvas {
            image: self.image.transpose(),
            protect: self.protect.transpose(),
            object: self.object.transpose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> Canvas {
        Canvas::new(
            Grid::from_fn(width, height, |x, y| [x as f32, y as f32, 0.0]),
            Grid::new(width, height, false),
            Grid::new(width, height, false),
        )
    }

    #[test]
    fn remove_seam_shrinks_all_three_grids() {
        let canvas = solid(4, 3);
        let seam = [1u32, 1, 1];
        let c2 = canvas.remove_seam(&seam);
        assert_eq!(c2.width(), 3);
        assert_eq!(c2.height(), 3);
    }

    #[test]
    fn protect_mask_insertion_prefers_set() {
        let mut canvas = solid(2, 1);
        canvas.protect[(0, 0)] = true;
        let c2 = canvas.insert_seam(&[1u32]);
        // New column sits between old column 0 (protected) and old
        // column 1 (not): protect wins.
        assert!(c2.protect[(1, 0)]);
    }

    #[test]
    fn object_mask_insertion_requires_both_neighbours() {
        let mut canvas = solid(2, 1);
        canvas.object[(0, 0)] = true;
        let c2 = canvas.insert_seam(&[1u32]);
        assert!(!c2.object[(1, 0)]);
    }
}
