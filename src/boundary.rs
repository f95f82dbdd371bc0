//! Conversions between `image`-crate buffers and the engine's internal
//! `Grid` representation.

use crate::grid::Grid;
use crate::pixelpairs::Rgb;
use image::{GrayImage, Rgb as ImageRgb, RgbImage};

/// Decodes an `RgbImage` into a `Grid<[f32; 3]>`, one entry per pixel.
pub fn rgb_image_to_grid(image: &RgbImage) -> Grid<Rgb> {
    let (width, height) = image.dimensions();
    Grid::from_fn(width, height, |x, y| {
        let p = image.get_pixel(x, y);
        [p[0] as f32, p[1] as f32, p[2] as f32]
    })
}

/// Encodes a `Grid<[f32; 3]>` back into an `RgbImage`, clamping and
/// rounding each channel to `u8`.
pub fn grid_to_rgb_image(grid: &Grid<Rgb>) -> RgbImage {
    let mut out = RgbImage::new(grid.width(), grid.height());
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = grid[(x, y)];
            out.put_pixel(x, y, ImageRgb([clamp_u8(p[0]), clamp_u8(p[1]), clamp_u8(p[2])]));
        }
    }
    out
}

fn clamp_u8(v: f32) -> u8 {
    v.round().max(0.0).min(255.0) as u8
}

/// Decodes a `GrayImage` mask into a `Grid<bool>`: any nonzero pixel is
/// "set", matching the original brush tool's white-means-marked
/// convention.
pub fn mask_image_to_grid(image: &GrayImage) -> Grid<bool> {
    let (width, height) = image.dimensions();
    Grid::from_fn(width, height, |x, y| image.get_pixel(x, y)[0] > 0)
}

/// An all-unset mask sized to `(width, height)`, used when the caller
/// didn't supply one.
pub fn default_mask(width: u32, height: u32) -> Grid<bool> {
    Grid::new(width, height, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn round_trips_a_solid_color() {
        let mut img = RgbImage::new(2, 2);
        for y in 0..2 {
            for x in 0..2 {
                img.put_pixel(x, y, ImageRgb([10, 20, 30]));
            }
        }
        let grid = rgb_image_to_grid(&img);
        let back = grid_to_rgb_image(&grid);
        assert_eq!(img, back);
    }

    #[test]
    fn mask_nonzero_pixels_are_set() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([255]));
        let grid = mask_image_to_grid(&img);
        assert!(!grid[(0, 0)]);
        assert!(grid[(1, 0)]);
    }
}
