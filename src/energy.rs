// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Energy map (E): per-pixel importance from local image gradients,
//! biased by the protect/object masks.

use crate::canvas::Canvas;
use crate::grid::Grid;
use crate::options::{CarvingOptions, EnergyOp};
use crate::pixelpairs::{abs_channel_distance, Rgb};

#[cfg(feature = "threaded")]
use crossbeam;
#[cfg(feature = "threaded")]
use num_cpus;

fn clamped(image: &Grid<Rgb>, x: i64, y: i64) -> Rgb {
    let cx = x.max(0).min(image.width() as i64 - 1) as u32;
    let cy = y.max(0).min(image.height() as i64 - 1) as u32;
    image[(cx, cy)]
}

fn gradient_abs_row(image: &Grid<Rgb>, y: u32) -> Vec<f32> {
    (0..image.width())
        .map(|x| {
            let left = clamped(image, x as i64 - 1, y as i64);
            let right = clamped(image, x as i64 + 1, y as i64);
            let up = clamped(image, x as i64, y as i64 - 1);
            let down = clamped(image, x as i64, y as i64 + 1);
            abs_channel_distance(&left, &right) + abs_channel_distance(&up, &down)
        })
        .collect()
}

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

fn sobel_row(image: &Grid<Rgb>, y: u32) -> Vec<f32> {
    (0..image.width())
        .map(|x| {
            let mut gx = [0.0f32; 3];
            let mut gy = [0.0f32; 3];
            for ky in 0..3 {
                for kx in 0..3 {
                    let px = clamped(image, x as i64 + kx as i64 - 1, y as i64 + ky as i64 - 1);
                    for c in 0..3 {
                        gx[c] += SOBEL_X[ky][kx] * px[c];
                        gy[c] += SOBEL_Y[ky][kx] * px[c];
                    }
                }
            }
            (0..3).map(|c| (gx[c] * gx[c] + gy[c] * gy[c]).sqrt()).sum()
        })
        .collect()
}

fn rows_to_grid(width: u32, height: u32, rows: Vec<Vec<f32>>) -> Grid<f32> {
    Grid::from_fn(width, height, |x, y| rows[y as usize][x as usize])
}

// Divides [0, height) into `thread_count` contiguous row segments, the
// last one absorbing the remainder, the way avisha2.rs's start_and_end
// divides a row's columns.
#[cfg(feature = "threaded")]
fn row_segment_bounds(
    index: usize,
    segment_size: usize,
    height: usize,
    last_segment: usize,
) -> (usize, usize) {
    (
        index * segment_size,
        if index == last_segment {
            height
        } else {
            (index + 1) * segment_size
        },
    )
}

#[cfg(feature = "threaded")]
fn fill_rows(image: &Grid<Rgb>, row_fn: fn(&Grid<Rgb>, u32) -> Vec<f32>) -> Vec<Vec<f32>> {
    let height = image.height() as usize;
    let thread_count = num_cpus::get().min(height.max(1));
    let segment_size = (height + thread_count - 1) / thread_count;
    let last_segment = thread_count - 1;

    crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..thread_count)
            .map(|index| {
                let (start, end) = row_segment_bounds(index, segment_size, height, last_segment);
                scope.spawn(move |_| {
                    (start..end)
                        .map(|y| row_fn(image, y as u32))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut rows = Vec::with_capacity(height);
        for handle in handles {
            rows.extend(handle.join().unwrap());
        }
        rows
    })
    .unwrap()
}

#[cfg(not(feature = "threaded"))]
fn fill_rows(image: &Grid<Rgb>, row_fn: fn(&Grid<Rgb>, u32) -> Vec<f32>) -> Vec<Vec<f32>> {
    (0..image.height()).map(|y| row_fn(image, y)).collect()
}

/// Computes the base (pre-bias) energy of every pixel of `image`.
pub fn base_energy(image: &Grid<Rgb>, op: EnergyOp) -> Grid<f32> {
    let rows = match op {
        EnergyOp::GradientAbs => fill_rows(image, gradient_abs_row),
        EnergyOp::Sobel => fill_rows(image, sobel_row),
    };
    rows_to_grid(image.width(), image.height(), rows)
}

/// Applies the protect/object mask bias on top of a base energy map.
/// Protect wins when both masks are set on the same pixel.
pub fn apply_bias(base: &Grid<f32>, canvas: &Canvas, bias_magnitude: f32) -> Grid<f32> {
    Grid::from_fn(base.width(), base.height(), |x, y| {
        let e = base[(x, y)];
        if canvas.protect[(x, y)] {
            e + bias_magnitude
        } else if canvas.object[(x, y)] {
            e - bias_magnitude
        } else {
            e
        }
    })
}

/// Computes the full, biased energy map for `canvas` under `options`.
pub fn compute_energy(canvas: &Canvas, options: &CarvingOptions) -> Grid<f32> {
    let base = base_energy(&canvas.image, options.energy_op);
    apply_bias(&base, canvas, options.bias_magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;

    #[test]
    fn flat_image_has_zero_energy() {
        let image = Grid::new(3, 3, [5.0, 5.0, 5.0]);
        let e = base_energy(&image, EnergyOp::GradientAbs);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(e[(x, y)], 0.0);
            }
        }
    }

    #[test]
    fn a_vertical_edge_has_energy_on_both_sides() {
        let image = Grid::from_fn(4, 2, |x, _y| {
            if x < 2 {
                [0.0, 0.0, 0.0]
            } else {
                [255.0, 255.0, 255.0]
            }
        });
        let e = base_energy(&image, EnergyOp::GradientAbs);
        assert!(e[(1, 0)] > 0.0);
        assert!(e[(2, 0)] > 0.0);
        assert_eq!(e[(0, 0)], 0.0);
    }

    #[test]
    fn protect_wins_over_object_on_collision() {
        let image = Grid::new(1, 1, [0.0, 0.0, 0.0]);
        let mut protect = Grid::new(1, 1, false);
        let mut object = Grid::new(1, 1, false);
        protect[(0, 0)] = true;
        object[(0, 0)] = true;
        let canvas = Canvas::new(image, protect, object);
        let base = Grid::new(1, 1, 0.0f32);
        let biased = apply_bias(&base, &canvas, 100.0);
        assert_eq!(biased[(0, 0)], 100.0);
    }

    #[test]
    fn object_bias_is_strongly_negative() {
        let image = Grid::new(1, 1, [0.0, 0.0, 0.0]);
        let protect = Grid::new(1, 1, false);
        let mut object = Grid::new(1, 1, false);
        object[(0, 0)] = true;
        let canvas = Canvas::new(image, protect, object);
        let base = Grid::new(1, 1, 0.0f32);
        let biased = apply_bias(&base, &canvas, 100.0);
        assert_eq!(biased[(0, 0)], -100.0);
    }
}
