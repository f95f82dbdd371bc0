//! Cumulative-cost table (M) and seam extraction (S).
//!
//! Ties in the three-way minimum are broken in a fixed order: center,
//! then left, then right. Because each candidate only replaces the
//! current best when it is strictly smaller, a center tie beats both
//! sides and a left tie beats right. This ordering must not change —
//! test vectors depend on it reproducing exactly.

use crate::grid::Grid;

/// Builds M row by row and returns it along with a grid of relative
/// predecessor offsets (-1, 0, or 1) used to backtrack a seam.
pub fn cumulative_cost(energy: &Grid<f32>) -> (Grid<f32>, Grid<i8>) {
    let (width, height) = (energy.width(), energy.height());
    let mut m = Grid::new(width, height, 0.0f32);
    let mut back = Grid::new(width, height, 0i8);

    for x in 0..width {
        m[(x, 0)] = energy[(x, 0)];
    }

    for y in 1..height {
        for x in 0..width {
            let mut best_val = m[(x, y - 1)];
            let mut best_dx = 0i8;
            if x > 0 {
                let v = m[(x - 1, y - 1)];
                if v < best_val {
                    best_val = v;
                    best_dx = -1;
                }
            }
            if x < width - 1 {
                let v = m[(x + 1, y - 1)];
                if v < best_val {
                    best_val = v;
                    best_dx = 1;
                }
            }
            m[(x, y)] = energy[(x, y)] + best_val;
            back[(x, y)] = best_dx;
        }
    }

    (m, back)
}

/// Backtracks from the minimum-cost cell of the last row to extract one
/// seam as a column index per row. Ties in the last row favour the
/// smallest column index.
pub fn extract_seam(m: &Grid<f32>, back: &Grid<i8>) -> Vec<u32> {
    let (width, height) = (m.width(), m.height());
    let mut col = 0u32;
    for x in 1..width {
        if m[(x, height - 1)] < m[(col, height - 1)] {
            col = x;
        }
    }

    let mut seam = vec![0u32; height as usize];
    seam[height as usize - 1] = col;
    for y in (1..height).rev() {
        let dx = back[(col, y)];
        col = (col as i32 + dx as i32) as u32;
        seam[y as usize - 1] = col;
    }
    seam
}
