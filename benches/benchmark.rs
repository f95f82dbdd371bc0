// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use std::time::Duration;

// No fixture image ships with this crate, so the benchmark builds a
// synthetic gradient instead: cheap to generate, and varied enough that
// the energy map isn't trivially flat.
fn gradient_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 255) / (width + height).max(1)) as u8;
            img.put_pixel(x, y, Rgb([r, g, b]));
        }
    }
    img
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("200x120 shrink to 150x120", |b| {
        let img = black_box(gradient_image(200, 120));

        b.iter(|| {
            carve::carve(
                &img,
                0,
                150,
                None,
                None,
                carve::CarvingOptions::default(),
                (),
            )
            .unwrap()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
                .sample_size(20)
                .warm_up_time(Duration::from_secs(1));
    targets = criterion_benchmark
}

criterion_main!(benches);
