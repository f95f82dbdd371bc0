// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::tempdir;

fn write_test_image(path: &std::path::Path, width: u32, height: u32) {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, Rgb([(x * 20) as u8, (y * 20) as u8, 128]));
        }
    }
    img.save(path).unwrap();
}

#[test]
fn shrinks_an_image_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.png");
    let output = dir.path().join("output.png");
    write_test_image(&input, 10, 8);

    Command::cargo_bin("pnmseam")
        .unwrap()
        .arg(&input)
        .arg(&output)
        .arg("--width")
        .arg("6")
        .arg("--height")
        .arg("8")
        .assert()
        .success()
        .stderr(predicate::str::contains("seam"));

    let result = image::open(&output).unwrap();
    assert_eq!(result.to_rgb().dimensions(), (6, 8));
}

#[test]
fn reports_failure_for_a_missing_input_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.png");
    let output = dir.path().join("output.png");

    Command::cargo_bin("pnmseam")
        .unwrap()
        .arg(&missing)
        .arg(&output)
        .assert()
        .failure();
}
