// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate carve;
extern crate clap;
extern crate image;

use carve::{carve, CarvingOptions, ControlFlow};
use clap::{App, Arg};

fn open_rgb(path: &str) -> image::RgbImage {
    image::open(path)
        .unwrap_or_else(|e| {
            eprintln!("could not open {}: {}", path, e);
            std::process::exit(1);
        })
        .to_rgb()
}

fn open_mask(path: &str) -> image::GrayImage {
    image::open(path)
        .unwrap_or_else(|e| {
            eprintln!("could not open {}: {}", path, e);
            std::process::exit(1);
        })
        .to_luma()
}

fn main() {
    let matches = App::new("pnmseam")
        .version("0.2.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("imagefile")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to save the result")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .help("Target width (0 or omitted keeps the current width)"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("Target height (0 or omitted keeps the current height)"),
        )
        .arg(
            Arg::with_name("protect-mask")
                .long("protect-mask")
                .takes_value(true)
                .help("Image whose bright pixels seams must not cross"),
        )
        .arg(
            Arg::with_name("object-mask")
                .long("object-mask")
                .takes_value(true)
                .help("Image whose bright pixels must be carved away first"),
        )
        .get_matches();

    let image = open_rgb(matches.value_of("imagefile").unwrap());
    let protect = matches.value_of("protect-mask").map(open_mask);
    let object = matches.value_of("object-mask").map(open_mask);

    let width: u32 = matches
        .value_of("width")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let height: u32 = matches
        .value_of("height")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut seam_count = 0u32;
    let observer = |_img: &image::RgbImage, seam: &[u32]| {
        seam_count += 1;
        eprintln!(
            "seam {}: row 0 column {}",
            seam_count,
            seam.first().copied().unwrap_or(0)
        );
        ControlFlow::Continue
    };

    let result = carve(
        &image,
        height,
        width,
        protect.as_ref(),
        object.as_ref(),
        CarvingOptions::default(),
        observer,
    );

    match result {
        Ok(out) => {
            let out_path = matches.value_of("output").unwrap();
            out.save(out_path).unwrap_or_else(|e| {
                eprintln!("could not save {}: {}", out_path, e);
                std::process::exit(1);
            });
        }
        Err(e) => {
            eprintln!("seam carving failed: {}", e);
            std::process::exit(1);
        }
    }
}
