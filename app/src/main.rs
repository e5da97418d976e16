/*
 * Copyright (c) Radzivon Bartoshyk, 02/2025. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
mod support;

use crate::support::{planar_to_rgb, plane_psnr, rgb_to_planar};
use image::ImageReader;
use rez::{
    prepare_conversion, Converter, ImageDescriptor, ResamplingFilter, YuvChromaSubsampling,
    YuvPlanarImageMut,
};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let path = args.get(1).map_or("./assets/bench.jpg", |s| s.as_str());
    let target_width: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1280);
    let target_height: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(720);
    let interlaced = args.iter().any(|s| s == "--interlaced");

    let filters: Vec<ResamplingFilter> = match args.get(4).filter(|s| !s.starts_with("--")) {
        Some(name) => vec![name.parse().unwrap()],
        None => vec![
            ResamplingFilter::bilinear(),
            ResamplingFilter::bicubic(),
            ResamplingFilter::lanczos(3).unwrap(),
        ],
    };

    let img = ImageReader::open(path).unwrap().decode().unwrap();
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let subsampling = YuvChromaSubsampling::Yuv420;

    for filter in filters {
        let source = rgb_to_planar(&rgb, subsampling, filter).unwrap();
        let input = source
            .describe(subsampling)
            .with_interlacing(interlaced);
        let output = ImageDescriptor::new(target_width, target_height, subsampling)
            .with_interlacing(interlaced);

        let mut forward =
            Converter::new(prepare_conversion(&output, &input).unwrap(), filter).unwrap();
        let mut backward =
            Converter::new(prepare_conversion(&input, &output).unwrap(), filter).unwrap();

        let mut resized = YuvPlanarImageMut::alloc(target_width, target_height, subsampling);
        let mut restored = YuvPlanarImageMut::alloc(width, height, subsampling);

        let start_time = Instant::now();
        forward.convert(&mut resized, &source.to_fixed()).unwrap();
        println!(
            "{} {}x{} -> {}x{} time: {:?}",
            filter,
            width,
            height,
            target_width,
            target_height,
            start_time.elapsed()
        );

        let start_time = Instant::now();
        backward
            .convert(&mut restored, &resized.to_fixed())
            .unwrap();
        println!("{} backward time: {:?}", filter, start_time.elapsed());

        let src = source.to_fixed();
        let dst = restored.to_fixed();
        let (cw, ch) = subsampling.chroma_size(width, height);
        println!(
            "{} round trip PSNR: Y {:.2}, U {:.2}, V {:.2}",
            filter,
            plane_psnr(
                src.y_plane,
                src.y_stride as usize,
                dst.y_plane,
                dst.y_stride as usize,
                width as usize,
                height as usize
            ),
            plane_psnr(
                src.u_plane,
                src.u_stride as usize,
                dst.u_plane,
                dst.u_stride as usize,
                cw as usize,
                ch as usize
            ),
            plane_psnr(
                src.v_plane,
                src.v_stride as usize,
                dst.v_plane,
                dst.v_stride as usize,
                cw as usize,
                ch as usize
            ),
        );

        let resized_rgb = planar_to_rgb(&resized.to_fixed(), subsampling, filter).unwrap();
        resized_rgb
            .save(format!("resized_{}.png", filter.name()))
            .unwrap();
    }
}
