/*
 * Copyright (c) Radzivon Bartoshyk, 01/2025. All rights reserved.
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
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use rez::{
    prepare_conversion, Converter, ImageDescriptor, ResamplingFilter, YuvChromaSubsampling,
    YuvPlanarImageMut,
};

fn noisy_frame(width: u32, height: u32) -> YuvPlanarImageMut<'static, u8> {
    let mut rng = rand::rng();
    let mut frame = YuvPlanarImageMut::alloc(width, height, YuvChromaSubsampling::Yuv420);
    frame.y_plane.borrow_mut().iter_mut().for_each(|v| *v = rng.random());
    frame.u_plane.borrow_mut().iter_mut().for_each(|v| *v = rng.random());
    frame.v_plane.borrow_mut().iter_mut().for_each(|v| *v = rng.random());
    frame
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let subsampling = YuvChromaSubsampling::Yuv420;
    let source = noisy_frame(1920, 1080);
    let fixed_source = source.to_fixed();
    let input = source.describe(subsampling);

    let filters = [
        ResamplingFilter::bilinear(),
        ResamplingFilter::bicubic(),
        ResamplingFilter::lanczos(3).unwrap(),
    ];

    for filter in filters {
        for (width, height, interlaced) in [
            (1280u32, 720u32, false),
            (3840, 2160, false),
            (720, 576, true),
            (1920, 540, false),
        ] {
            let output = ImageDescriptor::new(width, height, subsampling)
                .with_interlacing(interlaced);
            let mut converter = Converter::new(
                prepare_conversion(&output, &input.with_interlacing(interlaced)).unwrap(),
                filter,
            )
            .unwrap();
            let mut target = YuvPlanarImageMut::alloc(width, height, subsampling);
            let scan = if interlaced {
                "interlaced"
            } else {
                "progressive"
            };
            c.bench_function(
                &format!("rez {} 1920x1080 -> {}x{} {}", filter, width, height, scan),
                |b| {
                    b.iter(|| {
                        converter.convert(&mut target, &fixed_source).unwrap();
                    })
                },
            );
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
