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
use crate::images::{YuvPlanarImage, YuvPlanarImageMut};
use crate::yuv_support::YuvChromaSubsampling;
use std::f64::consts::PI;

/// Smooth, photo like test image, deterministic for given extents
pub(crate) fn synthetic_image(
    width: u32,
    height: u32,
    subsampling: YuvChromaSubsampling,
) -> YuvPlanarImageMut<'static, u8> {
    let mut image = YuvPlanarImageMut::alloc(width, height, subsampling);
    let descriptor = image.describe(subsampling);
    for index in 0..descriptor.planes_count() {
        let plane = descriptor.plane(index);
        let (w, h) = (plane.width as f64, plane.height as f64);
        let stride = plane.stride as usize;
        let data = image.plane_mut(index);
        for (y, row) in data.chunks_exact_mut(stride).enumerate() {
            for (x, dst) in row.iter_mut().take(plane.width as usize).enumerate() {
                let (fx, fy) = (x as f64 / w, y as f64 / h);
                let value = match index {
                    0 => {
                        128. + 70. * (2. * PI * 1.3 * fx).sin() * (2. * PI * 0.9 * fy).cos()
                            + 25. * (2. * PI * 1.05 * (fx + fy)).sin()
                    }
                    1 => 128. + 40. * (2. * PI * 0.7 * fx + 0.3).sin(),
                    _ => 128. + 35. * (2. * PI * 0.6 * fy).cos(),
                };
                *dst = value.round().clamp(0., 255.) as u8;
            }
        }
    }
    image
}

/// Peak signal to noise ratio per plane, infinite for identical planes
pub(crate) fn psnr(
    a: &YuvPlanarImage<u8>,
    b: &YuvPlanarImage<u8>,
    subsampling: YuvChromaSubsampling,
) -> Vec<f64> {
    assert_eq!((a.width, a.height), (b.width, b.height));
    let descriptor = a.describe(subsampling);
    (0..descriptor.planes_count())
        .map(|index| {
            let plane = descriptor.plane(index);
            let width = plane.width as usize;
            let mut squared = 0f64;
            for (row_a, row_b) in a
                .plane(index)
                .chunks(a.stride(index) as usize)
                .zip(b.plane(index).chunks(b.stride(index) as usize))
                .take(plane.height as usize)
            {
                for (&pa, &pb) in row_a[..width].iter().zip(row_b[..width].iter()) {
                    let diff = pa as f64 - pb as f64;
                    squared += diff * diff;
                }
            }
            let mse = squared / (width * plane.height as usize) as f64;
            if mse == 0. {
                f64::INFINITY
            } else {
                10. * (255. * 255. / mse).log10()
            }
        })
        .collect()
}
