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
use image::{Rgb, RgbImage};
use rez::{
    resize, ResampleError, ResamplingFilter, YuvChromaSubsampling, YuvPlanarImage,
    YuvPlanarImageMut,
};

/// Full range BT.601 RGB to 4:4:4 planes, then chroma resampled into `subsampling`
pub(crate) fn rgb_to_planar(
    rgb: &RgbImage,
    subsampling: YuvChromaSubsampling,
    filter: ResamplingFilter,
) -> Result<YuvPlanarImageMut<'static, u8>, ResampleError> {
    let (width, height) = rgb.dimensions();
    let mut full = YuvPlanarImageMut::alloc(width, height, YuvChromaSubsampling::Yuv444);
    {
        let y_plane = full.y_plane.borrow_mut();
        for (dst, px) in y_plane.iter_mut().zip(rgb.pixels()) {
            let [r, g, b] = px.0.map(|v| v as f32);
            let luma = 0.299 * r + 0.587 * g + 0.114 * b;
            *dst = luma.round().clamp(0., 255.) as u8;
        }
    }
    {
        let u_plane = full.u_plane.borrow_mut();
        for (dst, px) in u_plane.iter_mut().zip(rgb.pixels()) {
            let [r, g, b] = px.0.map(|v| v as f32);
            *dst = (128. - 0.168736 * r - 0.331264 * g + 0.5 * b)
                .round()
                .clamp(0., 255.) as u8;
        }
    }
    {
        let v_plane = full.v_plane.borrow_mut();
        for (dst, px) in v_plane.iter_mut().zip(rgb.pixels()) {
            let [r, g, b] = px.0.map(|v| v as f32);
            *dst = (128. + 0.5 * r - 0.418688 * g - 0.081312 * b)
                .round()
                .clamp(0., 255.) as u8;
        }
    }
    if subsampling == YuvChromaSubsampling::Yuv444 {
        return Ok(full);
    }
    let mut planar = YuvPlanarImageMut::alloc(width, height, subsampling);
    resize(
        &mut planar,
        subsampling,
        &full.to_fixed(),
        YuvChromaSubsampling::Yuv444,
        filter,
    )?;
    Ok(planar)
}

/// Inverse of [rgb_to_planar]
pub(crate) fn planar_to_rgb(
    planar: &YuvPlanarImage<u8>,
    subsampling: YuvChromaSubsampling,
    filter: ResamplingFilter,
) -> Result<RgbImage, ResampleError> {
    let mut full =
        YuvPlanarImageMut::alloc(planar.width, planar.height, YuvChromaSubsampling::Yuv444);
    resize(
        &mut full,
        YuvChromaSubsampling::Yuv444,
        planar,
        subsampling,
        filter,
    )?;
    let fixed = full.to_fixed();
    let mut rgb = RgbImage::new(planar.width, planar.height);
    for (((px, &y), &u), &v) in rgb
        .pixels_mut()
        .zip(fixed.y_plane.iter())
        .zip(fixed.u_plane.iter())
        .zip(fixed.v_plane.iter())
    {
        let (y, cb, cr) = (y as f32, u as f32 - 128., v as f32 - 128.);
        let r = y + 1.402 * cr;
        let g = y - 0.344136 * cb - 0.714136 * cr;
        let b = y + 1.772 * cb;
        *px = Rgb([r, g, b].map(|c| c.round().clamp(0., 255.) as u8));
    }
    Ok(rgb)
}

/// PSNR of one plane, both planes are `width` x `height` with their own strides
pub(crate) fn plane_psnr(
    a: &[u8],
    a_stride: usize,
    b: &[u8],
    b_stride: usize,
    width: usize,
    height: usize,
) -> f64 {
    let mut squared = 0f64;
    for (row_a, row_b) in a
        .chunks(a_stride)
        .zip(b.chunks(b_stride))
        .take(height)
    {
        for (&pa, &pb) in row_a[..width].iter().zip(row_b[..width].iter()) {
            let diff = pa as f64 - pb as f64;
            squared += diff * diff;
        }
    }
    let mse = squared / (width * height) as f64;
    if mse == 0. {
        f64::INFINITY
    } else {
        10. * (255. * 255. / mse).log10()
    }
}
