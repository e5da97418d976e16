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
#![no_main]

use libfuzzer_sys::fuzz_target;
use rez::{
    prepare_conversion, BufferStoreMut, Converter, ResampleErrorKind, ResamplingFilter,
    YuvChromaSubsampling, YuvPlanarImageMut,
};

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8, u8, u8, u8, bool)| {
    let filter = match data.7 % 4 {
        0 => ResamplingFilter::bilinear(),
        1 => ResamplingFilter::bicubic(),
        2 => ResamplingFilter::lanczos(3).unwrap(),
        _ => ResamplingFilter::lanczos(5).unwrap(),
    };
    let subsampling: YuvChromaSubsampling = (data.8 % 7).into();
    fuzz_flat(
        data.0, data.1, data.2, data.3, [data.4, data.5, data.6], subsampling, filter, data.9,
    );
});

fn planar_image(
    width: u32,
    height: u32,
    padding: u32,
    values: [u8; 3],
    subsampling: YuvChromaSubsampling,
) -> YuvPlanarImageMut<'static, u8> {
    let (chroma_width, chroma_height) = if subsampling.planes_count() > 1 {
        subsampling.chroma_size(width, height)
    } else {
        (0, 0)
    };
    let chroma_stride = if chroma_width > 0 {
        chroma_width + padding
    } else {
        0
    };
    let y_stride = width + padding;
    YuvPlanarImageMut {
        y_plane: BufferStoreMut::Owned(vec![values[0]; (y_stride * height) as usize]),
        y_stride,
        u_plane: BufferStoreMut::Owned(vec![values[1]; (chroma_stride * chroma_height) as usize]),
        u_stride: chroma_stride,
        v_plane: BufferStoreMut::Owned(vec![values[2]; (chroma_stride * chroma_height) as usize]),
        v_stride: chroma_stride,
        width,
        height,
    }
}

#[allow(clippy::too_many_arguments)]
fn fuzz_flat(
    src_width: u8,
    src_height: u8,
    dst_width: u8,
    dst_height: u8,
    values: [u8; 3],
    subsampling: YuvChromaSubsampling,
    filter: ResamplingFilter,
    interlaced: bool,
) {
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return;
    }
    let source = planar_image(src_width as u32, src_height as u32, 3, values, subsampling);
    let mut target = planar_image(
        dst_width as u32,
        dst_height as u32,
        5,
        [0, 0, 0],
        subsampling,
    );

    let input = source.describe(subsampling).with_interlacing(interlaced);
    let output = target.describe(subsampling).with_interlacing(interlaced);
    let config = prepare_conversion(&output, &input).unwrap();
    let mut converter = match Converter::new(config, filter) {
        Ok(converter) => converter,
        Err(err) => {
            assert!(interlaced);
            assert_eq!(err.kind(), ResampleErrorKind::Configuration);
            return;
        }
    };
    converter.convert(&mut target, &source.to_fixed()).unwrap();

    let fixed = target.to_fixed();
    let descriptor = output;
    for index in 0..subsampling.planes_count() {
        let plane = descriptor.plane(index);
        let data = match index {
            0 => fixed.y_plane,
            1 => fixed.u_plane,
            _ => fixed.v_plane,
        };
        for row in data.chunks_exact(plane.stride as usize) {
            assert!(row[..plane.width as usize].iter().all(|&v| v == values[index]));
            assert!(row[plane.width as usize..].iter().all(|&v| v == 0));
        }
    }
}
