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
use crate::convolve_column::{convolve_column_generic_from, debug_check_column_args};
use crate::numerics::FIXED_POINT_ROUNDING;
use crate::sse::_mm_pack_q14_epi32;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Vertical convolution of 16 columns per iteration, scalar tail.
///
/// `TAPS` equal to zero means taps count is taken from `weights`.
pub(crate) fn sse_convolve_column<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    let taps = if TAPS == 0 { weights.len() } else { TAPS };
    debug_check_column_args(dst, src, src_stride, weights, offsets, taps);
    let processed =
        unsafe { sse_convolve_column_impl::<TAPS>(dst, src, src_stride, weights, offsets) };
    convolve_column_generic_from(processed, dst, src, src_stride, weights, offsets);
}

#[target_feature(enable = "sse4.1")]
unsafe fn sse_convolve_column_impl<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) -> usize {
    let taps = if TAPS == 0 { weights.len() } else { TAPS };
    let width = dst.len();
    let rounding = _mm_set1_epi32(FIXED_POINT_ROUNDING);

    let mut cx = 0usize;

    while cx + 16 <= width {
        let mut acc0 = rounding;
        let mut acc1 = rounding;
        let mut acc2 = rounding;
        let mut acc3 = rounding;

        for t in 0..taps {
            let row_start = *offsets.get_unchecked(t) as usize * src_stride + cx;
            let items = _mm_loadu_si128(src.get_unchecked(row_start..).as_ptr() as *const __m128i);
            let coeff = _mm_set1_epi32(*weights.get_unchecked(t));

            acc0 = _mm_add_epi32(acc0, _mm_mullo_epi32(_mm_cvtepu8_epi32(items), coeff));
            acc1 = _mm_add_epi32(
                acc1,
                _mm_mullo_epi32(_mm_cvtepu8_epi32(_mm_srli_si128::<4>(items)), coeff),
            );
            acc2 = _mm_add_epi32(
                acc2,
                _mm_mullo_epi32(_mm_cvtepu8_epi32(_mm_srli_si128::<8>(items)), coeff),
            );
            acc3 = _mm_add_epi32(
                acc3,
                _mm_mullo_epi32(_mm_cvtepu8_epi32(_mm_srli_si128::<12>(items)), coeff),
            );
        }

        let packed = _mm_pack_q14_epi32(acc0, acc1, acc2, acc3);
        _mm_storeu_si128(
            dst.get_unchecked_mut(cx..).as_mut_ptr() as *mut __m128i,
            packed,
        );
        cx += 16;
    }

    cx
}
