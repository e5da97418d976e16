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
use crate::convolve_row::{convolve_row_generic_from, debug_check_row_args};
use crate::numerics::FIXED_POINT_ROUNDING;
use crate::sse::_mm_descale_q14_epi32;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Horizontal convolution, 8 destination samples per iteration.
///
/// `TAPS` equal to zero means taps count is taken at runtime.
pub(crate) fn sse_convolve_row<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) {
    debug_assert!(TAPS == 0 || TAPS == taps);
    debug_check_row_args(dst, src, weights, offsets, taps);
    let processed = unsafe { sse_convolve_row_impl::<TAPS>(dst, src, weights, offsets, taps) };
    convolve_row_generic_from(processed, dst, src, weights, offsets, taps);
}

#[inline(always)]
unsafe fn gather_lanes(
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    base: usize,
    taps: usize,
) -> (__m128i, __m128i) {
    let pixels = _mm_setr_epi32(
        *src.get_unchecked(*offsets.get_unchecked(base) as usize) as i32,
        *src.get_unchecked(*offsets.get_unchecked(base + taps) as usize) as i32,
        *src.get_unchecked(*offsets.get_unchecked(base + taps * 2) as usize) as i32,
        *src.get_unchecked(*offsets.get_unchecked(base + taps * 3) as usize) as i32,
    );
    let coeffs = _mm_setr_epi32(
        *weights.get_unchecked(base),
        *weights.get_unchecked(base + taps),
        *weights.get_unchecked(base + taps * 2),
        *weights.get_unchecked(base + taps * 3),
    );
    (pixels, coeffs)
}

#[target_feature(enable = "sse4.1")]
unsafe fn sse_convolve_row_impl<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) -> usize {
    let taps = if TAPS == 0 { taps } else { TAPS };
    let width = dst.len();
    let rounding = _mm_set1_epi32(FIXED_POINT_ROUNDING);
    let zeros = _mm_setzero_si128();

    let mut cx = 0usize;

    while cx + 8 <= width {
        let mut acc0 = rounding;
        let mut acc1 = rounding;
        let base = cx * taps;
        for t in 0..taps {
            let (px0, w0) = gather_lanes(src, weights, offsets, base + t, taps);
            let (px1, w1) = gather_lanes(src, weights, offsets, base + taps * 4 + t, taps);
            acc0 = _mm_add_epi32(acc0, _mm_mullo_epi32(px0, w0));
            acc1 = _mm_add_epi32(acc1, _mm_mullo_epi32(px1, w1));
        }
        let packed = _mm_packus_epi16(
            _mm_packs_epi32(_mm_descale_q14_epi32(acc0), _mm_descale_q14_epi32(acc1)),
            zeros,
        );
        _mm_storeu_si64(dst.get_unchecked_mut(cx..).as_mut_ptr(), packed);
        cx += 8;
    }

    cx
}
