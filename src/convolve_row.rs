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
use crate::numerics::saturate_fixed;

/// Bounds every row kernel relies on, checked in debug builds only
#[inline(always)]
pub(crate) fn debug_check_row_args(
    dst: &[u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) {
    debug_assert!(weights.len() >= dst.len() * taps, "short weights table");
    debug_assert!(offsets.len() >= dst.len() * taps, "short offsets table");
    debug_assert!(
        offsets.iter().all(|&offset| (offset as usize) < src.len()),
        "offset out of source"
    );
}

/// Horizontal convolution of one row, any taps count.
///
/// `weights` and `offsets` hold `taps` entries per destination sample.
pub(crate) fn convolve_row_generic(
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) {
    debug_check_row_args(dst, src, weights, offsets, taps);
    convolve_row_generic_from(0, dst, src, weights, offsets, taps);
}

#[inline]
pub(crate) fn convolve_row_generic_from(
    start_cx: usize,
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) {
    for ((dst, weights), offsets) in dst
        .iter_mut()
        .zip(weights.chunks_exact(taps))
        .zip(offsets.chunks_exact(taps))
        .skip(start_cx)
    {
        let mut sum = 0i32;
        for (&weight, &offset) in weights.iter().zip(offsets.iter()) {
            sum += weight * src[offset as usize] as i32;
        }
        *dst = saturate_fixed(sum);
    }
}

/// Fully unrolled horizontal convolution for a known taps count
pub(crate) fn convolve_row_unrolled<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    _: usize,
) {
    debug_check_row_args(dst, src, weights, offsets, TAPS);
    convolve_row_unrolled_from::<TAPS>(0, dst, src, weights, offsets);
}

#[inline]
pub(crate) fn convolve_row_unrolled_from<const TAPS: usize>(
    start_cx: usize,
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
) {
    for ((dst, weights), offsets) in dst
        .iter_mut()
        .zip(weights.chunks_exact(TAPS))
        .zip(offsets.chunks_exact(TAPS))
        .skip(start_cx)
    {
        let mut sum = 0i32;
        for t in 0..TAPS {
            sum += weights[t] * src[offsets[t] as usize] as i32;
        }
        *dst = saturate_fixed(sum);
    }
}

/// Horizontal convolution accumulating taps pairwise into two sums
pub(crate) fn convolve_row_paired<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    _: usize,
) {
    debug_check_row_args(dst, src, weights, offsets, TAPS);
    for ((dst, weights), offsets) in dst
        .iter_mut()
        .zip(weights.chunks_exact(TAPS))
        .zip(offsets.chunks_exact(TAPS))
    {
        let mut sum0 = 0i32;
        let mut sum1 = 0i32;
        for (w, o) in weights.chunks_exact(2).zip(offsets.chunks_exact(2)) {
            sum0 += w[0] * src[o[0] as usize] as i32;
            sum1 += w[1] * src[o[1] as usize] as i32;
        }
        *dst = saturate_fixed(sum0 + sum1);
    }
}
