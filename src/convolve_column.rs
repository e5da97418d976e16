/*
 * Copyright (c) Radzivon Bartoshyk, 03/2025. All rights reserved.
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

/// Bounds every column kernel relies on, checked in debug builds only
#[inline(always)]
pub(crate) fn debug_check_column_args(
    dst: &[u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) {
    debug_assert!(weights.len() >= taps, "short weights table");
    debug_assert!(offsets.len() >= taps, "short offsets table");
    let row_fits = |offset: &u32| *offset as usize * src_stride + dst.len() <= src.len();
    debug_assert!(
        offsets.iter().take(taps).all(row_fits),
        "source row out of bounds"
    );
}

/// Vertical convolution producing one destination row.
///
/// Source rows are picked by `offsets` and blended with `weights`, one pair per tap.
/// Destination width is taken from `dst` and every source row must hold at least that many samples.
pub(crate) fn convolve_column_generic(
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    debug_check_column_args(dst, src, src_stride, weights, offsets, weights.len());
    convolve_column_generic_from(0, dst, src, src_stride, weights, offsets);
}

#[inline]
pub(crate) fn convolve_column_generic_from(
    start_cx: usize,
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    for (x, dst) in dst.iter_mut().enumerate().skip(start_cx) {
        let mut sum = 0i32;
        for (&weight, &offset) in weights.iter().zip(offsets.iter()) {
            sum += weight * src[offset as usize * src_stride + x] as i32;
        }
        *dst = saturate_fixed(sum);
    }
}

#[inline(always)]
fn source_rows<'a, const TAPS: usize>(
    src: &'a [u8],
    src_stride: usize,
    offsets: &[u32],
    width: usize,
) -> [&'a [u8]; TAPS] {
    std::array::from_fn(|t| {
        let start = offsets[t] as usize * src_stride;
        &src[start..start + width]
    })
}

/// Fully unrolled vertical convolution for a known taps count
pub(crate) fn convolve_column_unrolled<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    debug_check_column_args(dst, src, src_stride, weights, offsets, TAPS);
    convolve_column_unrolled_from::<TAPS>(0, dst, src, src_stride, weights, offsets);
}

#[inline]
pub(crate) fn convolve_column_unrolled_from<const TAPS: usize>(
    start_cx: usize,
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    let rows = source_rows::<TAPS>(src, src_stride, offsets, dst.len());
    let weights: [i32; TAPS] = std::array::from_fn(|t| weights[t]);
    for (x, dst) in dst.iter_mut().enumerate().skip(start_cx) {
        let mut sum = 0i32;
        for t in 0..TAPS {
            sum += weights[t] * rows[t][x] as i32;
        }
        *dst = saturate_fixed(sum);
    }
}

/// Vertical convolution accumulating taps pairwise into two sums
pub(crate) fn convolve_column_paired<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    debug_check_column_args(dst, src, src_stride, weights, offsets, TAPS);
    let rows = source_rows::<TAPS>(src, src_stride, offsets, dst.len());
    let weights: [i32; TAPS] = std::array::from_fn(|t| weights[t]);
    for (x, dst) in dst.iter_mut().enumerate() {
        let mut sum0 = 0i32;
        let mut sum1 = 0i32;
        for t in (0..TAPS).step_by(2) {
            sum0 += weights[t] * rows[t][x] as i32;
            sum1 += weights[t + 1] * rows[t + 1][x] as i32;
        }
        *dst = saturate_fixed(sum0 + sum1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::FIXED_POINT_UNIT;

    #[test]
    fn test_column_blend() {
        // 3 rows of width 2 inside stride 3, padding byte must never be read into output
        let src = [10u8, 20, 99, 30, 40, 99, 50, 60, 99];
        let weights = [FIXED_POINT_UNIT / 4, FIXED_POINT_UNIT / 4 * 3];
        let offsets = [0u32, 2];
        let mut generic = [0u8; 2];
        convolve_column_generic(&mut generic, &src, 3, &weights, &offsets);
        assert_eq!(generic, [40, 50]);
        let mut unrolled = [0u8; 2];
        convolve_column_unrolled::<2>(&mut unrolled, &src, 3, &weights, &offsets);
        assert_eq!(unrolled, generic);
        let mut paired = [0u8; 2];
        convolve_column_paired::<2>(&mut paired, &src, 3, &weights, &offsets);
        assert_eq!(paired, generic);
    }

    #[test]
    fn test_column_duplicated_offsets() {
        let src = [200u8; 8];
        let weights = [-2048, 6144, 6144, 6144];
        let offsets = [0u32, 0, 1, 1];
        let mut dst = [0u8; 4];
        convolve_column_unrolled::<4>(&mut dst, &src, 4, &weights, &offsets);
        assert_eq!(dst, [200; 4]);
    }

    #[test]
    fn test_column_tail_from() {
        let src = [50u8; 10];
        let mut dst = [1u8; 5];
        convolve_column_generic_from(3, &mut dst, &src, 5, &[FIXED_POINT_UNIT], &[1]);
        assert_eq!(dst, [1, 1, 1, 50, 50]);
    }
}
