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
use crate::convolve_row::{convolve_row_generic_from, debug_check_row_args};
use crate::neon::vqdescale_q14_s32;
use crate::numerics::FIXED_POINT_ROUNDING;
use std::arch::aarch64::*;

/// Horizontal convolution, 4 destination samples per iteration
pub(crate) fn neon_convolve_row<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    weights: &[i32],
    offsets: &[u32],
    taps: usize,
) {
    debug_assert!(TAPS == 0 || TAPS == taps);
    debug_check_row_args(dst, src, weights, offsets, taps);
    let taps = if TAPS == 0 { taps } else { TAPS };
    let processed = unsafe {
        let width = dst.len();
        let rounding = vdupq_n_s32(FIXED_POINT_ROUNDING);

        let mut cx = 0usize;

        while cx + 4 <= width {
            let mut acc = rounding;
            let base = cx * taps;
            for t in 0..taps {
                let mut pixels = [0i32; 4];
                let mut coeffs = [0i32; 4];
                for lane in 0..4 {
                    let index = base + lane * taps + t;
                    pixels[lane] =
                        *src.get_unchecked(*offsets.get_unchecked(index) as usize) as i32;
                    coeffs[lane] = *weights.get_unchecked(index);
                }
                acc = vmlaq_s32(acc, vld1q_s32(pixels.as_ptr()), vld1q_s32(coeffs.as_ptr()));
            }
            let narrowed = vqmovn_u16(vcombine_u16(vqdescale_q14_s32(acc), vdup_n_u16(0)));
            let mut store = [0u8; 8];
            vst1_u8(store.as_mut_ptr(), narrowed);
            dst.get_unchecked_mut(cx..cx + 4)
                .copy_from_slice(&store[..4]);
            cx += 4;
        }

        cx
    };
    convolve_row_generic_from(processed, dst, src, weights, offsets, taps);
}
