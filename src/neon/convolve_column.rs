/*
 * Copyright (c) Radzivon Bartoshyk, 04/2025. All rights reserved.
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
use crate::neon::vpack_q14_s32;
use crate::numerics::FIXED_POINT_ROUNDING;
use std::arch::aarch64::*;

pub(crate) fn neon_convolve_column<const TAPS: usize>(
    dst: &mut [u8],
    src: &[u8],
    src_stride: usize,
    weights: &[i32],
    offsets: &[u32],
) {
    let taps = if TAPS == 0 { weights.len() } else { TAPS };
    debug_check_column_args(dst, src, src_stride, weights, offsets, taps);
    let processed = unsafe {
        let width = dst.len();
        let rounding = vdupq_n_s32(FIXED_POINT_ROUNDING);

        let mut cx = 0usize;

        while cx + 16 <= width {
            let mut acc0 = rounding;
            let mut acc1 = rounding;
            let mut acc2 = rounding;
            let mut acc3 = rounding;

            for t in 0..taps {
                let row_start = *offsets.get_unchecked(t) as usize * src_stride + cx;
                let items = vld1q_u8(src.get_unchecked(row_start..).as_ptr());
                let coeff = vdupq_n_s32(*weights.get_unchecked(t));

                let lo = vreinterpretq_s16_u16(vmovl_u8(vget_low_u8(items)));
                let hi = vreinterpretq_s16_u16(vmovl_high_u8(items));

                acc0 = vmlaq_s32(acc0, vmovl_s16(vget_low_s16(lo)), coeff);
                acc1 = vmlaq_s32(acc1, vmovl_high_s16(lo), coeff);
                acc2 = vmlaq_s32(acc2, vmovl_s16(vget_low_s16(hi)), coeff);
                acc3 = vmlaq_s32(acc3, vmovl_high_s16(hi), coeff);
            }

            vst1q_u8(
                dst.get_unchecked_mut(cx..).as_mut_ptr(),
                vpack_q14_s32(acc0, acc1, acc2, acc3),
            );
            cx += 16;
        }

        cx
    };
    convolve_column_generic_from(processed, dst, src, src_stride, weights, offsets);
}
