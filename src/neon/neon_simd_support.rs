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
use crate::numerics::FIXED_POINT_BITS;
use std::arch::aarch64::*;

/// Drops Q14 fraction of biased accumulators and saturates into `u16`
#[inline(always)]
pub(crate) unsafe fn vqdescale_q14_s32(acc: int32x4_t) -> uint16x4_t {
    let clamped = vmaxq_s32(acc, vdupq_n_s32(0));
    vqmovun_s32(vshrq_n_s32::<FIXED_POINT_BITS>(clamped))
}

/// Saturating narrow of 16 biased Q14 accumulators into 16 bytes
#[inline(always)]
pub(crate) unsafe fn vpack_q14_s32(
    a0: int32x4_t,
    a1: int32x4_t,
    a2: int32x4_t,
    a3: int32x4_t,
) -> uint8x16_t {
    let lo = vcombine_u16(vqdescale_q14_s32(a0), vqdescale_q14_s32(a1));
    let hi = vcombine_u16(vqdescale_q14_s32(a2), vqdescale_q14_s32(a3));
    vcombine_u8(vqmovn_u16(lo), vqmovn_u16(hi))
}
