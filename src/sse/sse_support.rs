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
use crate::numerics::FIXED_POINT_BITS;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Drops Q14 fraction of already biased accumulators, negative sums become zero
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn _mm_descale_q14_epi32(acc: __m128i) -> __m128i {
    _mm_srai_epi32::<FIXED_POINT_BITS>(_mm_max_epi32(acc, _mm_setzero_si128()))
}

/// Saturating narrow of 16 biased Q14 accumulators into 16 bytes
#[inline]
#[target_feature(enable = "sse4.1")]
pub(crate) unsafe fn _mm_pack_q14_epi32(
    a0: __m128i,
    a1: __m128i,
    a2: __m128i,
    a3: __m128i,
) -> __m128i {
    let lo = _mm_packs_epi32(_mm_descale_q14_epi32(a0), _mm_descale_q14_epi32(a1));
    let hi = _mm_packs_epi32(_mm_descale_q14_epi32(a2), _mm_descale_q14_epi32(a3));
    _mm_packus_epi16(lo, hi)
}
