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
use crate::numerics::FIXED_POINT_BITS;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn _mm256_descale_q14_epi32(acc: __m256i) -> __m256i {
    _mm256_srai_epi32::<FIXED_POINT_BITS>(_mm256_max_epi32(acc, _mm256_setzero_si256()))
}

/// Saturating narrow of two rows of 8 biased Q14 accumulators into 16 ordered bytes
#[inline]
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn _mm256_pack_q14_epi32(lo: __m256i, hi: __m256i) -> __m128i {
    let packed = _mm256_packs_epi32(_mm256_descale_q14_epi32(lo), _mm256_descale_q14_epi32(hi));
    // packs works per 128-bit lane, restore sample order
    let ordered = _mm256_permute4x64_epi64::<0b11_01_10_00>(packed);
    _mm_packus_epi16(
        _mm256_castsi256_si128(ordered),
        _mm256_extracti128_si256::<1>(ordered),
    )
}
