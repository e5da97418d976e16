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
#![forbid(unsafe_code)]

/// Fractional bits of every quantized filter weight
pub const FIXED_POINT_BITS: i32 = 14;
/// Fixed-point representation of 1.0, every tap list of a plan sums to exactly this value
pub const FIXED_POINT_UNIT: i32 = 1 << FIXED_POINT_BITS;
pub(crate) const FIXED_POINT_ROUNDING: i32 = 1 << (FIXED_POINT_BITS - 1);

#[inline(always)]
/// Saturating round-half-up of an accumulated Q14 sum into an 8-bit sample.
///
/// Negative sums are floored to zero before the shift, then the result is clamped to 255.
pub(crate) fn saturate_fixed(sum: i32) -> u8 {
    let biased = (sum + FIXED_POINT_ROUNDING).max(0);
    (biased >> FIXED_POINT_BITS).min(255) as u8
}

#[inline]
/// Quantizes normalized continuous weight into Q14
pub(crate) fn quantize_weight(weight: f64) -> i32 {
    (weight * FIXED_POINT_UNIT as f64).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate_fixed_bounds() {
        assert_eq!(saturate_fixed(-1), 0);
        assert_eq!(saturate_fixed(-FIXED_POINT_UNIT * 40), 0);
        assert_eq!(saturate_fixed(0), 0);
        assert_eq!(saturate_fixed(255 * FIXED_POINT_UNIT), 255);
        assert_eq!(saturate_fixed(256 * FIXED_POINT_UNIT), 255);
        assert_eq!(saturate_fixed(i32::MAX - FIXED_POINT_ROUNDING), 255);
    }

    #[test]
    fn test_saturate_fixed_rounds_half_up() {
        assert_eq!(saturate_fixed(FIXED_POINT_ROUNDING - 1), 0);
        assert_eq!(saturate_fixed(FIXED_POINT_ROUNDING), 1);
        assert_eq!(saturate_fixed(100 * FIXED_POINT_UNIT + FIXED_POINT_ROUNDING - 1), 100);
        assert_eq!(saturate_fixed(100 * FIXED_POINT_UNIT + FIXED_POINT_ROUNDING), 101);
        assert_eq!(saturate_fixed(-FIXED_POINT_ROUNDING), 0);
    }

    #[test]
    fn test_quantize_weight() {
        assert_eq!(quantize_weight(1.0), FIXED_POINT_UNIT);
        assert_eq!(quantize_weight(0.5), FIXED_POINT_ROUNDING);
        assert_eq!(quantize_weight(-0.25), -4096);
        assert_eq!(quantize_weight(1e-9), 0);
    }
}
