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
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
use crate::avx2::avx2_convolve_column;
use crate::convolve_column::{
    convolve_column_generic, convolve_column_paired, convolve_column_unrolled,
};
use crate::convolve_row::{convolve_row_generic, convolve_row_paired, convolve_row_unrolled};
#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
use crate::neon::{neon_convolve_column, neon_convolve_row};
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::{sse_convolve_column, sse_convolve_row};
use std::fmt::{Display, Formatter};

/// Convolves one row: `dst[j]` takes `taps` pairs starting at `j * taps` of `weights` and `offsets`
pub(crate) type RowHandler =
    fn(dst: &mut [u8], src: &[u8], weights: &[i32], offsets: &[u32], taps: usize);

/// Convolves rows of `src` picked by `offsets` into a single destination row
pub(crate) type ColumnHandler =
    fn(dst: &mut [u8], src: &[u8], src_stride: usize, weights: &[i32], offsets: &[u32]);

/// Shape of the routine a taps count is served by.
///
/// Every specialization produces bit-identical output to the generic routine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KernelSpecialization {
    /// Fully unrolled, 2, 4 or 8 taps
    Unrolled(usize),
    /// Unrolled by pairs, 6, 10 or 12 taps
    Paired(usize),
    /// Runtime taps count
    Generic,
}

impl KernelSpecialization {
    pub const fn for_taps(taps: usize) -> KernelSpecialization {
        match taps {
            2 | 4 | 8 => KernelSpecialization::Unrolled(taps),
            6 | 10 | 12 => KernelSpecialization::Paired(taps),
            _ => KernelSpecialization::Generic,
        }
    }
}

/// Instruction set a kernel was selected for
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KernelIsa {
    Scalar,
    Sse41,
    Avx2,
    Neon,
}

impl Display for KernelIsa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelIsa::Scalar => f.write_str("scalar"),
            KernelIsa::Sse41 => f.write_str("sse4.1"),
            KernelIsa::Avx2 => f.write_str("avx2"),
            KernelIsa::Neon => f.write_str("neon"),
        }
    }
}

#[derive(Copy, Clone)]
pub(crate) struct RowKernel {
    pub(crate) handler: RowHandler,
    pub(crate) specialization: KernelSpecialization,
    pub(crate) isa: KernelIsa,
}

#[derive(Copy, Clone)]
pub(crate) struct ColumnKernel {
    pub(crate) handler: ColumnHandler,
    pub(crate) specialization: KernelSpecialization,
    pub(crate) isa: KernelIsa,
}

fn scalar_row_handler(specialization: KernelSpecialization) -> RowHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => convolve_row_unrolled::<2>,
        KernelSpecialization::Unrolled(4) => convolve_row_unrolled::<4>,
        KernelSpecialization::Unrolled(8) => convolve_row_unrolled::<8>,
        KernelSpecialization::Paired(6) => convolve_row_paired::<6>,
        KernelSpecialization::Paired(10) => convolve_row_paired::<10>,
        KernelSpecialization::Paired(12) => convolve_row_paired::<12>,
        _ => convolve_row_generic,
    }
}

fn scalar_column_handler(specialization: KernelSpecialization) -> ColumnHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => convolve_column_unrolled::<2>,
        KernelSpecialization::Unrolled(4) => convolve_column_unrolled::<4>,
        KernelSpecialization::Unrolled(8) => convolve_column_unrolled::<8>,
        KernelSpecialization::Paired(6) => convolve_column_paired::<6>,
        KernelSpecialization::Paired(10) => convolve_column_paired::<10>,
        KernelSpecialization::Paired(12) => convolve_column_paired::<12>,
        _ => convolve_column_generic,
    }
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
fn sse_row_handler(specialization: KernelSpecialization) -> RowHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => sse_convolve_row::<2>,
        KernelSpecialization::Unrolled(4) => sse_convolve_row::<4>,
        KernelSpecialization::Unrolled(8) => sse_convolve_row::<8>,
        KernelSpecialization::Paired(6) => sse_convolve_row::<6>,
        KernelSpecialization::Paired(10) => sse_convolve_row::<10>,
        KernelSpecialization::Paired(12) => sse_convolve_row::<12>,
        _ => sse_convolve_row::<0>,
    }
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
fn sse_column_handler(specialization: KernelSpecialization) -> ColumnHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => sse_convolve_column::<2>,
        KernelSpecialization::Unrolled(4) => sse_convolve_column::<4>,
        KernelSpecialization::Unrolled(8) => sse_convolve_column::<8>,
        KernelSpecialization::Paired(6) => sse_convolve_column::<6>,
        KernelSpecialization::Paired(10) => sse_convolve_column::<10>,
        KernelSpecialization::Paired(12) => sse_convolve_column::<12>,
        _ => sse_convolve_column::<0>,
    }
}

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
fn avx2_column_handler(specialization: KernelSpecialization) -> ColumnHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => avx2_convolve_column::<2>,
        KernelSpecialization::Unrolled(4) => avx2_convolve_column::<4>,
        KernelSpecialization::Unrolled(8) => avx2_convolve_column::<8>,
        KernelSpecialization::Paired(6) => avx2_convolve_column::<6>,
        KernelSpecialization::Paired(10) => avx2_convolve_column::<10>,
        KernelSpecialization::Paired(12) => avx2_convolve_column::<12>,
        _ => avx2_convolve_column::<0>,
    }
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
fn neon_row_handler(specialization: KernelSpecialization) -> RowHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => neon_convolve_row::<2>,
        KernelSpecialization::Unrolled(4) => neon_convolve_row::<4>,
        KernelSpecialization::Unrolled(8) => neon_convolve_row::<8>,
        KernelSpecialization::Paired(6) => neon_convolve_row::<6>,
        KernelSpecialization::Paired(10) => neon_convolve_row::<10>,
        KernelSpecialization::Paired(12) => neon_convolve_row::<12>,
        _ => neon_convolve_row::<0>,
    }
}

#[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
fn neon_column_handler(specialization: KernelSpecialization) -> ColumnHandler {
    match specialization {
        KernelSpecialization::Unrolled(2) => neon_convolve_column::<2>,
        KernelSpecialization::Unrolled(4) => neon_convolve_column::<4>,
        KernelSpecialization::Unrolled(8) => neon_convolve_column::<8>,
        KernelSpecialization::Paired(6) => neon_convolve_column::<6>,
        KernelSpecialization::Paired(10) => neon_convolve_column::<10>,
        KernelSpecialization::Paired(12) => neon_convolve_column::<12>,
        _ => neon_convolve_column::<0>,
    }
}

/// Portable kernel for horizontal pass
pub(crate) fn scalar_row_kernel(taps: usize) -> RowKernel {
    let specialization = KernelSpecialization::for_taps(taps);
    RowKernel {
        handler: scalar_row_handler(specialization),
        specialization,
        isa: KernelIsa::Scalar,
    }
}

/// Portable kernel for vertical pass
pub(crate) fn scalar_column_kernel(taps: usize) -> ColumnKernel {
    let specialization = KernelSpecialization::for_taps(taps);
    ColumnKernel {
        handler: scalar_column_handler(specialization),
        specialization,
        isa: KernelIsa::Scalar,
    }
}

/// Best available kernel for horizontal pass with `taps` taps
pub(crate) fn select_row_kernel(taps: usize) -> RowKernel {
    #[allow(unused_mut)]
    let mut kernel = scalar_row_kernel(taps);
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    {
        kernel.handler = neon_row_handler(kernel.specialization);
        kernel.isa = KernelIsa::Neon;
    }
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        if std::arch::is_x86_feature_detected!("sse4.1") {
            kernel.handler = sse_row_handler(kernel.specialization);
            kernel.isa = KernelIsa::Sse41;
        }
    }
    kernel
}

/// Best available kernel for vertical pass with `taps` taps
pub(crate) fn select_column_kernel(taps: usize) -> ColumnKernel {
    #[allow(unused_mut)]
    let mut kernel = scalar_column_kernel(taps);
    #[cfg(all(target_arch = "aarch64", target_feature = "neon"))]
    {
        kernel.handler = neon_column_handler(kernel.specialization);
        kernel.isa = KernelIsa::Neon;
    }
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    {
        if std::arch::is_x86_feature_detected!("sse4.1") {
            kernel.handler = sse_column_handler(kernel.specialization);
            kernel.isa = KernelIsa::Sse41;
        }
    }
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "avx"))]
    {
        if std::arch::is_x86_feature_detected!("avx2") {
            kernel.handler = avx2_column_handler(kernel.specialization);
            kernel.isa = KernelIsa::Avx2;
        }
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::FIXED_POINT_UNIT;
    use rand::Rng;

    const TAPS: [usize; 9] = [1, 2, 3, 4, 6, 8, 10, 12, 18];

    /// Random weights summing to unit with strong negative lobes
    fn random_taps(
        rng: &mut impl Rng,
        taps: usize,
        count: usize,
        extent: u32,
    ) -> (Vec<i32>, Vec<u32>) {
        let mut weights = Vec::with_capacity(taps * count);
        let mut offsets = Vec::with_capacity(taps * count);
        for _ in 0..count {
            let mut total = 0i32;
            for _ in 0..taps - 1 {
                let w = rng.random_range(-FIXED_POINT_UNIT / 2..FIXED_POINT_UNIT);
                total += w;
                weights.push(w);
            }
            weights.push(FIXED_POINT_UNIT - total);
            for _ in 0..taps {
                offsets.push(rng.random_range(0..extent));
            }
        }
        (weights, offsets)
    }

    #[test]
    fn test_specialization_mapping() {
        assert_eq!(KernelSpecialization::for_taps(2), KernelSpecialization::Unrolled(2));
        assert_eq!(KernelSpecialization::for_taps(8), KernelSpecialization::Unrolled(8));
        assert_eq!(KernelSpecialization::for_taps(6), KernelSpecialization::Paired(6));
        assert_eq!(KernelSpecialization::for_taps(12), KernelSpecialization::Paired(12));
        assert_eq!(KernelSpecialization::for_taps(3), KernelSpecialization::Generic);
        assert_eq!(KernelSpecialization::for_taps(18), KernelSpecialization::Generic);
        assert_eq!(select_row_kernel(4).specialization, KernelSpecialization::Unrolled(4));
        assert_eq!(select_column_kernel(7).specialization, KernelSpecialization::Generic);
    }

    #[test]
    fn test_row_kernels_match_generic() {
        let mut rng = rand::rng();
        for &taps in TAPS.iter() {
            for width in [1usize, 3, 7, 8, 9, 16, 31, 67] {
                let src_width = rng.random_range(1..100u32);
                let src: Vec<u8> = (0..src_width).map(|_| rng.random()).collect();
                let (weights, offsets) = random_taps(&mut rng, taps, width, src_width);

                let mut reference = vec![0u8; width];
                convolve_row_generic(&mut reference, &src, &weights, &offsets, taps);

                for kernel in [scalar_row_kernel(taps), select_row_kernel(taps)] {
                    let mut dst = vec![0u8; width];
                    (kernel.handler)(&mut dst, &src, &weights, &offsets, taps);
                    assert_eq!(dst, reference, "{} taps {} width on {}", taps, width, kernel.isa);
                }
            }
        }
    }

    #[test]
    fn test_column_kernels_match_generic() {
        let mut rng = rand::rng();
        for &taps in TAPS.iter() {
            for width in [1usize, 5, 15, 16, 17, 32, 33, 70] {
                let rows = rng.random_range(1..24u32);
                let stride = width + rng.random_range(0..9usize);
                let src: Vec<u8> = (0..stride * rows as usize).map(|_| rng.random()).collect();
                let (weights, offsets) = random_taps(&mut rng, taps, 1, rows);

                let mut reference = vec![0u8; width];
                convolve_column_generic(&mut reference, &src, stride, &weights, &offsets);

                for kernel in [scalar_column_kernel(taps), select_column_kernel(taps)] {
                    let mut dst = vec![0u8; width];
                    (kernel.handler)(&mut dst, &src, stride, &weights, &offsets);
                    assert_eq!(dst, reference, "{} taps {} width on {}", taps, width, kernel.isa);
                }
            }
        }
    }

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    #[test]
    fn test_sse_column_matches_generic() {
        if !std::arch::is_x86_feature_detected!("sse4.1") {
            return;
        }
        let mut rng = rand::rng();
        for &taps in TAPS.iter() {
            let handler = sse_column_handler(KernelSpecialization::for_taps(taps));
            let width = 48 + rng.random_range(0..16usize);
            let src: Vec<u8> = (0..width * 20).map(|_| rng.random()).collect();
            let (weights, offsets) = random_taps(&mut rng, taps, 1, 20);
            let mut reference = vec![0u8; width];
            convolve_column_generic(&mut reference, &src, width, &weights, &offsets);
            let mut dst = vec![0u8; width];
            handler(&mut dst, &src, width, &weights, &offsets);
            assert_eq!(dst, reference);
        }
    }

    #[test]
    fn test_extreme_sums_saturate_equally() {
        let taps = 4;
        let src = [255u8, 0, 255, 0];
        // Overshoot and undershoot around the clamp range
        let unit = FIXED_POINT_UNIT;
        let weights = [3 * unit, -unit, -unit, 0]
            .into_iter()
            .chain([-unit, unit, 0, unit])
            .cycle()
            .take(taps * 16)
            .collect::<Vec<_>>();
        let offsets = (0..taps * 16).map(|i| (i % 4) as u32).collect::<Vec<_>>();
        let mut reference = vec![0u8; 16];
        convolve_row_generic(&mut reference, &src, &weights, &offsets, taps);
        assert_eq!(reference[0], 255);
        assert_eq!(reference[1], 0);
        let mut dst = vec![1u8; 16];
        (select_row_kernel(taps).handler)(&mut dst, &src, &weights, &offsets, taps);
        assert_eq!(dst, reference);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "short weights table")]
    fn test_row_kernel_rejects_short_tables() {
        let taps = 4;
        let src = [0u8; 32];
        let weights = vec![FIXED_POINT_UNIT / 4; taps * 7];
        let offsets = vec![0u32; taps * 8];
        let mut dst = [0u8; 8];
        (select_row_kernel(taps).handler)(&mut dst, &src, &weights, &offsets, taps);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "source row out of bounds")]
    fn test_column_kernel_rejects_rows_past_source() {
        let stride = 32;
        let src = vec![0u8; stride * 4];
        let weights = [FIXED_POINT_UNIT / 2; 2];
        let offsets = [3u32, 4];
        let mut dst = [0u8; 32];
        (select_column_kernel(2).handler)(&mut dst, &src, stride, &weights, &offsets);
    }
}
