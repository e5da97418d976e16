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
use crate::filter::ResamplingFilter;
use crate::numerics::{quantize_weight, FIXED_POINT_UNIT};
use crate::resample_error::check_overflow_v2;
use crate::ResampleError;

/// One contribution of a source sample to a destination sample
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Tap {
    /// Index into source row or column, always inside the source extent
    pub offset: u32,
    /// Q14 weight
    pub weight: i32,
}

/// Empty vector able to hold `capacity` items, unreachable allocations are reported as overflow
fn try_table<T>(capacity: usize) -> Result<Vec<T>, ResampleError> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(capacity)
        .map_err(|_| ResampleError::PointerOverflow)?;
    Ok(table)
}

/// Convolution plan of one axis.
///
/// Holds `taps` (offset, weight) pairs for every destination index. Tap count is the same
/// for every destination index, every tap list sums to exactly [FIXED_POINT_UNIT] and every
/// offset lies in `[0, source_extent - 1]`; duplicated offsets at borders are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingPlan {
    taps: usize,
    source_extent: u32,
    destination_extent: u32,
    offsets: Vec<u32>,
    weights: Vec<i32>,
}

impl ScalingPlan {
    /// Builds plan resampling `source_extent` samples into `destination_extent` samples
    pub fn build(
        filter: &ResamplingFilter,
        source_extent: u32,
        destination_extent: u32,
    ) -> Result<ScalingPlan, ResampleError> {
        if source_extent == 0 || destination_extent == 0 {
            return Err(ResampleError::ZeroSizedAxis);
        }
        let ratio = source_extent as f64 / destination_extent as f64;
        // Widen support when downscaling to low-pass the source
        let scale = ratio.max(1.);
        let support = filter.radius() * scale;
        let taps = ((2. * support).ceil() as usize).max(1);
        check_overflow_v2(destination_extent as usize, taps)?;

        let table_size = destination_extent as usize * taps;
        let mut offsets = try_table::<u32>(table_size)?;
        let mut weights = try_table::<i32>(table_size)?;
        let mut continuous = try_table::<f64>(taps)?;
        continuous.resize(taps, 0.);
        let last = source_extent as i64 - 1;

        for j in 0..destination_extent as usize {
            let center = (j as f64 + 0.5) * ratio - 0.5;
            let start = (center - support).floor() as i64 + 1;

            let mut sum = 0f64;
            for (k, weight) in continuous.iter_mut().enumerate() {
                let position = (start + k as i64) as f64;
                *weight = filter.weight((position - center) / scale);
                sum += *weight;
            }

            let nearest = (center.round() as i64 - start).clamp(0, taps as i64 - 1) as usize;
            if sum.abs() < f64::EPSILON {
                continuous.fill(0.);
                continuous[nearest] = 1.;
                sum = 1.;
            }

            let first = weights.len();
            let mut total = 0i32;
            for (k, &weight) in continuous.iter().enumerate() {
                let q = quantize_weight(weight / sum);
                total += q;
                weights.push(q);
                offsets.push((start + k as i64).clamp(0, last) as u32);
            }
            weights[first + nearest] += FIXED_POINT_UNIT - total;
        }

        log::trace!(
            "{} plan {} -> {}: {} taps",
            filter,
            source_extent,
            destination_extent,
            taps
        );

        Ok(ScalingPlan {
            taps,
            source_extent,
            destination_extent,
            offsets,
            weights,
        })
    }

    #[inline]
    pub fn taps(&self) -> usize {
        self.taps
    }

    #[inline]
    pub fn source_extent(&self) -> u32 {
        self.source_extent
    }

    #[inline]
    pub fn destination_extent(&self) -> u32 {
        self.destination_extent
    }

    /// Taps contributing to destination sample `index`, empty when `index` is past the
    /// destination extent
    pub fn tap_list(&self, index: usize) -> impl Iterator<Item = Tap> + '_ {
        let start = index.saturating_mul(self.taps);
        let end = start.saturating_add(self.taps);
        let offsets = self.offsets.get(start..end).unwrap_or(&[]);
        let weights = self.weights.get(start..end).unwrap_or(&[]);
        offsets
            .iter()
            .zip(weights.iter())
            .map(|(&offset, &weight)| Tap { offset, weight })
    }

    #[inline]
    pub(crate) fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    #[inline]
    pub(crate) fn weights(&self) -> &[i32] {
        &self.weights
    }
}
