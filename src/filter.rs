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
use crate::ResampleError;
use num_traits::{Float, FloatConst};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Declares filter family used to build resampling weights
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum FilterFamily {
    /// Triangle filter, support radius 1
    Bilinear,
    /// Keys cubic convolution with a = -0.5, support radius 2
    Bicubic,
    /// Sinc windowed sinc, support radius equals to order
    Lanczos(u32),
}

/// Continuous resampling filter.
///
/// Weight function is defined on `[-radius, radius]` and is zero outside.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResamplingFilter {
    family: FilterFamily,
    radius: f64,
}

const BICUBIC_A: f64 = -0.5;

/// Largest accepted Lanczos order
pub const MAX_LANCZOS_ORDER: i32 = 64;

#[inline(always)]
fn triangle<T: Float>(x: T) -> T {
    let ax = x.abs();
    if ax < T::one() {
        T::one() - ax
    } else {
        T::zero()
    }
}

#[inline(always)]
fn keys_cubic<T: Float>(a: T, x: T) -> T {
    let ax = x.abs();
    let one = T::one();
    let two = one + one;
    let three = two + one;
    if ax < one {
        ((a + two) * ax - (a + three)) * ax * ax + one
    } else if ax < two {
        let four = two + two;
        let five = four + one;
        let eight = four + four;
        ((a * ax - five * a) * ax + eight * a) * ax - four * a
    } else {
        T::zero()
    }
}

#[inline(always)]
fn sinc<T: Float + FloatConst>(x: T) -> T {
    if x == T::zero() {
        T::one()
    } else {
        let a = x * T::PI();
        a.sin() / a
    }
}

#[inline(always)]
fn lanczos<T: Float + FloatConst>(order: T, x: T) -> T {
    if x.abs() < order {
        sinc(x) * sinc(x / order)
    } else {
        T::zero()
    }
}

impl ResamplingFilter {
    pub fn bilinear() -> Self {
        ResamplingFilter {
            family: FilterFamily::Bilinear,
            radius: 1.,
        }
    }

    pub fn bicubic() -> Self {
        ResamplingFilter {
            family: FilterFamily::Bicubic,
            radius: 2.,
        }
    }

    /// Creates Lanczos filter of given order, order must be in `1..=MAX_LANCZOS_ORDER`
    pub fn lanczos(order: i32) -> Result<Self, ResampleError> {
        if !(1..=MAX_LANCZOS_ORDER).contains(&order) {
            return Err(ResampleError::InvalidLanczosOrder(order));
        }
        Ok(ResamplingFilter {
            family: FilterFamily::Lanczos(order as u32),
            radius: order as f64,
        })
    }

    /// Creates filter for a family, fails on Lanczos order out of range
    pub fn new(family: FilterFamily) -> Result<Self, ResampleError> {
        match family {
            FilterFamily::Bilinear => Ok(Self::bilinear()),
            FilterFamily::Bicubic => Ok(Self::bicubic()),
            FilterFamily::Lanczos(order) => {
                let order = i32::try_from(order).unwrap_or(i32::MAX);
                Self::lanczos(order)
            }
        }
    }

    pub fn family(&self) -> FilterFamily {
        self.family
    }

    /// Base support radius, before widening for downscaling
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Continuous weight at distance `x` from the sampling center
    pub fn weight(&self, x: f64) -> f64 {
        match self.family {
            FilterFamily::Bilinear => triangle(x),
            FilterFamily::Bicubic => keys_cubic(BICUBIC_A, x),
            FilterFamily::Lanczos(_) => lanczos(self.radius, x),
        }
    }

    pub fn name(&self) -> String {
        match self.family {
            FilterFamily::Bilinear => "bilinear".to_string(),
            FilterFamily::Bicubic => "bicubic".to_string(),
            FilterFamily::Lanczos(order) => format!("lanczos{}", order),
        }
    }
}

impl Display for ResamplingFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ResamplingFilter {
    type Err = ResampleError;

    /// Parses `bilinear`, `bicubic` or `lanczos<N>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "bilinear" => Ok(Self::bilinear()),
            "bicubic" => Ok(Self::bicubic()),
            _ => match lowered.strip_prefix("lanczos") {
                Some(order) => {
                    let order = order
                        .parse::<i32>()
                        .map_err(|_| ResampleError::UnknownFilter(s.to_string()))?;
                    Self::lanczos(order)
                }
                None => Err(ResampleError::UnknownFilter(s.to_string())),
            },
        }
    }
}
