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
use crate::filter::MAX_LANCZOS_ORDER;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

/// Broad class of a [ResampleError].
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ResampleErrorKind {
    /// Descriptors or filter parameters can't describe a valid conversion
    Configuration,
    /// Buffers handed to a converter don't match the geometry it was built for
    DimensionMismatch,
    /// An axis has zero extent
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    PlaneCountMismatch(MismatchedSize),
    InterlacingMismatch,
    InterlacedPlaneTooShort { plane: usize, rows: u32 },
    UnknownFilter(String),
    InvalidLanczosOrder(i32),
    PointerOverflow,
    ImageDimensionsMismatch,
    StrideMismatch { plane: usize, size: MismatchedSize },
    PlaneSizeMismatch { plane: usize, size: MismatchedSize },
    ZeroSizedAxis,
}

impl ResampleError {
    pub fn kind(&self) -> ResampleErrorKind {
        match self {
            ResampleError::PlaneCountMismatch(_)
            | ResampleError::InterlacingMismatch
            | ResampleError::InterlacedPlaneTooShort { .. }
            | ResampleError::UnknownFilter(_)
            | ResampleError::InvalidLanczosOrder(_)
            | ResampleError::PointerOverflow => ResampleErrorKind::Configuration,
            ResampleError::ImageDimensionsMismatch
            | ResampleError::StrideMismatch { .. }
            | ResampleError::PlaneSizeMismatch { .. } => ResampleErrorKind::DimensionMismatch,
            ResampleError::ZeroSizedAxis => ResampleErrorKind::Range,
        }
    }
}

impl Display for ResampleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleError::PlaneCountMismatch(size) => f.write_fmt(format_args!(
                "Images must have the same planes count, output has {}, but input has {}",
                size.expected, size.received
            )),
            ResampleError::InterlacingMismatch => {
                f.write_str("Input and output must be both interlaced or both progressive")
            }
            ResampleError::InterlacedPlaneTooShort { plane, rows } => f.write_fmt(format_args!(
                "Interlaced plane {} must have at least 2 rows, but it has {}",
                plane, rows
            )),
            ResampleError::UnknownFilter(name) => {
                f.write_fmt(format_args!("Unknown resampling filter '{}'", name))
            }
            ResampleError::InvalidLanczosOrder(order) => f.write_fmt(format_args!(
                "Lanczos order must be in 1..={}, but it was {}",
                MAX_LANCZOS_ORDER, order
            )),
            ResampleError::PointerOverflow => {
                f.write_str("Image size overflow pointer capabilities")
            }
            ResampleError::ImageDimensionsMismatch => {
                f.write_str("Image dimensions do not match the converter configuration")
            }
            ResampleError::StrideMismatch { plane, size } => f.write_fmt(format_args!(
                "Plane {} stride mismatch: expected={}, received={}",
                plane, size.expected, size.received
            )),
            ResampleError::PlaneSizeMismatch { plane, size } => f.write_fmt(format_args!(
                "Plane {} have invalid size, it must be {}, but it was {}",
                plane, size.expected, size.received
            )),
            ResampleError::ZeroSizedAxis => f.write_str("Zero sized images is not supported"),
        }
    }
}

impl Error for ResampleError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), ResampleError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(ResampleError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_plane<V>(
    data: &[V],
    plane: usize,
    stride: u32,
    width: u32,
    height: u32,
) -> Result<(), ResampleError> {
    check_overflow_v2(stride as usize, height as usize)?;
    if (stride as usize) < (width as usize) {
        return Err(ResampleError::StrideMismatch {
            plane,
            size: MismatchedSize {
                expected: width as usize,
                received: stride as usize,
            },
        });
    }
    if stride as usize * height as usize != data.len() {
        return Err(ResampleError::PlaneSizeMismatch {
            plane,
            size: MismatchedSize {
                expected: stride as usize * height as usize,
                received: data.len(),
            },
        });
    }
    Ok(())
}
