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
/// Declares chroma subsampling of a planar image.
///
/// Chroma extents are luma extents divided by the ratio and rounded up.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum YuvChromaSubsampling {
    /// Luma only, single plane
    Yuv400 = 0,
    Yuv420 = 1,
    Yuv422 = 2,
    Yuv440 = 3,
    Yuv444 = 4,
    Yuv411 = 5,
    Yuv410 = 6,
}

impl From<u8> for YuvChromaSubsampling {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => YuvChromaSubsampling::Yuv400,
            1 => YuvChromaSubsampling::Yuv420,
            2 => YuvChromaSubsampling::Yuv422,
            3 => YuvChromaSubsampling::Yuv440,
            4 => YuvChromaSubsampling::Yuv444,
            5 => YuvChromaSubsampling::Yuv411,
            6 => YuvChromaSubsampling::Yuv410,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl YuvChromaSubsampling {
    #[inline]
    pub const fn planes_count(self) -> usize {
        match self {
            YuvChromaSubsampling::Yuv400 => 1,
            _ => 3,
        }
    }

    /// Horizontal and vertical luma to chroma ratio
    #[inline]
    pub const fn chroma_ratio(self) -> (u32, u32) {
        match self {
            YuvChromaSubsampling::Yuv400 | YuvChromaSubsampling::Yuv444 => (1, 1),
            YuvChromaSubsampling::Yuv420 => (2, 2),
            YuvChromaSubsampling::Yuv422 => (2, 1),
            YuvChromaSubsampling::Yuv440 => (1, 2),
            YuvChromaSubsampling::Yuv411 => (4, 1),
            YuvChromaSubsampling::Yuv410 => (4, 2),
        }
    }

    #[inline]
    pub const fn chroma_size(self, width: u32, height: u32) -> (u32, u32) {
        let (rx, ry) = self.chroma_ratio();
        (width.div_ceil(rx), height.div_ceil(ry))
    }
}

/// Role of a plane inside a planar image
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub enum PlaneRole {
    Luma,
    ChromaU,
    ChromaV,
}

impl PlaneRole {
    #[inline]
    pub(crate) const fn from_index(index: usize) -> PlaneRole {
        match index {
            0 => PlaneRole::Luma,
            1 => PlaneRole::ChromaU,
            _ => PlaneRole::ChromaV,
        }
    }
}

/// Geometry of one plane of an image
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash)]
pub struct PlaneDescriptor {
    pub width: u32,
    pub height: u32,
    /// Stride here always means elements per row.
    pub stride: u32,
    pub role: PlaneRole,
    /// Horizontal and vertical ratio relative to luma
    pub ratio: (u32, u32),
    pub interlaced: bool,
}

impl PlaneDescriptor {
    /// Rows of a field, the even field takes the extra row on odd heights
    #[inline]
    pub(crate) const fn field_height(&self, parity: usize, fields: usize) -> u32 {
        if fields == 1 {
            self.height
        } else if parity == 0 {
            self.height.div_ceil(2)
        } else {
            self.height / 2
        }
    }

    #[inline]
    pub(crate) const fn fields(&self) -> usize {
        if self.interlaced {
            2
        } else {
            1
        }
    }
}
