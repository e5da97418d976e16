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
use crate::yuv_support::{PlaneDescriptor, PlaneRole, YuvChromaSubsampling};

/// Geometry of a planar image: extents, chroma layout, strides and scan mode
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub subsampling: YuvChromaSubsampling,
    pub interlaced: bool,
    /// Strides of Y, U, V planes, elements per row.
    pub strides: [u32; 3],
}

impl ImageDescriptor {
    /// Progressive image with tightly packed rows
    pub fn new(width: u32, height: u32, subsampling: YuvChromaSubsampling) -> Self {
        let chroma_stride = if subsampling.planes_count() > 1 {
            subsampling.chroma_size(width, height).0
        } else {
            0
        };
        ImageDescriptor {
            width,
            height,
            subsampling,
            interlaced: false,
            strides: [width, chroma_stride, chroma_stride],
        }
    }

    pub fn with_strides(mut self, y_stride: u32, u_stride: u32, v_stride: u32) -> Self {
        self.strides = [y_stride, u_stride, v_stride];
        self
    }

    pub fn with_interlacing(mut self, interlaced: bool) -> Self {
        self.interlaced = interlaced;
        self
    }

    #[inline]
    pub fn planes_count(&self) -> usize {
        self.subsampling.planes_count()
    }

    /// Descriptor of plane `index`, 0 is luma
    pub fn plane(&self, index: usize) -> PlaneDescriptor {
        let (width, height, ratio) = if index == 0 {
            (self.width, self.height, (1, 1))
        } else {
            let (cw, ch) = self.subsampling.chroma_size(self.width, self.height);
            (cw, ch, self.subsampling.chroma_ratio())
        };
        PlaneDescriptor {
            width,
            height,
            stride: self.strides[index.min(2)],
            role: PlaneRole::from_index(index),
            ratio,
            interlaced: self.interlaced,
        }
    }

    pub fn planes(&self) -> Vec<PlaneDescriptor> {
        (0..self.planes_count()).map(|i| self.plane(i)).collect()
    }
}
