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
use crate::resample_error::{check_plane, MismatchedSize};
use crate::yuv_support::YuvChromaSubsampling;
use crate::{ImageDescriptor, ResampleError};
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-mutable representation of Planar YUV image.
///
/// For [YuvChromaSubsampling::Yuv400] chroma planes are ignored and may be empty.
pub struct YuvPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub u_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub u_stride: u32,
    pub v_plane: &'a [T],
    /// Stride here always means Elements per row.
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a, T> YuvPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(
        &self,
        subsampling: YuvChromaSubsampling,
    ) -> Result<(), ResampleError> {
        self.describe(subsampling).check_image(self)
    }

    /// Descriptor of this image for given subsampling, strides are taken from the image
    pub fn describe(&self, subsampling: YuvChromaSubsampling) -> ImageDescriptor {
        let descriptor = ImageDescriptor::new(self.width, self.height, subsampling);
        descriptor.with_strides(self.y_stride, self.u_stride, self.v_stride)
    }

    #[inline]
    pub(crate) fn plane(&self, index: usize) -> &'a [T] {
        match index {
            0 => self.y_plane,
            1 => self.u_plane,
            _ => self.v_plane,
        }
    }

    #[inline]
    pub(crate) fn stride(&self, index: usize) -> u32 {
        match index {
            0 => self.y_stride,
            1 => self.u_stride,
            _ => self.v_stride,
        }
    }
}

#[derive(Debug)]
/// Mutable representation of Planar YUV image
pub struct YuvPlanarImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub y_stride: u32,
    pub u_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub u_stride: u32,
    pub v_plane: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> YuvPlanarImageMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(
        &self,
        subsampling: YuvChromaSubsampling,
    ) -> Result<(), ResampleError> {
        self.to_fixed().check_constraints(subsampling)
    }

    pub fn describe(&self, subsampling: YuvChromaSubsampling) -> ImageDescriptor {
        self.to_fixed().describe(subsampling)
    }

    #[inline]
    pub(crate) fn plane_mut(&mut self, index: usize) -> &mut [T] {
        match index {
            0 => self.y_plane.borrow_mut(),
            1 => self.u_plane.borrow_mut(),
            _ => self.v_plane.borrow_mut(),
        }
    }

    pub fn to_fixed(&self) -> YuvPlanarImage<'_, T> {
        YuvPlanarImage {
            y_plane: self.y_plane.borrow(),
            y_stride: self.y_stride,
            u_plane: self.u_plane.borrow(),
            u_stride: self.u_stride,
            v_plane: self.v_plane.borrow(),
            v_stride: self.v_stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<T> YuvPlanarImageMut<'_, T>
where
    T: Default + Clone + Copy + Debug,
{
    /// Allocates mutable target Planar image with required chroma subsampling
    pub fn alloc(width: u32, height: u32, subsampling: YuvChromaSubsampling) -> Self {
        let (chroma_width, chroma_height) = if subsampling.planes_count() > 1 {
            subsampling.chroma_size(width, height)
        } else {
            (0, 0)
        };
        let chroma_size = chroma_width as usize * chroma_height as usize;
        let y_target = vec![T::default(); width as usize * height as usize];
        let u_target = vec![T::default(); chroma_size];
        let v_target = vec![T::default(); chroma_size];
        Self {
            y_plane: BufferStoreMut::Owned(y_target),
            y_stride: width,
            u_plane: BufferStoreMut::Owned(u_target),
            u_stride: chroma_width,
            v_plane: BufferStoreMut::Owned(v_target),
            v_stride: chroma_width,
            width,
            height,
        }
    }
}

impl ImageDescriptor {
    /// Checks plane buffers against this descriptor, buffers must be exactly `stride * height`
    pub(crate) fn check_image<T: Copy + Debug>(
        &self,
        image: &YuvPlanarImage<T>,
    ) -> Result<(), ResampleError> {
        if image.width != self.width || image.height != self.height {
            return Err(ResampleError::ImageDimensionsMismatch);
        }
        for index in 0..self.planes_count() {
            let descriptor = self.plane(index);
            if image.stride(index) != descriptor.stride {
                return Err(ResampleError::StrideMismatch {
                    plane: index,
                    size: MismatchedSize {
                        expected: descriptor.stride as usize,
                        received: image.stride(index) as usize,
                    },
                });
            }
            check_plane(
                image.plane(index),
                index,
                descriptor.stride,
                descriptor.width,
                descriptor.height,
            )?;
        }
        Ok(())
    }
}
