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
/// Read-only window over a plane or one of its fields
#[derive(Debug, Copy, Clone)]
pub(crate) struct PlaneView<'a> {
    pub(crate) data: &'a [u8],
    /// Elements between starts of two consecutive rows
    pub(crate) stride: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

/// Mutable window over a plane or one of its fields
#[derive(Debug)]
pub(crate) struct PlaneViewMut<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) stride: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

/// Rows owned by field `parity` when a plane of `height` rows is split into `fields` fields
#[inline]
pub(crate) const fn field_rows(height: usize, parity: usize, fields: usize) -> usize {
    (height + fields - 1 - parity) / fields
}

impl<'a> PlaneView<'a> {
    pub(crate) fn new(data: &'a [u8], stride: usize, width: usize, height: usize) -> Self {
        PlaneView {
            data,
            stride,
            width,
            height,
        }
    }

    /// Field `parity` of `fields`: every `fields`-th row starting at row `parity`
    pub(crate) fn field(&self, parity: usize, fields: usize) -> PlaneView<'a> {
        PlaneView {
            data: &self.data[parity * self.stride..],
            stride: self.stride * fields,
            width: self.width,
            height: field_rows(self.height, parity, fields),
        }
    }

    #[inline]
    pub(crate) fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
}

impl<'a> PlaneViewMut<'a> {
    pub(crate) fn new(data: &'a mut [u8], stride: usize, width: usize, height: usize) -> Self {
        PlaneViewMut {
            data,
            stride,
            width,
            height,
        }
    }

    pub(crate) fn field(&mut self, parity: usize, fields: usize) -> PlaneViewMut<'_> {
        PlaneViewMut {
            data: &mut self.data[parity * self.stride..],
            stride: self.stride * fields,
            width: self.width,
            height: field_rows(self.height, parity, fields),
        }
    }

    pub(crate) fn as_view(&self) -> PlaneView<'_> {
        PlaneView {
            data: self.data,
            stride: self.stride,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rows() {
        assert_eq!(field_rows(7, 0, 2), 4);
        assert_eq!(field_rows(7, 1, 2), 3);
        assert_eq!(field_rows(8, 1, 2), 4);
        assert_eq!(field_rows(5, 0, 1), 5);
    }

    #[test]
    fn test_field_views_interleave() {
        let data: Vec<u8> = (0..15).collect();
        let plane = PlaneView::new(&data, 3, 2, 5);
        let even = plane.field(0, 2);
        let odd = plane.field(1, 2);
        assert_eq!(even.height, 3);
        assert_eq!(odd.height, 2);
        assert_eq!(even.row(1), &[6, 7]);
        assert_eq!(even.row(2), &[12, 13]);
        assert_eq!(odd.row(0), &[3, 4]);
        assert_eq!(odd.row(1), &[9, 10]);
    }

    #[test]
    fn test_mutable_field_writes_own_rows() {
        let mut data = vec![0u8; 12];
        let mut plane = PlaneViewMut::new(&mut data, 3, 3, 4);
        {
            let odd = plane.field(1, 2);
            for row in odd.data.chunks_mut(odd.stride).take(odd.height) {
                row[..odd.width].fill(9);
            }
        }
        assert_eq!(plane.as_view().row(0), &[0, 0, 0]);
        assert_eq!(plane.as_view().row(1), &[9, 9, 9]);
        assert_eq!(plane.as_view().row(2), &[0, 0, 0]);
        assert_eq!(plane.as_view().row(3), &[9, 9, 9]);
    }
}
