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
use crate::descriptor::ImageDescriptor;
use crate::dispatch::{
    select_column_kernel, select_row_kernel, ColumnKernel, KernelIsa, KernelSpecialization,
    RowKernel,
};
use crate::field::{PlaneView, PlaneViewMut};
use crate::filter::ResamplingFilter;
use crate::images::{YuvPlanarImage, YuvPlanarImageMut};
use crate::plan::ScalingPlan;
use crate::resample_error::{check_overflow_v2, MismatchedSize};
use crate::yuv_support::{PlaneDescriptor, YuvChromaSubsampling};
use crate::ResampleError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
#[cfg(feature = "rayon")]
use rayon::prelude::ParallelSliceMut;

/// Geometry of one plane in a conversion
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneConversion {
    pub source: PlaneDescriptor,
    pub destination: PlaneDescriptor,
    /// Source width divided by destination width
    pub horizontal_ratio: f64,
    /// Source height divided by destination height
    pub vertical_ratio: f64,
}

/// Validated pairing of an input and an output image layout
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    pub input: ImageDescriptor,
    pub output: ImageDescriptor,
    pub planes: Vec<PlaneConversion>,
}

/// Validates a pair of image layouts and derives per-plane geometry.
///
/// # Arguments
///
/// * `output`: Layout of images the converter writes into.
/// * `input`: Layout of images the converter reads from.
///
/// # Errors
///
/// Images must have the same planes count and the same scan mode, no axis may be empty,
/// and every stride must cover its plane width.
pub fn prepare_conversion(
    output: &ImageDescriptor,
    input: &ImageDescriptor,
) -> Result<ConversionConfig, ResampleError> {
    if output.planes_count() != input.planes_count() {
        return Err(ResampleError::PlaneCountMismatch(MismatchedSize {
            expected: output.planes_count(),
            received: input.planes_count(),
        }));
    }
    if output.interlaced != input.interlaced {
        return Err(ResampleError::InterlacingMismatch);
    }
    if output.width == 0 || output.height == 0 || input.width == 0 || input.height == 0 {
        return Err(ResampleError::ZeroSizedAxis);
    }

    let mut planes = Vec::with_capacity(input.planes_count());
    for index in 0..input.planes_count() {
        let source = input.plane(index);
        let destination = output.plane(index);
        for plane in [&source, &destination] {
            check_overflow_v2(plane.stride as usize, plane.height as usize)?;
            if plane.stride < plane.width {
                return Err(ResampleError::StrideMismatch {
                    plane: index,
                    size: MismatchedSize {
                        expected: plane.width as usize,
                        received: plane.stride as usize,
                    },
                });
            }
        }
        planes.push(PlaneConversion {
            source,
            destination,
            horizontal_ratio: source.width as f64 / destination.width as f64,
            vertical_ratio: source.height as f64 / destination.height as f64,
        });
    }

    Ok(ConversionConfig {
        input: *input,
        output: *output,
        planes,
    })
}

struct RowPass {
    plan: ScalingPlan,
    kernel: RowKernel,
}

struct ColumnPass {
    plan: ScalingPlan,
    kernel: ColumnKernel,
}

/// Passes a plane goes through, vertical plans are kept per field
enum PassLayout {
    Horizontal(RowPass),
    Vertical(Vec<ColumnPass>),
    Separable(RowPass, Vec<ColumnPass>),
}

struct PlaneResampler {
    conversion: PlaneConversion,
    layout: PassLayout,
}

impl RowPass {
    fn new(
        filter: &ResamplingFilter,
        source: u32,
        destination: u32,
    ) -> Result<Self, ResampleError> {
        let plan = ScalingPlan::build(filter, source, destination)?;
        let kernel = select_row_kernel(plan.taps());
        Ok(RowPass { plan, kernel })
    }

    fn run(&self, dst: &mut PlaneViewMut, src: &PlaneView) {
        let taps = self.plan.taps();
        let weights = self.plan.weights();
        let offsets = self.plan.offsets();
        let handler = self.kernel.handler;
        let width = dst.width;

        let iter;
        #[cfg(feature = "rayon")]
        {
            iter = dst.data.par_chunks_mut(dst.stride).take(dst.height);
        }
        #[cfg(not(feature = "rayon"))]
        {
            iter = dst.data.chunks_mut(dst.stride).take(dst.height);
        }

        iter.enumerate().for_each(|(y, dst_row)| {
            handler(&mut dst_row[..width], src.row(y), weights, offsets, taps);
        });
    }
}

impl ColumnPass {
    fn new(
        filter: &ResamplingFilter,
        source: u32,
        destination: u32,
    ) -> Result<Self, ResampleError> {
        let plan = ScalingPlan::build(filter, source, destination)?;
        let kernel = select_column_kernel(plan.taps());
        Ok(ColumnPass { plan, kernel })
    }

    fn run(&self, dst: &mut PlaneViewMut, src: &PlaneView) {
        let taps = self.plan.taps();
        let weights = self.plan.weights();
        let offsets = self.plan.offsets();
        let handler = self.kernel.handler;
        let width = dst.width;
        let src_data = src.data;
        let src_stride = src.stride;

        let iter;
        #[cfg(feature = "rayon")]
        {
            iter = dst.data.par_chunks_mut(dst.stride).take(dst.height);
        }
        #[cfg(not(feature = "rayon"))]
        {
            iter = dst.data.chunks_mut(dst.stride).take(dst.height);
        }

        iter.enumerate().for_each(|(y, dst_row)| {
            let range = y * taps..(y + 1) * taps;
            handler(
                &mut dst_row[..width],
                src_data,
                src_stride,
                &weights[range.clone()],
                &offsets[range],
            );
        });
    }
}

/// Reusable two-pass resampler for one input/output layout pair.
///
/// Every plane is resampled horizontally into an intermediate buffer, then vertically into
/// the destination; a pass is skipped when its axis keeps its extent. Interlaced images are
/// resampled field by field, so rows of one field never mix with rows of the other.
///
/// All plans and the intermediate buffer are built once, [Converter::convert] does not allocate.
pub struct Converter {
    config: ConversionConfig,
    filter: ResamplingFilter,
    planes: Vec<PlaneResampler>,
    intermediate: Vec<u8>,
}

impl Converter {
    /// Builds scaling plans and scratch storage for `config`.
    ///
    /// # Errors
    ///
    /// Interlaced images require at least 2 rows on every plane, both input and output.
    pub fn new(
        config: ConversionConfig,
        filter: ResamplingFilter,
    ) -> Result<Converter, ResampleError> {
        let mut planes = Vec::with_capacity(config.planes.len());
        let mut intermediate_size = 0usize;

        for (index, conversion) in config.planes.iter().enumerate() {
            let source = &conversion.source;
            let destination = &conversion.destination;
            let fields = source.fields();
            if fields == 2 && (source.height < 2 || destination.height < 2) {
                return Err(ResampleError::InterlacedPlaneTooShort {
                    plane: index,
                    rows: source.height.min(destination.height),
                });
            }

            let scales_horizontally = source.width != destination.width;
            let scales_vertically = source.height != destination.height;

            let vertical = if scales_vertically {
                (0..fields)
                    .map(|parity| {
                        ColumnPass::new(
                            &filter,
                            source.field_height(parity, fields),
                            destination.field_height(parity, fields),
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                Vec::new()
            };

            let layout = if scales_vertically && scales_horizontally {
                check_overflow_v2(destination.width as usize, source.height as usize)?;
                intermediate_size =
                    intermediate_size.max(destination.width as usize * source.height as usize);
                PassLayout::Separable(
                    RowPass::new(&filter, source.width, destination.width)?,
                    vertical,
                )
            } else if scales_vertically {
                PassLayout::Vertical(vertical)
            } else {
                // Identity horizontal plan copies the plane when no axis scales
                PassLayout::Horizontal(RowPass::new(&filter, source.width, destination.width)?)
            };

            match &layout {
                PassLayout::Horizontal(row) => log::debug!(
                    "plane {}: {}x{} -> {}x{}, horizontal {} taps on {}",
                    index,
                    source.width,
                    source.height,
                    destination.width,
                    destination.height,
                    row.plan.taps(),
                    row.kernel.isa
                ),
                PassLayout::Vertical(columns) => log::debug!(
                    "plane {}: {}x{} -> {}x{}, vertical {} taps on {}",
                    index,
                    source.width,
                    source.height,
                    destination.width,
                    destination.height,
                    columns[0].plan.taps(),
                    columns[0].kernel.isa
                ),
                PassLayout::Separable(row, columns) => log::debug!(
                    "plane {}: {}x{} -> {}x{}, {} taps ({:?}) on {} then {} taps ({:?}) on {}",
                    index,
                    source.width,
                    source.height,
                    destination.width,
                    destination.height,
                    row.plan.taps(),
                    row.kernel.specialization,
                    row.kernel.isa,
                    columns[0].plan.taps(),
                    columns[0].kernel.specialization,
                    columns[0].kernel.isa
                ),
            }

            planes.push(PlaneResampler {
                conversion: *conversion,
                layout,
            });
        }

        log::debug!(
            "{} converter {}x{} -> {}x{}, interlaced: {}, intermediate: {} bytes",
            filter,
            config.input.width,
            config.input.height,
            config.output.width,
            config.output.height,
            config.input.interlaced,
            intermediate_size
        );

        Ok(Converter {
            config,
            filter,
            planes,
            intermediate: vec![0u8; intermediate_size],
        })
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn filter(&self) -> &ResamplingFilter {
        &self.filter
    }

    /// Kernel of the horizontal pass of `plane`, `None` when the plane has no horizontal pass
    pub fn horizontal_kernel(&self, plane: usize) -> Option<(KernelSpecialization, KernelIsa)> {
        match &self.planes.get(plane)?.layout {
            PassLayout::Horizontal(row) | PassLayout::Separable(row, _) => {
                Some((row.kernel.specialization, row.kernel.isa))
            }
            PassLayout::Vertical(_) => None,
        }
    }

    /// Kernel of the vertical pass of `plane` for field `parity`, progressive images have
    /// a single field with parity 0
    pub fn vertical_kernel(
        &self,
        plane: usize,
        parity: usize,
    ) -> Option<(KernelSpecialization, KernelIsa)> {
        match &self.planes.get(plane)?.layout {
            PassLayout::Vertical(columns) | PassLayout::Separable(_, columns) => columns
                .get(parity)
                .map(|column| (column.kernel.specialization, column.kernel.isa)),
            PassLayout::Horizontal(_) => None,
        }
    }

    /// Resamples `src` into `dst`.
    ///
    /// Both images are checked against the layouts the converter was built for before any
    /// sample is written. Only the first `width` elements of each destination row are written,
    /// row padding is left untouched.
    ///
    /// # Errors
    ///
    /// Dimensions, strides or buffer sizes that differ from the configuration.
    pub fn convert(
        &mut self,
        dst: &mut YuvPlanarImageMut<u8>,
        src: &YuvPlanarImage<u8>,
    ) -> Result<(), ResampleError> {
        self.config.input.check_image(src)?;
        self.config.output.check_image(&dst.to_fixed())?;

        for (index, resampler) in self.planes.iter().enumerate() {
            let source = &resampler.conversion.source;
            let destination = &resampler.conversion.destination;
            let fields = source.fields();

            let src_plane = PlaneView::new(
                src.plane(index),
                source.stride as usize,
                source.width as usize,
                source.height as usize,
            );
            let mut dst_plane = PlaneViewMut::new(
                dst.plane_mut(index),
                destination.stride as usize,
                destination.width as usize,
                destination.height as usize,
            );

            for parity in 0..fields {
                let src_field = src_plane.field(parity, fields);
                let mut dst_field = dst_plane.field(parity, fields);
                match &resampler.layout {
                    PassLayout::Horizontal(row) => row.run(&mut dst_field, &src_field),
                    PassLayout::Vertical(columns) => {
                        columns[parity].run(&mut dst_field, &src_field)
                    }
                    PassLayout::Separable(row, columns) => {
                        let width = dst_field.width;
                        let height = src_field.height;
                        let mut scratch = PlaneViewMut::new(
                            &mut self.intermediate[..width * height],
                            width,
                            width,
                            height,
                        );
                        row.run(&mut scratch, &src_field);
                        columns[parity].run(&mut dst_field, &scratch.as_view());
                    }
                }
            }
        }

        Ok(())
    }
}

/// One-shot resampling of `src` into `dst`.
///
/// Builds a progressive [Converter] from the images' own geometry and runs it once.
///
/// # Arguments
///
/// * `dst`: Destination image, its width, height and strides define the output layout.
/// * `dst_subsampling`: Chroma subsampling of the destination.
/// * `src`: Source image.
/// * `src_subsampling`: Chroma subsampling of the source.
/// * `filter`: Resampling filter, see [ResamplingFilter].
pub fn resize(
    dst: &mut YuvPlanarImageMut<u8>,
    dst_subsampling: YuvChromaSubsampling,
    src: &YuvPlanarImage<u8>,
    src_subsampling: YuvChromaSubsampling,
    filter: ResamplingFilter,
) -> Result<(), ResampleError> {
    let output = dst.describe(dst_subsampling);
    let input = src.describe(src_subsampling);
    let config = prepare_conversion(&output, &input)?;
    let mut converter = Converter::new(config, filter)?;
    converter.convert(dst, src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::BufferStoreMut;
    use crate::test_support::{psnr, synthetic_image};
    use crate::ResampleErrorKind;
    use rand::Rng;

    fn filters() -> Vec<ResamplingFilter> {
        vec![
            ResamplingFilter::bilinear(),
            ResamplingFilter::bicubic(),
            ResamplingFilter::lanczos(3).unwrap(),
        ]
    }

    fn converter(
        output: ImageDescriptor,
        input: ImageDescriptor,
        filter: ResamplingFilter,
    ) -> Converter {
        Converter::new(prepare_conversion(&output, &input).unwrap(), filter).unwrap()
    }

    fn fill(image: &mut YuvPlanarImageMut<u8>, subsampling: YuvChromaSubsampling, values: [u8; 3]) {
        for index in 0..subsampling.planes_count() {
            image.plane_mut(index).fill(values[index]);
        }
    }

    #[test]
    fn test_identity_is_exact() {
        let mut rng = rand::rng();
        let subsampling = YuvChromaSubsampling::Yuv420;
        for filter in filters() {
            for interlaced in [false, true] {
                let mut src = YuvPlanarImageMut::alloc(37, 23, subsampling);
                for index in 0..3 {
                    src.plane_mut(index).iter_mut().for_each(|v| *v = rng.random());
                }
                let descriptor = src.describe(subsampling).with_interlacing(interlaced);
                let mut dst = YuvPlanarImageMut::alloc(37, 23, subsampling);
                let mut converter = converter(descriptor, descriptor, filter);
                converter.convert(&mut dst, &src.to_fixed()).unwrap();
                assert_eq!(dst.y_plane.borrow(), src.y_plane.borrow());
                assert_eq!(dst.u_plane.borrow(), src.u_plane.borrow());
                assert_eq!(dst.v_plane.borrow(), src.v_plane.borrow());
                let scores = psnr(&dst.to_fixed(), &src.to_fixed(), subsampling);
                assert!(scores.iter().all(|v| v.is_infinite()));
            }
        }
    }

    #[test]
    fn test_flat_field_stays_flat() {
        let subsampling = YuvChromaSubsampling::Yuv420;
        let mut src = YuvPlanarImageMut::alloc(64, 48, subsampling);
        fill(&mut src, subsampling, [77, 130, 90]);
        for filter in filters() {
            for interlaced in [false, true] {
                for (width, height) in [(23, 71), (64, 20), (100, 48), (17, 9), (129, 130)] {
                    let mut dst = YuvPlanarImageMut::alloc(width, height, subsampling);
                    let output = dst.describe(subsampling).with_interlacing(interlaced);
                    let input = src.describe(subsampling).with_interlacing(interlaced);
                    let mut converter = converter(output, input, filter);
                    converter.convert(&mut dst, &src.to_fixed()).unwrap();
                    assert!(dst.y_plane.borrow().iter().all(|&v| v == 77), "{}", filter);
                    assert!(dst.u_plane.borrow().iter().all(|&v| v == 130), "{}", filter);
                    assert!(dst.v_plane.borrow().iter().all(|&v| v == 90), "{}", filter);
                }
            }
        }
    }

    #[test]
    fn test_uniform_downscale() {
        let subsampling = YuvChromaSubsampling::Yuv400;
        let mut src = YuvPlanarImageMut::alloc(4, 4, subsampling);
        fill(&mut src, subsampling, [200, 0, 0]);
        let mut dst = YuvPlanarImageMut::alloc(2, 2, subsampling);
        resize(
            &mut dst,
            subsampling,
            &src.to_fixed(),
            subsampling,
            ResamplingFilter::bilinear(),
        )
        .unwrap();
        assert_eq!(dst.y_plane.borrow(), &[200, 200, 200, 200]);
    }

    #[test]
    fn test_bilinear_downscale_ramp() {
        let subsampling = YuvChromaSubsampling::Yuv400;
        let mut src = YuvPlanarImageMut::alloc(4, 1, subsampling);
        src.y_plane.borrow_mut().copy_from_slice(&[0, 64, 128, 192]);
        let mut dst = YuvPlanarImageMut::alloc(2, 1, subsampling);
        resize(
            &mut dst,
            subsampling,
            &src.to_fixed(),
            subsampling,
            ResamplingFilter::bilinear(),
        )
        .unwrap();
        // (0 * 2048 + 0 * 6144 + 64 * 6144 + 128 * 2048) / 16384 = 40
        // (64 * 2048 + 128 * 6144 + 192 * 6144 + 192 * 2048) / 16384 = 152
        assert_eq!(dst.y_plane.borrow(), &[40, 152]);
    }

    #[test]
    fn test_row_padding_untouched() {
        let subsampling = YuvChromaSubsampling::Yuv420;
        let src = synthetic_image(40, 30, subsampling);
        for filter in filters() {
            for interlaced in [false, true] {
                let (width, height) = (27u32, 35u32);
                let (cw, ch) = subsampling.chroma_size(width, height);
                let (y_stride, c_stride) = (width + 5, cw + 3);
                let mut y = vec![0xABu8; (y_stride * height) as usize];
                let mut u = vec![0xABu8; (c_stride * ch) as usize];
                let mut v = vec![0xABu8; (c_stride * ch) as usize];
                let mut dst = YuvPlanarImageMut {
                    y_plane: BufferStoreMut::Borrowed(&mut y),
                    y_stride,
                    u_plane: BufferStoreMut::Borrowed(&mut u),
                    u_stride: c_stride,
                    v_plane: BufferStoreMut::Borrowed(&mut v),
                    v_stride: c_stride,
                    width,
                    height,
                };
                let output = dst.describe(subsampling).with_interlacing(interlaced);
                let input = src.describe(subsampling).with_interlacing(interlaced);
                let mut converter = converter(output, input, filter);
                converter.convert(&mut dst, &src.to_fixed()).unwrap();
                drop(dst);
                for row in y.chunks_exact(y_stride as usize) {
                    assert!(row[width as usize..].iter().all(|&v| v == 0xAB));
                }
                let cs = c_stride as usize;
                for row in u.chunks_exact(cs).chain(v.chunks_exact(cs)) {
                    assert!(row[cw as usize..].iter().all(|&v| v == 0xAB));
                }
            }
        }
    }

    #[test]
    fn test_mismatched_image_is_rejected_before_writes() {
        let subsampling = YuvChromaSubsampling::Yuv420;
        let src = synthetic_image(16, 16, subsampling);
        let input = src.describe(subsampling);
        let output = ImageDescriptor::new(24, 24, subsampling);
        let mut converter = converter(output, input, ResamplingFilter::bicubic());

        let mut wrong_height = YuvPlanarImageMut::alloc(24, 23, subsampling);
        fill(&mut wrong_height, subsampling, [1, 2, 3]);
        let err = converter
            .convert(&mut wrong_height, &src.to_fixed())
            .unwrap_err();
        assert_eq!(err.kind(), ResampleErrorKind::DimensionMismatch);
        assert!(wrong_height.y_plane.borrow().iter().all(|&v| v == 1));

        let mut dst = YuvPlanarImageMut::alloc(24, 24, subsampling);
        let short_source = synthetic_image(16, 15, subsampling);
        let err = converter
            .convert(&mut dst, &short_source.to_fixed())
            .unwrap_err();
        assert_eq!(err, ResampleError::ImageDimensionsMismatch);

        let mut truncated = vec![0u8; 24 * 24 - 1];
        let mut u = vec![0u8; 12 * 12];
        let mut v = vec![0u8; 12 * 12];
        let mut short_plane = YuvPlanarImageMut {
            y_plane: BufferStoreMut::Borrowed(&mut truncated),
            y_stride: 24,
            u_plane: BufferStoreMut::Borrowed(&mut u),
            u_stride: 12,
            v_plane: BufferStoreMut::Borrowed(&mut v),
            v_stride: 12,
            width: 24,
            height: 24,
        };
        let err = converter
            .convert(&mut short_plane, &src.to_fixed())
            .unwrap_err();
        assert!(matches!(err, ResampleError::PlaneSizeMismatch { plane: 0, .. }));

        assert!(converter.convert(&mut dst, &src.to_fixed()).is_ok());
    }

    #[test]
    fn test_configuration_errors() {
        let yuv420 = ImageDescriptor::new(16, 16, YuvChromaSubsampling::Yuv420);
        let gray = ImageDescriptor::new(16, 16, YuvChromaSubsampling::Yuv400);
        let err = prepare_conversion(&gray, &yuv420).unwrap_err();
        assert_eq!(err.kind(), ResampleErrorKind::Configuration);

        let err = prepare_conversion(&yuv420.with_interlacing(true), &yuv420).unwrap_err();
        assert_eq!(err, ResampleError::InterlacingMismatch);

        let empty = ImageDescriptor::new(0, 16, YuvChromaSubsampling::Yuv420);
        let err = prepare_conversion(&empty, &yuv420).unwrap_err();
        assert_eq!(err.kind(), ResampleErrorKind::Range);

        let narrow = yuv420.with_strides(15, 8, 8);
        let err = prepare_conversion(&yuv420, &narrow).unwrap_err();
        assert_eq!(err.kind(), ResampleErrorKind::DimensionMismatch);

        // Chroma of a 2 rows high 4:2:0 image has a single row, too short to split in fields
        let interlaced = yuv420.with_interlacing(true);
        let short = ImageDescriptor::new(16, 2, YuvChromaSubsampling::Yuv420);
        let short = short.with_interlacing(true);
        let config = prepare_conversion(&interlaced, &short).unwrap();
        let err = Converter::new(config, ResamplingFilter::bilinear())
            .err()
            .unwrap();
        assert_eq!(
            err,
            ResampleError::InterlacedPlaneTooShort { plane: 1, rows: 1 }
        );
        assert_eq!(err.kind(), ResampleErrorKind::Configuration);
    }

    #[test]
    fn test_different_subsamplings() {
        let src = synthetic_image(64, 64, YuvChromaSubsampling::Yuv444);
        let mut dst = YuvPlanarImageMut::alloc(64, 64, YuvChromaSubsampling::Yuv420);
        resize(
            &mut dst,
            YuvChromaSubsampling::Yuv420,
            &src.to_fixed(),
            YuvChromaSubsampling::Yuv444,
            ResamplingFilter::bicubic(),
        )
        .unwrap();
        let reference = synthetic_image(64, 64, YuvChromaSubsampling::Yuv420);
        let scores = psnr(
            &reference.to_fixed(),
            &dst.to_fixed(),
            YuvChromaSubsampling::Yuv420,
        );
        assert!(scores[0].is_infinite());
        assert!(scores[1] > 30. && scores[2] > 30., "{:?}", scores);
    }

    #[test]
    fn test_interlaced_fields_do_not_mix() {
        let subsampling = YuvChromaSubsampling::Yuv400;
        let mut src = YuvPlanarImageMut::alloc(32, 32, subsampling);
        for (y, row) in src.y_plane.borrow_mut().chunks_exact_mut(32).enumerate() {
            row.fill(if y % 2 == 0 { 10 } else { 200 });
        }
        for filter in filters() {
            for (width, height) in [(20u32, 18u32), (45, 61), (32, 7)] {
                let mut dst = YuvPlanarImageMut::alloc(width, height, subsampling);
                let output = dst.describe(subsampling).with_interlacing(true);
                let input = src.describe(subsampling).with_interlacing(true);
                let mut converter = converter(output, input, filter);
                converter.convert(&mut dst, &src.to_fixed()).unwrap();
                let rows = dst.y_plane.borrow().chunks_exact(width as usize);
                for (y, row) in rows.enumerate() {
                    let expected = if y % 2 == 0 { 10 } else { 200 };
                    assert!(row.iter().all(|&v| v == expected), "{} row {}", filter, y);
                }
            }
        }
    }

    /// Converts a flat plane between buffers surrounded by sentinel guards and checks
    /// nothing outside the destination plane was touched
    fn convert_guarded(
        filter: ResamplingFilter,
        interlaced: bool,
        (src_w, src_h): (u32, u32),
        (dst_w, dst_h): (u32, u32),
        value: u8,
    ) {
        const GUARD: usize = 64;
        const SOURCE_SENTINEL: u8 = 0;
        const TARGET_SENTINEL: u8 = 0xEE;
        let subsampling = YuvChromaSubsampling::Yuv400;
        let label = format!(
            "{} {}x{} -> {}x{}, interlaced: {}",
            filter, src_w, src_h, dst_w, dst_h, interlaced
        );

        let src_stride = src_w as usize + 3;
        let src_len = src_stride * src_h as usize;
        let mut src_store = vec![SOURCE_SENTINEL; 2 * GUARD + src_len];
        for row in src_store[GUARD..GUARD + src_len].chunks_exact_mut(src_stride) {
            row[..src_w as usize].fill(value);
        }
        let src = YuvPlanarImage {
            y_plane: &src_store[GUARD..GUARD + src_len],
            y_stride: src_stride as u32,
            u_plane: &[],
            u_stride: 0,
            v_plane: &[],
            v_stride: 0,
            width: src_w,
            height: src_h,
        };

        let dst_stride = dst_w as usize + 2;
        let dst_len = dst_stride * dst_h as usize;
        let mut dst_store = vec![TARGET_SENTINEL; 2 * GUARD + dst_len];
        let mut dst = YuvPlanarImageMut {
            y_plane: BufferStoreMut::Borrowed(&mut dst_store[GUARD..GUARD + dst_len]),
            y_stride: dst_stride as u32,
            u_plane: BufferStoreMut::Owned(Vec::new()),
            u_stride: 0,
            v_plane: BufferStoreMut::Owned(Vec::new()),
            v_stride: 0,
            width: dst_w,
            height: dst_h,
        };

        let output = dst.describe(subsampling).with_interlacing(interlaced);
        let input = src.describe(subsampling).with_interlacing(interlaced);
        let built = Converter::new(prepare_conversion(&output, &input).unwrap(), filter);
        if interlaced && (src_h < 2 || dst_h < 2) {
            let too_short = matches!(
                built,
                Err(ResampleError::InterlacedPlaneTooShort { plane: 0, .. })
            );
            assert!(too_short, "{}", label);
            return;
        }
        built.unwrap().convert(&mut dst, &src).unwrap();
        drop(dst);

        let (head, rest) = dst_store.split_at(GUARD);
        let (plane, tail) = rest.split_at(dst_len);
        assert!(head.iter().all(|&v| v == TARGET_SENTINEL), "{}", label);
        assert!(tail.iter().all(|&v| v == TARGET_SENTINEL), "{}", label);
        for row in plane.chunks_exact(dst_stride) {
            let (visible, padding) = row.split_at(dst_w as usize);
            assert!(visible.iter().all(|&v| v == value), "{}", label);
            assert!(padding.iter().all(|&v| v == TARGET_SENTINEL), "{}", label);
        }
    }

    #[test]
    fn test_degenerate_sizes_stay_inside_buffers() {
        let sizes = [1u32, 2, 3, 15, 16, 17, 33];
        let mut rng = rand::rng();
        for filter in filters() {
            for interlaced in [false, true] {
                for &src_w in sizes.iter() {
                    for &src_h in sizes.iter() {
                        let value = rng.random_range(40..=220u8);
                        for &dst_w in sizes.iter() {
                            for &dst_h in sizes.iter() {
                                let (src, dst) = ((src_w, src_h), (dst_w, dst_h));
                                convert_guarded(filter, interlaced, src, dst, value);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_selected_kernels_are_reported() {
        let input = ImageDescriptor::new(64, 64, YuvChromaSubsampling::Yuv420);
        let filter = ResamplingFilter::bilinear();

        let halved = ImageDescriptor::new(32, 32, YuvChromaSubsampling::Yuv420);
        let downscale = converter(halved, input, filter);
        let (specialization, isa) = downscale.horizontal_kernel(0).unwrap();
        assert_eq!(specialization, KernelSpecialization::Unrolled(4));
        assert_eq!(isa, select_row_kernel(4).isa);
        let (specialization, isa) = downscale.vertical_kernel(2, 0).unwrap();
        assert_eq!(specialization, KernelSpecialization::Unrolled(4));
        assert_eq!(isa, select_column_kernel(4).isa);
        assert_eq!(downscale.vertical_kernel(0, 1), None);
        assert_eq!(downscale.horizontal_kernel(3), None);

        let taller = ImageDescriptor::new(64, 80, YuvChromaSubsampling::Yuv420);
        let stretch = converter(
            taller.with_interlacing(true),
            input.with_interlacing(true),
            filter,
        );
        assert_eq!(stretch.horizontal_kernel(0), None);
        for parity in 0..2 {
            let (specialization, _) = stretch.vertical_kernel(0, parity).unwrap();
            assert_eq!(specialization, KernelSpecialization::Unrolled(2));
        }
    }

    #[test]
    fn test_interlaced_upscale_succeeds() {
        let subsampling = YuvChromaSubsampling::Yuv420;
        let src = synthetic_image(64, 48, subsampling);
        let mut dst = YuvPlanarImageMut::alloc(80, 60, subsampling);
        let output = dst.describe(subsampling).with_interlacing(true);
        let input = src.describe(subsampling).with_interlacing(true);
        let mut converter = converter(output, input, ResamplingFilter::bicubic());
        assert!(converter.convert(&mut dst, &src.to_fixed()).is_ok());
    }

    fn run(
        dst: &mut YuvPlanarImageMut<u8>,
        dst_subsampling: YuvChromaSubsampling,
        src: &YuvPlanarImageMut<u8>,
        src_subsampling: YuvChromaSubsampling,
        filter: ResamplingFilter,
        interlaced: bool,
    ) {
        let output = dst.describe(dst_subsampling).with_interlacing(interlaced);
        let input = src.describe(src_subsampling).with_interlacing(interlaced);
        let mut resampler = converter(output, input, filter);
        resampler.convert(dst, &src.to_fixed()).unwrap();
    }

    /// Grows a 4:4:4 copy of the source through a ladder of odd sizes and back,
    /// then brings it home as 4:2:0.
    fn boundaries_with(filter: ResamplingFilter, interlaced: bool) -> Vec<f64> {
        use YuvChromaSubsampling::{Yuv420, Yuv444};
        let size = 64u32;
        let source = synthetic_image(size, size, Yuv420);
        let mut tmp = YuvPlanarImageMut::alloc(size, size, Yuv444);
        run(&mut tmp, Yuv444, &source, Yuv420, filter, interlaced);
        let min = if interlaced { 1 } else { 0 };
        let mut last = size;
        let mut step = 32;
        while step > min {
            last += step;
            let mut grown = YuvPlanarImageMut::alloc(last, last, Yuv444);
            run(&mut grown, Yuv444, &tmp, Yuv444, filter, interlaced);
            run(&mut tmp, Yuv444, &grown, Yuv444, filter, interlaced);
            step >>= 1;
        }
        let mut output = YuvPlanarImageMut::alloc(size, size, Yuv420);
        run(&mut output, Yuv420, &tmp, Yuv444, filter, interlaced);
        psnr(&source.to_fixed(), &output.to_fixed(), Yuv420)
    }

    #[test]
    fn test_progressive_boundaries() {
        for filter in filters() {
            let scores = boundaries_with(filter, false);
            assert!(scores[0] > 25., "{} {:?}", filter, scores);
            assert!(scores[1] > 38. && scores[2] > 38., "{} {:?}", filter, scores);
        }
    }

    #[test]
    fn test_interlaced_boundaries() {
        for filter in filters() {
            let scores = boundaries_with(filter, true);
            assert!(scores[0] > 25., "{} {:?}", filter, scores);
            assert!(scores[1] > 38. && scores[2] > 38., "{} {:?}", filter, scores);
        }
    }

    fn degradation_with(filter: ResamplingFilter, size: u32, interlaced: bool) -> Vec<f64> {
        let subsampling = YuvChromaSubsampling::Yuv420;
        let reference = synthetic_image(64, 64, subsampling);
        let mut src = synthetic_image(64, 64, subsampling);
        let mut dst = YuvPlanarImageMut::alloc(size, size, subsampling);
        let forward_config = prepare_conversion(
            &dst.describe(subsampling).with_interlacing(interlaced),
            &src.describe(subsampling).with_interlacing(interlaced),
        )
        .unwrap();
        let backward_config = prepare_conversion(
            &src.describe(subsampling).with_interlacing(interlaced),
            &dst.describe(subsampling).with_interlacing(interlaced),
        )
        .unwrap();
        let mut forward = Converter::new(forward_config, filter).unwrap();
        let mut backward = Converter::new(backward_config, filter).unwrap();
        for _ in 0..32 {
            forward.convert(&mut dst, &src.to_fixed()).unwrap();
            backward.convert(&mut src, &dst.to_fixed()).unwrap();
        }
        psnr(&reference.to_fixed(), &src.to_fixed(), subsampling)
    }

    #[test]
    fn test_degradations() {
        for filter in filters() {
            for (size, interlaced) in [(65, false), (66, true)] {
                let scores = degradation_with(filter, size, interlaced);
                assert!(scores[0] > 22., "{} {:?}", filter, scores);
                assert!(scores[1] > 30. && scores[2] > 30., "{} {:?}", filter, scores);
            }
        }
    }
}
