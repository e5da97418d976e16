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
#![no_main]

use libfuzzer_sys::fuzz_target;
use rez::{ResamplingFilter, ScalingPlan, FIXED_POINT_UNIT};

fuzz_target!(|data: (u16, u16, u8)| {
    let filter = match data.2 % 5 {
        0 => ResamplingFilter::bilinear(),
        1 => ResamplingFilter::bicubic(),
        order => ResamplingFilter::lanczos(order as i32 + 1).unwrap(),
    };
    let source = data.0 as u32 % 2048;
    let destination = data.1 as u32 % 2048;
    if source == 0 || destination == 0 {
        assert!(ScalingPlan::build(&filter, source, destination).is_err());
        return;
    }
    let plan = ScalingPlan::build(&filter, source, destination).unwrap();
    for j in 0..destination as usize {
        let mut sum = 0i32;
        let mut count = 0usize;
        for tap in plan.tap_list(j) {
            assert!(tap.offset < source);
            sum += tap.weight;
            count += 1;
        }
        assert_eq!(count, plan.taps());
        assert_eq!(sum, FIXED_POINT_UNIT);
    }
    assert_eq!(plan.tap_list(destination as usize).count(), 0);
});
