// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lens_develop::domain::editing::{
    AdjustmentField, Adjustments, CurvePreset, HslBand, HslChannel, ToneCurve,
};
use lens_develop::media::pipeline::{apply_adjustments, RenderOptions};
use lens_develop::media::PixelBuffer;
use std::hint::black_box;

fn sample(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255]);
        }
    }
    PixelBuffer::new(width, height, pixels).expect("valid buffer")
}

fn full_edit() -> Adjustments {
    let mut adjustments = Adjustments::default();
    adjustments.set(AdjustmentField::Exposure, 15);
    adjustments.set(AdjustmentField::Contrast, 20);
    adjustments.set(AdjustmentField::Shadows, 30);
    adjustments.set(AdjustmentField::Temperature, -10);
    adjustments.set(AdjustmentField::Vibrance, 25);
    adjustments.set(AdjustmentField::Sharpening, 40);
    adjustments.set(AdjustmentField::Vignette, -20);
    adjustments.set(AdjustmentField::Grain, 10);
    adjustments.set_hsl(HslBand::Orange, HslChannel::Luminance, 15);
    adjustments.set_curve(ToneCurve::new(CurvePreset::Contrast.points().to_vec()));
    adjustments
}

fn pipeline_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let source = sample(1280, 800);
    let adjustments = full_edit();

    for parallel in [false, true] {
        let options = RenderOptions {
            parallel,
            ..RenderOptions::default()
        };
        group.bench_with_input(
            BenchmarkId::new("full_edit_1280x800", if parallel { "parallel" } else { "sequential" }),
            &options,
            |b, options| {
                b.iter(|| black_box(apply_adjustments(&source, &adjustments, *options)));
            },
        );
    }

    group.bench_function("neutral_1280x800", |b| {
        let neutral = Adjustments::default();
        b.iter(|| black_box(apply_adjustments(&source, &neutral, RenderOptions::default())));
    });

    group.finish();
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
