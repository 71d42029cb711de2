use criterion::{black_box, criterion_group, criterion_main, Criterion};

use waveclip::edit::engine::{apply_gain, change_speed, delete_region};
use waveclip::view::waveform::peaks_for_range;
use waveclip::SampleBuffer;

/// 60 seconds of stereo 44.1 kHz material.
fn stereo_minute() -> SampleBuffer {
    let frames = 60 * 44_100;
    let left: Vec<f32> = (0..frames)
        .map(|i| (i as f32 * 0.013).sin() * 0.6)
        .collect();
    let right: Vec<f32> = (0..frames)
        .map(|i| (i as f32 * 0.017).cos() * 0.6)
        .collect();
    SampleBuffer::new(vec![left, right], 44_100)
}

fn bench_delete_region(c: &mut Criterion) {
    let buffer = stereo_minute();
    c.bench_function("delete 10s from 60s stereo", |b| {
        b.iter(|| delete_region(black_box(&buffer), 20.0, 30.0, 0.05).unwrap())
    });
}

fn bench_waveform_peaks(c: &mut Criterion) {
    let buffer = stereo_minute();
    c.bench_function("peaks 60s stereo to 1200px", |b| {
        b.iter(|| peaks_for_range(black_box(&buffer), 0, buffer.len(), 1200))
    });
}

fn bench_apply_gain(c: &mut Criterion) {
    let buffer = stereo_minute();
    c.bench_function("gain 60s stereo", |b| {
        b.iter(|| apply_gain(black_box(&buffer), 1.2))
    });
}

fn bench_change_speed(c: &mut Criterion) {
    let buffer = stereo_minute();
    c.bench_function("resample 60s stereo to 1.5x", |b| {
        b.iter(|| change_speed(black_box(&buffer), 1.5).unwrap())
    });
}

criterion_group!(
    benches,
    bench_delete_region,
    bench_waveform_peaks,
    bench_apply_gain,
    bench_change_speed
);
criterion_main!(benches);
