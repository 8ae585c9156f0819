// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the stellar-tone project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use stellar_tone::config::{Config, Session};
use stellar_tone::pipeline::render;
use stellar_tone::report::NullReporter;
use stellar_tone::synthesis::{generate_lfo, synthesize, TimeGrid};

fn short_config(session: Session) -> Config {
    let mut config = Config::for_session(session);
    config.synthesis.duration_seconds = 2.0;
    config.synthesis.fade_seconds = 0.5;
    config
}

fn bench_synthesis(c: &mut Criterion) {
    let grid = TimeGrid::new(44100, 2.0);

    c.bench_function("synthesize_2s", |b| {
        b.iter(|| synthesize(black_box(&grid), black_box(195.648)))
    });
    c.bench_function("lfo_2s", |b| {
        b.iter(|| generate_lfo(black_box(&grid), 0.1, 0.6, 1.0))
    });
}

fn bench_render(c: &mut Criterion) {
    let pure = short_config(Session::Pure);
    let breath = short_config(Session::Breath);

    c.bench_function("render_pure_2s", |b| {
        b.iter(|| render(black_box(&pure), &mut NullReporter))
    });
    c.bench_function("render_breath_2s", |b| {
        b.iter(|| render(black_box(&breath), &mut NullReporter))
    });
}

criterion_group!(benches, bench_synthesis, bench_render);
criterion_main!(benches);
