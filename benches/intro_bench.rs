use std::hint::black_box;

use birthday::audio::SilentPlayer;
use birthday::intro::TypingSequencer;
use birthday::options::{FireworkOptions, Options};
use birthday::scene::Fireworks;
use birthday::util::easing::EasingFunction;
use birthday::{GreetingCommand, GreetingEngine};
use criterion::{criterion_group, criterion_main, Criterion};
use web_time::{Duration, Instant};

fn easing_benchmark(c: &mut Criterion) {
    c.bench_function("cubic_out_easing", |b| {
        b.iter(|| black_box(EasingFunction::CubicOut.evaluate(black_box(0.5))))
    });
}

fn typing_benchmark(c: &mut Criterion) {
    let lines = Options::default().intro.lines;
    c.bench_function("type_all_lines", |b| {
        b.iter(|| {
            let mut typing = TypingSequencer::new(lines.clone());
            while typing.tick() {}
            black_box(typing.visible_lines().len())
        })
    });
}

fn fireworks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fireworks_update");

    for bursts in [1, 5, 20] {
        let options = FireworkOptions {
            seed: Some(7),
            ..FireworkOptions::default()
        };
        group.bench_function(format!("{bursts}_bursts"), |b| {
            b.iter_batched(
                || {
                    let mut fireworks = Fireworks::new(&options);
                    for _ in 0..bursts {
                        fireworks.launch();
                    }
                    fireworks
                },
                |mut fireworks| {
                    fireworks.update(Duration::from_millis(16));
                    black_box(fireworks.instances())
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn engine_frame_benchmark(c: &mut Criterion) {
    let options = Options::default();
    let start = Instant::now();
    let mut engine = GreetingEngine::new(
        options.clone(),
        (1280, 720),
        Box::new(SilentPlayer::new(&options.audio)),
        start,
    );
    let _ = engine.execute(GreetingCommand::Start, start);
    // Run well past the reveal so fireworks and the fade are live.
    let mut now = start;
    for _ in 0..600 {
        now += Duration::from_millis(16);
        let _ = engine.update(now);
    }

    c.bench_function("engine_update_active", |b| {
        b.iter(|| {
            now += Duration::from_millis(16);
            black_box(engine.update(now).overlay.opacity)
        })
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    typing_benchmark,
    fireworks_benchmark,
    engine_frame_benchmark
);
criterion_main!(benches);
