use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glpaint_core::Point3;
use glpaint_settings::RenderConfig;
use glpaint_visualizer::{ArcFractionizer, ArcSpec, GcodeInterpreter, MotionReplay, ReplayStart};

fn spiral_program(turns: usize) -> String {
    let mut program = String::from("G0 X0 Y10\n");
    for turn in 0..turns {
        let z = -0.1 * (turn + 1) as f64;
        program.push_str(&format!("G2 X10 Y0 Z{z:.3} I0 J-10\n"));
        program.push_str("G2 X0 Y-10 I-10 J0\n");
        program.push_str("G2 X-10 Y0 I0 J10\n");
        program.push_str("G2 X0 Y10 I10 J0\n");
    }
    program
}

fn bench_fractionize(c: &mut Criterion) {
    let fractionizer = ArcFractionizer::default();
    let quarter = ArcSpec::new(
        Point3::new(0.0, 10.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(0.0, -10.0, 0.0),
        10.0,
        true,
    );
    let circle = ArcSpec::new(
        Point3::new(-100.0, 0.0, 0.0),
        Point3::new(-100.0, 0.0, 0.0),
        Point3::new(100.0, 0.0, 0.0),
        100.0,
        true,
    );

    c.bench_function("fractionize quarter r10", |b| {
        b.iter(|| fractionizer.fractionize(black_box(&quarter)))
    });
    c.bench_function("fractionize circle r100", |b| {
        b.iter(|| fractionizer.fractionize(black_box(&circle)))
    });
}

fn bench_replay(c: &mut Criterion) {
    let config = RenderConfig::default();
    let start = ReplayStart::default();
    let program = spiral_program(50);
    let commands = GcodeInterpreter::new(&config, &start)
        .interpret_str(&program)
        .expect("valid program");
    let replay = MotionReplay::from_config(&config);

    c.bench_function("interpret spiral", |b| {
        b.iter(|| {
            GcodeInterpreter::new(&config, &start)
                .interpret_str(black_box(&program))
                .expect("valid program")
        })
    });
    c.bench_function("replay spiral", |b| {
        b.iter(|| replay.replay(black_box(&commands), &start))
    });
}

criterion_group!(benches, bench_fractionize, bench_replay);
criterion_main!(benches);
