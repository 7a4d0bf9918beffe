//! Benchmarks for one simulation tick on the demo grid sizes.
//!
//! Run with: `cargo bench -p cellgrid`

use cellgrid::patterns;
use cellgrid::{DemoConfig, LiquidFlowRule, LiquidVariant, SimulationEngine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_life_tick(c: &mut Criterion) {
    let config = DemoConfig::life();
    let mut engine = SimulationEngine::life(config.width, config.height).unwrap();
    patterns::randomize(&mut engine, 42, config.life.density);

    c.bench_function("life_tick_150x75", |b| {
        b.iter(|| {
            engine.tick();
            black_box(engine.generation())
        })
    });
}

fn bench_liquid_tick(c: &mut Criterion) {
    let config = DemoConfig::liquid();
    let mut group = c.benchmark_group("liquid_tick_60x60");

    for variant in LiquidVariant::ALL {
        let rule = LiquidFlowRule::new(variant.constants());
        let mut engine = SimulationEngine::liquid(rule, config.width, config.height).unwrap();
        for x in 10..50 {
            engine.paint_set_wall(x, 40, true);
        }
        for x in 0..config.width {
            engine.paint_add_volume(x, 0, 300);
        }

        group.bench_with_input(BenchmarkId::from_parameter(variant.name()), &variant, |b, _| {
            b.iter(|| {
                engine.paint_add_volume(30, 0, config.liquid.pour_amount);
                engine.tick();
                black_box(engine.total_volume())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_life_tick, bench_liquid_tick);
criterion_main!(benches);
