use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use garden_gameplay::{GardenConfig, Intents, Simulation};
use std::time::Duration;

fn planted_session(grid: u32) -> Simulation {
    let config = GardenConfig {
        grid_width: grid,
        grid_height: grid,
        cell_size: 4,
        field_width: grid * 4,
        field_height: grid * 4,
        agent_size: 2.0,
        pest_spawn_interval: 20,
        ..GardenConfig::default()
    };
    let mut sim = Simulation::with_seed(config, 0xBEEF).expect("valid bench config");
    // Plant a column under the gardener so growth and beauty have work to do
    for _ in 0..grid {
        sim.step(&Intents::interact());
        for _ in 0..2 {
            sim.step(&Intents::moving(0.0, 1.0));
        }
    }
    sim
}

fn bench_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("garden_step");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(5));

    for grid in [16_u32, 64, 256] {
        group.bench_function(format!("grid{grid}_steps100"), |b| {
            b.iter_batched(
                || planted_session(grid),
                |mut sim| {
                    for _ in 0..100 {
                        sim.step(&Intents::accelerate());
                    }
                    sim
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_steps);
criterion_main!(benches);
