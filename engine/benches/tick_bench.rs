use criterion::{Criterion, criterion_group, criterion_main};
use std::collections::HashSet;
use std::time::Duration;
use snake_duel_engine::games::SessionRng;
use snake_duel_engine::games::snake::{
    Cell, FoodManager, GameConfig, GameState, Grid, InfiniteRule, Phase, run_tick,
};

fn crowded_config(infinite_rule: InfiniteRule) -> GameConfig {
    GameConfig {
        food_count: 50,
        infinite_mode: true,
        infinite_rule,
        ..GameConfig::default()
    }
}

fn bench_hundred_ticks(config: &GameConfig) {
    let mut rng = SessionRng::new(7);
    let mut state = GameState::new(config, &mut rng);
    state.phase = Phase::Running;

    for i in 1..=100u64 {
        let now = Duration::from_millis(i * config.speed_ms);
        let resolution = run_tick(&mut state, config, now, &mut rng);
        if resolution.transition.is_some() {
            break;
        }
    }
}

fn bench_food_refill_nearly_full_grid() {
    let grid = Grid::new(30, 20);
    let occupied: HashSet<Cell> = (0..grid.height)
        .flat_map(|y| (0..grid.width).map(move |x| Cell::new(x, y)))
        .filter(|cell| (cell.x + cell.y) % 10 != 0)
        .collect();
    let mut rng = SessionRng::new(11);
    FoodManager::refill(&grid, 50, &occupied, &mut rng);
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    let wrap = crowded_config(InfiniteRule::Wrap);
    group.bench_function("hundred_ticks_wrap", |b| b.iter(|| bench_hundred_ticks(&wrap)));

    let deflect = crowded_config(InfiniteRule::Deflect);
    group.bench_function("hundred_ticks_deflect", |b| b.iter(|| bench_hundred_ticks(&deflect)));

    group.bench_function("refill_nearly_full_grid", |b| b.iter(bench_food_refill_nearly_full_grid));

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
