use criterion::{criterion_group, criterion_main, Criterion};
use mazery::{
    cells::GridCoordinate,
    generators, pathing,
    tremaux::{tremaux_step_limit, TremauxSolver},
    units::{Height, Width},
};

fn bench_astar_32(c: &mut Criterion) {
    let g = generators::ellers(Width(32), Height(32), 42).unwrap();
    let start = GridCoordinate::new(0, 0);
    let goal = GridCoordinate::new(31, 31);

    c.bench_function("astar_maze_32", move |b| {
        b.iter(|| pathing::find_path(&g, start, goal).unwrap())
    });
}

fn bench_tremaux_32(c: &mut Criterion) {
    let g = generators::ellers(Width(32), Height(32), 42).unwrap();
    let start = GridCoordinate::new(0, 0);
    let goal = GridCoordinate::new(31, 31);
    let limit = tremaux_step_limit(&g);

    c.bench_function("tremaux_maze_32", move |b| {
        b.iter(|| {
            let mut solver = TremauxSolver::new(7);
            solver.start(&g, start).unwrap();
            let mut steps = 0;
            while solver.current() != goal && steps < limit {
                solver.next_step(&g).unwrap();
                steps += 1;
            }
            steps
        })
    });
}

fn bench_distances_flood_fill_32(c: &mut Criterion) {
    let g = generators::ellers(Width(32), Height(32), 42).unwrap();
    let start = GridCoordinate::new(0, 0);

    c.bench_function("distances_flood_fill_32", move |b| {
        b.iter(|| pathing::Distances::new(&g, start).unwrap())
    });
}

criterion_group!(
    benches,
    bench_astar_32,
    bench_tremaux_32,
    bench_distances_flood_fill_32
);
criterion_main!(benches);
