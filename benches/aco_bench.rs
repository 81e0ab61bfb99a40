//! Criterion benchmarks for the ACO path search.
//!
//! Uses synthetic complete graphs over points on a perturbed circle, so
//! the cost is dominated by the movement rule rather than graph shape.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_aco::aco::{AcoConfig, AcoRunner, ColonyRound, PheromoneField};
use u_aco::graph::{Attractiveness, Node, NodeId, WeightedGraph};

// ===========================================================================
// Synthetic graphs
// ===========================================================================

fn ring_graph(n: usize) -> WeightedGraph {
    WeightedGraph::complete((0..n).map(|i| {
        let t = i as f64 / n as f64 * std::f64::consts::TAU;
        let r = 100.0 + 7.0 * (i as f64 * 1.3).sin();
        Node::at(r * t.cos(), r * t.sin())
            .with_attractiveness(Attractiveness::Raw(6.0 + (i * 37 % 144) as f64))
    }))
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_aco_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_run");
    group.sample_size(10);

    for (nodes, ants, iterations) in [(20usize, 10usize, 20usize), (50, 20, 20), (100, 20, 10)] {
        let mut graph = ring_graph(nodes);
        graph
            .compute_distance_to_origin(NodeId(0))
            .expect("origin is in the graph");
        let config = AcoConfig::default()
            .with_num_ants(ants)
            .with_iterations(iterations)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_a{}_i{}", nodes, ants, iterations), nodes),
            &(graph, config),
            |b, (g, c)| {
                b.iter(|| {
                    let result =
                        AcoRunner::run(black_box(g), NodeId(0), NodeId(nodes / 2), black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_colony_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("colony_round");
    group.sample_size(10);

    for &nodes in &[20, 50, 100] {
        let graph = ring_graph(nodes);
        let pheromone = PheromoneField::initialize(&graph);
        let config = AcoConfig::classic().with_num_ants(20);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &nodes, |b, &n| {
            b.iter(|| {
                let round = ColonyRound::new(&graph, &pheromone, &config).expect("valid round");
                black_box(round.run(NodeId(0), NodeId(n / 2), 42))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_aco_run, bench_colony_round);
criterion_main!(benches);
