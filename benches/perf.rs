use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use prop_cards::cards::build_cards;
use prop_cards::fake_logs::demo_dataset;
use prop_cards::history::GameLogStore;
use prop_cards::output::render_cards_json;
use prop_cards::projection::blended_projection;

fn bench_store_index(c: &mut Criterion) {
    let data = demo_dataset(11, 450, 70);
    c.bench_function("store_index_450x70", |b| {
        b.iter(|| {
            let store = GameLogStore::from_records(black_box(data.records.clone()));
            black_box(store.players());
        })
    });
}

fn bench_build_cards(c: &mut Criterion) {
    let data = demo_dataset(11, 450, 70);
    let store = GameLogStore::from_records(data.records);
    c.bench_function("build_cards_450_players", |b| {
        b.iter(|| {
            let report = build_cards(black_box(&store), black_box(&data.lines));
            black_box(report.cards.len());
        })
    });
}

fn bench_blend(c: &mut Criterion) {
    let series: Vec<f64> = (0..82).map(|i| (i % 37) as f64).collect();
    c.bench_function("blended_projection_82", |b| {
        b.iter(|| black_box(blended_projection(black_box(&series))))
    });
}

fn bench_render_json(c: &mut Criterion) {
    let data = demo_dataset(3, 200, 60);
    let store = GameLogStore::from_records(data.records);
    let cards = build_cards(&store, &data.lines).cards;
    c.bench_function("render_cards_json", |b| {
        b.iter(|| {
            let json = render_cards_json(black_box(&cards)).unwrap();
            black_box(json.len());
        })
    });
}

criterion_group!(
    benches,
    bench_store_index,
    bench_build_cards,
    bench_blend,
    bench_render_json
);
criterion_main!(benches);
