use criterion::{criterion_group, criterion_main, Criterion};
use recommend::{CatalogItem, Model};

fn synthetic_catalog(n: u32) -> Vec<CatalogItem> {
    let words = [
        "gauze", "sterile", "bandage", "mask", "surgical", "thermometer", "digital", "gloves",
        "syringe", "saline", "tablet", "vitamin", "monitor", "pressure", "blood", "wheelchair",
    ];
    (0..n)
        .map(|id| {
            let text = (0..8)
                .map(|k| words[((id + k * 7) as usize) % words.len()])
                .collect::<Vec<_>>()
                .join(" ");
            CatalogItem { id, text }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let catalog = synthetic_catalog(200);
    c.bench_function("model_build_200_items", |b| b.iter(|| Model::build(&catalog)));
}

fn bench_query(c: &mut Criterion) {
    let model = Model::build(&synthetic_catalog(200));
    c.bench_function("neighbors_top3", |b| b.iter(|| model.neighbors(42, 3).unwrap()));
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
