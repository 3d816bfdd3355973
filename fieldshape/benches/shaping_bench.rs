use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fieldshape::{shapeable, FieldShaper, PropertyCache, ShaperConfig};
use std::sync::Arc;

struct Habit {
    id: u32,
    name: String,
    description: String,
    length: u32,
    archived: bool,
}

shapeable!(Habit { id, name, description, length, archived });

fn habits(n: u32) -> Vec<Habit> {
    (0..n)
        .map(|i| Habit {
            id: i,
            name: format!("habit-{i}"),
            description: "a daily habit".to_string(),
            length: i % 60,
            archived: i % 2 == 0,
        })
        .collect()
}

fn bench_shaping(c: &mut Criterion) {
    let shaper = FieldShaper::with_cache(ShaperConfig::default(), Arc::new(PropertyCache::new()));
    let one = habits(1).remove(0);
    let many = habits(1_000);

    c.bench_function("shape_one_all_fields", |b| {
        b.iter(|| shaper.shape_one(black_box(&one), None))
    });

    c.bench_function("shape_one_two_fields", |b| {
        b.iter(|| shaper.shape_one(black_box(&one), black_box(Some("id,name"))))
    });

    c.bench_function("shape_many_1000", |b| {
        b.iter(|| shaper.shape_many(black_box(&many), black_box(Some("name, length"))))
    });

    c.bench_function("validate", |b| {
        b.iter(|| shaper.validate::<Habit>(black_box(Some("id, NAME, archived"))))
    });
}

criterion_group!(benches, bench_shaping);
criterion_main!(benches);
