//! Benchmarks for record building and table composition.
//!
//! Run with: cargo bench --bench compose_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use vartable::grouping::sort_records;
use vartable::model::{Collection, Mode, RawValue, Rgba, Variable, VariableType};
use vartable::records::build_records;
use vartable::store::{InMemoryStore, VariableStore};
use vartable::table::{build_tree, TableComposer, TableOptions};

const GROUPS: &[&str] = &["color", "spacing", "radius", "font", "shadow", "z"];

fn modes() -> Vec<Mode> {
    vec![
        Mode::new("light", "Light"),
        Mode::new("dark", "Dark"),
        Mode::new("contrast", "High contrast"),
    ]
}

/// Generate a store with `count` variables, a third of them aliases.
fn generate_store(count: usize) -> InMemoryStore {
    let mut store = InMemoryStore::new().with_collection(Collection::new("c", "Tokens", modes()));

    for i in 0..count {
        let group = GROUPS[i % GROUPS.len()];
        let name = format!("{group}/token-{i}");
        let id = format!("v{i}");
        let variable = if group == "color" {
            let shade = (i % 256) as f64 / 255.0;
            let mut v = Variable::new(&id, name, "c", VariableType::Color)
                .with_value("light", RawValue::Color(Rgba::rgb(shade, 0.2, 0.4)))
                .with_value("dark", RawValue::Color(Rgba::rgba(0.1, shade, 0.3, 0.8)));
            if i % 3 == 0 && i >= GROUPS.len() {
                v = v.with_value("contrast", RawValue::alias(format!("v{}", i - GROUPS.len())));
            }
            v
        } else if i % 3 == 0 && i >= GROUPS.len() {
            Variable::new(&id, name, "c", VariableType::Number)
                .with_value("light", RawValue::alias(format!("v{}", i - GROUPS.len())))
        } else {
            Variable::new(&id, name, "c", VariableType::Number)
                .with_value("light", RawValue::Number(i as f64 * 0.25))
                .with_value("dark", RawValue::Number(i as f64 * 0.5))
        };
        store.add_variable(variable);
    }

    store
}

fn benchmark_build_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_records");
    let modes = modes();

    for size in [100, 1000, 5000] {
        let store = generate_store(size);
        let variables = store.list_variables(Some("c")).unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| build_records(black_box(&store), black_box(&variables), &modes));
        });
    }

    group.finish();
}

fn benchmark_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    group.sample_size(20);
    let modes = modes();
    let composer = TableComposer::new(TableOptions::default());

    for size in [100, 1000, 5000] {
        let store = generate_store(size);
        let variables = store.list_variables(Some("c")).unwrap_or_default();
        let mut records = build_records(&store, &variables, &modes);
        sort_records(&mut records);

        group.bench_with_input(BenchmarkId::new("layout", size), &size, |b, _| {
            b.iter(|| composer.compose("Tokens", black_box(&records), &modes));
        });

        let layout = composer.compose("Tokens", &records, &modes);
        group.bench_with_input(BenchmarkId::new("tree", size), &size, |b, _| {
            b.iter(|| build_tree(black_box(&layout)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build_records, benchmark_compose);
criterion_main!(benches);
