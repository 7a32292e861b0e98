use criterion::{criterion_group, criterion_main, Criterion};
use kitchen_content::{default_config, gen_config, GenArgs};

fn bench_gen(c: &mut Criterion) {
    let args = GenArgs::default();
    c.bench_function("gen_config", |b| {
        b.iter(|| {
            let _ = gen_config(&args);
        })
    });
    c.bench_function("with_overlay", |b| {
        let base = default_config().unwrap();
        let overlay = serde_json::json!({"game": {"order_bar": {"order_period": 4.0}}});
        b.iter(|| {
            let _ = base.with_overlay(overlay.clone());
        })
    });
}

criterion_group!(benches, bench_gen);
criterion_main!(benches);
