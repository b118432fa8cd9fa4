//! Benchmarks for story execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use storyflow::config::StoryConfig;
use storyflow::testing::fixtures;

fn story_benchmark(c: &mut Criterion) {
    let simple = fixtures::simple()
        .instance()
        .story("x")
        .expect("Simple.x binds");
    let nested = fixtures::substory_di()
        .instance()
        .inject("x", simple.clone())
        .story("y")
        .expect("SubstoryDI.y binds");
    let quiet = fixtures::simple()
        .instance()
        .with_config(StoryConfig::default().with_emit_events(false))
        .story("x")
        .expect("Simple.x binds");

    c.bench_function("simple_call", |b| {
        b.iter(|| simple.call(black_box([json!(1), json!(3)])))
    });

    c.bench_function("simple_run_failure", |b| {
        b.iter(|| simple.run(black_box([json!(2), json!(2)])))
    });

    c.bench_function("simple_call_without_events", |b| {
        b.iter(|| quiet.call(black_box([json!(1), json!(3)])))
    });

    c.bench_function("injected_substory_call", |b| {
        b.iter(|| nested.call(black_box([json!(-2)])))
    });

    c.bench_function("bind_injected_substory", |b| {
        b.iter(|| {
            fixtures::substory_di()
                .instance()
                .inject("x", simple.clone())
                .story(black_box("y"))
        })
    });

    c.bench_function("render_outline", |b| b.iter(|| black_box(&nested).render()));
}

criterion_group!(benches, story_benchmark);
criterion_main!(benches);
