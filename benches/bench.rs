use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

use uri_matcher::*;

fn benchmark(c: &mut Criterion) {
    let matcher = UriMatcher::new("/posts/100/comments/200");

    c.bench_function("new", |b| {
        b.iter(|| UriMatcher::new("/posts/100/comments/200"))
    });

    c.bench_function("uri", |b| b.iter(|| matcher.query(&Query::uri())));

    c.bench_function("segment", |b| b.iter(|| matcher.query(&Query::segment(3))));

    let query = Query::segment_match(3, "comments")
        .on_true("yes")
        .on_false("no");
    c.bench_function("segment match", |b| b.iter(|| matcher.query(&query)));

    let query = Query::regex_match("/posts/[0-9]+/comments/[0-9]+");
    c.bench_function("regex match", |b| b.iter(|| matcher.query(&query)));

    let args = match json!([3, "comments", "yes", "no"]) {
        serde_json::Value::Array(args) => args,
        _ => unreachable!(),
    };
    c.bench_function("positional segment match", |b| {
        b.iter(|| matcher.call(&args))
    });

    let invalid = vec![json!(1); 5];
    c.bench_function("invalid usage", |b| b.iter(|| matcher.call(&invalid)));
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
